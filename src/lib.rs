// Domain records
pub mod model;

// Static seed fixtures
pub mod seed;

// Configuration loading
pub mod config;

// Application state container
pub mod state;

// Scoped store access
pub mod context;

// Keyword classification
pub mod classify;

// Simulated delayed responses
pub mod sim;

// Feature services
pub mod chatbot;
pub mod installer;
pub mod troubleshoot;

// Session wiring
pub mod session;

pub use session::Session;
pub use state::AppStore;
