// Application state container and its mutation contracts

mod events;
mod ids;
mod store;

pub use events::StoreEvent;
pub use ids::{IdGenerator, MESSAGE_PREFIX, REQUEST_PREFIX, TICKET_PREFIX};
pub use store::{AppSnapshot, AppStore, TicketFilter, TicketStats};

#[cfg(test)]
mod tests;
