// Domain records shared by the store and feature services

mod agent;
mod app_request;
mod chat;
mod health;
mod ticket;

pub use agent::{Agent, AgentMetrics, DeviceInfo, MetricLevel, TopApp};
pub use app_request::{AppRequest, AppRequestStatus, CatalogApp, Service};
pub use chat::{ChatMessage, ChatRole, MessageStatus, NewChatMessage};
pub use health::{EventLog, HealthMetrics, HealthReport, HotFix, UpdateStatus};
pub use ticket::{NewTicket, Ticket, TicketCategory, TicketPriority, TicketStatus};
