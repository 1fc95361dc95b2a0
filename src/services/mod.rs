//! Application service layer.
//!
//! Services contain the business logic and orchestrate the repository port
//! and the change broadcaster. They provide a clean boundary between the
//! MCP handlers and the data access layer.

mod contact_service;
mod query_service;

pub use contact_service::{ContactService, ContactServiceImpl};
pub use query_service::{QueryService, QueryServiceImpl};

// Re-export common types used by services
pub use crate::models::{Contact, SaveContactRequest};
