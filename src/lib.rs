//! Contact manager server - a contact-management service with live change
//! notifications.
//!
//! This library provides the persistence and change-notification workflow
//! for contact aggregates: transactional save/delete of a contact with its
//! owned email and postal addresses, plus fan-out of a "contacts changed"
//! signal that keeps every connected client consistent.
//!
//! # Architecture
//!
//! - **models**: Contact aggregate and inbound payload shapes
//! - **domain**: Value objects (contact ids) with construction-time validation
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Persistence port and the in-memory store
//! - **services**: Save/delete and query workflows
//! - **broadcast**: Subscriber registry and change-signal fan-out
//! - **seed**: Optional startup seeding
//! - **server**: MCP protocol server

// Re-export commonly used types
pub mod broadcast;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod services;

pub use broadcast::{ChangeBroadcaster, ChangeSignal, Subscription};
pub use config::Config;
pub use domain::ContactId;
pub use error::{ConfigError, ContactError, PersistenceError};
pub use models::{Contact, EmailAddress, PostalAddress, SaveContactRequest};
pub use repositories::{ChangeSet, ContactRepository, MemoryContactRepository};
pub use server::ContactManagerServer;
pub use services::{ContactService, ContactServiceImpl, QueryService, QueryServiceImpl};
