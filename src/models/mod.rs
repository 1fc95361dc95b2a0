//! Data models for contact aggregates.
//!
//! This module contains the contact entity with its owned email and postal
//! address collections, plus the inbound payload shapes the save workflow
//! consumes.

pub mod contact;
pub mod payload;

pub use contact::{Contact, EmailAddress, PostalAddress};
pub use payload::{AddressPayload, EmailPayload, SaveContactRequest};
