//! Inbound payload shapes for the save workflow.
//!
//! These mirror what a client submits: the full desired state of one
//! contact, including the complete child lists. Dates travel as
//! "YYYY-MM-DD" strings and are parsed by the service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One submitted (type, email) pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct EmailPayload {
    /// Classification label, e.g. "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    pub email: String,
}

/// One submitted postal address tuple.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct AddressPayload {
    /// Classification label, e.g. "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A submitted contact: an optional existing id plus the full desired state.
///
/// An absent or empty `contact_id` means "create a new contact". The child
/// lists are taken as the complete new sets; whatever the contact owned
/// before the save is discarded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct SaveContactRequest {
    /// Existing contact id; omit (or send empty) to create a new contact
    pub contact_id: Option<String>,

    /// Salutation, e.g. "Mr" or "Dr"
    pub title: String,

    pub first_name: String,
    pub last_name: String,

    /// Date of birth as "YYYY-MM-DD"
    pub date_of_birth: Option<String>,

    /// Complete new set of email addresses, in display order
    pub emails: Vec<EmailPayload>,

    /// Complete new set of postal addresses, in display order
    pub addresses: Vec<AddressPayload>,
}
