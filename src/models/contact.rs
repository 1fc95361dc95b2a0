//! Contact aggregate: a contact and the records it owns.
//!
//! Child records live only inside their parent aggregate. There is no
//! standalone email or address storage, so deleting a contact deletes its
//! children with it and no orphan can exist.

use crate::domain::ContactId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An email address owned by exactly one contact.
///
/// Child identity is regenerated on every save of the owning contact; the
/// save workflow replaces the stored set wholesale instead of diffing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Unique identifier for this record
    pub id: Uuid,

    /// Classification label, e.g. "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    /// The address itself; the core applies no format validation
    pub email: String,
}

impl EmailAddress {
    /// Construct a new email record with a fresh identity.
    pub fn new(kind: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            email: email.into(),
        }
    }
}

/// A postal address owned by exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostalAddress {
    /// Unique identifier for this record
    pub id: Uuid,

    /// Classification label, e.g. "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    /// First street line
    pub street1: String,

    /// Optional second street line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    pub city: String,
    pub state: String,
    pub zip: String,
}

impl PostalAddress {
    /// Construct a new address record with a fresh identity.
    pub fn new(
        kind: impl Into<String>,
        street1: impl Into<String>,
        street2: Option<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            street1: street1.into(),
            street2,
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }
}

/// A contact aggregate.
///
/// The vectors are the owned child collections, kept in submission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Unique identifier, assigned on first save and immutable thereafter
    pub id: ContactId,

    /// Salutation, e.g. "Mr" or "Dr"
    pub title: String,

    pub first_name: String,
    pub last_name: String,

    /// Date of birth, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    /// Owned email addresses
    #[serde(default)]
    pub emails: Vec<EmailAddress>,

    /// Owned postal addresses
    #[serde(default)]
    pub addresses: Vec<PostalAddress>,
}

impl Contact {
    /// Create a contact with the given scalar fields and no children yet.
    pub fn new(
        id: ContactId,
        title: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            emails: Vec::new(),
            addresses: Vec::new(),
        }
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
