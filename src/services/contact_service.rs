//! Contact service layer.
//!
//! The save and delete workflows for contact aggregates: create-or-update
//! with wholesale child replacement, aggregate deletion, and the post-commit
//! change broadcast.

use crate::broadcast::{ChangeBroadcaster, ChangeSignal};
use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, EmailAddress, PostalAddress, SaveContactRequest};
use crate::repositories::{ChangeSet, ContactRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// Contact service trait for the mutation workflows.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Create or update a contact from a submitted payload.
    ///
    /// An absent (or empty) `contact_id` always creates a new contact with a
    /// fresh identity. A submitted id must match a stored contact or the
    /// call fails with `NotFound`; the service never substitutes a new
    /// contact for a missing explicit id. The submitted email and address
    /// lists replace the stored child sets wholesale.
    ///
    /// Broadcasts one change signal after the commit succeeds; a failed
    /// commit propagates without any signal.
    async fn save_contact(&self, request: SaveContactRequest) -> ContactResult<Contact>;

    /// Delete a contact together with every record it owns.
    async fn delete_contact(&self, id: &ContactId) -> ContactResult<()>;
}

/// Default implementation of ContactService.
///
/// Stateless between invocations; all state lives behind the repository.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    broadcaster: Arc<ChangeBroadcaster>,
}

/// Validation helper functions.
impl ContactServiceImpl {
    /// Required-field checks, applied before any repository interaction.
    fn validate_request(request: &SaveContactRequest) -> Result<(), String> {
        if request.first_name.trim().is_empty() {
            return Err("first name cannot be blank".to_string());
        }
        if request.last_name.trim().is_empty() {
            return Err("last name cannot be blank".to_string());
        }
        Ok(())
    }

    /// Parse the submitted id; `None` and the empty string both mean "new".
    fn submitted_id(request: &SaveContactRequest) -> Result<Option<ContactId>, String> {
        match request.contact_id.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => ContactId::parse(raw).map(Some).map_err(|e| e.to_string()),
        }
    }

    /// Parse the submitted date of birth ("YYYY-MM-DD").
    fn parse_date_of_birth(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
        match raw {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("invalid date of birth: {}", raw)),
        }
    }
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>, broadcaster: Arc<ChangeBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn save_contact(&self, request: SaveContactRequest) -> ContactResult<Contact> {
        Self::validate_request(&request).map_err(ContactError::Validation)?;
        let submitted_id = Self::submitted_id(&request).map_err(ContactError::Validation)?;
        let date_of_birth = Self::parse_date_of_birth(request.date_of_birth.as_deref())
            .map_err(ContactError::Validation)?;

        // A submitted id must denote a stored contact; the loaded aggregate
        // itself contributes nothing further, since every scalar field is
        // overwritten and both child sets are replaced below.
        let (id, is_new) = match submitted_id {
            None => (ContactId::generate(), true),
            Some(id) => {
                self.repository
                    .find_by_id(&id)
                    .await?
                    .ok_or(ContactError::NotFound(id))?;
                (id, false)
            }
        };

        // Scalar fields are taken from the payload unconditionally, changed
        // or not.
        let mut contact = Contact::new(
            id,
            request.title,
            request.first_name,
            request.last_name,
            date_of_birth,
        );

        // The child collections are replaced wholesale. Prior children are
        // discarded with the aggregate state they lived in; each submitted
        // child gets a fresh identity, in submission order.
        contact.emails = request
            .emails
            .iter()
            .map(|e| EmailAddress::new(&e.kind, &e.email))
            .collect();
        contact.addresses = request
            .addresses
            .iter()
            .map(|a| {
                PostalAddress::new(
                    &a.kind,
                    &a.street1,
                    a.street2.clone(),
                    &a.city,
                    &a.state,
                    &a.zip,
                )
            })
            .collect();

        let changes = if is_new {
            ChangeSet::add(contact.clone())
        } else {
            ChangeSet::update(contact.clone())
        };
        self.repository.commit(changes).await?;

        info!(contact_id = %contact.id, is_new, "contact saved");
        self.broadcaster.broadcast(ChangeSignal::Saved(contact.id));

        Ok(contact)
    }

    async fn delete_contact(&self, id: &ContactId) -> ContactResult<()> {
        let contact = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(*id))?;

        // Removing the aggregate removes every owned email and postal
        // address with it.
        self.repository.commit(ChangeSet::remove(contact.id)).await?;

        info!(contact_id = %contact.id, "contact deleted");
        self.broadcaster.broadcast(ChangeSignal::Deleted(contact.id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request_requires_names() {
        let request = SaveContactRequest {
            first_name: "  ".to_string(),
            last_name: "Doe".to_string(),
            ..SaveContactRequest::default()
        };
        assert!(ContactServiceImpl::validate_request(&request).is_err());

        let request = SaveContactRequest {
            first_name: "John".to_string(),
            last_name: String::new(),
            ..SaveContactRequest::default()
        };
        assert!(ContactServiceImpl::validate_request(&request).is_err());

        let request = SaveContactRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            ..SaveContactRequest::default()
        };
        assert!(ContactServiceImpl::validate_request(&request).is_ok());
    }

    #[test]
    fn test_submitted_id_empty_means_new() {
        let mut request = SaveContactRequest::default();
        assert_eq!(ContactServiceImpl::submitted_id(&request).unwrap(), None);

        request.contact_id = Some(String::new());
        assert_eq!(ContactServiceImpl::submitted_id(&request).unwrap(), None);

        let id = ContactId::generate();
        request.contact_id = Some(id.to_string());
        assert_eq!(ContactServiceImpl::submitted_id(&request).unwrap(), Some(id));

        request.contact_id = Some("garbage".to_string());
        assert!(ContactServiceImpl::submitted_id(&request).is_err());
    }

    #[test]
    fn test_parse_date_of_birth() {
        assert_eq!(ContactServiceImpl::parse_date_of_birth(None).unwrap(), None);
        assert_eq!(
            ContactServiceImpl::parse_date_of_birth(Some("")).unwrap(),
            None
        );
        assert_eq!(
            ContactServiceImpl::parse_date_of_birth(Some("1990-04-12")).unwrap(),
            NaiveDate::from_ymd_opt(1990, 4, 12)
        );
        assert!(ContactServiceImpl::parse_date_of_birth(Some("12/04/1990")).is_err());
    }
}
