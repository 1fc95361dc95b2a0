//! Query service layer.
//!
//! Read-only access to the contact set for display.

use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::Contact;
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Query service trait for read operations.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// All contacts ordered for display: first name ascending, byte-wise
    /// (Unicode code point order, case-sensitive), ties broken by id.
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>>;

    /// Load one contact with its child collections populated.
    async fn get_contact(&self, id: &ContactId) -> ContactResult<Contact>;
}

/// Default implementation of QueryService.
pub struct QueryServiceImpl {
    repository: Arc<dyn ContactRepository>,
}

impl QueryServiceImpl {
    /// Create a new query service.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryService for QueryServiceImpl {
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>> {
        let mut contacts = self.repository.list_all().await?;
        contacts.sort_by(|a, b| {
            a.first_name
                .cmp(&b.first_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(contacts)
    }

    async fn get_contact(&self, id: &ContactId) -> ContactResult<Contact> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{ChangeSet, MemoryContactRepository};

    fn contact_named(first_name: &str) -> Contact {
        Contact::new(ContactId::generate(), "Mx", first_name, "Test", None)
    }

    #[tokio::test]
    async fn test_list_orders_by_first_name() {
        let repo = Arc::new(MemoryContactRepository::new());
        let changes = ChangeSet {
            added: vec![
                contact_named("Zoe"),
                contact_named("Amy"),
                contact_named("Bob"),
            ],
            ..ChangeSet::default()
        };
        repo.commit(changes).await.unwrap();

        let service = QueryServiceImpl::new(repo);
        let names: Vec<String> = service
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, vec!["Amy", "Bob", "Zoe"]);
    }

    #[tokio::test]
    async fn test_list_breaks_name_ties_by_id() {
        let repo = Arc::new(MemoryContactRepository::new());
        let first = contact_named("Amy");
        let second = contact_named("Amy");
        let mut expected = vec![first.id, second.id];
        expected.sort();

        repo.commit(ChangeSet {
            added: vec![first, second],
            ..ChangeSet::default()
        })
        .await
        .unwrap();

        let service = QueryServiceImpl::new(repo);
        let ids: Vec<ContactId> = service
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_get_missing_contact_is_not_found() {
        let service = QueryServiceImpl::new(Arc::new(MemoryContactRepository::new()));
        let result = service.get_contact(&ContactId::generate()).await;
        assert!(matches!(result, Err(ContactError::NotFound(_))));
    }
}
