use async_trait::async_trait;
use contact_manager_server::domain::ContactId;
use contact_manager_server::error::{PersistenceError, PersistenceResult};
use contact_manager_server::models::Contact;
use contact_manager_server::repositories::{ChangeSet, ContactRepository};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// seeded with test data, switched into a failing-commit mode, and tracks
/// method calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<ContactId, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_commits: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contact directly, bypassing commit bookkeeping.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id, contact);
    }

    /// Make every subsequent commit fail with a storage error.
    pub fn set_fail_commits(&self, fail: bool) {
        *self.fail_commits.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> PersistenceResult<Option<Contact>> {
        self.track_call("find_by_id");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.get(id).cloned())
    }

    async fn list_all(&self) -> PersistenceResult<Vec<Contact>> {
        self.track_call("list_all");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().cloned().collect())
    }

    async fn commit(&self, changes: ChangeSet) -> PersistenceResult<()> {
        self.track_call("commit");

        if *self.fail_commits.lock().unwrap() {
            return Err(PersistenceError::Storage(
                "simulated commit failure".to_string(),
            ));
        }

        let mut contacts = self.contacts.lock().unwrap();

        for contact in &changes.added {
            if contacts.contains_key(&contact.id) {
                return Err(PersistenceError::DuplicateId(contact.id));
            }
        }
        for contact in &changes.updated {
            if !contacts.contains_key(&contact.id) {
                return Err(PersistenceError::StaleId(contact.id));
            }
        }
        for id in &changes.removed {
            if !contacts.contains_key(id) {
                return Err(PersistenceError::StaleId(*id));
            }
        }

        for contact in changes.added {
            contacts.insert(contact.id, contact);
        }
        for contact in changes.updated {
            contacts.insert(contact.id, contact);
        }
        for id in changes.removed {
            contacts.remove(&id);
        }

        Ok(())
    }
}
