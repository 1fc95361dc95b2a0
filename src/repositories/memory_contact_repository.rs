use crate::domain::ContactId;
use crate::error::{PersistenceError, PersistenceResult};
use crate::models::Contact;
use crate::repositories::traits::{ChangeSet, ContactRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Contact repository backed by a process-local hash map.
///
/// The deployment's persistence provider. Commit validates every staged
/// operation against current state before touching it, so a conflicting
/// change set leaves the store untouched. Concurrent commits serialize on
/// the store lock; last commit wins.
#[derive(Clone, Default)]
pub struct MemoryContactRepository {
    contacts: Arc<Mutex<HashMap<ContactId, Contact>>>,
}

impl MemoryContactRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> PersistenceResult<MutexGuard<'_, HashMap<ContactId, Contact>>> {
        self.contacts
            .lock()
            .map_err(|_| PersistenceError::Storage("contact store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> PersistenceResult<Option<Contact>> {
        Ok(self.store()?.get(id).cloned())
    }

    async fn list_all(&self) -> PersistenceResult<Vec<Contact>> {
        Ok(self.store()?.values().cloned().collect())
    }

    async fn commit(&self, changes: ChangeSet) -> PersistenceResult<()> {
        let mut contacts = self.store()?;

        // Validate the whole change set before applying any of it.
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
