use crate::domain::ContactId;
use crate::error::PersistenceResult;
use crate::models::Contact;
use async_trait::async_trait;

/// A staged unit of work: aggregates to add, replace, and remove.
///
/// Children travel inside their parent aggregate, so replacing a contact's
/// child collections and deleting a contact's children are both expressed by
/// staging the parent.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Newly created aggregates
    pub added: Vec<Contact>,

    /// Existing aggregates whose stored state is replaced
    pub updated: Vec<Contact>,

    /// Aggregates removed together with everything they own
    pub removed: Vec<ContactId>,
}

impl ChangeSet {
    /// A change set staging one new aggregate.
    pub fn add(contact: Contact) -> Self {
        Self {
            added: vec![contact],
            ..Self::default()
        }
    }

    /// A change set replacing one stored aggregate.
    pub fn update(contact: Contact) -> Self {
        Self {
            updated: vec![contact],
            ..Self::default()
        }
    }

    /// A change set removing one aggregate.
    pub fn remove(id: ContactId) -> Self {
        Self {
            removed: vec![id],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Repository for contact aggregates.
///
/// Provides abstraction over contact storage and retrieval, enabling
/// different implementations (in-memory, mock, durable).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Load a single contact with its email and address collections
    /// populated, or `None` if the id is not stored.
    async fn find_by_id(&self, id: &ContactId) -> PersistenceResult<Option<Contact>>;

    /// All stored contacts; ordering is left to the caller.
    async fn list_all(&self) -> PersistenceResult<Vec<Contact>>;

    /// Apply a staged change set atomically: either every staged change
    /// applies or none do.
    async fn commit(&self, changes: ChangeSet) -> PersistenceResult<()>;
}
