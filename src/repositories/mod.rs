mod memory_contact_repository;
mod traits;

pub use memory_contact_repository::MemoryContactRepository;
pub use traits::{ChangeSet, ContactRepository};
