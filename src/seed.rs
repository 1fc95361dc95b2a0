//! Startup seeding for the contact store.

use crate::domain::ContactId;
use crate::error::PersistenceResult;
use crate::models::{Contact, EmailAddress, PostalAddress};
use crate::repositories::{ChangeSet, ContactRepository};
use chrono::NaiveDate;
use tracing::info;

/// Populate an empty repository with sample contacts.
///
/// Skipped when the store already holds data, so a restart against a shared
/// store does not duplicate records.
pub async fn initialize(repository: &dyn ContactRepository) -> PersistenceResult<()> {
    if !repository.list_all().await?.is_empty() {
        return Ok(());
    }

    let mut changes = ChangeSet::default();

    let mut ada = Contact::new(
        ContactId::generate(),
        "Ms",
        "Ada",
        "Lovelace",
        NaiveDate::from_ymd_opt(1815, 12, 10),
    );
    ada.emails.push(EmailAddress::new("work", "ada@example.com"));
    ada.addresses.push(PostalAddress::new(
        "home",
        "12 St James's Square",
        None,
        "London",
        "LDN",
        "SW1Y 4JH",
    ));
    changes.added.push(ada);

    let mut george = Contact::new(ContactId::generate(), "Mr", "George", "Boole", None);
    george
        .emails
        .push(EmailAddress::new("home", "george@example.com"));
    george
        .emails
        .push(EmailAddress::new("work", "boole@example.org"));
    changes.added.push(george);

    let count = changes.added.len();
    repository.commit(changes).await?;
    info!(count, "seeded contact store");

    Ok(())
}
