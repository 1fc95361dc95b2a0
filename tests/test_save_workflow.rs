//! Tests for the contact save workflow.
//!
//! Cover the create-or-update decision, wholesale child replacement, and
//! the validation applied before any repository interaction.

mod mocks;

use contact_manager_server::broadcast::ChangeBroadcaster;
use contact_manager_server::domain::ContactId;
use contact_manager_server::error::ContactError;
use contact_manager_server::models::{AddressPayload, EmailPayload, SaveContactRequest};
use contact_manager_server::repositories::ContactRepository;
use contact_manager_server::services::{ContactService, ContactServiceImpl};
use mocks::MockContactRepository;
use std::sync::Arc;

fn service_over(repo: &MockContactRepository) -> ContactServiceImpl {
    ContactServiceImpl::new(Arc::new(repo.clone()), Arc::new(ChangeBroadcaster::default()))
}

fn save_request(first_name: &str, last_name: &str) -> SaveContactRequest {
    SaveContactRequest {
        title: "Mr".to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..SaveContactRequest::default()
    }
}

fn email(kind: &str, address: &str) -> EmailPayload {
    EmailPayload {
        kind: kind.to_string(),
        email: address.to_string(),
    }
}

#[tokio::test]
async fn test_save_without_id_creates_contact() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let saved = service.save_contact(save_request("John", "Doe")).await.unwrap();

    assert_eq!(saved.first_name, "John");
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get_call_count("commit"), 1);
}

#[tokio::test]
async fn test_save_without_id_never_merges_with_identical_contact() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let first = service.save_contact(save_request("John", "Doe")).await.unwrap();
    let second = service.save_contact(save_request("John", "Doe")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_save_with_unknown_id_fails_without_commit() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.contact_id = Some(ContactId::generate().to_string());

    let result = service.save_contact(request).await;

    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(repo.get_call_count("commit"), 0);
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_save_replaces_children_wholesale() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.emails = vec![email("home", "a@x.com"), email("work", "b@x.com")];
    let saved = service.save_contact(request).await.unwrap();
    assert_eq!(saved.emails.len(), 2);

    // Second save with an empty email list must leave zero emails.
    let mut request = save_request("John", "Doe");
    request.contact_id = Some(saved.id.to_string());
    let resaved = service.save_contact(request).await.unwrap();

    assert_eq!(resaved.id, saved.id);
    assert!(resaved.emails.is_empty());

    let stored = repo.find_by_id(&saved.id).await.unwrap().unwrap();
    assert!(stored.emails.is_empty());
}

#[tokio::test]
async fn test_save_preserves_child_submission_order() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.emails = vec![
        email("work", "z@x.com"),
        email("home", "a@x.com"),
        email("other", "m@x.com"),
    ];
    request.addresses = vec![
        AddressPayload {
            kind: "work".to_string(),
            street1: "9 High St".to_string(),
            street2: Some("Floor 2".to_string()),
            city: "Leeds".to_string(),
            state: "YRK".to_string(),
            zip: "LS1 1AA".to_string(),
        },
        AddressPayload {
            kind: "home".to_string(),
            street1: "1 Low Rd".to_string(),
            street2: None,
            city: "York".to_string(),
            state: "YRK".to_string(),
            zip: "YO1 1AA".to_string(),
        },
    ];

    let saved = service.save_contact(request).await.unwrap();

    let emails: Vec<&str> = saved.emails.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, vec!["z@x.com", "a@x.com", "m@x.com"]);
    let streets: Vec<&str> = saved.addresses.iter().map(|a| a.street1.as_str()).collect();
    assert_eq!(streets, vec!["9 High St", "1 Low Rd"]);
}

#[tokio::test]
async fn test_save_regenerates_child_identity() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.emails = vec![email("home", "same@x.com")];
    let saved = service.save_contact(request).await.unwrap();
    let original_child_id = saved.emails[0].id;

    // Resubmitting identical content still produces a fresh child record.
    let mut request = save_request("John", "Doe");
    request.contact_id = Some(saved.id.to_string());
    request.emails = vec![email("home", "same@x.com")];
    let resaved = service.save_contact(request).await.unwrap();

    assert_eq!(resaved.emails[0].email, "same@x.com");
    assert_ne!(resaved.emails[0].id, original_child_id);
}

#[tokio::test]
async fn test_save_overwrites_scalars_unconditionally() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.date_of_birth = Some("1990-04-12".to_string());
    let saved = service.save_contact(request).await.unwrap();
    assert!(saved.date_of_birth.is_some());

    let request = SaveContactRequest {
        contact_id: Some(saved.id.to_string()),
        title: "Dr".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        ..SaveContactRequest::default()
    };
    let resaved = service.save_contact(request).await.unwrap();

    assert_eq!(resaved.title, "Dr");
    assert_eq!(resaved.first_name, "Jane");
    assert_eq!(resaved.date_of_birth, None);
}

#[tokio::test]
async fn test_save_rejects_blank_names_before_repository() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let result = service.save_contact(save_request("", "Doe")).await;
    assert!(matches!(result, Err(ContactError::Validation(_))));

    let result = service.save_contact(save_request("John", "   ")).await;
    assert!(matches!(result, Err(ContactError::Validation(_))));

    assert_eq!(repo.get_call_count("find_by_id"), 0);
    assert_eq!(repo.get_call_count("commit"), 0);
}

#[tokio::test]
async fn test_save_rejects_malformed_id() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.contact_id = Some("not-a-uuid".to_string());

    let result = service.save_contact(request).await;
    assert!(matches!(result, Err(ContactError::Validation(_))));
    assert_eq!(repo.get_call_count("commit"), 0);
}

#[tokio::test]
async fn test_save_rejects_malformed_date_of_birth() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);

    let mut request = save_request("John", "Doe");
    request.date_of_birth = Some("April 12th".to_string());

    let result = service.save_contact(request).await;
    assert!(matches!(result, Err(ContactError::Validation(_))));
    assert_eq!(repo.get_call_count("commit"), 0);
}

#[tokio::test]
async fn test_failed_commit_propagates_persistence_error() {
    let repo = MockContactRepository::new();
    let service = service_over(&repo);
    repo.set_fail_commits(true);

    let result = service.save_contact(save_request("John", "Doe")).await;

    assert!(matches!(result, Err(ContactError::Persistence(_))));
    assert_eq!(repo.len(), 0);
}
