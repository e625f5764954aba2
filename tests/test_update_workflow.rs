mod helpers;

use helpers::*;
use petzone_admin::{
    PetKind, RecordId, UpdateOutcome, UserForm, UserKind, VlogKind, WorkflowError,
};
use serde_json::json;

#[tokio::test]
async fn test_update_without_image_is_one_call() {
    let harness = Harness::<PetKind>::new();
    let mut form = rex_form();
    form.stock = "5".to_string();

    let outcome = harness
        .workflow
        .update(&test_session(), &RecordId::from("p1"), &form, None)
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert_eq!(
        harness.log.calls(),
        vec![Call::Update(json!({
            "petId": "p1",
            "name": "Rex",
            "description": "Friendly",
            "type": "Dog",
            "price": 1500.0,
            "stock": 5
        }))]
    );
}

#[tokio::test]
async fn test_update_with_image_uploads_after_fields() {
    let harness = Harness::<VlogKind>::new();

    let outcome = harness
        .workflow
        .update(&test_session(), &RecordId::from(7), &vlog_form(), Some(&valid_png()))
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    let calls = harness.log.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Update(_)));
    assert_eq!(
        calls[1],
        Call::Upload {
            path: "/vlog/image".to_string(),
            id: RecordId::from(7),
            file_name: "rex.png".to_string(),
        }
    );
}

#[tokio::test]
async fn test_failed_image_on_update_is_partial_and_not_rolled_back() {
    let harness = Harness::<PetKind>::new();
    harness.attachments.fail_upload(Some(server_error("Disk full")));

    let outcome = harness
        .workflow
        .update(&test_session(), &RecordId::from("p1"), &rex_form(), Some(&valid_png()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::PartiallyUpdated {
            detail: Some("Disk full".to_string())
        }
    );
    assert_eq!(harness.log.count(|call| matches!(call, Call::Delete(_))), 0);
    assert_eq!(harness.log.count(|call| matches!(call, Call::Update(_))), 1);
}

#[tokio::test]
async fn test_failed_field_update_skips_image() {
    let harness = Harness::<PetKind>::new();
    harness.records.fail_update(Some(server_error("Pet not found")));

    let err = harness
        .workflow
        .update(&test_session(), &RecordId::from("p1"), &rex_form(), Some(&valid_png()))
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::UpdateFailed(Some("Pet not found".to_string())));
    assert_eq!(harness.log.calls().len(), 1);
}

#[tokio::test]
async fn test_invalid_update_makes_no_calls() {
    let harness = Harness::<PetKind>::new();
    let mut form = rex_form();
    form.price = "-1".to_string();

    let err = harness
        .workflow
        .update(&test_session(), &RecordId::from("p1"), &form, None)
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert!(harness.log.calls().is_empty());
}

#[tokio::test]
async fn test_user_update_keeps_password_when_blank() {
    let harness = Harness::<UserKind>::new();
    let form = UserForm {
        name: "Mia".to_string(),
        email: "Mia@Example.com".to_string(),
        password: String::new(),
        role: "manager".to_string(),
    };

    harness
        .workflow
        .update(&test_session(), &RecordId::from("u1"), &form, None)
        .await
        .unwrap();

    assert_eq!(
        harness.log.calls(),
        vec![Call::Update(json!({
            "id": "u1",
            "name": "Mia",
            "email": "mia@example.com",
            "role": "manager"
        }))]
    );
}
