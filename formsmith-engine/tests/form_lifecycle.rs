//! End-to-end authoring and filling over the public API

use std::sync::Arc;

use formsmith_engine::{
    FieldConfig, FieldUpdate, FormDefinition, FormStore, JsonFileStorage, MemoryStorage,
    SessionState, SubmissionSession,
};
use formsmith_fields::{
    render_control, ControlKind, FieldOption, FieldType, FieldValue, ValidationRule,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_author_publish_fill_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("forms.json");

    // Author a contact form against a file-backed store.
    let storage = Arc::new(JsonFileStorage::new(&path));
    let mut store = FormStore::open(storage).await.expect("Failed to open store");
    let form = store
        .create_form("Contact", "How to reach us")
        .await
        .expect("Failed to create form");
    store
        .add_field(form.id, FieldConfig::new(FieldType::Text, "Full Name"))
        .await
        .expect("Failed to add name field");
    store
        .add_field(
            form.id,
            FieldConfig::new(FieldType::Email, "Email")
                .with_required(true)
                .with_placeholder("you@example.com"),
        )
        .await
        .expect("Failed to add email field");
    store
        .add_field(
            form.id,
            FieldConfig::new(
                FieldType::Select {
                    options: vec![
                        FieldOption::new("Sales", "sales"),
                        FieldOption::new("Support", "support"),
                    ],
                },
                "Topic",
            ),
        )
        .await
        .expect("Failed to add topic field");
    let published = store.publish_form(form.id).await.expect("Failed to publish");
    assert!(published.is_published);
    assert!(published.published_at.is_some());

    // Reopen from disk; the authored schema must survive.
    drop(store);
    let storage = Arc::new(JsonFileStorage::new(&path));
    let mut store = FormStore::open(storage).await.expect("Failed to reopen store");
    let loaded = store.form(form.id).expect("Form missing after reload").clone();
    assert_eq!(loaded.fields.len(), 3);
    assert_eq!(loaded.fields[1].key, "email");

    // Fill it. The select seeds its first option value as default.
    let mut session = SubmissionSession::new(loaded).expect("Failed to start session");
    assert_eq!(session.value("topic"), Some(&FieldValue::Text("sales".into())));

    let state = session.submit(&mut store).await.expect("Submit errored");
    assert_eq!(state, SessionState::Editing);
    assert_eq!(session.error("email"), Some("Email is required"));

    session.set_value("fullName", "Ada Lovelace".into());
    session.set_value("email", "ada@example.com".into());
    let state = session.submit(&mut store).await.expect("Submit errored");
    assert_eq!(state, SessionState::Submitted);

    // The captured response survives yet another reload.
    drop(store);
    let storage = Arc::new(JsonFileStorage::new(&path));
    let store = FormStore::open(storage).await.expect("Failed to reopen store");
    let responses = store.responses(form.id).expect("Form missing");
    assert_eq!(responses.len(), 1);
    assert_eq!(
        responses[0].data.get("email"),
        Some(&FieldValue::Text("ada@example.com".into()))
    );
    println!("Lifecycle roundtrip passed via {}", path.display());
}

#[tokio::test]
async fn test_duplicated_field_outlives_its_original() {
    let mut store = FormStore::open(Arc::new(MemoryStorage::new()))
        .await
        .expect("Failed to open store");
    let form = store
        .create_form("Signup", "")
        .await
        .expect("Failed to create form");
    let form = store
        .add_field(
            form.id,
            FieldConfig::new(FieldType::Password, "Password")
                .with_required(true)
                .with_validation(vec![ValidationRule::MinLength { min: 8 }]),
        )
        .await
        .expect("Failed to add password field");
    let original_id = form.fields[0].id;

    // Duplicate, then delete the original out from under the copy.
    let form = store
        .duplicate_field(form.id, original_id)
        .await
        .expect("Failed to duplicate");
    let copy_id = form.fields[1].id;
    assert_eq!(form.fields[1].label, "Password (copy)");
    assert_ne!(form.fields[1].key, form.fields[0].key);

    let form = store
        .remove_field(form.id, original_id)
        .await
        .expect("Failed to remove original");
    assert_eq!(form.fields.len(), 1);

    // The copy's key is still label-derived, so renaming it back
    // reclaims the now-free key.
    let form = store
        .update_field(form.id, copy_id, FieldUpdate::new().with_label("Password"))
        .await
        .expect("Failed to rename copy");
    assert_eq!(form.fields[0].key, "password");

    // The copied validation rules still apply at fill time.
    let mut session = SubmissionSession::new(form).expect("Failed to start session");
    session.set_value("password", "short".into());
    let state = session.submit(&mut store).await.expect("Submit errored");
    assert_eq!(state, SessionState::Editing);
    assert_eq!(
        session.error("password"),
        Some("Minimum 8 characters required")
    );

    session.set_value("password", "long enough".into());
    let state = session.submit(&mut store).await.expect("Submit errored");
    assert_eq!(state, SessionState::Submitted);
}

#[test]
fn test_stored_form_json_format() {
    // A document the way an earlier build might have written it,
    // including a field type this build does not know.
    let stored = r#"{
        "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
        "name": "Feedback",
        "description": "Tell us things",
        "createdAt": "2026-08-20T09:30:00Z",
        "updatedAt": "2026-08-21T10:00:00Z",
        "isPublished": true,
        "publishedAt": "2026-08-21T10:00:00Z",
        "fields": [
            {
                "id": "01BX5ZZKBKACTAV9WEVGEMMVRZ",
                "key": "email",
                "type": "email",
                "label": "Email",
                "required": true
            },
            {
                "id": "01BX5ZZKBKACTAV9WEVGEMMVS0",
                "key": "autograph",
                "type": "signature",
                "label": "Autograph"
            }
        ],
        "responses": [
            {
                "id": "01BX5ZZKBKACTAV9WEVGEMMVT1",
                "submittedAt": "2026-08-22T08:00:00Z",
                "data": { "email": "ada@example.com", "autograph": null }
            }
        ]
    }"#;

    let form: FormDefinition = serde_json::from_str(stored).expect("Failed to parse stored form");
    assert_eq!(form.name, "Feedback");
    assert!(form.is_published);
    assert_eq!(form.fields[0].field_type, FieldType::Email);
    assert!(form.fields[0].required);

    // The unrecognized type degrades to a plain text control.
    assert_eq!(form.fields[1].field_type, FieldType::Unknown);
    let control = render_control(&form.fields[1], &FieldValue::Null);
    assert_eq!(control.control, ControlKind::SingleLine);

    let response = &form.responses[0];
    assert_eq!(
        response.data.get("email"),
        Some(&FieldValue::Text("ada@example.com".into()))
    );
    assert_eq!(response.data.get("autograph"), Some(&FieldValue::Null));

    // Writing it back keeps the camelCase member names.
    let out = serde_json::to_string_pretty(&form).expect("Failed to serialize");
    assert!(out.contains("\"createdAt\""));
    assert!(out.contains("\"isPublished\""));
    assert!(out.contains("\"submittedAt\""));
    assert!(out.contains("\"type\": \"email\""));
}
