use cats_core::db::open_db_in_memory;
use cats_core::{
    ApplicationDraft, ApplicationService, CustomerDraft, CustomerId, CustomerService, EntityRef,
    NoteDraft, NoteService, ServiceError, SqliteApplicationRepository, SqliteCustomerRepository,
    SqliteMeetingNoteRepository,
};
use rusqlite::Connection;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn seed_customer(conn: &mut Connection, applications: &[&str]) -> CustomerId {
    let mut service = CustomerService::new(SqliteCustomerRepository::new(conn));
    service
        .create_customer(CustomerDraft {
            applications: applications
                .iter()
                .map(|name| ApplicationDraft {
                    name: Some(name.to_string()),
                    modalities: strings(&["Text"]),
                    models: strings(&["GPT-4"]),
                    cloud_services: strings(&["Azure OpenAI"]),
                })
                .collect(),
            ..CustomerDraft::new("Initech", "Technology")
        })
        .unwrap()
}

#[test]
fn create_application_returns_persisted_row_with_tags() {
    let mut conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&mut conn, &["Existing"]);

    let mut service = ApplicationService::new(SqliteApplicationRepository::new(&mut conn));
    let created = service
        .create_application(
            customer_id,
            ApplicationDraft {
                name: Some("Vision QA".to_string()),
                modalities: strings(&["Image", "Text"]),
                models: strings(&["Gemini Pro"]),
                cloud_services: strings(&["Google Vertex AI"]),
            },
        )
        .unwrap();

    assert_eq!(created.customer_id, customer_id);
    assert_eq!(created.name, "Vision QA");
    assert_eq!(created.modalities, strings(&["Image", "Text"]));
    assert_eq!(created.models, strings(&["Gemini Pro"]));
    assert_eq!(created.cloud_services, strings(&["Google Vertex AI"]));

    let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let detail = customers.get_customer(customer_id).unwrap();
    let names: Vec<&str> = detail
        .applications
        .iter()
        .map(|application| application.name.as_str())
        .collect();
    assert_eq!(names, vec!["Existing", "Vision QA"]);
}

#[test]
fn create_application_for_missing_customer_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ApplicationService::new(SqliteApplicationRepository::new(&mut conn));

    let err = service
        .create_application(9, ApplicationDraft::named("Orphan"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityRef::Customer(9))));
}

#[test]
fn update_application_replaces_tags_without_touching_siblings() {
    let mut conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&mut conn, &["Target", "Sibling"]);
    let (target_id, sibling_before) = {
        let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
        let detail = customers.get_customer(customer_id).unwrap();
        (detail.applications[0].id, detail.applications[1].clone())
    };

    let mut service = ApplicationService::new(SqliteApplicationRepository::new(&mut conn));
    let updated = service
        .update_application(
            target_id,
            ApplicationDraft {
                name: Some("Target v2".to_string()),
                modalities: strings(&["Audio"]),
                models: Vec::new(),
                cloud_services: strings(&["AWS SageMaker", "IBM watsonx"]),
            },
        )
        .unwrap();

    assert_eq!(updated.id, target_id);
    assert_eq!(updated.name, "Target v2");
    assert_eq!(updated.modalities, strings(&["Audio"]));
    assert!(updated.models.is_empty());
    assert_eq!(
        updated.cloud_services,
        strings(&["AWS SageMaker", "IBM watsonx"])
    );

    let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let detail = customers.get_customer(customer_id).unwrap();
    assert_eq!(detail.applications[1], sibling_before);
}

#[test]
fn update_missing_application_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ApplicationService::new(SqliteApplicationRepository::new(&mut conn));

    let err = service
        .update_application(31, ApplicationDraft::named("Ghost"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(EntityRef::Application(31))
    ));
}

#[test]
fn delete_application_cascades_to_its_tags() {
    let mut conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&mut conn, &["Doomed", "Survivor"]);
    let doomed_id = {
        let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
        customers.get_customer(customer_id).unwrap().applications[0].id
    };

    {
        let service = ApplicationService::new(SqliteApplicationRepository::new(&mut conn));
        service.delete_application(doomed_id).unwrap();
        assert!(matches!(
            service.delete_application(doomed_id),
            Err(ServiceError::NotFound(EntityRef::Application(_)))
        ));
    }

    for table in ["modalities", "foundational_models", "cloud_services"] {
        let orphans: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE application_id = ?1;"),
                [doomed_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0, "rows left in {table}");
    }

    let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let detail = customers.get_customer(customer_id).unwrap();
    assert_eq!(detail.applications.len(), 1);
    assert_eq!(detail.applications[0].name, "Survivor");
}

#[test]
fn add_note_uses_client_timestamp_or_store_clock() {
    let mut conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&mut conn, &[]);

    let mut service = NoteService::new(SqliteMeetingNoteRepository::new(&mut conn));
    let dated = service
        .add_note(
            customer_id,
            NoteDraft {
                text: Some("quarterly review".to_string()),
                created_at: Some(1_704_067_200_000),
            },
        )
        .unwrap();
    assert_eq!(dated.customer_id, customer_id);
    assert_eq!(dated.text, "quarterly review");
    assert_eq!(dated.created_at, 1_704_067_200_000);

    let undated = service
        .add_note(customer_id, NoteDraft::new("follow-up call"))
        .unwrap();
    assert!(undated.created_at > dated.created_at);

    let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let notes = customers.get_customer(customer_id).unwrap().meeting_notes;
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].text, "follow-up call");
}

#[test]
fn add_note_for_missing_customer_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(SqliteMeetingNoteRepository::new(&mut conn));

    let err = service.add_note(5, NoteDraft::new("lost")).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityRef::Customer(5))));
}

#[test]
fn delete_note_removes_only_that_note() {
    let mut conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&mut conn, &[]);

    let mut service = NoteService::new(SqliteMeetingNoteRepository::new(&mut conn));
    let first = service.add_note(customer_id, NoteDraft::new("keep")).unwrap();
    let second = service.add_note(customer_id, NoteDraft::new("drop")).unwrap();
    service.delete_note(second.id).unwrap();
    assert!(matches!(
        service.delete_note(second.id),
        Err(ServiceError::NotFound(EntityRef::Note(_)))
    ));

    let customers = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let notes = customers.get_customer(customer_id).unwrap().meeting_notes;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, first.id);
}
