use cats_core::db::open_db_in_memory;
use cats_core::{
    ApplicationDraft, CustomerDraft, CustomerService, EntityRef, NoteDraft, ServiceError,
    SqliteCustomerRepository,
};
use rusqlite::Connection;
use std::collections::BTreeSet;

fn bot_application() -> ApplicationDraft {
    ApplicationDraft {
        name: Some("Bot".to_string()),
        modalities: vec!["Text".to_string()],
        models: vec!["GPT-4".to_string()],
        cloud_services: vec!["AWS Bedrock".to_string()],
    }
}

fn acme_draft() -> CustomerDraft {
    CustomerDraft {
        applications: vec![bot_application()],
        compute_vendors: vec!["NVIDIA".to_string()],
        meeting_notes: vec![NoteDraft {
            text: Some("kickoff".to_string()),
            // 2024-01-01T00:00:00Z
            created_at: Some(1_704_067_200_000),
        }],
        ..CustomerDraft::new("Acme", "Technology")
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn as_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_customer_with_nested_records_round_trips_through_detail() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));

    let id = service.create_customer(acme_draft()).unwrap();
    let detail = service.get_customer(id).unwrap();

    assert_eq!(detail.customer.id, id);
    assert_eq!(detail.customer.name, "Acme");
    assert_eq!(detail.customer.industry.as_deref(), Some("Technology"));
    assert_eq!(detail.applications.len(), 1);
    let bot = &detail.applications[0];
    assert_eq!(bot.name, "Bot");
    assert_eq!(bot.customer_id, id);
    assert_eq!(bot.modalities, strings(&["Text"]));
    assert_eq!(bot.models, strings(&["GPT-4"]));
    assert_eq!(bot.cloud_services, strings(&["AWS Bedrock"]));
    assert_eq!(detail.compute_vendors, strings(&["NVIDIA"]));
    assert_eq!(detail.meeting_notes.len(), 1);
    assert_eq!(detail.meeting_notes[0].text, "kickoff");
    assert_eq!(detail.meeting_notes[0].created_at, 1_704_067_200_000);
}

#[test]
fn applications_keep_insertion_order_and_their_tags() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));

    let names = ["Zeta", "Alpha", "Mid"];
    let draft = CustomerDraft {
        applications: names
            .iter()
            .enumerate()
            .map(|(idx, name)| ApplicationDraft {
                name: Some(name.to_string()),
                modalities: strings(&["Text", "Image"]),
                models: vec![format!("model-{idx}"), "Mistral".to_string()],
                cloud_services: strings(&["Azure ML"]),
            })
            .collect(),
        ..CustomerDraft::new("Ordered", "Retail")
    };

    let id = service.create_customer(draft).unwrap();
    let detail = service.get_customer(id).unwrap();

    let loaded: Vec<&str> = detail
        .applications
        .iter()
        .map(|application| application.name.as_str())
        .collect();
    assert_eq!(loaded, names);
    for (idx, application) in detail.applications.iter().enumerate() {
        assert_eq!(
            as_set(&application.modalities),
            as_set(&strings(&["Image", "Text"]))
        );
        assert_eq!(
            as_set(&application.models),
            as_set(&[format!("model-{idx}"), "Mistral".to_string()])
        );
        assert_eq!(application.cloud_services, strings(&["Azure ML"]));
    }
}

#[test]
fn create_customer_normalizes_tag_lists() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));

    let draft = CustomerDraft {
        applications: vec![ApplicationDraft {
            name: Some("Search".to_string()),
            modalities: strings(&["Text", " Text ", ""]),
            models: strings(&["Llama   3"]),
            cloud_services: Vec::new(),
        }],
        compute_vendors: strings(&["NVIDIA", "NVIDIA", "  Dell"]),
        ..CustomerDraft::new("Normalized", "Energy")
    };

    let id = service.create_customer(draft).unwrap();
    let detail = service.get_customer(id).unwrap();

    assert_eq!(detail.applications[0].modalities, strings(&["Text"]));
    assert_eq!(detail.applications[0].models, strings(&["Llama 3"]));
    assert!(detail.applications[0].cloud_services.is_empty());
    assert_eq!(detail.compute_vendors, strings(&["NVIDIA", "Dell"]));
}

#[test]
fn update_customer_replaces_applications_and_vendors_but_keeps_notes() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let id = service.create_customer(acme_draft()).unwrap();

    let replacement = CustomerDraft {
        applications: vec![ApplicationDraft {
            name: Some("Copilot".to_string()),
            modalities: strings(&["Code"]),
            models: strings(&["Claude 3.5"]),
            cloud_services: strings(&["Google Vertex AI"]),
        }],
        compute_vendors: strings(&["Supermicro"]),
        meeting_notes: vec![NoteDraft::new("ignored by update")],
        ..CustomerDraft::new("Acme Corp", "Financial Services")
    };
    service.update_customer(id, replacement).unwrap();

    let detail = service.get_customer(id).unwrap();
    assert_eq!(detail.customer.name, "Acme Corp");
    assert_eq!(detail.customer.industry.as_deref(), Some("Financial Services"));
    assert_eq!(detail.applications.len(), 1);
    assert_eq!(detail.applications[0].name, "Copilot");
    assert!(detail
        .applications
        .iter()
        .all(|application| application.name != "Bot"));
    assert_eq!(detail.compute_vendors, strings(&["Supermicro"]));
    assert_eq!(detail.meeting_notes.len(), 1);
    assert_eq!(detail.meeting_notes[0].text, "kickoff");

    drop(service);
    // Tags of the replaced application must not linger.
    assert_eq!(count_rows(&conn, "modalities"), 1);
    assert_eq!(count_rows(&conn, "foundational_models"), 1);
    assert_eq!(count_rows(&conn, "cloud_services"), 1);
}

#[test]
fn update_missing_customer_returns_not_found_and_writes_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
        let err = service.update_customer(404, acme_draft()).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound(EntityRef::Customer(404))
        ));
    }

    assert_eq!(count_rows(&conn, "applications"), 0);
    assert_eq!(count_rows(&conn, "compute_vendors"), 0);
}

#[test]
fn delete_customer_cascades_to_every_dependent_table() {
    let mut conn = open_db_in_memory().unwrap();
    let (deleted_id, kept_id) = {
        let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
        let deleted_id = service.create_customer(acme_draft()).unwrap();
        let kept_id = service
            .create_customer(CustomerDraft {
                applications: vec![ApplicationDraft::named("Kept")],
                compute_vendors: strings(&["HPE"]),
                ..CustomerDraft::new("Globex", "Energy")
            })
            .unwrap();
        service.delete_customer(deleted_id).unwrap();
        (deleted_id, kept_id)
    };

    for table in ["applications", "compute_vendors", "meeting_notes"] {
        let orphans: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE customer_id = ?1;"),
                [deleted_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0, "rows left in {table}");
    }
    for table in ["modalities", "foundational_models", "cloud_services"] {
        assert_eq!(count_rows(&conn, table), 0, "rows left in {table}");
    }

    let service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    assert!(matches!(
        service.get_customer(deleted_id),
        Err(ServiceError::NotFound(EntityRef::Customer(_)))
    ));
    let kept = service.get_customer(kept_id).unwrap();
    assert_eq!(kept.applications.len(), 1);
    assert_eq!(kept.compute_vendors, strings(&["HPE"]));
}

#[test]
fn delete_missing_customer_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let err = service.delete_customer(77).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityRef::Customer(77))));
}

#[test]
fn failed_create_rolls_back_every_nested_insert() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
        let draft = CustomerDraft {
            applications: vec![
                bot_application(),
                ApplicationDraft {
                    name: None,
                    ..ApplicationDraft::default()
                },
            ],
            compute_vendors: strings(&["NVIDIA"]),
            ..CustomerDraft::new("Half Written", "Retail")
        };

        let err = service.create_customer(draft).unwrap_err();
        assert!(matches!(err, ServiceError::Repo(_)));
    }

    for table in [
        "customers",
        "applications",
        "modalities",
        "foundational_models",
        "cloud_services",
        "compute_vendors",
        "meeting_notes",
    ] {
        assert_eq!(count_rows(&conn, table), 0, "rows left in {table}");
    }
}

#[test]
fn failed_update_keeps_previous_state() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let id = service.create_customer(acme_draft()).unwrap();

    let broken = CustomerDraft {
        applications: vec![ApplicationDraft::default()],
        ..CustomerDraft::new("Renamed", "Retail")
    };
    assert!(matches!(
        service.update_customer(id, broken),
        Err(ServiceError::Repo(_))
    ));

    let detail = service.get_customer(id).unwrap();
    assert_eq!(detail.customer.name, "Acme");
    assert_eq!(detail.applications[0].name, "Bot");
    assert_eq!(detail.compute_vendors, strings(&["NVIDIA"]));
}

#[test]
fn list_customers_orders_by_name_ignoring_case() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    for name in ["beta labs", "Acme", "Charlie", "alpha"] {
        service
            .create_customer(CustomerDraft::new(name, "Other"))
            .unwrap();
    }

    let names: Vec<String> = service
        .list_customers()
        .unwrap()
        .into_iter()
        .map(|customer| customer.name)
        .collect();
    assert_eq!(names, strings(&["Acme", "alpha", "beta labs", "Charlie"]));
}

#[test]
fn meeting_notes_are_returned_newest_first() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = CustomerService::new(SqliteCustomerRepository::new(&mut conn));
    let draft = CustomerDraft {
        meeting_notes: vec![
            NoteDraft {
                text: Some("first".to_string()),
                created_at: Some(1_000),
            },
            NoteDraft {
                text: Some("third".to_string()),
                created_at: Some(3_000),
            },
            NoteDraft {
                text: Some("second".to_string()),
                created_at: Some(2_000),
            },
        ],
        ..CustomerDraft::new("Notes", "Healthcare")
    };

    let id = service.create_customer(draft).unwrap();
    let texts: Vec<String> = service
        .get_customer(id)
        .unwrap()
        .meeting_notes
        .into_iter()
        .map(|note| note.text)
        .collect();
    assert_eq!(texts, strings(&["third", "second", "first"]));
}
