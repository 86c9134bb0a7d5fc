mod common;

use anyhow::Result;
use salessync::dashboard::{ListScreen, PersonForm};
use salessync::gateway::RecordGateway;
use salessync::models::{Person, PersonDraft, PersonField};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{employee_json, envelope, TestBackend};

async fn mount_employees(backend: &TestBackend, employees: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/employee/get_all_employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(employees)))
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn list_accepts_bare_and_embedded_company_links() -> Result<()> {
    let backend = TestBackend::logged_in("tok").await?;
    mount_employees(
        &backend,
        json!([
            employee_json("e1", "Jane", "Doe", json!({ "_id": "c1", "name": "Acme" })),
            employee_json("e2", "John", "Roe", json!("c2")),
        ]),
    )
    .await;

    let people = RecordGateway::<Person>::list(&backend.gateway).await?;

    assert_eq!(people[0].organization_id(), "c1");
    assert_eq!(people[0].organization_name(), Some("Acme"));
    assert_eq!(people[1].organization_id(), "c2");
    assert_eq!(people[1].organization_name(), None);
    Ok(())
}

#[tokio::test]
async fn create_sends_json_with_company_id() -> Result<()> {
    let backend = TestBackend::logged_in("tok").await?;
    Mock::given(method("POST"))
        .and(path("/api/v1/employee/create"))
        .and(body_json(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "company_id": "c1",
            "email": "jane@acme.io"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(employee_json(
            "e7",
            "Jane",
            "Doe",
            json!("c1"),
        ))))
        .expect(1)
        .mount(&backend.server)
        .await;
    mount_employees(&backend, json!([employee_json("e7", "Jane", "Doe", json!("c1"))])).await;

    let mut screen = ListScreen::default();
    let form = PersonForm::create(PersonDraft::new("Jane", "Doe", "c1").with_email("jane@acme.io"));
    let created = form.submit(&backend.gateway, &mut screen).await?;

    assert_eq!(created.id, "e7");
    assert_eq!(screen.records().len(), 1);
    assert_eq!(screen.notice().map(|n| n.message.as_str()), Some("Person created"));
    Ok(())
}

#[tokio::test]
async fn update_targets_record_by_id() -> Result<()> {
    let backend = TestBackend::logged_in("tok").await?;
    Mock::given(method("PUT"))
        .and(path("/api/v1/employee/update_by_id/e1"))
        .and(body_json(json!({ "phone": "555-0199" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(employee_json(
            "e1",
            "Jane",
            "Doe",
            json!("c1"),
        ))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let draft = PersonDraft {
        phone: Some("555-0199".into()),
        ..PersonDraft::default()
    };
    RecordGateway::<Person>::update(&backend.gateway, "e1", &draft).await?;
    Ok(())
}

#[tokio::test]
async fn screen_sorts_people_by_organization_name() -> Result<()> {
    let backend = TestBackend::logged_in("tok").await?;
    mount_employees(
        &backend,
        json!([
            employee_json("e1", "Ann", "Zed", json!({ "_id": "c1", "name": "Zenith" })),
            employee_json("e2", "Bob", "Yu", json!({ "_id": "c2", "name": "Acme" })),
            employee_json("e3", "Cy", "Xi", json!("c3")),
        ]),
    )
    .await;

    let mut screen: ListScreen<Person> = ListScreen::default();
    screen.refresh(&backend.gateway).await?;
    screen.sort_by(PersonField::Organization);

    let ids: Vec<&str> = screen.visible().rows.iter().map(|p| p.id.as_str()).collect();
    // No populated organization sorts last
    assert_eq!(ids, vec!["e2", "e1", "e3"]);

    screen.sort_by(PersonField::Organization);
    let ids: Vec<&str> = screen.visible().rows.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
    Ok(())
}
