mod common;

use poem::Endpoint;
use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::{Value, json};

use common::{SUPER_ADMIN_EMAIL, TEST_PASSWORD};

struct Session<'a, E: Endpoint> {
    cli: &'a TestClient<E>,
    token: String,
    admin_user_id: String,
}

impl<'a, E: Endpoint> Session<'a, E> {
    async fn start(cli: &'a TestClient<E>) -> Self {
        let token = common::login(cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;
        let resp = cli.get("/api/admin-user").header("token", &token).send().await;
        let admin_user_id = resp.json().await.value().object().get("id").string().to_string();
        Self {
            cli,
            token,
            admin_user_id,
        }
    }

    /// POST a body and return the new id, asserting 201
    async fn create(&self, path: &str, body: Value) -> String {
        let resp = self
            .cli
            .post(path)
            .header("token", &self.token)
            .body_json(&body)
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        resp.json().await.value().object().get("id").string().to_string()
    }

    async fn create_project(&self, name: &str) -> String {
        self.create("/api/projects", self.project_body(name)).await
    }

    fn project_body(&self, name: &str) -> Value {
        json!({
            "name": name,
            "description": "Quarterly work",
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
            "manager_id": self.admin_user_id
        })
    }
}

#[tokio::test]
async fn test_project_crud_and_status() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    let project_id = session.create_project("Apollo").await;

    let resp = cli
        .get(format!("/api/projects/{}", project_id))
        .header("token", &session.token)
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("status").assert_string("PLANNING");
    body.get("manager").object().get("name").assert_string("Super Admin");

    let resp = cli
        .put(format!("/api/projects/{}/status", project_id))
        .header("token", &session.token)
        .body_json(&json!({ "status": "INPROGRESS" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli
        .delete(format!("/api/projects/{}", project_id))
        .header("token", &session.token)
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli
        .get(format!("/api/projects/{}", project_id))
        .header("token", &session.token)
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Project not found.");
}

#[tokio::test]
async fn test_duplicate_project_name_conflicts() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    session.create_project("Apollo").await;

    let resp = cli
        .post("/api/projects")
        .header("token", &session.token)
        .body_json(&session.project_body("Apollo"))
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Project already exists.");
}

#[tokio::test]
async fn test_project_listing_paginates_and_searches() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    for i in 0..12 {
        session.create_project(&format!("Project {:02}", i)).await;
    }
    session.create_project("Launch Day").await;

    let resp = cli
        .get("/api/projects")
        .header("token", &session.token)
        .query("start", &10)
        .query("limit", &10)
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("count").assert_i64(13);
    assert_eq!(body.get("list").array().len(), 3);

    let resp = cli
        .get("/api/projects")
        .header("token", &session.token)
        .query("search", &"LAUNCH")
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("count").assert_i64(1);
    body.get("list")
        .array()
        .get(0)
        .object()
        .get("name")
        .assert_string("Launch Day");

    let resp = cli
        .get("/api/projects")
        .header("token", &session.token)
        .query("start", &"not-a-number")
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_project_listing_with_out_of_range_bounds() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    session.create_project("Only Project").await;

    let resp = cli
        .get("/api/projects")
        .header("token", &session.token)
        .query("limit", &u64::MAX)
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("count").assert_i64(1);
    assert_eq!(body.get("list").array().len(), 1);

    let resp = cli
        .get("/api/projects")
        .header("token", &session.token)
        .query("start", &u64::MAX)
        .query("limit", &u64::MAX)
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("count").assert_i64(1);
    assert!(body.get("list").array().is_empty());
}

#[tokio::test]
async fn test_project_members() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    let project_id = session.create_project("Apollo").await;
    let path = format!("/api/projects/{}/users", project_id);

    for _ in 0..2 {
        let resp = cli
            .post(&path)
            .header("token", &session.token)
            .body_json(&json!({ "admin_user_ids": [session.admin_user_id] }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
    }

    let resp = cli.get(&path).header("token", &session.token).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    assert_eq!(json.value().object().get("admin_users").array().len(), 1);

    let resp = cli
        .post(&path)
        .header("token", &session.token)
        .body_json(&json!({ "admin_user_ids": ["00000000-0000-0000-0000-000000000000"] }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let resp = cli
        .delete(&path)
        .header("token", &session.token)
        .body_json(&json!({ "admin_user_ids": [session.admin_user_id] }))
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli.get(&path).header("token", &session.token).send().await;
    let json = resp.json().await;
    assert_eq!(json.value().object().get("admin_users").array().len(), 0);
}

#[tokio::test]
async fn test_work_breakdown_from_module_to_issue() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let session = Session::start(&cli).await;
    let project_id = session.create_project("Apollo").await;

    let module_type_id = session
        .create("/api/module-types", json!({ "name": "Backend" }))
        .await;
    let resp = cli
        .post("/api/module-types")
        .header("token", &session.token)
        .body_json(&json!({ "name": "Backend" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);

    let resp = cli
        .post("/api/modules")
        .header("token", &session.token)
        .body_json(&json!({
            "name": "Billing",
            "description": "Invoices",
            "project_id": "00000000-0000-0000-0000-000000000000",
            "module_type_id": module_type_id
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let module_id = session
        .create(
            "/api/modules",
            json!({
                "name": "Billing",
                "description": "Invoices",
                "project_id": project_id,
                "module_type_id": module_type_id
            }),
        )
        .await;

    let resp = cli
        .get(format!("/api/modules/{}", module_id))
        .header("token", &session.token)
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("project").object().get("name").assert_string("Apollo");
    body.get("module_type").object().get("name").assert_string("Backend");

    let task_id = session
        .create(
            "/api/tasks",
            json!({ "name": "Send invoices", "module_id": module_id }),
        )
        .await;
    let resp = cli
        .put(format!("/api/tasks/{}/status", task_id))
        .header("token", &session.token)
        .body_json(&json!({ "status": "COMPLETED" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let issue_id = session
        .create(
            "/api/issues",
            json!({ "name": "Wrong totals", "task_id": task_id }),
        )
        .await;
    let resp = cli
        .get(format!("/api/issues/{}", issue_id))
        .header("token", &session.token)
        .send()
        .await;
    let json = resp.json().await;
    let body = json.value().object();
    body.get("status").assert_string("OPEN");
    body.get("priority").assert_string("MEDIUM");
    body.get("task").object().get("name").assert_string("Send invoices");

    let close = format!("/api/issues/{}/close", issue_id);
    let resp = cli.patch(&close).header("token", &session.token).send().await;
    resp.assert_status_is_ok();
    let resp = cli.patch(&close).header("token", &session.token).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Issue is already closed.");
}
