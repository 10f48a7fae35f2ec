mod common;

use poem::Endpoint;
use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::json;

use common::{SUPER_ADMIN_EMAIL, TEST_PASSWORD};

/// Leaf operation ids from `/api/operations/all`, picked by `(heading, leaf)` display names
async fn operation_ids<E: Endpoint>(
    cli: &TestClient<E>,
    token: &str,
    wanted: &[(&str, &str)],
) -> Vec<String> {
    let resp = cli
        .get("/api/operations/all")
        .header("token", token)
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let mut ids = Vec::new();
    for group in json.value().array().iter() {
        let group = group.object();
        let heading = group.get("name").string();
        for leaf in group.get("operations").array().iter() {
            let leaf = leaf.object();
            if wanted.contains(&(heading, leaf.get("name").string())) {
                ids.push(leaf.get("id").string().to_string());
            }
        }
    }
    assert_eq!(ids.len(), wanted.len());
    ids
}

async fn create_role<E: Endpoint>(
    cli: &TestClient<E>,
    token: &str,
    name: &str,
    operations: Vec<String>,
) -> String {
    let resp = cli
        .post("/api/roles")
        .header("token", token)
        .body_json(&json!({ "name": name, "operations": operations }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json().await.value().object().get("id").string().to_string()
}

async fn create_admin_user<E: Endpoint>(
    cli: &TestClient<E>,
    token: &str,
    email: &str,
    role_id: &str,
) -> String {
    let resp = cli
        .post("/api/admin-users")
        .header("token", token)
        .body_json(&json!({
            "name": "Staff Member",
            "email": email,
            "password": TEST_PASSWORD,
            "role_id": role_id
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json().await.value().object().get("id").string().to_string()
}

async fn super_admin_role_id<E: Endpoint>(cli: &TestClient<E>) -> String {
    let resp = cli
        .post("/api/login")
        .body_json(&json!({ "email": SUPER_ADMIN_EMAIL, "password": TEST_PASSWORD }))
        .send()
        .await;
    resp.json()
        .await
        .value()
        .object()
        .get("role")
        .object()
        .get("id")
        .string()
        .to_string()
}

#[tokio::test]
async fn test_super_admin_sees_every_operation() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let token = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;

    let resp = cli.get("/api/operations").header("token", &token).send().await;

    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    assert_eq!(body.get("operations").array().len(), 9);
    body.get("menu").assert_string_array(&["Roles", "Admin Users"]);
}

#[tokio::test]
async fn test_limited_role_is_gated() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;

    let ids = operation_ids(&cli, &root, &[("Roles", "List")]).await;
    let role_id = create_role(&cli, &root, "Auditor", ids).await;
    create_admin_user(&cli, &root, "auditor@example.com", &role_id).await;
    let token = common::login(&cli, "auditor@example.com", TEST_PASSWORD).await;

    let resp = cli.get("/api/operations").header("token", &token).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("operations").assert_string_array(&["List Roles"]);
    body.get("menu").assert_string_array(&["Roles"]);

    let resp = cli.get("/api/roles").header("token", &token).send().await;
    resp.assert_status_is_ok();

    let resp = cli
        .post("/api/roles")
        .header("token", &token)
        .body_json(&json!({ "name": "Sneaky", "operations": [] }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("You don't have permission.");

    let resp = cli.get("/api/admin-users").header("token", &token).send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_names_are_unique_ignoring_case() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;
    create_role(&cli, &root, "Manager", Vec::new()).await;

    let resp = cli
        .post("/api/roles")
        .header("token", &root)
        .body_json(&json!({ "name": "MANAGER", "operations": [] }))
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Role already exist.");
}

#[tokio::test]
async fn test_role_with_unknown_operation_is_not_created() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;

    let resp = cli
        .post("/api/roles")
        .header("token", &root)
        .body_json(&json!({ "name": "Broken", "operations": ["no-such-operation"] }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let resp = cli
        .get("/api/roles")
        .header("token", &root)
        .query("search", &"Broken")
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("count").assert_i64(0);
}

#[tokio::test]
async fn test_super_admin_role_is_protected() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;
    let super_role = super_admin_role_id(&cli).await;

    let resp = cli
        .put(format!("/api/roles/{}", super_role))
        .header("token", &root)
        .body_json(&json!({ "name": "Renamed", "operations": [] }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    let resp = cli
        .delete(format!("/api/roles/{}", super_role))
        .header("token", &root)
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    let resp = cli
        .post("/api/admin-users")
        .header("token", &root)
        .body_json(&json!({
            "name": "Second Root",
            "email": "second@example.com",
            "password": TEST_PASSWORD,
            "role_id": super_role
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Super Admin role cannot be assigned.");

    let resp = cli.get("/api/roles/all").header("token", &root).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    assert_eq!(json.value().array().len(), 0);
}

#[tokio::test]
async fn test_admin_user_lifecycle() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;
    let role_id = create_role(&cli, &root, "Support", Vec::new()).await;
    let user_id = create_admin_user(&cli, &root, "support@example.com", &role_id).await;

    let resp = cli
        .post("/api/admin-users")
        .header("token", &root)
        .body_json(&json!({
            "name": "Duplicate",
            "email": "support@example.com",
            "password": TEST_PASSWORD,
            "role_id": role_id
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);

    let resp = cli
        .get("/api/admin-users")
        .header("token", &root)
        .query("search", &"support")
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
        .get("role")
        .object()
        .get("name")
        .assert_string("Support");

    let resp = cli
        .put(format!("/api/admin-users/{}", user_id))
        .header("token", &root)
        .body_json(&json!({
            "name": "Support Lead",
            "email": SUPER_ADMIN_EMAIL,
            "role_id": role_id
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);

    let resp = cli
        .put(format!("/api/admin-users/{}/reset-password", user_id))
        .header("token", &root)
        .body_json(&json!({ "new_password": "support-reset" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);
    common::login(&cli, "support@example.com", "support-reset").await;

    let resp = cli
        .delete(format!("/api/admin-users/{}", user_id))
        .header("token", &root)
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli
        .post("/api/login")
        .body_json(&json!({ "email": "support@example.com", "password": "support-reset" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_super_admin_account_cannot_be_deleted() {
    let (app_data, _) = common::setup_test_app().await;
    let cli = common::client(app_data);
    let root = common::login(&cli, SUPER_ADMIN_EMAIL, TEST_PASSWORD).await;

    let resp = cli.get("/api/admin-user").header("token", &root).send().await;
    let root_id = resp.json().await.value().object().get("id").string().to_string();

    let resp = cli
        .delete(format!("/api/admin-users/{}", root_id))
        .header("token", &root)
        .send()
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}
