//! HTTP-level tests over the real router and an in-memory database.

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use bill_api::{router, ApiConfig, AppState};
use bill_db::{Database, DbConfig};
use serde_json::{json, Value};

struct TestApp {
    server: TestServer,
    token: String,
}

async fn spawn_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db, ApiConfig::default());
    let token = state.jwt.generate_access_token("test-user").unwrap();

    TestApp {
        server: TestServer::try_new(router(state)).unwrap(),
        token,
    }
}

impl TestApp {
    async fn create(&self, path: &str, body: Value) -> Value {
        let response = self
            .server
            .post(path)
            .authorization_bearer(&self.token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    async fn company(&self, name: &str) -> String {
        let body = self.create("/companies", json!({ "companyName": name })).await;
        body["companyId"].as_str().unwrap().to_string()
    }

    async fn client(&self, name: &str) -> String {
        let body = self.create("/clients", json!({ "clientName": name })).await;
        body["clientId"].as_str().unwrap().to_string()
    }

    async fn item(&self, name: &str, price_cents: i64) -> String {
        let body = self
            .create(
                "/items",
                json!({ "itemName": name, "unitPriceCents": price_cents }),
            )
            .await;
        body["itemId"].as_str().unwrap().to_string()
    }

    async fn invoice_count(&self) -> usize {
        let body: Value = self.server.get("/invoices").await.json();
        body.as_array().unwrap().len()
    }
}

fn invoice_body(client_id: &str, lines: Value) -> Value {
    json!({
        "billNumber": 1,
        "date": "2024-03-01",
        "clientId": client_id,
        "percentageDiscount": 10,
        "paidUpCents": 4000,
        "invoiceItems": lines
    })
}

// =============================================================================
// Health & Auth
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_writes_require_bearer_token() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/companies")
        .json(&json!({ "companyName": "Acme" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/invoices/00000000-0000-0000-0000-000000000000")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listings_are_public() {
    let app = spawn_app().await;

    for path in ["/invoices", "/types", "/companies", "/clients", "/items"] {
        let response = app.server.get(path).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_create_invoice_computes_totals() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;
    let pad = app.item("Pad", 1500).await;

    let mut body = invoice_body(
        &client_id,
        json!([
            { "itemId": pen, "sellingPriceCents": 1000, "quantity": 2 },
            { "itemId": pad, "sellingPriceCents": 1500, "quantity": 1 }
        ]),
    );
    // A caller-supplied total is ignored.
    body["billTotal"] = json!(999_999);

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&body)
        .await;

    response.assert_status_ok();
    let totals: Value = response.json();
    assert_eq!(totals["billTotalCents"], 3500);
    assert_eq!(totals["netTotalCents"], 3150);
    assert_eq!(totals["theRestCents"], 850);

    let id = totals["invoiceId"].as_str().unwrap();
    let invoice: Value = app
        .server
        .get(&format!("/invoices/{}", id))
        .authorization_bearer(&app.token)
        .await
        .json();

    assert_eq!(invoice["client"]["name"], "Walk-in");
    assert_eq!(invoice["date"], "2024-03-01");
    let lines = invoice["invoiceItems"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["name"], "Pen");
    assert_eq!(lines[0]["totalValueCents"], 2000);
    assert_eq!(lines[1]["totalValueCents"], 1500);
    assert_eq!(invoice["billTotalCents"], 3500);
}

#[tokio::test]
async fn test_invoice_line_keeps_catalog_name_after_rename() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let totals: Value = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 900, "quantity": 1 }]),
        ))
        .await
        .json();

    app.server
        .put(&format!("/items/{}", pen))
        .authorization_bearer(&app.token)
        .json(&json!({ "itemName": "Fountain Pen", "unitPriceCents": 2500 }))
        .await
        .assert_status_ok();

    let invoice: Value = app
        .server
        .get(&format!("/invoices/{}", totals["invoiceId"].as_str().unwrap()))
        .authorization_bearer(&app.token)
        .await
        .json();

    assert_eq!(invoice["invoiceItems"][0]["name"], "Pen");
    assert_eq!(invoice["invoiceItems"][0]["sellingPriceCents"], 900);
}

#[tokio::test]
async fn test_create_invoice_zero_quantity_persists_nothing() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([
                { "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 },
                { "itemId": pen, "sellingPriceCents": 1000, "quantity": 0 }
            ]),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_create_invoice_unknown_client_persists_nothing() {
    let app = spawn_app().await;
    let pen = app.item("Pen", 1000).await;

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            "00000000-0000-0000-0000-000000000000",
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 }]),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("Invalid Client ID"));
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_create_invoice_unknown_item_rejected() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": "missing", "sellingPriceCents": 100, "quantity": 1 }]),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_create_invoice_line_sum_overflow_rejected() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1).await;

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([
                { "itemId": pen, "sellingPriceCents": 1, "quantity": i64::MAX },
                { "itemId": pen, "sellingPriceCents": 1, "quantity": i64::MAX }
            ]),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("invoiceItems"));
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_create_invoice_paid_up_overflow_rejected() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let mut body = invoice_body(
        &client_id,
        json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 }]),
    );
    body["percentageDiscount"] = json!(0);
    body["paidUpCents"] = json!(i64::MIN);

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("paidUpCents"));
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_update_invoice_overflow_keeps_previous_state() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let created: Value = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 2 }]),
        ))
        .await
        .json();
    let path = format!("/invoices/{}", created["invoiceId"].as_str().unwrap());

    let mut update = invoice_body(
        &client_id,
        json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 }]),
    );
    update["paidUpCents"] = json!(i64::MIN);

    app.server
        .put(&path)
        .authorization_bearer(&app.token)
        .json(&update)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let invoice: Value = app.server.get(&path).authorization_bearer(&app.token).await.json();
    assert_eq!(invoice["invoiceItems"][0]["quantity"], 2);
    assert_eq!(invoice["paidUpCents"], 4000);
    assert_eq!(invoice["theRestCents"], 2200);
}

#[tokio::test]
async fn test_create_invoice_missing_date_rejected() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;

    let mut body = invoice_body(&client_id, json!([]));
    body.as_object_mut().unwrap().remove("date");

    let response = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "date is required");
}

#[tokio::test]
async fn test_update_invoice_replaces_lines() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;
    let pad = app.item("Pad", 1500).await;

    let created: Value = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([
                { "itemId": pen, "sellingPriceCents": 1000, "quantity": 2 },
                { "itemId": pad, "sellingPriceCents": 1500, "quantity": 1 }
            ]),
        ))
        .await
        .json();
    let id = created["invoiceId"].as_str().unwrap().to_string();

    let mut update = invoice_body(
        &client_id,
        json!([{ "itemId": pad, "sellingPriceCents": 2000, "quantity": 3 }]),
    );
    update["percentageDiscount"] = json!(0);
    update["paidUpCents"] = json!(6000);

    let response = app
        .server
        .put(&format!("/invoices/{}", id))
        .authorization_bearer(&app.token)
        .json(&update)
        .await;

    response.assert_status_ok();
    let totals: Value = response.json();
    assert_eq!(totals["billTotalCents"], 6000);
    assert_eq!(totals["netTotalCents"], 6000);
    assert_eq!(totals["theRestCents"], 0);

    let invoice: Value = app
        .server
        .get(&format!("/invoices/{}", id))
        .authorization_bearer(&app.token)
        .await
        .json();
    let lines = invoice["invoiceItems"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["name"], "Pad");
    assert_eq!(lines[0]["quantity"], 3);
}

#[tokio::test]
async fn test_update_invoice_failure_keeps_previous_lines() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let created: Value = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 2 }]),
        ))
        .await
        .json();
    let id = created["invoiceId"].as_str().unwrap().to_string();

    app.server
        .put(&format!("/invoices/{}", id))
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": -1 }]),
        ))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let invoice: Value = app
        .server
        .get(&format!("/invoices/{}", id))
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(invoice["invoiceItems"][0]["quantity"], 2);
    assert_eq!(invoice["billTotalCents"], 2000);
}

#[tokio::test]
async fn test_delete_invoice_then_not_found() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    let created: Value = app
        .server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 }]),
        ))
        .await
        .json();
    let path = format!("/invoices/{}", created["invoiceId"].as_str().unwrap());

    app.server
        .delete(&path)
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app.server.get(&path).authorization_bearer(&app.token).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");

    app.server
        .delete(&path)
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_invoice_id_is_bad_request() {
    let app = spawn_app().await;

    app.server
        .get("/invoices/not-a-uuid")
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invoices_listed_newest_first() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;

    for (bill_number, date) in [(1, "2024-01-05"), (2, "2024-02-10")] {
        let mut body = invoice_body(&client_id, json!([]));
        body["billNumber"] = json!(bill_number);
        body["date"] = json!(date);
        app.server
            .post("/invoices")
            .authorization_bearer(&app.token)
            .json(&body)
            .await
            .assert_status_ok();
    }

    let invoices: Value = app.server.get("/invoices").await.json();
    let numbers: Vec<i64> = invoices
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["billNumber"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![2, 1]);
}

// =============================================================================
// Types
// =============================================================================

#[tokio::test]
async fn test_create_type_returns_location() {
    let app = spawn_app().await;
    app.company("Acme").await;

    let response = app
        .server
        .post("/types")
        .authorization_bearer(&app.token)
        .json(&json!({ "typeName": "Hardware", "typeNotes": "bolts", "companyName": "Acme" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let location = response.header(header::LOCATION);
    assert_eq!(
        location.to_str().unwrap(),
        format!("/types/{}", body["typeId"].as_str().unwrap())
    );
    assert_eq!(body["companyName"], "Acme");
    assert_eq!(body["typeNotes"], "bolts");
}

#[tokio::test]
async fn test_create_type_unknown_company() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/types")
        .authorization_bearer(&app.token)
        .json(&json!({ "typeName": "Hardware", "companyName": "Nobody" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("Company Not Found"));
}

#[tokio::test]
async fn test_duplicate_type_name_scoped_to_company() {
    let app = spawn_app().await;
    app.company("Acme").await;
    app.company("Globex").await;

    let hardware = |company: &str| json!({ "typeName": "Hardware", "companyName": company });

    app.create("/types", hardware("Acme")).await;

    let duplicate = app
        .server
        .post("/types")
        .authorization_bearer(&app.token)
        .json(&hardware("Acme"))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);

    // Same name under another company is fine.
    app.create("/types", hardware("Globex")).await;

    let types: Value = app.server.get("/types").await.json();
    assert_eq!(types.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_type_duplicate_rejected() {
    let app = spawn_app().await;
    app.company("Acme").await;

    app.create("/types", json!({ "typeName": "Hardware", "companyName": "Acme" }))
        .await;
    let software = app
        .create("/types", json!({ "typeName": "Software", "companyName": "Acme" }))
        .await;
    let path = format!("/types/{}", software["typeId"].as_str().unwrap());

    app.server
        .put(&path)
        .authorization_bearer(&app.token)
        .json(&json!({ "typeName": "Hardware", "companyName": "Acme" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Renaming to its own name is not a duplicate.
    let response = app
        .server
        .put(&path)
        .authorization_bearer(&app.token)
        .json(&json!({ "typeName": "Software", "typeNotes": "apps", "companyName": "Acme" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["typeNotes"], "apps");
}

#[tokio::test]
async fn test_types_by_company_name_ignores_case() {
    let app = spawn_app().await;
    app.company("Acme").await;
    app.company("Globex").await;
    app.create("/types", json!({ "typeName": "Hardware", "companyName": "Acme" }))
        .await;
    app.create("/types", json!({ "typeName": "Tools", "companyName": "Globex" }))
        .await;

    let response = app
        .server
        .get("/types/GetTypesByCompanyName")
        .add_query_param("companyName", "aCmE")
        .await;

    response.assert_status_ok();
    let types: Value = response.json();
    let types = types.as_array().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["typeName"], "Hardware");

    app.server
        .get("/types/GetTypesByCompanyName")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_company_types_drop_out_of_listings() {
    let app = spawn_app().await;
    let acme = app.company("Acme").await;
    app.company("Globex").await;
    let hardware = app
        .create("/types", json!({ "typeName": "Hardware", "companyName": "Acme" }))
        .await;
    app.create("/types", json!({ "typeName": "Tools", "companyName": "Globex" }))
        .await;

    app.server
        .delete(&format!("/companies/{}", acme))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let types: Value = app.server.get("/types").await.json();
    let names: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["typeName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tools"]);

    app.server
        .get(&format!("/types/{}", hardware["typeId"].as_str().unwrap()))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_type_unknown_is_not_found() {
    let app = spawn_app().await;

    app.server
        .delete("/types/00000000-0000-0000-0000-000000000000")
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_company_name_must_be_unique() {
    let app = spawn_app().await;
    app.company("Acme").await;

    app.server
        .post("/companies")
        .authorization_bearer(&app.token)
        .json(&json!({ "companyName": "Acme" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_with_unknown_type_rejected() {
    let app = spawn_app().await;

    app.server
        .post("/items")
        .authorization_bearer(&app.token)
        .json(&json!({
            "itemName": "Pen",
            "unitPriceCents": 100,
            "typeId": "00000000-0000-0000-0000-000000000000"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invoiced_client_and_item_cannot_be_deleted() {
    let app = spawn_app().await;
    let client_id = app.client("Walk-in").await;
    let pen = app.item("Pen", 1000).await;

    app.server
        .post("/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(
            &client_id,
            json!([{ "itemId": pen, "sellingPriceCents": 1000, "quantity": 1 }]),
        ))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/items/{}", pen))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .delete(&format!("/clients/{}", client_id))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let clients: Value = app.server.get("/clients").await.json();
    assert_eq!(clients.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_crud() {
    let app = spawn_app().await;
    let id = app.client("Walk-in").await;
    let path = format!("/clients/{}", id);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&app.token)
        .json(&json!({ "clientName": "Regular" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["clientName"], "Regular");

    app.server
        .delete(&path)
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&path)
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
