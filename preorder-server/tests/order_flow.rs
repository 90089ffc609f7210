//! End-to-end order flow over the HTTP router.
//!
//! Exercises the public intake and status lookup, the staff gate, and a
//! staff lifecycle update, all against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use preorder_server::api::build_router;
use preorder_server::{Config, ServerState};

async fn test_app() -> Router {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("open in-memory db");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    sqlx::query("INSERT INTO products (id, name, created_at) VALUES (1, 'Classic Tee', 0)")
        .execute(&pool)
        .await
        .expect("seed product");
    sqlx::query(
        "INSERT INTO product_variants (id, product_id, name, created_at) VALUES (11, 1, 'Size M', 0)",
    )
    .execute(&pool)
    .await
    .expect("seed variant");

    let config = Config::with_overrides("/tmp", 0);
    build_router(ServerState::new(config, pool))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn staff(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request
        .header("x-caller-role", "admin")
        .header("x-caller-name", "Mila")
}

#[tokio::test]
async fn full_order_lifecycle() {
    let app = test_app().await;

    // Customer places an order (no auth headers)
    let payload = json!({
        "customer_name": "Rina",
        "customer_whatsapp": "+34600111222",
        "notes": "gift wrap",
        "items": [
            { "product_id": 1, "variant_id": 11, "quantity": 2, "unit_price": 10.0 },
            { "product_id": 1, "quantity": 1, "unit_price": 6.0 }
        ]
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/orders")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    let order_id = created["id"].as_i64().unwrap();
    let code = created["code"].as_str().unwrap().to_string();
    assert!(code.starts_with("ORD-"));
    assert_eq!(created["status"], "pending");
    assert_eq!(created["items"].as_array().unwrap().len(), 2);

    // Customer checks status by code (public, minimal projection)
    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/orders/public/by-code/{code}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let public = json_body(response).await;
    assert_eq!(public["status"], "pending");
    assert!(public.get("customer_whatsapp").is_none());
    assert!(public.get("items").is_none());

    // Listing without a gateway role header is rejected
    let response = app
        .clone()
        .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // An unrecognized role is also rejected
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/orders")
                .header("x-caller-role", "customer")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Staff listing includes the derived total
    let response = app
        .clone()
        .oneshot(staff(Request::get("/api/orders")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["total"], 26.0);

    // Staff confirms the order
    let response = app
        .clone()
        .oneshot(
            staff(Request::patch(format!("/api/orders/{order_id}")))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "status": "confirmed" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["status"], "confirmed");
    assert_eq!(updated["notes"], "gift wrap");

    // The public view reflects the new status
    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/orders/public/by-code/{code}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let public = json_body(response).await;
    assert_eq!(public["status"], "confirmed");

    // Staff pulls the summary CSV
    let response = app
        .clone()
        .oneshot(
            staff(Request::get("/api/reports/export?type=summary"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("summary_report.csv")
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(csv, "total_orders,total_revenue,items_sold\n1,26,3\n");

    // Staff pulls the per-variant CSV
    let response = app
        .clone()
        .oneshot(
            staff(Request::get("/api/reports/export?type=by-variant"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("by_variant_report.csv")
    );

    // Staff deletes the order; the public code stops resolving
    let response = app
        .clone()
        .oneshot(
            staff(Request::delete(format!("/api/orders/{order_id}")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again is still 204: the operation is idempotent
    let response = app
        .clone()
        .oneshot(
            staff(Request::delete(format!("/api/orders/{order_id}")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::get(format!("/api/orders/public/by-code/{code}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_failures_do_not_persist() {
    let app = test_app().await;

    // Unknown product
    let payload = json!({
        "customer_name": "Rina",
        "customer_whatsapp": "+34600111222",
        "items": [{ "product_id": 999, "quantity": 1, "unit_price": 5.0 }]
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/orders")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty item list
    let payload = json!({
        "customer_name": "Rina",
        "customer_whatsapp": "+34600111222",
        "items": []
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/orders")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(staff(Request::get("/api/orders")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_export_type_is_rejected() {
    let app = test_app().await;
    let response = app
        .oneshot(
            staff(Request::get("/api/reports/export?type=weekly"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
