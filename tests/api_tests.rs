/// End-to-end tests for the HTTP API over the built-in price table
use aws_cost_calculator::{
    config::Config,
    pricing::StaticPricing,
    server::{create_router, AppState},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Some(Arc::new(StaticPricing::builtin())));
    create_router(state, &Config::default(), None)
}

fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a session and return its `name=value` cookie pair
async fn new_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/cart/items", None))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie issued")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn add_item(app: &Router, cookie: &str, item: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/cart/add", Some(cookie), item))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_ec2_monthly_cost() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/pricing/ec2",
            None,
            json!({
                "instanceType": "t2.micro",
                "region": "US East (N. Virginia)",
                "operatingSystem": "Linux"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);

    let entry = &body["data"][0];
    assert_eq!(entry["service"], "EC2");
    assert_eq!(entry["unitPrice"], 0.0116);
    assert!((entry["monthlyCost"].as_f64().unwrap() - 8.468).abs() < 1e-9);
    assert_eq!(entry["instanceType"], "t2.micro");
    assert_eq!(entry["vcpu"], "1-2");
}

#[tokio::test]
async fn test_s3_monthly_cost() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/pricing/s3",
            None,
            json!({ "storageClass": "General Purpose", "storageGB": 100 }),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    let entry = &body["data"][0];
    assert_eq!(entry["unit"], "GB-Mo");
    assert_eq!(entry["storageGB"], 100.0);
    assert!((entry["monthlyCost"].as_f64().unwrap() - 2.30).abs() < 1e-9);
}

#[tokio::test]
async fn test_route53_monthly_cost() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/pricing/route53",
            None,
            json!({ "component": "HostedZone", "quantity": 3 }),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    let entry = &body["data"][0];
    assert_eq!(entry["location"], "Global");
    assert!((entry["monthlyCost"].as_f64().unwrap() - 1.50).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_instance_prices_at_zero() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/pricing/ec2",
            None,
            json!({ "instanceType": "z9.mega" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"][0]["unitPrice"], 0.0);
    assert_eq!(body["data"][0]["monthlyCost"], 0.0);
}

#[tokio::test]
async fn test_cart_remove_is_idempotent() {
    let app = app();
    let cookie = new_session(&app).await;

    add_item(&app, &cookie, json!({ "service": "EC2", "monthlyCost": 8.468 })).await;
    add_item(&app, &cookie, json!({ "service": "S3", "monthlyCost": 2.3 })).await;

    let items = body_json(
        app.clone()
            .oneshot(empty_request(Method::GET, "/api/cart/items", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(items["count"], 2);
    let id = items["items"][0]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/cart/remove/{}", id);
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request(Method::DELETE, &uri, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["cartCount"], 1);
    }
}

#[tokio::test]
async fn test_cart_total_and_clear() {
    let app = app();
    let cookie = new_session(&app).await;

    add_item(&app, &cookie, json!({ "service": "EC2", "monthlyCost": 8.468 })).await;
    add_item(&app, &cookie, json!({ "service": "RDS", "monthlyCost": "12.41" })).await;

    let total = body_json(
        app.clone()
            .oneshot(empty_request(Method::GET, "/api/cart/total", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(total["total"], 20.88);
    assert_eq!(total["count"], 2);

    let cleared = body_json(
        app.clone()
            .oneshot(empty_request(Method::DELETE, "/api/cart/clear", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cleared["message"], "Cart cleared");

    let total = body_json(
        app.clone()
            .oneshot(empty_request(Method::GET, "/api/cart/total", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(total["total"], 0.0);
    assert_eq!(total["count"], 0);
}

#[tokio::test]
async fn test_carts_are_isolated_per_session() {
    let app = app();
    let first = new_session(&app).await;
    let second = new_session(&app).await;
    assert_ne!(first, second);

    add_item(&app, &first, json!({ "service": "EC2" })).await;

    let items = body_json(
        app.clone()
            .oneshot(empty_request(Method::GET, "/api/cart/items", Some(&second)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(items["count"], 0);
}

#[tokio::test]
async fn test_csv_export() {
    let app = app();
    let cookie = new_session(&app).await;

    for (service, monthly) in [("EC2", 8.468), ("EC2", 9.2), ("S3", 2.3)] {
        add_item(
            &app,
            &cookie,
            json!({
                "service": service,
                "resourceType": "item",
                "region": "US East (N. Virginia)",
                "hourlyCost": 0.01,
                "monthlyCost": monthly
            }),
        )
        .await;
    }

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/export/csv", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=aws_cost_estimate.csv"
    );

    let csv = body_text(response).await;
    let item_rows = csv.lines().filter(|line| line.contains("/hr,")).count();
    assert_eq!(item_rows, 3);
    assert!(csv.contains("Total Resources,3\r\n"));
    assert!(csv.contains("Monthly,$19.97\r\n"));
    assert!(csv.contains("EC2,2,$17.67,$212.02\r\n"));
    assert!(csv.contains("S3,1,$2.30,$27.60\r\n"));
}

#[tokio::test]
async fn test_available_instances() {
    let response = app()
        .oneshot(empty_request(
            Method::GET,
            "/api/available-instances?region=EU%20(Ireland)",
            None,
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["region"], "EU (Ireland)");

    let instances: Vec<&str> = body["instances"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let mut sorted = instances.clone();
    sorted.sort();
    assert_eq!(instances, sorted);
    assert!(instances.contains(&"t2.micro"));
    assert_eq!(body["count"], instances.len());
}

#[tokio::test]
async fn test_connection_reports_static_mode() {
    let body = body_json(
        app()
            .oneshot(empty_request(Method::GET, "/api/test-connection", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Using credential-free pricing");
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/api/nope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/pricing/ec2")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_pricing_without_backend() {
    let app = create_router(AppState::new(None), &Config::default(), None);

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/pricing/alb", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "AWS Pricing client not initialized");

    let connection = body_json(
        app.clone()
            .oneshot(empty_request(Method::GET, "/api/test-connection", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(connection["success"], false);
    assert_eq!(connection["error"], "Pricing client not initialized");

    let ready = app
        .oneshot(empty_request(Method::GET, "/ready", None))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
