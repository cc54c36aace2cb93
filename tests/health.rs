use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use storefront_api::{
    routes::{create_app, health::health_check},
    state::{AppState, Services},
};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, "ok");
}

#[tokio::test]
async fn health_route_bypasses_entity_router() {
    let app = create_app(AppState::new(Services::in_memory(), "secret", "/gambit"));
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
