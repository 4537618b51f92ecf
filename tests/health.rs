use inventory_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, "ok");
    assert_eq!(response.0.version, env!("CARGO_PKG_VERSION"));
}
