mod common;

use axum::{extract::State, http::StatusCode};
use inventory_tracker::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_database() -> anyhow::Result<()> {
    let (state, _config, _dir) = common::setup().await?;

    let (status, response) = health_check(State(state)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "ok");
    Ok(())
}
