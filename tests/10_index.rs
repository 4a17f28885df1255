mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn index_describes_service() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true, "unexpected body: {}", body);
    assert_eq!(body["data"]["name"], "Formcraft API");
    assert!(body["data"]["endpoints"].is_object());

    Ok(())
}

#[tokio::test]
async fn health_reports_database_status() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body["data"]["status"] == "ok" || body["data"]["status"] == "degraded",
        "unexpected body: {}",
        body
    );

    Ok(())
}
