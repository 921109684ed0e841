use axum::{http::StatusCode, routing::get, Json, Router};
use pleroo_lib::engine::updater::{
    CheckError, CheckOutcome, HttpManifestSource, UpdateChecker, UpdateRegistry,
};
use serde_json::json;
use std::time::Duration;

const PLUGIN: &str = "plugin/plugin.php";

/// Serve `router` on an ephemeral local port and return its base URL
async fn serve(router: Router) -> Result<String, Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}

fn manifest_router() -> Router {
    Router::new()
        .route(
            "/update-info.json",
            get(|| async {
                Json(json!({
                    "new_version": "0.0.4",
                    "url": "https://x/u",
                    "package": "https://x/p.zip"
                }))
            }),
        )
        .route(
            "/broken.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/html", get(|| async { "<html>not json</html>" }))
        .route(
            "/partial.json",
            get(|| async { Json(json!({ "new_version": "0.0.4" })) }),
        )
        .route(
            "/slow.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({
                    "new_version": "0.0.4",
                    "url": "https://x/u",
                    "package": "https://x/p.zip"
                }))
            }),
        )
}

fn checker(url: String) -> UpdateChecker<HttpManifestSource> {
    let source = HttpManifestSource::with_timeout(url, Duration::from_millis(500));
    UpdateChecker::new("plugin", PLUGIN, "0.0.3", source)
}

fn registry_with(installed: &str) -> UpdateRegistry {
    let mut registry = UpdateRegistry::default();
    registry
        .checked
        .insert(PLUGIN.to_string(), installed.to_string());
    registry
}

#[tokio::test]
async fn test_http_update_available() -> Result<(), Box<dyn std::error::Error>> {
    let base = serve(manifest_router()).await?;
    let checker = checker(format!("{}/update-info.json", base));

    let registry = checker.check_for_update(registry_with("0.0.3")).await;
    let update = registry.pending_update(PLUGIN).ok_or("no announcement")?;

    assert_eq!(update.slug, "plugin");
    assert_eq!(update.plugin, PLUGIN);
    assert_eq!(update.new_version, "0.0.4");
    assert_eq!(update.url, "https://x/u");
    assert_eq!(update.package, "https://x/p.zip");
    Ok(())
}

#[tokio::test]
async fn test_http_up_to_date() -> Result<(), Box<dyn std::error::Error>> {
    let base = serve(manifest_router()).await?;
    let checker = checker(format!("{}/update-info.json", base));

    let input = registry_with("0.0.4");
    let result = checker.check_for_update(input.clone()).await;
    assert_eq!(result, input);
    assert!(matches!(
        checker.try_check(&input).await,
        Ok(CheckOutcome::UpToDate { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_http_failures_absorbed() -> Result<(), Box<dyn std::error::Error>> {
    let base = serve(manifest_router()).await?;
    let input = registry_with("0.0.3");

    let cases = [
        ("/broken.json", "network"),
        ("/missing.json", "network"),
        ("/html", "parse"),
        ("/partial.json", "parse"),
    ];

    for (path, kind) in cases {
        let checker = checker(format!("{}{}", base, path));
        let outcome = checker.try_check(&input).await;
        match kind {
            "network" => assert!(
                matches!(outcome, Err(CheckError::Network(_))),
                "{}: {:?}",
                path,
                outcome
            ),
            _ => assert!(
                matches!(outcome, Err(CheckError::Parse(_))),
                "{}: {:?}",
                path,
                outcome
            ),
        }
        assert_eq!(checker.check_for_update(input.clone()).await, input);
    }
    Ok(())
}

#[tokio::test]
async fn test_http_timeout_is_bounded() -> Result<(), Box<dyn std::error::Error>> {
    let base = serve(manifest_router()).await?;
    let checker = checker(format!("{}/slow.json", base));
    let input = registry_with("0.0.3");

    let started = std::time::Instant::now();
    let result = checker.check_for_update(input.clone()).await;

    assert_eq!(result, input);
    assert!(started.elapsed() < Duration::from_secs(3));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server() -> Result<(), Box<dyn std::error::Error>> {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let checker = checker(format!("http://{}/update-info.json", addr));
    let input = registry_with("0.0.3");

    assert!(matches!(
        checker.try_check(&input).await,
        Err(CheckError::Network(_))
    ));
    assert_eq!(checker.check_for_update(input.clone()).await, input);
    Ok(())
}
