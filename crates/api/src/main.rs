#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "stockroom-dev-secret-change-me-at-least-32-bytes".to_string()
    });

    let expiration_ms = std::env::var("JWT_EXPIRATION_MS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(3_600_000);

    let addr = std::env::var("STOCKROOM_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = stockroom_api::app::build_app(&jwt_secret, expiration_ms)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
