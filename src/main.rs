use anyhow::Context;
use homeservice::{
    comments::Comment, db, requests::ServiceRequest, users::User, ImportConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "homeservice=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = ImportConfig::from_env()?;
    let summary = homeservice::run(&config)
        .await
        .context("import pipeline failed")?;

    let pool = db::connect_pool(&config).await?;
    let stats = ServiceRequest::stats(&pool).await?;
    let users = User::count(&pool).await?;
    let comments = Comment::count(&pool).await?;
    tracing::info!(
        users,
        requests = stats.total,
        completed = stats.completed,
        comments,
        "database ready"
    );
    let summary = serde_json::to_string(&summary)?;
    tracing::debug!(%summary, "import summary");
    pool.close().await;

    Ok(())
}
