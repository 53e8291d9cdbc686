mod app;
mod auth;
mod config;
mod error;
mod extract;
mod movie_notes;
mod state;
mod tv_notes;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "screennotes=debug,axum=info,tower_http=info".to_string());
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

    // Secret generation happens inside AppState::init (via AppConfig);
    // a failure there aborts startup before the listener opens.
    let state = state::AppState::init().await?;

    let app = app::build_app(state);
    app::serve(app).await
}
