use std::sync::Arc;

use anyhow::{Context, Result};
use recipebot_application::ChatUseCase;
use recipebot_core::completion::CompletionClient;
use recipebot_core::session::ChatSession;
use recipebot_interaction::OpenAIApiClient;
use recipebot_server::{AppState, ServerConfig, app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();
    logging::init_tracing();

    if let Err(err) = run().await {
        tracing::error!("[Startup] {:#}", err);
        return Err(err);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let client = OpenAIApiClient::try_from_env().context("Failed to configure OpenAI client")?;

    let session = ChatSession::in_memory();
    tracing::info!(
        "[Startup] Session {} using model {}",
        session.id(),
        client.model()
    );

    let chat = ChatUseCase::new(session, Arc::new(client))
        .context("Failed to build chat use case")?
        .with_recall_options(config.recall);
    let state = AppState::new(chat).context("Failed to build application state")?;

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("[Startup] Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("[Shutdown] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("[Shutdown] Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}
