use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use study_buddy::utils::{logger, validation::Validate};
use study_buddy::{router, AppConfig, AppState, CliConfig, GroqClient, SupabaseClient};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.verbose_logging(), config.json_logging());
    tracing::info!("Starting study-buddy API");
    tracing::debug!(?cli, "CLI arguments");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let groq = GroqClient::from_config(&config).context("failed to build Groq client")?;
    tracing::info!(model = groq.model(), "LLM client ready");
    let supabase =
        SupabaseClient::from_config(&config).context("failed to build Supabase client")?;

    let state = AppState::new(Arc::new(groq), Arc::new(supabase));
    let app = router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("✅ Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
