use quran_mood_agent::{
    agent::MoodAgent,
    api::start_server,
    config::AgentConfig,
    gemini::GeminiClient,
    verses::QuranApiClient,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("⚠️  {}", e);
            eprintln!("📌 See .env.example for setup instructions");
            return Err(e.into());
        }
    };

    info!("🚀 Quran Mood Agent - API Server");
    info!("📍 Port: {}", config.port);
    info!("🤖 Model: {}", config.gemini_model);
    info!("📖 Verse API: {} ({})", config.quran_api_base_url, config.quran_edition);

    // Create components
    let llm = Arc::new(GeminiClient::from_config(&config)?);
    let verse_source = Arc::new(QuranApiClient::from_config(&config)?);
    let agent = Arc::new(MoodAgent::new(llm, verse_source));

    info!("✅ Agent initialized");
    info!("📡 Starting API server...");

    // Start API server
    start_server(agent, config.port).await?;

    Ok(())
}
