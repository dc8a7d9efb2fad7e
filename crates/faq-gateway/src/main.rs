//! faq-gateway: WhatsApp FAQ Gateway Main Binary
//!
//! Usage:
//!   faq-gateway           - Start the webhook server
//!   faq-gateway --help    - Show help
//!   faq-gateway --version - Show version

use faq_core::Config;
use faq_whatsapp::WhatsAppBot;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Webhook server
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("faq-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting faq-gateway...");

    let bot = WhatsAppBot::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create WhatsApp bot: {}", e))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = bot.start().await {
            tracing::error!("Webhook server error: {}", e);
        }
    });
    tracing::info!("Webhook server started on port {}", config.server.port);
    tracing::info!("Press Ctrl+C to exit");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down...");
        }
        result = handle => {
            result?;
            anyhow::bail!("Webhook server stopped unexpectedly");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("faq-gateway - WhatsApp FAQ Gateway");
    println!();
    println!("Usage:");
    println!("  faq-gateway           Start the webhook server (POST /webhook)");
    println!("  faq-gateway --help    Show this help message");
    println!("  faq-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  REDIS_HOST           Session store host (default: localhost)");
    println!("  REDIS_PORT           Session store port (default: 6379)");
    println!("  REDIS_PASSWORD       Session store password (default: none)");
    println!("  PORT                 Webhook listen port (default: 5000)");
    println!("  RUST_LOG             Log filter (default: info)");
}
