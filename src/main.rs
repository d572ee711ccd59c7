use anyhow::Result;
use face_match_bot::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })?;
    Ok(())
}

/// Picks `RUST_LOG` over the configured level and builds the filter from it.
///
/// A bare word must be a level; anything with `=` or `,` is parsed as
/// `EnvFilter` directives. Returns the effective directive string as well.
fn log_filter(rust_log: Option<String>, configured: &str) -> Result<(String, EnvFilter)> {
    let directives = rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());

    if !directives.contains(['=', ',']) {
        validate_log_level(directives.trim())?;
    }

    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("Invalid log filter: '{}': {}", directives, e))?;

    Ok((directives, filter))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (log_level, filter) =
        match log_filter(std::env::var("RUST_LOG").ok(), &config.server.logs.level) {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting face match bot with log filter: {}", log_level);
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
