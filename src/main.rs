//! tubestudy CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubestudy::cli::{commands, Cli, Commands};
use tubestudy::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tubestudy={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Questions {
            link,
            num,
            difficulty,
            output,
            language,
        } => {
            commands::run_questions(link, *num, difficulty.clone(), output.clone(), language.as_deref(), settings).await?;
        }

        Commands::Notes {
            link,
            output,
            text,
            language,
        } => {
            commands::run_notes(link, output, *text, language.as_deref(), settings).await?;
        }

        Commands::Audio {
            link,
            output,
            script,
            language,
        } => {
            commands::run_audio(link, output, *script, language.as_deref(), settings).await?;
        }

        Commands::Transcript { link, language } => {
            commands::run_transcript(link, language.as_deref(), settings).await?;
        }

        Commands::Chunks { link, language } => {
            commands::run_chunks(link, language.as_deref(), settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
