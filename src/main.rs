use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::Cli;
use rfdetr_plus::settings::Settings;

/// Main entry point for the rfdetr-plus CLI
///
/// Loads settings, installs logging and runs the requested command.
///
/// # Errors
/// Returns an error if settings are invalid, the license is not accepted for
/// a command that needs it, or a lookup or override fails
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load settings first
    let settings = Settings::new()?;

    // Log to the configured directory, or stderr when none is set
    let (writer, _guard) = match &settings.logging.file {
        Some(dir) => tracing_appender::non_blocking(
            tracing_appender::rolling::RollingFileAppender::new(
                tracing_appender::rolling::Rotation::DAILY,
                dir,
                "rfdetr-plus",
            ),
        ),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    info!("rfdetr-plus {} starting", rfdetr_plus::VERSION);
    info!("Weights directory: {}", settings.weights.directory.display());

    cli::run(cli.command, &settings)
}
