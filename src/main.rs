//! streamstat - Rank tracks, artists and months from exported streaming history

use clap::Parser;
use streamstat::{
    cli::Cli,
    commands,
    data_loader::DataLoader,
    error::Result,
    output::get_formatter,
    provider::HistorySource,
    timezone::TimezoneConfig,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. RUST_LOG wins unless --verbose asks for info.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("streamstat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("streamstat=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Reject a bad timezone before reading any files
    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.local)?;

    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let loader = if cli.files.is_empty() {
        info!("Searching {} for history files", cli.dir.display());
        DataLoader::from_dir(&cli.dir, &cli.prefix)?
    } else {
        DataLoader::from_files(cli.files.clone())
    };
    let loader = loader.with_progress(show_progress);

    let tracks = loader.load_tracks()?;
    info!(
        "Loaded {} distinct tracks from {} files",
        tracks.len(),
        loader.files().len()
    );

    let command = cli.command.clone().unwrap_or_default();
    let formatter = get_formatter(cli.json);
    println!(
        "{}",
        commands::render(&command, &tracks, &tz_config, formatter.as_ref())?
    );

    Ok(())
}
