use anyhow::{Context, Result};
use clap::Parser;
use mdtoc::{cli, config, output};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    if let Some(ref path) = cli.init_config {
        config::Config::default()
            .save(path)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        println!("Default config written to {}", path.display());
        return Ok(());
    }

    generate_command(&cli)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn generate_command(cli: &cli::Cli) -> Result<()> {
    log::info!("Scanning: {}", cli.directory.display());

    // Load configuration
    let file_config =
        config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = config::Config::resolve(file_config.as_ref(), &cli.overrides());
    log::debug!("Resolved config: {:?}", config);

    let toc = mdtoc::generate(&cli.directory, &config)
        .with_context(|| format!("Failed to generate TOC for {}", cli.directory.display()))?;

    if cli.dry_run {
        println!("Generated TOC:");
        println!("{}", toc);
        return Ok(());
    }

    let output_path = cli.output_path();
    let outcome = output::write_toc(&output_path, &toc, config.insert_marker.as_deref())
        .context("Failed to write TOC")?;
    println!("{} {}", outcome, output_path.display());

    Ok(())
}
