use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vector_viz::app::VectorApp;
use vector_viz::Config;

/// Picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "vector_viz.toml";


#[derive(Parser, Debug)]
#[command(name = "vector_viz", version, about = "Interactive 3D vector calculator")]
struct Cli {
    /// TOML settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}


fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if !fallback.exists() {
        info!("no config file, using defaults");
        return Ok(Config::default());
    }

    match Config::from_file(fallback) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!(error = %err, "ignoring {}, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Config::default())
        }
    }
}


fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let app = VectorApp::new(&config)?;
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "3D Vector Calculator",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
