// ABOUTME: Main application orchestration for the formbind CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::{anyhow, Result};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Level used when `RUST_LOG` is unset: `--verbose` wins over the config file
    pub fn log_level(&self, verbose: bool) -> Result<LevelFilter> {
        if verbose {
            return Ok(LevelFilter::DEBUG);
        }
        let level = &self.config.logging.level;
        level
            .parse()
            .map_err(|_| anyhow!("Invalid log level '{}' in configuration", level))
    }

    /// Initialize logging to stderr; stdout carries only documents and answers
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let level = self.log_level(verbose)?;
        let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) => EnvFilter::try_new(directives)?,
            Err(_) => EnvFilter::default().add_directive(level.into()),
        };

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(!no_color)
            .with_target(false)
            .with_writer(std::io::stderr);

        let installed = match self.config.logging.format.as_str() {
            "compact" => builder.compact().try_init(),
            _ => builder.try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

        debug!("Logging initialized with level: {}", level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting formbind v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        match args.command {
            Commands::Preprocess { file } => commands::preprocess_file(&file, &self.config),

            Commands::Resolve { fixture, template } => {
                commands::resolve_template(&fixture, &template)
            }

            Commands::Fire {
                fixture,
                object,
                event,
            } => commands::fire_trigger(&fixture, &object, &event, &self.config).await,
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
