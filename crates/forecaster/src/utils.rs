use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, path::PathBuf};
use temp_forecaster_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_MODEL_DIR, DEFAULT_PORT,
};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Temperature Forecaster - predicts air temperature from weather observations"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $TEMP_FORECASTER_CONFIG, ./forecaster.toml,
    /// $XDG_CONFIG_HOME/temp-forecaster/forecaster.toml, /etc/temp-forecaster/forecaster.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "TEMP_FORECASTER_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on
    #[arg(short = 'H', long, env = "TEMP_FORECASTER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<String>,

    /// Directory holding feature_metadata.json, preprocess.json and model.json
    #[arg(short, long, env = "TEMP_FORECASTER_MODEL_DIR")]
    pub model_dir: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "TEMP_FORECASTER_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Config file the values were read from, logged once the logger is up
    #[arg(skip)]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
    }

    pub fn model_dir(&self) -> String {
        self.model_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_DIR.to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    /// Fill any unset value from `file`; values already set (CLI or env) win.
    pub fn merge(self, file: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file.level),
            host: self.host.or(file.host),
            port: self.port.or(file.port),
            model_dir: self.model_dir.or(file.model_dir),
            ui_dir: self.ui_dir.or(file.ui_dir),
            config_file: self.config_file.or(file.config_file),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    resolve_config(Cli::parse())
}

/// Merge `cli_args` with the config file it names, or the one found on the
/// search path.
pub fn resolve_config(cli_args: Cli) -> Cli {
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("TEMP_FORECASTER_CONFIG", "forecaster.toml")
    };

    let file_config = match load_config::<Cli>(&source) {
        Ok(file) => Cli {
            config_file: source.path().cloned(),
            ..file
        },
        Err(e) => {
            eprintln!("ignoring config file {}: {}", source, e);
            Cli::default()
        }
    };

    cli_args.merge(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
