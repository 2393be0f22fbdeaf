//! viscactl - serial PTZ camera control over VISCA.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use viscactl as app;

use app::api::{self, AppState};
use app::camera::Camera;
use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::serial::{self, SerialConnector};

/// Serial PTZ camera control over VISCA.
#[derive(Parser)]
#[command(name = "viscactl", version)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    dev: bool,

    /// Serial device to use instead of probing the configured list
    #[arg(short, long, global = true)]
    port: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP control API
    Serve,
    /// Interactive command menu on stdin/stdout
    Console,
    /// Lists connected serial devices
    ListPorts,
    /// Write the default configuration to the config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        cli.config.clone().unwrap_or_else(AppConfig::default_path)
    };

    let (mut config, load_warning) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, None),
        ConfigLoadResult::Missing => (AppConfig::default(), None),
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), Some(e)),
    };

    let _log_guard = init_logging(&config.logging)?;
    tracing::info!("Config path: {:?}", config_path);
    if let Some(e) = load_warning {
        tracing::warn!("Config invalid, using defaults: {}", e);
    }

    if let Some(port) = cli.port {
        config.serial.ports = vec![port];
    }

    match cli.command {
        Command::Serve => run_server(config),
        Command::Console => run_console(config),
        Command::ListPorts => list_ports(),
        Command::InitConfig { force } => init_config(&config_path, force),
    }
}

/// Install the stderr subscriber plus an optional file writer.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().context("Log file path has no file name")?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn build_camera(config: &AppConfig, drain: bool) -> Camera {
    let connector = SerialConnector::new(config.serial.timeout());
    Camera::new(Box::new(connector), config.camera_settings(drain))
}

fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let mut camera = build_camera(&config, false);

    // Try to initialize serial at startup; commands retry on demand
    if let Err(e) = camera.connect() {
        tracing::warn!("Camera not connected at startup: {}", e);
    }

    let addr = config.server.bind_addr();
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(api::serve(AppState::new(camera), &addr))
        .with_context(|| format!("HTTP server on {addr} failed"))?;
    Ok(())
}

fn run_console(config: AppConfig) -> anyhow::Result<()> {
    let mut camera = build_camera(&config, true);

    if camera.connect().is_err() {
        bail!("Failed to initialize serial connection. Exiting.");
    }

    let stdin = io::stdin();
    app::console::run(&mut camera, stdin.lock(), io::stdout())?;
    Ok(())
}

fn list_ports() -> anyhow::Result<()> {
    let ports = serial::available_ports()?;
    if ports.is_empty() {
        println!("No connected serial ports found.");
    } else {
        println!("Connected serial ports:");
        ports.iter().for_each(|p| println!("{p}"));
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("Config file {} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
