//! Console Raytracer - real-time ray tracing in the terminal
//!
//! Controls:
//! - W/A/S/D: Move
//! - Space / C (or Left Shift): Up / Down
//! - V: Hold to move faster
//! - Mouse or arrow keys: Look around
//! - Q/E: Grow/shrink the picture
//! - Escape: Quit
//!
//! Usage:
//!   console_raytracer run                 - Interactive mode
//!   console_raytracer snapshot -o f.txt   - Render one frame to a file

use clap::{Parser, Subcommand, ValueEnum};
use console_raytracer::{
    App, AppConfig, Camera, FrameContext, Renderer, Scene, Viewport,
    encode::{ChannelOrder, encode_frame},
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "console_raytracer")]
#[command(version = "0.1.0")]
#[command(about = "Real-time ray tracer for the terminal")]
struct Cli {
    /// Path to config file (defaults: raytracer.yaml, config.yaml, built-in)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive renderer
    Run {
        /// Override viewport width
        #[arg(long)]
        width: Option<usize>,
        /// Override viewport height
        #[arg(long)]
        height: Option<usize>,
        /// Override the random scene seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render a single frame without the interactive terminal
    Snapshot {
        /// Write the frame here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the camera yaw in radians
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f32>,
        /// Override the camera pitch in radians
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f32>,
        /// Override the random scene seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate configuration file
    CheckConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Commands::Run { .. });
    let default_level = default_log_level(interactive, cli.log_file.is_some());
    init_logging(cli.log_level, cli.log_file.as_deref(), default_level)?;

    match cli.command {
        Commands::Run {
            width,
            height,
            seed,
        } => {
            let mut config = load_config_or_exit(cli.config.as_deref());
            if let Some(width) = width {
                config.display.width = width;
            }
            if let Some(height) = height {
                config.display.height = height;
            }
            if seed.is_some() {
                config.scene.seed = seed;
            }
            App::from_config(config)?.run()?;
        }
        Commands::Snapshot {
            output,
            yaw,
            pitch,
            seed,
        } => {
            let mut config = load_config_or_exit(cli.config.as_deref());
            if let Some(yaw) = yaw {
                config.camera.yaw = yaw;
            }
            if let Some(pitch) = pitch {
                config.camera.pitch = pitch;
            }
            if seed.is_some() {
                config.scene.seed = seed;
            }
            validate_or_exit(&config);
            snapshot(&config, output.as_deref())?;
        }
        Commands::CheckConfig => {
            check_config(cli.config.as_deref());
        }
    }

    Ok(())
}

/// Interactive mode draws on stderr's terminal, so only warnings reach it
/// unless logs go to a file.
fn default_log_level(interactive: bool, has_log_file: bool) -> LogLevel {
    if interactive && !has_log_file {
        LogLevel::Warn
    } else {
        LogLevel::Info
    }
}

fn init_logging(
    level: Option<LogLevel>,
    log_file: Option<&Path>,
    default_level: LogLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    let level_filter = if let Some(level) = level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level.to_string()))
            .to_string()
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Render one frame and print or save it
fn snapshot(config: &AppConfig, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let scene = Scene::from_config(&config.scene);
    let camera = Camera::from_config(&config.camera);
    let viewport = Viewport::new(config.display.width, config.display.height);

    let mut renderer =
        Renderer::new(viewport.width, viewport.height).with_shadow_bias(config.render.shadow_bias);
    renderer.render(&FrameContext {
        scene: &scene,
        camera: &camera,
        viewport,
    });

    let order = ChannelOrder::from_legacy_flag(config.display.legacy_channel_order);
    let mut frame = encode_frame(renderer.framebuffer(), viewport.width, order);
    frame.push_str("\x1b[0m\n");

    match output {
        Some(path) => {
            std::fs::write(path, &frame)?;
            tracing::info!(path = %path.display(), "Snapshot written");
        }
        None => print!("{}", frame),
    }

    Ok(())
}

/// Validate configuration file
fn check_config(config_path: Option<&Path>) {
    let config = load_config_or_exit(config_path);
    if let Err(e) = config.validate() {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    println!("✓ Configuration is valid\n");
    println!("Display:");
    println!("  Size: {}x{}", config.display.width, config.display.height);
    println!(
        "  Zoom: {}..{} step {}",
        config.display.min_size, config.display.max_size, config.display.zoom_step
    );
    println!(
        "  Channel order: {}",
        if config.display.legacy_channel_order { "r, b, g (legacy)" } else { "r, g, b" }
    );
    println!("\nCamera:");
    let [x, y, z] = config.camera.position;
    println!("  Position: {:.2}, {:.2}, {:.2}", x, y, z);
    println!("  FOV: {}", config.camera.fov);
    println!("  Speed: {} (boost {})", config.camera.speed, config.camera.boost_speed);
    println!("\nRender:");
    println!("  Shadow bias: {}", config.render.shadow_bias);
    println!("\nScene:");
    match config.scene.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
    println!("  Random spheres: {}", config.scene.random_spheres);
    println!("  Configured objects: {}", config.scene.objects.len());
    println!("  Ground plane: {}", config.scene.ground);
}

/// Load configuration or exit with error
fn load_config_or_exit(config_path: Option<&Path>) -> AppConfig {
    match AppConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            eprintln!("\nYou can copy config.yaml.default and modify it:");
            eprintln!("  cp config.yaml.default raytracer.yaml");
            std::process::exit(1);
        }
    }
}

fn validate_or_exit(config: &AppConfig) {
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
}
