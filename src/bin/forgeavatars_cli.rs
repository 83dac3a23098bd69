//! ForgeAvatars CLI - Command line front end
//!
//! Commands: engines, generate
//! Exit codes: 0 success, 1 configuration error, 2 every engine failed

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use forgeavatars_core::{
    AvatarBuilder, AvatarConfig, AvatarError, EngineKind, EngineOptions, RenderedImage,
};
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "FORGEAVATARS_LOG";

#[derive(Parser)]
#[command(name = "forgeavatars-cli")]
#[command(about = "ForgeAvatars CLI - Deterministic Avatar Compiler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available engines as JSON
    Engines,

    /// Generate an avatar
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Primary engine
    #[arg(short, long)]
    engine: Option<String>,

    /// Fallback engine, tried in the order given
    #[arg(short, long = "fallback")]
    fallbacks: Vec<String>,

    /// Seed text, usually an email or username
    #[arg(short, long)]
    seed: Option<String>,

    /// Display name (initials, alt text)
    #[arg(short, long)]
    name: Option<String>,

    /// Image size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// JSON payload (EngineOptions)
    #[arg(long)]
    options: Option<String>,

    /// Path to a JSON AvatarConfig
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first engine error
    #[arg(long)]
    debug: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    DataUri,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Engines => {
            let engines: Vec<_> = EngineKind::ALL.iter().map(|kind| kind.name()).collect();
            println!("{:#}", serde_json::json!(engines));
            ExitCode::SUCCESS
        }

        Commands::Generate(args) => {
            let format = args.format;
            let config = match args.config.as_deref().map(fs::read_to_string).transpose() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to read config: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let mut builder = match configure(&args, config.as_deref()) {
                Ok(b) => b,
                Err(e) => {
                    print_error(format, &e, &[]);
                    return ExitCode::FAILURE;
                }
            };

            match builder.generate() {
                Ok(image) => match emit(&image, format, args.output.as_deref()) {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("Failed to write output: {e}");
                        ExitCode::FAILURE
                    }
                },
                Err(e) => {
                    let errors = attempt_log(&builder);
                    print_error(format, &e, &errors);
                    if e.is_configuration() {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::from(2)
                    }
                }
            }
        }
    }
}

/// Config file first, then individual flags on top.
fn configure(args: &GenerateArgs, config: Option<&str>) -> Result<AvatarBuilder, AvatarError> {
    let mut builder = match config {
        Some(json) => AvatarBuilder::from_config(&AvatarConfig::from_json(json)?)?,
        None => AvatarBuilder::new(),
    };

    if let Some(engine) = &args.engine {
        builder = builder.engine(engine)?;
    }
    for fallback in &args.fallbacks {
        builder = builder.fallback_to(fallback)?;
    }
    if let Some(seed) = &args.seed {
        builder = builder.seed(seed);
    }
    if let Some(name) = &args.name {
        builder = builder.name(name);
    }
    if let Some(size) = args.size {
        builder = builder.size(size)?;
    }
    if let Some(options) = &args.options {
        builder = builder.options(EngineOptions::from_json(options)?)?;
    }
    if args.debug {
        builder = builder.debug(true);
    }
    Ok(builder)
}

fn attempt_log(builder: &AvatarBuilder) -> Vec<serde_json::Value> {
    builder
        .last_errors()
        .iter()
        .map(|f| {
            serde_json::json!({
                "engine": f.engine,
                "reason": f.reason.to_string(),
            })
        })
        .collect()
}

fn emit(image: &RenderedImage, format: OutputFormat, output: Option<&Path>) -> std::io::Result<()> {
    let text = match format {
        OutputFormat::Svg => None,
        OutputFormat::Html => Some(image.to_html()),
        OutputFormat::DataUri => Some(image.to_base64()),
        OutputFormat::Json => Some(format!(
            "{:#}",
            serde_json::json!({
                "success": true,
                "content_type": image.content_type(),
                "size": image.size(),
                "content": image.to_string(),
                "errors": [],
            })
        )),
    };

    match (output, text) {
        (Some(path), None) => image.save(path),
        (Some(path), Some(text)) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, text)
        }
        (None, None) => {
            println!("{image}");
            Ok(())
        }
        (None, Some(text)) => {
            println!("{text}");
            Ok(())
        }
    }
}

fn print_error(format: OutputFormat, error: &AvatarError, errors: &[serde_json::Value]) {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "success": false,
                "error": error.to_string(),
                "errors": errors,
            });
            println!("{output:#}");
        }
        _ => eprintln!("{}", error.summary()),
    }
}
