//! CLI argument definitions, tracing setup, and the convert command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use mdpress_shared::{AppConfig, MdpressError, load_config};
use tracing::{debug, info};

use crate::template;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdpress — turn a Markdown file into a styled HTML page.
#[derive(Parser)]
#[command(
    name = "mdpress",
    version,
    about = "Convert a restricted-Markdown file into a standalone HTML page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Markdown file to convert (.md or .markdown).
    pub input: PathBuf,

    /// Stylesheet to embed (defaults to config, then the bundled one).
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// Output path (defaults to the input path with a .html extension).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdpress=info",
        1 => "mdpress=debug",
        _ => "mdpress=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let out_path = convert_file(&cli, &config)?;
    println!("Wrote {}", out_path.display());
    Ok(())
}

/// Convert one Markdown file to an HTML page on disk.
/// Returns the path of the written page.
fn convert_file(cli: &Cli, config: &AppConfig) -> Result<PathBuf, MdpressError> {
    validate_input(&cli.input)?;

    let markdown =
        std::fs::read(&cli.input).map_err(|e| MdpressError::io(&cli.input, e))?;
    debug!(input = %cli.input.display(), bytes = markdown.len(), "read markdown source");

    let stylesheet = resolve_stylesheet(cli.css.as_deref(), config)?;

    let fragment = mdpress_convert::to_html(&markdown);
    let page = template::render_page(
        &String::from_utf8_lossy(&fragment),
        &stylesheet,
        &config.template,
    );

    let out_path = cli
        .out
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("html"));
    std::fs::write(&out_path, page).map_err(|e| MdpressError::io(&out_path, e))?;

    info!(
        input = %cli.input.display(),
        output = %out_path.display(),
        "conversion complete"
    );

    Ok(out_path)
}

/// Only `.md` / `.markdown` inputs are accepted.
fn validate_input(path: &Path) -> Result<(), MdpressError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") | Some("markdown") => Ok(()),
        _ => Err(MdpressError::usage(format!(
            "expected a .md or .markdown file, got '{}'",
            path.display()
        ))),
    }
}

/// Stylesheet precedence: `--css` flag, then config, then the bundled default.
fn resolve_stylesheet(flag: Option<&Path>, config: &AppConfig) -> Result<String, MdpressError> {
    if let Some(path) = flag {
        return std::fs::read_to_string(path).map_err(|e| MdpressError::io(path, e));
    }

    if !config.defaults.stylesheet.is_empty() {
        let path = Path::new(&config.defaults.stylesheet);
        return std::fs::read_to_string(path).map_err(|e| MdpressError::io(path, e));
    }

    Ok(template::DEFAULT_STYLESHEET.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
