//! deepcheck CLI
//!
//! Renders files through the byte visualizer and shows where two files
//! diverge.

use clap::{Parser, Subcommand, ValueEnum};
use deepcheck_core::config::{ColorMode, RenderConfig};
use deepcheck_core::logging_facility::{init, Profile};

mod commands;

/// Exit status for files that differ
pub const EXIT_DIFFER: i32 = 1;
/// Exit status for usage and IO errors
pub const EXIT_ERROR: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "deepcheck")]
#[command(about = "deepcheck - escaped, line-numbered views of bytes", long_about = None)]
struct Cli {
    /// Terminal width in columns (overrides DEEPCHECK_WIDTH)
    #[arg(long, global = true)]
    width: Option<usize>,

    /// When to emit ANSI styling (overrides DEEPCHECK_COLOR)
    #[arg(long, global = true, value_enum)]
    color: Option<ColorArg>,

    /// Log operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Always,
    Never,
    Auto,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
            ColorArg::Auto => ColorMode::Auto,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a file with escapes, line numbers and wrapping
    Show(commands::show::ShowArgs),
    /// Render where two files diverge (exit status 1 when they differ)
    Diff(commands::diff::DiffArgs),
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::from_env();
        if let Some(width) = self.width {
            config = config.with_width(width);
        }
        if let Some(color) = self.color {
            config = config.with_color(color.into());
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }
    let config = cli.render_config();

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args, config),
        Commands::Diff(args) => commands::diff::execute(args, config),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}
