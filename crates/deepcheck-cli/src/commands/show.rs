//! Show command
//!
//! Usage: deepcheck show <FILE>

use clap::Args;
use deepcheck_core::config::RenderConfig;
use deepcheck_core::visualize::Visualizer;
use deepcheck_core::{log_op_end, log_op_error, log_op_start};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// File to render
    pub file: PathBuf,
}

pub fn execute(args: ShowArgs, config: RenderConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("show", file = %args.file.display());

    let bytes = match super::read_input("show", &args.file) {
        Ok(bytes) => bytes,
        Err(err) => {
            log_op_error!("show", err.clone(), duration_ms = started.elapsed().as_millis() as u64);
            return Err(err.into());
        }
    };

    let rendered = Visualizer::new(config).render(&bytes);
    std::io::stdout().lock().write_all(rendered.as_bytes())?;

    log_op_end!(
        "show",
        duration_ms = started.elapsed().as_millis() as u64,
        bytes = bytes.len()
    );
    Ok(0)
}
