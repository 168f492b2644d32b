//! Diff command
//!
//! Usage: deepcheck diff <EXPECTED> <ACTUAL> [--json]

use clap::Args;
use deepcheck_core::config::RenderConfig;
use deepcheck_core::visualize::{count_lines, first_divergence, Visualizer};
use deepcheck_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// File holding the expected bytes
    pub expected: PathBuf,

    /// File holding the actual bytes
    pub actual: PathBuf,

    /// Print a JSON summary instead of the rendering
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable divergence summary
#[derive(Debug, Serialize)]
pub struct DiffSummary {
    pub identical: bool,
    pub diverges_at: Option<usize>,
    pub expected_len: usize,
    pub actual_len: usize,
    pub expected_lines: usize,
    pub actual_lines: usize,
}

impl DiffSummary {
    fn of(expected: &[u8], actual: &[u8]) -> Self {
        let diverges_at = first_divergence(expected, actual);
        Self {
            identical: diverges_at.is_none(),
            diverges_at,
            expected_len: expected.len(),
            actual_len: actual.len(),
            expected_lines: count_lines(expected),
            actual_lines: count_lines(actual),
        }
    }
}

pub fn execute(args: DiffArgs, config: RenderConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("diff", expected = %args.expected.display(), actual = %args.actual.display());

    let inputs = super::read_input("diff", &args.expected)
        .and_then(|e| super::read_input("diff", &args.actual).map(|a| (e, a)));
    let (expected, actual) = match inputs {
        Ok(pair) => pair,
        Err(err) => {
            log_op_error!("diff", err.clone(), duration_ms = started.elapsed().as_millis() as u64);
            return Err(err.into());
        }
    };

    let summary = DiffSummary::of(&expected, &actual);
    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        match summary.diverges_at {
            Some(at) => writeln!(
                out,
                "{} and {} diverge at byte {}",
                args.expected.display(),
                args.actual.display(),
                at
            )?,
            None => writeln!(out, "identical ({} bytes)", summary.expected_len)?,
        }
        let rendered = Visualizer::new(config).render_divergence(&expected, &actual);
        out.write_all(rendered.as_bytes())?;
    }

    log_op_end!(
        "diff",
        duration_ms = started.elapsed().as_millis() as u64,
        identical = summary.identical
    );
    Ok(if summary.identical { 0 } else { crate::EXIT_DIFFER })
}
