use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Context;
use chrono::Utc;
use meanshift_detect::{
    AnalysisSeed, Detector, DetectorConfig,
    config::{DEFAULT_BOOTSTRAP_COUNT, DEFAULT_CHANGE_TOLERANCE, DEFAULT_MIN_CONFIDENCE},
};
use rand::Rng as _;
use tracing::info;

use crate::{
    ingest::{self, ColumnLayout},
    report::{self, AnalysisReport},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DetectArg {
    /// Path to the delimited data file
    input: PathBuf,

    /// Field delimiter
    #[arg(long, short = 'd', default_value_t = ',')]
    delimiter: char,

    /// 1-based column holding timestamps (rows are numbered when omitted)
    #[arg(long)]
    time_col: Option<NonZeroUsize>,

    /// 1-based column holding the values
    #[arg(long, default_value = "1")]
    data_col: NonZeroUsize,

    /// Minimum confidence (percent) to accept a change point
    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    min_confidence: f64,

    /// Number of bootstrap permutations per significance test
    #[arg(long, default_value_t = DEFAULT_BOOTSTRAP_COUNT)]
    bootstrap: usize,

    /// Shifts of at most this many percent are merged into the previous segment
    #[arg(long, default_value_t = DEFAULT_CHANGE_TOLERANCE)]
    tolerance: u32,

    /// 32-digit hex seed for reproducible results (random when omitted)
    #[arg(long)]
    seed: Option<AnalysisSeed>,

    /// Also list every change point, including merged ones
    #[arg(long)]
    debug: bool,

    /// Write a JSON report instead of the text tables
    #[arg(long)]
    pub(super) json: bool,

    /// Output file path
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DetectArg) -> anyhow::Result<()> {
    let layout = ColumnLayout {
        delimiter: arg.delimiter,
        time_col: arg.time_col,
        data_col: arg.data_col,
    };
    let config = DetectorConfig {
        min_confidence: arg.min_confidence,
        bootstrap_count: arg.bootstrap,
        change_tolerance: arg.tolerance,
    };
    let detector = Detector::new(config).context("Invalid detector configuration")?;

    let series = ingest::read_series(&arg.input, &layout)?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");
    info!(rows = series.len(), ?config, "starting analysis");

    let analysis = detector.detect(&series, seed);

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        let report = AnalysisReport {
            source: &arg.input,
            analyzed_at: Utc::now(),
            seed,
            config,
            change_count: analysis.change_count(),
            analysis: &analysis,
        };
        output.write_json(&report)?;
    } else {
        report::write_summary(&mut output, &analysis, layout.time_col.is_some())
            .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
        if arg.debug {
            report::write_debug(&mut output, &analysis)
                .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
        }
        output.finish()?;
    }

    if let Some(path) = &arg.output {
        eprintln!("Report saved: {}", path.display());
    }
    Ok(())
}
