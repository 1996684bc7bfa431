//! Human-readable and JSON reports of an analysis.

use std::{io, path::Path};

use chrono::{DateTime, Utc};
use meanshift_detect::{AnalysisSeed, ChangeAnalysis, DetectorConfig, SegmentSummary};
use serde::Serialize;

/// Everything needed to reproduce and inspect one analysis.
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisReport<'a> {
    pub(crate) source: &'a Path,
    pub(crate) analyzed_at: DateTime<Utc>,
    pub(crate) seed: AnalysisSeed,
    pub(crate) config: DetectorConfig,
    pub(crate) change_count: usize,
    #[serde(flatten)]
    pub(crate) analysis: &'a ChangeAnalysis<'a>,
}

/// Writes one row per merged segment.
///
/// Segments are identified by line numbers, or by their boundary labels when
/// the input had a time column.
pub(crate) fn write_summary<W>(
    w: &mut W,
    analysis: &ChangeAnalysis<'_>,
    has_time: bool,
) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w)?;
    writeln!(w, "Changes Found: {}", analysis.change_count())?;
    for (i, segment) in analysis.segments().iter().enumerate() {
        let summary = &segment.summary;
        let bounds = if has_time {
            format!("Time: {} -> {}", summary.start_label, summary.end_label)
        } else {
            format!(
                "Line Num: {:04} -> {:04}",
                summary.start_line, summary.end_line
            )
        };
        writeln!(
            w,
            "     Chg:{i:04}  ,  {bounds}  len={:04}  ,  Avg:{:.2}, Stdev:{:.2}  ,  Chg. Conf {:5.1}% @: {}",
            summary.len(),
            summary.avg,
            summary.stdev,
            segment.confidence,
            summary.start_line,
        )?;
    }
    writeln!(w)?;
    Ok(())
}

/// Writes every change point, subtle ones included, with its boundaries.
pub(crate) fn write_debug<W>(w: &mut W, analysis: &ChangeAnalysis<'_>) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w)?;
    writeln!(w, "Changes Found: {}", analysis.change_count())?;
    for change in analysis.changes() {
        let SegmentSummary {
            avg,
            stdev,
            start_line,
            end_line,
            start_label,
            end_label,
            start_value,
            end_value,
        } = &change.summary;
        writeln!(
            w,
            "Line Num: {start_line:>10} -> {end_line:<10}  len={:<5}    [ Time: {start_label} , Value: {start_value:>10.3} ] -> [ Time: {end_label} , Value: {end_value:>10.3} ]  ,  Avg:{avg:.2} Stdev:{stdev:.2}    {:5.1}% CONF. @: {start_line}  Merge={}",
            change.summary.len(),
            change.confidence,
            change.subtle,
        )?;
    }
    writeln!(w)?;
    Ok(())
}
