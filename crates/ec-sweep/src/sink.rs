//! Output sinks for sweep rows.

use crate::error::SweepResult;
use crate::schedule::TimeUnit;
use crate::types::{RowFailure, RowOutcome, SweepRow, SweepSummary};
use serde::Serialize;
use std::io::Write;

/// Column names of the delimited result table.
pub const CSV_HEADER: &str =
    "accumulated_ET,elapsed_time,dry_bulb_temp,temperature_depression,wet_bulb_temp";

/// Consumer of sweep rows.
pub trait RowSink {
    /// Called once before the first row.
    fn begin(&mut self, _unit: TimeUnit) -> SweepResult<()> {
        Ok(())
    }

    fn write_row(&mut self, row: &SweepRow) -> SweepResult<()>;

    /// Failed rows are dropped unless the sink records them.
    fn write_failure(&mut self, _failure: &RowFailure) -> SweepResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> SweepResult<()> {
        Ok(())
    }
}

/// Comma-separated table with a header row.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn begin(&mut self, _unit: TimeUnit) -> SweepResult<()> {
        writeln!(self.writer, "{CSV_HEADER}")?;
        Ok(())
    }

    fn write_row(&mut self, row: &SweepRow) -> SweepResult<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{}",
            row.accumulated_et,
            row.elapsed,
            row.dry_bulb_c,
            row.temperature_depression,
            row.wet_bulb_c
        )?;
        Ok(())
    }

    fn finish(&mut self) -> SweepResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct FailureRecord<'a> {
    elapsed: f64,
    accumulated_et: f64,
    error: &'a str,
}

/// One JSON object per line, diagnostics included.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn write_row(&mut self, row: &SweepRow) -> SweepResult<()> {
        let line = serde_json::to_string(row)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn write_failure(&mut self, failure: &RowFailure) -> SweepResult<()> {
        let error = failure.error.to_string();
        let line = serde_json::to_string(&FailureRecord {
            elapsed: failure.elapsed,
            accumulated_et: failure.accumulated_et,
            error: &error,
        })?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn finish(&mut self) -> SweepResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<SweepRow>,
    pub failures: Vec<RowFailure>,
}

impl RowSink for MemorySink {
    fn write_row(&mut self, row: &SweepRow) -> SweepResult<()> {
        self.rows.push(*row);
        Ok(())
    }

    fn write_failure(&mut self, failure: &RowFailure) -> SweepResult<()> {
        self.failures.push(failure.clone());
        Ok(())
    }
}

fn report_row(row: &SweepRow, unit: TimeUnit) {
    tracing::info!(
        elapsed = row.elapsed,
        unit = unit.label(),
        et = row.accumulated_et,
        tdb = row.dry_bulb_c,
        depression = row.temperature_depression,
        "row solved"
    );
    for violation in row.flags.violations() {
        tracing::warn!(elapsed = row.elapsed, unit = unit.label(), "{violation}");
    }
    if !row.converged {
        tracing::warn!(
            elapsed = row.elapsed,
            iterations = row.iterations,
            residual = row.residual,
            "dry-bulb solve hit iteration cap, using last midpoint"
        );
    }
}

/// Pass every outcome to `sink` as it is produced.
///
/// Only sink I/O errors stop the pass; failed rows are counted and handed to
/// [`RowSink::write_failure`].
pub fn drain_into<I, S>(outcomes: I, unit: TimeUnit, sink: &mut S) -> SweepResult<SweepSummary>
where
    I: IntoIterator<Item = RowOutcome>,
    S: RowSink + ?Sized,
{
    let mut summary = SweepSummary::default();
    sink.begin(unit)?;

    for outcome in outcomes {
        summary.record(&outcome);
        match &outcome {
            Ok(row) => {
                report_row(row, unit);
                sink.write_row(row)?;
            }
            Err(failure) => {
                tracing::error!(
                    elapsed = failure.elapsed,
                    unit = unit.label(),
                    error = %failure.error,
                    "row failed"
                );
                sink.write_failure(failure)?;
            }
        }
    }

    sink.finish()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_solver::{PlausibilityFlags, SolverError};

    fn row(elapsed: f64) -> SweepRow {
        SweepRow {
            accumulated_et: 0.5 * elapsed,
            elapsed,
            dry_bulb_c: 25.0 - 0.1 * elapsed,
            temperature_depression: 0.1 * elapsed,
            wet_bulb_c: 19.0,
            iterations: 20,
            residual: 1e-10,
            converged: true,
            flags: PlausibilityFlags::default(),
        }
    }

    fn failure(elapsed: f64) -> RowFailure {
        RowFailure {
            elapsed,
            accumulated_et: 1.0,
            error: SolverError::InvalidBracket {
                low: -20.0,
                high: 30.0,
                f_low: 1.0,
                f_high: 1.0,
            },
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let mut sink = CsvSink::new(Vec::new());
        let outcomes = vec![Ok(row(0.0)), Err(failure(1.0)), Ok(row(2.0))];
        let summary = drain_into(outcomes, TimeUnit::Seconds, &mut sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "1,2,24.8,0.2,19");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.failures, 1);
    }

    #[test]
    fn json_lines_keep_diagnostics() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let mut flagged = row(3.0);
        flagged.flags.supersaturation = true;
        drain_into(
            vec![Ok(flagged), Err(failure(4.0))],
            TimeUnit::Minutes,
            &mut sink,
        )
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let mut lines = text.lines();
        let parsed: SweepRow = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(parsed, flagged);

        let err: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(err["elapsed"], 4.0);
        assert!(err["error"].as_str().unwrap().contains("bracket"));
    }

    #[test]
    fn memory_sink_collects_everything() {
        let mut sink = MemorySink::default();
        let summary =
            drain_into(vec![Ok(row(0.0)), Err(failure(1.0))], TimeUnit::Seconds, &mut sink).unwrap();
        assert_eq!(sink.rows.len(), 1);
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(summary.failures, 1);
    }

    #[test]
    fn summary_counts_flags() {
        let mut bad = row(5.0);
        bad.flags.temperature_inversion = true;
        bad.converged = false;
        let outcomes = vec![Ok(row(0.0)), Ok(bad)];
        let summary = SweepSummary::from_outcomes(&outcomes);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.inversions, 1);
        assert_eq!(summary.not_converged, 1);
        assert_eq!(summary.supersaturated, 0);
    }
}
