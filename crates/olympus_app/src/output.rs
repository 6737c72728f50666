//! Report sinks.
//!
//! The tick loop hands every report to a [`ReportSink`]. Text output mirrors
//! the console format of a flight-deck printout; JSON output writes one object
//! per line, tagged with the tick and report kind.

use std::io::{self, Write};

use olympus_engine::{EngineStatus, ExhaustStatus, IntakeStatus, LifetimeReport, SpecsReport};
use serde::Serialize;

/// One report about one engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Status(EngineStatus),
    Intake(IntakeStatus),
    Exhaust(ExhaustStatus),
    Specs(SpecsReport),
    Lifetimes(LifetimeReport),
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Status(r) => std::fmt::Display::fmt(r, f),
            Report::Intake(r) => std::fmt::Display::fmt(r, f),
            Report::Exhaust(r) => std::fmt::Display::fmt(r, f),
            Report::Specs(r) => std::fmt::Display::fmt(r, f),
            Report::Lifetimes(r) => std::fmt::Display::fmt(r, f),
        }
    }
}

/// Destination for reports produced by the tick loop.
pub trait ReportSink {
    /// Emit one report produced during `tick_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit(&mut self, tick_id: u64, report: &Report) -> io::Result<()>;
}

/// Writes reports as human-readable lines.
#[derive(Debug)]
pub struct TextSink<W> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn emit(&mut self, _tick_id: u64, report: &Report) -> io::Result<()> {
        writeln!(self.writer, "{report}")?;
        self.writer.flush()
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    tick: u64,
    #[serde(flatten)]
    report: &'a Report,
}

/// Writes reports as JSON lines.
#[derive(Debug)]
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn emit(&mut self, tick_id: u64, report: &Report) -> io::Result<()> {
        let line = JsonLine {
            tick: tick_id,
            report,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

/// Collects reports in memory.
impl ReportSink for Vec<(u64, Report)> {
    fn emit(&mut self, tick_id: u64, report: &Report) -> io::Result<()> {
        self.push((tick_id, report.clone()));
        Ok(())
    }
}
