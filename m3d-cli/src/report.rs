/// Colored terminal output for conversions and file reports
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use crate::{FileReport, Outcome};

/// Writes results to a terminal (or any writer) with crossterm colors
pub struct ReportPrinter {
    dry_run: bool,
}

impl ReportPrinter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// One line per `convert` input: the matrix, or the value left as-is
    pub fn conversion<W: Write>(
        &self,
        writer: &mut W,
        value: &str,
        result: Option<&str>,
    ) -> std::io::Result<()> {
        match result {
            Some(matrix) => {
                writer.queue(Print(matrix))?;
            }
            None => {
                writer.queue(SetForegroundColor(Color::Yellow))?;
                writer.queue(Print(format!("{} (unchanged)", value)))?;
                writer.queue(ResetColor)?;
            }
        }
        writer.queue(Print('\n'))?;
        writer.flush()
    }

    pub fn files<W: Write>(&self, writer: &mut W, reports: &[FileReport]) -> std::io::Result<()> {
        let mut rewritten = 0;
        let mut failed = 0;

        for report in reports {
            let (color, status, detail) = match &report.outcome {
                Outcome::Rewritten { converted, unchanged } => {
                    rewritten += 1;
                    let status = if self.dry_run { "would rewrite" } else { "rewritten" };
                    (
                        Color::Green,
                        status,
                        format!("{} converted, {} unchanged", converted, unchanged),
                    )
                }
                Outcome::Untouched { unchanged } => (
                    Color::DarkGrey,
                    "untouched",
                    format!("{} unchanged", unchanged),
                ),
                Outcome::Failed(message) => {
                    failed += 1;
                    (Color::Red, "failed", message.clone())
                }
            };

            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(format!("{:>13}", status)))?;
            writer.queue(ResetColor)?;
            writer.queue(Print(format!(
                " {} ({})\n",
                report.path.display(),
                detail
            )))?;
        }

        writer.queue(SetForegroundColor(if failed > 0 { Color::Red } else { Color::Cyan }))?;
        writer.queue(Print(format!(
            "{} file(s) scanned, {} rewritten, {} failed\n",
            reports.len(),
            rewritten,
            failed
        )))?;
        writer.queue(ResetColor)?;
        writer.flush()
    }
}
