//! Human-readable progress output for the connection test.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

const RULE_WIDTH: usize = 60;
const SAMPLE_WIDTH: usize = 56;

/// One line of the sample table printed after the SELECT step.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleRow {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Writes numbered steps and status lines. Write errors are ignored, there
/// is nowhere better to report them.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<Stdout> {
    pub fn stdout() -> Self {
        Reporter::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {

    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) {
        _ = writeln!(self.out, "{text}");
    }

    pub fn header(&mut self, title: &str) {
        self.rule();
        self.line(title);
        self.rule();
    }

    pub fn step(&mut self, number: u8, title: &str) {
        _ = writeln!(self.out, "\n{number}. {title}");
    }

    pub fn ok(&mut self, message: &str) {
        _ = writeln!(self.out, "   ✓ {message}");
    }

    pub fn fail(&mut self, error: &dyn Display) {
        _ = writeln!(self.out, "   ✗ {error}");
    }

    pub fn warn(&mut self, message: &str) {
        _ = writeln!(self.out, "   ⚠ Warning: {message}");
    }

    pub fn detail(&mut self, message: &str) {
        _ = writeln!(self.out, "   {message}");
    }

    /// Prints up to three rows and a count of the ones left out.
    pub fn sample(&mut self, rows: &[SampleRow]) {
        let dashes = "-".repeat(SAMPLE_WIDTH);
        self.detail("");
        self.detail("Sample data:");
        self.detail(&dashes);
        self.detail(&format!("{:<5} {:<20} {:<30}", "ID", "Name", "Description"));
        self.detail(&dashes);
        for row in rows.iter().take(3) {
            let description: String = row.description.chars().take(30).collect();
            self.detail(&format!("{:<5} {:<20} {:<30}", row.id, row.name, description));
        }
        if rows.len() > 3 {
            self.detail(&format!("... and {} more record(s)", rows.len() - 3));
        }
    }

    /// Final banner.
    pub fn summary(&mut self, success: bool) {
        self.line("");
        self.rule();
        if success {
            self.line("✓ All tests passed successfully!");
        }
        else {
            self.line("✗ Connection test failed");
        }
        self.rule();
    }

    fn rule(&mut self) {
        self.line(&"=".repeat(RULE_WIDTH));
    }

}

/// Process exit status for an overall result.
pub fn exit_status(success: bool) -> u8 {
    if success { 0 } else { 1 }
}
