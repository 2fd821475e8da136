use std::io::{self, Write};

use fmeta_envelope::ErrorEnvelope;
use fmeta_fs::FileRecord;
use fmeta_protocol::codec::write_json;

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Enable colors when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> ColorChoice {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Output sink for command results.
///
/// Successful results go to stdout, failure envelopes to stderr.
pub trait RecordPrinter {
    fn print_record(&mut self, record: &FileRecord) -> anyhow::Result<()>;

    fn print_listing(&mut self, records: &[FileRecord]) -> anyhow::Result<()>;

    fn print_failure(&mut self, envelope: &ErrorEnvelope) -> anyhow::Result<()>;
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    compact: bool,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, compact: bool) -> Self {
        Self { out, err, compact }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl JsonPrinter<io::Stdout, io::Stderr> {
    pub fn stdout(compact: bool) -> Self {
        JsonPrinter::new(io::stdout(), io::stderr(), compact)
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn print_record(&mut self, record: &FileRecord) -> anyhow::Result<()> {
        write_json(&mut self.out, record, self.compact)
    }

    fn print_listing(&mut self, records: &[FileRecord]) -> anyhow::Result<()> {
        write_json(&mut self.out, &records, self.compact)
    }

    fn print_failure(&mut self, envelope: &ErrorEnvelope) -> anyhow::Result<()> {
        write_json(&mut self.err, envelope, self.compact)
    }
}

/// Indented tree view of a directory record, one entry per line.
pub struct TreePrinter<W: Write, E: Write> {
    out: W,
    err: E,
    use_color: bool,
}

impl<W: Write, E: Write> TreePrinter<W, E> {
    #[cfg(test)]
    pub fn new(out: W, err: E, color: ColorChoice) -> Self {
        // Without a concrete stdout there is no TTY to check.
        let use_color = matches!(color, ColorChoice::Always);
        Self {
            out,
            err,
            use_color,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn label(&self, record: &FileRecord) -> String {
        let name = if record.name.is_empty() {
            record.path.as_str()
        } else {
            record.name.as_str()
        };

        let mut label = if record.is_directory {
            format!("{name}/")
        } else {
            name.to_owned()
        };
        if self.use_color && record.is_directory {
            label = format!("\x1b[34m{label}\x1b[0m");
        } else if self.use_color && record.is_symbolic_link {
            label = format!("\x1b[36m{label}\x1b[0m");
        }

        if record.is_directory {
            label
        } else {
            format!("{label} ({} bytes)", record.size_bytes)
        }
    }
}

impl TreePrinter<io::Stdout, io::Stderr> {
    pub fn stdout(color: ColorChoice) -> Self {
        use std::io::IsTerminal;

        let use_color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        TreePrinter {
            out: io::stdout(),
            err: io::stderr(),
            use_color,
        }
    }
}

impl<W: Write, E: Write> RecordPrinter for TreePrinter<W, E> {
    fn print_record(&mut self, record: &FileRecord) -> anyhow::Result<()> {
        // (record, prefix for its children, connector for itself)
        let mut stack: Vec<(&FileRecord, String, String)> =
            vec![(record, String::new(), String::new())];

        while let Some((rec, prefix, connector)) = stack.pop() {
            let label = self.label(rec);
            writeln!(self.out, "{connector}{label}")?;

            let last = rec.children.len().saturating_sub(1);
            for (i, child) in rec.children.iter().enumerate().rev() {
                let (branch, indent) = if i == last {
                    ("└── ", "    ")
                } else {
                    ("├── ", "│   ")
                };
                stack.push((child, format!("{prefix}{indent}"), format!("{prefix}{branch}")));
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn print_listing(&mut self, records: &[FileRecord]) -> anyhow::Result<()> {
        for record in records {
            writeln!(self.out, "{}", record.path)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_failure(&mut self, envelope: &ErrorEnvelope) -> anyhow::Result<()> {
        write_json(&mut self.err, envelope, false)
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
