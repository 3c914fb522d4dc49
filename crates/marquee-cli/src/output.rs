use clap::ValueEnum;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Routes user-facing messages either to colored text or to one JSON object per line
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "error", "message": msg.as_ref() })),
        }
    }

    /// Print a table in human mode; JSON callers emit their data with `data` instead
    pub fn table(&self, table: &Table) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", table);
    }

    /// Emit a typed payload in JSON modes. No-op in human mode.
    pub fn data<T: Serialize>(&self, kind: &str, payload: &T) {
        if self.quiet || self.is_human() {
            return;
        }
        match serde_json::to_value(payload) {
            Ok(value) => self.print_json(&json!({ "type": kind, "data": value })),
            Err(e) => self.error(format!("Failed to serialize {}: {}", kind, e)),
        }
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            _ => self.print_json(&json!({ "type": kind, "message": msg })),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }
}
