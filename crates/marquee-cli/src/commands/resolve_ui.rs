use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use marquee_core::{CandidateOutcome, ProgressEvent};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Progress display for a resolution run.
///
/// Draws a bar on a terminal; otherwise progress goes to structured logs.
pub struct ResolveUI {
    bar: ProgressBar,
    interactive: bool,
}

impl ResolveUI {
    pub fn new(output: &Output) -> Self {
        let interactive = is_interactive() && output.is_human() && !output.is_quiet();

        let bar = if interactive {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
            }
            bar
        } else {
            tracing::info!(
                operation = "ui_init",
                mode = "non_interactive",
                "Running in non-interactive mode - progress bar disabled, using structured logging"
            );
            ProgressBar::hidden()
        };

        Self { bar, interactive }
    }

    pub fn on_event(&self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::Started { total } => {
                self.bar.set_length(total as u64);
                self.bar.set_message("Resolving titles...");
            }
            ProgressEvent::Candidate { position, total, title, outcome } => {
                if self.interactive {
                    self.bar.set_position(position as u64);
                    self.bar.set_message(title.to_string());
                    if let CandidateOutcome::Skipped(reason) = outcome {
                        self.bar.println(format!("  {} {}: {}", "⚠".yellow(), title, reason));
                    }
                } else {
                    tracing::info!(
                        operation = "progress",
                        current = position,
                        total = total,
                        title = title,
                        resolved = matches!(outcome, CandidateOutcome::Resolved(_)),
                        "Resolution progress update"
                    );
                }
            }
        }
    }

    pub fn finish(&self) {
        if self.interactive {
            self.bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
