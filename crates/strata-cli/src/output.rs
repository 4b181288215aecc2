//! Output management and formatting.
//!
//! Results and step progress go to stdout; errors go to stderr. JSON output
//! swaps [`TerminalProgress`] for tracing events so stdout stays
//! machine-readable.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use clap::ValueEnum;
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use strata_core::application::{StepEvent, StepOutcome, TracingProgress};
use strata_core::prelude::ProgressSink;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_str(&config.output.format, true)
                .unwrap_or(OutputFormat::Auto),
            explicit => explicit,
        };

        // Auto: Human on a TTY, Plain when piped.
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Aligned `key: value` row, as used in summaries.
    pub fn field(&self, key: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let key = format!("{key}:");
        let line = if self.no_color {
            format!("  {key:<14} {value}")
        } else {
            format!("  {:<14} {}", key.dimmed(), value.bold())
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON document on stdout. Never suppressed.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let doc = serde_json::to_string_pretty(value)?;
        self.term.write_line(&doc)?;
        Ok(())
    }

    /// Progress sink matching the resolved format.
    pub fn progress(&self) -> Arc<dyn ProgressSink> {
        if self.quiet || self.resolved_format == OutputFormat::Json {
            return Arc::new(TracingProgress);
        }
        match self.resolved_format {
            OutputFormat::Human => Arc::new(TerminalProgress::bar(self.no_color)),
            _ => Arc::new(TerminalProgress::lines()),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Step progress on stdout: a bar on terminals, one line per step otherwise.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
    no_color: bool,
    term: Term,
}

impl TerminalProgress {
    pub fn bar(no_color: bool) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        Self {
            bar: Some(bar),
            no_color,
            term: Term::stdout(),
        }
    }

    pub fn lines() -> Self {
        Self {
            bar: None,
            no_color: true,
            term: Term::stdout(),
        }
    }

    fn describe(&self, event: &StepEvent) -> String {
        let (mark, suffix) = match &event.outcome {
            StepOutcome::Succeeded => ("\u{2713}", String::new()),
            StepOutcome::Tolerated(err) => ("\u{26a0}", format!(" (skipped: {err})")),
            StepOutcome::Failed(_) => ("\u{2717}", String::new()),
        };
        if self.no_color {
            return format!("{mark} {}{suffix}", event.label);
        }
        let mark = match &event.outcome {
            StepOutcome::Succeeded => mark.green().to_string(),
            StepOutcome::Tolerated(_) => mark.yellow().to_string(),
            StepOutcome::Failed(_) => mark.red().to_string(),
        };
        format!("{mark} {}{}", event.label, suffix.dimmed())
    }
}

impl ProgressSink for TerminalProgress {
    fn pipeline_started(&self, total_steps: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total_steps as u64);
            bar.set_position(0);
        }
    }

    fn step_finished(&self, event: &StepEvent) {
        let line = self.describe(event);
        match &self.bar {
            Some(bar) => {
                bar.println(line);
                bar.set_message(event.label.clone());
                bar.inc(1);
                if !event.is_success() || event.index + 1 == event.total {
                    bar.finish_and_clear();
                }
            }
            None => {
                let _ = self
                    .term
                    .write_line(&format!("[{}/{}] {line}", event.index + 1, event.total));
            }
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn make_manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            log_file: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn event(outcome: StepOutcome) -> StepEvent {
        StepEvent {
            index: 2,
            total: 16,
            label: "Generate Makefile".into(),
            outcome,
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.quiet);
    }

    #[test]
    fn plain_disables_color() {
        assert!(make_manager(false, OutputFormat::Plain).no_color);
        assert!(!make_manager(false, OutputFormat::Human).no_color);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            log_file: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }

    #[test]
    fn plain_step_lines() {
        let progress = TerminalProgress::lines();
        assert_eq!(
            progress.describe(&event(StepOutcome::Succeeded)),
            "\u{2713} Generate Makefile"
        );
        let failed = progress.describe(&event(StepOutcome::Failed(
            strata_core::error::StrataError::Internal {
                message: "x".into(),
            },
        )));
        assert!(failed.starts_with('\u{2717}'));
    }

    #[test]
    fn bar_tracks_steps() {
        let progress = TerminalProgress::bar(true);
        progress.pipeline_started(16);
        progress.step_finished(&event(StepOutcome::Succeeded));
        let bar = progress.bar.as_ref().unwrap();
        assert_eq!(bar.length(), Some(16));
        assert_eq!(bar.position(), 1);
    }
}
