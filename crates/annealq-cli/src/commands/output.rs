//! Terminal output sink with an optional plain-text log mirror.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use console::{measure_text_width, strip_ansi_codes, style};

/// Writes rendered blocks to stdout and, if configured, appends the
/// uncolored text to a log file.
pub struct Reporter {
    log: Option<File>,
}

impl Reporter {
    /// Create a reporter, opening `log_file` in append mode.
    pub fn new(log_file: Option<&str>) -> Result<Self> {
        let log = log_file
            .map(|path| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file: {path}"))
            })
            .transpose()?;
        Ok(Self { log })
    }

    /// Emit one line.
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        let text = text.as_ref();
        println!("{text}");
        if let Some(log) = self.log.as_mut() {
            writeln!(log, "{}", strip_ansi_codes(text)).context("Failed to write log file")?;
        }
        Ok(())
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> Result<()> {
        self.line("")
    }

    /// Title banner.
    pub fn header(&mut self, title: &str) -> Result<()> {
        self.blank()?;
        self.line(style("═".repeat(60)).cyan().to_string())?;
        self.line(style(format!("  {title}")).cyan().bold().to_string())?;
        self.line(style("═".repeat(60)).cyan().to_string())
    }

    /// Section heading.
    pub fn section(&mut self, title: &str) -> Result<()> {
        self.blank()?;
        self.line(style(format!("▶ {title}")).green().bold().to_string())?;
        self.line(style("─".repeat(40)).dim().to_string())
    }

    /// `label: value` line.
    pub fn result(&mut self, label: &str, value: impl Display) -> Result<()> {
        self.line(format!("  {} {}", style(format!("{label}:")).dim(), value))
    }

    /// A boxed block of text under a title.
    pub fn panel(&mut self, title: &str, body: &str) -> Result<()> {
        let width = body
            .lines()
            .map(measure_text_width)
            .chain(std::iter::once(measure_text_width(title) + 2))
            .max()
            .unwrap_or(0);

        self.line(format!(
            "┌─ {} {}┐",
            style(title).bold(),
            "─".repeat(width.saturating_sub(measure_text_width(title) + 1))
        ))?;
        for text in body.lines() {
            let pad = width - measure_text_width(text);
            self.line(format!("│ {text}{} │", " ".repeat(pad)))?;
        }
        self.line(format!("└{}┘", "─".repeat(width + 2)))
    }

    /// Column-aligned table.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }

        let header: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| format!("{:<w$}", h))
            .collect();
        self.line(format!("  {}", style(header.join("  ")).bold()))?;

        let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        self.line(format!("  {}", style(rule.join("  ")).dim()))?;

        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| {
                    let pad = w.saturating_sub(measure_text_width(cell));
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            self.line(format!("  {}", cells.join("  ")))?;
        }
        Ok(())
    }

    /// Success marker line.
    pub fn success(&mut self, message: &str) -> Result<()> {
        self.line(format!("{} {}", style("✓").green().bold(), message))
    }
}
