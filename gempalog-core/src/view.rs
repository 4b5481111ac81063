//! Plain-text rendering of dashboard pages.
//!
//! Each page module turns fetched or stored data into a [`Document`]; the
//! primitives in [`table`], [`chart`] and [`map`] draw the individual blocks
//! with ratatui widgets on an off-screen buffer.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::fmt;

pub mod chart;
pub mod data_bantuan;
pub mod formulir;
pub mod info_gempa;
pub mod map;
pub mod table;

pub const APP_NAME: &str = "GempaLog.ID";
pub const TAGLINE: &str = "Sistem Bantuan Logistik Bencana Gempa";

/// A rendered page, built line by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The application header shown above every page.
    pub fn banner() -> Self {
        let mut doc = Self::new();
        let title = format!("{APP_NAME} | {TAGLINE}");
        let rule = "=".repeat(title.chars().count());
        doc.push(rule.clone()).push(title).push(rule);
        doc
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.push("");
        self.push(text);
        self.push("=".repeat(text.chars().count()))
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.push("");
        self.push(text);
        self.push("-".repeat(text.chars().count()))
    }

    pub fn info(&mut self, text: &str) -> &mut Self {
        self.push(format!("[i] {text}"))
    }

    pub fn warning(&mut self, text: &str) -> &mut Self {
        self.push(format!("[!] {text}"))
    }

    pub fn success(&mut self, text: &str) -> &mut Self {
        self.push(format!("[ok] {text}"))
    }

    pub fn error(&mut self, text: &str) -> &mut Self {
        self.push(format!("[x] {text}"))
    }

    /// Append a possibly multi-line block such as a table or chart.
    pub fn block(&mut self, block: impl fmt::Display) -> &mut Self {
        for line in block.to_string().lines() {
            self.push(line);
        }
        self
    }

    pub fn append(&mut self, other: Document) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render `widget` into a `width` x `height` buffer and return its rows,
/// trailing blanks trimmed.
pub(crate) fn draw(widget: impl Widget, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);

    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right()).map(|x| buf[(x, y)].symbol()).collect();
            row.trim_end().to_string()
        })
        .collect()
}

/// Cell count clamped to what a buffer dimension can hold.
pub(crate) fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
