use ratatui::{
    layout::Direction,
    text::Line,
    widgets::{self, Bar, BarGroup},
};
use std::fmt;

use crate::view::{cells, draw};

const DEFAULT_WIDTH: usize = 40;

/// Horizontal bar chart, one labelled bar per line. Each label carries its
/// value, e.g. `Tenda (2)`.
#[derive(Debug, Clone)]
pub struct BarChart {
    bars: Vec<(String, u64)>,
    width: usize,
}

impl Default for BarChart {
    fn default() -> Self {
        Self { bars: Vec::new(), width: DEFAULT_WIDTH }
    }
}

impl BarChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells available to the longest bar.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn bar(mut self, label: impl Into<String>, value: u64) -> Self {
        self.bars.push((label.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn render_lines(&self) -> Vec<String> {
        let labels: Vec<String> = self.bars.iter().map(|(label, value)| format!("{label} ({value})")).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let max = self.bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);

        let bars: Vec<Bar<'_>> = self
            .bars
            .iter()
            .zip(&labels)
            .map(|((_, value), label)| {
                Bar::default().value(*value).label(Line::from(label.as_str())).text_value(String::new())
            })
            .collect();

        let chart = widgets::BarChart::default()
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .max(max)
            .bar_width(1)
            .bar_gap(0);

        draw(chart, cells(label_width + 1 + self.width), cells(self.bars.len()))
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for line in self.render_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
