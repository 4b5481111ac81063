use ratatui::{
    layout::Constraint,
    widgets::{self, Block, Row},
};
use std::fmt;

use crate::view::{cells, draw};

const DEFAULT_MAX_CELL_WIDTH: usize = 48;
const COLUMN_SPACING: usize = 2;

/// A bordered table with left-aligned columns sized to their widest cell.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_cell_width: usize,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }

    /// Columns never grow past `width` characters; longer cells are cut.
    pub fn max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width.max(1);
        self
    }

    /// Add a row. Missing cells render empty, extra cells are dropped.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().take(self.headers.len()).map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(self.max_cell_width)
            })
            .collect()
    }

    fn render_lines(&self) -> Vec<String> {
        let widths = self.column_widths();
        let inner = widths.iter().sum::<usize>() + COLUMN_SPACING * widths.len().saturating_sub(1);

        let table = widgets::Table::new(
            self.rows.iter().map(|row| Row::new(row.clone())),
            widths.iter().map(|w| Constraint::Length(cells(*w))),
        )
        .header(Row::new(self.headers.clone()))
        .column_spacing(cells(COLUMN_SPACING))
        .block(Block::bordered());

        draw(table, cells(inner + 2), cells(self.rows.len() + 3))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
