use ratatui::{
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
};
use std::fmt;

use crate::view::{cells, draw};

/// Scatter plot of (latitude, longitude) points, north at the top.
///
/// Axis bounds are fitted to the points and labelled with their extremes.
#[derive(Debug, Clone)]
pub struct PointMap {
    points: Vec<(f64, f64)>,
    width: usize,
    height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn fit(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        if max - min < f64::EPSILON {
            // A single location still gets a visible area around it.
            return Some(Self { min: min - 1.0, max: max + 1.0 });
        }
        Some(Self { min, max })
    }

    fn axis(&self) -> Axis<'static> {
        Axis::default()
            .bounds([self.min, self.max])
            .labels([format!("{:.2}", self.min), format!("{:.2}", self.max)])
    }
}

impl PointMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { points: Vec::new(), width: width.max(8), height: height.max(6) }
    }

    pub fn points(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.points.extend(points.into_iter().filter(|(lat, lon)| lat.is_finite() && lon.is_finite()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn render_lines(&self) -> Vec<String> {
        let (Some(lat), Some(lon)) = (
            Bounds::fit(self.points.iter().map(|p| p.0)),
            Bounds::fit(self.points.iter().map(|p| p.1)),
        ) else {
            return Vec::new();
        };

        // Chart data is (x, y): longitude across, latitude up.
        let data: Vec<(f64, f64)> = self.points.iter().map(|(la, lo)| (*lo, *la)).collect();
        let dataset = Dataset::default().marker(Marker::Dot).graph_type(GraphType::Scatter).data(&data);

        let chart = Chart::new(vec![dataset])
            .block(Block::bordered().title("lintang / bujur"))
            .x_axis(lon.axis())
            .y_axis(lat.axis());

        draw(chart, cells(self.width), cells(self.height))
    }
}

impl fmt::Display for PointMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
