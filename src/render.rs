//! Scatter rendering of latency distributions.
//!
//! Rendering is a side-effecting, terminal operation; [`summarize`] and
//! the rest of the statistical core never depend on it.
//!
//! [`summarize`]: crate::analyze::summarize

use std::path::PathBuf;

use anyhow::anyhow;
use plotters::prelude::*;

use crate::analyze::{BenchmarkRecord, Method, durations};

/// Renders the latency distribution of an execution log.
pub trait Renderer {
    /// Draws one series per method; succeeds or fails with an I/O or
    /// drawing error.
    fn render(&self, records: &[BenchmarkRecord]) -> anyhow::Result<()>;
}

/// Writes one scatter chart per method as `<stem>-put.png` and
/// `<stem>-get.png`.
///
/// The x-axis is the request index within its method group in insertion
/// order, the y-axis the duration in nanoseconds.
#[derive(Debug)]
pub struct PlottersRenderer {
    stem: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    /// Creates a renderer writing 800x600 charts next to `stem`.
    pub fn new(stem: impl Into<PathBuf>) -> Self {
        Self {
            stem: stem.into(),
            width: 800,
            height: 600,
        }
    }

    fn path_for(&self, method: &str) -> PathBuf {
        PathBuf::from(format!("{}-{method}.png", self.stem.display()))
    }

    fn chart(&self, method: &str, title: &str, points: &[u64], color: RGBColor) -> anyhow::Result<()> {
        let path = self.path_for(method);
        let root = BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|err| anyhow!("failed to fill chart background: {err}"))?;

        let x_max = points.len().max(1) as u64;
        let y_max = points.iter().copied().max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(80)
            .build_cartesian_2d(0u64..x_max, 0u64..y_max)
            .map_err(|err| anyhow!("failed to build chart: {err}"))?;

        chart
            .configure_mesh()
            .x_desc("Request Number")
            .y_desc("Latency (nanoseconds)")
            .axis_desc_style(("sans-serif", 20))
            .draw()
            .map_err(|err| anyhow!("failed to draw chart mesh: {err}"))?;

        chart
            .draw_series(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, &dur)| Circle::new((i as u64, dur), 3, color.filled())),
            )
            .map_err(|err| anyhow!("failed to draw latency series: {err}"))?;

        root.present()
            .map_err(|err| anyhow!("failed to write chart to {}: {err}", path.display()))?;
        Ok(())
    }
}

impl Renderer for PlottersRenderer {
    fn render(&self, records: &[BenchmarkRecord]) -> anyhow::Result<()> {
        self.chart(
            "put",
            "Put Latencies",
            &durations(records, Method::Put),
            RED,
        )?;
        self.chart(
            "get",
            "Get Latencies",
            &durations(records, Method::Get),
            BLUE,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::BenchmarkRecord;

    #[test]
    fn writes_one_chart_per_method() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bench");

        let records = [
            BenchmarkRecord {
                method: Method::Put,
                dur: 2_000_000,
                out: None,
            },
            BenchmarkRecord {
                method: Method::Get,
                dur: 1_000_000,
                out: Some(0),
            },
        ];

        PlottersRenderer::new(&stem).render(&records).unwrap();

        assert!(dir.path().join("bench-put.png").is_file());
        assert!(dir.path().join("bench-get.png").is_file());
    }
}
