//! Chart output
//!
//! Analyses describe a chart as already aggregated data ([`Chart`]) and hand
//! it to a [`ChartSink`]. [`SvgChartSink`] draws it with plotters into
//! `<output dir>/<name>.svg`, replacing any previous file of that name.

use std::{
    error::Error,
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::{coord::Shift, prelude::*};

const CHART_SIZE: (u32, u32) = (1000, 600);

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Unconnected points, optionally on a log10 x axis
    Scatter { points: Vec<(f64, f64)>, log_x: bool },
    /// Points joined in x order
    Line { points: Vec<(f64, f64)> },
    /// One bar per labeled value, in the given order
    Bar { bars: Vec<(String, f64)> },
}

impl ChartData {
    fn is_empty(&self) -> bool {
        match self {
            ChartData::Scatter { points, .. } | ChartData::Line { points } => points.is_empty(),
            ChartData::Bar { bars } => bars.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Destination name, without extension
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ChartError {
    #[display("cannot create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("cannot draw chart {name}: {message}")]
    Draw {
        name: String,
        message: String,
    },
}

/// Receives finished charts
pub trait ChartSink {
    /// Renders `chart`, returning where it was written if anywhere.
    fn render(&self, chart: &Chart) -> Result<Option<PathBuf>, ChartError>;
}

/// Writes charts as SVG files into one directory
#[derive(Debug, Clone)]
pub struct SvgChartSink {
    output_dir: PathBuf,
}

impl SvgChartSink {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn path_of(&self, chart: &Chart) -> PathBuf {
        self.output_dir.join(format!("{}.svg", chart.name))
    }
}

impl ChartSink for SvgChartSink {
    fn render(&self, chart: &Chart) -> Result<Option<PathBuf>, ChartError> {
        if chart.data.is_empty() {
            tracing::info!(chart = %chart.name, "nothing to plot");
            return Ok(None);
        }
        fs::create_dir_all(&self.output_dir).map_err(|source| ChartError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.path_of(chart);
        draw(&path, chart).map_err(|err| ChartError::Draw {
            name: chart.name.clone(),
            message: err.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "chart written");
        Ok(Some(path))
    }
}

fn draw(path: &Path, chart: &Chart) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    match &chart.data {
        ChartData::Scatter { points, log_x } => draw_xy(&root, chart, points, *log_x, false)?,
        ChartData::Line { points } => draw_xy(&root, chart, points, false, true)?,
        ChartData::Bar { bars } => draw_bars(&root, chart, bars)?,
    }
    root.present()?;
    Ok(())
}

fn draw_xy(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &Chart,
    points: &[(f64, f64)],
    log_x: bool,
    joined: bool,
) -> Result<(), Box<dyn Error>> {
    // log axes are drawn on log10(x); non-positive x cannot be shown
    let mut points = if log_x {
        points
            .iter()
            .filter(|(x, _)| *x > 0.0)
            .map(|(x, y)| (x.log10(), *y))
            .collect::<Vec<_>>()
    } else {
        points.to_vec()
    };
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let x_range = padded_range(points.iter().map(|(x, _)| *x));
    let y_range = padded_range(points.iter().map(|(_, y)| *y));
    let x_desc = if log_x {
        format!("{} (log scale)", chart.x_label)
    } else {
        chart.x_label.clone()
    };
    let log_ticks = |v: &f64| format_tick(10_f64.powf(*v));
    let linear_ticks = |v: &f64| format_tick(*v);
    let x_ticks: &dyn Fn(&f64) -> String = if log_x { &log_ticks } else { &linear_ticks };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)?;
    ctx.configure_mesh()
        .x_desc(x_desc)
        .y_desc(&chart.y_label)
        .x_label_formatter(x_ticks)
        .y_label_formatter(&linear_ticks)
        .draw()?;

    if joined {
        ctx.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    }
    let marker = if joined {
        BLUE.filled()
    } else {
        BLUE.mix(0.5).filled()
    };
    ctx.draw_series(
        points
            .iter()
            .map(|point| Circle::new(*point, 3, marker)),
    )?;
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn draw_bars(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &Chart,
    bars: &[(String, f64)],
) -> Result<(), Box<dyn Error>> {
    let lowest = bars.iter().map(|(_, v)| *v).fold(0.0, f64::min);
    let highest = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let y_range = padded_range([lowest, highest]);
    let x_range = -0.5..(bars.len() as f64 - 0.5);

    let bar_label = |v: &f64| {
        let index = v.round();
        if (v - index).abs() > 0.01 || index < 0.0 {
            return String::new();
        }
        bars.get(index as usize)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    };
    let value_ticks = |v: &f64| format_tick(*v);

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(64)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .x_label_formatter(&bar_label)
        .y_label_formatter(&value_ticks)
        .draw()?;

    ctx.draw_series(bars.iter().enumerate().map(|(index, (_, value))| {
        let center = index as f64;
        Rectangle::new([(center - 0.4, 0.0), (center + 0.4, *value)], BLUE.filled())
    }))?;
    Ok(())
}

/// Value range with a 5% margin; degenerate ranges are widened by 1
fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - span * 0.05)..(hi + span * 0.05)
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 || (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Keeps charts in memory instead of drawing them
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub charts: RefCell<Vec<Chart>>,
    }

    impl RecordingSink {
        pub(crate) fn names(&self) -> Vec<String> {
            self.charts
                .borrow()
                .iter()
                .map(|chart| chart.name.clone())
                .collect()
        }
    }

    impl ChartSink for RecordingSink {
        fn render(&self, chart: &Chart) -> Result<Option<PathBuf>, ChartError> {
            self.charts.borrow_mut().push(chart.clone());
            Ok(None)
        }
    }

    fn chart(name: &str, data: ChartData) -> Chart {
        Chart {
            name: name.to_owned(),
            title: "Title".to_owned(),
            x_label: "X".to_owned(),
            y_label: "Y".to_owned(),
            data,
        }
    }

    #[test]
    fn test_svg_sink_writes_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SvgChartSink::new(dir.path().join("charts"));
        let points = vec![(1.0, 2.0), (10.0, 5.0), (100.0, 3.0), (0.0, 9.0)];
        let charts = [
            chart(
                "scatter",
                ChartData::Scatter {
                    points: points.clone(),
                    log_x: true,
                },
            ),
            chart("line", ChartData::Line { points }),
            chart(
                "bar",
                ChartData::Bar {
                    bars: vec![("Monday".to_owned(), 3.0), ("Tuesday".to_owned(), -1.0)],
                },
            ),
        ];
        for chart in &charts {
            let path = sink.render(chart).unwrap().unwrap();
            assert_eq!(path, dir.path().join("charts").join(format!("{}.svg", chart.name)));
            let svg = fs::read_to_string(&path).unwrap();
            assert!(svg.contains("<svg"), "{} is not an svg", path.display());
        }
    }

    #[test]
    fn test_svg_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SvgChartSink::new(dir.path());
        let line = chart(
            "yearly",
            ChartData::Line {
                points: vec![(2020.0, 1.0), (2021.0, 1.0)],
            },
        );
        let path = sink.render(&line).unwrap().unwrap();
        fs::write(&path, "stale").unwrap();
        sink.render(&line).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "stale");
    }

    #[test]
    fn test_empty_chart_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SvgChartSink::new(dir.path());
        let empty = chart("empty", ChartData::Bar { bars: vec![] });
        assert_eq!(sink.render(&empty).unwrap(), None);
        assert!(!sink.path_of(&empty).exists());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([]), 0.0..1.0);
        assert_eq!(padded_range([5.0, 5.0]), 4.0..6.0);
        assert_eq!(padded_range([0.0, 100.0, f64::NAN]), -5.0..105.0);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(3.0), "3");
        assert_eq!(format_tick(2.5), "2.50");
        assert_eq!(format_tick(12_345.6), "12346");
    }
}
