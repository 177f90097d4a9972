//! Visualization utilities for dubins_velocity
//!
//! Plots steering trajectories with gnuplot from the (x, y, velocity)
//! tuples a `DynamicalSystem` projects for display.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Pose2D, SteeringError, SteeringResult};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const VELOCITY: &str = "#35C788";
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(colors::PATH, "Trajectory")
    }
}

enum Series {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: PathStyle,
    },
    Marker {
        x: f64,
        y: f64,
        caption: String,
        color: String,
    },
}

/// Gnuplot figure for steering results.
///
/// Series are buffered and drawn onto a single set of axes when saved.
pub struct Visualizer {
    series: Vec<Series>,
    title: String,
    x_label: String,
    y_label: String,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) -> &mut Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Plot projected (x, y, velocity) samples as a path in the plane
    pub fn plot_display_path(&mut self, samples: &[(f64, f64, f64)], style: &PathStyle) -> &mut Self {
        self.series.push(Series::Line {
            x: samples.iter().map(|s| s.0).collect(),
            y: samples.iter().map(|s| s.1).collect(),
            style: style.clone(),
        });
        self
    }

    /// Plot a pose as a point with a heading tick
    pub fn plot_pose(&mut self, pose: &Pose2D, caption: &str, color: &str) -> &mut Self {
        let tick = 1.0;
        self.series.push(Series::Marker {
            x: pose.x,
            y: pose.y,
            caption: caption.to_string(),
            color: color.to_string(),
        });
        self.series.push(Series::Line {
            x: vec![pose.x, pose.x + tick * pose.yaw.cos()],
            y: vec![pose.y, pose.y + tick * pose.yaw.sin()],
            style: PathStyle::new(color, ""),
        });
        self
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> SteeringResult<()> {
        self.render()
            .save_to_png(path, width, height)
            .map_err(|e| SteeringError::VisualizationError(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&self, path: &str) -> SteeringResult<()> {
        self.render()
            .save_to_svg(path, 800, 600)
            .map_err(|e| SteeringError::VisualizationError(e.to_string()))
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for series in &self.series {
            match series {
                Series::Line { x, y, style } if style.caption.is_empty() => {
                    axes.lines(x, y, &[Color(&style.color), LineWidth(style.line_width)]);
                }
                Series::Line { x, y, style } => {
                    axes.lines(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                Series::Marker { x, y, caption, color } => {
                    axes.points(&[*x], &[*y], &[
                        Caption(caption),
                        Color(color),
                        PointSymbol('O'),
                        PointSize(1.5),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cumulative arc length against velocity for projected samples
pub fn velocity_profile(samples: &[(f64, f64, f64)]) -> Vec<(f64, f64)> {
    let mut travelled = 0.0;
    let mut previous: Option<(f64, f64)> = None;
    samples
        .iter()
        .map(|&(x, y, v)| {
            if let Some((px, py)) = previous {
                travelled += ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            }
            previous = Some((x, y));
            (travelled, v)
        })
        .collect()
}
