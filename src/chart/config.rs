// ---------------------------------------------------------------------------
// Chart layout configuration
// ---------------------------------------------------------------------------

/// Space between the canvas edge and the plot area, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            left: 50.0,
            bottom: 40.0,
            right: 20.0,
            top: 10.0,
        }
    }
}

/// Immutable chart layout, built once at startup and handed to the model and
/// the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Full canvas size including margins.
    pub width: f32,
    pub height: f32,
    pub margin: Margin,

    pub x_title: String,
    pub y_title: String,

    /// Approximate number of ticks per axis.
    pub x_ticks: usize,
    pub y_ticks: usize,

    /// Hover marker radius.
    pub marker_radius: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 400.0,
            margin: Margin::default(),
            x_title: "Date".to_string(),
            y_title: "Snow-Water Equivalent (Inches)".to_string(),
            x_ticks: 10,
            y_ticks: 10,
            marker_radius: 4.5,
        }
    }
}

impl ChartConfig {
    /// Width of the plot area (canvas minus horizontal margins).
    pub fn plot_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plot area (canvas minus vertical margins).
    pub fn plot_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }
}
