use serde::{Deserialize, Serialize};

/// How hover information is gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// One tooltip listing, for every series, its point nearest the hovered x.
    #[default]
    XUnified,
    /// Tooltip for the nearest point only.
    Closest,
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 10.0,
            top: 40.0,
            bottom: 40.0,
        }
    }
}

/// Appearance of the annotation bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandStyle {
    /// sRGB fill colour.
    pub fill: [u8; 3],
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Draw behind the data lines.
    pub below: bool,
    pub line_width: f32,
}

impl Default for BandStyle {
    fn default() -> Self {
        // light grey, half transparent, borderless
        Self {
            fill: [211, 211, 211],
            opacity: 0.5,
            below: true,
            line_width: 0.0,
        }
    }
}

/// Static layout parameters of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Plot height in pixels.
    pub height: f32,
    pub hover: HoverMode,
    pub margin: Margin,
    pub band_style: BandStyle,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            title: "Tumour growth kinetics".to_string(),
            x_title: "Days".to_string(),
            y_title: "Tumour Volume (mm³)".to_string(),
            height: 800.0,
            hover: HoverMode::XUnified,
            margin: Margin::default(),
            band_style: BandStyle::default(),
        }
    }
}
