//! Renderer-neutral figure model.
//!
//! A `Figure` is what a visualizer's redraw produces: a list of styled series plus
//! axis decorations. The egui front end, the SVG writer and tests all consume the
//! same value, so nothing downstream ever needs to look at `ViewState` directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SlidePlotError;

/// An opaque sRGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = SlidePlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SlidePlotError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = SlidePlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Ordered color cycle; series pick colors by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(pub Vec<Rgb>);

impl Palette {
    /// Color for the `index`-th series, wrapping around. Empty palettes fall back to black.
    pub fn color(&self, index: usize) -> Rgb {
        if self.0.is_empty() {
            Rgb::BLACK
        } else {
            self.0[index % self.0.len()]
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(vec![
            Rgb(0x91, 0xCC, 0xCC),
            Rgb(0xFF, 0x8F, 0xA9),
            Rgb(0xCC, 0x91, 0xBC),
            Rgb(0x3F, 0x99, 0x99),
            Rgb(0xA5, 0xFF, 0xB8),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Visual presentation of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLook {
    pub color: Rgb,
    pub width: f32,
    pub style: LineStyle,
    /// Marker radius in points; only used by scatter series.
    pub marker_radius: f32,
}

impl SeriesLook {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            width: 1.5,
            style: LineStyle::Solid,
            marker_radius: 3.0,
        }
    }

    pub fn dashed(color: Rgb) -> Self {
        Self {
            style: LineStyle::Dashed,
            ..Self::solid(color)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    /// Polyline through the points in order.
    Line(Vec<[f64; 2]>),
    /// Unconnected markers.
    Scatter(Vec<[f64; 2]>),
    /// A single straight segment between two points.
    Segment([[f64; 2]; 2]),
    /// Vertical line spanning the whole plot at the given x.
    VLine(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub look: SeriesLook,
}

impl Series {
    pub fn new(name: impl Into<String>, kind: SeriesKind, look: SeriesLook) -> Self {
        Self {
            name: name.into(),
            kind,
            look,
        }
    }

    /// Data points of this series (a vertical line has none).
    pub fn points(&self) -> &[[f64; 2]] {
        match &self.kind {
            SeriesKind::Line(p) | SeriesKind::Scatter(p) => p.as_slice(),
            SeriesKind::Segment(p) => p.as_slice(),
            SeriesKind::VLine(_) => &[],
        }
    }
}

/// One complete redraw: axis decorations plus series drawn in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Fixed x range; `None` fits the data.
    pub x_limits: Option<(f64, f64)>,
    /// Fixed y range; `None` fits the data.
    pub y_limits: Option<(f64, f64)>,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn series_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Series> + 'a {
        self.series.iter().filter(move |s| s.name == name)
    }

    /// X positions of every vertical marker.
    pub fn vlines(&self) -> Vec<f64> {
        self.series
            .iter()
            .filter_map(|s| match s.kind {
                SeriesKind::VLine(x) => Some(x),
                _ => None,
            })
            .collect()
    }

    /// Endpoints of every straight segment.
    pub fn segments(&self) -> Vec<[[f64; 2]; 2]> {
        self.series
            .iter()
            .filter_map(|s| match s.kind {
                SeriesKind::Segment(seg) => Some(seg),
                _ => None,
            })
            .collect()
    }

    /// Axis ranges to display: fixed limits where given, otherwise the finite data
    /// extent (vertical markers extend x). Degenerate ranges are widened by 0.5 each way.
    pub fn view_bounds(&self) -> ((f64, f64), (f64, f64)) {
        let mut xr = (f64::INFINITY, f64::NEG_INFINITY);
        let mut yr = (f64::INFINITY, f64::NEG_INFINITY);
        for s in &self.series {
            if let SeriesKind::VLine(x) = s.kind {
                extend(&mut xr, x);
            }
            for p in s.points() {
                extend(&mut xr, p[0]);
                extend(&mut yr, p[1]);
            }
        }
        (
            self.x_limits.unwrap_or_else(|| widen(xr)),
            self.y_limits.unwrap_or_else(|| widen(yr)),
        )
    }
}

fn extend(r: &mut (f64, f64), v: f64) {
    if v.is_finite() {
        r.0 = r.0.min(v);
        r.1 = r.1.max(v);
    }
}

fn widen(r: (f64, f64)) -> (f64, f64) {
    if !r.0.is_finite() || !r.1.is_finite() {
        (0.0, 1.0)
    } else if r.1 - r.0 <= f64::EPSILON {
        (r.0 - 0.5, r.1 + 0.5)
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_hex() {
        assert_eq!("#91CCCC".parse::<Rgb>().unwrap(), Rgb(0x91, 0xCC, 0xCC));
        assert_eq!(" #ff8fa9 ".parse::<Rgb>().unwrap(), Rgb(0xFF, 0x8F, 0xA9));
        assert!("91CCCC".parse::<Rgb>().is_err());
        assert!("#91CC".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn palette_wraps() {
        let p = Palette::default();
        assert_eq!(p.color(0), p.color(5));
        assert_eq!(Palette(vec![]).color(3), Rgb::BLACK);
    }

    #[test]
    fn view_bounds_prefers_limits_and_includes_vlines() {
        let mut fig = Figure::new();
        fig.push(Series::new(
            "pts",
            SeriesKind::Scatter(vec![[1.0, 2.0], [3.0, 4.0]]),
            SeriesLook::solid(Rgb::BLACK),
        ));
        fig.push(Series::new("m", SeriesKind::VLine(10.0), SeriesLook::dashed(Rgb::BLACK)));
        assert_eq!(fig.view_bounds(), ((1.0, 10.0), (2.0, 4.0)));

        fig.x_limits = Some((-5.0, 5.0));
        assert_eq!(fig.view_bounds().0, (-5.0, 5.0));
    }

    #[test]
    fn view_bounds_of_single_point_is_widened() {
        let mut fig = Figure::new();
        fig.push(Series::new(
            "pts",
            SeriesKind::Scatter(vec![[50.0, 0.5]]),
            SeriesLook::solid(Rgb::BLACK),
        ));
        assert_eq!(fig.view_bounds(), ((49.5, 50.5), (0.0, 1.0)));
    }
}
