//! Static export of a [`Figure`]: SVG text, rasterized to PNG with usvg/resvg.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::SlidePlotConfig;
use crate::demos::DemoKind;
use crate::error::{Result, SlidePlotError};
use crate::figure::{Figure, LineStyle, Rgb, SeriesKind, SeriesLook};

/// Page layout of an exported figure.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 200,
            background: Rgb::WHITE,
            font_family: "serif".to_string(),
            font_size: 11.0,
        }
    }
}

impl SvgOptions {
    /// Page size of `kind`'s figure as configured.
    pub fn from_config(cfg: &SlidePlotConfig, kind: DemoKind) -> Self {
        let (width, height) = cfg.pixel_size_for(kind);
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 40.0;
const TICK_LEN: f64 = 4.0;

/// Data-to-pixel mapping for the plot area.
struct Frame {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x0) / (self.x1 - self.x0) * (self.right - self.left)
    }

    fn py(&self, y: f64) -> f64 {
        self.bottom - (y - self.y0) / (self.y1 - self.y0) * (self.bottom - self.top)
    }
}

/// Render `figure` as a standalone SVG document.
///
/// Only the left and bottom spines are drawn. Auto-fitted axes get 5% padding;
/// fixed limits are used as given.
pub fn render_svg(figure: &Figure, opts: &SvgOptions) -> String {
    let ((mut x0, mut x1), (mut y0, mut y1)) = figure.view_bounds();
    if figure.x_limits.is_none() {
        let pad = (x1 - x0) * 0.05;
        x0 -= pad;
        x1 += pad;
    }
    if figure.y_limits.is_none() {
        let pad = (y1 - y0) * 0.05;
        y0 -= pad;
        y1 += pad;
    }

    let w = opts.width as f64;
    let h = opts.height as f64;
    let title_h = if figure.title.is_some() {
        opts.font_size as f64 * 1.6
    } else {
        0.0
    };
    let frame = Frame {
        x0,
        x1,
        y0,
        y1,
        left: MARGIN_LEFT,
        right: (w - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
        top: MARGIN_TOP + title_h,
        bottom: (h - MARGIN_BOTTOM).max(MARGIN_TOP + title_h + 1.0),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{}" font-size="{}">"#,
        escape(&opts.font_family),
        opts.font_size
    );
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        opts.background
    );
    let _ = writeln!(
        out,
        r#"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
        frame.left,
        frame.top,
        frame.right - frame.left,
        frame.bottom - frame.top
    );

    write_axes(&mut out, figure, &frame, opts);

    out.push_str("<g clip-path=\"url(#plot-area)\">\n");
    for s in &figure.series {
        write_series(&mut out, &s.kind, &s.look, &frame);
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn write_axes(out: &mut String, figure: &Figure, f: &Frame, opts: &SvgOptions) {
    let _ = writeln!(
        out,
        r#"<path class="spine" d="M{:.2},{:.2} L{:.2},{:.2} L{:.2},{:.2}" fill="none" stroke="black" stroke-width="1"/>"#,
        f.left, f.top, f.left, f.bottom, f.right, f.bottom
    );
    for t in nice_ticks(f.x0, f.x1, 6) {
        let x = f.px(t);
        let _ = writeln!(
            out,
            r#"<line class="tick" x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="black"/>"#,
            f.bottom,
            f.bottom + TICK_LEN
        );
        let _ = writeln!(
            out,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            f.bottom + TICK_LEN + opts.font_size as f64,
            format_tick(t, f.x1 - f.x0)
        );
    }
    for t in nice_ticks(f.y0, f.y1, 5) {
        let y = f.py(t);
        let _ = writeln!(
            out,
            r#"<line class="tick" x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="black"/>"#,
            f.left - TICK_LEN,
            f.left
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            f.left - TICK_LEN - 2.0,
            y + opts.font_size as f64 * 0.35,
            format_tick(t, f.y1 - f.y0)
        );
    }
    if let Some(label) = &figure.x_label {
        let _ = writeln!(
            out,
            r#"<text class="xlabel" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            (f.left + f.right) / 2.0,
            f.bottom + TICK_LEN + opts.font_size as f64 * 2.4,
            escape(label)
        );
    }
    if let Some(label) = &figure.y_label {
        let cx = opts.font_size as f64;
        let cy = (f.top + f.bottom) / 2.0;
        let _ = writeln!(
            out,
            r#"<text class="ylabel" x="{cx:.2}" y="{cy:.2}" text-anchor="middle" transform="rotate(-90 {cx:.2} {cy:.2})">{}</text>"#,
            escape(label)
        );
    }
    if let Some(title) = &figure.title {
        let _ = writeln!(
            out,
            r#"<text class="title" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            (f.left + f.right) / 2.0,
            MARGIN_TOP + opts.font_size as f64,
            escape(title)
        );
    }
}

fn stroke_attrs(look: &SeriesLook) -> String {
    let dash = match look.style {
        LineStyle::Solid => String::new(),
        LineStyle::Dashed => format!(
            r#" stroke-dasharray="{:.1},{:.1}""#,
            look.width * 4.0,
            look.width * 2.5
        ),
    };
    format!(
        r#"stroke="{}" stroke-width="{:.2}" fill="none"{}"#,
        look.color, look.width, dash
    )
}

fn write_series(out: &mut String, kind: &SeriesKind, look: &SeriesLook, f: &Frame) {
    match kind {
        SeriesKind::Line(points) => {
            let mut pts = String::new();
            for p in points.iter().filter(|p| p[0].is_finite() && p[1].is_finite()) {
                let _ = write!(pts, "{:.2},{:.2} ", f.px(p[0]), f.py(p[1]));
            }
            let _ = writeln!(
                out,
                r#"<polyline class="line" points="{}" {}/>"#,
                pts.trim_end(),
                stroke_attrs(look)
            );
        }
        SeriesKind::Scatter(points) => {
            for p in points.iter().filter(|p| p[0].is_finite() && p[1].is_finite()) {
                let _ = writeln!(
                    out,
                    r#"<circle class="point" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                    f.px(p[0]),
                    f.py(p[1]),
                    look.marker_radius,
                    look.color
                );
            }
        }
        SeriesKind::Segment([a, b]) => {
            let _ = writeln!(
                out,
                r#"<line class="segment" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
                f.px(a[0]),
                f.py(a[1]),
                f.px(b[0]),
                f.py(b[1]),
                stroke_attrs(look)
            );
        }
        SeriesKind::VLine(x) => {
            let px = f.px(*x);
            let _ = writeln!(
                out,
                r#"<line class="vline" x1="{px:.2}" y1="{:.2}" x2="{px:.2}" y2="{:.2}" {}/>"#,
                f.top,
                f.bottom,
                stroke_attrs(look)
            );
        }
    }
}

/// Round tick positions covering `[lo, hi]`, about `target` of them.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let range = hi - lo;
    if !(range.is_finite() && range > 0.0) || target == 0 {
        return Vec::new();
    }
    let raw = range / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn format_tick(v: f64, range: f64) -> String {
    let decimals = if range >= 5.0 {
        0
    } else {
        (-(range / 5.0).log10()).ceil().clamp(0.0, 6.0) as usize
    };
    let s = format!("{:.*}", decimals, v);
    // avoid "-0"
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rasterize an SVG document at `scale`, using system fonts for text.
pub fn rasterize_png(svg: &str, scale: f32) -> Result<image::RgbaImage> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size().scale_by(scale).ok_or_else(|| {
        SlidePlotError::Render(format!("invalid raster scale {}", scale))
    })?;
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| SlidePlotError::Render("zero-sized figure".to_string()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(size.width(), size.height(), rgba)
        .ok_or_else(|| SlidePlotError::Render("pixel buffer size mismatch".to_string()))
}

pub fn save_png(image: &image::RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SlidePlotError::Render(format!("saving {:?}: {}", path, e)))
}

/// Export a figure to `path`, as PNG when the extension is `png` and SVG otherwise.
pub fn export_figure(figure: &Figure, path: &Path, opts: &SvgOptions) -> Result<()> {
    let svg = render_svg(figure, opts);
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if is_png {
        let img = rasterize_png(&svg, 1.0)?;
        save_png(&img, path)?;
    } else {
        std::fs::write(path, svg).map_err(|e| SlidePlotError::io(path, e))?;
    }
    log::info!("exported figure to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_round_numbers_inside_range() {
        assert_eq!(nice_ticks(-5.0, 5.0, 6), vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
        assert_eq!(nice_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
    }

    #[test]
    fn tick_labels_drop_negative_zero() {
        assert_eq!(format_tick(-0.0, 10.0), "0");
        assert_eq!(format_tick(0.5, 1.0), "0.5");
        assert_eq!(format_tick(40.0, 100.0), "40");
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
