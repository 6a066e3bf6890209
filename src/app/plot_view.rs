//! Draw a [`Figure`] with `egui_plot`.

use egui::Color32;
use egui_plot::{Line, Plot, Points, VLine};

use crate::figure::{Figure, LineStyle, Rgb, SeriesKind, SeriesLook};

/// Fraction of the data range added on each side when bounds are not fixed.
const AUTO_MARGIN: f64 = 0.05;

pub(crate) fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn plot_style(look: &SeriesLook) -> egui_plot::LineStyle {
    match look.style {
        LineStyle::Solid => egui_plot::LineStyle::Solid,
        LineStyle::Dashed => egui_plot::LineStyle::Dashed { length: 6.0 },
    }
}

fn padded((lo, hi): (f64, f64), fixed: bool) -> std::ops::RangeInclusive<f64> {
    if fixed {
        lo..=hi
    } else {
        let m = (hi - lo) * AUTO_MARGIN;
        lo - m..=hi + m
    }
}

/// Show `figure` in `ui`. The view is pinned to the figure's bounds; panning and
/// zooming are off since every redraw replaces the whole figure.
pub fn show_figure(ui: &mut egui::Ui, id: &str, figure: &Figure) -> egui_plot::PlotResponse<()> {
    let mut plot = Plot::new(id)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);
    if let Some(label) = &figure.x_label {
        plot = plot.x_axis_label(label.clone());
    }
    if let Some(label) = &figure.y_label {
        plot = plot.y_axis_label(label.clone());
    }

    let (xr, yr) = figure.view_bounds();
    let x_range = padded(xr, figure.x_limits.is_some());
    let y_range = padded(yr, figure.y_limits.is_some());

    plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds_x(x_range);
        plot_ui.set_plot_bounds_y(y_range);

        for s in &figure.series {
            let color = color32(s.look.color);
            match &s.kind {
                SeriesKind::Line(pts) => {
                    plot_ui.line(
                        Line::new(s.name.as_str(), pts.clone())
                            .color(color)
                            .width(s.look.width)
                            .style(plot_style(&s.look)),
                    );
                }
                SeriesKind::Scatter(pts) => {
                    plot_ui.points(
                        Points::new(s.name.as_str(), pts.clone())
                            .radius(s.look.marker_radius)
                            .shape(egui_plot::MarkerShape::Circle)
                            .filled(true)
                            .color(color),
                    );
                }
                SeriesKind::Segment(seg) => {
                    plot_ui.line(
                        Line::new(s.name.as_str(), seg.to_vec())
                            .color(color)
                            .width(s.look.width)
                            .style(plot_style(&s.look)),
                    );
                }
                SeriesKind::VLine(x) => {
                    plot_ui.vline(
                        VLine::new(s.name.as_str(), *x)
                            .color(color)
                            .width(s.look.width)
                            .style(plot_style(&s.look)),
                    );
                }
            }
        }
    })
}
