//! Top-level entry point for running a demo as a native window.

use eframe::egui;

use crate::config::SlidePlotConfig;
use crate::demos::{BiasDemo, Demo, DemoKind, GuessDemo};
use crate::persistence::SessionSerde;

use super::demo_app::DemoApp;

/// Window icon: a step function on a rounded tile.
const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<rect x="2" y="2" width="60" height="60" rx="10" fill="#3F9999"/>
<path d="M10 46 H32 V18 H54" fill="none" stroke="#FFFFFF" stroke-width="5" stroke-linecap="round" stroke-linejoin="round"/>
</svg>"##;

/// Launch `kind` in a native window, optionally restoring a saved session.
///
/// Blocks until the window is closed.
pub fn run_demo(
    kind: DemoKind,
    cfg: SlidePlotConfig,
    session: Option<SessionSerde>,
) -> eframe::Result<()> {
    match kind {
        DemoKind::Bias => run_with(BiasDemo::from_config(&cfg), cfg, session),
        DemoKind::Guess => run_with(GuessDemo::from_config(&cfg), cfg, session),
    }
}

fn run_with<D: Demo>(
    demo: D,
    mut cfg: SlidePlotConfig,
    session: Option<SessionSerde>,
) -> eframe::Result<()> {
    log::info!("starting {} demo", demo.name());
    let demo_kind = demo.kind();
    let app = DemoApp::new(demo, &cfg, session);

    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }
    if opts.viewport.inner_size.is_none() {
        let (w, h) = cfg.pixel_size_for(demo_kind);
        let size = egui::vec2((w as f32).max(800.0), (h as f32).max(300.0) + 120.0);
        opts.viewport = opts.viewport.clone().with_inner_size(size);
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    match crate::svg::rasterize_png(ICON_SVG, 1.0) {
        Ok(img) => Some(egui::IconData {
            width: img.width(),
            height: img.height(),
            rgba: img.into_raw(),
        }),
        Err(e) => {
            log::debug!("no window icon: {e}");
            None
        }
    }
}
