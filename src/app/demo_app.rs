//! eframe application hosting one demo session.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use eframe::egui;
use egui::Visuals;
use egui_phosphor::regular::{FLOPPY_DISK, FOLDER_OPEN, IMAGE};

use crate::config::{SlidePlotConfig, Theme};
use crate::demos::{Control, Demo};
use crate::events::UiEvent;
use crate::figure::Figure;
use crate::persistence::{load_session_from_path, save_session_to_path, SessionSerde};
use crate::sink::channel_figures;
use crate::svg::{export_figure, SvgOptions};
use crate::visualizer::{DemoSession, Visualizer};

use super::plot_view::show_figure;

/// Window front end: turns widget interaction into [`UiEvent`]s and shows the
/// latest figure the session emitted.
pub struct DemoApp<D: Demo> {
    session: DemoSession<D>,
    figures: Receiver<Figure>,
    current: Figure,
    controls: Vec<Control>,
    /// Current position of each slider, indexed like `controls`.
    slider_values: Vec<f64>,
    svg_options: SvgOptions,
    headline: Option<String>,
    theme: Theme,
    theme_applied: bool,
    status: Option<String>,
}

impl<D: Demo> DemoApp<D> {
    pub fn new(demo: D, cfg: &SlidePlotConfig, session: Option<SessionSerde>) -> Self {
        let (sink, figures) = channel_figures();
        let controls = demo.controls();
        let mut vis = Visualizer::new(demo, sink);
        let mut status = None;
        if let Some(saved) = session {
            if let Err(e) = saved.apply_to(&mut vis) {
                log::warn!("ignoring session: {e}");
                status = Some(e.to_string());
            }
        }
        let session = DemoSession::new(vis);

        let slider_values = controls
            .iter()
            .map(|c| match c {
                Control::Slider { initial, .. } => *initial,
                Control::Button { .. } => 0.0,
            })
            .collect();

        let svg_options = SvgOptions::from_config(cfg, session.visualizer.demo().kind());
        let mut app = Self {
            current: session.visualizer.figure(),
            session,
            figures,
            controls,
            slider_values,
            svg_options,
            headline: cfg.headline.clone(),
            theme: cfg.theme,
            theme_applied: false,
            status,
        };
        app.drain_figures();
        app.sync_sliders();
        app
    }

    fn drain_figures(&mut self) {
        while let Ok(fig) = self.figures.try_recv() {
            self.current = fig;
        }
    }

    /// Move every slider to the position the current state implies.
    fn sync_sliders(&mut self) {
        let vis = &self.session.visualizer;
        for (c, v) in self.controls.iter().zip(self.slider_values.iter_mut()) {
            if let Control::Slider { widget, .. } = c {
                if let Some(pos) = vis.demo().slider_position(vis.state(), widget) {
                    *v = pos;
                }
            }
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) -> Vec<UiEvent> {
        let mut events = Vec::new();
        for (control, value) in self.controls.iter().zip(self.slider_values.iter_mut()) {
            match control {
                Control::Slider {
                    widget,
                    label,
                    range,
                    commit_on_release,
                    ..
                } => {
                    ui.label(*label);
                    let resp = ui.add(
                        egui::Slider::new(value, range.0..=range.1)
                            .show_value(true)
                            .clamping(egui::SliderClamping::Always),
                    );
                    events.extend(slider_events(
                        widget,
                        *value,
                        *commit_on_release,
                        SliderActivity::from_response(&resp),
                    ));
                }
                Control::Button { widget, label } => {
                    if ui.button(*label).clicked() {
                        events.push(UiEvent::click(*widget));
                    }
                }
            }
        }
        events
    }

    fn file_buttons_ui(&mut self, ui: &mut egui::Ui) {
        if ui.button(format!("{IMAGE} Export figure")).clicked() {
            self.prompt_and_export_figure();
        }
        if ui.button(format!("{FLOPPY_DISK} Save session")).clicked() {
            self.prompt_and_save_session();
        }
        if ui.button(format!("{FOLDER_OPEN} Load session")).clicked() {
            self.prompt_and_load_session();
        }
    }

    fn file_stem(&self) -> String {
        format!("slideplot-{}", self.session.visualizer.demo().name())
    }

    fn report(&mut self, result: crate::error::Result<PathBuf>, what: &str) {
        self.status = Some(match result {
            Ok(path) => format!("{what} {}", path.display()),
            Err(e) => {
                log::error!("{what} failed: {e}");
                format!("{what} failed: {e}")
            }
        });
    }

    /// Show a file dialog and write the current figure as SVG or PNG.
    fn prompt_and_export_figure(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.svg", self.file_stem()))
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file()
        {
            let res = export_figure(&self.current, &path, &self.svg_options).map(|_| path);
            self.report(res, "Exported");
        }
    }

    fn prompt_and_save_session(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", self.file_stem()))
            .add_filter("JSON", &["json"])
            .save_file()
        {
            let res = save_session_to_path(&self.session.visualizer, &path).map(|_| path);
            self.report(res, "Saved session to");
        }
    }

    fn prompt_and_load_session(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let res = load_session_from_path(&path)
                .and_then(|s| s.apply_to(&mut self.session.visualizer))
                .map(|_| path);
            self.report(res, "Loaded session from");
            self.drain_figures();
            self.sync_sliders();
        }
    }

    fn status_text(&self) -> String {
        let st = self.session.visualizer.state();
        let mut text = format!("{} samples", st.samples().len());
        if let Some(x) = st.pending_value() {
            text.push_str(&format!(" | previewing {x:.2}"));
        }
        for (name, value) in st.parameters() {
            text.push_str(&format!(" | {name} = {value}"));
        }
        text
    }
}

/// What a slider did during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SliderActivity {
    changed: bool,
    pointer_down: bool,
    drag_stopped: bool,
    clicked: bool,
}

impl SliderActivity {
    fn from_response(resp: &egui::Response) -> Self {
        Self {
            changed: resp.changed(),
            pointer_down: resp.is_pointer_button_down_on(),
            drag_stopped: resp.drag_stopped(),
            clicked: resp.clicked(),
        }
    }
}

/// Events for one slider frame. Every value change fires `input`. With
/// `commit_on_release`, `change` fires when the pointer is released, and right
/// away for edits made without the pointer (arrow keys, the typed value box).
fn slider_events(
    widget: &str,
    value: f64,
    commit_on_release: bool,
    act: SliderActivity,
) -> Vec<UiEvent> {
    let mut events = Vec::new();
    if act.changed {
        events.push(UiEvent::input(widget, value));
    }
    let released = act.drag_stopped || act.clicked;
    let keyboard_edit = act.changed && !act.pointer_down;
    if commit_on_release && (released || keyboard_edit) {
        events.push(UiEvent::change(widget, value));
    }
    events
}

impl<D: Demo> eframe::App for DemoApp<D> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            match self.theme {
                Theme::Light => ctx.set_visuals(Visuals::light()),
                Theme::Dark => ctx.set_visuals(Visuals::dark()),
            }
            self.theme_applied = true;
        }

        let mut events = Vec::new();
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            if let Some(h) = &self.headline {
                ui.heading(h);
            }
            ui.horizontal_wrapped(|ui| {
                events = self.controls_ui(ui);
                ui.separator();
                self.file_buttons_ui(ui);
            });
        });

        for e in &events {
            if self.session.handle(e) == 0 {
                log::trace!("no handler for {} on {:?}", e.kind, e.widget);
            }
        }
        self.drain_figures();

        let status = self.status_text();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(status);
                if let Some(msg) = &self.status {
                    ui.separator();
                    ui.label(msg);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_figure(ui, "slideplot", &self.current);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::{BiasDemo, GuessDemo};
    use crate::events::EventKind;
    use crate::sink::NullSink;

    fn kinds(events: &[UiEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn drag_previews_then_release_commits() {
        let dragging = SliderActivity {
            changed: true,
            pointer_down: true,
            ..Default::default()
        };
        assert_eq!(kinds(&slider_events("g", 20.0, true, dragging)), vec![EventKind::INPUT]);

        let released = SliderActivity {
            drag_stopped: true,
            ..Default::default()
        };
        let events = slider_events("g", 20.0, true, released);
        assert_eq!(events, vec![UiEvent::change("g", 20.0)]);
    }

    #[test]
    fn arrow_key_step_commits_immediately() {
        let key = SliderActivity {
            changed: true,
            ..Default::default()
        };
        let events = slider_events("g", 51.0, true, key);
        assert_eq!(events, vec![UiEvent::input("g", 51.0), UiEvent::change("g", 51.0)]);
    }

    #[test]
    fn click_on_track_commits_once() {
        let click = SliderActivity {
            changed: true,
            clicked: true,
            drag_stopped: true,
            ..Default::default()
        };
        assert_eq!(
            kinds(&slider_events("g", 5.0, true, click)),
            vec![EventKind::INPUT, EventKind::CHANGE]
        );
    }

    #[test]
    fn live_slider_never_commits() {
        let key = SliderActivity {
            changed: true,
            ..Default::default()
        };
        assert_eq!(kinds(&slider_events("b", 150.0, false, key)), vec![EventKind::INPUT]);
        let idle = SliderActivity::default();
        assert!(slider_events("b", 150.0, false, idle).is_empty());
    }

    #[test]
    fn keyboard_edit_grows_guess_history() {
        let mut session = DemoSession::new(Visualizer::new(GuessDemo::default(), NullSink));
        let key = SliderActivity {
            changed: true,
            ..Default::default()
        };
        for e in slider_events(GuessDemo::SLIDER, 51.0, true, key) {
            session.handle(&e);
        }
        let st = session.visualizer.state();
        assert_eq!(st.pending_value(), None);
        assert_eq!(st.samples().iter().map(|s| s.x).collect::<Vec<_>>(), vec![50.0, 51.0]);
    }

    #[test]
    fn restored_bias_moves_its_slider() {
        let mut saved = Visualizer::new(BiasDemo::default(), NullSink);
        saved.set_param(BiasDemo::BIAS, 1.5).unwrap();
        let session = SessionSerde::capture(&saved);

        let app = DemoApp::new(BiasDemo::default(), &SlidePlotConfig::default(), Some(session));
        assert!((app.slider_values[0] - 150.0).abs() < 1e-9);
    }

    #[test]
    fn restored_guess_moves_its_slider() {
        let mut saved = Visualizer::new(GuessDemo::default(), NullSink);
        saved.commit(72.0);
        let session = SessionSerde::capture(&saved);

        let app = DemoApp::new(GuessDemo::default(), &SlidePlotConfig::default(), Some(session));
        assert_eq!(app.slider_values[0], 72.0);
        assert_eq!(app.current, app.session.visualizer.figure());
    }
}
