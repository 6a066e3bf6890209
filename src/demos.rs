//! The two lecture demos built on the visualizer pattern.
//!
//! A [`Demo`] supplies everything that differs between visualizers: the initial
//! [`ViewState`], how a committed value becomes a [`Sample`], how a state maps to
//! a [`Figure`], which widgets exist, and which handlers those widgets drive.

use crate::config::{BiasSettings, GuessSettings, SlidePlotConfig};
use crate::error::{Result, SlidePlotError};
use crate::events::{EventBus, EventKind, Payload, SubscriptionHandle, UiEvent};
use crate::figure::{Figure, Palette, Rgb, Series, SeriesKind, SeriesLook};
use crate::function::{linspace, ClosedForm, StepThreshold, WavyQuadratic};
use crate::state::{ParamValue, Sample, ViewState};
use crate::visualizer::Visualizer;

/// A widget a demo exposes to whatever front end hosts it.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Slider. Moving it fires `input`; if `commit_on_release`, releasing fires `change`.
    Slider {
        widget: &'static str,
        label: &'static str,
        range: (f64, f64),
        initial: f64,
        commit_on_release: bool,
    },
    /// Push button firing `click`.
    Button {
        widget: &'static str,
        label: &'static str,
    },
}

/// One concrete visualizer: its state layout, figure and widget bindings.
///
/// [`Visualizer`] is generic over this trait; the two lecture demos implement it.
pub trait Demo: Sized + 'static {
    /// Short identifier used on the command line and in file names.
    fn name(&self) -> &'static str;

    fn kind(&self) -> DemoKind;

    fn initial_state(&self) -> ViewState;

    /// Build the sample recorded when `x` is committed while in `state`.
    fn sample_at(&self, state: &ViewState, x: f64) -> Sample;

    /// Derive the figure for `state`. Must not depend on anything else that changes.
    fn build_figure(&self, state: &ViewState) -> Figure;

    fn controls(&self) -> Vec<Control>;

    /// Position of the slider `widget` that matches `state`, or `None` to leave it alone.
    fn slider_position(&self, _state: &ViewState, _widget: &str) -> Option<f64> {
        None
    }

    /// Register this demo's input handlers.
    fn bind(bus: &mut EventBus<Visualizer<Self>>) -> Vec<SubscriptionHandle>;
}

/// Which demo to run, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    Bias,
    Guess,
}

impl std::str::FromStr for DemoKind {
    type Err = SlidePlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bias" => Ok(DemoKind::Bias),
            "guess" => Ok(DemoKind::Guess),
            other => Err(SlidePlotError::UnknownDemo(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bias threshold
// ─────────────────────────────────────────────────────────────────────────────

/// Step activation `[x + bias >= 0]`, with `bias` driven by a slider.
#[derive(Debug, Clone)]
pub struct BiasDemo {
    pub settings: BiasSettings,
    pub palette: Palette,
}

impl BiasDemo {
    pub const SLIDER: &'static str = "bias-slider";
    pub const BIAS: &'static str = "bias";

    pub fn new(settings: BiasSettings, palette: Palette) -> Self {
        Self { settings, palette }
    }

    pub fn from_config(cfg: &SlidePlotConfig) -> Self {
        Self::new(cfg.bias.clone(), cfg.palette())
    }
}

impl Default for BiasDemo {
    fn default() -> Self {
        Self::new(BiasSettings::default(), Palette::default())
    }
}

impl Demo for BiasDemo {
    fn name(&self) -> &'static str {
        "bias"
    }

    fn kind(&self) -> DemoKind {
        DemoKind::Bias
    }

    fn initial_state(&self) -> ViewState {
        ViewState::new().with_param(Self::BIAS, ParamValue::Scalar(0.0))
    }

    fn sample_at(&self, state: &ViewState, x: f64) -> Sample {
        let f = StepThreshold {
            bias: state.scalar(Self::BIAS).unwrap_or(0.0),
        };
        Sample {
            x,
            y: f.eval(x),
            slope: f.derivative(x),
        }
    }

    fn build_figure(&self, state: &ViewState) -> Figure {
        let f = StepThreshold {
            bias: state.scalar(Self::BIAS).unwrap_or(0.0),
        };
        let (lo, hi) = self.settings.domain;
        let xs = linspace(lo, hi, self.settings.grid_points);

        let mut fig = Figure::new();
        fig.x_label = Some("Weighted Sum Input".to_string());
        fig.y_label = Some("Output".to_string());
        fig.x_limits = Some(self.settings.x_limits);
        fig.push(Series::new(
            "output",
            SeriesKind::Line(f.sample_grid(&xs)),
            SeriesLook::solid(self.palette.color(0)),
        ));
        fig
    }

    fn controls(&self) -> Vec<Control> {
        vec![Control::Slider {
            widget: Self::SLIDER,
            label: "Bias",
            range: self.settings.slider_range,
            initial: 0.0,
            commit_on_release: false,
        }]
    }

    fn slider_position(&self, state: &ViewState, widget: &str) -> Option<f64> {
        let scale = self.settings.slider_scale;
        if widget != Self::SLIDER || scale == 0.0 {
            return None;
        }
        state.scalar(Self::BIAS).map(|bias| bias / scale)
    }

    fn bind(bus: &mut EventBus<Visualizer<Self>>) -> Vec<SubscriptionHandle> {
        vec![bus.subscribe(Self::SLIDER, EventKind::INPUT, |vis, e| {
            if let Some(raw) = e.numeric() {
                let bias = raw * vis.demo().settings.slider_scale;
                if let Err(err) = vis.set_param(Self::BIAS, bias) {
                    log::warn!("{}", err);
                }
            }
        })]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradient guess
// ─────────────────────────────────────────────────────────────────────────────

/// Guess-the-minimum game over a hidden function, with optional slope hints.
#[derive(Debug, Clone)]
pub struct GuessDemo {
    pub settings: GuessSettings,
    pub palette: Palette,
    pub function: WavyQuadratic,
}

impl GuessDemo {
    pub const SLIDER: &'static str = "new_guess";
    pub const SHOW_DERIVS_BUTTON: &'static str = "show_derivatives";
    pub const REVEAL_BUTTON: &'static str = "reveal_function";
    pub const SHOW_DERIVS: &'static str = "showDerivs";
    pub const SHOW_FUNCTION: &'static str = "showFunction";

    pub fn new(settings: GuessSettings, palette: Palette) -> Self {
        Self {
            settings,
            palette,
            function: WavyQuadratic,
        }
    }

    pub fn from_config(cfg: &SlidePlotConfig) -> Self {
        Self::new(cfg.guess.clone(), cfg.palette())
    }

    /// Tangent segment of full width `eps` centred on a sample.
    pub fn tangent(&self, s: &Sample) -> [[f64; 2]; 2] {
        let h = self.settings.eps / 2.0;
        [[s.x - h, s.y - s.slope * h], [s.x + h, s.y + s.slope * h]]
    }
}

impl Default for GuessDemo {
    fn default() -> Self {
        Self::new(GuessSettings::default(), Palette::default())
    }
}

impl Demo for GuessDemo {
    fn name(&self) -> &'static str {
        "guess"
    }

    fn kind(&self) -> DemoKind {
        DemoKind::Guess
    }

    fn initial_state(&self) -> ViewState {
        let st = ViewState::new()
            .with_param(Self::SHOW_DERIVS, ParamValue::Flag(false))
            .with_param(Self::SHOW_FUNCTION, ParamValue::Flag(false));
        match self.settings.seed {
            Some(x) => {
                let seed = self.sample_at(&st, x);
                st.with_seed(seed)
            }
            None => st,
        }
    }

    fn sample_at(&self, _state: &ViewState, x: f64) -> Sample {
        Sample {
            x,
            y: self.function.eval(x),
            slope: self.function.derivative(x),
        }
    }

    fn build_figure(&self, state: &ViewState) -> Figure {
        let mut fig = Figure::new();
        let pts: Vec<[f64; 2]> = state.samples().iter().map(|s| [s.x, s.y]).collect();
        fig.push(Series::new(
            "guesses",
            SeriesKind::Scatter(pts),
            SeriesLook::solid(self.palette.color(0)),
        ));

        if state.flag(Self::SHOW_FUNCTION) {
            let (lo, hi) = self.settings.domain;
            let xs = linspace(lo, hi, self.settings.grid_points);
            fig.push(Series::new(
                "function",
                SeriesKind::Line(self.function.sample_grid(&xs)),
                SeriesLook::dashed(self.palette.color(3)),
            ));
        }

        if state.flag(Self::SHOW_DERIVS) {
            for s in state.samples() {
                fig.push(Series::new(
                    "slope",
                    SeriesKind::Segment(self.tangent(s)),
                    SeriesLook::dashed(self.palette.color(1)),
                ));
            }
        }

        if let Some(x) = state.pending_value() {
            fig.push(Series::new(
                "pending",
                SeriesKind::VLine(x),
                SeriesLook::dashed(Rgb::BLACK),
            ));
        }
        fig
    }

    fn controls(&self) -> Vec<Control> {
        let initial = self.settings.seed.unwrap_or(self.settings.domain.0);
        vec![
            Control::Slider {
                widget: Self::SLIDER,
                label: "Guess",
                range: self.settings.domain,
                initial,
                commit_on_release: true,
            },
            Control::Button {
                widget: Self::SHOW_DERIVS_BUTTON,
                label: "Show derivatives",
            },
            Control::Button {
                widget: Self::REVEAL_BUTTON,
                label: "Reveal function",
            },
        ]
    }

    fn slider_position(&self, state: &ViewState, widget: &str) -> Option<f64> {
        if widget != Self::SLIDER {
            return None;
        }
        state
            .pending_value()
            .or_else(|| state.last_sample().map(|s| s.x))
    }

    fn bind(bus: &mut EventBus<Visualizer<Self>>) -> Vec<SubscriptionHandle> {
        let toggle = |flag: &'static str| {
            move |vis: &mut Visualizer<Self>, _: &UiEvent| {
                if let Err(err) = vis.toggle(flag) {
                    log::warn!("{}", err);
                }
            }
        };
        vec![
            bus.subscribe(Self::SLIDER, EventKind::INPUT, |vis, e| {
                if let Some(x) = e.numeric() {
                    vis.preview(x);
                }
            }),
            bus.subscribe(Self::SLIDER, EventKind::CHANGE, |vis, e| {
                if e.payload == Payload::None {
                    vis.commit_pending();
                } else if let Some(x) = e.numeric() {
                    vis.commit(x);
                }
            }),
            bus.subscribe(Self::SHOW_DERIVS_BUTTON, EventKind::CLICK, toggle(Self::SHOW_DERIVS)),
            bus.subscribe(Self::REVEAL_BUTTON, EventKind::CLICK, toggle(Self::SHOW_FUNCTION)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_slider_position_undoes_the_scale() {
        let demo = BiasDemo::default();
        let st = demo
            .initial_state()
            .with_param(BiasDemo::BIAS, ParamValue::Scalar(-2.5));
        let pos = demo.slider_position(&st, BiasDemo::SLIDER).unwrap();
        assert!((pos - -2.5 / demo.settings.slider_scale).abs() < 1e-9);
        assert_eq!(demo.slider_position(&st, "other"), None);
    }

    #[test]
    fn guess_slider_follows_pending_then_history() {
        let demo = GuessDemo::default();
        let mut st = demo.initial_state();
        assert_eq!(demo.slider_position(&st, GuessDemo::SLIDER), Some(50.0));
        st.preview(12.0);
        assert_eq!(demo.slider_position(&st, GuessDemo::SLIDER), Some(12.0));
        assert_eq!(demo.slider_position(&st, GuessDemo::REVEAL_BUTTON), None);
    }

    #[test]
    fn kind_matches_name() {
        for (kind, name) in [
            (BiasDemo::default().kind(), BiasDemo::default().name()),
            (GuessDemo::default().kind(), GuessDemo::default().name()),
        ] {
            assert_eq!(name.parse::<DemoKind>().unwrap(), kind);
        }
    }
}
