//! SlidePlot crate root: re-exports and module wiring.
//!
//! Interactive function visualizers for lecture slides. Each demo owns a
//! [`ViewState`], reacts to widget events by mutating it, and redraws a complete
//! [`Figure`] after every change:
//! - `state`: parameters, committed samples and the previewed value
//! - `function`: the closed-form functions being plotted
//! - `figure`: renderer-neutral figure description
//! - `events`: widget events and the handler bus
//! - `visualizer`: the generic visualizer and its event session
//! - `demos`: the bias-threshold and gradient-guess demos
//! - `sink`: where emitted figures go (channel, SVG files, nowhere)
//! - `svg`: static SVG/PNG rendering of figures
//! - `config`, `persistence`, `error`: settings, saved sessions and errors
//! - `app`: the egui window front end

pub mod app;
pub mod config;
pub mod demos;
pub mod error;
pub mod events;
pub mod figure;
pub mod function;
pub mod persistence;
pub mod sink;
pub mod state;
pub mod svg;
pub mod visualizer;

// Public re-exports for a compact external API
pub use app::{run_demo, DemoApp};
pub use config::{LogLevel, SlidePlotConfig, Theme};
pub use demos::{BiasDemo, Control, Demo, DemoKind, GuessDemo};
pub use error::{Result, SlidePlotError};
pub use events::{EventBus, EventFilter, EventKind, Payload, SubscriptionHandle, UiEvent};
pub use figure::{Figure, Palette, Rgb, Series, SeriesKind, SeriesLook};
pub use persistence::{load_session_from_path, save_session_to_path, SessionSerde};
pub use sink::{channel_figures, ChannelSink, FigureSink, NullSink, SvgFileSink};
pub use state::{ParamValue, PendingState, Sample, ViewState};
pub use svg::{export_figure, render_svg, SvgOptions};
pub use visualizer::{DemoSession, Visualizer};
