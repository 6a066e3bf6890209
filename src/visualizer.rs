//! The interactive function visualizer: owned view state plus redraw-on-input.

use crate::demos::Demo;
use crate::error::Result;
use crate::events::{EventBus, SubscriptionHandle, UiEvent};
use crate::figure::Figure;
use crate::sink::FigureSink;
use crate::state::ViewState;

/// Owns one [`ViewState`] and re-emits a freshly built figure after every mutation.
///
/// Every mutating operation ends in [`redraw`](Self::redraw), which rebuilds the
/// figure from scratch via [`Demo::build_figure`] and hands it to the sink.
pub struct Visualizer<D: Demo> {
    demo: D,
    state: ViewState,
    sink: Box<dyn FigureSink>,
    redraws: u64,
}

impl<D: Demo> Visualizer<D> {
    /// Create a visualizer in the demo's initial state. Nothing is emitted until
    /// the first [`redraw`](Self::redraw).
    pub fn new(demo: D, sink: impl FigureSink + 'static) -> Self {
        let state = demo.initial_state();
        Self::with_state(demo, state, sink)
    }

    pub fn with_state(demo: D, state: ViewState, sink: impl FigureSink + 'static) -> Self {
        Self {
            demo,
            state,
            sink: Box::new(sink),
            redraws: 0,
        }
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// How many figures have been emitted so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Record `value` as a new sample, leave the previewing state and redraw.
    /// Values outside the demo's domain are recorded unchanged.
    pub fn commit(&mut self, value: f64) {
        let sample = self.demo.sample_at(&self.state, value);
        self.state.commit(sample);
        log::debug!(
            "{}: committed {} ({} samples)",
            self.demo.name(),
            value,
            self.state.samples().len()
        );
        self.redraw();
    }

    /// Commit the pending value, or repeat the last sample when idle.
    /// Returns the committed value; with no pending value and no history nothing happens.
    pub fn commit_pending(&mut self) -> Option<f64> {
        let value = self
            .state
            .pending_value()
            .or_else(|| self.state.last_sample().map(|s| s.x))?;
        self.commit(value);
        Some(value)
    }

    /// Show `value` as a candidate without recording it, then redraw.
    pub fn preview(&mut self, value: f64) {
        self.state.preview(value);
        self.redraw();
    }

    /// Flip a display flag and redraw. Returns the new flag value.
    pub fn toggle(&mut self, flag: &str) -> Result<bool> {
        let on = self.state.toggle(flag)?;
        log::debug!("{}: {} = {}", self.demo.name(), flag, on);
        self.redraw();
        Ok(on)
    }

    /// Set a scalar parameter and redraw.
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<()> {
        self.state.set_scalar(name, value)?;
        self.redraw();
        Ok(())
    }

    /// Start over from a saved state and redraw.
    ///
    /// This begins a new session: `samples` is replaced wholesale and may end up
    /// shorter than before. It is the only operation that does not append.
    pub fn restore(&mut self, state: ViewState) {
        self.state = state;
        self.redraw();
    }

    /// The figure for the current state, without emitting it.
    pub fn figure(&self) -> Figure {
        self.demo.build_figure(&self.state)
    }

    /// Rebuild the figure from the current state and emit it.
    pub fn redraw(&mut self) {
        let fig = self.figure();
        self.redraws += 1;
        log::trace!(
            "{}: redraw #{} with {} series",
            self.demo.name(),
            self.redraws,
            fig.series.len()
        );
        self.sink.emit(&fig);
    }
}

/// A visualizer together with the event bus its demo's handlers live on.
pub struct DemoSession<D: Demo> {
    pub visualizer: Visualizer<D>,
    bus: EventBus<Visualizer<D>>,
    handles: Vec<SubscriptionHandle>,
}

impl<D: Demo> DemoSession<D> {
    /// Bind the demo's handlers and draw the initial figure.
    pub fn new(visualizer: Visualizer<D>) -> Self {
        let mut bus = EventBus::new();
        let handles = D::bind(&mut bus);
        let mut session = Self {
            visualizer,
            bus,
            handles,
        };
        session.visualizer.redraw();
        session
    }

    /// Route one UI event to the bound handlers. Returns how many handlers ran.
    pub fn handle(&mut self, event: &UiEvent) -> usize {
        self.bus.dispatch(&mut self.visualizer, event)
    }

    pub fn handles(&self) -> &[SubscriptionHandle] {
        &self.handles
    }

    /// Register an extra handler next to the demo's own.
    pub fn bus_mut(&mut self) -> &mut EventBus<Visualizer<D>> {
        &mut self.bus
    }
}
