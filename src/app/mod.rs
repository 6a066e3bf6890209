//! egui window front end.
//!
//! [`run_demo`] opens a native window for one demo. [`DemoApp`] translates slider
//! and button interaction into [`UiEvent`](crate::events::UiEvent)s, dispatches
//! them to the demo's handlers and draws whatever figure the visualizer emitted
//! last.

mod demo_app;
mod plot_view;
mod run;

pub use demo_app::DemoApp;
pub use plot_view::show_figure;
pub use run::run_demo;
