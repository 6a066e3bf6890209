//! Bias-threshold demo: a step activation whose edge follows the "Bias" slider.
//!
//! Run with `cargo run --example bias_threshold`.

use slideplot::{run_demo, DemoKind, SlidePlotConfig};

fn main() -> eframe::Result<()> {
    let cfg = SlidePlotConfig {
        title: "Bias threshold".to_string(),
        headline: Some("Drag the bias to move the activation threshold".to_string()),
        ..Default::default()
    };
    run_demo(DemoKind::Bias, cfg, None)
}
