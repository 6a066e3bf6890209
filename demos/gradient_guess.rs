//! Guess-the-minimum demo with a dark theme and a tighter tangent width.
//!
//! Drag the guess slider to preview a position, release to commit it, then use
//! "Show derivatives" for slope hints and "Reveal function" to check your answer.

use slideplot::config::{GuessSettings, Theme};
use slideplot::{run_demo, DemoKind, SlidePlotConfig};

fn main() -> eframe::Result<()> {
    let cfg = SlidePlotConfig {
        title: "Find the minimum".to_string(),
        headline: Some("Where is the minimum?".to_string()),
        theme: Theme::Dark,
        guess: GuessSettings {
            eps: 3.0,
            ..Default::default()
        },
        ..Default::default()
    };
    run_demo(DemoKind::Guess, cfg, None)
}
