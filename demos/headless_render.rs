//! Drive the guess demo with scripted widget events and write every redraw to SVG.
//!
//! Frames land in `./slideplot-frames/guess-NNNN.svg`.

use slideplot::{
    DemoSession, EventKind, GuessDemo, Payload, SvgFileSink, SvgOptions, UiEvent, Visualizer,
};

fn main() {
    let sink = SvgFileSink::new("slideplot-frames", "guess", SvgOptions::default());
    let mut session = DemoSession::new(Visualizer::new(GuessDemo::default(), sink));

    let script = [
        UiEvent::input(GuessDemo::SLIDER, 20.0),
        UiEvent::input(GuessDemo::SLIDER, 30.0),
        UiEvent::change(GuessDemo::SLIDER, 30.0),
        UiEvent::click(GuessDemo::SHOW_DERIVS_BUTTON),
        UiEvent::input(GuessDemo::SLIDER, 70.0),
        UiEvent::new(GuessDemo::SLIDER, EventKind::CHANGE, Payload::None),
        // Ignored: not a number.
        UiEvent::new(GuessDemo::SLIDER, EventKind::INPUT, Payload::Text("abc".into())),
        UiEvent::click(GuessDemo::REVEAL_BUTTON),
    ];
    for event in &script {
        session.handle(event);
    }

    let vis = &session.visualizer;
    println!(
        "{} redraws, guesses at {:?}",
        vis.redraw_count(),
        vis.state().samples().iter().map(|s| s.x).collect::<Vec<_>>()
    );
}
