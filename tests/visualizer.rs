use approx::assert_relative_eq;

use slideplot::config::GuessSettings;
use slideplot::demos::GuessDemo;
use slideplot::figure::SeriesKind;
use slideplot::sink::NullSink;
use slideplot::state::PendingState;
use slideplot::visualizer::Visualizer;
use slideplot::Palette;

fn unseeded() -> Visualizer<GuessDemo> {
    let settings = GuessSettings {
        seed: None,
        ..Default::default()
    };
    Visualizer::new(GuessDemo::new(settings, Palette::default()), NullSink)
}

fn seeded() -> Visualizer<GuessDemo> {
    Visualizer::new(GuessDemo::default(), NullSink)
}

fn xs(vis: &Visualizer<GuessDemo>) -> Vec<f64> {
    vis.state().samples().iter().map(|s| s.x).collect()
}

#[test]
fn n_commits_give_n_samples() {
    let mut vis = unseeded();
    for (i, v) in [3.0, 97.0, 42.0, 42.0, 0.0, -5.0, 250.0].iter().enumerate() {
        vis.commit(*v);
        assert_eq!(vis.state().samples().len(), i + 1);
    }
}

#[test]
fn previews_never_touch_samples() {
    let mut vis = seeded();
    let before = vis.state().samples().to_vec();
    for v in [10.0, 20.0, 30.0, 99.5] {
        vis.preview(v);
        assert_eq!(vis.state().samples(), before.as_slice());
    }
    assert_eq!(vis.state().pending_value(), Some(99.5));
}

#[test]
fn commit_always_clears_pending() {
    let mut vis = seeded();
    vis.preview(12.0);
    assert_eq!(vis.state().pending_state(), PendingState::Previewing(12.0));
    vis.commit(80.0);
    assert_eq!(vis.state().pending_value(), None);
    assert_eq!(vis.state().pending_state(), PendingState::Idle);

    vis.commit(81.0);
    assert_eq!(vis.state().pending_value(), None);
}

#[test]
fn toggling_twice_restores_flag() {
    let mut vis = seeded();
    for flag in [GuessDemo::SHOW_DERIVS, GuessDemo::SHOW_FUNCTION] {
        let before = vis.state().flag(flag);
        vis.toggle(flag).unwrap();
        assert_ne!(vis.state().flag(flag), before);
        vis.toggle(flag).unwrap();
        assert_eq!(vis.state().flag(flag), before);
    }
}

#[test]
fn commit_after_seed_appends_in_order() {
    let mut vis = seeded();
    assert_eq!(xs(&vis), vec![50.0]);
    vis.commit(30.0);
    assert_eq!(xs(&vis), vec![50.0, 30.0]);
    assert_eq!(vis.state().pending_value(), None);
}

#[test]
fn preview_draws_marker_without_recording() {
    let mut vis = seeded();
    vis.preview(10.0);
    vis.redraw();
    let fig = vis.figure();
    assert_eq!(fig.vlines(), vec![10.0]);
    assert_eq!(xs(&vis), vec![50.0]);
}

#[test]
fn marker_at_zero_is_drawn() {
    let mut vis = seeded();
    vis.preview(0.0);
    assert_eq!(vis.figure().vlines(), vec![0.0]);
}

#[test]
fn show_derivs_adds_and_removes_tangents() {
    let mut vis = seeded();
    vis.commit(30.0);
    assert!(vis.figure().segments().is_empty());

    vis.toggle(GuessDemo::SHOW_DERIVS).unwrap();
    let segs = vis.figure().segments();
    assert_eq!(segs.len(), 2);
    for (seg, s) in segs.iter().zip(vis.state().samples()) {
        assert_relative_eq!(seg[1][0] - seg[0][0], vis.demo().settings.eps);
        assert_relative_eq!((seg[0][0] + seg[1][0]) / 2.0, s.x);
        assert_relative_eq!((seg[0][1] + seg[1][1]) / 2.0, s.y, epsilon = 1e-12);
        let slope = (seg[1][1] - seg[0][1]) / (seg[1][0] - seg[0][0]);
        assert_relative_eq!(slope, s.slope, epsilon = 1e-12);
    }

    vis.toggle(GuessDemo::SHOW_DERIVS).unwrap();
    assert!(vis.figure().segments().is_empty());
}

#[test]
fn reveal_adds_dashed_function_curve() {
    let mut vis = seeded();
    assert_eq!(vis.figure().series_named("function").count(), 0);
    vis.toggle(GuessDemo::SHOW_FUNCTION).unwrap();
    let fig = vis.figure();
    let curve = fig.series_named("function").next().expect("function series");
    match &curve.kind {
        SeriesKind::Line(pts) => assert_eq!(pts.len(), vis.demo().settings.grid_points),
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn commit_pending_prefers_previewed_value() {
    let mut vis = seeded();
    vis.preview(64.0);
    assert_eq!(vis.commit_pending(), Some(64.0));
    assert_eq!(xs(&vis), vec![50.0, 64.0]);
}

#[test]
fn commit_pending_repeats_last_sample_when_idle() {
    let mut vis = seeded();
    assert_eq!(vis.commit_pending(), Some(50.0));
    assert_eq!(xs(&vis), vec![50.0, 50.0]);
}

#[test]
fn commit_pending_without_history_does_nothing() {
    let mut vis = unseeded();
    let redraws = vis.redraw_count();
    assert_eq!(vis.commit_pending(), None);
    assert!(vis.state().samples().is_empty());
    assert_eq!(vis.redraw_count(), redraws);
}

#[test]
fn every_mutation_redraws_once() {
    let mut vis = seeded();
    assert_eq!(vis.redraw_count(), 0);
    vis.preview(1.0);
    vis.commit(2.0);
    vis.toggle(GuessDemo::SHOW_DERIVS).unwrap();
    assert_eq!(vis.redraw_count(), 3);
}

#[test]
fn toggling_a_scalar_fails_without_redraw() {
    let mut vis = Visualizer::new(slideplot::BiasDemo::default(), NullSink);
    assert!(vis.toggle(slideplot::BiasDemo::BIAS).is_err());
    assert_eq!(vis.redraw_count(), 0);
}

#[test]
fn out_of_domain_values_are_recorded_unchanged() {
    let mut vis = unseeded();
    vis.commit(-20.0);
    vis.commit(150.0);
    assert_eq!(xs(&vis), vec![-20.0, 150.0]);
}

#[test]
fn restore_starts_a_new_history() {
    let mut vis = seeded();
    vis.commit(10.0);
    vis.commit(20.0);

    let fresh = GuessDemo::default();
    let short = slideplot::Demo::initial_state(&fresh);
    vis.restore(short.clone());
    assert_eq!(vis.state(), &short);
    assert_eq!(xs(&vis), vec![50.0]);

    vis.commit(90.0);
    assert_eq!(xs(&vis), vec![50.0, 90.0]);
}
