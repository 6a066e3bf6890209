use slideplot::config::{GuessSettings, LogLevel, SlidePlotConfig, Theme};
use slideplot::demos::{BiasDemo, GuessDemo};
use slideplot::figure::Rgb;
use slideplot::persistence::{load_session_from_path, save_session_to_path, SessionSerde};
use slideplot::sink::NullSink;
use slideplot::visualizer::Visualizer;
use slideplot::SlidePlotError;

#[test]
fn config_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let cfg = SlidePlotConfig {
        title: "Lecture 3".to_string(),
        dpi: 350.0,
        palette: vec![Rgb(0x12, 0x34, 0x56), Rgb::WHITE],
        theme: Theme::Dark,
        log_level: LogLevel::Debug,
        guess: GuessSettings {
            eps: 2.5,
            seed: None,
            ..Default::default()
        },
        ..Default::default()
    };
    cfg.save_to_path(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("'#123456'") || text.contains("\"#123456\""));

    let back = SlidePlotConfig::load_from_path(&path).unwrap();
    assert_eq!(back.title, "Lecture 3");
    assert_eq!(back.dpi, 350.0);
    assert_eq!(back.palette, cfg.palette);
    assert_eq!(back.theme, Theme::Dark);
    assert_eq!(back.log_level, LogLevel::Debug);
    assert_eq!(back.guess, cfg.guess);
    assert_eq!(back.bias, cfg.bias);
    assert_eq!(back.pixel_size(), (1750, 700));
}

#[test]
fn partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "title: Only a title\ntheme: dark\n").unwrap();

    let cfg = SlidePlotConfig::load_from_path(&path).unwrap();
    assert_eq!(cfg.title, "Only a title");
    assert_eq!(cfg.theme, Theme::Dark);
    assert_eq!(cfg.guess, GuessSettings::default());
    assert_eq!(cfg.palette.len(), 5);
}

#[test]
fn bad_palette_entry_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "palette: ['#12345']\n").unwrap();
    assert!(matches!(
        SlidePlotConfig::load_from_path(&path),
        Err(SlidePlotError::Yaml(_))
    ));
}

#[test]
fn missing_config_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SlidePlotConfig::load_from_path(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SlidePlotError::Io { .. }));
}

#[test]
fn session_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut vis = Visualizer::new(GuessDemo::default(), NullSink);
    vis.commit(30.0);
    vis.commit(70.0);
    vis.toggle(GuessDemo::SHOW_DERIVS).unwrap();
    vis.preview(12.0);
    save_session_to_path(&vis, &path).unwrap();

    let loaded = load_session_from_path(&path).unwrap();
    assert_eq!(loaded.demo, "guess");
    assert_eq!(&loaded.state, vis.state());

    let mut fresh = Visualizer::new(GuessDemo::default(), NullSink);
    loaded.apply_to(&mut fresh).unwrap();
    assert_eq!(fresh.state(), vis.state());
    assert_eq!(fresh.figure(), vis.figure());
    assert_eq!(fresh.redraw_count(), 1);
}

#[test]
fn session_from_other_demo_is_refused() {
    let bias = Visualizer::new(BiasDemo::default(), NullSink);
    let session = SessionSerde::capture(&bias);

    let mut guess = Visualizer::new(GuessDemo::default(), NullSink);
    let before = guess.state().clone();
    let err = session.apply_to(&mut guess).unwrap_err();
    assert!(matches!(
        err,
        SlidePlotError::SessionMismatch { ref expected, ref found }
            if expected == "guess" && found == "bias"
    ));
    assert_eq!(guess.state(), &before);
}

#[test]
fn corrupt_session_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        load_session_from_path(&path),
        Err(SlidePlotError::Json(_))
    ));
}
