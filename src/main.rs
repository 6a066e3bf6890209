use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

use slideplot::config::{LogLevel, SlidePlotConfig};
use slideplot::demos::{BiasDemo, Demo, DemoKind, GuessDemo};
use slideplot::persistence::load_session_from_path;
use slideplot::sink::NullSink;
use slideplot::svg::{export_figure, SvgOptions};
use slideplot::visualizer::Visualizer;

#[derive(Parser)]
#[command(
    name = "slideplot",
    version,
    about = "Interactive function visualizers for lecture slides"
)]
struct Cli {
    /// Terminal log level (defaults to the config's `log_level`)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// YAML config file (defaults to ~/.slideplot/config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a demo in a native window
    Run {
        demo: DemoKind,

        /// Restore a session saved from the window
        #[arg(long)]
        session: Option<PathBuf>,
    },

    /// Render one frame of a demo to SVG or PNG without opening a window
    Render {
        demo: DemoKind,

        /// Output file; `.png` selects PNG, anything else SVG
        #[arg(short, long)]
        out: PathBuf,

        /// Bias value for the bias demo
        #[arg(long)]
        bias: Option<f64>,

        /// Guesses to commit, in order (repeatable)
        #[arg(long = "guess")]
        guesses: Vec<f64>,

        /// Uncommitted guess to mark with a dashed line
        #[arg(long)]
        preview: Option<f64>,

        /// Draw tangent segments at every guess
        #[arg(long)]
        show_derivs: bool,

        /// Reveal the hidden function
        #[arg(long)]
        show_function: bool,

        /// Force PNG output regardless of the extension
        #[arg(long)]
        png: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SlidePlotConfig> {
    match path {
        Some(p) => SlidePlotConfig::load_from_path(p)
            .with_context(|| format!("loading config {}", p.display())),
        None => SlidePlotConfig::load_from_default_path().context("loading default config"),
    }
}

fn init_logging(level: LogLevel) {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level.to_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

struct RenderScript {
    bias: Option<f64>,
    guesses: Vec<f64>,
    preview: Option<f64>,
    show_derivs: bool,
    show_function: bool,
}

fn render_bias(demo: BiasDemo, script: &RenderScript) -> Result<Visualizer<BiasDemo>> {
    let mut vis = Visualizer::new(demo, NullSink);
    if let Some(b) = script.bias {
        vis.set_param(BiasDemo::BIAS, b)?;
    }
    if !script.guesses.is_empty() || script.preview.is_some() {
        log::warn!("--guess/--preview only apply to the guess demo");
    }
    Ok(vis)
}

fn render_guess(demo: GuessDemo, script: &RenderScript) -> Result<Visualizer<GuessDemo>> {
    let mut vis = Visualizer::new(demo, NullSink);
    for &x in &script.guesses {
        vis.commit(x);
    }
    if let Some(x) = script.preview {
        vis.preview(x);
    }
    if script.show_derivs {
        vis.toggle(GuessDemo::SHOW_DERIVS)?;
    }
    if script.show_function {
        vis.toggle(GuessDemo::SHOW_FUNCTION)?;
    }
    if script.bias.is_some() {
        log::warn!("--bias only applies to the bias demo");
    }
    Ok(vis)
}

fn write_figure<D: Demo>(vis: &Visualizer<D>, out: PathBuf, png: bool, opts: &SvgOptions) -> Result<()> {
    let out = if png { out.with_extension("png") } else { out };
    export_figure(&vis.figure(), &out, opts)
        .with_context(|| format!("exporting {} figure to {}", vis.demo().name(), out.display()))?;
    println!("{}", out.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;
    init_logging(cli.log_level.unwrap_or(cfg.log_level));

    match cli.command {
        Commands::Run { demo, session } => {
            let session = session
                .map(|p| {
                    load_session_from_path(&p)
                        .with_context(|| format!("loading session {}", p.display()))
                })
                .transpose()?;
            slideplot::run_demo(demo, cfg, session)
                .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
        }
        Commands::Render {
            demo,
            out,
            bias,
            guesses,
            preview,
            show_derivs,
            show_function,
            png,
        } => {
            let script = RenderScript {
                bias,
                guesses,
                preview,
                show_derivs,
                show_function,
            };
            let opts = SvgOptions::from_config(&cfg, demo);
            match demo {
                DemoKind::Bias => {
                    let vis = render_bias(BiasDemo::from_config(&cfg), &script)?;
                    write_figure(&vis, out, png, &opts)
                }
                DemoKind::Guess => {
                    let vis = render_guess(GuessDemo::from_config(&cfg), &script)?;
                    write_figure(&vis, out, png, &opts)
                }
            }
        }
    }
}
