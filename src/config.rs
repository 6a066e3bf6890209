//! Configuration shared by the demos, the window front end and the exporters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::demos::DemoKind;
use crate::error::{Result, SlidePlotError};
use crate::figure::{Palette, Rgb};

// ─────────────────────────────────────────────────────────────────────────────
// Theme / log level
// ─────────────────────────────────────────────────────────────────────────────

/// Window theme for the egui front end. Exported figures always use a white background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-demo settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings of the bias-threshold demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasSettings {
    /// Domain the step curve is evaluated on.
    pub domain: (f64, f64),
    /// Number of grid points over `domain`.
    pub grid_points: usize,
    /// Visible x range.
    pub x_limits: (f64, f64),
    /// Slider value is multiplied by this to get the bias.
    pub slider_scale: f64,
    /// Slider range in raw slider units.
    pub slider_range: (f64, f64),
    /// Figure size in inches; `None` uses the global `figure_size`.
    pub figure_size: Option<(f32, f32)>,
}

impl Default for BiasSettings {
    fn default() -> Self {
        Self {
            domain: (-10.0, 10.0),
            grid_points: 1_000,
            x_limits: (-5.0, 5.0),
            slider_scale: 0.01,
            slider_range: (-500.0, 500.0),
            figure_size: Some((3.0, 2.0)),
        }
    }
}

/// Settings of the gradient-guess demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessSettings {
    pub domain: (f64, f64),
    pub grid_points: usize,
    /// Full width of each tangent segment.
    pub eps: f64,
    /// First committed guess; `None` starts with an empty history.
    pub seed: Option<f64>,
    /// Figure size in inches; `None` uses the global `figure_size`.
    pub figure_size: Option<(f32, f32)>,
}

impl Default for GuessSettings {
    fn default() -> Self {
        Self {
            domain: (0.0, 100.0),
            grid_points: 200,
            eps: 5.0,
            seed: Some(50.0),
            figure_size: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SlidePlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field         | Purpose |
/// |---------------|---------|
/// | `figure_size` | Figure size in inches, multiplied by `dpi` for export |
/// | `palette`     | Series color cycle (`#RRGGBB`) |
/// | `bias`/`guess`| Demo-specific domains, grids and slider scaling |
/// | `theme`       | egui window theme |
/// | `log_level`   | Default terminal log level of the binary |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidePlotConfig {
    /// Native window title.
    pub title: String,
    /// Optional headline rendered above the plot.
    pub headline: Option<String>,
    pub figure_size: (f32, f32),
    pub dpi: f32,
    pub palette: Vec<Rgb>,
    pub bias: BiasSettings,
    pub guess: GuessSettings,
    pub theme: Theme,
    pub log_level: LogLevel,
    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl std::fmt::Debug for SlidePlotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidePlotConfig")
            .field("title", &self.title)
            .field("headline", &self.headline)
            .field("figure_size", &self.figure_size)
            .field("dpi", &self.dpi)
            .field("palette", &self.palette)
            .field("bias", &self.bias)
            .field("guess", &self.guess)
            .field("theme", &self.theme)
            .field("log_level", &self.log_level)
            .field("native_options", &self.native_options.is_some())
            .finish()
    }
}

impl Default for SlidePlotConfig {
    fn default() -> Self {
        Self {
            title: "SlidePlot".to_string(),
            headline: None,
            figure_size: (5.0, 2.0),
            dpi: 100.0,
            palette: Palette::default().0,
            bias: BiasSettings::default(),
            guess: GuessSettings::default(),
            theme: Theme::default(),
            log_level: LogLevel::default(),
            native_options: None,
        }
    }
}

impl SlidePlotConfig {
    pub fn palette(&self) -> Palette {
        Palette(self.palette.clone())
    }

    /// Figure size in pixels (`figure_size * dpi`), at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.to_pixels(self.figure_size)
    }

    /// Figure size in inches for one demo, falling back to the global size.
    pub fn figure_size_for(&self, kind: DemoKind) -> (f32, f32) {
        let own = match kind {
            DemoKind::Bias => self.bias.figure_size,
            DemoKind::Guess => self.guess.figure_size,
        };
        own.unwrap_or(self.figure_size)
    }

    pub fn pixel_size_for(&self, kind: DemoKind) -> (u32, u32) {
        self.to_pixels(self.figure_size_for(kind))
    }

    fn to_pixels(&self, (w, h): (f32, f32)) -> (u32, u32) {
        let w = (w * self.dpi).round().max(1.0) as u32;
        let h = (h * self.dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// `~/.slideplot/config.yaml`, or `None` when no home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(PathBuf::from(home).join(".slideplot").join("config.yaml"))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).map_err(|e| SlidePlotError::io(path, e))?;
        let cfg = serde_yaml::from_str(&s)?;
        log::debug!("loaded config from {:?}", path);
        Ok(cfg)
    }

    /// Load from the default path; a missing file yields the defaults.
    pub fn load_from_default_path() -> Result<Self> {
        match Self::default_path() {
            Some(p) if p.exists() => Self::load_from_path(&p),
            _ => Ok(Self::default()),
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| SlidePlotError::io(dir, e))?;
            }
        }
        let s = serde_yaml::to_string(self)?;
        fs::write(path, s).map_err(|e| SlidePlotError::io(path, e))
    }
}
