//! Output side of a visualizer: where redrawn figures go.
//!
//! A [`FigureSink`] is an opaque display surface. `emit` has no return value and no
//! failure mode the caller must handle; sinks that can fail log and carry on.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use crate::figure::Figure;
use crate::svg::{render_svg, SvgOptions};

/// Receives every figure a visualizer redraws.
pub trait FigureSink {
    fn emit(&mut self, figure: &Figure);
}

impl<S: FigureSink + ?Sized> FigureSink for Box<S> {
    fn emit(&mut self, figure: &Figure) {
        (**self).emit(figure)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FigureSink for NullSink {
    fn emit(&mut self, _figure: &Figure) {}
}

/// Forwards figures over an `mpsc` channel to whichever thread displays them.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<Figure>,
}

impl FigureSink for ChannelSink {
    fn emit(&mut self, figure: &Figure) {
        if self.tx.send(figure.clone()).is_err() {
            log::debug!("figure receiver dropped; discarding redraw");
        }
    }
}

/// Create a new channel pair for figures: `(ChannelSink, Receiver<Figure>)`.
pub fn channel_figures() -> (ChannelSink, Receiver<Figure>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (ChannelSink { tx }, rx)
}

/// Writes each emitted figure to `<dir>/<stem>-NNNN.svg`.
pub struct SvgFileSink {
    dir: PathBuf,
    stem: String,
    options: SvgOptions,
    written: usize,
}

impl SvgFileSink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>, options: SvgOptions) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            options,
            written: 0,
        }
    }

    /// Path the next emitted figure will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}-{:04}.svg", self.stem, self.written))
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FigureSink for SvgFileSink {
    fn emit(&mut self, figure: &Figure) {
        let path = self.next_path();
        let svg = render_svg(figure, &self.options);
        let res = std::fs::create_dir_all(&self.dir).and_then(|_| std::fs::write(&path, svg));
        match res {
            Ok(()) => {
                self.written += 1;
                log::debug!("wrote {:?}", path);
            }
            Err(e) => log::warn!("failed to write figure to {:?}: {}", path, e),
        }
    }
}
