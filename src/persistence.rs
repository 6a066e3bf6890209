//! Session persistence: save and load a visualizer's view state as JSON.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::demos::Demo;
use crate::error::{Result, SlidePlotError};
use crate::state::ViewState;
use crate::visualizer::Visualizer;

/// On-disk form of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSerde {
    /// `Demo::name` of the demo that produced the state.
    pub demo: String,
    pub saved_at: DateTime<Utc>,
    pub state: ViewState,
}

impl SessionSerde {
    pub fn capture<D: Demo>(vis: &Visualizer<D>) -> Self {
        Self {
            demo: vis.demo().name().to_string(),
            saved_at: Utc::now(),
            state: vis.state().clone(),
        }
    }

    /// Restore into `vis` (which redraws). Fails if the session belongs to another demo.
    pub fn apply_to<D: Demo>(self, vis: &mut Visualizer<D>) -> Result<()> {
        let expected = vis.demo().name();
        if self.demo != expected {
            return Err(SlidePlotError::SessionMismatch {
                expected: expected.to_string(),
                found: self.demo,
            });
        }
        vis.restore(self.state);
        Ok(())
    }
}

pub fn save_session_to_path<D: Demo>(vis: &Visualizer<D>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&SessionSerde::capture(vis))?;
    std::fs::write(path, json).map_err(|e| SlidePlotError::io(path, e))?;
    log::info!("saved {} session to {:?}", vis.demo().name(), path);
    Ok(())
}

pub fn load_session_from_path(path: &Path) -> Result<SessionSerde> {
    let s = std::fs::read_to_string(path).map_err(|e| SlidePlotError::io(path, e))?;
    Ok(serde_json::from_str(&s)?)
}
