//! Persistent wheel position.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wheelbot_core::signal::WebhookSignal;
use wheelbot_core::wheel::{transition, WheelEvent, WheelState};

use crate::error::{ControllerError, Result};

/// Contents of the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub state: WheelState,
    #[serde(default)]
    pub shares_held: u32,
    /// Last trade that was approved and accepted by the webhook.
    #[serde(default)]
    pub last_action: Option<WebhookSignal>,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            state: WheelState::Cash,
            shares_held: 0,
            last_action: None,
        }
    }
}

impl BotState {
    /// Read the state file. A missing file is a fresh position in cash.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No state file, starting in cash");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ControllerError::StateFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| ControllerError::StateFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the state file as indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(path, json).map_err(|source| ControllerError::StateFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), state = %self.state, "Saved state file");
        Ok(())
    }

    /// Advance the wheel, keeping `shares_held` in step.
    pub fn apply(&mut self, event: WheelEvent) -> Result<()> {
        self.state = transition(self.state, event)?;
        match event {
            WheelEvent::PutAssigned { shares } => self.shares_held = shares,
            WheelEvent::CallSold | WheelEvent::PutExpired => self.shares_held = 0,
            WheelEvent::PutSold => {}
        }
        Ok(())
    }

    /// Record an accepted trade.
    pub fn record_trade(&mut self, signal: &WebhookSignal) -> Result<()> {
        self.apply(WheelEvent::from(signal.action))?;
        self.last_action = Some(signal.clone());
        Ok(())
    }
}
