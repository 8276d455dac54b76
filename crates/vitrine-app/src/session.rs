//! Scripted browsing sessions replayed by the runner.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;
use vitrine_platform::{Document, FxError, InputEvent, PointerEvent, PointerKind, Rect, Result};

fn default_frame_ms() -> u64 {
    16
}

fn default_tail_ms() -> u64 {
    2000
}

fn default_pointer() -> PointerKind {
    PointerKind::Mouse
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    Move { x: f32, y: f32 },
    Leave,
    Tap {
        x: f32,
        y: f32,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
    },
    Click { selector: String },
    Intersection { visible: bool },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ScriptedEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Time simulated after the last event.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
    #[serde(default)]
    pub touch: bool,
    #[serde(default)]
    pub viewport: Option<Rect>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Session {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let session: Session =
            serde_json::from_str(source).map_err(|e| FxError::Config(format!("session: {e}")))?;
        if session.frame_ms == 0 {
            return Err(FxError::Config("session: frame_ms must be positive".into()));
        }
        Ok(session)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Resolve the script against a document. Clicks on selectors that
    /// match nothing are dropped.
    pub fn input_script(&self, document: &dyn Document) -> Vec<(Duration, InputEvent)> {
        self.events
            .iter()
            .filter_map(|timed| {
                let event = match &timed.event {
                    ScriptedEvent::Move { x, y } => InputEvent::PointerMove(PointerEvent::mouse(*x, *y)),
                    ScriptedEvent::Leave => InputEvent::PointerLeave,
                    ScriptedEvent::Tap { x, y, pointer } => {
                        let mut tap = PointerEvent::mouse(*x, *y);
                        tap.kind = *pointer;
                        InputEvent::Tap(tap)
                    }
                    ScriptedEvent::Click { selector } => match document.query(selector) {
                        Some(target) => InputEvent::Click(target),
                        None => {
                            warn!("click target {selector} not in document; dropping");
                            return None;
                        }
                    },
                    ScriptedEvent::Intersection { visible } => InputEvent::Intersection(*visible),
                };
                Some((Duration::from_millis(timed.at_ms), event))
            })
            .collect()
    }
}
