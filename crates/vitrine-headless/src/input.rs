use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tracing::{info, warn};
use vitrine_platform::{FxError, InputEvent, InputSource, Result};

/// Replays timestamped input onto a queue the driver drains once per frame.
pub struct ScriptedInput {
    script: Vec<(Duration, InputEvent)>,
    cursor: usize,
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
    running: bool,
}

impl ScriptedInput {
    pub fn new(mut script: Vec<(Duration, InputEvent)>) -> Self {
        // stable: events sharing a timestamp keep script order
        script.sort_by_key(|(at, _)| *at);
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            script,
            cursor: 0,
            sender,
            receiver,
            running: false,
        }
    }

    pub fn receiver(&self) -> Receiver<InputEvent> {
        self.receiver.clone()
    }

    /// Queue every scripted event due at or before `now`.
    pub fn pump(&mut self, now: Duration) -> usize {
        if !self.running {
            return 0;
        }
        let mut sent = 0;
        while let Some((at, event)) = self.script.get(self.cursor) {
            if *at > now {
                break;
            }
            if self.sender.send(event.clone()).is_err() {
                warn!("input queue closed; dropping remaining script");
                self.cursor = self.script.len();
                break;
            }
            self.cursor += 1;
            sent += 1;
        }
        sent
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.script.len()
    }

    /// Timestamp of the last scripted event.
    pub fn last_at(&self) -> Duration {
        self.script.last().map(|(at, _)| *at).unwrap_or_default()
    }
}

impl InputSource for ScriptedInput {
    fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(FxError::Platform("scripted input already started".into()));
        }
        info!("scripted input start ({} events)", self.script.len());
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        info!("scripted input stop at event {}", self.cursor);
        self.running = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::PointerEvent;

    #[test]
    fn pump_delivers_due_events_in_order() {
        let mut input = ScriptedInput::new(vec![
            (Duration::from_millis(20), InputEvent::Intersection(true)),
            (Duration::from_millis(10), InputEvent::PointerMove(PointerEvent::mouse(1.0, 2.0))),
            (Duration::from_millis(40), InputEvent::PointerLeave),
        ]);
        let queue = input.receiver();
        assert_eq!(input.pump(Duration::from_millis(100)), 0);
        input.start().unwrap();
        assert_eq!(input.pump(Duration::from_millis(25)), 2);
        let drained: Vec<_> = queue.try_iter().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::PointerMove(PointerEvent::mouse(1.0, 2.0)),
                InputEvent::Intersection(true)
            ]
        );
        assert!(!input.is_exhausted());
        assert_eq!(input.pump(Duration::from_millis(40)), 1);
        assert!(input.is_exhausted());
    }

    #[test]
    fn double_start_is_rejected() {
        let mut input = ScriptedInput::new(Vec::new());
        input.start().unwrap();
        assert!(input.start().is_err());
    }
}
