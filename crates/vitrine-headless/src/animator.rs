use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;
use vitrine_platform::{Animator, Clock, ElementId, Props, ScrollTrigger, Sequence, TriggerId, TweenId};

use crate::ManualClock;

#[derive(Debug, Clone)]
pub struct PlayedSequence {
    pub id: TweenId,
    pub started_at: Duration,
    pub sequence: Sequence,
    reported: bool,
}

impl PlayedSequence {
    pub fn ends_at(&self) -> Duration {
        self.started_at + self.sequence.duration()
    }
}

/// Animator that records every request and resolves completion against the
/// shared manual clock.
pub struct RecordingAnimator {
    clock: Rc<ManualClock>,
    next_id: u64,
    sets: Vec<(Vec<ElementId>, Props)>,
    played: Vec<PlayedSequence>,
    triggers: Vec<ScrollTrigger>,
    scroll_y: f32,
    resolved: HashMap<ElementId, Props>,
}

impl RecordingAnimator {
    pub fn new(clock: Rc<ManualClock>) -> Self {
        Self {
            clock,
            next_id: 0,
            sets: Vec::new(),
            played: Vec::new(),
            triggers: Vec::new(),
            scroll_y: 0.0,
            resolved: HashMap::new(),
        }
    }

    pub fn sets(&self) -> &[(Vec<ElementId>, Props)] {
        &self.sets
    }

    pub fn played(&self) -> &[PlayedSequence] {
        &self.played
    }

    pub fn triggers(&self) -> &[ScrollTrigger] {
        &self.triggers
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Sequences whose end time has passed since the last call.
    pub fn take_finished(&mut self) -> Vec<TweenId> {
        let now = self.clock.now();
        let mut finished = Vec::new();
        for played in self.played.iter_mut().filter(|played| !played.reported) {
            if played.ends_at() <= now {
                played.reported = true;
                finished.push(played.id);
            }
        }
        finished
    }

    /// End-state properties of an element: every `set` and every played
    /// `to` merged in request order.
    pub fn resolved(&self, element: ElementId) -> Props {
        self.resolved.get(&element).cloned().unwrap_or_default()
    }

    fn merge(&mut self, element: ElementId, props: &Props) {
        let entry = self.resolved.entry(element).or_default();
        macro_rules! take {
            ($($field:ident),*) => {
                $(if props.$field.is_some() { entry.$field = props.$field; })*
            };
        }
        take!(
            x,
            y,
            x_percent,
            y_percent,
            rotation,
            rotate_x,
            rotate_y,
            scale,
            opacity,
            z_index,
            stroke_dasharray,
            stroke_dashoffset,
            visible
        );
    }
}

impl Animator for RecordingAnimator {
    fn set(&mut self, targets: &[ElementId], props: &Props) {
        for target in targets {
            self.merge(*target, props);
        }
        self.sets.push((targets.to_vec(), props.clone()));
    }

    fn play(&mut self, sequence: Sequence) -> TweenId {
        self.next_id += 1;
        let id = TweenId(self.next_id);
        for step in sequence.steps() {
            for target in &step.tween.targets {
                self.merge(*target, &step.tween.to);
            }
        }
        debug!(
            "play {:?}: {} steps over {:?}",
            id,
            sequence.steps().len(),
            sequence.duration()
        );
        self.played.push(PlayedSequence {
            id,
            started_at: self.clock.now(),
            sequence,
            reported: false,
        });
        id
    }

    fn scroll_trigger(&mut self, trigger: ScrollTrigger) -> TriggerId {
        self.triggers.push(trigger);
        TriggerId(self.triggers.len() as u64)
    }

    fn update_scroll(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }
}
