//! Declarative animation descriptions handed to the [`Animator`](crate::Animator).
//!
//! A [`Sequence`] is plain data: an ordered list of tweens with relative
//! placement. The core builds these; the host's animation engine plays them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Easing curves, named after the engine's families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    Power2Out,
    Power3Out,
    Power4InOut,
    SineInOut,
    /// Overshooting "pop"; the value is the overshoot amount.
    BackOut(f32),
    ElasticOut,
}

/// Animatable properties. `None` leaves a property untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub x_percent: Option<f32>,
    pub y_percent: Option<f32>,
    pub rotation: Option<f32>,
    pub rotate_x: Option<f32>,
    pub rotate_y: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
    pub z_index: Option<u32>,
    pub stroke_dasharray: Option<f32>,
    pub stroke_dashoffset: Option<f32>,
    pub visible: Option<bool>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f32) -> Self {
        self.y = Some(value);
        self
    }

    pub fn x_percent(mut self, value: f32) -> Self {
        self.x_percent = Some(value);
        self
    }

    pub fn y_percent(mut self, value: f32) -> Self {
        self.y_percent = Some(value);
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn z_index(mut self, value: u32) -> Self {
        self.z_index = Some(value);
        self
    }

    pub fn stroke_dasharray(mut self, value: f32) -> Self {
        self.stroke_dasharray = Some(value);
        self
    }

    pub fn stroke_dashoffset(mut self, value: f32) -> Self {
        self.stroke_dashoffset = Some(value);
        self
    }

    pub fn visible(mut self, value: bool) -> Self {
        self.visible = Some(value);
        self
    }
}

/// One animate-to over one or more targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub targets: Vec<ElementId>,
    pub to: Props,
    pub duration: Duration,
    pub ease: Ease,
    pub delay: Duration,
    /// Offset between consecutive targets' start times.
    pub stagger: Duration,
}

impl Tween {
    pub fn to(target: ElementId, props: Props) -> Self {
        Self::to_all(vec![target], props)
    }

    pub fn to_all(targets: Vec<ElementId>, props: Props) -> Self {
        Self {
            targets,
            to: props,
            duration: Duration::from_millis(500),
            ease: Ease::default(),
            delay: Duration::ZERO,
            stagger: Duration::ZERO,
        }
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration = Duration::from_millis(ms);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn stagger_ms(mut self, ms: u64) -> Self {
        self.stagger = Duration::from_millis(ms);
        self
    }

    /// Time from the tween's start until its last target finishes.
    pub fn span(&self) -> Duration {
        let staggered = self.targets.len().saturating_sub(1) as u32;
        self.delay + self.duration + self.stagger * staggered
    }
}

/// Placement of a step relative to what precedes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum At {
    /// Start when everything placed so far has ended.
    End,
    /// Start together with the previous step.
    WithPrevious,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub at: At,
    pub tween: Tween,
}

/// An ordered timeline of tweens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(tween: Tween) -> Self {
        Self::new().then(tween)
    }

    pub fn then(self, tween: Tween) -> Self {
        self.push(At::End, tween)
    }

    pub fn with(self, tween: Tween) -> Self {
        self.push(At::WithPrevious, tween)
    }

    pub fn push(mut self, at: At, tween: Tween) -> Self {
        self.steps.push(Step { at, tween });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Resolved start time of every step, in step order.
    pub fn start_times(&self) -> Vec<Duration> {
        let mut starts = Vec::with_capacity(self.steps.len());
        let mut end = Duration::ZERO;
        let mut previous_start = Duration::ZERO;
        for step in &self.steps {
            let start = match step.at {
                At::End => end,
                At::WithPrevious => previous_start,
            };
            end = end.max(start + step.tween.span());
            previous_start = start;
            starts.push(start);
        }
        starts
    }

    /// Total running time of the sequence.
    pub fn duration(&self) -> Duration {
        self.start_times()
            .iter()
            .zip(&self.steps)
            .map(|(start, step)| *start + step.tween.span())
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

/// Scroll-linked trigger registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    pub trigger: ElementId,
    /// `"<element edge> <viewport edge>"` marker, e.g. `"top 80%"`.
    pub start: String,
    pub end: String,
    /// Smoothing seconds when the animation is tied to the scrollbar.
    pub scrub: Option<f32>,
    pub pin: bool,
    /// Class toggled on the trigger while it is within start..end.
    pub toggle_class: Option<String>,
    pub animation: Option<Sequence>,
}

impl ScrollTrigger {
    pub fn new(trigger: ElementId) -> Self {
        Self {
            trigger,
            start: "top bottom".into(),
            end: "bottom top".into(),
            scrub: None,
            pin: false,
            toggle_class: None,
            animation: None,
        }
    }

    pub fn start(mut self, marker: &str) -> Self {
        self.start = marker.to_string();
        self
    }

    pub fn end(mut self, marker: &str) -> Self {
        self.end = marker.to_string();
        self
    }

    pub fn scrub(mut self, smoothing: f32) -> Self {
        self.scrub = Some(smoothing);
        self
    }

    pub fn pin(mut self) -> Self {
        self.pin = true;
        self
    }

    pub fn toggle_class(mut self, class: &str) -> Self {
        self.toggle_class = Some(class.to_string());
        self
    }

    pub fn animation(mut self, sequence: Sequence) -> Self {
        self.animation = Some(sequence);
        self
    }
}
