//! Preloader script: typed lines or a drawn signature, then a reveal, then a
//! single unlock.

use std::time::Duration;

use tracing::{debug, info, warn};
use vitrine_platform::{ElementId, Ease, Props, Sequence, Services, Tween, TweenId};

use crate::config::{PreloaderConfig, PreloaderScript, Selectors};

#[derive(Debug, Clone, PartialEq)]
pub enum PreloaderPhase {
    NotStarted,
    Typing {
        next_line: usize,
        next_at: Duration,
    },
    /// Waiting on both the signature draw and the asset prefetch.
    Drawing {
        draw: Option<TweenId>,
        draw_done: bool,
        assets_done: bool,
        deadline: Duration,
    },
    Revealing {
        until: Duration,
    },
    Unlocked,
}

pub struct PreloaderSequencer {
    config: PreloaderConfig,
    preloader: Option<ElementId>,
    text: Option<ElementId>,
    signature: Option<ElementId>,
    phase: PreloaderPhase,
    typed: Vec<String>,
    assets_done: bool,
}

impl PreloaderSequencer {
    pub fn new(config: PreloaderConfig) -> Self {
        Self {
            config,
            preloader: None,
            text: None,
            signature: None,
            phase: PreloaderPhase::NotStarted,
            typed: Vec::new(),
            assets_done: false,
        }
    }

    pub fn phase(&self) -> &PreloaderPhase {
        &self.phase
    }

    pub fn is_unlocked(&self) -> bool {
        self.phase == PreloaderPhase::Unlocked
    }

    /// Lines shown so far.
    pub fn typed(&self) -> &[String] {
        &self.typed
    }

    pub fn start(&mut self, selectors: &Selectors, svc: &mut Services<'_>) {
        if self.phase != PreloaderPhase::NotStarted {
            warn!("preloader already started");
            return;
        }
        self.preloader = svc.document.query(&selectors.preloader);
        if self.preloader.is_none() {
            warn!("preloader element {} missing", selectors.preloader);
        }
        let now = svc.clock.now();

        match self.config.script.clone() {
            PreloaderScript::Lines { .. } => {
                self.text = svc.document.query(&selectors.preloader_text);
                if self.text.is_none() {
                    warn!("preloader text {} missing; skipping lines", selectors.preloader_text);
                }
                info!("preloader: typing lines");
                self.phase = PreloaderPhase::Typing {
                    next_line: 0,
                    next_at: now,
                };
            }
            PreloaderScript::Signature {
                draw_ms,
                force_after_ms,
            } => {
                self.signature = svc.document.query(&selectors.signature_path);
                let draw = self.start_draw(draw_ms, svc);
                if draw.is_none() {
                    warn!(
                        "signature path {} unavailable; continuing without draw",
                        selectors.signature_path
                    );
                }
                info!("preloader: drawing signature");
                self.phase = PreloaderPhase::Drawing {
                    draw,
                    draw_done: draw.is_none(),
                    assets_done: self.assets_done,
                    deadline: now + Duration::from_millis(force_after_ms),
                };
            }
        }
    }

    fn start_draw(&mut self, draw_ms: u64, svc: &mut Services<'_>) -> Option<TweenId> {
        let path = self.signature?;
        let length = svc.document.path_length(path)?;
        svc.animator.set(
            &[path],
            &Props::new().stroke_dasharray(length).stroke_dashoffset(length),
        );
        Some(svc.animator.play(Sequence::single(
            Tween::to(path, Props::new().stroke_dashoffset(0.0))
                .duration_ms(draw_ms)
                .ease(Ease::SineInOut),
        )))
    }

    pub fn on_tween_complete(&mut self, id: TweenId) {
        if let PreloaderPhase::Drawing {
            draw, draw_done, ..
        } = &mut self.phase
        {
            if *draw == Some(id) {
                debug!("preloader: signature drawn");
                *draw_done = true;
            }
        }
    }

    /// Asset prefetch finished. A failed prefetch still releases the join.
    /// May arrive before `start`.
    pub fn on_assets_ready(&mut self, ok: bool) {
        if !ok {
            warn!("asset prefetch failed; forcing preloader to continue");
        }
        self.assets_done = true;
        if let PreloaderPhase::Drawing { assets_done, .. } = &mut self.phase {
            *assets_done = true;
        }
    }

    /// Advance the script. Returns true exactly once: on the tick that
    /// unlocks the site.
    pub fn tick(&mut self, svc: &mut Services<'_>) -> bool {
        let now = svc.clock.now();
        match self.phase.clone() {
            PreloaderPhase::NotStarted | PreloaderPhase::Unlocked => false,
            PreloaderPhase::Typing { next_line, next_at } => {
                self.type_lines(next_line, next_at, now, svc);
                false
            }
            PreloaderPhase::Drawing {
                draw_done,
                assets_done,
                deadline,
                ..
            } => {
                if draw_done && assets_done {
                    self.begin_reveal(svc);
                } else if now >= deadline {
                    warn!(
                        "preloader join timed out (draw done: {draw_done}, assets done: {assets_done})"
                    );
                    self.begin_reveal(svc);
                }
                false
            }
            PreloaderPhase::Revealing { until } => {
                if now < until {
                    return false;
                }
                info!("preloader complete; unlocking site");
                self.phase = PreloaderPhase::Unlocked;
                true
            }
        }
    }

    fn type_lines(&mut self, mut next_line: usize, mut next_at: Duration, now: Duration, svc: &mut Services<'_>) {
        let (lines, delay) = match &self.config.script {
            PreloaderScript::Lines {
                lines,
                line_delay_ms,
            } => (lines.clone(), Duration::from_millis(*line_delay_ms)),
            PreloaderScript::Signature { .. } => return,
        };
        while now >= next_at {
            if next_line >= lines.len() {
                self.begin_reveal(svc);
                return;
            }
            self.typed.push(lines[next_line].clone());
            if let Some(text) = self.text {
                svc.document.set_text(text, &self.typed.join("\n"));
            }
            debug!("preloader line {}: {}", next_line, lines[next_line]);
            next_line += 1;
            next_at += delay;
        }
        self.phase = PreloaderPhase::Typing { next_line, next_at };
    }

    fn begin_reveal(&mut self, svc: &mut Services<'_>) {
        let now = svc.clock.now();
        let reveal = Duration::from_millis(self.config.reveal_ms);
        match self.preloader {
            Some(preloader) => {
                let mut reveal_seq = Sequence::new().then(
                    Tween::to(preloader, Props::new().y_percent(-100.0).opacity(0.0))
                        .duration_ms(self.config.reveal_ms)
                        .ease(Ease::Power4InOut),
                );
                let inner: Vec<ElementId> = self.text.into_iter().chain(self.signature).collect();
                if !inner.is_empty() {
                    reveal_seq = reveal_seq.with(
                        Tween::to_all(inner, Props::new().opacity(0.0))
                            .duration_ms(self.config.reveal_ms / 2)
                            .ease(Ease::Power2Out),
                    );
                }
                svc.animator.play(
                    reveal_seq.then(Tween::to(preloader, Props::new().visible(false)).duration_ms(0)),
                );
                self.phase = PreloaderPhase::Revealing {
                    until: now + reveal,
                };
            }
            None => {
                self.phase = PreloaderPhase::Revealing { until: now };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::{At, Clock, Document, Platform};

    fn lines_config() -> PreloaderConfig {
        PreloaderConfig {
            script: PreloaderScript::Lines {
                lines: vec!["one".into(), "two".into(), "three".into(), "four".into()],
                line_delay_ms: 100,
            },
            reveal_ms: 500,
        }
    }

    fn signature_config() -> PreloaderConfig {
        PreloaderConfig {
            script: PreloaderScript::Signature {
                draw_ms: 1000,
                force_after_ms: 4000,
            },
            reveal_ms: 300,
        }
    }

    fn document() -> (MemoryDocument, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        doc.add(".preloader");
        let text = doc.add(".preloader__text");
        let path = doc.add(".signature path");
        doc.set_path_length(path, 1234.0);
        (doc, text, path)
    }

    fn tick(platform: &mut HeadlessPlatform, preloader: &mut PreloaderSequencer) -> bool {
        let mut svc = platform.services();
        preloader.tick(&mut svc)
    }

    fn deliver_finished(platform: &mut HeadlessPlatform, preloader: &mut PreloaderSequencer) {
        for id in platform.animator.take_finished() {
            preloader.on_tween_complete(id);
        }
    }

    #[test]
    fn lines_type_on_schedule_then_unlock_once() {
        let (doc, text, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(lines_config());
        preloader.start(&Selectors::default(), &mut platform.services());

        let mut unlocks = Vec::new();
        for _ in 0..=200 {
            if tick(&mut platform, &mut preloader) {
                unlocks.push(platform.clock.now());
            }
            if platform.clock.now() == Duration::from_millis(250) {
                assert_eq!(preloader.typed(), ["one", "two", "three"]);
            }
            platform.clock.advance_ms(10);
        }
        // 4 lines at 0/100/200/300, reveal at 400, unlocked 500ms later
        assert_eq!(unlocks, vec![Duration::from_millis(900)]);
        assert_eq!(
            platform.document.text(text).as_deref(),
            Some("one\ntwo\nthree\nfour")
        );
        assert!(preloader.is_unlocked());
    }

    #[test]
    fn reveal_fades_contents_alongside_panel() {
        let (doc, text, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(lines_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        platform.clock.advance_ms(400);
        tick(&mut platform, &mut preloader);

        let reveal = &platform.animator.played()[0].sequence;
        assert_eq!(reveal.steps()[1].at, At::WithPrevious);
        assert_eq!(reveal.steps()[1].tween.targets, vec![text]);
        assert_eq!(reveal.duration(), Duration::from_millis(500));
    }

    #[test]
    fn late_tick_catches_up_lines() {
        let (doc, _, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(lines_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        platform.clock.advance_ms(250);
        tick(&mut platform, &mut preloader);
        assert_eq!(preloader.typed().len(), 3);
    }

    #[test]
    fn signature_waits_for_draw_and_assets() {
        let (doc, _, path) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(signature_config());
        preloader.start(&Selectors::default(), &mut platform.services());

        let dash = platform.animator.resolved(path);
        assert_eq!(dash.stroke_dasharray, Some(1234.0));
        assert_eq!(dash.stroke_dashoffset, Some(0.0));

        platform.clock.advance_ms(1000);
        deliver_finished(&mut platform, &mut preloader);
        assert!(!tick(&mut platform, &mut preloader));
        assert!(matches!(preloader.phase(), PreloaderPhase::Drawing { draw_done: true, .. }));

        preloader.on_assets_ready(true);
        assert!(!tick(&mut platform, &mut preloader));
        assert!(matches!(preloader.phase(), PreloaderPhase::Revealing { .. }));

        platform.clock.advance_ms(300);
        assert!(tick(&mut platform, &mut preloader));
        assert!(!tick(&mut platform, &mut preloader));
    }

    #[test]
    fn failed_prefetch_still_releases_join() {
        let (doc, _, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(signature_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        preloader.on_assets_ready(false);
        platform.clock.advance_ms(1000);
        deliver_finished(&mut platform, &mut preloader);
        tick(&mut platform, &mut preloader);
        assert!(matches!(preloader.phase(), PreloaderPhase::Revealing { .. }));
    }

    #[test]
    fn prefetch_reported_before_start_is_kept() {
        let (doc, _, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(signature_config());
        preloader.on_assets_ready(true);
        preloader.start(&Selectors::default(), &mut platform.services());
        assert!(matches!(
            preloader.phase(),
            PreloaderPhase::Drawing { assets_done: true, .. }
        ));

        platform.clock.advance_ms(1000);
        deliver_finished(&mut platform, &mut preloader);
        tick(&mut platform, &mut preloader);
        assert!(matches!(preloader.phase(), PreloaderPhase::Revealing { .. }));
    }

    #[test]
    fn missing_path_counts_as_drawn() {
        let mut doc = MemoryDocument::new();
        doc.add(".preloader");
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(signature_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        assert!(matches!(
            preloader.phase(),
            PreloaderPhase::Drawing { draw: None, draw_done: true, .. }
        ));
        preloader.on_assets_ready(true);
        tick(&mut platform, &mut preloader);
        assert!(matches!(preloader.phase(), PreloaderPhase::Revealing { .. }));
    }

    #[test]
    fn stalled_join_is_forced_after_deadline() {
        let (doc, _, _) = document();
        let mut platform = HeadlessPlatform::new(doc);
        let mut preloader = PreloaderSequencer::new(signature_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        platform.clock.advance_ms(3999);
        assert!(!tick(&mut platform, &mut preloader));
        assert!(matches!(preloader.phase(), PreloaderPhase::Drawing { .. }));
        platform.clock.advance_ms(1);
        tick(&mut platform, &mut preloader);
        assert!(matches!(preloader.phase(), PreloaderPhase::Revealing { .. }));
    }

    #[test]
    fn missing_preloader_unlocks_without_reveal() {
        let mut platform = HeadlessPlatform::new(MemoryDocument::new());
        let mut preloader = PreloaderSequencer::new(lines_config());
        preloader.start(&Selectors::default(), &mut platform.services());
        platform.clock.advance_ms(400);
        assert!(!tick(&mut platform, &mut preloader));
        assert!(tick(&mut platform, &mut preloader));
        assert!(platform.animator.played().is_empty());
    }
}
