//! Replays a session against the headless host and reports what happened.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};
use vitrine_core::{AssetManifest, EngineConfig, InitOutcome, Site, SiteEvent, TapOutcome};
use vitrine_headless::{HeadlessPlatform, ScriptedInput};
use vitrine_platform::{Clock, InputSource, Platform, Rect, Result};

use crate::demo;
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct StampRecord {
    pub at_ms: u64,
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub unlocked_at_ms: Option<u64>,
    pub trail_stamps: Vec<StampRecord>,
    pub taps_accepted: usize,
    pub taps_dropped: usize,
    pub sections: Vec<(String, String)>,
    pub frames: u64,
    pub favicon: Option<String>,
}

fn millis(at: Duration) -> u64 {
    at.as_millis() as u64
}

pub fn run(config: EngineConfig, session: &Session) -> Result<Report> {
    let viewport = session
        .viewport
        .unwrap_or_else(|| Rect::new(0.0, 0.0, 1280.0, 800.0));

    let (manifest, assets_ok) = match &config.asset_dir {
        Some(dir) => match AssetManifest::discover(dir) {
            Ok(manifest) => (Some(manifest), true),
            Err(err) => {
                warn!("asset prefetch failed: {err}");
                (None, false)
            }
        },
        None => (None, true),
    };

    let placeholders = config.asset_dir.is_none();
    let document = demo::document(&config.selectors, viewport, session.touch, placeholders);
    let mut platform = HeadlessPlatform::new(document);
    let mut input = ScriptedInput::new(session.input_script(&platform.document));
    let queue = input.receiver();
    let end = input.last_at() + Duration::from_millis(session.tail_ms);

    let mut site = Site::with_standard_sections(config);
    site.boot(manifest.as_ref(), &mut platform.services());
    site.on_assets_ready(assets_ok);
    input.start()?;

    let mut report = Report::default();
    while platform.clock.now() <= end {
        let now = platform.clock.now();
        input.pump(now);
        for event in queue.try_iter() {
            match site.handle(&event, &mut platform.services()) {
                Some(SiteEvent::Tap(TapOutcome::Stamped(_))) => report.taps_accepted += 1,
                Some(SiteEvent::Tap(_)) => report.taps_dropped += 1,
                _ => {}
            }
        }
        for handle in platform.frames.take_pending() {
            report.frames += 1;
            if let Some(stamp) = site.on_frame(handle, &mut platform.services()) {
                report.trail_stamps.push(StampRecord {
                    at_ms: millis(now),
                    index: stamp.index,
                    x: stamp.position.x,
                    y: stamp.position.y,
                    rotation: stamp.rotation,
                });
            }
        }
        for finished in platform.animator.take_finished() {
            site.on_tween_complete(finished);
        }
        if site.tick(&mut platform.services()) == Some(SiteEvent::Unlocked) {
            report.unlocked_at_ms = Some(millis(now));
        }
        platform.clock.advance(session.frame());
    }
    input.stop()?;
    site.teardown(&mut platform.services());

    report.sections = site
        .sections()
        .outcomes()
        .into_iter()
        .map(|(name, outcome)| {
            let status = match outcome {
                InitOutcome::Pending => "pending".to_string(),
                InitOutcome::Ready => "ready".to_string(),
                InitOutcome::Skipped(reason) => format!("skipped: {reason}"),
            };
            (name.to_string(), status)
        })
        .collect();
    report.favicon = platform.document.favicon().map(str::to_string);
    info!(
        "session done: {} trail stamps, {} taps, unlocked at {:?}ms",
        report.trail_stamps.len(),
        report.taps_accepted,
        report.unlocked_at_ms
    );
    Ok(report)
}
