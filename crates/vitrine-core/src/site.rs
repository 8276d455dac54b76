//! Page-session orchestrator: owns every effect and routes host events.

use tracing::{info, warn};
use vitrine_platform::{ElementId, FrameHandle, InputEvent, PointerEvent, Services, TweenId};

use crate::assets::AssetManifest;
use crate::config::EngineConfig;
use crate::pool::ImagePool;
use crate::preloader::PreloaderSequencer;
use crate::scroll_sync::ScrollSync;
use crate::sections::SectionRegistry;
use crate::tap::{TapEffect, TapOutcome};
use crate::trail::{Stamp, TrailRenderer};

const LOADING_CLASS: &str = "loading";

/// Something observable that happened while handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    TrailStamp(Stamp),
    Tap(TapOutcome),
    Unlocked,
}

pub struct Site {
    config: EngineConfig,
    preloader: PreloaderSequencer,
    trail: Option<TrailRenderer>,
    tap: Option<TapEffect>,
    sections: SectionRegistry,
    scroll_sync: ScrollSync,
    booted: bool,
    unlocked: bool,
}

impl Site {
    pub fn new(config: EngineConfig, sections: SectionRegistry) -> Self {
        Self {
            preloader: PreloaderSequencer::new(config.preloader.clone()),
            config,
            trail: None,
            tap: None,
            sections,
            scroll_sync: ScrollSync::new(),
            booted: false,
            unlocked: false,
        }
    }

    pub fn with_standard_sections(config: EngineConfig) -> Self {
        let sections = SectionRegistry::standard(&config);
        Self::new(config, sections)
    }

    fn rng(&self, stream: u64) -> fastrand::Rng {
        match self.config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(stream)),
            None => fastrand::Rng::new(),
        }
    }

    /// Pool for one effect container: the manifest's images injected into
    /// it, or the images already in the document.
    fn build_pool(
        container: ElementId,
        images_selector: &str,
        manifest: Option<&AssetManifest>,
        svc: &mut Services<'_>,
    ) -> ImagePool {
        match manifest {
            Some(manifest) => ImagePool::new(manifest.inject(svc.document, container)),
            None => ImagePool::new(svc.document.query_all(images_selector)),
        }
    }

    /// Lock scrolling, build the effects and start the preloader.
    pub fn boot(&mut self, manifest: Option<&AssetManifest>, svc: &mut Services<'_>) {
        if self.booted {
            warn!("site already booted");
            return;
        }
        self.booted = true;
        info!("site boot");
        svc.document.set_scroll_locked(true);
        let body = svc.document.body();
        svc.document.set_class(body, LOADING_CLASS, true);

        if let Some(manifest) = manifest {
            manifest.apply_favicon(svc.document);
        }
        if svc.document.query(&self.config.selectors.hero).is_none() {
            warn!(
                "hero {} missing; image trail will never become visible",
                self.config.selectors.hero
            );
        }

        let selectors = self.config.selectors.clone();
        match svc.document.query(&selectors.trail_container) {
            Some(container) => {
                let pool = Self::build_pool(container, &selectors.trail_images, manifest, svc);
                info!("image trail ready with {} images", pool.len());
                self.trail = Some(TrailRenderer::new(
                    container,
                    pool,
                    self.config.trail.clone(),
                    self.rng(0),
                ));
            }
            None => warn!("trail container {} missing; trail disabled", selectors.trail_container),
        }
        match svc.document.query(&selectors.tap_container) {
            Some(container) => {
                let pool = Self::build_pool(container, &selectors.tap_images, manifest, svc);
                self.tap = Some(TapEffect::new(
                    container,
                    pool,
                    self.config.tap.clone(),
                    self.rng(1),
                ));
            }
            None => warn!("tap container {} missing; tap effect disabled", selectors.tap_container),
        }

        self.preloader.start(&selectors, svc);
    }

    fn unlock(&mut self, svc: &mut Services<'_>) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        info!("site unlocked");
        svc.document.set_scroll_locked(false);
        let body = svc.document.body();
        svc.document.set_class(body, LOADING_CLASS, false);
        self.scroll_sync.start(svc.scroll);
        self.sections.init_all(svc);
    }

    /// Ticker step: advances the preloader and the scroll sync.
    pub fn tick(&mut self, svc: &mut Services<'_>) -> Option<SiteEvent> {
        let unlocked = self.preloader.tick(svc);
        if unlocked {
            self.unlock(svc);
        }
        self.scroll_sync.tick(svc.clock, svc.scroll, svc.animator);
        unlocked.then_some(SiteEvent::Unlocked)
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent, svc: &mut Services<'_>) {
        if let Some(trail) = &mut self.trail {
            trail.on_pointer_move(event, svc.document);
        }
        if self.unlocked {
            self.sections.dispatch_pointer_move(event, svc);
        }
    }

    pub fn on_pointer_leave(&mut self, svc: &mut Services<'_>) {
        if self.unlocked {
            self.sections.dispatch_pointer_leave(svc);
        }
    }

    pub fn on_tap(&mut self, event: &PointerEvent, svc: &mut Services<'_>) -> Option<TapOutcome> {
        self.tap.as_mut().map(|tap| tap.on_tap(event, svc))
    }

    pub fn on_click(&mut self, target: ElementId, svc: &mut Services<'_>) -> bool {
        self.unlocked && self.sections.dispatch_click(target, svc)
    }

    pub fn on_intersection(&mut self, intersecting: bool, svc: &mut Services<'_>) {
        if let Some(trail) = &mut self.trail {
            trail.on_intersection(intersecting, svc.frames);
        }
    }

    pub fn on_frame(&mut self, handle: FrameHandle, svc: &mut Services<'_>) -> Option<Stamp> {
        self.trail.as_mut()?.on_frame(handle, svc)
    }

    pub fn on_tween_complete(&mut self, id: TweenId) {
        self.preloader.on_tween_complete(id);
    }

    pub fn on_assets_ready(&mut self, ok: bool) {
        self.preloader.on_assets_ready(ok);
    }

    /// Route one queued input event.
    pub fn handle(&mut self, event: &InputEvent, svc: &mut Services<'_>) -> Option<SiteEvent> {
        match event {
            InputEvent::PointerMove(pointer) => {
                self.on_pointer_move(pointer, svc);
                None
            }
            InputEvent::PointerLeave => {
                self.on_pointer_leave(svc);
                None
            }
            InputEvent::Tap(pointer) => self.on_tap(pointer, svc).map(SiteEvent::Tap),
            InputEvent::Click(target) => {
                self.on_click(*target, svc);
                None
            }
            InputEvent::Intersection(intersecting) => {
                self.on_intersection(*intersecting, svc);
                None
            }
        }
    }

    /// Navigation away: stop the frame loop and the scroll sync.
    pub fn teardown(&mut self, svc: &mut Services<'_>) {
        if let Some(trail) = &mut self.trail {
            trail.stop(svc.frames);
        }
        self.scroll_sync.stop(svc.scroll);
        info!("site torn down");
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn trail(&self) -> Option<&TrailRenderer> {
        self.trail.as_ref()
    }

    pub fn tap(&self) -> Option<&TapEffect> {
        self.tap.as_ref()
    }

    pub fn preloader(&self) -> &PreloaderSequencer {
        &self.preloader
    }

    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    pub fn scroll_sync(&self) -> &ScrollSync {
        &self.scroll_sync
    }
}
