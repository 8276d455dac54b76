//! Vitrine core engine: host-agnostic logic for the portfolio's image trail,
//! tap effect, preloader and section animations.
//!
//! All mutable state lives in component structs owned by a [`Site`], one per
//! page session. Host capabilities come in through
//! [`vitrine_platform::Services`], so every component runs unchanged against
//! the headless host in tests.

pub mod assets;
pub mod config;
pub mod geometry;
pub mod pointer;
pub mod pool;
pub mod preloader;
pub mod scroll_sync;
pub mod sections;
pub mod site;
pub mod tap;
pub mod trail;
pub mod visibility;

pub use assets::{Asset, AssetManifest};
pub use config::{EngineConfig, PreloaderConfig, PreloaderScript, TapConfig, TrailConfig};
pub use pointer::PointerTracker;
pub use pool::{ImagePool, PoolSlot};
pub use preloader::{PreloaderPhase, PreloaderSequencer};
pub use scroll_sync::ScrollSync;
pub use sections::{InitOutcome, Section, SectionRegistry};
pub use site::{Site, SiteEvent};
pub use tap::{TapEffect, TapOutcome};
pub use trail::{Stamp, TrailRenderer};
pub use visibility::{GateState, VisibilityGate};
