//! Engine configuration. Every field has a default, so partial TOML or JSON
//! files only need to name what they change.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_platform::{FxError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Minimum pointer travel (px) between two stamps.
    pub threshold_px: f32,
    /// Stamped images rotate uniformly within +/- this many degrees.
    pub max_rotation_deg: f32,
    pub start_scale: f32,
    pub fade_in_ms: u64,
    pub hold_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            threshold_px: 80.0,
            max_rotation_deg: 15.0,
            start_scale: 0.6,
            fade_in_ms: 400,
            hold_ms: 600,
            fade_out_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    pub cooldown_ms: u64,
    pub max_rotation_deg: f32,
    pub pop_ms: u64,
    /// Overshoot of the pop-in ease.
    pub overshoot: f32,
    pub hold_ms: u64,
    pub fade_ms: u64,
    pub drop_px: f32,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 150,
            max_rotation_deg: 8.0,
            pop_ms: 450,
            overshoot: 1.7,
            hold_ms: 500,
            fade_ms: 400,
            drop_px: 30.0,
        }
    }
}

impl TapConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreloaderScript {
    /// Type each line into the preloader text, one per `line_delay_ms`.
    Lines { lines: Vec<String>, line_delay_ms: u64 },
    /// Draw the signature path, joined with asset prefetch.
    Signature { draw_ms: u64, force_after_ms: u64 },
}

impl Default for PreloaderScript {
    fn default() -> Self {
        PreloaderScript::Lines {
            lines: vec![
                "> hello".into(),
                "> fetching work".into(),
                "> arranging images".into(),
                "> welcome".into(),
            ],
            line_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub script: PreloaderScript,
    pub reveal_ms: u64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            script: PreloaderScript::default(),
            reveal_ms: 900,
        }
    }
}

/// Selectors for every element the effects layer touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub hero: String,
    pub trail_container: String,
    pub trail_images: String,
    pub tap_container: String,
    pub tap_images: String,
    pub preloader: String,
    pub preloader_text: String,
    pub signature_path: String,
    pub hero_title: String,
    pub horizontal_section: String,
    pub horizontal_track: String,
    pub tilt_cloud: String,
    pub tilt_items: String,
    pub cards: String,
    pub timeline_items: String,
    pub magnetic: String,
    pub contact_links: String,
    pub footer_top: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hero: "#hero".into(),
            trail_container: ".image-trail".into(),
            trail_images: ".image-trail img".into(),
            tap_container: ".tap-trail".into(),
            tap_images: ".tap-trail img".into(),
            preloader: ".preloader".into(),
            preloader_text: ".preloader__text".into(),
            signature_path: ".signature path".into(),
            hero_title: ".hero__title".into(),
            horizontal_section: ".horizontal".into(),
            horizontal_track: ".horizontal__track".into(),
            tilt_cloud: ".tilt-cloud".into(),
            tilt_items: ".tilt-cloud__item".into(),
            cards: ".card".into(),
            timeline_items: ".timeline__item".into(),
            magnetic: ".magnetic".into(),
            contact_links: ".contact__link".into(),
            footer_top: ".footer__top".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTuning {
    pub hero_stagger_ms: u64,
    pub tilt_max_deg: f32,
    pub parallax_speed: f32,
    pub timeline_offset_px: f32,
    pub magnetic_strength: f32,
    pub magnetic_radius_px: f32,
    pub contact_stagger_ms: u64,
}

impl Default for SectionTuning {
    fn default() -> Self {
        Self {
            hero_stagger_ms: 30,
            tilt_max_deg: 12.0,
            parallax_speed: 10.0,
            timeline_offset_px: 60.0,
            magnetic_strength: 0.35,
            magnetic_radius_px: 40.0,
            contact_stagger_ms: 80,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trail: TrailConfig,
    pub tap: TapConfig,
    pub preloader: PreloaderConfig,
    pub selectors: Selectors,
    pub sections: SectionTuning,
    /// Directory scanned for trail images.
    pub asset_dir: Option<PathBuf>,
    /// Seed for the rotation RNG; unseeded when absent.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| FxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(source).map_err(|e| FxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` or `.toml` file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.trail.threshold_px.is_finite() && self.trail.threshold_px > 0.0) {
            return Err(FxError::Config(format!(
                "trail.threshold_px must be positive, got {}",
                self.trail.threshold_px
            )));
        }
        for (name, deg) in [
            ("trail", self.trail.max_rotation_deg),
            ("tap", self.tap.max_rotation_deg),
        ] {
            if !(deg.is_finite() && deg >= 0.0) {
                return Err(FxError::Config(format!(
                    "{name}.max_rotation_deg must be a non-negative number, got {deg}"
                )));
            }
        }
        if let PreloaderScript::Lines { lines, .. } = &self.preloader.script {
            if lines.is_empty() {
                return Err(FxError::Config("preloader lines script has no lines".into()));
            }
        }
        Ok(())
    }
}
