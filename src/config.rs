//! Application settings loaded from JSON.
//!
//! Every field has a default so a partial file (or no file) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{DoodleError, DoodleResult};

/// Top-level settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Live background scene tuning.
    pub scene: SceneConfig,
    /// Share image settings.
    pub share: ShareConfig,
}

impl AppConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> DoodleResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DoodleError::config(format!("read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Parse and validate JSON text.
    pub fn from_json(text: &str) -> DoodleResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| DoodleError::config(format!("parse config json: {e}")))?;
        cfg.scene.validate()?;
        Ok(cfg)
    }
}

/// Population parameters for one viewport class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PopulationConfig {
    /// Number of doodles.
    pub count: usize,
    /// Smallest doodle size.
    pub size_min: f64,
    /// Size range above `size_min`.
    pub size_span: f64,
    /// Smallest float amplitude.
    pub float_amplitude_min: f64,
    /// Amplitude range above `float_amplitude_min`.
    pub float_amplitude_span: f64,
}

impl PopulationConfig {
    const MOBILE: Self = Self {
        count: 20,
        size_min: 8.0,
        size_span: 18.0,
        float_amplitude_min: 5.0,
        float_amplitude_span: 10.0,
    };

    const DESKTOP: Self = Self {
        count: 35,
        size_min: 15.0,
        size_span: 35.0,
        float_amplitude_min: 10.0,
        float_amplitude_span: 20.0,
    };
}

/// Live background scene tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Viewports narrower than this use the mobile population.
    pub mobile_breakpoint: f64,
    pub mobile: PopulationConfig,
    pub desktop: PopulationConfig,
    pub float_speed_min: f64,
    pub float_speed_span: f64,
    /// Largest per-frame rotation step, either direction.
    pub rotation_speed_max: f64,
    pub opacity_min: f64,
    pub opacity_span: f64,
    pub grid_spacing: f64,
    /// Clock advance per frame.
    pub clock_step: f64,
    /// Fraction of the remaining distance covered per frame.
    pub easing: f64,
    pub repulsion_radius: f64,
    /// Displacement at zero distance from the pointer.
    pub repulsion_strength: f64,
    pub stroke_width: f64,
    pub background: Rgba8,
    pub grid_color: Rgba8,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            mobile: PopulationConfig::MOBILE,
            desktop: PopulationConfig::DESKTOP,
            float_speed_min: 0.3,
            float_speed_span: 0.5,
            rotation_speed_max: 0.01,
            opacity_min: 0.15,
            opacity_span: 0.25,
            grid_spacing: 60.0,
            clock_step: 0.016,
            easing: 0.08,
            repulsion_radius: 200.0,
            repulsion_strength: 40.0,
            stroke_width: 2.5,
            background: Rgba8::rgb(0x1a, 0x1a, 0x2e),
            grid_color: Rgba8::rgba(255, 255, 255, 8),
        }
    }
}

impl SceneConfig {
    /// Whether a viewport of `width` counts as mobile.
    pub fn is_mobile(&self, width: f64) -> bool {
        width < self.mobile_breakpoint
    }

    /// Population parameters for a viewport of `width`.
    pub fn population(&self, width: f64) -> &PopulationConfig {
        if self.is_mobile(width) {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> DoodleResult<()> {
        fn positive(name: &str, v: f64) -> DoodleResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(DoodleError::config(format!("{name} must be finite and > 0")))
            }
        }
        fn non_negative(name: &str, v: f64) -> DoodleResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(DoodleError::config(format!("{name} must be finite and >= 0")))
            }
        }

        positive("mobile_breakpoint", self.mobile_breakpoint)?;
        for (class, p) in [("mobile", &self.mobile), ("desktop", &self.desktop)] {
            if p.count == 0 {
                return Err(DoodleError::config(format!("{class}.count must be > 0")));
            }
            positive(&format!("{class}.size_min"), p.size_min)?;
            non_negative(&format!("{class}.size_span"), p.size_span)?;
            non_negative(&format!("{class}.float_amplitude_min"), p.float_amplitude_min)?;
            non_negative(&format!("{class}.float_amplitude_span"), p.float_amplitude_span)?;
        }
        non_negative("float_speed_min", self.float_speed_min)?;
        non_negative("float_speed_span", self.float_speed_span)?;
        non_negative("rotation_speed_max", self.rotation_speed_max)?;
        non_negative("opacity_min", self.opacity_min)?;
        non_negative("opacity_span", self.opacity_span)?;
        if self.opacity_min + self.opacity_span > 1.0 {
            return Err(DoodleError::config("opacity band must stay within [0, 1]"));
        }
        positive("grid_spacing", self.grid_spacing)?;
        positive("clock_step", self.clock_step)?;
        positive("easing", self.easing)?;
        if self.easing > 1.0 {
            return Err(DoodleError::config("easing must be in (0, 1]"));
        }
        positive("repulsion_radius", self.repulsion_radius)?;
        non_negative("repulsion_strength", self.repulsion_strength)?;
        positive("stroke_width", self.stroke_width)?;
        Ok(())
    }
}

/// Share image settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Display font file tried before any family lookup.
    pub font_path: Option<PathBuf>,
    /// Family looked up in the system font database.
    pub font_family: String,
    /// Caption drawn near the bottom edge.
    pub branding: String,
    /// Fixed seed for the ornament RNG; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: "Caveat".to_owned(),
            branding: "dailydoseofmotivation.app".to_owned(),
            seed: None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
