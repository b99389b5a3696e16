//! Scene settings
//!
//! Rendering scale, viewport and entry placement. Read once at startup from
//! JSON embedded in the page (web) or a file (native); never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::controls::ControlValues;
use crate::optics::{PlacementPolicy, SceneConfig, Viewport};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rendering scale, shared by engine and renderer
    pub px_per_mm: f64,
    /// Viewport size used when there is no canvas to measure (native)
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Incoming ray placement
    pub placement: PlacementPolicy,

    // === Initial control values ===
    pub initial_refractive_index: f64,
    pub initial_thickness_mm: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            px_per_mm: DEFAULT_PX_PER_MM,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            placement: PlacementPolicy::default(),
            initial_refractive_index: DEFAULT_REFRACTIVE_INDEX,
            initial_thickness_mm: DEFAULT_THICKNESS_MM,
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Engine/renderer framing for these settings
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig::new(
            Viewport::new(self.viewport_width, self.viewport_height),
            self.px_per_mm,
            self.placement,
        )
    }

    /// Control values before any user input
    pub fn initial_controls(&self) -> ControlValues {
        ControlValues {
            refractive_index: self.initial_refractive_index,
            thickness_mm: self
                .initial_thickness_mm
                .max(MIN_THICKNESS_MM)
                .min(MAX_THICKNESS_MM),
        }
    }

    /// Element holding page-embedded settings JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "optical-flat-settings";

    /// Environment variable naming a settings file
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "OPTICAL_FLAT_SETTINGS";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                Self::from_json_or_default(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `OPTICAL_FLAT_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {path}");
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Could not read {path} ({e}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"px_per_mm": 10.0}"#).unwrap();
        assert_eq!(settings.px_per_mm, 10.0);
        assert_eq!(settings.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(settings.placement, PlacementPolicy::default());
    }

    #[test]
    fn test_nested_placement() {
        let settings =
            Settings::from_json(r#"{"placement": {"fallback_y_fraction": 0.5}}"#).unwrap();
        assert_eq!(settings.placement.fallback_y_fraction, 0.5);
        assert_eq!(settings.placement.edge_margin_px, 20.0);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Settings::from_json("{ not json").is_err());
        assert_eq!(Settings::from_json_or_default("{ not json"), Settings::default());
    }

    #[test]
    fn test_scene_config_uses_scale() {
        let settings = Settings {
            px_per_mm: 12.0,
            ..Default::default()
        };
        let scene = settings.scene_config();
        assert_eq!(scene.px_per_mm(), 12.0);
        assert_eq!(scene.viewport().width, DEFAULT_VIEWPORT_WIDTH);
    }

    #[test]
    fn test_initial_controls_clamped() {
        let settings = Settings {
            initial_thickness_mm: 30.0,
            ..Default::default()
        };
        let controls = settings.initial_controls();
        assert_eq!(controls.thickness_mm, 10.0);
        assert_eq!(controls.refractive_index, DEFAULT_REFRACTIVE_INDEX);
    }

    #[test]
    fn test_round_trip_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_reads_file_named_by_env_var() {
        let path = std::env::temp_dir().join(format!(
            "optical-flat-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"px_per_mm": 9.0}"#).unwrap();

        // Only this test touches the variable
        unsafe { std::env::set_var(Settings::ENV_VAR, &path) };
        let settings = Settings::load();
        unsafe { std::env::remove_var(Settings::ENV_VAR) };
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.px_per_mm, 9.0);
        assert_eq!(settings.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
    }
}
