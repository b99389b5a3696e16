//! Paired input controls
//!
//! Each parameter is shown twice (slider + number entry). Editing either one
//! mirrors the raw text into the other, then the value is parsed here. DOM
//! access stays in the entry point; this module is pure.

use crate::consts::{
    DEFAULT_REFRACTIVE_INDEX, DEFAULT_THICKNESS_MM, MAX_THICKNESS_MM, MIN_THICKNESS_MM,
};
use crate::optics::PlateConfig;

/// A user-controlled parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    RefractiveIndex,
    Thickness,
}

impl Parameter {
    pub const ALL: [Parameter; 2] = [Parameter::RefractiveIndex, Parameter::Thickness];

    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::RefractiveIndex => "refractive index",
            Parameter::Thickness => "thickness",
        }
    }

    /// DOM id of the slider
    pub fn slider_id(&self) -> &'static str {
        match self {
            Parameter::RefractiveIndex => "ri",
            Parameter::Thickness => "thickness",
        }
    }

    /// DOM id of the number entry
    pub fn number_id(&self) -> &'static str {
        match self {
            Parameter::RefractiveIndex => "riNumber",
            Parameter::Thickness => "thicknessNumber",
        }
    }

    /// Text both controls should show after a recompute, if it differs from
    /// what the user typed
    ///
    /// Thickness snaps to its clamped value at one decimal; the index is left
    /// as typed (the engine floors it internally).
    pub fn normalized_display(&self, value: f64) -> Option<String> {
        match self {
            Parameter::RefractiveIndex => None,
            Parameter::Thickness => Some(format!(
                "{:.1}",
                value.max(MIN_THICKNESS_MM).min(MAX_THICKNESS_MM)
            )),
        }
    }
}

/// Parse raw control text
///
/// Returns `None` for empty, non-numeric or non-finite input.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Last accepted value of each parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlValues {
    pub refractive_index: f64,
    pub thickness_mm: f64,
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            refractive_index: DEFAULT_REFRACTIVE_INDEX,
            thickness_mm: DEFAULT_THICKNESS_MM,
        }
    }
}

impl ControlValues {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::RefractiveIndex => self.refractive_index,
            Parameter::Thickness => self.thickness_mm,
        }
    }

    /// Accept new control text for a parameter
    ///
    /// Unparseable text keeps the previous value and returns `false`.
    pub fn apply(&mut self, parameter: Parameter, raw: &str) -> bool {
        let Some(value) = parse_value(raw) else {
            log::warn!("Ignoring {} input {:?}", parameter.as_str(), raw);
            return false;
        };

        match parameter {
            Parameter::RefractiveIndex => self.refractive_index = value,
            Parameter::Thickness => {
                self.thickness_mm = value.max(MIN_THICKNESS_MM).min(MAX_THICKNESS_MM)
            }
        }
        true
    }

    /// Engine inputs for the current values
    pub fn plate(&self) -> PlateConfig {
        PlateConfig::new(self.refractive_index, self.thickness_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value(" 2 "), Some(2.0));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn test_apply_keeps_last_valid() {
        let mut values = ControlValues::default();
        assert!(values.apply(Parameter::RefractiveIndex, "1.7"));
        assert!(!values.apply(Parameter::RefractiveIndex, "1.7x"));
        assert_eq!(values.refractive_index, 1.7);
    }

    #[test]
    fn test_thickness_clamped_on_apply() {
        let mut values = ControlValues::default();
        values.apply(Parameter::Thickness, "0.05");
        assert_eq!(values.thickness_mm, 0.3);
        values.apply(Parameter::Thickness, "12");
        assert_eq!(values.thickness_mm, 10.0);
    }

    #[test]
    fn test_index_not_clamped_until_engine() {
        let mut values = ControlValues::default();
        values.apply(Parameter::RefractiveIndex, "0.8");
        assert_eq!(values.refractive_index, 0.8);
        assert_eq!(values.plate().refractive_index(), 1.0);
    }

    #[test]
    fn test_normalized_display() {
        assert_eq!(Parameter::Thickness.normalized_display(5.0).as_deref(), Some("5.0"));
        assert_eq!(Parameter::Thickness.normalized_display(0.1).as_deref(), Some("0.3"));
        assert_eq!(Parameter::Thickness.normalized_display(11.0).as_deref(), Some("10.0"));
        assert_eq!(Parameter::RefractiveIndex.normalized_display(1.5), None);
    }

    #[test]
    fn test_control_ids_distinct() {
        let mut ids: Vec<&str> = Parameter::ALL
            .iter()
            .flat_map(|p| [p.slider_id(), p.number_id()])
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
