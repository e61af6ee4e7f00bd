// Tunables for the particle field.
//
// The config is normally handed over from JavaScript as a JSON string. Every
// key is optional; anything missing falls back to `AnimatorConfig::default`:
//
// {
//   "particleCountCap": 50,
//   "particleCountDivisor": 20,
//   "maxConnectDistance": 150,
//   "baseSpeedRange": [3.0, 3.2],
//   "sizeRange": [0.5, 2.5],
//   "resizePolicy": "reclamp"
// }

use crate::color::Color;
use crate::error::AnimatorError;
use serde::{Deserialize, Serialize};

// What happens to particle positions when the surface is resized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    // Leave positions alone. A particle left outside a shrunk surface keeps
    // flipping its velocity every frame until it happens to get back in.
    Preserve,
    // Clamp out-of-bounds particles onto the nearest edge.
    Reclamp,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::Preserve
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    // Upper bound on particles regardless of viewport width
    pub particle_count_cap: u32,
    // One particle per this many pixels of surface width
    pub particle_count_divisor: f64,
    pub max_connect_distance: f64,
    pub base_speed_range: [f64; 2],
    pub size_range: [f64; 2],
    // Velocity components are sampled from [-spread, spread)
    pub velocity_spread: f64,
    pub particle_color: Color,
    // Alpha of this color is replaced by the per-connection opacity
    pub line_color: Color,
    pub line_opacity_scale: f64,
    pub line_width: f64,
    pub resize_policy: ResizePolicy,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            particle_count_cap: 50,
            particle_count_divisor: 20.0,
            max_connect_distance: 150.0,
            base_speed_range: [3.0, 3.2],
            size_range: [0.5, 2.5],
            velocity_spread: 0.25,
            particle_color: Color::rgba(66, 193, 225, 0.5),
            line_color: Color::from_u32(0x4299e1),
            line_opacity_scale: 0.2,
            line_width: 1.0,
            resize_policy: ResizePolicy::Preserve,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> Result<AnimatorConfig, AnimatorError> {
        let config: AnimatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnimatorError> {
        let invalid = |reason: &str| Err(AnimatorError::InvalidConfig(reason.to_owned()));

        if self.particle_count_cap == 0 {
            return invalid("particleCountCap must be at least 1");
        }
        if !(self.particle_count_divisor > 0.0) {
            return invalid("particleCountDivisor must be positive");
        }
        if !(self.max_connect_distance > 0.0) {
            return invalid("maxConnectDistance must be positive");
        }
        if !(self.line_width > 0.0) {
            return invalid("lineWidth must be positive");
        }
        if !(self.velocity_spread.is_finite() && self.velocity_spread >= 0.0) {
            return invalid("velocitySpread must be finite and not negative");
        }
        let [min_speed, max_speed] = self.base_speed_range;
        if !(min_speed.is_finite() && max_speed.is_finite() && min_speed <= max_speed) {
            return invalid("baseSpeedRange must be finite with min <= max");
        }
        let [min_size, max_size] = self.size_range;
        if !(min_size >= 0.0 && max_size.is_finite() && min_size <= max_size) {
            return invalid("sizeRange must be finite, non-negative, with min <= max");
        }
        Ok(())
    }

    // `min(cap, width / divisor)`, rounded up, never less than one.
    pub fn particle_count(&self, width: f64) -> usize {
        let by_width = (width / self.particle_count_divisor).ceil();
        let count = by_width.min(self.particle_count_cap as f64);
        if count >= 1.0 {
            count as usize
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_hits_the_cap() {
        let config = AnimatorConfig::default();
        assert_eq!(config.particle_count(1000.0), 50);
        assert_eq!(config.particle_count(4000.0), 50);
    }

    #[test]
    fn narrow_viewport_scales_with_width() {
        let config = AnimatorConfig::default();
        assert_eq!(config.particle_count(100.0), 5);
        assert_eq!(config.particle_count(105.0), 6);
    }

    #[test]
    fn count_is_at_least_one() {
        let config = AnimatorConfig::default();
        assert_eq!(config.particle_count(1.0), 1);
        assert_eq!(config.particle_count(0.0), 1);
    }

    #[test]
    fn json_keys_are_optional() {
        let config = AnimatorConfig::from_json(r#"{ "particleCountCap": 10 }"#).unwrap();
        assert_eq!(config.particle_count_cap, 10);
        assert_eq!(config.max_connect_distance, 150.0);
        assert_eq!(config.resize_policy, ResizePolicy::Preserve);

        let config = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(config, AnimatorConfig::default());
    }

    #[test]
    fn json_resize_policy_is_lowercase() {
        let config = AnimatorConfig::from_json(r#"{ "resizePolicy": "reclamp" }"#).unwrap();
        assert_eq!(config.resize_policy, ResizePolicy::Reclamp);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match AnimatorConfig::from_json("{ particleCountCap: }") {
            Err(AnimatorError::ConfigParse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad = vec![
            AnimatorConfig {
                particle_count_cap: 0,
                ..Default::default()
            },
            AnimatorConfig {
                particle_count_divisor: 0.0,
                ..Default::default()
            },
            AnimatorConfig {
                max_connect_distance: -1.0,
                ..Default::default()
            },
            AnimatorConfig {
                base_speed_range: [4.0, 3.0],
                ..Default::default()
            },
            AnimatorConfig {
                size_range: [-1.0, 2.0],
                ..Default::default()
            },
            AnimatorConfig {
                line_width: f64::NAN,
                ..Default::default()
            },
            AnimatorConfig {
                base_speed_range: [3.0, f64::INFINITY],
                ..Default::default()
            },
            AnimatorConfig {
                base_speed_range: [f64::NEG_INFINITY, 3.0],
                ..Default::default()
            },
            AnimatorConfig {
                size_range: [0.5, f64::INFINITY],
                ..Default::default()
            },
            AnimatorConfig {
                velocity_spread: f64::INFINITY,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(AnimatorError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
        assert!(AnimatorConfig::default().validate().is_ok());
    }
}
