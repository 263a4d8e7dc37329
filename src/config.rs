//! Scene configuration
//!
//! Defaults are compiled in and reproduce the reference scene. A YAML document
//! can override any top-level section; ornament class sections replace the
//! whole class block.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::math::{parse_hex_color, Vec3};

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The YAML document could not be decoded
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value decoded fine but is out of range
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

const MAX_FOLIAGE: usize = 200_000;
const MAX_ORNAMENTS_PER_CLASS: usize = 10_000;

/// Closed range sampled uniformly as `min + random() * (max - min)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min {} is greater than max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Foliage particle cloud settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    pub count: usize,
    pub base_color: String,
    pub glow_color: String,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: FOLIAGE_COUNT,
            base_color: FOLIAGE_BASE_COLOR.to_string(),
            glow_color: FOLIAGE_GLOW_COLOR.to_string(),
        }
    }
}

/// One instanced ornament class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrnamentConfig {
    pub count: usize,
    /// Inertia proxy in (0, 1]; also widens the scatter shell
    pub weight: Span,
    pub scale: Span,
    pub rotation_speed: Span,
    /// Exponent on the height draw; smaller values lift ornaments towards the tip
    pub height_bias: f32,
    /// Colors cycled by instance index. Unused by classes that recolor per frame.
    #[serde(default)]
    pub palette: Vec<String>,
}

impl OrnamentConfig {
    pub fn gift_boxes() -> Self {
        Self {
            count: 18,
            weight: Span::new(0.3, 0.5),
            scale: Span::new(0.25, 0.40),
            rotation_speed: Span::new(0.2, 0.5),
            height_bias: 0.7,
            palette: palette(&["#8B0000", "#FFD700", "#0d4a3a", "#4a0d3a"]),
        }
    }

    pub fn baubles() -> Self {
        Self {
            count: 50,
            weight: Span::new(0.6, 0.9),
            scale: Span::new(0.15, 0.27),
            rotation_speed: Span::new(0.5, 1.0),
            height_bias: 0.5,
            palette: palette(&["#FFD700", "#C0C0C0", "#B8860B", "#CD853F"]),
        }
    }

    pub fn tiny_lights() -> Self {
        Self {
            count: 100,
            weight: Span::new(0.8, 1.0),
            scale: Span::new(0.04, 0.07),
            rotation_speed: Span::new(1.0, 2.0),
            height_bias: 0.3,
            palette: Vec::new(),
        }
    }

    pub fn stars() -> Self {
        Self {
            count: 30,
            weight: Span::new(0.9, 1.0),
            scale: Span::new(0.08, 0.14),
            rotation_speed: Span::new(0.8, 1.2),
            height_bias: 0.4,
            palette: palette(&["#FFD700"]),
        }
    }

    /// Parsed palette colors, in order
    pub fn palette_colors(&self) -> Vec<Vec3> {
        self.palette.iter().filter_map(|c| parse_hex_color(c)).collect()
    }

    fn validate(&self, name: &str, needs_palette: bool) -> Result<(), ConfigError> {
        if self.count > MAX_ORNAMENTS_PER_CLASS {
            return Err(ConfigError::invalid(
                format!("{}.count", name),
                format!("at most {} instances", MAX_ORNAMENTS_PER_CLASS),
            ));
        }

        let weight_field = format!("{}.weight", name);
        self.weight.validate(&weight_field)?;
        if self.weight.min <= 0.0 || self.weight.max > 1.0 {
            return Err(ConfigError::invalid(weight_field, "must lie in (0, 1]"));
        }

        let scale_field = format!("{}.scale", name);
        self.scale.validate(&scale_field)?;
        if self.scale.min <= 0.0 {
            return Err(ConfigError::invalid(scale_field, "must be positive"));
        }

        self.rotation_speed.validate(&format!("{}.rotation_speed", name))?;

        if !(self.height_bias > 0.0 && self.height_bias.is_finite()) {
            return Err(ConfigError::invalid(
                format!("{}.height_bias", name),
                "must be a positive number",
            ));
        }

        if needs_palette && self.palette.is_empty() {
            return Err(ConfigError::invalid(format!("{}.palette", name), "is empty"));
        }
        for color in &self.palette {
            if parse_hex_color(color).is_none() {
                return Err(ConfigError::invalid(
                    format!("{}.palette", name),
                    format!("'{}' is not a #rrggbb color", color),
                ));
            }
        }

        Ok(())
    }
}

/// Orbit camera defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let start = Vec3::new(CAMERA_START[0], CAMERA_START[1], CAMERA_START[2]);
        Self {
            auto_rotate: true,
            auto_rotate_speed: CAMERA_AUTO_ROTATE_SPEED,
            distance: start.length(),
        }
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Fixed seed for reproducible layouts; `None` draws from entropy
    pub seed: Option<u64>,
    pub transition_speed: f32,
    pub foliage: FoliageConfig,
    pub gift_boxes: OrnamentConfig,
    pub baubles: OrnamentConfig,
    pub tiny_lights: OrnamentConfig,
    pub stars: OrnamentConfig,
    pub camera: CameraConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            transition_speed: TRANSITION_SPEED,
            foliage: FoliageConfig::default(),
            gift_boxes: OrnamentConfig::gift_boxes(),
            baubles: OrnamentConfig::baubles(),
            tiny_lights: OrnamentConfig::tiny_lights(),
            stars: OrnamentConfig::stars(),
            camera: CameraConfig::default(),
        }
    }
}

impl TreeConfig {
    /// Parse from YAML and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: TreeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.transition_speed > 0.0 && self.transition_speed.is_finite()) {
            return Err(ConfigError::invalid("transition_speed", "must be a positive number"));
        }

        if self.foliage.count > MAX_FOLIAGE {
            return Err(ConfigError::invalid(
                "foliage.count",
                format!("at most {} particles", MAX_FOLIAGE),
            ));
        }
        for (field, color) in [
            ("foliage.base_color", &self.foliage.base_color),
            ("foliage.glow_color", &self.foliage.glow_color),
        ] {
            if parse_hex_color(color).is_none() {
                return Err(ConfigError::invalid(field, format!("'{}' is not a #rrggbb color", color)));
            }
        }

        self.gift_boxes.validate("gift_boxes", true)?;
        self.baubles.validate("baubles", true)?;
        self.tiny_lights.validate("tiny_lights", false)?;
        self.stars.validate("stars", true)?;

        if !(self.camera.distance >= CAMERA_MIN_DISTANCE && self.camera.distance <= CAMERA_MAX_DISTANCE) {
            return Err(ConfigError::invalid(
                "camera.distance",
                format!("must lie in [{}, {}]", CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE),
            ));
        }

        Ok(())
    }

    pub fn foliage_base_color(&self) -> Vec3 {
        parse_hex_color(&self.foliage.base_color).unwrap_or_default()
    }

    pub fn foliage_glow_color(&self) -> Vec3 {
        parse_hex_color(&self.foliage.glow_color).unwrap_or(Vec3::ONE)
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_config_is_valid() {
        let config = TreeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.foliage.count, 8000);
        assert_eq!(config.gift_boxes.count, 18);
        assert_eq!(config.baubles.count, 50);
        assert_eq!(config.tiny_lights.count, 100);
        assert_eq!(config.stars.count, 30);
    }

    #[test]
    fn test_weights_are_layered_by_class() {
        let config = TreeConfig::default();
        assert!(config.gift_boxes.weight.max <= config.baubles.weight.min);
        assert!(config.baubles.weight.max <= config.tiny_lights.weight.min);
        assert!(config.gift_boxes.scale.min > config.baubles.scale.min);
        assert!(config.baubles.scale.min > config.stars.scale.min);
        assert!(config.stars.scale.min > config.tiny_lights.scale.min);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TreeConfig::from_yaml("seed: 7\nfoliage:\n  count: 500\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.foliage.count, 500);
        assert_eq!(config.foliage.base_color, FOLIAGE_BASE_COLOR);
        assert_eq!(config.baubles, OrnamentConfig::baubles());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(TreeConfig::from_yaml("{}").unwrap(), TreeConfig::default());
    }

    #[test]
    fn test_class_block_override() {
        let yaml = r##"
stars:
  count: 5
  weight: { min: 0.5, max: 0.6 }
  scale: { min: 0.1, max: 0.2 }
  rotation_speed: { min: 1.0, max: 1.0 }
  height_bias: 0.9
  palette: ["#ffffff"]
"##;
        let config = TreeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.stars.count, 5);
        assert_eq!(config.stars.palette_colors(), vec![Vec3::ONE]);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = TreeConfig::from_yaml("transition_speed: 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "transition_speed"));

        let err = TreeConfig::from_yaml("foliage:\n  base_color: green\n").unwrap_err();
        assert!(err.to_string().contains("foliage.base_color"));

        let mut config = TreeConfig::default();
        config.baubles.weight = Span::new(0.9, 0.6);
        assert!(config.validate().is_err());

        let mut config = TreeConfig::default();
        config.gift_boxes.weight = Span::new(0.0, 0.5);
        assert!(config.validate().is_err());

        let mut config = TreeConfig::default();
        config.baubles.palette.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = TreeConfig::from_yaml("foliage: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_span_sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let span = Span::new(0.25, 0.4);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }
}
