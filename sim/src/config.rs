use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Upper bounds on counts; a pickup or course build must stay cheap.
pub const MAX_PLANETS: usize = 1_000;
pub const MAX_RINGS: usize = 1_000;
pub const MAX_PARTICLES_PER_EXPLOSION: usize = 20_000;

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

/// The two flavours of the game. They share all rules and differ in tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    Classic,
    #[default]
    Deluxe,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Deluxe => "deluxe",
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "deluxe" => Ok(Variant::Deluxe),
            other => Err(ConfigError::Invalid(format!("unknown variant '{other}'"))),
        }
    }
}

/// Key that starts a session (and restarts after game over).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartKey {
    Space,
    W,
}

impl StartKey {
    pub fn label(self) -> &'static str {
        match self {
            StartKey::Space => "SPACE",
            StartKey::W => "W",
        }
    }
}

/// Continuous extra turn while the pointer rests near the edge of its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerTurn {
    /// Fraction of the pointer range after which turning kicks in.
    pub threshold: f32,
    /// Radians per reference frame at full overshoot.
    pub rate: f32,
}

/// Ship handling. Rates are per reference frame (60 Hz).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightConfig {
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    /// Pitch at full pointer deflection (radians)
    pub max_pitch: f32,
    /// Yaw at full pointer deflection (radians)
    pub max_yaw: f32,
    #[serde(default)]
    pub corner_turn: Option<CornerTurn>,
    /// Chase camera offset in ship-local space
    pub camera_offset: Vec3,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.02,
            deceleration: 0.0008,
            max_speed: 0.5,
            max_pitch: FRAC_PI_2,
            max_yaw: PI * 1.5,
            corner_turn: Some(CornerTurn {
                threshold: 0.8,
                rate: 0.02,
            }),
            camera_offset: Vec3::new(0.0, 5.0, 15.0),
        }
    }
}

/// Layout of planets and rings plus the hit-test tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseConfig {
    pub planet_count: usize,
    /// Edge length of the cube planets are scattered in
    pub planet_spread: f32,
    pub planet_radius_min: f32,
    pub planet_radius_max: f32,
    /// Added to a planet's radius for the crash test
    pub hull_margin: f32,
    /// Distance within which a planet's message is shown
    pub message_range: f32,
    pub ring_count: usize,
    pub ring_path_radius: f32,
    /// Vertical squash of the ring path
    pub ring_path_flatten: f32,
    /// Max distance from a ring's plane that still counts as passing through
    pub capture_depth: f32,
    /// Max in-plane distance from a ring's center that counts as passing through
    pub capture_radius: f32,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            planet_count: 8,
            planet_spread: 500.0,
            planet_radius_min: 8.0,
            planet_radius_max: 20.0,
            hull_margin: 1.0,
            message_range: 10.0,
            ring_count: 10,
            ring_path_radius: 100.0,
            ring_path_flatten: 0.5,
            capture_depth: 2.0,
            capture_radius: 8.0,
        }
    }
}

/// How explosion particles leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "camelCase")]
pub enum ParticleLifetime {
    /// Each particle fades out at its own random rate (life per second).
    #[serde(rename_all = "camelCase")]
    Fade { min_rate: f32, max_rate: f32 },
    /// The whole explosion disappears together after a fixed time.
    Timer { seconds: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsConfig {
    pub bursts: usize,
    pub particles_per_burst: usize,
    /// Edge length of the cube burst centers are jittered in
    pub burst_jitter: f32,
    /// Downward velocity added per reference frame
    pub gravity: f32,
    pub lifetime: ParticleLifetime,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            bursts: 8,
            particles_per_burst: 200,
            burst_jitter: 5.0,
            gravity: 0.001,
            lifetime: ParticleLifetime::Fade {
                min_rate: 0.4,
                max_rate: 0.7,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsConfig {
    pub start_key: StartKey,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            start_key: StartKey::Space,
            invert_x: true,
            invert_y: false,
        }
    }
}

/// Full game configuration. `Default` is the deluxe preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub variant: Variant,
    pub rng_seed: u64,
    pub flight: FlightConfig,
    pub course: CourseConfig,
    pub effects: EffectsConfig,
    pub controls: ControlsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Variant::Deluxe)
    }
}

impl GameConfig {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Deluxe => Self {
                variant,
                rng_seed: 42,
                flight: FlightConfig::default(),
                course: CourseConfig::default(),
                effects: EffectsConfig::default(),
                controls: ControlsConfig::default(),
            },
            Variant::Classic => Self {
                variant,
                rng_seed: 42,
                flight: FlightConfig {
                    max_yaw: PI,
                    corner_turn: None,
                    ..FlightConfig::default()
                },
                course: CourseConfig::default(),
                effects: EffectsConfig {
                    bursts: 1,
                    particles_per_burst: 50,
                    burst_jitter: 0.0,
                    gravity: 0.0,
                    lifetime: ParticleLifetime::Timer { seconds: 1.0 },
                },
                controls: ControlsConfig {
                    start_key: StartKey::W,
                    invert_x: false,
                    invert_y: false,
                },
            },
        }
    }

    /// Parse a JSON config. Missing fields are taken from the preset named by
    /// `variant` (deluxe when absent). The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Self::preset(variant))?;
        merge_json(&mut merged, overrides);

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        if !f.acceleration.is_finite() || f.acceleration <= 0.0 {
            return Err(invalid("acceleration must be finite and > 0"));
        }
        if !f.deceleration.is_finite() || f.deceleration <= 0.0 {
            return Err(invalid("deceleration must be finite and > 0"));
        }
        if !f.max_speed.is_finite() || f.max_speed < f.deceleration {
            return Err(invalid("max_speed must be finite and >= deceleration"));
        }
        if !f.max_pitch.is_finite() || !f.max_yaw.is_finite() {
            return Err(invalid("max_pitch and max_yaw must be finite"));
        }
        if let Some(corner) = f.corner_turn {
            if !(0.0..1.0).contains(&corner.threshold) {
                return Err(invalid("corner threshold must be in [0, 1)"));
            }
            if !corner.rate.is_finite() || corner.rate < 0.0 {
                return Err(invalid("corner rate must be finite and >= 0"));
            }
        }
        if !f.camera_offset.is_finite() {
            return Err(invalid("camera_offset must be finite"));
        }

        let c = &self.course;
        if c.ring_count == 0 || c.ring_count > MAX_RINGS {
            return Err(ConfigError::Invalid(format!(
                "ring_count must be in 1..={MAX_RINGS}"
            )));
        }
        if c.planet_count > MAX_PLANETS {
            return Err(ConfigError::Invalid(format!(
                "planet_count must be <= {MAX_PLANETS}"
            )));
        }
        if !c.planet_spread.is_finite() || c.planet_spread < 0.0 {
            return Err(invalid("planet_spread must be finite and >= 0"));
        }
        if !c.planet_radius_min.is_finite()
            || c.planet_radius_min <= 0.0
            || !c.planet_radius_max.is_finite()
            || c.planet_radius_max < c.planet_radius_min
        {
            return Err(invalid(
                "planet radii must be finite with 0 < planet_radius_min <= planet_radius_max",
            ));
        }
        if !c.ring_path_radius.is_finite() || c.ring_path_radius <= 0.0 {
            return Err(invalid("ring_path_radius must be finite and > 0"));
        }
        for (value, name) in [
            (c.hull_margin, "hull_margin"),
            (c.message_range, "message_range"),
            (c.capture_depth, "capture_depth"),
            (c.capture_radius, "capture_radius"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        let e = &self.effects;
        let per_explosion = e.bursts.checked_mul(e.particles_per_burst);
        if !matches!(per_explosion, Some(n) if n <= MAX_PARTICLES_PER_EXPLOSION) {
            return Err(ConfigError::Invalid(format!(
                "bursts * particles_per_burst must be <= {MAX_PARTICLES_PER_EXPLOSION}"
            )));
        }
        if !e.burst_jitter.is_finite() || e.burst_jitter < 0.0 {
            return Err(invalid("burst_jitter must be finite and >= 0"));
        }
        if !e.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        match e.lifetime {
            ParticleLifetime::Fade { min_rate, max_rate } => {
                if !min_rate.is_finite() || min_rate <= 0.0 || !max_rate.is_finite() {
                    return Err(invalid("fade min_rate must be finite and > 0"));
                }
                if max_rate < min_rate {
                    return Err(invalid("fade max_rate must be >= min_rate"));
                }
            }
            ParticleLifetime::Timer { seconds } => {
                if !seconds.is_finite() || seconds <= 0.0 {
                    return Err(invalid("timer seconds must be finite and > 0"));
                }
            }
        }

        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
