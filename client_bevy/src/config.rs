use bevy::log::{info, warn};
use space_race_sim::{ConfigError, GameConfig, Variant};

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH_ENV: &str = "SPACE_RACE_CONFIG";
#[cfg(not(target_arch = "wasm32"))]
const VARIANT_ENV: &str = "SPACE_RACE_VARIANT";

/// Resolve the config for a new race.
///
/// A JSON file keeps its own seed so runs can be replayed; presets get a
/// fresh seed from the clock.
pub(crate) fn load_game_config() -> GameConfig {
    let variant = match requested_variant() {
        Some(Ok(variant)) => variant,
        Some(Err(err)) => {
            warn!("{err}; using the {} preset", Variant::default().as_str());
            Variant::default()
        }
        None => Variant::default(),
    };

    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        match GameConfig::from_json_file(&path) {
            Ok(config) => {
                info!(
                    "loaded {} config from {path} (seed {})",
                    config.variant.as_str(),
                    config.rng_seed
                );
                return config;
            }
            Err(err) => bevy::log::error!("{err}; falling back to the {} preset", variant.as_str()),
        }
    }

    let mut config = GameConfig::preset(variant);
    config.rng_seed = clock_seed();
    info!(
        "using {} preset (seed {})",
        config.variant.as_str(),
        config.rng_seed
    );
    config
}

/// Config for a restart: same rules, new course.
pub(crate) fn reseeded(config: &GameConfig) -> GameConfig {
    let mut next = config.clone();
    next.rng_seed = clock_seed();
    next
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn variant_from_page_url(href: &str) -> Option<Result<Variant, ConfigError>> {
    let url = url::Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "variant")
        .map(|(_, value)| value.parse())
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_variant() -> Option<Result<Variant, ConfigError>> {
    std::env::var(VARIANT_ENV).ok().map(|v| v.parse())
}

#[cfg(target_arch = "wasm32")]
fn requested_variant() -> Option<Result<Variant, ConfigError>> {
    let href = web_sys::window()?.location().href().ok()?;
    variant_from_page_url(&href)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| (p.now() * 1000.0) as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_selects_variant() {
        let parsed = variant_from_page_url("https://example.org/race/?variant=Classic&x=1");
        assert!(matches!(parsed, Some(Ok(Variant::Classic))));
    }

    #[test]
    fn page_url_without_variant_is_none() {
        assert!(variant_from_page_url("http://localhost:8080/").is_none());
        assert!(variant_from_page_url("not a url").is_none());
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let parsed = variant_from_page_url("http://localhost/?variant=turbo");
        assert!(matches!(parsed, Some(Err(ConfigError::Invalid(_)))));
    }

    #[test]
    fn reseeding_keeps_tuning() {
        let base = GameConfig::preset(Variant::Classic);
        let next = reseeded(&base);
        assert_eq!(next.variant, Variant::Classic);
        assert_eq!(next.flight, base.flight);
        assert_eq!(next.controls, base.controls);
    }
}
