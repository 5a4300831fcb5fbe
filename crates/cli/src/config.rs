//! Engine configuration from the environment.

use availability_engine::EngineConfig;

pub const NOTIFY_ME_WEEKS_VAR: &str = "AVAILABILITY_NOTIFY_ME_WEEKS";
pub const HISTORY_LIMIT_VAR: &str = "AVAILABILITY_HISTORY_LIMIT";

/// Read overrides from process environment variables.
pub fn from_env() -> EngineConfig {
    from_lookup(|key| std::env::var(key).ok())
}

/// Apply overrides found through `lookup` on top of the defaults. Values that
/// do not parse are logged and ignored.
pub fn from_lookup<F>(lookup: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = EngineConfig::default();

    if let Some(weeks) = parsed(&lookup, NOTIFY_ME_WEEKS_VAR) {
        config = config.with_notify_me_weeks(weeks);
    }
    if let Some(limit) = parsed(&lookup, HISTORY_LIMIT_VAR) {
        config = config.with_history_limit(limit);
    }

    config
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid configuration value");
            None
        }
    }
}
