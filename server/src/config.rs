//! Startup configuration, read once from the environment and cached for
//! the life of the process (§6.1). Required settings with no sane default
//! panic at startup if missing or unparsable; settings with a stated
//! default fall back to it instead.

use std::{env, time::Duration};

lazy_static::lazy_static! {
    /// The single, process-wide configuration, populated the first time
    /// it's accessed.
    pub static ref SETTINGS: Settings = Settings::from_env();
}

/// Process-wide startup configuration.
#[derive(Debug)]
pub struct Settings {
    /// Port the transport collaborator should listen on.
    pub listen_port: u16,
    /// Client origins the transport collaborator should accept connections from.
    pub allowed_origins: Vec<String>,
    /// Path to the word list used to build the lexicon and GADDAG.
    pub lexicon_path: String,
    /// Minimum number of tiles that must remain in the bag for an exchange
    /// to be allowed.
    pub min_bag_for_exchange: usize,
    /// How long a disconnected player's seat is held before the game gives
    /// up on them.
    pub disconnect_grace: Duration,
    /// Maximum number of players allowed in a single game.
    pub max_players: usize,
    /// Maximum number of tiles held on a single rack.
    pub max_rack_size: usize,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            listen_port: required("LISTEN_PORT"),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .expect("`ALLOWED_ORIGINS` env variable")
                .split(',')
                .map(str::to_string)
                .collect(),
            lexicon_path: env::var("LEXICON_PATH").expect("`LEXICON_PATH` env variable"),
            min_bag_for_exchange: with_default("MIN_BAG_FOR_EXCHANGE", 7),
            disconnect_grace: Duration::from_secs(with_default(
                "DISCONNECT_GRACE_SECONDS",
                20 * 60,
            )),
            max_players: with_default("MAX_PLAYERS", 4),
            max_rack_size: with_default("MAX_RACK_SIZE", 7),
        }
    }
}

/// Reads and parses a required environment variable, panicking if it's
/// missing or doesn't parse — fail fast, before accepting any traffic.
fn required<T: std::str::FromStr>(name: &str) -> T {
    env::var(name)
        .unwrap_or_else(|_| panic!("`{name}` env variable"))
        .parse()
        .unwrap_or_else(|_| panic!("`{name}` should be a valid {}", std::any::type_name::<T>()))
}

/// Reads and parses an optional environment variable, falling back to
/// `default` when it's unset.
fn with_default<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(val) => val
            .parse()
            .unwrap_or_else(|_| panic!("`{name}` should be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        env::set_var("LISTEN_PORT", "8080");
        env::set_var("ALLOWED_ORIGINS", "http://localhost:3000");
        env::set_var("LEXICON_PATH", "words.txt");
        env::remove_var("MIN_BAG_FOR_EXCHANGE");
        env::remove_var("DISCONNECT_GRACE_SECONDS");
        env::remove_var("MAX_PLAYERS");
        env::remove_var("MAX_RACK_SIZE");

        let settings = Settings::from_env();
        assert_eq!(settings.min_bag_for_exchange, 7);
        assert_eq!(settings.disconnect_grace, Duration::from_secs(20 * 60));
        assert_eq!(settings.max_players, 4);
        assert_eq!(settings.max_rack_size, 7);
    }
}
