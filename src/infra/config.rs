//! Centralized configuration (environment variables + defaults).

use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Address the API server binds to.
pub fn bind_addr() -> String {
    try_load("INVENTORY_BIND_ADDR", DEFAULT_BIND_ADDR.to_string())
}

/// PostgreSQL connection string. When unset, items are kept in memory.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty())
}

/// Pool size for the PostgreSQL backend.
pub fn database_max_connections() -> u32 {
    try_load::<u32>("DATABASE_MAX_CONNECTIONS", 5).max(1)
}

/// Client config file holding the server address.
pub fn client_config_path() -> String {
    env::var("INVENTORY_CLIENT_CONFIG").unwrap_or_else(|_| "barcode.cfg".to_string())
}

/// Hotkeys used when `INVENTORY_LOCATION_SHORTCUTS` is unset.
pub const DEFAULT_LOCATION_SHORTCUTS: &str = "l=Levi Fox Hall Tech Box,\
d=Drama Studio Tech Box,\
r=Rig,\
s=Storage outside Levi Fox Hall Tech Box";

/// Raw `key=Location,key2=Other` shortcut list for the terminal client.
/// An explicitly empty variable disables the shortcuts.
pub fn location_shortcuts() -> String {
    env::var("INVENTORY_LOCATION_SHORTCUTS")
        .unwrap_or_else(|_| DEFAULT_LOCATION_SHORTCUTS.to_string())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LocationShortcuts;

    #[test]
    fn unset_variable_yields_typed_default() {
        let v: u32 = try_load("INVENTORY_TEST_UNSET_VARIABLE_FOR_CONFIG", 7);
        assert_eq!(v, 7);
    }

    #[test]
    fn unparsable_value_falls_back_to_default() {
        env::set_var("INVENTORY_TEST_BAD_U32", "not-a-number");
        let v: u32 = try_load("INVENTORY_TEST_BAD_U32", 5);
        assert_eq!(v, 5);

        env::set_var("INVENTORY_TEST_GOOD_U32", "12");
        let v: u32 = try_load("INVENTORY_TEST_GOOD_U32", 5);
        assert_eq!(v, 12);
    }

    #[test]
    fn default_shortcuts_cover_the_usual_locations() {
        let shortcuts = LocationShortcuts::parse(DEFAULT_LOCATION_SHORTCUTS);
        assert_eq!(shortcuts.expand("l"), "Levi Fox Hall Tech Box");
        assert_eq!(shortcuts.expand("d"), "Drama Studio Tech Box");
        assert_eq!(shortcuts.expand("r"), "Rig");
        assert_eq!(shortcuts.expand("s"), "Storage outside Levi Fox Hall Tech Box");
    }
}
