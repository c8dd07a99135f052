use std::path::PathBuf;

pub const DEFAULT_DEV_SERVER_PORT: u16 = 5000;

pub fn dev_server_port() -> u16 {
    std::env::var("DEV_SERVER_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_DEV_SERVER_PORT)
}

/// JSON file of profile payloads keyed by username, if configured.
pub fn fixtures_path() -> Option<PathBuf> {
    std::env::var("FRIENDS_FIXTURES")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_garbage() {
        temp_env::with_var("DEV_SERVER_PORT", Some("not-a-port"), || {
            assert_eq!(dev_server_port(), DEFAULT_DEV_SERVER_PORT);
        });
        temp_env::with_var("DEV_SERVER_PORT", Some("0"), || {
            assert_eq!(dev_server_port(), DEFAULT_DEV_SERVER_PORT);
        });
        temp_env::with_var("DEV_SERVER_PORT", Some("8081"), || {
            assert_eq!(dev_server_port(), 8081);
        });
    }

    #[test]
    fn blank_fixtures_path_is_ignored() {
        temp_env::with_var("FRIENDS_FIXTURES", Some("  "), || {
            assert_eq!(fixtures_path(), None);
        });
        temp_env::with_var_unset("FRIENDS_FIXTURES", || {
            assert_eq!(fixtures_path(), None);
        });
        temp_env::with_var("FRIENDS_FIXTURES", Some("fixtures.json"), || {
            assert_eq!(fixtures_path(), Some(PathBuf::from("fixtures.json")));
        });
    }
}
