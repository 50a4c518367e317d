use std::{env, net::SocketAddr};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_COOKIE_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub cookie_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let cookie_path = lookup("APP_COOKIE_PATH")
            .map(|value| value.trim().to_string())
            .filter(|value| is_cookie_path(value))
            .unwrap_or_else(|| DEFAULT_COOKIE_PATH.to_string());

        Self { port, cookie_path }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

// Must survive as a `Set-Cookie` attribute: visible ASCII, no separator.
fn is_cookie_path(value: &str) -> bool {
    value.starts_with('/') && value.bytes().all(|b| b.is_ascii_graphic() && b != b';')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_port_and_cookie_path() {
        let config = Config::from_lookup(lookup(&[("PORT", "9123"), ("APP_COOKIE_PATH", "/board")]));
        assert_eq!(config.port, 9123);
        assert_eq!(config.cookie_path, "/board");
        assert_eq!(config.bind_addr().port(), 9123);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "http"), ("APP_COOKIE_PATH", "board;x")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn cookie_path_must_be_header_safe() {
        for path in ["/board\u{7}x", "/caf\u{e9}", "/a b", "/x\ty"] {
            let config = Config::from_lookup(lookup(&[("APP_COOKIE_PATH", path)]));
            assert_eq!(config.cookie_path, "/", "{path:?} accepted");
        }
        let config = Config::from_lookup(lookup(&[("APP_COOKIE_PATH", "/res/boards")]));
        assert_eq!(config.cookie_path, "/res/boards");
    }
}
