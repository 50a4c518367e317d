use crate::errors::StoreError;
use crate::store::KvStore;
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use tracing::debug;

const MAX_COOKIE_BYTES: usize = 4096;

/// Cookies sent by the browser plus the writes queued for the response.
///
/// Reads see queued writes first, mirroring how `document.cookie` reflects an
/// assignment immediately.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: String,
    incoming: Vec<(String, String)>,
    pending: Vec<PendingCookie>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCookie {
    pub name: String,
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CookieJar {
    pub fn from_headers(headers: &HeaderMap, path: &str) -> Self {
        let mut incoming = Vec::new();
        for raw in headers.get_all(header::COOKIE) {
            incoming.extend(parse_cookie_header(raw.as_bytes()));
        }
        Self {
            path: path.to_string(),
            incoming,
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[PendingCookie] {
        &self.pending
    }

    /// `Set-Cookie` values for every queued write, in write order.
    pub fn set_cookie_values(&self) -> Vec<String> {
        self.pending
            .iter()
            .map(|cookie| {
                format!(
                    "{}={}; expires={}; path={}; SameSite=Lax",
                    cookie.name,
                    cookie.value,
                    http_date(cookie.expires_at),
                    self.path
                )
            })
            .collect()
    }
}

impl KvStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        if let Some(cookie) = self.pending.iter().find(|cookie| cookie.name == key) {
            return Some(cookie.value.clone());
        }
        self.incoming
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    }

    fn set(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        validate(key, value)?;
        debug!(cookie = key, value, %expires_at, "cookie set");

        match self.pending.iter_mut().find(|cookie| cookie.name == key) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.expires_at = expires_at;
            }
            None => self.pending.push(PendingCookie {
                name: key.to_string(),
                value: value.to_string(),
                expires_at,
            }),
        }
        Ok(())
    }
}

// Pairs that are not valid UTF-8 are skipped one by one so a foreign cookie
// cannot hide its neighbours.
fn parse_cookie_header(raw: &[u8]) -> impl Iterator<Item = (String, String)> + '_ {
    raw.split(|&b| b == b';').filter_map(|pair| {
        let pair = std::str::from_utf8(pair).ok()?;
        let (name, value) = pair.trim_start_matches(' ').split_once('=')?;
        Some((name.to_string(), value.to_string()))
    })
}

fn validate(name: &str, value: &str) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::rejected(name, "empty cookie name"));
    }
    if name
        .chars()
        .any(|c| c == '=' || c == ';' || c.is_whitespace() || c.is_control())
    {
        return Err(StoreError::rejected(name, "invalid character in cookie name"));
    }
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(StoreError::rejected(name, "invalid character in cookie value"));
    }
    if name.len() + 1 + value.len() > MAX_COOKIE_BYTES {
        return Err(StoreError::rejected(name, "cookie exceeds 4096 bytes"));
    }
    Ok(())
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
