//! Session cookie storage.
//!
//! The jar is unscoped: every cookie received is replayed on every
//! request regardless of domain, path or expiry, and each successful response
//! replaces the whole set.

use reqwest::header::{HeaderValue, InvalidHeaderValue};

/// A cookie received from the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// `Domain` attribute, kept for inspection only.
    pub domain: Option<String>,
    /// `Path` attribute, kept for inspection only.
    pub path: Option<String>,
}

impl SessionCookie {
    /// A cookie with no attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }
}

impl From<reqwest::cookie::Cookie<'_>> for SessionCookie {
    fn from(cookie: reqwest::cookie::Cookie<'_>) -> Self {
        Self {
            name: cookie.name().to_owned(),
            value: cookie.value().to_owned(),
            domain: cookie.domain().map(str::to_owned),
            path: cookie.path().map(str::to_owned),
        }
    }
}

/// The cookie set held by a [`Session`](crate::Session).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CookieJar {
    cookies: Vec<SessionCookie>,
}

impl CookieJar {
    /// An empty jar.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Overwrites the entire set with `cookies`. An empty iterator clears the jar.
    pub(crate) fn replace_all<I>(&mut self, cookies: I)
    where
        I: IntoIterator<Item = SessionCookie>,
    {
        self.cookies = cookies.into_iter().collect();
    }

    /// The cookies currently held.
    pub(crate) fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    /// Renders the `Cookie` request header, or `None` when the jar is empty.
    ///
    /// Non-ASCII values are sent as raw bytes. A control character anywhere in
    /// the set is an error rather than a reason to drop the header.
    pub(crate) fn header_value(&self) -> Result<Option<HeaderValue>, InvalidHeaderValue> {
        if self.cookies.is_empty() {
            return Ok(None);
        }
        let rendered = self
            .cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_bytes(rendered.as_bytes()).map(Some)
    }
}
