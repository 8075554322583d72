#![doc=include_str!( "../README.md")]
#![forbid(unsafe_code)]

mod config;
mod error;
mod parse;

pub mod cache;
#[cfg(feature = "middleware")]
pub mod middleware;

pub use cookie::{SameSite, time::Duration};

pub use self::{config::CookieConfig, error::Error};

#[cfg(feature = "middleware")]
pub use self::error::CookieServiceError;

use std::{collections::HashMap, sync::Arc};

use http::{
    Extensions, Request,
    header::{HeaderMap, HeaderValue, SET_COOKIE},
};
use tracing::{debug, error};

use self::{cache::Cookies, parse::raw_cookie_header};

/// staged value of a cookie.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CookieValue {
    /// cookie is set to given value on client.
    Present(String),
    /// cookie is expired and removed from client.
    Deleted,
}

impl CookieValue {
    /// value of cookie. [None] when it's staged for deletion.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Self::Present(ref value) => Some(value.as_str()),
            Self::Deleted => None,
        }
    }
}

impl From<String> for CookieValue {
    fn from(value: String) -> Self {
        Self::Present(value)
    }
}

impl From<&str> for CookieValue {
    fn from(value: &str) -> Self {
        Self::Present(value.to_owned())
    }
}

impl<V> From<Option<V>> for CookieValue
where
    V: Into<CookieValue>,
{
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(Self::Deleted)
    }
}

/// per request cookie container.
///
/// cookies parsed from request are readable through [CookieJar::get]. mutations made with
/// [CookieJar::set] and [CookieJar::remove] are staged and only written out as `Set-Cookie` headers
/// when [CookieJar::finish] is called. cookies never touched are not written back.
#[derive(Clone, Debug)]
pub struct CookieJar {
    origin: Cookies,
    changes: HashMap<String, CookieValue>,
    config: Arc<CookieConfig>,
}

impl CookieJar {
    /// construct a jar from request headers. parsed cookies are cached in given extensions so
    /// constructing multiple jars for the same request only parses `Cookie` header once.
    pub fn new(headers: &HeaderMap, extensions: &mut Extensions) -> Self {
        Self::from_cookies(cache::extract(headers, extensions))
    }

    /// construct a jar from [Request]. see [CookieJar::new] for detail.
    pub fn from_request<B>(req: &mut Request<B>) -> Self {
        let raw = raw_cookie_header(req.headers());
        let origin = cache::extract_raw(raw, req.extensions_mut());
        Self::from_cookies(origin)
    }

    fn from_cookies(origin: Cookies) -> Self {
        Self {
            origin,
            changes: HashMap::new(),
            config: Arc::new(CookieConfig::new()),
        }
    }

    /// set default attributes for `Set-Cookie` headers emitted by [CookieJar::finish].
    pub fn with_config(mut self, config: Arc<CookieConfig>) -> Self {
        self.config = config;
        self
    }

    /// get cookie value with given name.
    ///
    /// staged value takes priority over the one parsed from request. [None] is returned when cookie
    /// does not exist or is staged for deletion.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        match self.changes.get(name) {
            Some(value) => value.as_str(),
            None => self.origin.get(name).map(String::as_str),
        }
    }

    /// check if cookie with given name is visible.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// stage cookie with given name and value. passing [CookieValue::Deleted] or [None] stages the
    /// cookie for deletion.
    ///
    /// # Examples
    /// ```rust
    /// # use http_cookie_jar::{CookieJar, CookieValue};
    /// # let mut jar = CookieJar::from_request(&mut http::Request::new(()));
    /// jar.set("foo", "bar");
    /// assert_eq!(jar.get("foo"), Some("bar"));
    ///
    /// jar.set("foo", None::<String>);
    /// assert_eq!(jar.get("foo"), None);
    /// ```
    pub fn set<V>(&mut self, name: &str, value: V)
    where
        V: Into<CookieValue>,
    {
        self.changes.insert(name.trim().to_owned(), value.into());
    }

    /// stage cookie with given name for deletion.
    #[inline]
    pub fn remove(&mut self, name: &str) {
        self.set(name, CookieValue::Deleted)
    }

    /// iterate over visible cookies as (name, value) pairs with staged changes applied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let changed = self
            .changes
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|value| (name.as_str(), value)));

        let origin = self
            .origin
            .iter()
            .filter(|(name, _)| !self.changes.contains_key(name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_str()));

        changed.chain(origin)
    }

    /// write staged changes into given response headers. every staged cookie produces exactly one
    /// `Set-Cookie` header. deleted cookies are written with empty value and expired attributes.
    ///
    /// the jar is consumed so it can not be finished twice.
    pub fn finish(self, headers: &mut HeaderMap) -> Result<(), Error> {
        let len = self.changes.len();

        for (name, value) in self.changes {
            let cookie = match value {
                CookieValue::Present(value) => self.config.cookie(name, value),
                CookieValue::Deleted => self.config.removal(name),
            };

            let value = HeaderValue::try_from(cookie.encoded().to_string()).map_err(|e| {
                error!("failed to construct Set-Cookie header for cookie {:?}: {}", cookie.name(), e);
                Error::from(e)
            })?;

            headers.append(SET_COOKIE, value);
        }

        debug!("cookie jar emitted {len} Set-Cookie header(s)");

        Ok(())
    }
}
