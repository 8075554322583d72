use std::borrow::Cow;

use cookie::{Cookie, SameSite, time::Duration};

/// default attributes applied to every `Set-Cookie` header a jar emits.
///
/// # Examples
/// ```rust
/// use http_cookie_jar::{CookieConfig, SameSite};
///
/// let config = CookieConfig::new()
///     .path("/")
///     .http_only(true)
///     .same_site(SameSite::Lax);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CookieConfig {
    path: Option<Cow<'static, str>>,
    domain: Option<Cow<'static, str>>,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
    max_age: Option<Duration>,
}

impl CookieConfig {
    /// construct a config with no attribute set.
    pub const fn new() -> Self {
        Self {
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            same_site: None,
            max_age: None,
        }
    }

    /// set `Path` attribute.
    pub fn path(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// set `Domain` attribute.
    pub fn domain(mut self, domain: impl Into<Cow<'static, str>>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// set `Secure` attribute.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// set `HttpOnly` attribute.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// set `SameSite` attribute.
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// set `Max-Age` attribute. removal cookies ignore it and always expire immediately.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub(crate) fn cookie(&self, name: String, value: String) -> Cookie<'static> {
        let mut cookie = self.base(name, value);
        if let Some(max_age) = self.max_age {
            cookie.set_max_age(max_age);
        }
        cookie
    }

    pub(crate) fn removal(&self, name: String) -> Cookie<'static> {
        let mut cookie = self.base(name, String::new());
        cookie.make_removal();
        cookie
    }

    fn base(&self, name: String, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);

        if let Some(ref path) = self.path {
            cookie.set_path(path.clone());
        }

        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }

        if self.secure {
            cookie.set_secure(true);
        }

        if self.http_only {
            cookie.set_http_only(true);
        }

        if let Some(same_site) = self.same_site {
            cookie.set_same_site(same_site);
        }

        cookie
    }
}
