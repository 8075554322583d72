//! request scoped cache of parsed cookies.

use std::{collections::HashMap, sync::Arc};

use http::{Extensions, header::HeaderMap};
use tracing::trace;

use crate::parse::{parse_cookie_header, raw_cookie_header};

/// parsed cookies shared between request extensions and cookie jars.
pub type Cookies = Arc<HashMap<String, String>>;

/// cache slot living inside request [Extensions]. it remembers the raw `Cookie` header it was parsed
/// from so repeated extraction within one request does not parse again.
#[derive(Clone, Debug)]
pub struct CookieCache {
    raw: Option<String>,
    cookies: Cookies,
}

impl CookieCache {
    /// raw `Cookie` header string the cache was populated from.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// parsed cookies.
    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }
}

/// extract parsed cookies from `Cookie` header(s) in given headers.
///
/// when [CookieCache] in extensions was populated from the same raw header the cached map is returned
/// as is. otherwise the header is parsed and the cache is replaced.
pub fn extract(headers: &HeaderMap, extensions: &mut Extensions) -> Cookies {
    extract_raw(raw_cookie_header(headers), extensions)
}

pub(crate) fn extract_raw(raw: Option<String>, extensions: &mut Extensions) -> Cookies {
    if let Some(cache) = extensions.get::<CookieCache>() {
        if cache.raw == raw {
            trace!("cookie cache hit");
            return cache.cookies.clone();
        }
    }

    trace!("cookie cache miss. parsing Cookie header");

    let cookies = Arc::new(raw.as_deref().map(parse_cookie_header).unwrap_or_default());

    extensions.insert(CookieCache {
        raw,
        cookies: cookies.clone(),
    });

    cookies
}
