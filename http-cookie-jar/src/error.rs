use std::{error, fmt};

use http::header::InvalidHeaderValue;

/// Errors produced when writing staged cookies into response headers.
#[derive(Debug)]
pub enum Error {
    /// serialized `Set-Cookie` value can not be represented as [HeaderValue].
    ///
    /// [HeaderValue]: http::HeaderValue
    InvalidHeaderValue(InvalidHeaderValue),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidHeaderValue(ref e) => write!(f, "Set-Cookie header value is invalid: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::InvalidHeaderValue(ref e) => Some(e),
        }
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(e: InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue(e)
    }
}

/// Error type of [CookieService](crate::middleware::CookieService).
#[cfg(feature = "middleware")]
#[derive(Debug)]
pub enum CookieServiceError<E> {
    /// error from inner service. staged cookies are dropped without emitting any header.
    Service(E),
    /// error from finishing cookie jar into response headers.
    Cookie(Error),
}

#[cfg(feature = "middleware")]
impl<E> fmt::Display for CookieServiceError<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Service(ref e) => fmt::Display::fmt(e, f),
            Self::Cookie(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(feature = "middleware")]
impl<E> error::Error for CookieServiceError<E> where E: fmt::Debug + fmt::Display {}

#[cfg(feature = "middleware")]
impl<E> From<Error> for CookieServiceError<E> {
    fn from(e: Error) -> Self {
        Self::Cookie(e)
    }
}
