//! tolerant parser for `Cookie` request header.

use std::collections::HashMap;

use http::header::{COOKIE, HeaderMap};
use percent_encoding::percent_decode_str;
use tracing::trace;

/// collect all `Cookie` header lines into one raw string. multiple lines are joined with `"; "`.
/// header bytes that are not valid utf-8 are replaced lossily.
pub(crate) fn raw_cookie_header(headers: &HeaderMap) -> Option<String> {
    let mut values = headers.get_all(COOKIE).iter();

    let mut raw = String::from_utf8_lossy(values.next()?.as_bytes()).into_owned();

    for value in values {
        raw.push_str("; ");
        raw.push_str(&String::from_utf8_lossy(value.as_bytes()));
    }

    Some(raw)
}

/// parse raw `Cookie` header into name value pairs.
///
/// pairs are separated by `;` or `,`. name and value are percent decoded separately and fall back to
/// raw token when it contains a malformed escape or decoded bytes are not valid utf-8. first occurrence
/// wins when a name repeats.
///
/// `+` is kept as is and not decoded to space. `Set-Cookie` values are encoded with `%20` for space.
pub(crate) fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for token in raw.split([';', ',']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (name, value) = token.split_once('=').unwrap_or((token, ""));

        let name = decode(name.trim());
        if name.is_empty() {
            continue;
        }

        cookies.entry(name).or_insert_with(|| decode(value.trim()));
    }

    cookies
}

fn decode(token: &str) -> String {
    if !is_well_formed(token) {
        trace!("cookie token {token:?} contains malformed percent escape. using raw token");
        return token.to_owned();
    }

    match percent_decode_str(token).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            trace!("cookie token {token:?} failed percent decoding: {e}. using raw token");
            token.to_owned()
        }
    }
}

// every `%` must be followed by two hex digits.
fn is_well_formed(token: &str) -> bool {
    token
        .split('%')
        .skip(1)
        .all(|s| s.len() >= 2 && s.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit))
}

#[cfg(test)]
mod test {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn semicolon_and_comma() {
        let cookies = parse_cookie_header("a=1; b=2,c=3 ;d=4");
        assert_eq!(cookies.len(), 4);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["b"], "2");
        assert_eq!(cookies["c"], "3");
        assert_eq!(cookies["d"], "4");
    }

    #[test]
    fn first_value_wins() {
        let cookies = parse_cookie_header("a=1; a=2");
        assert_eq!(cookies["a"], "1");
    }

    #[test]
    fn percent_decode() {
        let cookies = parse_cookie_header("greeting=hello%20world; na%6De=v");
        assert_eq!(cookies["greeting"], "hello world");
        assert_eq!(cookies["name"], "v");
    }

    #[test]
    fn invalid_percent_encoding() {
        let cookies = parse_cookie_header("bad=%FF%FE; broken=%zz; ok=1");
        assert_eq!(cookies["bad"], "%FF%FE");
        assert_eq!(cookies["broken"], "%zz");
        assert_eq!(cookies["ok"], "1");
    }

    #[test]
    fn malformed_escape_keeps_raw_token() {
        let cookies = parse_cookie_header("a=%zz%41; b=100%25%; c=%4; d=%41%42");
        assert_eq!(cookies["a"], "%zz%41");
        assert_eq!(cookies["b"], "100%25%");
        assert_eq!(cookies["c"], "%4");
        assert_eq!(cookies["d"], "AB");
    }

    #[test]
    fn plus_is_literal() {
        let cookies = parse_cookie_header("a=1+2");
        assert_eq!(cookies["a"], "1+2");
    }

    #[test]
    fn missing_value_and_name() {
        let cookies = parse_cookie_header("flag; =orphan; ;; key=a=b");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["flag"], "");
        assert_eq!(cookies["key"], "a=b");
    }

    #[test]
    fn empty_header() {
        assert!(parse_cookie_header("").is_empty());
        assert!(parse_cookie_header(" ; , ").is_empty());
    }

    #[test]
    fn raw_header_join() {
        let mut headers = HeaderMap::new();
        assert!(raw_cookie_header(&headers).is_none());

        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        assert_eq!(raw_cookie_header(&headers).unwrap(), "a=1");

        headers.append(COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(raw_cookie_header(&headers).unwrap(), "a=1; b=2");
    }
}
