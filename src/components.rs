use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{
    character_classes::{
        is_query_pair_element, is_scheme, PATH_PRETTY, QUERY_PAIR_NOT_PCT_ENCODED, UNRESERVED,
    },
    codec::{decode_characters, recode_element},
    context::Context,
    error::Error,
};

static STANDARD_PORTS: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    [
        ("ftp", 21),
        ("ssh", 22),
        ("telnet", 23),
        ("smtp", 25),
        ("gopher", 70),
        ("http", 80),
        ("ws", 80),
        ("pop", 110),
        ("nntp", 119),
        ("imap", 143),
        ("ldap", 389),
        ("https", 443),
        ("wss", 443),
        ("imaps", 993),
        ("pop3s", 995),
    ]
    .iter()
    .copied()
    .collect()
});

/// Look up the well-known port of a (lower case) scheme.
pub fn standard_port(scheme: &str) -> Option<u16> {
    STANDARD_PORTS.get(scheme).copied()
}

/// Fold the scheme to lower case and check it against the scheme grammar.
/// The empty scheme means "no scheme" and is always accepted.
pub fn normalize_scheme<T>(scheme: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let scheme = scheme.as_ref().to_ascii_lowercase();
    if scheme.is_empty() || is_scheme(&scheme) {
        Ok(scheme)
    } else {
        Err(Error::invalid(
            Context::Scheme,
            scheme,
            "must be a letter followed by letters, digits, `+`, `-` or `.`",
        ))
    }
}

/// Check a port number.  Zero stands for "no port" and is passed through so
/// the URI can treat it as unset.
pub fn normalize_port(port: u32) -> Result<u16, Error> {
    if port == 0 {
        return Ok(0);
    }
    u16::try_from(port)
        .map_err(|_| Error::invalid(Context::Port, port.to_string(), "must be in 1..=65535"))
}

/// Canonicalize `login[:password]`.  Both halves are decoded and re-encoded;
/// the login must not end up empty, while an empty password is dropped.
pub fn normalize_user_info<T>(user_info: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let raw = user_info.as_ref();
    let (login, password) = match raw.split_once(':') {
        Some((login, password)) => (login, Some(password)),
        None => (raw, None),
    };
    let login = recode_element(login, &UNRESERVED);
    if login.is_empty() {
        return Err(Error::invalid(Context::UserInfo, raw, "login is empty"));
    }
    match password.map(|password| recode_element(password, &UNRESERVED)) {
        Some(password) if !password.is_empty() => Ok(format!("{}:{}", login, password)),
        _ => Ok(login),
    }
}

/// Canonicalize the percent-encoding of each path segment, keeping the
/// slashes (and therefore empty segments) exactly where they are.
pub fn normalize_path<T>(path: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let path = path.as_ref();
    if path.contains(&['?', '#'][..]) {
        return Err(Error::invalid(
            Context::Path,
            path,
            "must not contain `?` or `#`",
        ));
    }
    Ok(path
        .split('/')
        .map(|segment| {
            if segment.is_empty() {
                String::new()
            } else {
                decode_characters(recode_element(segment, &UNRESERVED), &PATH_PRETTY)
            }
        })
        .collect::<Vec<_>>()
        .join("/"))
}

fn collapse_runs(query: &str, separator: char) -> String {
    let mut collapsed = String::with_capacity(query.len());
    for c in query.chars() {
        if c != separator || !collapsed.ends_with(separator) {
            collapsed.push(c);
        }
    }
    collapsed
}

fn normalize_query_element(element: &str) -> Option<String> {
    if is_query_pair_element(element) {
        Some(recode_element(element, &QUERY_PAIR_NOT_PCT_ENCODED))
    } else {
        None
    }
}

/// Filter the query down to its valid `key[=value]` pairs.  Pairs with an
/// empty or invalid key are dropped; an invalid value is dropped while its
/// key is kept.  Runs of `&` and of `=` in the raw query count as one.
pub fn normalize_query<T>(query: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let raw = query.as_ref();
    let collapsed = collapse_runs(&collapse_runs(raw, '&'), '=');
    let pairs = collapsed
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (pair, None),
            };
            let key = match normalize_query_element(key) {
                Some(key) if !key.is_empty() => key,
                _ => {
                    tracing::debug!(pair, "dropping query pair with invalid key");
                    return None;
                }
            };
            match value.map(|value| (value, normalize_query_element(value))) {
                Some((_, Some(value))) if !value.is_empty() => Some(format!("{}={}", key, value)),
                Some((value, None)) => {
                    tracing::debug!(key = %key, value, "dropping invalid query value");
                    Some(key)
                }
                _ => Some(key),
            }
        })
        .collect::<Vec<_>>();
    if pairs.is_empty() {
        return Err(Error::EmptyAfterNormalization(Context::Query));
    }
    Ok(pairs.join("&"))
}

/// A fragment must not be empty; spaces are encoded and nothing else is
/// touched.
pub fn normalize_fragment<T>(fragment: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    match fragment.as_ref() {
        "" => Err(Error::EmptyAfterNormalization(Context::Fragment)),
        fragment => Ok(fragment.replace(' ', "%20")),
    }
}
