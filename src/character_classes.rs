#![allow(clippy::module_name_repetitions)]

use once_cell::sync::Lazy;
use std::collections::HashSet;

// These are character sets used by the component normalizers and by the
// whole-string grammar checks below.  Grammars follow IETF RFC 3986 appendix A
// except where noted.

pub static ALPHA: Lazy<HashSet<char>> = Lazy::new(|| ('a'..='z').chain('A'..='Z').collect());

pub static LOWER_ALPHA: Lazy<HashSet<char>> = Lazy::new(|| ('a'..='z').collect());

pub static DIGIT: Lazy<HashSet<char>> = Lazy::new(|| ('0'..='9').collect());

pub static HEXDIG: Lazy<HashSet<char>> = Lazy::new(|| {
    DIGIT
        .iter()
        .copied()
        .chain('A'..='F')
        .chain('a'..='f')
        .collect()
});

pub static UNRESERVED: Lazy<HashSet<char>> = Lazy::new(|| {
    ALPHA
        .iter()
        .chain(DIGIT.iter())
        .chain(['-', '.', '_', '~'].iter())
        .copied()
        .collect()
});

pub static SUB_DELIMS: Lazy<HashSet<char>> = Lazy::new(|| {
    ['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=']
        .iter()
        .copied()
        .collect()
});

// Scheme names are folded to lower case before they are checked, so only
// lower case letters appear here.
pub static SCHEME_NOT_FIRST: Lazy<HashSet<char>> = Lazy::new(|| {
    LOWER_ALPHA
        .iter()
        .chain(DIGIT.iter())
        .chain(['+', '-', '.'].iter())
        .copied()
        .collect()
});

pub static DOMAIN_NAME_FIRST: Lazy<HashSet<char>> =
    Lazy::new(|| LOWER_ALPHA.iter().chain(DIGIT.iter()).copied().collect());

pub static DOMAIN_NAME_REST: Lazy<HashSet<char>> = Lazy::new(|| {
    LOWER_ALPHA
        .iter()
        .chain(DIGIT.iter())
        .chain(['-', '.'].iter())
        .copied()
        .collect()
});

// A query pair element may hold anything a query may, except for the
// separators between and inside pairs.
pub static QUERY_PAIR_NOT_PCT_ENCODED: Lazy<HashSet<char>> = Lazy::new(|| {
    UNRESERVED
        .iter()
        .chain(SUB_DELIMS.iter())
        .chain([':', '@', '/', '?'].iter())
        .copied()
        .filter(|c| !matches!(c, '&' | '='))
        .collect()
});

// Characters which percent-encoding escapes but which read fine in a path,
// so they are put back after re-encoding a segment.
pub static PATH_PRETTY: Lazy<HashSet<char>> = Lazy::new(|| {
    [
        '\'', '[', ']', '(', ')', '+', '=', '*', '%', ',', ':', '!', '@', '$', '&',
    ]
    .iter()
    .copied()
    .collect()
});

/// `^[a-z][a-z0-9+.-]*$`, on an already case-folded scheme.
pub fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if LOWER_ALPHA.contains(&first) => chars.all(|c| SCHEME_NOT_FIRST.contains(&c)),
        _ => false,
    }
}

/// `^[a-z0-9][a-z]+[a-z0-9.-]*$`, on an already case-folded name.
///
/// The greedy `[a-z]+` always leaves the tail class to match whatever
/// follows, so the grammar reduces to: an alphanumeric, then a letter, then
/// anything from the tail class.
pub fn is_domain_name(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => {
            DOMAIN_NAME_FIRST.contains(&first)
                && LOWER_ALPHA.contains(&second)
                && chars.all(|c| DOMAIN_NAME_REST.contains(&c))
        }
        _ => false,
    }
}

/// `^[0-9a-fA-F]{1,4}$`
pub fn is_ipv6_segment(segment: &str) -> bool {
    (1..=4).contains(&segment.len()) && segment.chars().all(|c| HEXDIG.contains(&c))
}

/// Checks a query key or value: only query characters other than `&` and
/// `=`, with `%` allowed solely as the start of a `%XX` triplet.
pub fn is_query_pair_element(element: &str) -> bool {
    let mut chars = element.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let well_formed = matches!(
                (chars.next(), chars.next()),
                (Some(hi), Some(lo)) if HEXDIG.contains(&hi) && HEXDIG.contains(&lo)
            );
            if !well_formed {
                return false;
            }
        } else if !QUERY_PAIR_NOT_PCT_ENCODED.contains(&c) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn scheme_grammar() {
        let legal = ["h", "http", "x+", "y-", "z.", "a0", "coap+tcp"];
        for scheme in &legal {
            assert!(is_scheme(scheme), "{}", scheme);
        }
        let illegal = ["", "0", "+", "@", ".", "h@", "HTTP", "ht tp"];
        for scheme in &illegal {
            assert!(!is_scheme(scheme), "{}", scheme);
        }
    }

    #[test]
    fn domain_name_grammar() {
        let legal = [
            "site.com",
            "localhost",
            "www.example.com",
            "1a.example",
            "ab",
            "xn--80ak6aa92e.com",
            "example.com.",
        ];
        for name in &legal {
            assert!(is_domain_name(name), "{}", name);
        }
        let illegal = [
            "",
            "a",
            "a.com",
            "1.2.3.4.com",
            "300.1.1.1",
            "12.example",
            "-a.com",
            "site_name.com",
            "Site.com",
        ];
        for name in &illegal {
            assert!(!is_domain_name(name), "{}", name);
        }
    }

    #[test]
    fn ipv6_segment_grammar() {
        for segment in &["0", "fFfF", "0db8", "a"] {
            assert!(is_ipv6_segment(segment));
        }
        for segment in &["", "12345", "g", "1.2"] {
            assert!(!is_ipv6_segment(segment));
        }
    }

    #[test]
    fn query_pair_elements() {
        for element in &["q", "a+b", "%20x", "path/to?x", "user@host:1", ""] {
            assert!(is_query_pair_element(element), "{}", element);
        }
        for element in &["a b", "%", "%2", "%zz", "[x]", "a=b", "a&b", "é"] {
            assert!(!is_query_pair_element(element), "{}", element);
        }
    }
}
