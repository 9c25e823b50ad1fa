//! Property tests for URI parsing and generation.

use proptest::prelude::*;
use psr7::{Error, Uri};

// ========================================
// Strategies
// ========================================

fn scheme() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9+.-]{0,5}"
}

fn domain_name() -> impl Strategy<Value = String> {
    "[a-z]{2,8}(\\.[a-z]{2,4}){1,2}"
}

fn port() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(1..=65535u32)
}

// Segments only use unreserved characters, which normalization leaves alone.
fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z0-9._~-]{1,8}", 0..4).prop_map(|segments| {
        segments
            .iter()
            .map(|segment| format!("/{}", segment))
            .collect::<String>()
    })
}

fn query() -> impl Strategy<Value = String> {
    proptest::collection::vec(("[a-z]{1,5}", "[a-z0-9]{1,5}"), 0..3).prop_map(|pairs| {
        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    })
}

fn fragment() -> impl Strategy<Value = String> {
    "([a-z0-9]{1,6})?"
}

#[derive(Debug, Clone)]
struct Parts {
    scheme: String,
    host: String,
    port: Option<u32>,
    path: String,
    query: String,
    fragment: String,
}

impl Parts {
    fn to_uri_string(&self) -> String {
        let mut uri = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            uri.push_str(&format!(":{}", port));
        }
        uri.push_str(&self.path);
        if !self.query.is_empty() {
            uri.push('?');
            uri.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            uri.push('#');
            uri.push_str(&self.fragment);
        }
        uri
    }

    fn build(&self) -> Result<Uri, Error> {
        Ok(Uri::default()
            .with_scheme(&self.scheme)?
            .with_host(&self.host)?
            .with_port(self.port.unwrap_or(0))?
            .with_path(&self.path)?
            .with_query(&self.query)?
            .with_fragment(&self.fragment))
    }
}

fn parts() -> impl Strategy<Value = Parts> {
    (scheme(), domain_name(), port(), path(), query(), fragment()).prop_map(
        |(scheme, host, port, path, query, fragment)| Parts {
            scheme,
            host,
            port,
            path,
            query,
            fragment,
        },
    )
}

// Paths of references with neither scheme nor authority, where a colon in
// the first segment could be taken for the scheme delimiter.
fn relative_path() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        proptest::collection::vec("[a-z0-9:]{1,6}", 1..4),
    )
        .prop_map(|(absolute, segments)| {
            let path = segments.join("/");
            if absolute {
                format!("/{}", path)
            } else {
                path
            }
        })
}

fn relative_reference() -> impl Strategy<Value = Uri> {
    (relative_path(), query(), fragment()).prop_map(|(path, query, fragment)| {
        Uri::default()
            .with_path(path)
            .and_then(|uri| uri.with_query(query))
            .map(|uri| uri.with_fragment(fragment))
            .unwrap()
    })
}

// ========================================
// Properties
// ========================================

proptest! {
    #[test]
    fn components_survive_parsing(parts in parts()) {
        let uri = Uri::parse(parts.to_uri_string()).unwrap();
        prop_assert_eq!(parts.scheme.as_str(), uri.scheme());
        prop_assert_eq!(parts.host.as_str(), uri.host());
        prop_assert_eq!(parts.path.as_str(), uri.path());
        prop_assert_eq!(parts.query.as_str(), uri.query());
        prop_assert_eq!(parts.fragment.as_str(), uri.fragment());
        if let Some(port) = uri.port() {
            prop_assert_eq!(parts.port, Some(u32::from(port)));
        }
    }

    #[test]
    fn generated_string_parses_back(parts in parts()) {
        let uri = Uri::parse(parts.to_uri_string()).unwrap();
        let reparsed = Uri::parse(uri.to_string()).unwrap();
        prop_assert_eq!(uri.to_string(), reparsed.to_string());
        prop_assert_eq!(uri, reparsed);
    }

    #[test]
    fn relative_reference_parses_back(uri in relative_reference()) {
        let reparsed = Uri::parse(uri.to_string()).unwrap();
        prop_assert_eq!("", reparsed.scheme());
        prop_assert_eq!(uri.path(), reparsed.path());
        prop_assert_eq!(uri, reparsed);
    }

    #[test]
    fn building_matches_parsing(parts in parts()) {
        let built = parts.build().unwrap();
        let parsed = Uri::parse(parts.to_uri_string()).unwrap();
        prop_assert_eq!(built, parsed);
    }

    #[test]
    fn host_case_does_not_matter(parts in parts()) {
        let upper = Parts {
            host: parts.host.to_ascii_uppercase(),
            scheme: parts.scheme.to_ascii_uppercase(),
            ..parts.clone()
        };
        prop_assert_eq!(
            Uri::parse(parts.to_uri_string()).unwrap(),
            Uri::parse(upper.to_uri_string()).unwrap()
        );
    }

    #[test]
    fn arbitrary_input_does_not_panic(input in "\\PC{0,40}") {
        let _ = Uri::parse(&input);
        let _ = Uri::default().with_query(&input);
        let _ = Uri::default().with_path(&input);
        let _ = Uri::default().with_host(&input);
        let _ = Uri::default().with_user_info(&input);
    }

    #[test]
    fn query_normalization_is_idempotent(input in "[a-z0-9=&%\\[\\] ]{1,24}") {
        if let Ok(uri) = Uri::default().with_query(&input) {
            let again = uri.with_query(uri.query()).unwrap();
            prop_assert_eq!(uri.query(), again.query());
        }
    }
}
