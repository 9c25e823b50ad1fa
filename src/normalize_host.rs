use super::{
    character_classes::is_domain_name, context::Context, error::Error,
    normalize_ipv4_address::normalize_ipv4_address,
    normalize_ipv6_address::normalize_ipv6_address,
};

fn ipv4_host(host: &str) -> Result<String, Error> {
    normalize_ipv4_address(host)
}

fn ipv6_host(host: &str) -> Result<String, Error> {
    let host = host
        .strip_prefix('[')
        .and_then(|host| host.strip_suffix(']'))
        .unwrap_or(host);
    normalize_ipv6_address(host).map(|address| format!("[{}]", address))
}

fn domain_name_host(host: &str) -> Result<String, Error> {
    let host = host.to_lowercase();
    if is_domain_name(&host) {
        Ok(host)
    } else {
        Err(Error::invalid(
            Context::Host,
            host,
            "not a valid domain name",
        ))
    }
}

// The grammars overlap just enough (digits, dots, hex letters) that the
// order of the attempts matters.
const HOST_NORMALIZERS: [(&str, fn(&str) -> Result<String, Error>); 3] = [
    ("IPv4 address", ipv4_host),
    ("IPv6 address", ipv6_host),
    ("domain name", domain_name_host),
];

/// Normalize a host, trying it as an IPv4 address, then as an IPv6 address
/// (with or without brackets; the result always has them), and finally as a
/// domain name (folded to lower case).  The first interpretation that
/// succeeds wins.
pub fn normalize_host<T>(host: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let host = host.as_ref();
    for (kind, normalizer) in &HOST_NORMALIZERS {
        match normalizer(host) {
            Ok(normalized) => return Ok(normalized),
            Err(error) => tracing::trace!(host = %host, kind = %kind, %error, "host candidate rejected"),
        }
    }
    Err(Error::invalid(
        Context::Host,
        host,
        "neither an IP address nor a domain name",
    ))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn good() {
        let test_vectors: &[(&str, &str)] = &[
            ("SITE.COM", "site.com"),
            ("www.EXAMPLE.com", "www.example.com"),
            ("wWw.exampLe.Com", "www.example.com"),
            ("localhost", "localhost"),
            ("example.com.", "example.com."),
            ("127.0.0.1", "127.0.0.1"),
            ("010.0.0.1", "10.0.0.1"),
            ("[::1]", "[::1]"),
            ("::1", "[::1]"),
            ("[2001:DB8:0:0:0:0:0:1]", "[2001:db8::1]"),
            ("[::ffff:10.0.0.1]", "[::ffff:10.0.0.1]"),
            ("[fe80::]", "[fe80::]"),
        ];
        for (host, normalized) in test_vectors {
            assert_eq!(*normalized, normalize_host(host).unwrap(), "{}", host);
        }
    }

    #[test]
    fn bad() {
        let test_vectors = [
            "",
            "300.1.1.1",
            "1.2.3",
            "a.com",
            "1.2.3.4.com",
            "[::1",
            "[1:2:3]",
            "www:example.com",
            "site com",
            "%41",
            "under_score.com",
        ];
        for test_vector in &test_vectors {
            assert!(normalize_host(test_vector).is_err(), "{}", test_vector);
        }
    }

    #[test]
    fn ip_address_beats_domain_name() {
        // A dotted-quad of small numbers could never pass the domain grammar,
        // but an IPv6 address made only of letters could.
        assert_eq!("[abcd::]", normalize_host("abcd::").unwrap());
        assert_eq!("abcd.ef", normalize_host("abcd.ef").unwrap());
    }

    #[test]
    fn failure_reports_host_context() {
        let error = normalize_host("300.1.1.1").unwrap_err();
        assert_eq!(Some(Context::Host), error.context());
    }
}
