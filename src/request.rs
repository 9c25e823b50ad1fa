use super::{
    error::Error,
    headers::check_token,
    message::{Message, MessageParts},
    uri::Uri,
};

/// An outgoing HTTP request: a method and a target [`Uri`](struct.Uri.html)
/// on top of the shared [`Message`](trait.Message.html) parts.
///
/// When a request is built from a URI with a host, the `Host` header is set
/// from it, including the port unless it is the standard one for the
/// scheme.
#[derive(Clone, Debug)]
pub struct Request {
    method: String,
    uri: Uri,
    request_target: Option<String>,
    parts: MessageParts,
}

impl Request {
    /// Create a request for the given method and URI.  The method keeps the
    /// case it was given.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMethod`](enum.Error.html#variant.InvalidMethod) is
    /// returned if the method is not an HTTP token.
    pub fn new<T>(method: T, uri: Uri) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let method = check_token(method.as_ref(), Error::InvalidMethod)?;
        let request = Self {
            method: method.to_string(),
            uri: Uri::default(),
            request_target: None,
            parts: MessageParts::default(),
        };
        request.with_uri(uri, false)
    }

    /// Return the request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Return a copy with the given method.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMethod`](enum.Error.html#variant.InvalidMethod) is
    /// returned if the method is not an HTTP token.
    pub fn with_method<T>(&self, method: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let method = check_token(method.as_ref(), Error::InvalidMethod)?;
        let mut request = self.clone();
        request.method = method.to_string();
        Ok(request)
    }

    /// Borrow the target URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Return a copy targeting the given URI.
    ///
    /// Unless `preserve_host` is set while a `Host` header is already
    /// present, the `Host` header is replaced with the host (and non-standard
    /// port) of the new URI, when it has one.
    ///
    /// # Errors
    ///
    /// Cannot fail for a normalized URI; the `Result` carries header
    /// validation errors.
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Result<Self, Error> {
        let mut request = self.clone();
        let keep_host = preserve_host && request.has_header("Host");
        if !keep_host && !uri.host().is_empty() {
            let host = match uri.port() {
                Some(port) => format!("{}:{}", uri.host(), port),
                None => uri.host().to_string(),
            };
            request = request.with_header("Host", host)?;
        }
        request.uri = uri;
        Ok(request)
    }

    /// Return the request target: an explicitly set one, or else the path
    /// and query of the URI in origin form, so the path
    /// always starts with `/`.
    #[must_use]
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }
        let path = self.uri.path();
        let mut target = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if !self.uri.query().is_empty() {
            target.push('?');
            target.push_str(self.uri.query());
        }
        target
    }

    /// Return a copy with an explicit request target, such as `*` or an
    /// authority form.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRequestTarget`](enum.Error.html#variant.InvalidRequestTarget)
    /// is returned if the target is empty or contains whitespace.
    pub fn with_request_target<T>(&self, target: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let target = target.as_ref();
        if target.is_empty() || target.contains(char::is_whitespace) {
            return Err(Error::InvalidRequestTarget(target.to_string()));
        }
        let mut request = self.clone();
        request.request_target = Some(target.to_string());
        Ok(request)
    }
}

impl Message for Request {
    fn message_parts(&self) -> &MessageParts {
        &self.parts
    }

    fn message_parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::stream::Stream;

    #[test]
    fn host_header_from_uri() {
        struct Test {
            uri: &'static str,
            host: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                uri: "http://www.example.com/",
                host: "www.example.com",
            },
            Test {
                uri: "http://www.example.com:80/",
                host: "www.example.com",
            },
            Test {
                uri: "https://WWW.Example.com:8443/",
                host: "www.example.com:8443",
            },
            Test {
                uri: "http://[::1]:8080",
                host: "[::1]:8080",
            },
            Test {
                uri: "/relative/path",
                host: "",
            },
        ];
        for test_vector in test_vectors {
            let request = Request::new("GET", Uri::parse(test_vector.uri).unwrap()).unwrap();
            assert_eq!(test_vector.host, request.header_line("host"), "{}", test_vector.uri);
        }
    }

    #[test]
    fn preserve_host() {
        let request = Request::new("GET", Uri::parse("http://first.example").unwrap()).unwrap();
        let second = Uri::parse("http://second.example").unwrap();
        let kept = request.with_uri(second.clone(), true).unwrap();
        assert_eq!("first.example", kept.header_line("Host"));
        assert_eq!("second.example", kept.uri().host());
        let replaced = request.with_uri(second.clone(), false).unwrap();
        assert_eq!("second.example", replaced.header_line("Host"));
        let without_host = request.without_header("Host").with_uri(second, true).unwrap();
        assert_eq!("second.example", without_host.header_line("Host"));
        assert_eq!("first.example", request.header_line("Host"));
    }

    #[test]
    fn methods() {
        let request = Request::new("get", Uri::default()).unwrap();
        assert_eq!("get", request.method());
        assert_eq!("PATCH", request.with_method("PATCH").unwrap().method());
        for method in &["", "GET POST", "GET\n", "(GET)"] {
            assert!(
                matches!(request.with_method(method), Err(Error::InvalidMethod(_))),
                "{:?}",
                method
            );
        }
        assert!(matches!(
            Request::new("BAD METHOD", Uri::default()),
            Err(Error::InvalidMethod(_))
        ));
    }

    #[test]
    fn request_target() {
        struct Test {
            uri: &'static str,
            target: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                uri: "http://example.com",
                target: "/",
            },
            Test {
                uri: "http://example.com/a/b?c=d#frag",
                target: "/a/b?c=d",
            },
            Test {
                uri: "relative?x=1",
                target: "/relative?x=1",
            },
            Test {
                uri: "foo",
                target: "/foo",
            },
            Test {
                uri: "http://example.com/a//b",
                target: "/a//b",
            },
        ];
        for test_vector in test_vectors {
            let request = Request::new("GET", Uri::parse(test_vector.uri).unwrap()).unwrap();
            assert_eq!(test_vector.target, request.request_target());
        }
        let request = Request::new("OPTIONS", Uri::parse("http://example.com/x").unwrap())
            .unwrap()
            .with_request_target("*")
            .unwrap();
        assert_eq!("*", request.request_target());
        assert!(matches!(
            request.with_request_target("/a b"),
            Err(Error::InvalidRequestTarget(_))
        ));
        assert!(matches!(
            request.with_request_target(""),
            Err(Error::InvalidRequestTarget(_))
        ));
    }

    #[test]
    fn message_behavior() {
        let request = Request::new("POST", Uri::parse("http://example.com").unwrap()).unwrap();
        assert_eq!("1.1", request.protocol_version());
        assert_eq!("2", request.with_protocol_version("2").protocol_version());
        assert_eq!("1.0", request.with_protocol_version("1.0").protocol_version());
        assert_eq!("1.1", request.with_protocol_version("4.2").protocol_version());
        assert_eq!("1.1", request.with_protocol_version("").protocol_version());

        let with_header = request
            .with_header("Content-Type", "application/json")
            .unwrap()
            .with_added_header("X-Trace", "a")
            .unwrap()
            .with_added_header("x-trace", "b")
            .unwrap();
        assert!(with_header.has_header("content-type"));
        assert_eq!(vec!["a", "b"], with_header.header("X-TRACE"));
        assert!(!request.has_header("Content-Type"));
        assert!(matches!(
            request.with_header("Bad Name", "x"),
            Err(Error::InvalidHeaderName(_))
        ));

        let with_body = request.with_body(Stream::from_bytes("{}"));
        assert_eq!("{}", with_body.body().to_string());
        assert_eq!("", request.body().to_string());
    }
}
