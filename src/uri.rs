use super::{
    authority::Authority,
    components::{
        normalize_fragment, normalize_path, normalize_port, normalize_query, normalize_scheme,
        normalize_user_info, standard_port,
    },
    context::Context,
    error::Error,
    normalize_host::normalize_host,
};
use std::{fmt::Write, ops::Deref, str::FromStr};

/// This type is an immutable URI value.  Every component is normalized when
/// it enters the value, either through [`parse`] or through one of the
/// `with_*` methods, so the getters simply hand back what is stored.
///
/// The `with_*` methods never modify the URI they are called on; they return
/// a copy with one component replaced.  Replacing the scheme, host, port,
/// path or query fails if the new value is invalid, while an invalid
/// `user_info` or fragment silently clears that component instead.
///
/// # Examples
///
/// ## Parsing a URI into its components
///
/// ```rust
/// use psr7::Uri;
///
/// # fn main() -> Result<(), psr7::Error> {
/// let uri = Uri::parse("HTTP://Me@WWW.Example.com:8080/foo?bar#baz")?;
/// assert_eq!("http", uri.scheme());
/// assert_eq!("Me@www.example.com:8080", uri.authority());
/// assert_eq!("www.example.com", uri.host());
/// assert_eq!(Some(8080), uri.port());
/// assert_eq!("/foo", uri.path());
/// assert_eq!("bar", uri.query());
/// assert_eq!("baz", uri.fragment());
/// # Ok(())
/// # }
/// ```
///
/// Implementations are provided for the [`TryFrom`] and [`FromStr`] traits,
/// so that [`TryFrom::try_from`] or [`str::parse`] may be used as
/// alternatives to [`parse`].
///
/// ## Generating a URI from its components
///
/// ```rust
/// use psr7::Uri;
///
/// # fn main() -> Result<(), psr7::Error> {
/// let uri = Uri::default()
///     .with_scheme("https")?
///     .with_host("[2001:DB8:0:0:0:0:0:1]")?
///     .with_port(443)?
///     .with_path("docs/index.html")?
///     .with_query("lang=en")?
///     .with_fragment("top");
/// assert_eq!(None, uri.port());
/// assert_eq!("https://[2001:db8::1]/docs/index.html?lang=en#top", uri.to_string());
/// # Ok(())
/// # }
/// ```
///
/// [`parse`]: #method.parse
/// [`TryFrom::try_from`]: https://doc.rust-lang.org/std/convert/trait.TryFrom.html#tymethod.try_from
#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct Uri {
    scheme: String,
    authority: Authority,
    path: String,
    query: String,
    fragment: String,
    raw: String,
}

impl Uri {
    /// Interpret the given string as a URI, separating its various
    /// components and normalizing each of them, returning a `Uri` value
    /// containing them.
    ///
    /// # Errors
    ///
    /// A scheme, host, port, path or query which cannot be normalized is
    /// reported as [`Error::Component`](enum.Error.html#variant.Component),
    /// wrapping what went wrong with it.  A string with neither scheme, host
    /// nor path is reported as
    /// [`Error::AmbiguousUri`](enum.Error.html#variant.AmbiguousUri).
    pub fn parse<T>(uri_string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let s = uri_string.as_ref();
        let (rest, fragment) = Self::parse_fragment(s);
        let (rest, query) = Self::parse_query(rest)?;
        let (scheme, rest) = Self::parse_scheme(rest)?;
        let (authority, path) = Self::split_authority_from_path_and_parse_them(rest)?;
        if scheme.is_empty() && authority.host.is_empty() && path.is_empty() {
            return Err(Error::AmbiguousUri(s.to_string()));
        }
        let mut this = Self {
            scheme,
            authority,
            path,
            query,
            fragment,
            raw: String::default(),
        };
        this.update_raw();
        Ok(this)
    }

    /// Borrow the scheme of the URI, in lower case.  This is empty if the
    /// URI has no scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Build the authority of the URI: `[user_info@]host[:port]`, where the
    /// port is left out when it is the standard port of the scheme.  This is
    /// empty whenever the host is.
    #[must_use]
    pub fn authority(&self) -> String {
        if self.authority.host.is_empty() {
            return String::new();
        }
        Authority {
            port: self.port(),
            ..self.authority.clone()
        }
        .to_string()
    }

    /// Borrow the `user_info` of the URI, `login` or `login:password`.
    #[must_use]
    pub fn user_info(&self) -> &str {
        &self.authority.user_info
    }

    /// Borrow the host of the URI: a lower case domain name, a dotted IPv4
    /// address, or a bracketed IPv6 address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.authority.host
    }

    /// Return the port of the URI, unless it has none or it is the standard
    /// port for the scheme (80 for `http`, for example).
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.authority
            .port
            .filter(|port| standard_port(&self.scheme) != Some(*port))
    }

    /// Borrow the path of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Borrow the query of the URI, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Borrow the fragment of the URI, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Return a copy of the URI with a different scheme.  An empty string
    /// removes the scheme.
    ///
    /// # Errors
    ///
    /// The set of characters allowed in the scheme of a URI is limited;
    /// [`Error::InvalidFormat`](enum.Error.html#variant.InvalidFormat) is
    /// returned if you try to use a character that isn't allowed.
    pub fn with_scheme<T>(&self, scheme: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let scheme = normalize_scheme(scheme)?;
        Ok(self.with(|uri| uri.scheme = scheme))
    }

    /// Return a copy of the URI with a different `user_info`, given as
    /// `login` or `login:password`.  A value which cannot be normalized (an
    /// empty login, for instance) clears the `user_info` instead of failing.
    #[must_use]
    pub fn with_user_info<T>(&self, user_info: T) -> Self
    where
        T: AsRef<str>,
    {
        let user_info = match user_info.as_ref() {
            "" => String::new(),
            user_info => normalize_user_info(user_info).unwrap_or_else(|error| {
                tracing::debug!(component = %Context::UserInfo, %error, "resetting to empty");
                String::new()
            }),
        };
        self.with(|uri| uri.authority.user_info = user_info)
    }

    /// Return a copy of the URI with a different host.  An empty string
    /// removes the host.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`](enum.Error.html#variant.InvalidFormat) is
    /// returned if the host is neither an IP address nor a domain name.
    pub fn with_host<T>(&self, host: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let host = match host.as_ref() {
            "" => String::new(),
            host => normalize_host(host)?,
        };
        Ok(self.with(|uri| uri.authority.host = host))
    }

    /// Return a copy of the URI with a different port.  A port of 0 removes
    /// the port.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`](enum.Error.html#variant.InvalidFormat) is
    /// returned if the port is greater than 65535.
    pub fn with_port(&self, port: u32) -> Result<Self, Error> {
        let port = Some(normalize_port(port)?).filter(|port| *port != 0);
        Ok(self.with(|uri| uri.authority.port = port))
    }

    /// Return a copy of the URI with a different path.  The path may be
    /// absolute (starting with `/`), relative, or empty.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`](enum.Error.html#variant.InvalidFormat) is
    /// returned if the path contains a query or fragment delimiter.
    pub fn with_path<T>(&self, path: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let path = normalize_path(path)?;
        Ok(self.with(|uri| uri.path = path))
    }

    /// Return a copy of the URI with a different query, given without the
    /// leading `?`.  An empty string removes the query.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyAfterNormalization`](enum.Error.html#variant.EmptyAfterNormalization)
    /// is returned if none of the `key=value` pairs of the query are valid.
    pub fn with_query<T>(&self, query: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let query = match query.as_ref() {
            "" => String::new(),
            query => normalize_query(query)?,
        };
        Ok(self.with(|uri| uri.query = query))
    }

    /// Return a copy of the URI with a different fragment, given without the
    /// leading `#`.  An empty string removes the fragment.
    #[must_use]
    pub fn with_fragment<T>(&self, fragment: T) -> Self
    where
        T: AsRef<str>,
    {
        let fragment = match fragment.as_ref() {
            "" => String::new(),
            fragment => normalize_fragment(fragment).unwrap_or_else(|error| {
                tracing::debug!(component = %Context::Fragment, %error, "resetting to empty");
                String::new()
            }),
        };
        self.with(|uri| uri.fragment = fragment)
    }

    // ----------------------------------------------------------------------------------------------
    //                                         private methods
    // ----------------------------------------------------------------------------------------------
    fn with<F>(&self, change: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut uri = self.clone();
        change(&mut uri);
        uri.update_raw();
        uri
    }

    fn update_raw(&mut self) {
        let mut raw = String::new();

        if !self.scheme.is_empty() {
            write!(&mut raw, "{}:", self.scheme).unwrap();
        }
        let authority = self.authority();
        if !authority.is_empty() {
            write!(&mut raw, "//{}", authority).unwrap();
        }
        if !authority.is_empty() && !self.path.is_empty() && !self.path.starts_with('/') {
            raw.push('/');
            raw.push_str(&self.path);
        } else if authority.is_empty() && self.path.starts_with("//") {
            // Without an authority, a leading "//" would be read back as
            // one.
            raw.push('/');
            raw.push_str(self.path.trim_start_matches('/'));
        } else if raw.is_empty() && Self::find_scheme_delimiter(&self.path).is_some() {
            // An empty scheme keeps a colon in the first segment from being
            // read back as the scheme delimiter.
            raw.push(':');
            raw.push_str(&self.path);
        } else {
            raw.push_str(&self.path);
        }
        if !self.query.is_empty() {
            write!(&mut raw, "?{}", self.query).unwrap();
        }
        if !self.fragment.is_empty() {
            write!(&mut raw, "#{}", self.fragment).unwrap();
        }

        self.raw = raw;
    }

    fn parse_fragment(uri_string: &str) -> (&str, String) {
        match uri_string.split_once('#') {
            Some((rest, "")) => (rest, String::new()),
            Some((rest, fragment)) => (
                rest,
                normalize_fragment(fragment).unwrap_or_else(|error| {
                    tracing::debug!(component = %Context::Fragment, %error, "resetting to empty");
                    String::new()
                }),
            ),
            None => (uri_string, String::new()),
        }
    }

    fn parse_query(uri_string: &str) -> Result<(&str, String), Error> {
        match uri_string.split_once('?') {
            Some((rest, "")) => Ok((rest, String::new())),
            Some((rest, query)) => Ok((
                rest,
                normalize_query(query).map_err(|error| error.in_component(Context::Query))?,
            )),
            None => Ok((uri_string, String::new())),
        }
    }

    fn find_scheme_delimiter(uri_string: &str) -> Option<usize> {
        // Limit our search so we don't scan into the authority, the path or
        // an IPv6 literal, because these may have the colon character as
        // well, which we might misinterpret as the scheme delimiter.
        let scheme_end_limit = uri_string
            .find(&['/', '['][..])
            .unwrap_or(uri_string.len());
        uri_string[0..scheme_end_limit].find(':')
    }

    fn parse_scheme(uri_string: &str) -> Result<(String, &str), Error> {
        match Self::find_scheme_delimiter(uri_string) {
            Some(scheme_end) => {
                let scheme = normalize_scheme(&uri_string[0..scheme_end])
                    .map_err(|error| error.in_component(Context::Scheme))?;
                Ok((scheme, &uri_string[scheme_end + 1..]))
            }
            None => Ok((String::new(), uri_string)),
        }
    }

    fn split_authority_from_path_and_parse_them(
        authority_and_path_string: &str,
    ) -> Result<(Authority, String), Error> {
        // Split authority from path.  If there is an authority, parse it.
        let (authority, path_string) =
            if let Some(authority_and_path_string) = authority_and_path_string.strip_prefix("//") {
                let authority_end = authority_and_path_string
                    .find('/')
                    .unwrap_or(authority_and_path_string.len());
                (
                    Authority::parse(&authority_and_path_string[0..authority_end])?,
                    &authority_and_path_string[authority_end..],
                )
            } else {
                (Authority::default(), authority_and_path_string)
            };
        let path = normalize_path(path_string).map_err(|error| error.in_component(Context::Path))?;
        Ok((authority, path))
    }
}

impl std::fmt::Debug for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Uri").field(&self.raw).finish()
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.raw)
    }
}

impl Deref for Uri {
    type Target = str;
    fn deref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(uri_string: &str) -> Result<Self, Self::Err> {
        Uri::parse(uri_string)
    }
}

impl TryFrom<&'_ str> for Uri {
    type Error = Error;

    fn try_from(uri_string: &'_ str) -> Result<Self, Self::Error> {
        Uri::parse(uri_string)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(uri_string: String) -> Result<Self, Self::Error> {
        Uri::parse(uri_string)
    }
}

#[cfg(feature = "url")]
impl TryFrom<&url_::Url> for Uri {
    type Error = Error;

    fn try_from(url: &url_::Url) -> Result<Self, Self::Error> {
        Uri::parse(url.as_str())
    }
}

#[cfg(feature = "url")]
impl TryFrom<&Uri> for url_::Url {
    type Error = url_::ParseError;

    fn try_from(uri: &Uri) -> Result<Self, Self::Error> {
        url_::Url::parse(&uri.raw)
    }
}

#[cfg(feature = "serde")]
impl serde_::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(serde_::de::Error::custom)
    }
}
