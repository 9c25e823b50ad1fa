/// This enumerates the various parts of a URI (and of the HTTP message
/// around it) in which an error could occur.  It is carried by most variants
/// of [`Error`](enum.Error.html) so callers can tell which component was
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// The scheme of the URI, e.g. `http`.
    Scheme,

    /// The `user_info` part of the authority, e.g. `login:password`.
    UserInfo,

    /// The host of the authority: a domain name, IPv4 address, or bracketed
    /// IPv6 address.
    Host,

    /// A dotted-decimal IPv4 address, either standalone or as the suffix of a
    /// dual IPv6 address.
    Ipv4Address,

    /// A colon-separated IPv6 address.
    Ipv6Address,

    /// The port number of the authority.
    Port,

    /// The path of the URI.
    Path,

    /// The query of the URI, without the leading `?`.
    Query,

    /// The fragment of the URI, without the leading `#`.
    Fragment,

    /// The URI as a whole.
    Uri,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Context::Scheme => "scheme",
            Context::UserInfo => "user info",
            Context::Host => "host",
            Context::Ipv4Address => "IPv4 address",
            Context::Ipv6Address => "IPv6 address",
            Context::Port => "port",
            Context::Path => "path",
            Context::Query => "query",
            Context::Fragment => "fragment",
            Context::Uri => "URI",
        })
    }
}
