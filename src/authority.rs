use super::{
    components::normalize_user_info, context::Context, error::Error,
    parse_host_port::parse_host_port,
};

/// This is the optional part of a URI which governs the URI's namespace.  It
/// holds a host name or IP address, and may also include a port number
/// and/or `user_info` component, all of them already normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Authority {
    pub user_info: String,
    pub host: String,
    pub port: Option<u16>,
}

impl Authority {
    /// Interpret the given string as the Authority component of a URI,
    /// separating and normalizing its various subcomponents.
    ///
    /// An invalid `user_info` is dropped rather than reported; an invalid
    /// host or port fails the whole authority.
    pub fn parse<T>(authority_string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let (user_info, host_port_string) = Self::parse_user_info(authority_string.as_ref());
        let (host, port) = parse_host_port(host_port_string)?;
        Ok(Self {
            user_info,
            host,
            port,
        })
    }

    fn parse_user_info(authority: &str) -> (String, &str) {
        match authority.rfind('@') {
            Some(delimiter) => {
                let raw = &authority[0..delimiter];
                let user_info = if raw.is_empty() {
                    String::new()
                } else {
                    normalize_user_info(raw).unwrap_or_else(|error| {
                        tracing::debug!(component = %Context::UserInfo, %error, "resetting to empty");
                        String::new()
                    })
                };
                (user_info, &authority[delimiter + 1..])
            }
            None => (String::new(), authority),
        }
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.user_info.is_empty() {
            write!(f, "{}@", self.user_info)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}
