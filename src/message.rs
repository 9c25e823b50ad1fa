use super::{error::Error, headers::Headers, stream::Stream};

const PROTOCOL_VERSIONS: [&str; 5] = ["1.0", "1.1", "2", "2.0", "3"];
const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// The parts shared by every HTTP message: the protocol version, the
/// header fields and the body.
#[derive(Clone, Debug)]
pub struct MessageParts {
    pub(crate) protocol_version: String,
    pub(crate) headers: Headers,
    pub(crate) body: Stream,
}

impl Default for MessageParts {
    fn default() -> Self {
        Self {
            protocol_version: String::from(DEFAULT_PROTOCOL_VERSION),
            headers: Headers::default(),
            body: Stream::default(),
        }
    }
}

/// Behavior common to requests and responses.
///
/// Messages are immutable values: every `with_*` method returns an updated
/// copy and leaves the original untouched.  The body is a shared
/// [`Stream`](struct.Stream.html) handle, so copies read from and write to
/// the same resource.
pub trait Message: Clone {
    #[doc(hidden)]
    fn message_parts(&self) -> &MessageParts;

    #[doc(hidden)]
    fn message_parts_mut(&mut self) -> &mut MessageParts;

    /// Return the HTTP protocol version, such as `1.1`.
    fn protocol_version(&self) -> &str {
        &self.message_parts().protocol_version
    }

    /// Return a copy with the given protocol version.  Versions other than
    /// `1.0`, `1.1`, `2`, `2.0` and `3` are replaced by `1.1`.
    #[must_use]
    fn with_protocol_version<T>(&self, version: T) -> Self
    where
        T: AsRef<str>,
    {
        let version = version.as_ref();
        let version = if PROTOCOL_VERSIONS.contains(&version) {
            version
        } else {
            tracing::debug!(version, "unsupported protocol version, using the default");
            DEFAULT_PROTOCOL_VERSION
        };
        let mut message = self.clone();
        message.message_parts_mut().protocol_version = version.to_string();
        message
    }

    /// Borrow all header fields.
    fn headers(&self) -> &Headers {
        &self.message_parts().headers
    }

    /// Determine whether the named header is present, ignoring case.
    fn has_header<T>(&self, name: T) -> bool
    where
        T: AsRef<str>,
    {
        self.headers().has(name)
    }

    /// Borrow the values of the named header.
    fn header<T>(&self, name: T) -> &[String]
    where
        T: AsRef<str>,
    {
        self.headers().get(name)
    }

    /// Join the values of the named header with commas.
    fn header_line<T>(&self, name: T) -> String
    where
        T: AsRef<str>,
    {
        self.headers().get_line(name)
    }

    /// Return a copy with the named header replaced by a single value.
    ///
    /// # Errors
    ///
    /// Fails if the name or value is not allowed in a header.
    fn with_header<N, V>(&self, name: N, value: V) -> Result<Self, Error>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = self.headers().with_header(name, value)?;
        let mut message = self.clone();
        message.message_parts_mut().headers = headers;
        Ok(message)
    }

    /// Return a copy with a value appended to the named header.
    ///
    /// # Errors
    ///
    /// Fails if the name or value is not allowed in a header.
    fn with_added_header<N, V>(&self, name: N, value: V) -> Result<Self, Error>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = self.headers().with_added_header(name, value)?;
        let mut message = self.clone();
        message.message_parts_mut().headers = headers;
        Ok(message)
    }

    /// Return a copy without the named header.
    #[must_use]
    fn without_header<T>(&self, name: T) -> Self
    where
        T: AsRef<str>,
    {
        let headers = self.headers().without_header(name);
        let mut message = self.clone();
        message.message_parts_mut().headers = headers;
        message
    }

    /// Borrow the body.
    fn body(&self) -> &Stream {
        &self.message_parts().body
    }

    /// Return a copy with the given body.
    #[must_use]
    fn with_body(&self, body: Stream) -> Self {
        let mut message = self.clone();
        message.message_parts_mut().body = body;
        message
    }
}
