use super::{context::Context, uploaded_file::UploadErrorCode};

/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A component does not match its grammar.  The offending raw value is
    /// kept for diagnostics.
    #[error("invalid {context} {value:?}: {reason}")]
    InvalidFormat {
        /// The component which was rejected.
        context: Context,
        /// The raw value as given by the caller.
        value: String,
        /// Which rule the value broke.
        reason: &'static str,
    },

    /// A component was syntactically acceptable but nothing was left of it
    /// once normalization filtered out the invalid parts.
    #[error("{0} is empty after normalization")]
    EmptyAfterNormalization(Context),

    /// The URI has no scheme, no host and no path, so there is no way to tell
    /// what it refers to.
    #[error("URI {0:?} has no scheme, host or path")]
    AmbiguousUri(String),

    /// A normalizer failed while parsing a whole URI string.
    #[error("unable to parse the {context} of the URI")]
    Component {
        /// The URI component being parsed.
        context: Context,
        /// What the component normalizer reported.
        #[source]
        source: Box<Error>,
    },

    /// A header name is not an RFC 7230 token.
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    /// A header value contains a line break or NUL character.
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    /// A request method is not an RFC 7230 token.
    #[error("invalid request method {0:?}")]
    InvalidMethod(String),

    /// A request target contains whitespace.
    #[error("invalid request target {0:?}")]
    InvalidRequestTarget(String),

    /// A response status code lies outside of 100..=599.
    #[error("invalid status code {0}")]
    InvalidStatusCode(u16),

    /// The underlying resource of a stream has been detached or closed.
    #[error("stream is detached")]
    StreamDetached,

    /// The stream was not opened for reading.
    #[error("stream is not readable")]
    NotReadable,

    /// The stream was not opened for writing.
    #[error("stream is not writable")]
    NotWritable,

    /// The stream does not support seeking.
    #[error("stream is not seekable")]
    NotSeekable,

    /// A file open mode is not one of `r`, `w`, `a`, `x`, `c`, optionally
    /// followed by `+` and/or `b`/`t`.
    #[error("invalid stream mode {0:?}")]
    InvalidStreamMode(String),

    /// A numeric upload error code does not name a known condition.
    #[error("unknown upload error code {0}")]
    InvalidUploadErrorCode(u8),

    /// An uploaded file has already been moved to its final location.
    #[error("uploaded file has already been moved")]
    UploadAlreadyMoved,

    /// The upload itself failed, so there is no content to access.
    #[error("upload failed: {0}")]
    UploadFailed(UploadErrorCode),

    /// The destination of an uploaded file move is unusable.
    #[error("invalid target path {0:?}")]
    InvalidTargetPath(String),

    /// The operating system reported an I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid<T>(context: Context, value: T, reason: &'static str) -> Self
    where
        T: Into<String>,
    {
        Error::InvalidFormat {
            context,
            value: value.into(),
            reason,
        }
    }

    pub(crate) fn in_component(self, context: Context) -> Self {
        Error::Component {
            context,
            source: Box::new(self),
        }
    }

    /// Return the URI component an error refers to, if any.  For errors
    /// raised while parsing a whole URI string this is the component that
    /// failed, not the component the inner normalizer reported.
    #[must_use]
    pub fn context(&self) -> Option<Context> {
        match self {
            Error::InvalidFormat { context, .. }
            | Error::EmptyAfterNormalization(context)
            | Error::Component { context, .. } => Some(*context),
            Error::AmbiguousUri(_) => Some(Context::Uri),
            _ => None,
        }
    }
}
