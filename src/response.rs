use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{
    error::Error,
    message::{Message, MessageParts},
};

static REASON_PHRASES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    [
        (100, "Continue"),
        (101, "Switching Protocols"),
        (102, "Processing"),
        (103, "Early Hints"),
        (200, "OK"),
        (201, "Created"),
        (202, "Accepted"),
        (203, "Non-Authoritative Information"),
        (204, "No Content"),
        (205, "Reset Content"),
        (206, "Partial Content"),
        (207, "Multi-Status"),
        (208, "Already Reported"),
        (226, "IM Used"),
        (300, "Multiple Choices"),
        (301, "Moved Permanently"),
        (302, "Found"),
        (303, "See Other"),
        (304, "Not Modified"),
        (305, "Use Proxy"),
        (307, "Temporary Redirect"),
        (308, "Permanent Redirect"),
        (400, "Bad Request"),
        (401, "Unauthorized"),
        (402, "Payment Required"),
        (403, "Forbidden"),
        (404, "Not Found"),
        (405, "Method Not Allowed"),
        (406, "Not Acceptable"),
        (407, "Proxy Authentication Required"),
        (408, "Request Timeout"),
        (409, "Conflict"),
        (410, "Gone"),
        (411, "Length Required"),
        (412, "Precondition Failed"),
        (413, "Content Too Large"),
        (414, "URI Too Long"),
        (415, "Unsupported Media Type"),
        (416, "Range Not Satisfiable"),
        (417, "Expectation Failed"),
        (418, "I'm a teapot"),
        (421, "Misdirected Request"),
        (422, "Unprocessable Content"),
        (423, "Locked"),
        (424, "Failed Dependency"),
        (425, "Too Early"),
        (426, "Upgrade Required"),
        (428, "Precondition Required"),
        (429, "Too Many Requests"),
        (431, "Request Header Fields Too Large"),
        (451, "Unavailable For Legal Reasons"),
        (500, "Internal Server Error"),
        (501, "Not Implemented"),
        (502, "Bad Gateway"),
        (503, "Service Unavailable"),
        (504, "Gateway Timeout"),
        (505, "HTTP Version Not Supported"),
        (506, "Variant Also Negotiates"),
        (507, "Insufficient Storage"),
        (508, "Loop Detected"),
        (510, "Not Extended"),
        (511, "Network Authentication Required"),
    ]
    .iter()
    .copied()
    .collect()
});

fn check_status(code: u16) -> Result<u16, Error> {
    if (100..=599).contains(&code) {
        Ok(code)
    } else {
        Err(Error::InvalidStatusCode(code))
    }
}

/// An incoming HTTP response: a status code and reason phrase on top of the
/// shared [`Message`](trait.Message.html) parts.
#[derive(Clone, Debug)]
pub struct Response {
    status_code: u16,
    reason_phrase: String,
    parts: MessageParts,
}

impl Response {
    /// Create a response with the given status code and its registered
    /// reason phrase (empty for unregistered codes).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStatusCode`](enum.Error.html#variant.InvalidStatusCode)
    /// is returned unless the code lies within 100..=599.
    pub fn new(status_code: u16) -> Result<Self, Error> {
        Response::default().with_status(status_code, "")
    }

    /// Return the status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Return the reason phrase.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Return a copy with the given status.  An empty reason phrase is
    /// replaced by the registered phrase for the code, if there is one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStatusCode`](enum.Error.html#variant.InvalidStatusCode)
    /// is returned unless the code lies within 100..=599, and
    /// [`Error::InvalidHeaderValue`](enum.Error.html#variant.InvalidHeaderValue)
    /// if the reason phrase contains a line break.
    pub fn with_status<T>(&self, status_code: u16, reason_phrase: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let status_code = check_status(status_code)?;
        let reason_phrase = reason_phrase.as_ref();
        if reason_phrase.contains(&['\r', '\n'][..]) {
            return Err(Error::InvalidHeaderValue(String::from("reason phrase")));
        }
        let reason_phrase = if reason_phrase.is_empty() {
            REASON_PHRASES.get(&status_code).copied().unwrap_or_default()
        } else {
            reason_phrase
        };
        let mut response = self.clone();
        response.status_code = status_code;
        response.reason_phrase = reason_phrase.to_string();
        Ok(response)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status_code: 200,
            reason_phrase: String::from("OK"),
            parts: MessageParts::default(),
        }
    }
}

impl Message for Response {
    fn message_parts(&self) -> &MessageParts {
        &self.parts
    }

    fn message_parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }
}
