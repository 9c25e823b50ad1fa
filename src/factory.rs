//! Free functions building each kind of value from loosely typed input, for
//! callers which would rather not reach for the individual constructors.

use std::path::Path;

use super::{
    error::Error,
    request::Request,
    response::Response,
    stream::Stream,
    uploaded_file::{UploadErrorCode, UploadedFile},
    uri::Uri,
};

/// Parse a URI string.  An empty string gives the empty URI.
///
/// # Errors
///
/// See [`Uri::parse`](../struct.Uri.html#method.parse).
pub fn create_uri<T>(uri: T) -> Result<Uri, Error>
where
    T: AsRef<str>,
{
    if uri.as_ref().is_empty() {
        Ok(Uri::default())
    } else {
        Uri::parse(uri)
    }
}

/// Create a request for a method and a URI string.
///
/// # Errors
///
/// Fails if the URI cannot be parsed or the method is not a token.
pub fn create_request<M, U>(method: M, uri: U) -> Result<Request, Error>
where
    M: AsRef<str>,
    U: AsRef<str>,
{
    Request::new(method, create_uri(uri)?)
}

/// Create a response with a status code and an optional reason phrase.
///
/// # Errors
///
/// See [`Response::with_status`](../struct.Response.html#method.with_status).
pub fn create_response<T>(status_code: u16, reason_phrase: T) -> Result<Response, Error>
where
    T: AsRef<str>,
{
    Response::default().with_status(status_code, reason_phrase)
}

/// Create an in-memory stream holding the given content.
#[must_use]
pub fn create_stream<T>(content: T) -> Stream
where
    T: Into<Vec<u8>>,
{
    Stream::from_bytes(content)
}

/// Open a file as a stream.
///
/// # Errors
///
/// See [`Stream::open`](../struct.Stream.html#method.open).
pub fn create_stream_from_file<P>(path: P, mode: &str) -> Result<Stream, Error>
where
    P: AsRef<Path>,
{
    Stream::open(path, mode)
}

/// Describe an upload held by a stream.  The size defaults to the size of
/// the stream when it is not given.
#[must_use]
pub fn create_uploaded_file(
    stream: Stream,
    size: Option<u64>,
    error: UploadErrorCode,
    client_filename: Option<&str>,
    client_media_type: Option<&str>,
) -> UploadedFile {
    let mut upload = UploadedFile::from_stream(stream.clone()).with_error(error);
    if let Some(size) = size.or_else(|| stream.size()) {
        upload = upload.with_size(size);
    }
    if let Some(filename) = client_filename {
        upload = upload.with_client_filename(filename);
    }
    if let Some(media_type) = client_media_type {
        upload = upload.with_client_media_type(media_type);
    }
    upload
}
