//! This crate models HTTP messages as immutable values: [`Uri`],
//! [`Request`], [`Response`], their [`Headers`] and [`Stream`] bodies, and
//! [`UploadedFile`]s.
//!
//! Every URI component is normalized as soon as it enters a [`Uri`], so two
//! spellings of the same resource produce equal values and the same string:
//!
//! * the scheme and domain names are folded to lower case;
//! * IPv4 addresses lose leading zeros and IPv6 addresses take their
//!   shortest lower case form (`[2001:DB8:0:0::1]` becomes `[2001:db8::1]`);
//! * the standard port of the scheme is left out;
//! * percent-encoding is made canonical, with upper case hex digits, and
//!   characters which need no encoding are decoded;
//! * query pairs which are not valid `key=value` pairs are dropped.
//!
//! # Examples
//!
//! ## Normalizing a URI
//!
//! ```rust
//! use psr7::Uri;
//!
//! # fn main() -> Result<(), psr7::Error> {
//! let uri = Uri::parse("HTTP://User@WWW.Example.COM:80/%7efoo/a%20b?x=1&&y[]=2#top")?;
//! assert_eq!("http://User@www.example.com/~foo/a%20b?x=1#top", uri.to_string());
//! # Ok(())
//! # }
//! ```
//!
//! ## Building a request
//!
//! ```rust
//! use psr7::{Message, Request, Stream, Uri};
//!
//! # fn main() -> Result<(), psr7::Error> {
//! let request = Request::new("POST", Uri::parse("https://api.example.com:8443/items")?)?
//!     .with_header("Content-Type", "application/json")?
//!     .with_body(Stream::from_bytes(r#"{"name":"widget"}"#));
//! assert_eq!("api.example.com:8443", request.header_line("host"));
//! assert_eq!("/items", request.request_target());
//! # Ok(())
//! # }
//! ```
//!
//! [`Uri`]: struct.Uri.html
//! [`Request`]: struct.Request.html
//! [`Response`]: struct.Response.html
//! [`Headers`]: struct.Headers.html
//! [`Stream`]: struct.Stream.html
//! [`UploadedFile`]: struct.UploadedFile.html

// #![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]
#![warn(missing_docs)]

mod authority;

mod character_classes;

mod codec;

mod components;

mod context;
pub use context::Context;

mod error;
pub use error::Error;

pub mod factory;

mod headers;
pub use headers::Headers;

mod message;
pub use message::{Message, MessageParts};

mod normalize_host;
pub use normalize_host::normalize_host;
mod normalize_ipv4_address;
pub use normalize_ipv4_address::normalize_ipv4_address;
mod normalize_ipv6_address;
pub use normalize_ipv6_address::normalize_ipv6_address;

mod parse_host_port;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod stream;
pub use stream::{Resource, Stream};

mod uploaded_file;
pub use uploaded_file::{UploadErrorCode, UploadedFile};

mod uri;
pub use uri::Uri;
