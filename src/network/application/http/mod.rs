//! HTTP/1.1 client helper for embedded systems.
//!
//! This module provides a small HTTP client designed for `no_std` targets
//! whose TCP stack hands out already-connected sockets. It focuses on
//! predictable memory usage: the only buffers are the client's staging buffer
//! and the header/body buffers the caller passes in.
//!
//! # Features
//!
//! - `GET`, `POST` and `PUT` requests with caller supplied header lines
//! - Cooperative waiting through [`Scheduler`](crate::system::Scheduler)
//! - Responses split into status code, header bytes and body bytes, truncated
//!   to the caller's buffers and always `0`-terminated
//! - Truncation reported through [`Truncation`] instead of silently dropped
//! - URL percent-encoding and decoding in [`url`]
//! - `Authorization: Basic` lines via [`basic_auth`] and JSON bodies via
//!   [`Client::post_json`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use picohttp::network::application::http::{Client, Error, url};
//! # use picohttp::network::{Available, Connection, Read, Write};
//! # use picohttp::system::Scheduler;
//! # struct Socket;
//! # impl Connection for Socket {}
//! # impl Read for Socket {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Socket {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Available for Socket {
//! #     type Error = ();
//! #     fn available(&mut self) -> Result<usize, Self::Error> { Ok(0) }
//! #     fn discard(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Rtos;
//! # impl Scheduler for Rtos {
//! #     fn yield_tick(&mut self) {}
//! # }
//!
//! let mut client = Client::new(Socket, Rtos);
//! let mut header = [0u8; 256];
//! let mut body = [0u8; 256];
//!
//! let form = url::encode_to_string::<64>("name=kitchen sensor").unwrap();
//! let mut data: heapless::String<80> = heapless::String::new();
//! data.push_str("id=").unwrap();
//! data.push_str(&form).unwrap();
//!
//! match client.post_simple("example.com", "/register", data.as_bytes(), &mut header, &mut body) {
//!     Ok(response) => assert!(response.status_code >= 100),
//!     Err(Error::ReadTimeout) => { /* server silent */ }
//!     Err(_) => { /* malformed response or socket failure */ }
//! }
//! ```

/// Blocking client and the response reader.
pub mod client;

/// Error type shared by the client and the URL codec.
pub mod error;

/// Request encoding.
pub mod request;

/// Response splitting.
pub mod response;

/// URL percent-encoding.
pub mod url;

/// Asynchronous client.
#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::AsyncClient;
pub use client::{Client, DEFAULT_STAGING_CAPACITY, Options, read_response};
pub use error::Error;
pub use request::{Method, Request, basic_auth};
pub use response::{Response, Truncation};
