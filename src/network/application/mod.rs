//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocol helpers built on the core network
//! traits.
//!
//! - **[`http`]**: HTTP/1.1 request/response helper for embedded sockets
//!
//! All helpers work with any type implementing
//! [`Connection`](crate::network::Connection), use fixed-size buffers and never
//! allocate.

/// HTTP client implementation.
///
/// Builds GET, POST and PUT requests, transmits them over an open socket and
/// splits the response into status, header and body.
pub mod http;
