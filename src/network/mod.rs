//! A network abstraction layer for embedded systems
//!
//! The HTTP helpers in this crate never open or close sockets. They consume an
//! already-connected TCP socket through the small set of traits defined here:
//! byte-oriented [`Read`] and [`Write`], plus [`Available`] for querying and
//! discarding the bytes the stack has queued on the receive side. Asynchronous
//! counterparts are available behind the `async` feature.
//!

#![allow(async_fn_in_trait)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocol implementations
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    #[cfg(feature = "async")]
    pub use super::{AsyncAvailable, AsyncConnection, AsyncRead, AsyncWrite};
    pub use super::{Available, Connection, Read, Write};
}

/// Byte-oriented receive side of a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection.
    ///
    /// Returns the number of bytes copied into `buf`, which may be fewer than
    /// requested.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte-oriented transmit side of a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receive queue inspection.
///
/// Embedded TCP stacks usually expose how many bytes are waiting in the
/// socket's receive buffer. The response reader polls this to decide when a
/// response has started to arrive and when the stream is momentarily drained.
pub trait Available {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Number of bytes that can be read right now without blocking.
    fn available(&mut self) -> Result<usize, Self::Error>;
    /// Drop everything currently queued on the receive side.
    fn discard(&mut self) -> Result<(), Self::Error>;
}

/// An established connection usable by the HTTP client.
pub trait Connection: Read + Write + Available {}

#[cfg(feature = "async")]
/// Asynchronous counterpart of [`Read`].
pub trait AsyncRead {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection asynchronously
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

#[cfg(feature = "async")]
/// Asynchronous counterpart of [`Write`].
pub trait AsyncWrite {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection asynchronously
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer asynchronously
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

#[cfg(feature = "async")]
/// Asynchronous counterpart of [`Available`].
pub trait AsyncAvailable {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Number of bytes that can be read right now without waiting.
    async fn available(&mut self) -> Result<usize, Self::Error>;
    /// Drop everything currently queued on the receive side.
    async fn discard(&mut self) -> Result<(), Self::Error>;
}

#[cfg(feature = "async")]
/// An established connection usable by the asynchronous HTTP client.
pub trait AsyncConnection: AsyncRead + AsyncWrite + AsyncAvailable {}
