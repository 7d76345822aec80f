//! # picohttp - HTTP client helper for embedded network stacks
//!
//! A small HTTP/1.1 client for devices whose TCP/IP stack hands out
//! already-connected sockets. It builds `GET`, `POST` and `PUT` requests,
//! writes them to the socket, waits cooperatively for the response and splits
//! it into a status code, header bytes and body bytes inside fixed-size
//! buffers. URL percent-encoding helpers are included.
//!
//! ## Layout
//!
//! - [`network`]: the socket traits the client consumes and the transport
//!   error type
//! - [`network::application::http`]: client, request encoding, response
//!   splitting and the URL codec
//! - [`system`]: the cooperative scheduler trait
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! picohttp = "0.1.0"
//! ```
//!
//! ### Basic HTTP Client Example
//!
//! ```rust,no_run
//! use picohttp::network::application::http::Client;
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
//! let mut body = [0u8; 1024];
//!
//! // let response = client.get("api.example.com", "/v1/time", "", &mut header, &mut body, 5000)?;
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `async`: Enable the async client and traits
//! - `defmt`: Log through `defmt`
//! - `log`: Log through the `log` crate

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer and application protocols.
///
/// Contains the connection traits consumed by the protocol clients and the
/// HTTP client itself.
pub mod network;

/// System services consumed by the protocol clients.
///
/// Currently the cooperative [`Scheduler`](system::Scheduler).
pub mod system;
