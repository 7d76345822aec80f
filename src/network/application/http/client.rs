//! Blocking HTTP/1.1 client over a cooperative scheduler.
//!
//! The client owns an established connection, the scheduler used for waiting
//! and a staging buffer of `N` bytes. The request head is encoded into the
//! staging buffer and written to the socket together with the body, which is
//! copied alongside the head when it fits and written from the caller's slice
//! otherwise. The response is then read back into the same buffer before being
//! split into the caller's header and body buffers.
//!
//! # Waiting for a response
//!
//! After the request is sent the client polls
//! [`Available::available`](crate::network::Available::available) until at
//! least [`Options::min_response_len`] bytes are queued, yielding one scheduler
//! tick between polls. If that does not happen within the timeout the call
//! fails with [`Error::ReadTimeout`] and the output buffers are left untouched.
//! Once data has arrived the socket is drained in chunks of at most
//! [`Options::chunk_size`] bytes until it reports nothing pending or the
//! staging buffer is full.
//!
//! # Example
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
//! let mut body = [0u8; 512];
//!
//! match client.get_simple("example.com", "/status?id=7", &mut header, &mut body) {
//!     Ok(response) if response.is_success() => {
//!         let _text = response.body_str();
//!     }
//!     Ok(_response) => { /* non-2xx */ }
//!     Err(_err) => { /* timeout, malformed or transport failure */ }
//! }
//! ```

use super::error::Error;
use super::request::{APPLICATION_JSON, FORM_URLENCODED, Request};
use super::response::{self, Response};
use crate::network::error::Error as NetworkError;
use crate::network::{Available, Connection, Read, Write};
use crate::system::Scheduler;
use serde::Serialize;

/// Staging buffer size used by [`Client::new`].
pub const DEFAULT_STAGING_CAPACITY: usize = 4096;

/// Largest JSON body [`Client::post_json`] can serialize.
pub const MAX_JSON_BODY: usize = 1024;

/// Runtime settings for the client.
///
/// ```rust
/// use picohttp::network::application::http::Options;
///
/// let options = Options {
///     tick_ms: 1,
///     ..Options::default()
/// };
/// assert_eq!(options.default_timeout_ms, 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Length of one scheduler tick in milliseconds.
    pub tick_ms: u32,
    /// Timeout used by the `*_simple` requests.
    pub default_timeout_ms: u32,
    /// Bytes that must be queued before a response counts as arrived.
    ///
    /// The default of 15 covers `HTTP/1.1 NNN ` plus a line ending.
    pub min_response_len: usize,
    /// Largest read issued to the socket while draining.
    pub chunk_size: usize,
    /// Yield one tick after every chunk read while draining, so that a large
    /// response does not starve other tasks.
    pub yield_while_draining: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            default_timeout_ms: 2000,
            min_response_len: 15,
            chunk_size: 500,
            yield_while_draining: true,
        }
    }
}

impl Options {
    /// Number of scheduler ticks that make up `timeout_ms`.
    pub fn ticks(&self, timeout_ms: u32) -> u32 {
        timeout_ms / self.tick_ms.max(1)
    }
}

/// Result of draining the socket into the staging buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Received {
    pub(crate) len: usize,
    pub(crate) truncated: bool,
}

/// Reads one response from `connection` and splits it into `header_out` and
/// `body_out`.
///
/// `staging` holds the raw response while it is split; at most
/// `staging.len() - 1` bytes are kept and the byte after them is set to `0`.
/// The client methods call this with their own staging buffer, but it can be
/// used directly with a per-call buffer after sending a request by other
/// means.
///
/// # Errors
///
/// - [`Error::ReadTimeout`] if fewer than [`Options::min_response_len`] bytes
///   arrived within `timeout_ms`. Outputs are untouched.
/// - [`Error::MalformedResponse`] if the data does not start with a status
///   line. Outputs are untouched.
/// - [`Error::BufferTooSmall`] if `staging` is empty.
/// - [`Error::Network`] if the connection reports an error.
pub fn read_response<'h, 'b, C, S>(
    connection: &mut C,
    scheduler: &mut S,
    staging: &mut [u8],
    header_out: &'h mut [u8],
    body_out: &'b mut [u8],
    options: &Options,
    timeout_ms: u32,
) -> Result<Response<'h, 'b>, Error>
where
    C: Read + Available + ?Sized,
    S: Scheduler + ?Sized,
{
    let received = receive(connection, scheduler, staging, options, timeout_ms)?;
    let data = &staging[..received.len];

    let response = response::split(data, received.truncated, header_out, body_out)?;
    debug!(
        "http response: status {}, header {} bytes, body {} bytes",
        response.status_code,
        response.header.len(),
        response.body.len()
    );
    Ok(response)
}

fn receive<C, S>(
    connection: &mut C,
    scheduler: &mut S,
    staging: &mut [u8],
    options: &Options,
    timeout_ms: u32,
) -> Result<Received, Error>
where
    C: Read + Available + ?Sized,
    S: Scheduler + ?Sized,
{
    let capacity = staging.len().checked_sub(1).ok_or(Error::BufferTooSmall)?;

    // Wait for at least a status line.
    let ticks = options.ticks(timeout_ms);
    let mut waited = 0;
    loop {
        let pending = connection
            .available()
            .map_err(|_| NetworkError::ReadError)?;
        if pending >= options.min_response_len {
            break;
        }
        if waited >= ticks {
            warn!("http response: nothing after {} ms", timeout_ms);
            return Err(Error::ReadTimeout);
        }
        scheduler.yield_tick();
        waited += 1;
    }

    let chunk_size = options.chunk_size.max(1);
    let mut len = 0;
    let mut truncated = false;
    loop {
        let pending = connection
            .available()
            .map_err(|_| NetworkError::ReadError)?;
        if pending == 0 {
            break;
        }
        if len == capacity {
            truncated = true;
            warn!(
                "http response: staging buffer full, {} bytes left on socket",
                pending
            );
            break;
        }

        let want = pending.min(chunk_size).min(capacity - len);
        let n = connection
            .read(&mut staging[len..len + want])
            .map_err(|_| NetworkError::ReadError)?;
        if n == 0 {
            break;
        }
        len += n.min(want);

        if options.yield_while_draining {
            scheduler.yield_tick();
        }
    }
    staging[len] = 0;

    trace!("http response: received {} bytes", len);
    Ok(Received { len, truncated })
}

/// An HTTP client bound to one open connection.
///
/// `N` is the size of the staging buffer that holds both the outgoing request
/// and the raw incoming response. Responses longer than `N - 1` bytes are
/// truncated. Bodies of any size are sent, but a request line plus headers
/// longer than `N` bytes is rejected with [`Error::RequestTooLarge`].
#[derive(Debug)]
pub struct Client<C: Connection, S: Scheduler, const N: usize = DEFAULT_STAGING_CAPACITY> {
    connection: C,
    scheduler: S,
    options: Options,
    staging: [u8; N],
}

impl<C: Connection, S: Scheduler> Client<C, S> {
    /// Creates a client with default [`Options`] and a
    /// [`DEFAULT_STAGING_CAPACITY`] byte staging buffer.
    pub fn new(connection: C, scheduler: S) -> Self {
        Self::with_options(connection, scheduler, Options::default())
    }
}

impl<C: Connection, S: Scheduler, const N: usize> Client<C, S, N> {
    /// Creates a client with explicit options. The staging size is taken
    /// from the type, e.g. `Client<_, _, 1024>`.
    pub fn with_options(connection: C, scheduler: S, options: Options) -> Self {
        Self {
            connection,
            scheduler,
            options,
            staging: [0; N],
        }
    }

    /// The options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Shared access to the connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Mutable access to the connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Returns the connection and scheduler.
    pub fn release(self) -> (C, S) {
        (self.connection, self.scheduler)
    }

    /// Sends `GET path` and reads the response.
    ///
    /// `headers` holds extra header lines, each ending in `\r\n`, or `""`.
    pub fn get<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        headers: &str,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        let request = Request::get(host, path, headers);
        self.request(&request, header_out, body_out, timeout_ms)
    }

    /// [`get`](Self::get) without custom headers, using
    /// [`Options::default_timeout_ms`].
    pub fn get_simple<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
    ) -> Result<Response<'h, 'b>, Error> {
        let timeout_ms = self.options.default_timeout_ms;
        self.get(host, path, "", header_out, body_out, timeout_ms)
    }

    /// Sends `POST path` with `data` as body and reads the response.
    #[allow(clippy::too_many_arguments)]
    pub fn post<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        headers: &str,
        content_type: &str,
        data: &[u8],
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        let request = Request::post(host, path, headers, content_type, data);
        self.request(&request, header_out, body_out, timeout_ms)
    }

    /// [`post`](Self::post) a form body
    /// (`application/x-www-form-urlencoded`) without custom headers, using
    /// [`Options::default_timeout_ms`].
    pub fn post_simple<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        data: &[u8],
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
    ) -> Result<Response<'h, 'b>, Error> {
        let timeout_ms = self.options.default_timeout_ms;
        self.post(
            host,
            path,
            "",
            FORM_URLENCODED,
            data,
            header_out,
            body_out,
            timeout_ms,
        )
    }

    /// Sends `PUT path` with `data` as body and reads the response.
    #[allow(clippy::too_many_arguments)]
    pub fn put<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        headers: &str,
        data: &[u8],
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        let request = Request::put(host, path, headers, data);
        self.request(&request, header_out, body_out, timeout_ms)
    }

    /// Serializes `value` as JSON and sends it with `POST`.
    ///
    /// The body is limited to [`MAX_JSON_BODY`] bytes; larger values fail
    /// with [`Error::Serialize`].
    #[allow(clippy::too_many_arguments)]
    pub fn post_json<'h, 'b, T: Serialize + ?Sized>(
        &mut self,
        host: &str,
        path: &str,
        headers: &str,
        value: &T,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        let mut json = [0u8; MAX_JSON_BODY];
        let len = serde_json_core::to_slice(value, &mut json).map_err(|_| Error::Serialize)?;
        let request = Request::post(host, path, headers, APPLICATION_JSON, &json[..len]);
        self.request(&request, header_out, body_out, timeout_ms)
    }

    /// Sends an arbitrary request and reads the response.
    ///
    /// Stale bytes queued on the receive side are discarded first so they
    /// cannot be mistaken for the response.
    pub fn request<'h, 'b>(
        &mut self,
        request: &Request<'_>,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        self.send(request)?;
        self.read_response(header_out, body_out, timeout_ms)
    }

    /// Reads a response to a request that was already sent.
    pub fn read_response<'h, 'b>(
        &mut self,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        read_response(
            &mut self.connection,
            &mut self.scheduler,
            &mut self.staging,
            header_out,
            body_out,
            &self.options,
            timeout_ms,
        )
    }

    fn send(&mut self, request: &Request<'_>) -> Result<(), Error> {
        self.connection
            .discard()
            .map_err(|_| NetworkError::ReadError)?;

        // The body joins the head in staging when it fits, otherwise it is
        // written straight from the caller's slice.
        let head = request.encode_head(&mut self.staging)?;
        let inline = self.staging.len() - head >= request.body.len();
        let len = if inline {
            let end = head + request.body.len();
            self.staging[head..end].copy_from_slice(request.body);
            end
        } else {
            head
        };
        debug!(
            "http request: {} {} ({} bytes)",
            request.method,
            request.path,
            request.encoded_len()
        );
        if let Ok(text) = core::str::from_utf8(&self.staging[..len]) {
            trace!("{}", text);
        }

        write_all(&mut self.connection, &self.staging[..len])?;
        if !inline {
            write_all(&mut self.connection, request.body)?;
        }
        self.connection
            .flush()
            .map_err(|_| NetworkError::WriteError)?;
        Ok(())
    }
}

fn write_all<C: Write + ?Sized>(connection: &mut C, mut bytes: &[u8]) -> Result<(), Error> {
    while !bytes.is_empty() {
        let n = connection
            .write(bytes)
            .map_err(|_| NetworkError::WriteError)?;
        if n == 0 {
            return Err(NetworkError::ConnectionClosed.into());
        }
        bytes = &bytes[n.min(bytes.len())..];
    }
    Ok(())
}
