//! Asynchronous variant of the HTTP client.
//!
//! [`AsyncClient`] behaves like [`Client`](super::Client) but awaits the
//! connection and the scheduler instead of calling them synchronously, so it
//! can run inside an async executor on the target.

use super::client::{DEFAULT_STAGING_CAPACITY, MAX_JSON_BODY, Options, Received};
use super::error::Error;
use super::request::{APPLICATION_JSON, FORM_URLENCODED, Request};
use super::response::{self, Response};
use crate::network::error::Error as NetworkError;
use crate::network::{AsyncAvailable, AsyncConnection, AsyncRead, AsyncWrite};
use crate::system::AsyncScheduler;
use serde::Serialize;

/// Asynchronous counterpart of
/// [`read_response`](super::client::read_response).
pub async fn read_response<'h, 'b, C, S>(
    connection: &mut C,
    scheduler: &mut S,
    staging: &mut [u8],
    header_out: &'h mut [u8],
    body_out: &'b mut [u8],
    options: &Options,
    timeout_ms: u32,
) -> Result<Response<'h, 'b>, Error>
where
    C: AsyncRead + AsyncAvailable,
    S: AsyncScheduler,
{
    let received = receive(connection, scheduler, staging, options, timeout_ms).await?;
    let response = response::split(
        &staging[..received.len],
        received.truncated,
        header_out,
        body_out,
    )?;
    debug!(
        "http response: status {}, header {} bytes, body {} bytes",
        response.status_code,
        response.header.len(),
        response.body.len()
    );
    Ok(response)
}

async fn receive<C, S>(
    connection: &mut C,
    scheduler: &mut S,
    staging: &mut [u8],
    options: &Options,
    timeout_ms: u32,
) -> Result<Received, Error>
where
    C: AsyncRead + AsyncAvailable,
    S: AsyncScheduler,
{
    let capacity = staging.len().checked_sub(1).ok_or(Error::BufferTooSmall)?;

    let ticks = options.ticks(timeout_ms);
    let mut waited = 0;
    loop {
        let pending = connection
            .available()
            .await
            .map_err(|_| NetworkError::ReadError)?;
        if pending >= options.min_response_len {
            break;
        }
        if waited >= ticks {
            warn!("http response: nothing after {} ms", timeout_ms);
            return Err(Error::ReadTimeout);
        }
        scheduler.yield_tick().await;
        waited += 1;
    }

    let chunk_size = options.chunk_size.max(1);
    let mut len = 0;
    let mut truncated = false;
    loop {
        let pending = connection
            .available()
            .await
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
            .await
            .map_err(|_| NetworkError::ReadError)?;
        if n == 0 {
            break;
        }
        len += n.min(want);

        if options.yield_while_draining {
            scheduler.yield_tick().await;
        }
    }
    staging[len] = 0;

    trace!("http response: received {} bytes", len);
    Ok(Received { len, truncated })
}

/// An asynchronous HTTP client bound to one open connection.
#[derive(Debug)]
pub struct AsyncClient<
    C: AsyncConnection,
    S: AsyncScheduler,
    const N: usize = DEFAULT_STAGING_CAPACITY,
> {
    connection: C,
    scheduler: S,
    options: Options,
    staging: [u8; N],
}

impl<C: AsyncConnection, S: AsyncScheduler> AsyncClient<C, S> {
    /// Creates a client with default [`Options`].
    pub fn new(connection: C, scheduler: S) -> Self {
        Self::with_options(connection, scheduler, Options::default())
    }
}

impl<C: AsyncConnection, S: AsyncScheduler, const N: usize> AsyncClient<C, S, N> {
    /// Creates a client with explicit options.
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

    /// See [`Client::get`](super::Client::get).
    pub async fn get<'h, 'b>(
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
            .await
    }

    /// See [`Client::get_simple`](super::Client::get_simple).
    pub async fn get_simple<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
    ) -> Result<Response<'h, 'b>, Error> {
        let timeout_ms = self.options.default_timeout_ms;
        self.get(host, path, "", header_out, body_out, timeout_ms)
            .await
    }

    /// See [`Client::post`](super::Client::post).
    #[allow(clippy::too_many_arguments)]
    pub async fn post<'h, 'b>(
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
            .await
    }

    /// See [`Client::post_simple`](super::Client::post_simple).
    pub async fn post_simple<'h, 'b>(
        &mut self,
        host: &str,
        path: &str,
        data: &[u8],
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
    ) -> Result<Response<'h, 'b>, Error> {
        let timeout_ms = self.options.default_timeout_ms;
        let request = Request::post(host, path, "", FORM_URLENCODED, data);
        self.request(&request, header_out, body_out, timeout_ms)
            .await
    }

    /// See [`Client::put`](super::Client::put).
    #[allow(clippy::too_many_arguments)]
    pub async fn put<'h, 'b>(
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
            .await
    }

    /// See [`Client::post_json`](super::Client::post_json).
    #[allow(clippy::too_many_arguments)]
    pub async fn post_json<'h, 'b, T: Serialize + ?Sized>(
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
            .await
    }

    /// See [`Client::request`](super::Client::request).
    pub async fn request<'h, 'b>(
        &mut self,
        request: &Request<'_>,
        header_out: &'h mut [u8],
        body_out: &'b mut [u8],
        timeout_ms: u32,
    ) -> Result<Response<'h, 'b>, Error> {
        self.send(request).await?;
        self.read_response(header_out, body_out, timeout_ms).await
    }

    /// See [`Client::read_response`](super::Client::read_response).
    pub async fn read_response<'h, 'b>(
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
        .await
    }

    async fn send(&mut self, request: &Request<'_>) -> Result<(), Error> {
        self.connection
            .discard()
            .await
            .map_err(|_| NetworkError::ReadError)?;

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

        write_all(&mut self.connection, &self.staging[..len]).await?;
        if !inline {
            write_all(&mut self.connection, request.body).await?;
        }
        self.connection
            .flush()
            .await
            .map_err(|_| NetworkError::WriteError)?;
        Ok(())
    }
}

async fn write_all<C: AsyncWrite>(connection: &mut C, mut bytes: &[u8]) -> Result<(), Error> {
    while !bytes.is_empty() {
        let n = connection
            .write(bytes)
            .await
            .map_err(|_| NetworkError::WriteError)?;
        if n == 0 {
            return Err(NetworkError::ConnectionClosed.into());
        }
        bytes = &bytes[n.min(bytes.len())..];
    }
    Ok(())
}
