//! Splitting a raw response into status, header and body.
//!
//! The reader accumulates the response into a staging buffer first; the
//! functions here only look at that buffer and copy slices of it into the
//! caller's output buffers.

use super::error::Error;

/// Shortest input that can hold `HTTP/x.y NNN`.
const STATUS_LINE_MIN: usize = 12;
const STATUS_OFFSET: usize = 9;

/// Records which parts of a response were cut short.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// The staging buffer filled up while the socket still had data queued.
    pub staging: bool,
    /// The header did not fit in the header output buffer.
    pub header: bool,
    /// The body did not fit in the body output buffer.
    pub body: bool,
}

impl Truncation {
    /// `true` if any part of the response was lost.
    pub fn any(&self) -> bool {
        self.staging || self.header || self.body
    }
}

/// A response split into the caller's buffers.
///
/// `header` and `body` borrow the output buffers passed to the reader and
/// exclude the `0` terminator written after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'h, 'b> {
    /// Three digit status code from the status line.
    pub status_code: u16,
    /// Status line and header lines, including the final line ending.
    pub header: &'h [u8],
    /// Everything after the blank line.
    pub body: &'b [u8],
    /// Whether a blank line separating header and body was seen.
    pub boundary_found: bool,
    /// Which parts were truncated.
    pub truncation: Truncation,
}

impl<'h, 'b> Response<'h, 'b> {
    /// The header as text, if it is valid UTF-8.
    pub fn header_str(&self) -> Option<&'h str> {
        core::str::from_utf8(self.header).ok()
    }

    /// The body as text, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&'b str> {
        core::str::from_utf8(self.body).ok()
    }

    /// `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Parses the status code of a response that starts with `HTTP/x.y NNN`.
///
/// The three digits are read at a fixed offset after the version; anything
/// shorter or with a different prefix is [`Error::MalformedResponse`].
pub fn parse_status(data: &[u8]) -> Result<u16, Error> {
    if data.len() < STATUS_LINE_MIN || !data.starts_with(b"HTTP/") || data[8] != b' ' {
        return Err(Error::MalformedResponse);
    }
    data[STATUS_OFFSET..STATUS_LINE_MIN]
        .iter()
        .try_fold(0u16, |code, &digit| {
            if digit.is_ascii_digit() {
                Ok(code * 10 + u16::from(digit - b'0'))
            } else {
                Err(Error::MalformedResponse)
            }
        })
}

/// Locates the blank line that ends the header.
///
/// Returns `(header_end, body_start)`: the header keeps the line ending of its
/// last line, the body starts right after the blank line. Both `\r\n\r\n` and
/// `\n\n` are recognised; the earliest match wins.
pub fn find_boundary(data: &[u8]) -> Option<(usize, usize)> {
    for i in 0..data.len() {
        if data[i..].starts_with(b"\r\n\r\n") {
            return Some((i + 2, i + 4));
        }
        if data[i..].starts_with(b"\n\n") {
            return Some((i + 1, i + 2));
        }
    }
    None
}

/// Copies as much of `src` as fits in `dest` while leaving room for a `0`
/// terminator. Returns the copied part of `dest` and whether `src` was cut.
///
/// An empty `dest` receives nothing, not even the terminator.
pub fn copy_terminated<'a>(src: &[u8], dest: &'a mut [u8]) -> (&'a [u8], bool) {
    let Some(room) = dest.len().checked_sub(1) else {
        return (&dest[..], !src.is_empty());
    };
    let len = src.len().min(room);
    dest[..len].copy_from_slice(&src[..len]);
    dest[len] = 0;
    (&dest[..len], len < src.len())
}

/// Splits accumulated response bytes into the caller's buffers.
///
/// `data` is the received response without terminator; `staging_truncated`
/// is carried into the returned [`Truncation`]. Nothing is written when the
/// status line is malformed.
pub fn split<'h, 'b>(
    data: &[u8],
    staging_truncated: bool,
    header_out: &'h mut [u8],
    body_out: &'b mut [u8],
) -> Result<Response<'h, 'b>, Error> {
    let status_code = parse_status(data)?;

    let boundary = find_boundary(data);
    let (header_src, body_src) = match boundary {
        Some((header_end, body_start)) => (&data[..header_end], &data[body_start..]),
        None => (data, &data[data.len()..]),
    };

    let (header, header_truncated) = copy_terminated(header_src, header_out);
    let (body, body_truncated) = copy_terminated(body_src, body_out);

    Ok(Response {
        status_code,
        header,
        body,
        boundary_found: boundary.is_some(),
        truncation: Truncation {
            staging: staging_truncated,
            header: header_truncated,
            body: body_truncated,
        },
    })
}
