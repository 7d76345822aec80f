//! Percent-encoding for URL query strings and form bodies.
//!
//! A fixed set of 25 bytes (space plus the punctuation that carries meaning in
//! URLs and HTTP headers, `%` included) is written as `%XX` with uppercase hex
//! digits. Every other byte passes through unchanged.
//!
//! The slice based functions mirror the usual embedded pattern: size the
//! destination with [`encoded_len`] / [`decoded_len`], then convert. Both
//! lengths count a trailing `0` terminator, which the converters always write.
//!
//! ```rust
//! use picohttp::network::application::http::url;
//!
//! let src = b"temp=21.5&unit=C";
//! let mut dest = [0u8; 32];
//! assert_eq!(url::encoded_len(src), 23);
//!
//! let n = url::encode(src, &mut dest).unwrap();
//! assert_eq!(&dest[..n], b"temp%3D21.5%26unit%3DC");
//! assert_eq!(dest[n], 0);
//! ```

use super::error::Error;
use heapless::{String, Vec};

/// Bytes that are always percent-encoded.
const ESCAPED: [u8; 25] = [
    b'$', b'&', b'+', b',', b'/', b':', b';', b'=', b'?', b'@', b' ', b'"', b'<', b'>', b'#', b'%',
    b'{', b'}', b'|', b'\\', b'^', b'~', b'[', b']', b'`',
];

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Returns `true` if `byte` is written as a `%XX` escape by [`encode`].
pub fn is_escaped(byte: u8) -> bool {
    ESCAPED.contains(&byte)
}

/// Size of the buffer [`encode`] needs for `src`, terminator included.
pub fn encoded_len(src: &[u8]) -> usize {
    let escaped = src.iter().filter(|&&b| is_escaped(b)).count();
    src.len() + 2 * escaped + 1
}

/// Percent-encodes `src` into `dest` and appends a `0` terminator.
///
/// Returns the number of encoded bytes, not counting the terminator. Fails
/// with [`Error::BufferTooSmall`] without touching `dest` when it is shorter
/// than [`encoded_len`].
pub fn encode(src: &[u8], dest: &mut [u8]) -> Result<usize, Error> {
    if dest.len() < encoded_len(src) {
        return Err(Error::BufferTooSmall);
    }

    let mut pos = 0;
    for &byte in src {
        if is_escaped(byte) {
            dest[pos] = b'%';
            dest[pos + 1] = HEX[(byte >> 4) as usize];
            dest[pos + 2] = HEX[(byte & 0x0F) as usize];
            pos += 3;
        } else {
            dest[pos] = byte;
            pos += 1;
        }
    }
    dest[pos] = 0;
    Ok(pos)
}

/// Size of the buffer [`decode`] needs for `src`, terminator included.
///
/// Every `%` is assumed to start a three byte escape; the input is not
/// validated.
pub fn decoded_len(src: &[u8]) -> usize {
    let mut len = src.len();
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'%' {
            len = len.saturating_sub(2);
            i += 3;
        } else {
            i += 1;
        }
    }
    len + 1
}

/// Decodes `%XX` escapes in `src` into `dest` and appends a `0` terminator.
///
/// Hex digits may be upper or lower case. Returns the number of decoded bytes,
/// not counting the terminator.
///
/// # Errors
///
/// - [`Error::BufferTooSmall`] if `dest` is shorter than [`decoded_len`].
/// - [`Error::InvalidEscape`] if a `%` is not followed by two hex digits. The
///   contents of `dest` are unspecified in that case.
pub fn decode(src: &[u8], dest: &mut [u8]) -> Result<usize, Error> {
    if dest.len() < decoded_len(src) {
        return Err(Error::BufferTooSmall);
    }

    let mut pos = 0;
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'%' {
            let hi = src.get(i + 1).copied().and_then(hex_value);
            let lo = src.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => dest[pos] = (hi << 4) | lo,
                _ => return Err(Error::InvalidEscape),
            }
            i += 3;
        } else {
            dest[pos] = src[i];
            i += 1;
        }
        pos += 1;
    }
    dest[pos] = 0;
    Ok(pos)
}

/// Percent-encodes `src` into a fixed-capacity string.
///
/// The result holds no terminator, so `N` only has to cover
/// `encoded_len(src) - 1` bytes.
pub fn encode_to_string<const N: usize>(src: &str) -> Result<String<N>, Error> {
    let mut out = String::new();
    for c in src.chars() {
        if c.is_ascii() && is_escaped(c as u8) {
            let byte = c as u8;
            let escape = [
                '%',
                HEX[(byte >> 4) as usize] as char,
                HEX[(byte & 0x0F) as usize] as char,
            ];
            for e in escape {
                out.push(e).map_err(|_| Error::BufferTooSmall)?;
            }
        } else {
            out.push(c).map_err(|_| Error::BufferTooSmall)?;
        }
    }
    Ok(out)
}

/// Decodes `src` into a fixed-capacity byte vector, without terminator.
pub fn decode_to_vec<const N: usize>(src: &[u8]) -> Result<Vec<u8, N>, Error> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < src.len() {
        let byte = if src[i] == b'%' {
            let hi = src.get(i + 1).copied().and_then(hex_value);
            let lo = src.get(i + 2).copied().and_then(hex_value);
            i += 3;
            match (hi, lo) {
                (Some(hi), Some(lo)) => (hi << 4) | lo,
                _ => return Err(Error::InvalidEscape),
            }
        } else {
            i += 1;
            src[i - 1]
        };
        out.push(byte).map_err(|_| Error::BufferTooSmall)?;
    }
    Ok(out)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
