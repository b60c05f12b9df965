use std::fmt;

use crate::http::request::{Request, ResourcePath};

/// Capacity of the request buffer. One byte less is actually consumed.
pub const MAX_REQUEST_BYTES: usize = 4096;

/// Longest accepted request target, leading `/` included.
pub const MAX_TARGET_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The target is not terminated yet; more bytes may complete it
    Incomplete,
    /// The request line does not have a space-terminated target
    Malformed,
    /// The target was a bare `/`
    EmptyPath,
    /// The target exceeds `MAX_TARGET_LEN`
    TooLong,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::Incomplete => "incomplete request line",
            ParseError::Malformed => "malformed request line",
            ParseError::EmptyPath => "empty resource path",
            ParseError::TooLong => "request target too long",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Extracts the resource path from the start of a raw request.
///
/// The target is the run of bytes between the first and second space of the
/// request line. Exactly one leading character (the `/`) is stripped from it.
/// Everything after the second space is ignored.
///
/// Returns `Incomplete` if the buffer ends before the target does; the caller
/// decides whether more data can still arrive.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    let buf = &buf[..buf.len().min(MAX_REQUEST_BYTES - 1)];

    let method_end = match find_delimiter(buf) {
        Some((pos, b' ')) => pos,
        Some(_) => return Err(ParseError::Malformed),
        None => return Err(ParseError::Incomplete),
    };

    let rest = &buf[method_end + 1..];
    let target = match find_delimiter(rest) {
        Some((pos, b' ')) => &rest[..pos],
        Some(_) => return Err(ParseError::Malformed),
        None if rest.len() > MAX_TARGET_LEN => return Err(ParseError::TooLong),
        None => return Err(ParseError::Incomplete),
    };

    if target.len() > MAX_TARGET_LEN {
        return Err(ParseError::TooLong);
    }

    let method = std::str::from_utf8(&buf[..method_end]).map_err(|_| ParseError::Malformed)?;
    let target = std::str::from_utf8(target).map_err(|_| ParseError::Malformed)?;

    let mut chars = target.chars();
    chars.next();
    let path = chars.as_str();

    if path.is_empty() {
        return Err(ParseError::EmptyPath);
    }

    Ok(Request {
        method: method.to_string(),
        path: ResourcePath::new(path),
    })
}

// First space or line break, whichever comes first.
fn find_delimiter(buf: &[u8]) -> Option<(usize, u8)> {
    buf.iter()
        .position(|&b| matches!(b, b' ' | b'\r' | b'\n'))
        .map(|pos| (pos, buf[pos]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.path.as_str(), "index.html");
    }

    #[test]
    fn bytes_past_the_buffer_bound_are_ignored() {
        let mut req = b"GET /".to_vec();
        req.resize(MAX_REQUEST_BYTES - 1, b'a');
        req.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        assert_eq!(parse_request_line(&req), Err(ParseError::TooLong));
    }
}
