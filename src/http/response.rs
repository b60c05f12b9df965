use bytes::Bytes;

use crate::files::FileContent;
use crate::http::mime::ContentType;

pub const CONNECTION: &str = "Connection";
pub const CONTENT_TYPE: &str = "Content-type";
pub const CONTENT_LENGTH: &str = "Content-length";

/// Body of the 404 response, 112 bytes exactly.
pub const NOT_FOUND_BODY: &[u8] = b"<html><head><title>Not Found</title></head><body>\r\n\
The requested URL was not found on this server\r\n\
</body><html>";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): the file was found and is in the body
/// - `NotFound` (404): missing file, unreadable file or unusable request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order, which is the order they go out on
/// the wire.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body, sent unmodified
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use webserver::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-type", "text/html")
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// assert_eq!(response.header("content-length"), Some("9"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a header, or replaces the value of an existing one in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// Appends a `Content-length` header computed from the body unless one
    /// was set explicitly.
    pub fn build(self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(CONTENT_LENGTH));

        let len = self.body.len();
        let builder = if has_length {
            self
        } else {
            self.header(CONTENT_LENGTH, len.to_string())
        };

        Response {
            status: builder.status,
            headers: builder.headers,
            body: builder.body,
        }
    }
}

impl Response {
    /// The 200 response carrying a file's bytes.
    pub fn file(content: FileContent, content_type: ContentType) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header(CONNECTION, "close")
            .header(CONTENT_TYPE, content_type.as_str())
            .body(content.bytes)
            .build()
    }

    /// The fixed 404 response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header(CONTENT_TYPE, ContentType::TextHtml.as_str())
            .header(CONTENT_LENGTH, NOT_FOUND_BODY.len().to_string())
            .header(CONNECTION, "close")
            .body(Bytes::from_static(NOT_FOUND_BODY))
            .build()
    }

    /// Looks up a header value, ignoring ASCII case in the name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
