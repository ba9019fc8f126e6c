use std::fs::File;
use std::io::{self, Read};

use html_escape::encode_double_quoted_attribute;

use crate::docroot::DirectoryListing;

/// Size of one chunk read from a file being served.
pub const FILE_CHUNK: usize = 16 * 1024;

/// HTTP status codes the server produces.
///
/// - `Ok` (200): file contents or a directory listing
/// - `MovedPermanently` (301): directory requested without its trailing slash
/// - `BadRequest` (400): request line without a path
/// - `Forbidden` (403): outside the document root, special file, or permission denied
/// - `NotFound` (404): nothing at that path
/// - `MethodNotAllowed` (405): anything other than GET
/// - `InternalServerError` (500): filesystem failure while resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use dirhttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Where the bytes after the header block come from.
#[derive(Debug)]
pub enum Body {
    Empty,
    /// Fully rendered in memory (error pages).
    Bytes(Vec<u8>),
    /// Streamed from disk; exactly `remaining` more bytes are expected.
    File { file: File, remaining: u64 },
    /// Generated while sending; length unknown up front.
    Listing(DirectoryListing),
}

impl Body {
    /// Length to announce in `Content-Length`, if known.
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Body::Empty => Some(0),
            Body::Bytes(b) => Some(b.len() as u64),
            Body::File { remaining, .. } => Some(*remaining),
            Body::Listing(_) => None,
        }
    }

    /// Appends the next chunk to `buf`. Returns `Ok(false)` when the body is
    /// exhausted.
    pub(crate) fn fill(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        match self {
            Body::Empty => Ok(false),
            Body::Bytes(bytes) => {
                let bytes = std::mem::take(bytes);
                *self = Body::Empty;
                buf.extend_from_slice(&bytes);
                Ok(!bytes.is_empty())
            }
            Body::File { file, remaining } => {
                if *remaining == 0 {
                    return Ok(false);
                }
                let want = (*remaining).min(FILE_CHUNK as u64) as usize;
                let start = buf.len();
                buf.resize(start + want, 0);
                let n = loop {
                    match file.read(&mut buf[start..]) {
                        Ok(n) => break n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            buf.truncate(start);
                            return Err(e);
                        }
                    }
                };
                buf.truncate(start + n);
                if n == 0 {
                    // announced Content-Length can no longer be honoured
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "file shrank while being sent",
                    ));
                }
                *remaining -= n as u64;
                Ok(true)
            }
            Body::Listing(listing) => Ok(listing.fill(buf)),
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep insertion order so the wire format is deterministic.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they are sent
    pub headers: Vec<(String, String)>,
    /// Response body source
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(Body::Bytes(b"hi".to_vec()))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Adds or replaces a header. Names compare case-insensitively.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Content-Length` from the body when the length is known and the
    /// header is not already present, then `Connection: close`, since every
    /// connection carries a single request.
    pub fn build(mut self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"));
        if !has_length {
            if let Some(len) = self.body.content_length() {
                self.headers.push(("Content-Length".to_string(), len.to_string()));
            }
        }

        let has_connection = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Connection"));
        if !has_connection {
            self.headers.push(("Connection".to_string(), "close".to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Looks up a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Creates an HTML error page for `status` with `message` in the body.
    pub fn error(status: StatusCode, message: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/html")
            .body(Body::Bytes(error_page(status, message).into_bytes()))
            .build()
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound, "No such file or directory")
    }

    /// 301 to `location`, with a page linking there for clients that do not
    /// follow redirects.
    pub fn redirect(location: &str) -> Self {
        let href = encode_double_quoted_attribute(location);
        let message = format!("Moved to <a href=\"{href}\">{href}</a>");
        ResponseBuilder::new(StatusCode::MovedPermanently)
            .header("Location", location)
            .header("Content-Type", "text/html")
            .body(Body::Bytes(
                error_page(StatusCode::MovedPermanently, &message).into_bytes(),
            ))
            .build()
    }
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let title = status.reason_phrase();
    format!(
        "<html><head><title>{code} {title}</title></head>\n\
         <body bgcolor=\"#cc99cc\"><h2 align=\"center\">{code} {title}</h2>\n\
         {message}\n\
         <hr>\n</body>\n</html>\n"
    )
}
