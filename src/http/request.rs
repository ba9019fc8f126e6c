/// A request decoded from the first line a client sends.
///
/// Only the request line is kept. Header lines are read and discarded by the
/// connection, and a connection carries at most one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token exactly as sent (e.g. "GET").
    pub method: String,
    /// Path token as sent, still percent-encoded, query string included.
    pub raw_path: String,
    /// Percent-decoded path without the query string. Raw bytes, since a
    /// decoded file name is not guaranteed to be UTF-8.
    pub path: Vec<u8>,
    /// Protocol token (typically "HTTP/1.1"). Empty if the client left it out.
    pub version: String,
}

impl Request {
    /// Whether the method is GET, compared case-insensitively.
    ///
    /// ```
    /// # use dirhttpd::http::parser::parse_request_line;
    /// assert!(parse_request_line(b"get / HTTP/1.0").is_get());
    /// assert!(!parse_request_line(b"GETX / HTTP/1.0").is_get());
    /// ```
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Lossy view of the decoded path, for logging and page titles.
    pub fn display_path(&self) -> String {
        String::from_utf8_lossy(&self.path).into_owned()
    }
}
