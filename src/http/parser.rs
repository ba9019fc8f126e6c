use crate::http::percent;
use crate::http::request::Request;

/// Splits a request line into method, path and protocol.
///
/// Tokens are separated by runs of ASCII whitespace. Missing trailing tokens
/// are left empty and anything after the third token is ignored; a
/// malformed line is never rejected here. The path is percent-decoded with
/// its query string (from the first `?`) removed.
pub fn parse_request_line(line: &[u8]) -> Request {
    let mut parts = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let method = parts.next().unwrap_or_default();
    let raw_path = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default();

    let without_query = match raw_path.iter().position(|&b| b == b'?') {
        Some(q) => &raw_path[..q],
        None => raw_path,
    };

    Request {
        method: String::from_utf8_lossy(method).into_owned(),
        raw_path: String::from_utf8_lossy(raw_path).into_owned(),
        path: percent::decode(without_query),
        version: String::from_utf8_lossy(version).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request_line(b"GET /index.html HTTP/1.1");

        assert_eq!(req.method, "GET");
        assert_eq!(req.path, b"/index.html".to_vec());
        assert_eq!(req.version, "HTTP/1.1");
    }
}
