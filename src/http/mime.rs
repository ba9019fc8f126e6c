//! Content-Type lookup by file extension.

/// Content type used when the extension is unknown or absent.
pub const DEFAULT_MIME_TYPE: &str = "text/plain; charset=utf-8";

/// Content type of generated HTML (directory listings).
pub const HTML_MIME_TYPE: &str = "text/html; charset=utf-8";

/// Returns the content type for `name` based on the text after its last `.`.
///
/// Matching is case-sensitive, so `INDEX.HTML` falls back to the default.
///
/// ```
/// # use dirhttpd::http::mime::mime_type;
/// assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
/// assert_eq!(mime_type("README"), "text/plain; charset=utf-8");
/// ```
pub fn mime_type(name: &str) -> &'static str {
    let Some(dot) = name.rfind('.') else {
        return DEFAULT_MIME_TYPE;
    };

    match &name[dot + 1..] {
        "html" | "htm" => HTML_MIME_TYPE,
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "png" => "image/png",
        "css" => "text/css",
        "au" => "audio/basic",
        "wav" => "audio/wav",
        "avi" => "video/x-msvideo",
        "mov" | "qt" => "video/quicktime",
        "mpeg" | "mpe" => "video/mpeg",
        "vrml" | "wrl" => "model/vrml",
        "midi" | "mid" => "audio/midi",
        "mp3" => "audio/mpeg",
        "ogg" => "application/ogg",
        "pac" => "application/x-ns-proxy-autoconfig",
        _ => DEFAULT_MIME_TYPE,
    }
}
