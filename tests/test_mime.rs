use dirhttpd::http::mime::{DEFAULT_MIME_TYPE, mime_type};

#[test]
fn test_known_extensions() {
    let table = [
        ("index.html", "text/html; charset=utf-8"),
        ("index.htm", "text/html; charset=utf-8"),
        ("photo.jpg", "image/jpeg"),
        ("photo.jpeg", "image/jpeg"),
        ("anim.gif", "image/gif"),
        ("logo.png", "image/png"),
        ("site.css", "text/css"),
        ("sound.au", "audio/basic"),
        ("sound.wav", "audio/wav"),
        ("clip.avi", "video/x-msvideo"),
        ("clip.mov", "video/quicktime"),
        ("clip.qt", "video/quicktime"),
        ("clip.mpeg", "video/mpeg"),
        ("clip.mpe", "video/mpeg"),
        ("world.vrml", "model/vrml"),
        ("world.wrl", "model/vrml"),
        ("tune.midi", "audio/midi"),
        ("tune.mid", "audio/midi"),
        ("song.mp3", "audio/mpeg"),
        ("song.ogg", "application/ogg"),
        ("proxy.pac", "application/x-ns-proxy-autoconfig"),
    ];
    for (name, expected) in table {
        assert_eq!(mime_type(name), expected, "{name}");
    }
}

#[test]
fn test_unknown_or_missing_extension_is_plain_text() {
    assert_eq!(mime_type("archive.tar.gz"), DEFAULT_MIME_TYPE);
    assert_eq!(mime_type("Makefile"), DEFAULT_MIME_TYPE);
    assert_eq!(mime_type(""), DEFAULT_MIME_TYPE);
    assert_eq!(mime_type("trailing."), DEFAULT_MIME_TYPE);
}

#[test]
fn test_match_is_case_sensitive() {
    assert_eq!(mime_type("INDEX.HTML"), DEFAULT_MIME_TYPE);
}

#[test]
fn test_only_last_dot_counts() {
    assert_eq!(mime_type("backup.png.txt"), DEFAULT_MIME_TYPE);
    assert_eq!(mime_type("./dir.v1/page.html"), "text/html; charset=utf-8");
    assert_eq!(mime_type("dir.html/README"), DEFAULT_MIME_TYPE);
}
