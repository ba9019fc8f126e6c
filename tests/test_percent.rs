use dirhttpd::http::percent::{decode, encode, encode_bounded};

#[test]
fn test_encode_keeps_unreserved_characters() {
    assert_eq!(encode(b"Docs/read_me-1.0~old"), "Docs/read_me-1.0~old");
}

#[test]
fn test_encode_escapes_with_two_hex_digits() {
    assert_eq!(encode(b"a b"), "a%20b");
    assert_eq!(encode(b"\n"), "%0A");
    assert_eq!(encode("é".as_bytes()), "%C3%A9");
    assert_eq!(encode(b"100%"), "100%25");
}

#[test]
fn test_decode_accepts_both_hex_cases() {
    assert_eq!(decode(b"%C3%A9"), "é".as_bytes());
    assert_eq!(decode(b"%c3%a9"), "é".as_bytes());
}

#[test]
fn test_decode_passes_invalid_escapes_through() {
    assert_eq!(decode(b"%zz"), b"%zz");
    assert_eq!(decode(b"50%"), b"50%");
    assert_eq!(decode(b"%2"), b"%2");
    assert_eq!(decode(b"%%41"), b"%A");
}

#[test]
fn test_decode_reverses_encode_for_file_names() {
    let names: [&[u8]; 6] = [
        b"plain.txt",
        b"with space.html",
        b"semi;colon&amp",
        "日本語.txt".as_bytes(),
        b"#hash?query",
        b"50% off",
    ];
    for name in names {
        assert_eq!(decode(encode(name).as_bytes()), name);
    }
}

#[test]
fn test_encode_bounded_never_splits_an_escape() {
    // capacity 6 leaves room for 5 bytes: "ab" + "%20" fits, next escape does not
    assert_eq!(encode_bounded(b"ab  c", 6), "ab%20");
    assert_eq!(encode_bounded(b"abc", 1), "");
    assert_eq!(encode_bounded(b"abc", 0), "");
}

#[test]
fn test_encode_bounded_with_room_matches_encode() {
    let name = b"some file (1).txt";
    assert_eq!(encode_bounded(name, 1024), encode(name));
}
