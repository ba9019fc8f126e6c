use dirhttpd::http::request::Request;

fn request(method: &str) -> Request {
    Request {
        method: method.to_string(),
        raw_path: "/".to_string(),
        path: b"/".to_vec(),
        version: "HTTP/1.1".to_string(),
    }
}

#[test]
fn test_request_get_is_case_insensitive() {
    assert!(request("GET").is_get());
    assert!(request("get").is_get());
    assert!(request("Get").is_get());
}

#[test]
fn test_request_other_methods_are_not_get() {
    assert!(!request("POST").is_get());
    assert!(!request("HEAD").is_get());
    assert!(!request("GETS").is_get());
    assert!(!request("").is_get());
}

#[test]
fn test_request_display_path_is_lossy() {
    let mut req = request("GET");
    req.path = vec![b'/', 0xff, b'a'];
    assert_eq!(req.display_path(), "/\u{fffd}a");
}

#[test]
fn test_request_clone() {
    let req1 = request("GET");
    let req2 = req1.clone();
    assert_eq!(req1, req2);
}
