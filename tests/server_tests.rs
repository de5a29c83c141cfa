//! End-to-end requests against the demo controller over a real socket.

mod common;

use common::http::{get, parse_response_parts, send_request};
use common::test_server::DemoServer;
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

#[test]
fn test_path_variable_over_http() {
    let server = DemoServer::start();
    let resp = get(&server.addr(), "/api/path/xyz");
    let (status, content_type, body) = parse_response_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, "\"xyz!\"");
}

#[test]
fn test_query_arguments_over_http() {
    let server = DemoServer::start();
    let (status, _, body) = parse_response_parts(&get(&server.addr(), "/api/args?n=2&text=Ha"));
    assert_eq!(status, 200);
    assert_eq!(body, "{\n\t\"Ha\":\"HaHa\"\n}");
}

#[test]
fn test_error_statuses_over_http() {
    let server = DemoServer::start();
    let addr = server.addr();

    let (status, content_type, body) = parse_response_parts(&get(&addr, "/api/unknown"));
    assert_eq!(status, 404);
    assert_eq!(content_type, "text/plain");
    assert_eq!(body, "Endpoint Not Found");

    let resp = send_request(
        &addr,
        "POST /api/ints HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n",
    );
    let (status, _, body) = parse_response_parts(&resp);
    assert_eq!(status, 405);
    assert_eq!(body, "Method Must Be GET");

    let (status, _, body) = parse_response_parts(&get(&addr, "/api/args?n=abc&text=Ha"));
    assert_eq!(status, 500);
    assert!(body.starts_with("Server Error: "), "{body}");
}

#[test]
fn test_server_keeps_serving_after_errors() {
    let server = DemoServer::start();
    let addr = server.addr();
    for _ in 0..3 {
        let (status, _, _) = parse_response_parts(&get(&addr, "/api/args?n=-5&text=x"));
        assert_eq!(status, 500);
    }
    let (status, _, body) = parse_response_parts(&get(&addr, "/api/ints"));
    assert_eq!(status, 200);
    assert_eq!(body, "[\n\t1,\n\t2,\n\t3\n]");
}

#[test]
fn test_course_conversion_over_http() {
    let server = DemoServer::start();
    let (status, _, body) = parse_response_parts(&get(&server.addr(), "/api/course"));
    assert_eq!(status, 200);
    assert!(body.starts_with("{\n\t\"name\":\"PA\",\n\t\"credits\":6,"), "{body}");
    assert!(body.contains("\"type\":null"), "{body}");
    assert!(body.contains("\"type\":\"PROJECT\""), "{body}");
}

#[test]
fn test_stop_releases_the_port() {
    let server = DemoServer::start();
    let (status, _, _) = parse_response_parts(&get(&server.addr(), "/api/ints"));
    assert_eq!(status, 200);

    let addr = server.stop();
    let mut refused = false;
    for _ in 0..20 {
        if TcpStream::connect(addr).is_err() {
            refused = true;
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert!(refused, "{addr} still accepts connections after stop");
}
