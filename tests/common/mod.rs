#![allow(dead_code)]

pub mod test_server {
    use getjson::demo::{registry, DemoController};
    use getjson::server::{GetJson, ServerHandle};
    use std::net::{SocketAddr, TcpListener};
    use std::sync::Once;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Demo controller served on an ephemeral port, stopped on drop.
    pub struct DemoServer {
        handle: Option<ServerHandle>,
        addr: SocketAddr,
    }

    impl DemoServer {
        pub fn start() -> Self {
            setup_may_runtime();
            let app = GetJson::new(DemoController::default(), registry()).unwrap();

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = app.start(addr).unwrap();
            handle.wait_ready().unwrap();

            Self {
                handle: Some(handle),
                addr,
            }
        }

        pub fn addr(&self) -> SocketAddr {
            self.addr
        }

        /// Stop the server now rather than on drop.
        pub fn stop(mut self) -> SocketAddr {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
            self.addr
        }
    }

    impl Drop for DemoServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(100)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {e:?}"),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    pub fn get(addr: &SocketAddr, target: &str) -> String {
        send_request(
            addr,
            &format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
        )
    }

    /// Status, content type and body of a raw HTTP response.
    pub fn parse_response_parts(resp: &str) -> (u16, String, String) {
        let (headers, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut status = 0;
        let mut content_type = String::new();
        for line in headers.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = val.trim().to_string();
                }
            }
        }
        (status, content_type, body.to_string())
    }
}

pub mod exchange {
    use getjson::server::HttpExchange;
    use http::StatusCode;
    use std::io;

    /// In-memory exchange recording the single response written to it.
    #[derive(Debug, Default)]
    pub struct RecordingExchange {
        pub method: String,
        pub path: String,
        pub query: Option<String>,
        pub response: Option<(StatusCode, &'static str, String)>,
    }

    impl RecordingExchange {
        pub fn new(method: &str, target: &str) -> Self {
            let (path, query) = match target.split_once('?') {
                Some((p, q)) => (p.to_string(), Some(q.to_string())),
                None => (target.to_string(), None),
            };
            Self {
                method: method.to_string(),
                path,
                query,
                response: None,
            }
        }
    }

    impl HttpExchange for RecordingExchange {
        fn method(&self) -> &str {
            &self.method
        }

        fn path(&self) -> &str {
            &self.path
        }

        fn query(&self) -> Option<&str> {
            self.query.as_deref()
        }

        fn respond(
            &mut self,
            status: StatusCode,
            content_type: &'static str,
            body: String,
        ) -> io::Result<()> {
            assert!(self.response.is_none(), "respond called twice");
            self.response = Some((status, content_type, body));
            Ok(())
        }
    }
}
