//! Core engine: playback transport, asset probe, audio output.

pub mod audio_out;
pub mod player;
pub mod probe;
pub mod sink;

/// Minimal one-shot HTTP server for exercising the probe and loader
/// against a real socket.
#[cfg(test)]
pub(crate) mod http_stub {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve `responses` to consecutive connections, then exit. Returns the
    /// base URL of the listener.
    pub fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf); // drain the request head
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    pub fn ok_with_len(len: usize) -> String {
        ok_with_body(&"x".repeat(len))
    }

    pub fn ok_with_body(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    pub fn not_found() -> String {
        "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_string()
    }
}
