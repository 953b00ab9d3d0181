use std::time::Duration;

use pinyin_core::source::{decode_lines, LineSource, SourceError};

/// Upper bound on a single dictionary download.
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// A dictionary file fetched over HTTP(S).
///
/// One attempt per build; a transport error, timeout or non-2xx status is
/// returned as [`SourceError::Http`].
pub struct HttpSource {
    name: String,
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(name: &str, url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            name: name.to_string(),
            url: url.to_string(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LineSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        let url = &self.url;
        let body = self
            .agent
            .get(url)
            .call()
            .map_err(|e| SourceError::Http(format!("{url}: {e}")))?
            .into_body()
            .into_with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| SourceError::Http(format!("{url}: {e}")))?;
        Ok(decode_lines(&body))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Answer a single request on a local port with a fixed response.
    fn serve_once(status: &'static str, body: Vec<u8>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        });
        (format!("http://{addr}/base.dict.yaml"), handle)
    }

    #[test]
    fn test_not_found_is_http_error() {
        let (url, server) = serve_once("404 Not Found", Vec::new());
        let source = HttpSource::new("base", &url, Duration::from_secs(5));
        let err = source.fetch_lines().unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, SourceError::Http(ref msg) if msg.contains("404")));
    }

    #[test]
    fn test_body_with_invalid_utf8_is_decoded() {
        let mut body = "你好\tni hao\t1\n".as_bytes().to_vec();
        body.push(0xFF);
        body.extend_from_slice("您好\tnin hao\n".as_bytes());
        let (url, server) = serve_once("200 OK", body);
        let source = HttpSource::new("base", &url, Duration::from_secs(5));
        let lines = source.fetch_lines().unwrap();
        server.join().unwrap();
        assert_eq!(lines, ["你好\tni hao\t1", "您好\tnin hao"]);
    }

    #[test]
    fn test_unreachable_host_is_http_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let source = HttpSource::new(
            "local",
            "http://127.0.0.1:9/base.dict.yaml",
            Duration::from_secs(2),
        );
        assert_eq!(source.name(), "local");
        assert_eq!(source.url(), "http://127.0.0.1:9/base.dict.yaml");
        let err = source.fetch_lines().unwrap_err();
        assert!(matches!(err, SourceError::Http(ref msg) if msg.contains("127.0.0.1:9")));
    }
}
