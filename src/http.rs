use std::time::Duration;

/// Anything that can turn a URL into a page body. The live implementation
/// goes over the network; tests substitute canned responses.
pub(crate) trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<String, String>;
}

pub(crate) struct HttpPageSource {
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, url: &str) -> Result<String, String> {
        get_text(url, self.connect_timeout, self.read_timeout)
    }
}

// Single attempt. The caller always has a cheap offline fallback, so a
// retry loop only delays a once-daily batch run.
pub(crate) fn get_text(
    url: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<String, String> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(read_timeout)
        .timeout_write(read_timeout)
        .build();

    match agent.get(url).call() {
        Ok(response) => match response.into_string() {
            Ok(body) => Ok(body),
            Err(err) => Err(format!("request failed: response decode failed: {err}")),
        },
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().unwrap_or_default();
            let body = response_body.trim();
            if body.is_empty() {
                Err(format!("request failed: HTTP status {status}"))
            } else {
                let truncated = body.chars().take(240).collect::<String>();
                Err(format!("request failed: HTTP status {status} ({truncated})"))
            }
        }
        Err(ureq::Error::Transport(err)) => Err(format!("request failed: transport error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    enum Behavior {
        Respond(u16, String),
        DelayRespond(Duration, u16, String),
    }

    #[derive(Debug)]
    struct TestServer {
        base_url: String,
        requests: Arc<AtomicUsize>,
        shutdown_tx: mpsc::Sender<()>,
        join_handle: Option<std::thread::JoinHandle<()>>,
    }

    impl TestServer {
        fn spawn(behavior: Behavior) -> Self {
            let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind test server");
            listener.set_nonblocking(true).expect("set nonblocking");
            let addr = listener.local_addr().expect("local addr");

            let requests = Arc::new(AtomicUsize::new(0));
            let requests_clone = Arc::clone(&requests);
            let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

            let join_handle = std::thread::spawn(move || {
                loop {
                    if shutdown_rx.try_recv().is_ok() {
                        break;
                    }

                    match listener.accept() {
                        Ok((mut stream, _)) => {
                            requests_clone.fetch_add(1, Ordering::SeqCst);
                            let behavior = behavior.clone();
                            std::thread::spawn(move || {
                                let _ = consume_request(&mut stream);
                                serve_behavior(&mut stream, behavior);
                            });
                        }
                        Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                            std::thread::sleep(Duration::from_millis(5));
                        }
                        Err(_) => break,
                    }
                }
            });

            Self {
                base_url: format!("http://{addr}"),
                requests,
                shutdown_tx,
                join_handle: Some(join_handle),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            let _ = self.shutdown_tx.send(());
            if let Some(handle) = self.join_handle.take() {
                let _ = handle.join();
            }
        }
    }

    fn consume_request(stream: &mut TcpStream) -> std::io::Result<()> {
        stream.set_read_timeout(Some(Duration::from_millis(200)))?;
        let mut buf = [0_u8; 1024];
        let mut data = Vec::new();
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => {
                    data.extend_from_slice(&buf[..read]);
                    if data.windows(4).any(|window| window == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(err)
                    if err.kind() == std::io::ErrorKind::WouldBlock
                        || err.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn reason_phrase(status: u16) -> &'static str {
        match status {
            200 => "OK",
            404 => "Not Found",
            503 => "Service Unavailable",
            _ => "Status",
        }
    }

    fn serve_behavior(stream: &mut TcpStream, behavior: Behavior) {
        match behavior {
            Behavior::Respond(status, body) => {
                let _ = write_response(stream, status, &body);
            }
            Behavior::DelayRespond(delay, status, body) => {
                std::thread::sleep(delay);
                let _ = write_response(stream, status, &body);
            }
        }
    }

    fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
        let reason = reason_phrase(status);
        let payload = body.as_bytes();
        write!(
            stream,
            "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            payload.len()
        )?;
        stream.write_all(payload)?;
        stream.flush()
    }

    #[test]
    fn returns_body_on_success() {
        let server = TestServer::spawn(Behavior::Respond(200, "listing".to_string()));

        let result = get_text(
            &server.base_url,
            Duration::from_millis(200),
            Duration::from_millis(200),
        );

        assert_eq!(result.expect("fetch should succeed"), "listing");
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn reports_status_errors_without_retrying() {
        let server = TestServer::spawn(Behavior::Respond(503, "down".to_string()));

        let result = get_text(
            &server.base_url,
            Duration::from_millis(200),
            Duration::from_millis(200),
        );

        let err = result.expect_err("503 should surface as an error");
        assert!(
            err.contains("HTTP status 503"),
            "unexpected error message: {err}"
        );
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn includes_response_body_in_status_error() {
        let server = TestServer::spawn(Behavior::Respond(404, "no such course".to_string()));

        let result = get_text(
            &server.base_url,
            Duration::from_millis(200),
            Duration::from_millis(200),
        );

        let err = result.expect_err("404 should surface as an error");
        assert!(
            err.contains("HTTP status 404") && err.contains("no such course"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn times_out_when_response_is_slow() {
        let server = TestServer::spawn(Behavior::DelayRespond(
            Duration::from_millis(120),
            200,
            "slow".to_string(),
        ));

        let result = get_text(
            &server.base_url,
            Duration::from_millis(250),
            Duration::from_millis(20),
        );

        let err = result.expect_err("slow response should time out");
        assert!(
            err.contains("transport error"),
            "unexpected error message: {err}"
        );
        assert_eq!(server.request_count(), 1);
    }
}
