//! Minimal HTTP/1.1 server with redirect routes for integration tests.
//!
//! Routes:
//! - `/r/N`     302 to `/r/N-1`; `/r/0` answers 200
//! - `/loop`    302 to itself
//! - `/slow`    sleeps 3s, then 200
//! - `/nohead`  405 for HEAD, 200 with a body for GET
//! - anything else 404
//!
//! Absolute-form targets (`GET http://host/path`) are accepted, so the
//! server doubles as an HTTP proxy for proxy tests. Every request's method
//! and `User-Agent` header are recorded.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct Log {
    proxied: AtomicUsize,
    /// `(method, user agent)` per request, in arrival order.
    agents: Mutex<Vec<(String, Option<String>)>>,
}

pub struct Server {
    pub base: String,
    log: Arc<Log>,
}

impl Server {
    /// URL for `path` on this server, e.g. `url("/r/2")`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of absolute-form (proxy) requests seen so far.
    pub fn proxied_requests(&self) -> usize {
        self.log.proxied.load(Ordering::SeqCst)
    }

    /// `(method, User-Agent)` of every request seen so far.
    pub fn user_agents(&self) -> Vec<(String, Option<String>)> {
        self.log.agents.lock().unwrap().clone()
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start() -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let log = Arc::new(Log::default());
    let shared = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let shared = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &shared));
        }
    });
    Server {
        base: format!("http://127.0.0.1:{}", port),
        log,
    }
}

/// A port on 127.0.0.1 with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream, log: &Log) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&data);
    let mut lines = request.lines();
    let mut parts = lines.next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let mut target = parts.next().unwrap_or("/").to_string();
    let user_agent = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    });
    log.agents.lock().unwrap().push((method.clone(), user_agent));
    if let Some(rest) = target.strip_prefix("http://") {
        log.proxied.fetch_add(1, Ordering::SeqCst);
        target = rest.find('/').map(|i| rest[i..].to_string()).unwrap_or_else(|| "/".to_string());
    }
    let is_head = method.eq_ignore_ascii_case("HEAD");

    let response = if let Some(n) = target.strip_prefix("/r/") {
        match n.parse::<u32>() {
            Ok(0) => ok(is_head),
            Ok(n) => redirect(&format!("/r/{}", n - 1)),
            Err(_) => status_only("404 Not Found"),
        }
    } else if target == "/loop" {
        redirect("/loop")
    } else if target == "/slow" {
        thread::sleep(Duration::from_secs(3));
        ok(is_head)
    } else if target == "/nohead" {
        if is_head {
            status_only("405 Method Not Allowed")
        } else {
            ok(false)
        }
    } else {
        status_only("404 Not Found")
    };
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn redirect(location: &str) -> String {
    format!(
        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        location
    )
}

fn ok(is_head: bool) -> String {
    if is_head {
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n".to_string()
    } else {
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok".to_string()
    }
}

fn status_only(status: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status
    )
}
