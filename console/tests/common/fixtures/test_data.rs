//! Common test data and helpers

use netboot_console::feedback::{FeedEvent, NotificationEvent};
use std::io::{Read, Write};
use std::net::TcpListener;
use tokio::sync::broadcast;

/// Service names as the control plane knows them
pub mod services {
    pub const DHCP: &str = "dhcp";
    pub const TFTP: &str = "tftp";
}

/// Control plane replies used across tests
pub mod replies {
    pub const DHCP_STARTED: &str = "DHCP started";
    pub const PERMISSION_DENIED: &str = "permission denied";
    pub const DISK_FULL: &str = "disk full";
}

/// Every notification shown since the receiver subscribed
pub fn drain_shown(rx: &mut broadcast::Receiver<FeedEvent>) -> Vec<NotificationEvent> {
    let mut shown = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let FeedEvent::Shown(notification) = event {
            shown.push(notification);
        }
    }
    shown
}

/// A localhost URL nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// A localhost URL whose server sends the headers and part of the body,
/// then closes the connection (what a restarting proxy does to us)
pub fn truncated_body_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let port = listener.local_addr().expect("No local addr").port();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"succ",
            );
            let _ = stream.flush();
        }
    });

    format!("http://127.0.0.1:{}", port)
}
