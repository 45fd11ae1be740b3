use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Application-level constants
pub const APP_NAME: &str = "focusmeter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gaussian smoothing kernel applied before scoring, in samples per axis.
/// Must be odd so the kernel has a center tap.
pub const BLUR_KERNEL_SIZE: u32 = 19;

/// Request body cap for the upload route (upload limit + multipart overhead).
pub const MAX_BODY_BYTES: usize = 55 * 1024 * 1024;

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,focusmeter=debug"
}

/// Address the HTTP listener binds when the service is run directly.
pub fn default_listen_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000)
}
