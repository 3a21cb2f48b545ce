use snafu::Snafu;

/// The `Result` type returned by this library.
pub type Result<T> = std::result::Result<T, Error>;

/// The public error type returned by this library.
#[derive(Debug, Snafu)]
pub struct Error(InnerError);

/// The private error type returned by this library.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum InnerError {
    #[snafu(display("URL '{}' has no host", url))]
    NoHost { url: String },

    #[snafu(display("URL '{}' has no usable port", url))]
    NoPort { url: String },

    #[snafu(display("Unable to resolve '{}': {}", endpoint, source))]
    Resolve {
        endpoint: String,
        source: std::io::Error,
    },

    #[snafu(display("Unable to connect to any address of '{}': {}", endpoint, message))]
    Connect { endpoint: String, message: String },

    #[snafu(display("'{}' is not a valid TLS server name", host))]
    InvalidServerName { host: String },

    #[snafu(display("TLS setup for '{}' failed: {}", host, source))]
    Tls { host: String, source: rustls::Error },

    #[snafu(display("Unable to {}: {}", what, source))]
    Io {
        what: String,
        source: std::io::Error,
    },

    #[snafu(display("WebSocket handshake failed: {}", what))]
    Handshake { what: String },

    #[snafu(display("Frame payload of {} bytes exceeds the {}-byte limit", len, limit))]
    FrameTooLarge { len: usize, limit: usize },

    #[snafu(display("Unsupported frame from the server: {}", what))]
    UnsupportedFrame { what: String },

    #[snafu(display("The connection closed in the middle of a frame"))]
    ConnectionClosed,

    #[snafu(display("The console connection has already been closed"))]
    NotConnected,

    #[snafu(display("Reconnect policy must allow at least one attempt"))]
    NoAttempts,

    #[snafu(display("Giving up after {} connection attempts: {}", attempts, source))]
    RetriesExhausted { attempts: u32, source: Box<Error> },
}
