use crate::error::{self, Result};
use crate::frame;
use log::{debug, trace};
use snafu::{ensure, OptionExt, ResultExt};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use url::Url;

/// The handshake always requests the proxy's websockify endpoint, regardless
/// of any path on the endpoint URL.
const HANDSHAKE_PATH: &str = "/websockify";
/// A fixed, non-cryptographic handshake key. The key's only production
/// purpose is cache-busting; this client only ever drives tests.
const HANDSHAKE_KEY: &str = "x3JJHMbDL1EzLkh9GBhXDw==";
/// End of the HTTP response head.
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// The underlying connection: a plain TCP socket, or the same wrapped in TLS
/// for `wss`/`https` endpoints.
#[derive(Debug)]
enum Stream {
    Plain(TcpStream),
    Tls(Box<rustls::StreamOwned<rustls::ClientConnection, TcpStream>>),
}

impl Stream {
    fn tcp(&self) -> &TcpStream {
        match self {
            Stream::Plain(tcp) => tcp,
            Stream::Tls(tls) => &tls.sock,
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Stream::Plain(tcp) => tcp.read(buf),
            Stream::Tls(tls) => tls.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Stream::Plain(tcp) => tcp.write(buf),
            Stream::Tls(tls) => tls.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Plain(tcp) => tcp.flush(),
            Stream::Tls(tls) => tls.flush(),
        }
    }
}

/// One WebSocket session with a console proxy. Owns exactly one socket,
/// created by [`connect`](Self::connect) and released by
/// [`close`](Self::close).
#[derive(Debug)]
pub struct ConsoleClient {
    stream: Option<Stream>,
    /// Bytes read past the handshake terminator. They belong to the first
    /// frame and are consumed, once, before any further socket read.
    cached: Vec<u8>,
    response: String,
}

impl ConsoleClient {
    /// Connects to the console proxy at `url` and performs the HTTP upgrade
    /// handshake, presenting `token` in a `Cookie` header.
    ///
    /// Address candidates are tried in order; the first successful TCP
    /// connection wins and a failed socket is dropped before the next
    /// attempt. Connecting fails only on transport problems — an HTTP-level
    /// rejection (e.g. a bad token) still yields a client, and the caller
    /// inspects [`upgrade_accepted`](Self::upgrade_accepted) or
    /// [`handshake_response`](Self::handshake_response) to assert on it.
    pub fn connect(url: &Url, token: &str) -> Result<Self> {
        let host = url
            .host_str()
            .context(error::NoHostSnafu { url: url.as_str() })?;
        let port = url
            .port_or_known_default()
            .context(error::NoPortSnafu { url: url.as_str() })?;
        let endpoint = format!("{}:{}", host, port);

        let tcp = Self::connect_tcp(&endpoint)?;
        let secure = matches!(url.scheme(), "wss" | "https");
        let mut stream = if secure {
            Stream::Tls(Box::new(tls_stream(host, tcp)?))
        } else {
            Stream::Plain(tcp)
        };

        let request = format!(
            "GET {path} HTTP/1.1\r\n\
             Host: {endpoint}\r\n\
             Upgrade: websocket\r\n\
             Connection: Upgrade\r\n\
             Sec-WebSocket-Key: {key}\r\n\
             Sec-WebSocket-Version: 13\r\n\
             Sec-WebSocket-Protocol: binary\r\n\
             Cookie: token=\"{token}\"\r\n\r\n",
            path = HANDSHAKE_PATH,
            endpoint = endpoint,
            key = HANDSHAKE_KEY,
            token = token,
        );
        stream.write_all(request.as_bytes()).context(error::IoSnafu {
            what: "send the upgrade request",
        })?;

        let (response, cached) = read_response_head(&mut stream)?;
        debug!(
            "console handshake with {} answered: {}",
            endpoint,
            response.lines().next().unwrap_or_default()
        );
        Ok(Self {
            stream: Some(stream),
            cached,
            response,
        })
    }

    fn connect_tcp(endpoint: &str) -> Result<TcpStream> {
        let addrs = endpoint
            .to_socket_addrs()
            .context(error::ResolveSnafu { endpoint })?;
        let mut last_failure = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(tcp) => return Ok(tcp),
                // The failed socket is dropped here, before the next attempt.
                Err(e) => {
                    trace!("console candidate {} refused: {}", addr, e);
                    last_failure = Some(e);
                }
            }
        }
        Err(error::ConnectSnafu {
            endpoint,
            message: last_failure
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no addresses to try".to_string()),
        }
        .build()
        .into())
    }

    /// The raw HTTP response head from the handshake (status line and
    /// headers).
    pub fn handshake_response(&self) -> &str {
        &self.response
    }

    /// `true` if the proxy accepted the upgrade.
    pub fn upgrade_accepted(&self) -> bool {
        self.response.starts_with("HTTP/1.1 101")
    }

    /// Sends `data` as one complete masked binary frame. Payloads are capped
    /// at [`MAX_PAYLOAD`](crate::MAX_PAYLOAD) bytes.
    pub fn send_frame(&mut self, data: &[u8]) -> Result<()> {
        let encoded = frame::encode(data)?;
        let stream = self.stream.as_mut().context(error::NotConnectedSnafu)?;
        stream.write_all(&encoded).context(error::IoSnafu {
            what: "send a frame",
        })?;
        Ok(())
    }

    /// Receives the next non-empty frame's payload, or `None` if the peer
    /// has closed the connection. Zero-length frames are keepalive noise and
    /// are skipped rather than reported as a close.
    pub fn receive_frame(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let mut header = [0u8; 2];
            if !self.fill(&mut header)? {
                return Ok(None);
            }
            let len = frame::decode_header(header)?;
            if len == 0 {
                trace!("skipping empty console frame");
                continue;
            }
            let mut payload = vec![0u8; len];
            ensure!(self.fill(&mut payload)?, error::ConnectionClosedSnafu);
            return Ok(Some(payload));
        }
    }

    /// Fills `buf` from the cached handshake surplus first, then the socket.
    /// Returns `false` on a clean end-of-stream before the first byte; a
    /// later end-of-stream is a mid-frame close and fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        let mut filled = 0;
        if !self.cached.is_empty() {
            let take = buf.len().min(self.cached.len());
            buf[..take].copy_from_slice(&self.cached[..take]);
            self.cached.drain(..take);
            filled = take;
        }
        let stream = self.stream.as_mut().context(error::NotConnectedSnafu)?;
        while filled < buf.len() {
            let count = stream.read(&mut buf[filled..]).context(error::IoSnafu {
                what: "read a frame",
            })?;
            if count == 0 {
                ensure!(filled == 0, error::ConnectionClosedSnafu);
                return Ok(false);
            }
            filled += count;
        }
        Ok(true)
    }

    /// Shuts down both halves of the connection and releases the socket.
    /// Calling it again is a no-op. Shutdown errors on an already-reset
    /// connection are ignored.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.tcp().shutdown(Shutdown::Both);
        }
    }
}

fn tls_stream(
    host: &str,
    tcp: TcpStream,
) -> Result<rustls::StreamOwned<rustls::ClientConnection, TcpStream>> {
    let mut roots = rustls::RootCertStore::empty();
    roots.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
        rustls::OwnedTrustAnchor::from_subject_spki_name_constraints(
            ta.subject,
            ta.spki,
            ta.name_constraints,
        )
    }));
    let config = rustls::ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();
    let server_name = rustls::ServerName::try_from(host)
        .map_err(|_| error::InvalidServerNameSnafu { host }.build())?;
    let connection = rustls::ClientConnection::new(Arc::new(config), server_name)
        .context(error::TlsSnafu { host })?;
    Ok(rustls::StreamOwned::new(connection, tcp))
}

/// Reads the HTTP response until the header terminator, returning the head
/// as text and any surplus bytes that belong to the first frame.
fn read_response_head(stream: &mut Stream) -> Result<(String, Vec<u8>)> {
    let mut response = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(position) = find_terminator(&response) {
            break position + HEADER_TERMINATOR.len();
        }
        let count = stream.read(&mut chunk).context(error::IoSnafu {
            what: "read the handshake response",
        })?;
        ensure!(
            count != 0,
            error::HandshakeSnafu {
                what: "connection closed before the response completed",
            }
        );
        response.extend_from_slice(&chunk[..count]);
    };
    let surplus = response.split_off(head_end);
    Ok((String::from_utf8_lossy(&response).into_owned(), surplus))
}

fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}
