use crate::error::{self, Result};
use snafu::ensure;

/// The longest payload this client sends or accepts. Console negotiation
/// messages are short; extended-length encoding is not implemented.
pub const MAX_PAYLOAD: usize = 125;

/// FIN bit plus the binary opcode; the only frame type exchanged.
const FIN_BINARY: u8 = 0x82;
/// The mask bit in the second header byte.
const MASK_BIT: u8 = 0x80;
/// Client frames must be masked; since this client never talks to anything
/// but a console proxy under test, the key is fixed rather than random.
const MASKING_KEY: [u8; 4] = [0x73, 0x71, 0x61, 0x6c];

/// Encodes `payload` as one complete masked binary frame.
pub(crate) fn encode(payload: &[u8]) -> Result<Vec<u8>> {
    ensure!(
        payload.len() <= MAX_PAYLOAD,
        error::FrameTooLargeSnafu {
            len: payload.len(),
            limit: MAX_PAYLOAD,
        }
    );
    let mut frame = Vec::with_capacity(2 + MASKING_KEY.len() + payload.len());
    frame.push(FIN_BINARY);
    frame.push(MASK_BIT | payload.len() as u8);
    frame.extend_from_slice(&MASKING_KEY);
    frame.extend(
        payload
            .iter()
            .enumerate()
            .map(|(i, byte)| byte ^ MASKING_KEY[i % MASKING_KEY.len()]),
    );
    Ok(frame)
}

/// Parses a server frame's 2-byte header, returning the payload length.
/// Server frames must be unmasked and short (no extended length field).
pub(crate) fn decode_header(header: [u8; 2]) -> Result<usize> {
    ensure!(
        header[1] & MASK_BIT == 0,
        error::UnsupportedFrameSnafu {
            what: "masked server frame",
        }
    );
    let len = (header[1] & 0x7f) as usize;
    ensure!(
        len <= MAX_PAYLOAD,
        error::UnsupportedFrameSnafu {
            what: "extended payload length",
        }
    );
    Ok(len)
}
