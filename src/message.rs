use fuel_tx::Bytes32;
use sha3::{Digest, Keccak256};

/// Message version the mailbox stamps on everything it dispatches
pub const MESSAGE_VERSION: u8 = 0;

/// A Hyperlane message in the form relayers and the mailbox hash it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlaneMessage {
    pub version: u8,
    pub nonce: u32,
    pub origin: u32,
    pub sender: Bytes32,
    pub destination: u32,
    pub recipient: Bytes32,
    pub body: Vec<u8>,
}

impl HyperlaneMessage {
    /// Length of the encoding without the body
    pub const HEADER_LEN: usize = 1 + 4 + 4 + 32 + 4 + 32;

    /// Canonical encoding: all integers big-endian, body appended as-is.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + self.body.len());
        buf.push(self.version);
        buf.extend_from_slice(&self.nonce.to_be_bytes());
        buf.extend_from_slice(&self.origin.to_be_bytes());
        buf.extend_from_slice(&self.sender[..]);
        buf.extend_from_slice(&self.destination.to_be_bytes());
        buf.extend_from_slice(&self.recipient[..]);
        buf.extend_from_slice(&self.body);
        buf
    }

    /// keccak256 of the encoding
    pub fn id(&self) -> Bytes32 {
        Bytes32::new(Keccak256::digest(self.to_vec()).into())
    }
}
