//! Per-call configuration of how artifacts are turned into bytes.
//!
//! Keys, ciphertexts and messages are binary data. Whether they are handled raw or as hex text is
//! decided by the caller for each call by passing an [`Encoding`], there is no global setting.
use crate::error::{Error, Result};

/// The textual or binary form of an encoded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// The bytes are used as they are.
    #[default]
    Raw,
    /// The bytes are written as lowercase hex digits.
    Hex,
}

impl Encoding {
    pub fn encode(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Encoding::Raw => bytes.to_vec(),
            Encoding::Hex => hex::encode(bytes).into_bytes(),
        }
    }

    /// Reverses [`Encoding::encode`].
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Encoding::Raw => Ok(data.to_vec()),
            Encoding::Hex => hex::decode(data).map_err(|_| Error::InvalidEncoding),
        }
    }
}

/// Objects that can be restored from the output of [`ByteAccess::encode`][crate::ByteAccess].
pub trait Decode: Sized {
    fn decode(data: &[u8], encoding: Encoding) -> Result<Self>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_encoding() {
        let encoded = Encoding::Hex.encode(&[0x00, 0xab, 0xff]);
        assert_eq!(encoded, b"00abff");
        assert_eq!(Encoding::Hex.decode(&encoded).unwrap(), vec![0x00, 0xab, 0xff]);
    }

    #[test]
    fn raw_encoding_is_identity() {
        let data = b"Test message";
        assert_eq!(Encoding::Raw.encode(data), data);
        assert_eq!(Encoding::Raw.decode(data).unwrap(), data);
    }

    #[test]
    fn invalid_hex() {
        assert!(matches!(
            Encoding::Hex.decode(b"not hex"),
            Err(Error::InvalidEncoding)
        ));
        assert!(matches!(
            Encoding::Hex.decode(b"abc"),
            Err(Error::InvalidEncoding)
        ));
    }
}
