//! Implementation of the selective-ID secure Identity Based Encryption ([IBE]) of Boneh and
//! Boyen.
//!
//! # ⚠️ Warning: Cryptographic Hazmat ☣️
//!
//! This crate is made for playing around with IBE and for prototyping of applications and
//! protocols using IBE. It has *not* been audited, it is *not* battle tested, and *nobody* claims
//! it to be secure.
//!
//! Use it at **your own risk** and if you know what you are doing!
//!
//! # Introduction
//!
//! IBEs are encryption schemes in which a party can encrypt data for a given recipient by using
//! the recipient's identity in the encryption process, instead of requiring an explicitely shared
//! public key. The private keys of identities are extracted by a trusted authority that holds the
//! master secret key.
//!
//! The scheme provides confidentiality only. Decrypting with the wrong key, or decrypting a
//! tampered ciphertext, does not raise an error but yields a wrong message.
//!
//! # Crate Structure
//!
//! The [`ibe`] submodule contains the basic definitions of IBE functionality, as [`ibe::Ibe`]
//! (setup and key extraction), [`ibe::IbeKem`] (key encapsulation) and [`ibe::IbeCrypt`]
//! (encryption of fixed-width messages). Those methods work directly on the group elements, as
//! they are defined in the paper.
//!
//! To aid in using those algorithms, a higher-level wrapper is provided in the [`kem`] submodule,
//! mainly in the [`kem::HybridIbe`] struct. This allows you to deal with bytes instead of group
//! elements, and to encrypt payloads of arbitrary length.
//!
//! The bridge between [`ibe`] and [`kem`] is provided by [`Mapper`], which translates from
//! arbitrary identities from the application domain to the low-level, mathematical representation
//! of identities.
//!
//! How artifacts are rendered to and parsed from bytes is chosen per call with a
//! [`config::Encoding`].
//!
//! # Implemented Algorithms
//!
//! This crate implements the IBE of Boneh and Boyen, "Efficient Selective-ID Secure Identity Based
//! Encryption Without Random Oracles" ([eprint](https://eprint.iacr.org/2004/172.pdf)), as
//! [`ibe::BonehBoyen`].
//!
//! The algorithms in this crate are implemented on top of
//! [`bls_12_381_plus`](https://crates.io/crates/bls12_381_plus), as it provides better `serde`
//! support and access to the internals of the group elements.
//!
//! [IBE]: https://en.wikipedia.org/wiki/Identity-based_encryption
pub mod config;
pub mod error;
pub mod ibe;
pub mod kem;

use config::Encoding;
use error::Result;

/// A trait to provide byte-level access to objects.
pub trait ByteAccess {
    /// Provides access to the bytes.
    ///
    /// Unlike [`AsRef`], there are no statements made about the performance of this operation.
    /// This operation will allocate a fresh vector, and the byte representation may or may not
    /// have to be computed first.
    fn bytes(&self) -> Vec<u8>;

    /// Provide a short fingerprint of the bytes.
    ///
    /// This can be used to "summarize" long keys when displaying them, to still provide
    /// distinguishing features but to not print out the whole key.
    ///
    /// By default, this method uses the first 16 bytes of the [`ByteAccess::bytes`]
    /// representation, and formats them as a hex string.
    fn fingerprint(&self) -> String {
        let bytes = self.bytes();
        hex::encode(&bytes[..bytes.len().min(16)])
    }

    /// Renders the bytes in the given encoding.
    fn encode(&self, encoding: Encoding) -> Vec<u8> {
        encoding.encode(&self.bytes())
    }
}

/// A trait to mark objects that can map from an application-specific identity to an IBE-specific
/// identity.
///
/// A mapper can be implemented multiple times for a single struct, thereby providing multiple
/// (equivalent) ways to map.
pub trait Mapper<F, T> {
    fn map_identity(&self, input: F) -> Result<T>;
}

/// [`Mapper`] is automatically implemented for functions and closures that match the signature of
/// [`Mapper::map_identity`].
impl<X, Y, F: Fn(X) -> Result<Y>> Mapper<X, Y> for F {
    fn map_identity(&self, input: X) -> Result<Y> {
        self(input)
    }
}
