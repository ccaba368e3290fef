//! Low-level implementation of IBE primitives.
//!
//! The structs and traits in this module implement IBEs in the way that they are defined in their
//! respective papers. For a higher-level interface, refer to the [`kem`][super::kem] module.
//!
//! To make this module more flexible, all methods that use randomness only use the [`Rng`] bound,
//! not [`CryptoRng`][rand::CryptoRng]. This does not mean that you should use them with insecure
//! randomness, but rather that you need to take care when using these low-level primitives!
//!
//! # Notation
//!
//! Papers usually describe pairing-based schemes in multiplicative notation over a symmetric
//! pairing `e: G × G → GT`. This module uses the additive notation of elliptic curve groups
//! throughout: `g^a` is written `g·a`, `g·h` is written `g + h` and `x / y` in the target group is
//! written `x - y`. As BLS12-381 is an asymmetric pairing `e: G1 × G2 → GT`, elements that are
//! paired with each other live in different source groups. See [`BonehBoyen`] for how the
//! textbook scheme is laid out over the two groups.
//!
//! # Randomness
//!
//! Every sampled scalar is drawn through [`RngCore::try_fill_bytes`], so a source that fails to
//! provide entropy surfaces as [`Error::RandomnessUnavailable`][crate::error::Error] instead of
//! a panic. Sampled scalars are never zero.
use super::error::Result;

use bls12_381_plus::{ff::Field, Scalar};
use rand::{Rng, RngCore};

mod bb;
pub use self::bb::{
    BonehBoyen, Ciphertext, Encapsulation, PrivateKey, PublicParams, MESSAGE_SIZE,
};
pub(crate) use self::bb::hash_to_key;

/// Main trait for IBE schemes.
///
/// This trait defines the basic functionality of IBEs, namely the generation of the system and
/// the extraction of secret keys for identities.
///
/// For encryption functionality, the extension [`IbeCrypt`] needs to be used, and for key
/// encapsulation, [`IbeKem`].
///
/// Note that this trait represents an IBE *algorithm* not an IBE *instantiation*.
pub trait Ibe {
    /// Type of the private key.
    ///
    /// This refers to a single identity's private key.
    type PrivateKey;
    /// Type of the master key.
    ///
    /// This is the secret key that can be used to extract the secret key of any identity.
    type MasterKey;
    /// Type of the public key.
    ///
    /// This is the public key "of the whole system", usually called *public parameters*. There is
    /// no distinct type to represent the public key of a single identity, as the encryption
    /// computes that implicitely.
    type PublicKey;
    /// Type of an identity.
    type Identity;

    /// Set the system up.
    ///
    /// This method outputs the public parameters and the master secret key.
    fn setup<R: Rng>(&self, rng: R) -> Result<(Self::PublicKey, Self::MasterKey)>;

    /// Extract the key for the given identity.
    ///
    /// Every call draws fresh randomness, so extracting twice for the same identity gives two
    /// different keys that are both valid.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `public_key` - The public parameters.
    /// * `master_key` - The master secret key.
    /// * `identity` - The identity to extract the key for.
    fn extract<R: Rng>(
        &self,
        rng: R,
        public_key: &Self::PublicKey,
        master_key: &Self::MasterKey,
        identity: &Self::Identity,
    ) -> Result<Self::PrivateKey>;
}

/// IBE methods to do encryption.
pub trait IbeCrypt: Ibe {
    /// Type of the messages that this IBE can encrypt.
    type Message;
    /// Type of the resulting ciphertext.
    type Ciphertext;

    /// Encrypt a message for the given identity.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `public_key` - The public parameters.
    /// * `identity` - The identity for which to encrypt the message.
    /// * `message` - The actual message.
    fn encrypt<R: Rng>(
        &self,
        rng: R,
        public_key: &Self::PublicKey,
        identity: &Self::Identity,
        message: &Self::Message,
    ) -> Result<Self::Ciphertext>;

    /// Decrypt a message given the secret key.
    ///
    /// There is no integrity check: using the wrong key silently yields a wrong message.
    fn decrypt(
        &self,
        public_key: &Self::PublicKey,
        key: &Self::PrivateKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Message>;
}

/// IBE methods to do key encapsulation.
pub trait IbeKem: Ibe {
    /// Type of the resulting key.
    type Key;
    /// Type of the encapsulation of the key.
    type EncapsulatedKey;

    /// Computes a key encapsulation.
    ///
    /// Returns the generated key and its encapsulation.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `public_key` - The public parameters.
    /// * `identity` - The identity for which to encapsulate the key.
    fn encapsulate<R: Rng>(
        &self,
        rng: R,
        public_key: &Self::PublicKey,
        identity: &Self::Identity,
    ) -> Result<(Self::Key, Self::EncapsulatedKey)>;

    /// Decapsulate a previously encapsulated key.
    fn decapsulate(
        &self,
        public_key: &Self::PublicKey,
        key: &Self::PrivateKey,
        encapsulation: &Self::EncapsulatedKey,
    ) -> Result<Self::Key>;
}

/// Samples a uniformly random, non-zero scalar.
pub(crate) fn random_scalar<R: RngCore + ?Sized>(rng: &mut R) -> Result<Scalar> {
    loop {
        let mut okm = [0; 48];
        rng.try_fill_bytes(&mut okm)?;
        let scalar = Scalar::from_okm(&okm);
        if !bool::from(scalar.is_zero()) {
            return Ok(scalar);
        }
    }
}
