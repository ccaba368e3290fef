//! High-level wrapper around IBE operations.
//!
//! Usually, people don't communicate by sending each other group elements. Therefore, we provide
//! this opinionated and easier-to-use wrapper over the raw IBE operations.
//!
//! The main struct is [`HybridIbe`], which wraps a [`BonehBoyen`] to provide high-level
//! operations. The main differences include:
//!
//! * Messages are passed as byte slices. [`HybridIbe::encrypt`] checks the length of the message
//!   before doing anything else and refuses messages that are not exactly [`MESSAGE_SIZE`] bytes
//!   long.
//! * Generated keys (from [`IbeKem`]) are hashed to `[u8; 16]` (128 Bit) using SHA3 to make it
//!   easy to use them in other cryptographic primitives.
//! * Payloads of arbitrary length can be encrypted with [`HybridIbe::seal`], which uses the KEM
//!   and AES encryption on top.
//! * Identities are mapped through a [`Mapper`], which makes it easier to specify identities at
//!   the call-site.
//! * The types are wrapped in proper opaque structs instead of being the raw group elements. This
//!   makes it easier to implement new methods on those types or customize their behaviour (for
//!   example, by providing an easier-to-use [`Debug`] implementation).
//! * The methods in this module are restricted to [`CryptoRng`] random generators to enforce the
//!   use of cryptographically secure algorithms.
//!
//! As a default mapper, [`HashMapper`] is provided, which hashes the raw bytes of an identity to
//! a scalar. For identities that arrive as raw bytes, [`Utf8Mapper`] additionally insists on a
//! canonical (UTF-8) encoding.
use super::{
    config::{Decode, Encoding},
    error::{Error, Result},
    ibe::{hash_to_key, BonehBoyen, Ibe, IbeCrypt, IbeKem, MESSAGE_SIZE},
    ByteAccess, Mapper,
};

use std::fmt::{self, Debug};

use aes::cipher::{KeyIvInit, StreamCipher};
use bls12_381_plus::{ff::PrimeField, Scalar};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_384};
use tracing::{debug, trace};

type AesCtr = ctr::Ctr64LE<aes::Aes128>;
static IV: [u8; 16] = [0; 16];

/// Implements the conversions and byte access shared by all opaque artifacts.
macro_rules! artifact {
    ($name:ident, $inner:ty) => {
        artifact!(@redacted $name, $inner);

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.fingerprint())
                    .finish()
            }
        }
    };
    (@redacted $name:ident, $inner:ty) => {
        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl ByteAccess for $name {
            fn bytes(&self) -> Vec<u8> {
                bincode::serialize(&self.0).expect("Serialization failed")
            }
        }

        impl Decode for $name {
            fn decode(data: &[u8], encoding: Encoding) -> Result<Self> {
                let bytes = encoding.decode(data)?;
                let inner = bincode::deserialize(&bytes).map_err(|_| Error::InvalidEncoding)?;
                Ok(Self(inner))
            }
        }
    };
}

/// Represents the public parameters.
///
/// The parameters do not represent the public key for a single identity, but rather the global
/// public key. The encryption functionality then takes the identity as an additional parameter.
///
/// You mainly want to pass this object around (e.g. to [`HybridIbe::encrypt`]) without caring
/// about its internals. You can however serialize and deserialize it to save or transmit it.
/// Parameters from an untrusted source should be checked with [`PublicParams::validate`].
///
/// Note that the debug output does not output all inner bytes and instead outputs a small
/// fingerprint only.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PublicParams(<BonehBoyen as Ibe>::PublicKey);

artifact!(PublicParams, <BonehBoyen as Ibe>::PublicKey);

impl PublicParams {
    /// Checks that the parameters are well-formed.
    pub fn validate(&self) -> Result<()> {
        BonehBoyen::new().validate_params(&self.0)
    }
}

/// Represents the master secret key.
///
/// The master secret key allows the holder to extract secret keys for any identity. It should
/// never leave the key issuing authority.
///
/// Unlike the other artifacts, the debug output does not contain a fingerprint.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MasterSecret(<BonehBoyen as Ibe>::MasterKey);

artifact!(@redacted MasterSecret, <BonehBoyen as Ibe>::MasterKey);

impl Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MasterSecret").field(&"..").finish()
    }
}

/// Represents an identity's private key.
///
/// This private key allows the holder to decrypt ciphertexts for the identity it belongs to.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PrivateKey(<BonehBoyen as Ibe>::PrivateKey);

artifact!(PrivateKey, <BonehBoyen as Ibe>::PrivateKey);

/// Represents an encrypted message.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ciphertext(<BonehBoyen as IbeCrypt>::Ciphertext);

artifact!(Ciphertext, <BonehBoyen as IbeCrypt>::Ciphertext);

/// Represents an encapsulated key.
///
/// An encapsulated key is the precursor to a shared secret: by applying their secret key to it, an
/// identity can generate the same key that has been embedded by the creator of the encapsulation.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EncapsulatedKey(<BonehBoyen as IbeKem>::EncapsulatedKey);

artifact!(EncapsulatedKey, <BonehBoyen as IbeKem>::EncapsulatedKey);

/// High-level implementation of IBE operations.
///
/// This struct internally uses the [`BonehBoyen`]-IBE to provide high-level key-encapsulation
/// and encryption. In addition, this struct keeps a [`Mapper`] around to do the mapping of
/// high-level identities to low-level identities.
///
/// For more information about the differences to [`Ibe`], see the [module-level][self]
/// documentation.
#[derive(Clone, Debug, Default)]
pub struct HybridIbe<M> {
    ibe: BonehBoyen,
    mapper: M,
}

impl HybridIbe<HashMapper> {
    /// Create a new [`HybridIbe`] using the [`HashMapper`] mapper.
    pub fn new() -> HybridIbe<HashMapper> {
        Self::new_with_mapper(HashMapper)
    }
}

impl<M> HybridIbe<M> {
    /// Create a new [`HybridIbe`] with the given [`Mapper`].
    pub fn new_with_mapper(mapper: M) -> HybridIbe<M> {
        Self {
            ibe: BonehBoyen::new(),
            mapper,
        }
    }

    fn map<I>(&self, identity: I) -> Result<Scalar>
    where
        M: Mapper<I, Scalar>,
    {
        let identity = self.mapper.map_identity(identity)?;
        trace!(
            identity = %hex::encode(&identity.to_repr().as_ref()[..8]),
            "mapped identity"
        );
        Ok(identity)
    }

    /// Sets up the system parameters.
    ///
    /// This operation will return the public parameters and the master secret key.
    pub fn setup<R: Rng + CryptoRng>(&self, rng: R) -> Result<(PublicParams, MasterSecret)> {
        let (public_params, master_secret) = self.ibe.setup(rng)?;
        let public_params = PublicParams::from(public_params);
        debug!(params = %public_params.fingerprint(), "set up public parameters");
        Ok((public_params, master_secret.into()))
    }

    /// Extracts the secret key for a user using the master secret key.
    ///
    /// Every call returns a freshly randomized key, keys extracted earlier for the same identity
    /// stay valid.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `public_params` - The public parameters of the system.
    /// * `master_secret` - The master secret key.
    /// * `identity` - The identity for which to extract the key.
    pub fn extract<I, R: Rng + CryptoRng>(
        &self,
        rng: R,
        public_params: &PublicParams,
        master_secret: &MasterSecret,
        identity: I,
    ) -> Result<PrivateKey>
    where
        M: Mapper<I, Scalar>,
    {
        let identity = self.map(identity)?;
        let private_key = self
            .ibe
            .extract(rng, &public_params.0, &master_secret.0, &identity)?;
        debug!(params = %public_params.fingerprint(), "extracted private key");
        Ok(private_key.into())
    }

    /// Checks whether `key` is a valid private key for `identity`.
    pub fn verify_key<I>(
        &self,
        public_params: &PublicParams,
        key: &PrivateKey,
        identity: I,
    ) -> Result<bool>
    where
        M: Mapper<I, Scalar>,
    {
        let identity = self.map(identity)?;
        Ok(self.ibe.verify_key(&public_params.0, &identity, &key.0))
    }

    /// Encrypt a message of exactly [`MESSAGE_SIZE`] bytes for the given identity.
    ///
    /// For payloads of other lengths, use [`HybridIbe::seal`].
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `public_params` - The public parameters of the system.
    /// * `identity` - The identity for which to encrypt the message.
    /// * `message` - The message to encrypt.
    pub fn encrypt<I, R: Rng + CryptoRng>(
        &self,
        rng: R,
        public_params: &PublicParams,
        identity: I,
        message: &[u8],
    ) -> Result<Ciphertext>
    where
        M: Mapper<I, Scalar>,
    {
        let message: &[u8; MESSAGE_SIZE] = message
            .try_into()
            .map_err(|_| Error::MessageLengthMismatch {
                expected: MESSAGE_SIZE,
                actual: message.len(),
            })?;
        let identity = self.map(identity)?;
        let ciphertext = Ciphertext::from(self.ibe.encrypt(
            rng,
            &public_params.0,
            &identity,
            message,
        )?);
        debug!(ciphertext = %ciphertext.fingerprint(), "encrypted message");
        Ok(ciphertext)
    }

    /// Decrypt the given ciphertext.
    ///
    /// A key for a different identity than the one used for encryption yields a wrong message
    /// instead of an error.
    pub fn decrypt(
        &self,
        public_params: &PublicParams,
        key: &PrivateKey,
        ciphertext: &Ciphertext,
    ) -> Result<[u8; MESSAGE_SIZE]> {
        let message = self.ibe.decrypt(&public_params.0, &key.0, &ciphertext.0)?;
        debug!(ciphertext = %ciphertext.fingerprint(), "decrypted message");
        Ok(message)
    }

    /// Encapsulate a key for the given identity.
    ///
    /// This returns the key and its encapsulation.
    pub fn encapsulate<I, R: Rng + CryptoRng>(
        &self,
        rng: R,
        public_params: &PublicParams,
        identity: I,
    ) -> Result<([u8; MESSAGE_SIZE], EncapsulatedKey)>
    where
        M: Mapper<I, Scalar>,
    {
        let identity = self.map(identity)?;
        let (key, encapsulation) = self.ibe.encapsulate(rng, &public_params.0, &identity)?;
        Ok((hash_to_key(key), encapsulation.into()))
    }

    /// Decapsulate the given key.
    ///
    /// If the correct secret key is given, this will return the same key that the corresponding
    /// [`HybridIbe::encapsulate`] call also returned.
    pub fn decapsulate(
        &self,
        public_params: &PublicParams,
        key: &PrivateKey,
        encapsulation: &EncapsulatedKey,
    ) -> Result<[u8; MESSAGE_SIZE]> {
        let key = self
            .ibe
            .decapsulate(&public_params.0, &key.0, &encapsulation.0)?;
        debug!(encapsulation = %encapsulation.fingerprint(), "decapsulated key");
        Ok(hash_to_key(key))
    }

    /// Encrypt the given byte sequence of any length for the given identity.
    ///
    /// This internally uses a hybrid encryption where the key is encapsulated by the KEM, and the
    /// payload is then encrypted symetrically with AES (counter mode). Like [`HybridIbe::encrypt`],
    /// this provides no integrity protection.
    ///
    /// Note that the resulting ciphertext is longer than the payload, as some space is needed for
    /// the encapsulated key. The key is automatically prepended to the encrypted payload.
    pub fn seal<I, R: Rng + CryptoRng>(
        &self,
        rng: R,
        public_params: &PublicParams,
        identity: I,
        payload: &[u8],
    ) -> Result<Vec<u8>>
    where
        M: Mapper<I, Scalar>,
    {
        let (key, encapsulation) = self.encapsulate(rng, public_params, identity)?;
        let mut buffer = Vec::from(payload);
        let mut cipher = AesCtr::new(&key.into(), &IV.into());
        cipher.apply_keystream(&mut buffer);
        debug!(
            encapsulation = %encapsulation.fingerprint(),
            length = payload.len(),
            "sealed payload"
        );
        Ok(bincode::serialize(&(encapsulation, buffer)).expect("Serialization failed"))
    }

    /// Decrypt a ciphertext previously returned by [`HybridIbe::seal`].
    pub fn open(
        &self,
        public_params: &PublicParams,
        key: &PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let (encapsulation, mut buffer): (EncapsulatedKey, Vec<u8>) =
            bincode::deserialize(ciphertext).map_err(|_| Error::MalformedCiphertext)?;
        let key = self.decapsulate(public_params, key, &encapsulation)?;
        let mut cipher = AesCtr::new(&key.into(), &IV.into());
        cipher.apply_keystream(&mut buffer);
        debug!(
            encapsulation = %encapsulation.fingerprint(),
            length = buffer.len(),
            "opened payload"
        );
        Ok(buffer)
    }
}

/// A [`Mapper`] that works for all identities that can be viewed as bytes.
///
/// The identity bytes are hashed with SHA3-384 and the digest is reduced to a [`Scalar`], the
/// underlying identity of [`BonehBoyen`]. Only the bytes matter, not the type that holds them:
/// `"Alice"`, `b"Alice"` and `b"Alice".to_vec()` all map to the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashMapper;

impl HashMapper {
    /// Create a new [`HashMapper`].
    pub fn new() -> HashMapper {
        HashMapper
    }
}

impl<I: AsRef<[u8]>> Mapper<I, Scalar> for HashMapper {
    fn map_identity(&self, input: I) -> Result<Scalar> {
        let mut okm = [0; 48];
        okm.copy_from_slice(&Sha3_384::digest(input.as_ref()));
        Ok(Scalar::from_okm(&okm))
    }
}

/// A [`Mapper`] for identities given as raw bytes that must be non-empty UTF-8.
///
/// Valid identities map to the same scalar as the equivalent `&str` under [`HashMapper`].
/// Everything else is rejected with [`Error::InvalidIdentityEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Utf8Mapper;

impl<'a> Mapper<&'a [u8], Scalar> for Utf8Mapper {
    fn map_identity(&self, input: &'a [u8]) -> Result<Scalar> {
        match std::str::from_utf8(input) {
            Ok(identity) if !identity.is_empty() => HashMapper.map_identity(identity),
            _ => Err(Error::InvalidIdentityEncoding),
        }
    }
}

impl<'a, const N: usize> Mapper<&'a [u8; N], Scalar> for Utf8Mapper {
    fn map_identity(&self, input: &'a [u8; N]) -> Result<Scalar> {
        self.map_identity(input.as_slice())
    }
}
