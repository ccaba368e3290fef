//! The selective-ID secure IBE of Boneh and Boyen, "Efficient Selective-ID Secure Identity Based
//! Encryption Without Random Oracles" ([eprint](https://eprint.iacr.org/2004/172.pdf)), in the
//! variant that masks a fixed-width message with a hash of the pairing value.
use super::{random_scalar, Ibe, IbeCrypt, IbeKem};
use crate::error::{Error, Result};

use bls12_381_plus::{
    group::Group, pairing, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Width of a message in bytes.
///
/// This is also the width of the symmetric key that is derived from the pairing value, which is
/// an AES-128 key.
pub const MESSAGE_SIZE: usize = 16;

/// Public parameters of a [`BonehBoyen`] instance.
///
/// The textbook generator `g1 = g^α` is needed in both source groups, once to compute the
/// encryption key `e(g1, g2)` and once inside the identity function `F1(id) = g1^id · h1`. The
/// latter is stored as `g1_hat = g_hat·α`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicParams {
    pub g: G1Affine,
    pub g_hat: G2Affine,
    pub g1: G1Affine,
    pub g1_hat: G2Affine,
    pub g2: G2Affine,
    pub h1: G2Affine,
}

/// Secret key of a single identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub d0: G2Affine,
    pub d1: G1Affine,
}

/// Encapsulation of a pairing value, the group part of a [`Ciphertext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encapsulation {
    pub b: G1Affine,
    pub c1: G2Affine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub a: [u8; MESSAGE_SIZE],
    pub b: G1Affine,
    pub c1: G2Affine,
}

/// The Boneh-Boyen IBE.
///
/// In additive notation, with `g ∈ G1` and `g_hat, g2, h1 ∈ G2`:
///
/// * Setup: `g1 = g·α`, `g1_hat = g_hat·α`, master key `g2·α`.
/// * `F1(id) = h1 + g1_hat·id`.
/// * Extract: `d0 = g2·α + F1(id)·r1`, `d1 = g·r1`.
/// * Encrypt: `A = M ⊕ H(e(g1, g2)·s)`, `B = g·s`, `C1 = F1(id)·s`.
/// * Decrypt: `M = A ⊕ H(e(B, d0) - e(d1, C1))`.
///
/// Decryption works because `e(B, d0) = e(g, g2)·(sα) + e(g, F1(id))·(s r1)` and
/// `e(d1, C1) = e(g, F1(id))·(s r1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BonehBoyen;

impl BonehBoyen {
    pub fn new() -> Self {
        Self
    }

    /// Checks that the given key is a valid key for `identity`.
    ///
    /// A valid key satisfies `e(g, d0) = e(g1, g2) + e(d1, F1(id))`. This allows the receiver of a
    /// key to check it before using it, as decryption with a wrong key gives no indication of
    /// failure.
    pub fn verify_key(&self, params: &PublicParams, identity: &Scalar, key: &PrivateKey) -> bool {
        let f1 = G2Affine::from(identity_point(params, identity));
        pairing(&params.g, &key.d0) == pairing(&params.g1, &params.g2) + pairing(&key.d1, &f1)
    }

    /// Checks that the public parameters are consistent.
    ///
    /// Both copies of `g1` need to use the same exponent, and none of the generators may be the
    /// neutral element.
    pub fn validate_params(&self, params: &PublicParams) -> Result<()> {
        let degenerate = params.g.is_identity()
            | params.g1.is_identity()
            | params.g_hat.is_identity()
            | params.g1_hat.is_identity()
            | params.g2.is_identity()
            | params.h1.is_identity();
        if bool::from(degenerate)
            || pairing(&params.g1, &params.g_hat) != pairing(&params.g, &params.g1_hat)
        {
            return Err(Error::InvalidPublicParams);
        }
        Ok(())
    }

    pub(crate) fn setup_with(
        alpha: Scalar,
        g: G1Projective,
        g_hat: G2Projective,
        g2: G2Projective,
        h1: G2Projective,
    ) -> (PublicParams, G2Affine) {
        (
            PublicParams {
                g: g.into(),
                g_hat: g_hat.into(),
                g1: (g * alpha).into(),
                g1_hat: (g_hat * alpha).into(),
                g2: g2.into(),
                h1: h1.into(),
            },
            (g2 * alpha).into(),
        )
    }

    /// `r1` must never be used for more than one key.
    pub(crate) fn extract_with(
        params: &PublicParams,
        master_key: &G2Affine,
        identity: &Scalar,
        r1: Scalar,
    ) -> PrivateKey {
        PrivateKey {
            d0: (master_key + identity_point(params, identity) * r1).into(),
            d1: (params.g * r1).into(),
        }
    }

    /// `s` must never be used for more than one encapsulation.
    pub(crate) fn encapsulate_with(
        params: &PublicParams,
        identity: &Scalar,
        s: Scalar,
    ) -> (Gt, Encapsulation) {
        (
            pairing(&params.g1, &params.g2) * s,
            Encapsulation {
                b: (params.g * s).into(),
                c1: (identity_point(params, identity) * s).into(),
            },
        )
    }

    pub(crate) fn encrypt_with(
        params: &PublicParams,
        identity: &Scalar,
        message: &[u8; MESSAGE_SIZE],
        s: Scalar,
    ) -> Ciphertext {
        let (key, Encapsulation { b, c1 }) = Self::encapsulate_with(params, identity, s);
        Ciphertext {
            a: xor(message, &hash_to_key(key)),
            b,
            c1,
        }
    }
}

/// `F1(id) = h1 + g1_hat·id`.
fn identity_point(params: &PublicParams, identity: &Scalar) -> G2Projective {
    params.g1_hat * identity + params.h1
}

/// Derives the symmetric key from a target group element.
pub(crate) fn hash_to_key(element: Gt) -> [u8; MESSAGE_SIZE] {
    let mut result = [0; MESSAGE_SIZE];
    result.copy_from_slice(&Sha3_256::digest(element.to_bytes())[..MESSAGE_SIZE]);
    result
}

fn xor(data: &[u8; MESSAGE_SIZE], key: &[u8; MESSAGE_SIZE]) -> [u8; MESSAGE_SIZE] {
    let mut result = *data;
    result.iter_mut().zip(key).for_each(|(d, k)| *d ^= k);
    result
}

impl Ibe for BonehBoyen {
    type PrivateKey = PrivateKey;
    type MasterKey = G2Affine;
    type PublicKey = PublicParams;
    type Identity = Scalar;

    fn setup<R: Rng>(&self, mut rng: R) -> Result<(Self::PublicKey, Self::MasterKey)> {
        let alpha = random_scalar(&mut rng)?;
        let g = G1Projective::generator() * random_scalar(&mut rng)?;
        let g_hat = G2Projective::generator() * random_scalar(&mut rng)?;
        let g2 = G2Projective::generator() * random_scalar(&mut rng)?;
        let h1 = G2Projective::generator() * random_scalar(&mut rng)?;
        Ok(Self::setup_with(alpha, g, g_hat, g2, h1))
    }

    fn extract<R: Rng>(
        &self,
        mut rng: R,
        public_key: &Self::PublicKey,
        master_key: &Self::MasterKey,
        identity: &Self::Identity,
    ) -> Result<Self::PrivateKey> {
        let r1 = random_scalar(&mut rng)?;
        Ok(Self::extract_with(public_key, master_key, identity, r1))
    }
}

impl IbeKem for BonehBoyen {
    type Key = Gt;

    type EncapsulatedKey = Encapsulation;

    fn encapsulate<R: Rng>(
        &self,
        mut rng: R,
        public_key: &Self::PublicKey,
        identity: &Self::Identity,
    ) -> Result<(Self::Key, Self::EncapsulatedKey)> {
        let s = random_scalar(&mut rng)?;
        Ok(Self::encapsulate_with(public_key, identity, s))
    }

    fn decapsulate(
        &self,
        _: &Self::PublicKey,
        key: &Self::PrivateKey,
        encapsulation: &Self::EncapsulatedKey,
    ) -> Result<Self::Key> {
        Ok(pairing(&encapsulation.b, &key.d0) - pairing(&key.d1, &encapsulation.c1))
    }
}

impl IbeCrypt for BonehBoyen {
    type Message = [u8; MESSAGE_SIZE];

    type Ciphertext = Ciphertext;

    fn encrypt<R: Rng>(
        &self,
        mut rng: R,
        public_key: &Self::PublicKey,
        identity: &Self::Identity,
        message: &Self::Message,
    ) -> Result<Self::Ciphertext> {
        let s = random_scalar(&mut rng)?;
        Ok(Self::encrypt_with(public_key, identity, message, s))
    }

    fn decrypt(
        &self,
        public_key: &Self::PublicKey,
        key: &Self::PrivateKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Message> {
        let encapsulation = Encapsulation {
            b: ciphertext.b,
            c1: ciphertext.c1,
        };
        let key = self.decapsulate(public_key, key, &encapsulation)?;
        Ok(xor(&ciphertext.a, &hash_to_key(key)))
    }
}
