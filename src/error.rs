use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The randomness source could not provide samples")]
    RandomnessUnavailable(#[from] rand::Error),
    #[error("The message has {actual} bytes, but exactly {expected} are required")]
    MessageLengthMismatch { expected: usize, actual: usize },
    #[error("The supplied identity was not canonically encoded")]
    InvalidIdentityEncoding,
    #[error("The supplied ciphertext was malformed")]
    MalformedCiphertext,
    #[error("The supplied bytes could not be decoded")]
    InvalidEncoding,
    #[error("The public parameters are inconsistent")]
    InvalidPublicParams,
}

pub type Result<V, E=Error> = std::result::Result<V, E>;
