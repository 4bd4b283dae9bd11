use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyReuseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer too large: {len} bytes needs a {len}x{len} evidence matrix (max {max} bytes)")]
    BufferTooLarge { len: usize, max: usize },

    #[error("Invalid padding modulus: {0}. Must be 1-255")]
    InvalidModulus(usize),

    #[error("Wrong padded length: {len} is not a positive multiple of {modulus}")]
    WrongPaddedLength { len: usize, modulus: usize },

    #[error("Invalid padding")]
    InvalidPadding,

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid base64 input: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Empty evidence matrix: nothing to render")]
    EmptyMatrix,
}

pub type Result<T> = std::result::Result<T, KeyReuseError>;
