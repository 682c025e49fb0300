use thiserror::Error;

/// Raised only by the validating decoder; [`super::decode`] never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("Byte 0x{byte:02x} at offset {offset} is outside the polyline alphabet")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("Polyline ends mid-value at offset {offset} after {decoded} complete points")]
    Truncated { offset: usize, decoded: usize },

    #[error("Value starting at offset {offset} does not fit in 64 bits")]
    Overflow { offset: usize },

    #[error("Polyline is {len} bytes long, limit is {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("Polyline holds more than {max} points")]
    TooManyPoints { max: usize },

    #[error("Unsupported precision {0}")]
    InvalidPrecision(u32),
}
