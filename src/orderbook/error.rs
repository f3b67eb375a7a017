//! Order book error types

use std::fmt;

/// Errors that can occur within the order book.
///
/// Unknown order identifiers on cancel/execute/replace are not errors:
/// duplicate cancels are common in replayed feeds, so those paths absorb
/// the miss and return nothing. Internal invariant violations (negative
/// quantity, tick-set/level divergence) are not represented here either;
/// the book has no safe partial state, so they panic.
#[derive(Debug)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Event failed shape validation (empty identifier, zero quantity)
    MalformedEvent {
        /// Description of the failed validation
        message: String,
    },

    /// Venue code not present in the canonical venue table
    UnknownVenue {
        /// The rejected one-character code
        code: char,
    },

    /// Side tag was neither `BID` nor `ASK`
    UnknownSide {
        /// The rejected tag
        tag: String,
    },

    /// An add carried an identifier that is already live
    DuplicateOrderId(String),

    /// Price is negative, non-finite, or outside the representable tick
    /// range
    PriceOutOfRange {
        /// The rejected price
        price: f64,
    },

    /// Error while serializing snapshot data
    SerializationError {
        /// Underlying error message
        message: String,
    },

    /// Error while deserializing snapshot data
    DeserializationError {
        /// Underlying error message
        message: String,
    },

    /// Snapshot integrity check failed
    ChecksumMismatch {
        /// Expected checksum value
        expected: String,
        /// Actual checksum value
        actual: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::MalformedEvent { message } => {
                write!(f, "malformed event: {message}")
            }
            OrderBookError::UnknownVenue { code } => {
                write!(f, "unknown venue code: {code:?}")
            }
            OrderBookError::UnknownSide { tag } => {
                write!(f, "unknown side tag: {tag:?}, expected BID or ASK")
            }
            OrderBookError::DuplicateOrderId(oid) => {
                write!(f, "duplicate order id: {oid} is already live")
            }
            OrderBookError::PriceOutOfRange { price } => {
                write!(f, "price out of range: {price}")
            }
            OrderBookError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            OrderBookError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            OrderBookError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "checksum mismatch: expected {expected}, but computed {actual}"
                )
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
