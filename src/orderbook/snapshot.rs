//! Order book snapshot for market data consumers.

use super::error::OrderBookError;
use super::venue::{Venue, NUM_VENUES};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

/// One occupied price level inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Level price
    pub price: f64,
    /// Aggregate quantity across venues
    pub aggregate: u32,
    /// Per-venue quantities in canonical venue order
    pub venue_qty: [u32; NUM_VENUES],
}

impl LevelSnapshot {
    /// Canonical venue string of this level: one-character codes of
    /// venues with positive quantity, sorted ascending by code point.
    #[must_use]
    pub fn venue_string(&self) -> String {
        let mut codes: Vec<char> = Venue::ALL
            .iter()
            .filter(|v| self.venue_qty[v.index()] > 0)
            .map(|v| v.code())
            .collect();
        codes.sort_unstable();
        codes.into_iter().collect()
    }
}

/// A snapshot of the order book state at a specific point in time.
///
/// Levels are stored best-first on both sides. Snapshots are an export
/// surface only: per-level venue totals do not determine the live-order
/// index, so a book cannot be rebuilt from one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid price levels, best (highest) first
    pub bids: Vec<LevelSnapshot>,

    /// Ask price levels, best (lowest) first
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and aggregate quantity.
    #[must_use]
    pub fn best_bid(&self) -> Option<(f64, u32)> {
        let bid = self.bids.first().map(|level| (level.price, level.aggregate));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and aggregate quantity.
    #[must_use]
    pub fn best_ask(&self) -> Option<(f64, u32)> {
        let ask = self.asks.first().map(|level| (level.price, level.aggregate));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Total resting quantity on the bid side.
    #[must_use]
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| u64::from(level.aggregate)).sum()
    }

    /// Total resting quantity on the ask side.
    #[must_use]
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| u64::from(level.aggregate)).sum()
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::SerializationError`] when encoding
    /// fails.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|error| OrderBookError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes a snapshot from JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::DeserializationError`] when decoding
    /// fails.
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(data).map_err(|error| OrderBookError::DeserializationError {
            message: error.to_string(),
        })
    }
}

/// Format version used for checksum-enabled snapshots.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for [`OrderBookSnapshot`]
/// instances handed across process boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub snapshot: OrderBookSnapshot,
    /// Hex-encoded SHA-256 checksum of the serialized snapshot.
    pub checksum: String,
}

impl SnapshotPackage {
    /// Creates a new package, computing the checksum of the snapshot
    /// contents.
    ///
    /// # Errors
    /// Returns [`OrderBookError::SerializationError`] when the snapshot
    /// cannot be encoded for hashing.
    pub fn new(snapshot: OrderBookSnapshot) -> Result<Self, OrderBookError> {
        let checksum = Self::compute_checksum(&snapshot)?;
        Ok(Self {
            version: SNAPSHOT_FORMAT_VERSION,
            snapshot,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::SerializationError`] when encoding
    /// fails.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|error| OrderBookError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes a package from JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::DeserializationError`] when decoding
    /// fails.
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(data).map_err(|error| OrderBookError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the format version and checksum.
    ///
    /// # Errors
    /// - [`OrderBookError::DeserializationError`] on a version mismatch
    /// - [`OrderBookError::ChecksumMismatch`] when the payload does not
    ///   hash to the recorded checksum
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(OrderBookError::DeserializationError {
                message: format!(
                    "unsupported snapshot format version {}, expected {}",
                    self.version, SNAPSHOT_FORMAT_VERSION
                ),
            });
        }
        let actual = Self::compute_checksum(&self.snapshot)?;
        if actual != self.checksum {
            return Err(OrderBookError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Verifies the package and unwraps the snapshot.
    ///
    /// # Errors
    /// Propagates [`Self::validate`] failures.
    pub fn into_snapshot(self) -> Result<OrderBookSnapshot, OrderBookError> {
        self.validate()?;
        Ok(self.snapshot)
    }

    fn compute_checksum(snapshot: &OrderBookSnapshot) -> Result<String, OrderBookError> {
        let encoded =
            serde_json::to_vec(snapshot).map_err(|error| OrderBookError::SerializationError {
                message: error.to_string(),
            })?;
        let digest = Sha256::digest(&encoded);
        Ok(format!("{digest:x}"))
    }
}
