//! The fixed venue table quantities are sharded over.
//!
//! The set of venues is closed at build time: a venue is identified by its
//! dense index in the canonical table, carries a canonical name, and a
//! unique one-character code used on the wire and in venue strings. The
//! table is a process-wide constant; there is no runtime registration.

use super::error::OrderBookError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of venues in the canonical table.
pub const NUM_VENUES: usize = 14;

/// A trading venue, represented internally by its dense table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Venue {
    /// Cboe Options Exchange
    Cboe = 0,
    /// Nasdaq ISE
    Ise = 1,
    /// BOX Options Exchange
    Box = 2,
    /// MIAX Options
    Miax = 3,
    /// NYSE Arca Options
    Arca = 4,
    /// Nasdaq PHLX
    Phlx = 5,
    /// Nasdaq GEMX
    Gem = 6,
    /// Cboe EDGX Options
    Edgx = 7,
    /// Cboe BAT
    Bat = 8,
    /// Nasdaq MRX
    Mrx = 9,
    /// Cboe BZX Options
    Bzx = 10,
    /// Nasdaq Options Market
    Ndq = 11,
    /// Cboe C2 Options
    C2 = 12,
    /// NYSE American Options
    Amex = 13,
}

impl Venue {
    /// All venues in canonical table order.
    pub const ALL: [Venue; NUM_VENUES] = [
        Venue::Cboe,
        Venue::Ise,
        Venue::Box,
        Venue::Miax,
        Venue::Arca,
        Venue::Phlx,
        Venue::Gem,
        Venue::Edgx,
        Venue::Bat,
        Venue::Mrx,
        Venue::Bzx,
        Venue::Ndq,
        Venue::C2,
        Venue::Amex,
    ];

    /// Dense index of this venue in the canonical table.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical venue name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Venue::Cboe => "CBOE",
            Venue::Ise => "ISE",
            Venue::Box => "BOX",
            Venue::Miax => "MIAX",
            Venue::Arca => "ARCA",
            Venue::Phlx => "PHLX",
            Venue::Gem => "GEM",
            Venue::Edgx => "EDGX",
            Venue::Bat => "BAT",
            Venue::Mrx => "MRX",
            Venue::Bzx => "BZX",
            Venue::Ndq => "NDQ",
            Venue::C2 => "C2",
            Venue::Amex => "AMEX",
        }
    }

    /// One-character venue code, unique across the table. Venue strings
    /// are built from these codes.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Venue::Cboe => 'C',
            Venue::Ise => 'I',
            Venue::Box => 'B',
            Venue::Miax => 'M',
            Venue::Arca => 'A',
            Venue::Phlx => 'P',
            Venue::Gem => 'G',
            Venue::Edgx => 'E',
            Venue::Bat => 'T',
            Venue::Mrx => 'R',
            Venue::Bzx => 'Z',
            Venue::Ndq => 'N',
            Venue::C2 => '2',
            Venue::Amex => 'X',
        }
    }

    /// Look up a venue by its one-character code.
    ///
    /// # Errors
    /// Returns [`OrderBookError::UnknownVenue`] when no venue carries the
    /// code.
    pub fn from_code(code: char) -> Result<Venue, OrderBookError> {
        Venue::ALL
            .iter()
            .copied()
            .find(|v| v.code() == code)
            .ok_or(OrderBookError::UnknownVenue { code })
    }

    /// Look up a venue by its canonical name.
    ///
    /// # Errors
    /// Returns [`OrderBookError::UnknownVenue`] when the name is not in
    /// the table. The error carries the first character of the rejected
    /// name.
    pub fn from_name(name: &str) -> Result<Venue, OrderBookError> {
        Venue::ALL
            .iter()
            .copied()
            .find(|v| v.name() == name)
            .ok_or(OrderBookError::UnknownVenue {
                code: name.chars().next().unwrap_or('?'),
            })
    }

    /// Venue at a dense table index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Venue> {
        Venue::ALL.get(index).copied()
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Venue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.code().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Venue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VenueVisitor;

        impl Visitor<'_> for VenueVisitor {
            type Value = Venue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a one-character venue code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Venue, E>
            where
                E: de::Error,
            {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(code), None) => Venue::from_code(code)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self)),
                    _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
                }
            }
        }

        deserializer.deserialize_str(VenueVisitor)
    }
}
