//! Strongly typed, zero-cost identifier wrappers and the message identity.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;
use std::str::FromStr;

use crate::DtnError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a mobile node.  Assigned once at construction and unique
    /// within a run; the default sequence starts at 1.
    pub struct NodeId(u32);
}

typed_id! {
    /// Per-source message sequence number.
    pub struct SeqNo(u32);
}

// ── MessageId ─────────────────────────────────────────────────────────────────

/// Identity of one message instance: `(source, destination, sequence)`.
///
/// The triple is the whole message as far as routing is concerned; there is
/// no payload.  Equality, ordering and hashing are structural, so a
/// `MessageId` can key every per-node buffer directly.
///
/// At trace boundaries the message is written as `source:destination:seq`
/// (raw integers, `:` delimiter).  [`Display`](fmt::Display) produces that
/// form and [`FromStr`] parses it back.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageId {
    pub source:      NodeId,
    pub destination: NodeId,
    pub seq:         SeqNo,
}

impl MessageId {
    /// Field delimiter of the flat trace encoding.
    pub const DELIMITER: char = ':';

    #[inline]
    pub fn new(source: NodeId, destination: NodeId, seq: SeqNo) -> Self {
        Self { source, destination, seq }
    }

    /// `true` if `node` is this message's final destination.
    #[inline]
    pub fn is_for(&self, node: NodeId) -> bool {
        self.destination == node
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.source.0,
            self.destination.0,
            self.seq.0,
            d = Self::DELIMITER,
        )
    }
}

impl FromStr for MessageId {
    type Err = DtnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(Self::DELIMITER);
        let mut next = |what: &str| -> Result<u32, DtnError> {
            let field = fields
                .next()
                .ok_or_else(|| DtnError::Parse(format!("message id {s:?}: missing {what}")))?;
            field.trim().parse::<u32>().map_err(|_| {
                DtnError::Parse(format!("message id {s:?}: invalid {what} {field:?}"))
            })
        };

        let source      = NodeId(next("source")?);
        let destination = NodeId(next("destination")?);
        let seq         = SeqNo(next("sequence")?);

        if fields.next().is_some() {
            return Err(DtnError::Parse(format!(
                "message id {s:?}: expected exactly three fields"
            )));
        }
        Ok(Self { source, destination, seq })
    }
}
