//! Store identifiers
//!
//! Ids are issued by the relational store; the engine only carries them
//! through into the progress records it returns.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw store id
            #[inline]
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw store id
            #[inline]
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

store_id!(
    /// Lot identifier
    LotId
);
store_id!(
    /// Plan identifier
    PlanId
);
store_id!(
    /// Project identifier
    ProjectId
);
store_id!(
    /// Owner identifier
    OwnerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_and_parse() {
        let id = LotId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<LotId>().unwrap(), id);
        assert!("lot-42".parse::<LotId>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let json = serde_json::to_string(&PlanId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: PlanId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(), 7);
    }
}
