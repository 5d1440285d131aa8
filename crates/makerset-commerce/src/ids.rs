//! Newtype IDs for type-safe identifiers.
//!
//! The backend keys everything by integer; wrapping them keeps a set ID from
//! being passed where a provider ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw integer value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// A kit ("set") in the catalog.
    SetId
);
define_id!(
    /// A third-party vendor listing kits.
    ProviderId
);
define_id!(
    /// A placed order.
    OrderId
);
define_id!(
    /// A part tracked by inventory.
    PartId
);
