//! Typed resource identifiers
//!
//! Each resource kind has its own id namespace: an `ImageId(3)` and a
//! `RawId(3)` never refer to the same thing. Ids are plain lookup keys,
//! compared and hashed by value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declare a typed id newtype over `u32`.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id!(
    /// Typed key for image resources
    ImageId
);
resource_id!(
    /// Typed key for audio resources
    AudioId
);
resource_id!(
    /// Typed key for font resources
    FontId
);
resource_id!(
    /// Typed key for shader resources
    ShaderId
);
resource_id!(
    /// Typed key for raw byte resources
    RawId
);
