use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when a path or body identifier is not a well-formed UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedId(pub String);

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self { Self(Uuid::new_v4()) }

            pub fn parse(raw: &str) -> Result<Self, MalformedId> {
                Uuid::parse_str(raw.trim()).map(Self).map_err(|_| MalformedId(raw.to_string()))
            }
        }

        impl Default for $name {
            fn default() -> Self { Self::new() }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
        }
    };
}

entity_id!(
    /// Identifier of a tracked task.
    TaskId
);
entity_id!(ProjectId);
entity_id!(TodoId);
entity_id!(
    /// Identifier yielded by the identity provider; every owned row carries one.
    UserId
);
