//! Type-safe identifiers for every record the gateway handles.
//!
//! Each identifier is a newtype wrapper around [`uuid::Uuid`] (v4) so that,
//! for example, a [`FighterId`] can never be passed where a [`MatchId`] is
//! expected. User, character, and game identifiers are owned by external
//! systems (auth and game catalog) and are opaque to this service.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a tournament. Dictionary key in the
    /// [`super::TournamentRegistry`].
    TournamentId
}

define_id! {
    /// Unique identifier for a seeded fighter (participant) within a
    /// tournament. Distinct from the owning [`UserId`]: the same user may
    /// enter several tournaments, producing one fighter each time.
    FighterId
}

define_id! {
    /// Unique identifier for a match node in a bracket.
    MatchId
}

define_id! {
    /// Unique identifier for a recorded decision (fight outcome).
    DecisionId
}

define_id! {
    /// Identifier of a user in the external auth system.
    UserId
}

define_id! {
    /// Identifier of a playable character in the external game catalog.
    CharacterId
}

define_id! {
    /// Identifier of a game in the external game catalog.
    GameId
}
