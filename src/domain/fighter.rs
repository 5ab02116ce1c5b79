//! Seeded fighter (tournament participant) record.

use serde::Serialize;
use utoipa::ToSchema;

use super::ids::{CharacterId, FighterId, TournamentId, UserId};

/// A seeded participant in one tournament.
///
/// Created when a user joins and immutable thereafter. The same user joining
/// two tournaments produces two distinct fighters. `display_name` and
/// `character_name` are captured at join time because the user and character
/// catalogs live in external systems; the statistics bundle reports them as
/// the fighter's display identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Fighter {
    /// Unique fighter identifier.
    pub id: FighterId,
    /// Tournament this fighter belongs to.
    pub tournament_id: TournamentId,
    /// Owning user in the external auth system.
    pub user_id: UserId,
    /// Selected character in the external game catalog.
    pub character_id: CharacterId,
    /// User's display name at join time.
    pub display_name: String,
    /// Selected character's name at join time.
    pub character_name: String,
    /// Zero-based join order. Dense and unique per tournament, in
    /// `[0, 2P)`; round-1 match `k` pairs seeds `2k` and `2k + 1`.
    pub seed_index: u32,
}
