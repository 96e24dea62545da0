//! Game-type model shared by every game-list module.
//!
//! A [`GameKind`] identifies one of the platform's game types by its
//! template slug. The per-type configuration stored in `games.game_json`
//! is modelled as the [`payload::GamePayload`] tagged union, selected by
//! the template slug rather than an embedded tag.

pub mod payload;

use crate::types::DbId;

/// The game types known to the platform, one per `game_templates` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Quiz,
    FlipTiles,
    SpeedSorting,
    Anagram,
    PairOrNoPair,
    TypeSpeed,
}

impl GameKind {
    /// All kinds, in the order their routers are mounted.
    pub const ALL: &'static [GameKind] = &[
        GameKind::Quiz,
        GameKind::FlipTiles,
        GameKind::SpeedSorting,
        GameKind::Anagram,
        GameKind::PairOrNoPair,
        GameKind::TypeSpeed,
    ];

    /// Template slug, also the route mount point under `/games`.
    pub fn slug(self) -> &'static str {
        match self {
            GameKind::Quiz => "quiz",
            GameKind::FlipTiles => "flip-tiles",
            GameKind::SpeedSorting => "speed-sorting",
            GameKind::Anagram => "anagram",
            GameKind::PairOrNoPair => "pair-or-no-pair",
            GameKind::TypeSpeed => "type-speed",
        }
    }

    /// Human-readable name used in response messages.
    pub fn display_name(self) -> &'static str {
        match self {
            GameKind::Quiz => "Quiz",
            GameKind::FlipTiles => "Flip Tiles",
            GameKind::SpeedSorting => "Speed Sorting",
            GameKind::Anagram => "Anagram",
            GameKind::PairOrNoPair => "Pair or No Pair",
            GameKind::TypeSpeed => "Type Speed",
        }
    }

    /// Name of the form field (and `game_json` key) carrying the payload list.
    pub fn payload_field(self) -> &'static str {
        match self {
            GameKind::Quiz => "questions",
            GameKind::FlipTiles => "tiles",
            GameKind::SpeedSorting => "categories",
            GameKind::Anagram => "words",
            GameKind::PairOrNoPair => "pairs",
            GameKind::TypeSpeed => "sentences",
        }
    }

    /// Resolve a kind from a template slug.
    pub fn from_slug(slug: &str) -> Option<GameKind> {
        GameKind::ALL.iter().copied().find(|k| k.slug() == slug)
    }

    /// Blob-store prefix for a game's uploaded files.
    ///
    /// The game id is generated before the first upload, so the prefix is
    /// stable and collision-free for the lifetime of the game.
    pub fn storage_prefix(self, game_id: DbId) -> String {
        format!("game/{}/{}", self.slug(), game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_slug(kind.slug()), Some(*kind));
        }
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(GameKind::from_slug("tetris"), None);
    }

    #[test]
    fn test_storage_prefix_contains_slug_and_id() {
        let id = uuid::Uuid::new_v4();
        let prefix = GameKind::FlipTiles.storage_prefix(id);
        assert_eq!(prefix, format!("game/flip-tiles/{id}"));
    }
}
