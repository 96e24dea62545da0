//! Typed `game_json` payloads, one variant per [`GameKind`].
//!
//! The stored JSON has no embedded tag; the owning game's template slug
//! selects the variant. Parsing is therefore always driven by a known
//! [`GameKind`]: strict for client input (full validation), lenient for
//! rows already in the database (missing list defaults to empty).
//!
//! Client list fields arrive either as a native JSON array or as a
//! JSON-encoded string containing one; [`coerce_list`] normalizes both
//! forms before typed parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GameKind;
use crate::error::CoreError;

/// One tile of a Flip Tiles board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Client-assigned identifier; absent for freshly authored tiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub color: String,
}

/// One question of a Quiz game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

/// One category of a Speed Sorting game, with the items that belong to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub items: Vec<String>,
}

/// One scrambled word of an Anagram game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnagramWord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One card pair of a Pair or No Pair game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub left: String,
    pub right: String,
    pub is_match: bool,
}

/// One sentence of a Type Speed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSentence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
}

/// Per-type game configuration, stored as the `games.game_json` column.
///
/// Serializes to the original wire shape (`{"tiles": [...]}` etc.); the
/// variant tag lives in the game's template slug, not in the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GamePayload {
    FlipTiles { tiles: Vec<Tile> },
    Quiz { questions: Vec<QuizQuestion> },
    SpeedSorting { categories: Vec<SortCategory> },
    Anagram { words: Vec<AnagramWord> },
    PairOrNoPair { pairs: Vec<CardPair> },
    TypeSpeed { sentences: Vec<TypeSentence> },
}

impl GamePayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            GamePayload::FlipTiles { .. } => GameKind::FlipTiles,
            GamePayload::Quiz { .. } => GameKind::Quiz,
            GamePayload::SpeedSorting { .. } => GameKind::SpeedSorting,
            GamePayload::Anagram { .. } => GameKind::Anagram,
            GamePayload::PairOrNoPair { .. } => GameKind::PairOrNoPair,
            GamePayload::TypeSpeed { .. } => GameKind::TypeSpeed,
        }
    }

    /// An empty payload of the given kind.
    pub fn empty(kind: GameKind) -> GamePayload {
        match kind {
            GameKind::FlipTiles => GamePayload::FlipTiles { tiles: vec![] },
            GameKind::Quiz => GamePayload::Quiz { questions: vec![] },
            GameKind::SpeedSorting => GamePayload::SpeedSorting { categories: vec![] },
            GameKind::Anagram => GamePayload::Anagram { words: vec![] },
            GameKind::PairOrNoPair => GamePayload::PairOrNoPair { pairs: vec![] },
            GameKind::TypeSpeed => GamePayload::TypeSpeed { sentences: vec![] },
        }
    }

    /// Lenient parse of a stored `game_json` value.
    ///
    /// Used when projecting rows for responses: a missing or malformed
    /// list degrades to the empty payload instead of failing the read.
    pub fn from_stored(kind: GameKind, stored: &Value) -> GamePayload {
        let list = stored.get(kind.payload_field()).cloned();
        match list {
            Some(list) => {
                Self::from_list_value(kind, list).unwrap_or_else(|_| GamePayload::empty(kind))
            }
            None => GamePayload::empty(kind),
        }
    }

    /// Strict parse of a client-supplied list field, including the
    /// string-or-array coercion and full validation.
    pub fn parse_client_field(kind: GameKind, raw: &str) -> Result<GamePayload, CoreError> {
        let list = coerce_list(kind, raw)?;
        let payload = Self::from_list_value(kind, list)
            .map_err(|e| CoreError::Validation(format!("Invalid {}: {e}", kind.payload_field())))?;
        payload.validate()?;
        Ok(payload)
    }

    /// Validate the payload's content rules.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            GamePayload::FlipTiles { tiles } => {
                require_min(tiles.len(), 2, "tiles")?;
                for tile in tiles {
                    require_non_empty(&tile.label, "Label")?;
                    require_non_empty(&tile.color, "Color")?;
                }
            }
            GamePayload::Quiz { questions } => {
                require_min(questions.len(), 1, "questions")?;
                for q in questions {
                    require_non_empty(&q.question, "Question")?;
                    if q.options.len() < 2 {
                        return Err(CoreError::Validation(
                            "Each question needs at least 2 options".into(),
                        ));
                    }
                    if q.answer_index >= q.options.len() {
                        return Err(CoreError::Validation(
                            "Answer index is out of range".into(),
                        ));
                    }
                }
            }
            GamePayload::SpeedSorting { categories } => {
                require_min(categories.len(), 2, "categories")?;
                for c in categories {
                    require_non_empty(&c.name, "Category name")?;
                    if c.items.is_empty() {
                        return Err(CoreError::Validation(
                            "Each category needs at least 1 item".into(),
                        ));
                    }
                }
            }
            GamePayload::Anagram { words } => {
                require_min(words.len(), 1, "words")?;
                for w in words {
                    require_non_empty(&w.word, "Word")?;
                }
            }
            GamePayload::PairOrNoPair { pairs } => {
                require_min(pairs.len(), 2, "pairs")?;
                for p in pairs {
                    require_non_empty(&p.left, "Left card")?;
                    require_non_empty(&p.right, "Right card")?;
                }
            }
            GamePayload::TypeSpeed { sentences } => {
                require_min(sentences.len(), 1, "sentences")?;
                for s in sentences {
                    require_non_empty(&s.text, "Sentence")?;
                }
            }
        }
        Ok(())
    }

    fn from_list_value(kind: GameKind, list: Value) -> Result<GamePayload, serde_json::Error> {
        Ok(match kind {
            GameKind::FlipTiles => GamePayload::FlipTiles {
                tiles: serde_json::from_value(list)?,
            },
            GameKind::Quiz => GamePayload::Quiz {
                questions: serde_json::from_value(list)?,
            },
            GameKind::SpeedSorting => GamePayload::SpeedSorting {
                categories: serde_json::from_value(list)?,
            },
            GameKind::Anagram => GamePayload::Anagram {
                words: serde_json::from_value(list)?,
            },
            GameKind::PairOrNoPair => GamePayload::PairOrNoPair {
                pairs: serde_json::from_value(list)?,
            },
            GameKind::TypeSpeed => GamePayload::TypeSpeed {
                sentences: serde_json::from_value(list)?,
            },
        })
    }
}

/// Normalize a client list field into a JSON array.
///
/// Accepts either a JSON array directly or a JSON string whose content is
/// itself a JSON array (form fields are often double-encoded by clients).
fn coerce_list(kind: GameKind, raw: &str) -> Result<Value, CoreError> {
    let field = kind.payload_field();
    let value: Value = serde_json::from_str(raw)
        .map_err(|_| CoreError::Validation(format!("Field '{field}' must be valid JSON")))?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|_| CoreError::Validation(format!("Field '{field}' must be valid JSON")))?,
        other => other,
    };

    if value.is_array() {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "Field '{field}' must be a JSON array"
        )))
    }
}

fn require_min(len: usize, min: usize, field: &str) -> Result<(), CoreError> {
    if len < min {
        return Err(CoreError::Validation(format!(
            "At least {min} {field} are required"
        )));
    }
    Ok(())
}

fn require_non_empty(value: &str, what: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{what} is required")));
    }
    Ok(())
}
