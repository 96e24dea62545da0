//! Pure domain logic for the gamehub platform: error taxonomy, shared type
//! aliases, role constants, and the game-type payload model. No I/O.

pub mod error;
pub mod games;
pub mod roles;
pub mod types;
