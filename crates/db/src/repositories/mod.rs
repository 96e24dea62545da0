//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that participate in a service-owned transaction accept
//! `impl PgExecutor<'_>` so they run against either the pool or an open
//! transaction.

pub mod game_repo;
pub mod game_template_repo;
pub mod outbox_repo;
pub mod user_repo;

pub use game_repo::GameRepo;
pub use game_template_repo::GameTemplateRepo;
pub use outbox_repo::OutboxRepo;
pub use user_repo::UserRepo;
