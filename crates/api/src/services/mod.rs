//! Business-rule layer.
//!
//! Services are stateless modules of free functions taking explicit
//! collaborator handles (`&DbPool`, `&dyn Storage`), so tests can
//! substitute either side. All authorization and consistency checks for
//! an operation run inside one database transaction.

pub mod games;
pub mod outbox;
