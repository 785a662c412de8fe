//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept an executor (`&PgPool`, or `&mut PgConnection` for the
//! methods meant to run inside a caller-owned transaction).

pub mod stage_repo;

pub use stage_repo::StageRepo;
