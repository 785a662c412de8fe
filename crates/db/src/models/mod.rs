//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches, with tri-state fields where an
//!   explicit JSON `null` (clear) must differ from an absent key (keep)

pub mod stage;
