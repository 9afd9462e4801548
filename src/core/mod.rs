//! Registry core - relationship invariants and the per-entity services.
//!
//! Each service module exposes the same CRUD contract (`find_by_id`, `find_all`, `save`,
//! `update`, `delete_by_id`) plus its relationship operations. Mutations run inside one
//! database transaction; reads go straight to the connection.

pub mod course;
pub mod relationship;
pub mod student;
pub mod teacher;
