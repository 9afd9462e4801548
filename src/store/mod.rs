//! Entity store - explicit repository functions over SeaORM.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so the registry services
//! can run several of them against one `DatabaseTransaction`. Nothing here decides
//! whether a missing row is an error: lookups return `Option` and the services translate
//! absence into [`crate::errors::Error::NotFound`].

pub mod courses;
pub mod links;
pub mod students;
pub mod teachers;
