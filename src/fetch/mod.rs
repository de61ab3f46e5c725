//! Boundary collaborators: the catalogue metadata lookup and the raw
//! resource download. The core transform only ever sees decoded rows.

pub mod catalogue;
pub mod resource;
