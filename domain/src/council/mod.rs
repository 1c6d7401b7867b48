//! Council domain model - members, configuration, generation options

pub mod entities;
pub mod value_objects;
