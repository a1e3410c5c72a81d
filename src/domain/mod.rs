//! Core domain models for scan jobs

pub mod entities;
pub mod target;
pub mod value_objects;
