//! Shared type definitions for the projects viewer.
//!
//! The REST middleware lists projects as a keyed JSON collection. This crate
//! owns the typed view of that data: the [`Project`] record, its
//! [`ProjectId`], and the [`ListingPayload`] variant that turns a response
//! body into records.
//!
//! # Modules
//!
//! - [`error`] -- Errors raised while turning a payload into records
//! - [`project`] -- The project record and its identifier
//! - [`listing`] -- Classification of `GetAll` bodies and the key walk

pub mod error;
pub mod listing;
pub mod project;

pub use error::TypesError;
pub use listing::{ListingPayload, parse_start_time};
pub use project::{Project, ProjectId};
