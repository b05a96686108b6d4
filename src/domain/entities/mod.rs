//! Core domain entities representing the portfolio content model.
//!
//! Entities are plain data structures deserialized from the content store;
//! the only behaviour here is project filtering.
//!
//! # Entity Types
//!
//! - [`About`], [`Skill`], [`Experience`], [`Education`], [`Project`],
//!   [`Tool`], [`ContactInfo`] - one per content document type
//! - [`Portfolio`] - the aggregate served by the portfolio API

pub mod portfolio;

pub use portfolio::{
    About, AssetRef, ContactInfo, Education, Experience, ImageRef, Portfolio, Project,
    ProjectFilter, Skill, Tool,
};
