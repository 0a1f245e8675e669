//! Herald Core
//!
//! Core types and pure logic for the Herald build-notification pipeline.
//!
//! This crate contains:
//! - Domain types: the entities handed from stage to stage (`BuildInfo`,
//!   `RepoRef`, `CommitInfo`)
//! - Message composition: the pure status-sentence renderer

pub mod domain;
pub mod message;
