//! Core domain types
//!
//! This module contains the entities passed along the notification
//! pipeline. Each value is built once by its producing stage and handed
//! forward unchanged; nothing here performs I/O.

pub mod build;
pub mod commit;
