//! Core use-case services.
//!
//! # Responsibility
//! - Own note lifecycle, selection and editor session state.
//! - Keep presentation layers decoupled from storage details.

pub mod clock;
pub mod editor;
pub mod error;
pub mod note_store;
pub mod preview;
pub mod selection;
