//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/transport layers decoupled from storage details.

pub mod editor;
pub mod history;
pub mod impact;
pub mod note_service;
pub mod resolver;
