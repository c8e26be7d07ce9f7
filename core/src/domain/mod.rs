//! Domain layer
//!
//! Contains the copilot's core concepts with no I/O.
//! - `entities`: Modules, Captain's Log state, memories, changelog, health, evolution reports
//! - `ports`: Trait definitions for persistence and LLM access

pub mod entities;
pub mod ports;
