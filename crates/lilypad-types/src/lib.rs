//! Foundation types for lilypad.
//!
//! This crate contains the platform-agnostic types shared by all lilypad
//! crates: input buttons, RGB565 colours, launcher configuration and the
//! error type.

pub mod color;
pub mod config;
pub mod error;
pub mod input;
