//! Shared utilities

pub mod patterns;
pub mod string;
