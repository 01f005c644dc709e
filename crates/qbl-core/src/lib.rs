//! qbl-core — the Question Bank Language engine.
//!
//! This crate defines the question data model, the line-oriented QBL parser,
//! the question bank with validation, and the tag-constrained selection and
//! ordering algorithms that the rest of the toolkit builds on.

pub mod bank;
pub mod error;
pub mod model;
pub mod order;
pub mod parser;
pub mod select;
