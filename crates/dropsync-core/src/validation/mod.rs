//! Validation modules

pub mod file;

pub use file::{default_type_rules, TypeRule, UploadPolicy, ValidationIssue};
