//! Utility modules for domcore.
//!
//! Contains the `DomString` text payload and XML name validation.

pub mod dom_string;
pub mod names;
