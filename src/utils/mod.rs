//! Pure helper functions shared by the services and the HTTP layer.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation and normalization

pub mod code_generator;
pub mod url_validator;
