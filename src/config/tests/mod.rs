//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, issue, and repository locator resolution tests
//! - `validation`: Tuning value validation tests

mod helpers;
mod validation;
