//! Unit tests for the ALM configuration system.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Basic type and serialisation tests
//! - [`validation`] - Endpoint validation tests
//! - [`resolve_tests`] - First-wins layer resolution tests
//! - [`env_tests`] - Environment variable table tests
//! - [`file_tests`] - Configuration file loading tests
