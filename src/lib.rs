//! Command-line client for the ALM defect tracker.
//!
//! `alm-defect` signs in to an ALM instance over its REST API, lists domains,
//! defects, and releases, and reconciles delivery manifests: every defect a
//! manifest names is moved from one status into another.
//!
//! # Architecture
//!
//! The reconciliation workflow runs in a fixed order: resolve configuration,
//! parse the manifest, open a session, walk the defects one by one, and sign
//! out. The remote service sits behind the [`gateway::DefectGateway`] trait so
//! the workflow can be driven against a mock in tests.
//!
//! # Modules
//!
//! - [`api`]: One orchestration function per CLI command
//! - [`config`]: Configuration with first-wins precedence (CLI > env > file > defaults)
//! - [`error`]: Semantic error types for the application
//! - [`gateway`]: The ALM REST gateway and its wire types
//! - [`logging`]: Tracing subscriber setup
//! - [`manifest`]: Delivery manifest parsing
//! - [`reconcile`]: The defect status reconciliation engine
//! - [`session`]: Sign-in / sign-out bracket

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod manifest;
pub mod reconcile;
pub mod session;
