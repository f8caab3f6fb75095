//! Remote defect gateway for the ALM REST API.
//!
//! This module exposes the operations the reconciliation workflow consumes
//! (sign-in, sign-out, fetching and replacing defects, listing domains) plus
//! the defect and release listings used by the CLI, behind the
//! [`DefectGateway`] trait. Production code uses [`AlmClient`], while tests
//! inject mock implementations via `mockall`.
//!
//! Any response outside the 2xx range is logged as a warning but does not by
//! itself fail the call: the body is still decoded and returned. Only a
//! transport failure or an undecodable body is an error.

mod client;
mod endpoint;
mod types;

use std::future::Future;
use std::pin::Pin;

use crate::error::GatewayError;

pub use client::AlmClient;
pub use endpoint::{
    DOMAINS_PATH, Endpoint, SIGN_IN_PATH, SIGN_OUT_PATH, defect_path, defects_path, releases_path,
};
pub use types::{
    Credentials, Defect, Domain, ProjectScope, Release, decode_defect, decode_results,
};

/// A boxed future for async trait methods.
///
/// This type alias enables `mockall::automock` compatibility and trait object
/// usage for async methods in [`DefectGateway`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations offered by a remote ALM instance.
///
/// Session state (cookies) is managed by the implementation: `sign_in` must
/// succeed before any other call.
#[cfg_attr(test, mockall::automock)]
pub trait DefectGateway: Send + Sync {
    /// Authenticates with HTTP Basic credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Auth` if the server rejects the credentials and
    /// `GatewayError::Transport` if it cannot be reached.
    fn sign_in(&self, credentials: &Credentials) -> BoxFuture<'_, Result<(), GatewayError>>;

    /// Closes the session.
    ///
    /// A non-success status is logged only.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the server cannot be reached.
    fn sign_out(&self) -> BoxFuture<'_, Result<(), GatewayError>>;

    /// Fetches one defect.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` or `GatewayError::Decode`.
    fn get_defect(
        &self,
        scope: &ProjectScope,
        id: u64,
    ) -> BoxFuture<'_, Result<Defect, GatewayError>>;

    /// Replaces a defect record and returns the stored version.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` or `GatewayError::Decode`.
    fn put_defect(
        &self,
        scope: &ProjectScope,
        defect: &Defect,
    ) -> BoxFuture<'_, Result<Defect, GatewayError>>;

    /// Lists every domain visible to the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` or `GatewayError::Decode`.
    fn list_domains(&self) -> BoxFuture<'_, Result<Vec<Domain>, GatewayError>>;

    /// Lists the defects of a project.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` or `GatewayError::Decode`.
    fn list_defects(
        &self,
        scope: &ProjectScope,
    ) -> BoxFuture<'_, Result<Vec<Defect>, GatewayError>>;

    /// Lists the releases of a project.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` or `GatewayError::Decode`.
    fn list_releases(
        &self,
        scope: &ProjectScope,
    ) -> BoxFuture<'_, Result<Vec<Release>, GatewayError>>;
}
