//! Authenticated session bracket.
//!
//! [`Session::run`] signs in, drives the given action to completion, and
//! signs out again. Sign-out happens whether the action succeeds, fails, or
//! panics. If sign-in fails there is no session to close, so neither the
//! action nor sign-out is attempted.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;
use tracing::{debug, warn};

use crate::error::Result;
use crate::gateway::{Credentials, DefectGateway};

/// A gateway paired with the credentials that open a session on it.
pub struct Session<'a> {
    gateway: &'a dyn DefectGateway,
    credentials: &'a Credentials,
}

impl<'a> Session<'a> {
    /// Creates a session bracket. No request is sent until [`Session::run`].
    #[must_use]
    pub const fn new(gateway: &'a dyn DefectGateway, credentials: &'a Credentials) -> Self {
        Self {
            gateway,
            credentials,
        }
    }

    /// Returns the gateway actions run against.
    #[must_use]
    pub const fn gateway(&self) -> &'a dyn DefectGateway {
        self.gateway
    }

    /// Runs `action` inside a signed-in session.
    ///
    /// `action` is not polled until sign-in has succeeded. Sign-out failures
    /// are logged and never replace the action's result. A panic inside
    /// `action` resumes after sign-out has been attempted.
    ///
    /// # Errors
    ///
    /// Returns the sign-in error, or whatever error `action` produced.
    pub async fn run<T, F>(&self, action: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.gateway.sign_in(self.credentials).await?;
        debug!("session opened");

        let outcome = AssertUnwindSafe(action).catch_unwind().await;

        if let Err(error) = self.gateway.sign_out().await {
            warn!(%error, "sign-out failed");
        }

        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
