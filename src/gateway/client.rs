//! `reqwest`-backed implementation of [`DefectGateway`].

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info, warn};

use crate::error::GatewayError;

use super::{
    BoxFuture, Credentials, DOMAINS_PATH, Defect, DefectGateway, Domain, Endpoint, ProjectScope,
    Release, SIGN_IN_PATH, SIGN_OUT_PATH, decode_defect, decode_results, defect_path,
    defects_path, releases_path,
};

/// Timeout applied to every request, from connect to the end of the body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Production gateway talking to an ALM instance over HTTP.
///
/// The underlying client keeps a cookie store, which carries the session
/// established by [`sign_in`](DefectGateway::sign_in) to later requests.
pub struct AlmClient {
    client: Client,
    endpoint: Endpoint,
}

impl AlmClient {
    /// Creates a client for the given endpoint.
    ///
    /// With `insecure` set, TLS certificates are not verified.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::ClientSetup` if the HTTP client cannot be built
    /// (for example, due to TLS initialisation failure).
    pub fn new(endpoint: Endpoint, insecure: bool) -> Result<Self, GatewayError> {
        if insecure {
            warn!("TLS certificate verification is disabled");
        }
        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(insecure)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ClientSetup {
                message: e.to_string(),
            })?;
        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint this client talks to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn get_json(&self, path: &str) -> (String, RequestBuilder) {
        let url = self.endpoint.url(path);
        let request = self.client.get(&url).header(ACCEPT, "application/json");
        (url, request)
    }

    /// Sends a request and returns its status and body.
    async fn send(request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), GatewayError> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        Ok((status, body.to_vec()))
    }

    /// Sends a request and returns its body whatever the status.
    async fn fetch(
        method: &str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, GatewayError> {
        debug!(method, url, "sending request");
        let (status, body) = Self::send(request).await?;
        if status.is_success() {
            debug!(method, url, status = status.as_u16(), "request completed");
        } else {
            warn!(method, url, status = status.as_u16(), "unexpected http status");
        }
        Ok(body)
    }
}

fn transport(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: error.to_string(),
    }
}

impl DefectGateway for AlmClient {
    fn sign_in(&self, credentials: &Credentials) -> BoxFuture<'_, Result<(), GatewayError>> {
        let url = self.endpoint.url(SIGN_IN_PATH);
        let username = String::from(credentials.username());
        let request = self
            .client
            .get(&url)
            .basic_auth(credentials.username(), Some(credentials.password()));

        Box::pin(async move {
            info!(%username, "signing in");
            debug!(method = "GET", %url, "sending request");
            let (status, _) = Self::send(request).await?;
            if status != StatusCode::OK {
                return Err(GatewayError::Auth {
                    message: status.to_string(),
                });
            }
            debug!(%status, "signed in");
            Ok(())
        })
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<(), GatewayError>> {
        let url = self.endpoint.url(SIGN_OUT_PATH);
        let request = self.client.get(&url);

        Box::pin(async move {
            info!("signing out");
            debug!(method = "GET", %url, "sending request");
            let (status, _) = Self::send(request).await?;
            if status != StatusCode::OK {
                warn!(
                    status = status.as_u16(),
                    "expected http status code 200 on sign-out"
                );
            }
            Ok(())
        })
    }

    fn get_defect(
        &self,
        scope: &ProjectScope,
        id: u64,
    ) -> BoxFuture<'_, Result<Defect, GatewayError>> {
        let (url, request) = self.get_json(&defect_path(scope, id));

        Box::pin(async move {
            let body = Self::fetch("GET", &url, request).await?;
            decode_defect(&body)
        })
    }

    fn put_defect(
        &self,
        scope: &ProjectScope,
        defect: &Defect,
    ) -> BoxFuture<'_, Result<Defect, GatewayError>> {
        let url = self.endpoint.url(&defect_path(scope, defect.id));
        let request = self
            .client
            .put(&url)
            .header(ACCEPT, "application/json")
            .json(defect);

        Box::pin(async move {
            let body = Self::fetch("PUT", &url, request).await?;
            decode_defect(&body)
        })
    }

    fn list_domains(&self) -> BoxFuture<'_, Result<Vec<Domain>, GatewayError>> {
        let (url, request) = self.get_json(DOMAINS_PATH);

        Box::pin(async move {
            let body = Self::fetch("GET", &url, request).await?;
            decode_results(&body)
        })
    }

    fn list_defects(
        &self,
        scope: &ProjectScope,
    ) -> BoxFuture<'_, Result<Vec<Defect>, GatewayError>> {
        let (url, request) = self.get_json(&defects_path(scope));

        Box::pin(async move {
            let body = Self::fetch("GET", &url, request).await?;
            decode_results(&body)
        })
    }

    fn list_releases(
        &self,
        scope: &ProjectScope,
    ) -> BoxFuture<'_, Result<Vec<Release>, GatewayError>> {
        let (url, request) = self.get_json(&releases_path(scope));

        Box::pin(async move {
            let body = Self::fetch("GET", &url, request).await?;
            decode_results(&body)
        })
    }
}
