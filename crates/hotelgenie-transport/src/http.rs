//! HTTP backend implementation using `reqwest`.

use hotelgenie_protocol::{
    Codec, Credential, ErrorBody, JsonCodec, LoginRequest, LoginResponse,
    RegisterRequest, ValidateResponse,
};
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;

use crate::{
    AuthBackend, BackendConfig, LOGIN_PATH, REGISTER_PATH, TransportError,
    VALIDATE_TOKEN_PATH,
};

/// An [`AuthBackend`] that talks to the real REST backend over HTTP.
///
/// Cheap to clone: `reqwest::Client` is a handle to a shared pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Builds a client for the given backend.
    ///
    /// # Errors
    /// [`TransportError::Http`] if the TLS backend can't be initialised.
    pub fn new(config: BackendConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Http)?;
        tracing::debug!(base_url = %config.base_url, "HTTP backend ready");
        Ok(Self { client, config })
    }

    /// The config this backend was built with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

impl AuthBackend for HttpBackend {
    async fn validate_token(
        &self,
        credential: &Credential,
    ) -> Result<ValidateResponse, TransportError> {
        let response = self
            .client
            .post(self.config.endpoint(VALIDATE_TOKEN_PATH))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(credential.as_str())
            .send()
            .await
            .map_err(classify)?;

        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(classify)?;
        JsonCodec.decode(&body).map_err(TransportError::MalformedBody)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, TransportError> {
        let response = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(classify)?;
        JsonCodec.decode(&body).map_err(TransportError::MalformedBody)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.config.endpoint(REGISTER_PATH))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        ensure_success(response).await.map(drop)
    }
}

/// Passes 2xx responses through and turns everything else into
/// [`TransportError::Rejected`], keeping the error body's message.
async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The body is best-effort: a rejection without a readable body is
    // still a rejection.
    let message = match response.bytes().await {
        Ok(body) => JsonCodec
            .decode::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message),
        Err(_) => None,
    };

    tracing::debug!(status = status.as_u16(), "backend rejected request");
    Err(TransportError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(err)
    }
}
