pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::ApiError;
use endpoints::ApiResponse;
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.pocket.example/v1";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(base_url: &str, token: &SecretString) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(token.expose_secret()),
        }
    }

    /// Send a request and return the raw response envelope
    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }

    /// Send a request and unwrap the `{success, data}` envelope.
    ///
    /// A `success: false` body is reported as [`ApiError::Unsuccessful`], so
    /// callers only ever see a `Result`.
    pub async fn fetch<R, T>(&self, request: R) -> Result<T, ApiError>
    where
        R: ApiRequest<Response = ApiResponse<T>>,
    {
        self.send(request).await?.into_result()
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn accounts() -> AccountRepository {
        AccountRepository::new()
    }

    pub fn postings() -> PostingRepository {
        PostingRepository::new()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
