//! School Admin API Client
//!
//! A JSON client for the school-administration backend. The session cookie
//! set by the login endpoint is kept for the lifetime of the client.

use crate::api::SchoolApi;
use crate::api::error::ApiError;
use crate::api::types::{Credentials, DashboardMetrics, LoginResponse, StudentRecord};
use crate::consts::cli_consts::{endpoints, http};
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("school-admin/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl SchoolApi for ApiClient {
    fn base_url(&self) -> String {
        self.environment.base_url()
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.get_request(endpoints::DASHBOARD).await
    }

    async fn students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        self.get_request(endpoints::STUDENTS).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.post_request(endpoints::LOGIN, credentials).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.build_url(endpoints::LOGOUT);
        let response = self.client.get(&url).send().await?;
        Self::handle_response_status(response).await?;
        Ok(())
    }
}
