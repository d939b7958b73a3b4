use crate::api::error::ApiError;
use crate::api::types::{Credentials, DashboardMetrics, LoginResponse, StudentRecord};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SchoolApi: Send + Sync {
    /// Base URL requests are sent to.
    fn base_url(&self) -> String;

    /// Fetch the aggregate figures for the dashboard page.
    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError>;

    /// Fetch the ordered list of student records.
    async fn students(&self) -> Result<Vec<StudentRecord>, ApiError>;

    /// Submit credentials. A `success: false` reply is `Ok`; only transport,
    /// status and decoding problems are errors.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// End the server-side session.
    async fn logout(&self) -> Result<(), ApiError>;
}
