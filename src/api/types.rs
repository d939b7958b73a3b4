//! Wire shapes exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Aggregate figures shown on the dashboard page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardMetrics {
    pub total_classes: u64,
    pub total_students: u64,
    /// Currency amount; the backend may send an integer or a float.
    pub fees_collected: f64,
    pub fees_due: u64,
}

/// One row of the students list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentRecord {
    pub roll_number: String,
    pub name: String,
    pub class_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: String,
}

/// Login form contents. Deliberately not `Clone`: one value per submission.
#[derive(Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "LoginReply")]
pub struct LoginResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Reply as sent on the wire. Some backends report the reason under
/// `error`, some under `message`, some under both.
#[derive(Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<LoginReply> for LoginResponse {
    fn from(reply: LoginReply) -> Self {
        Self {
            success: reply.success,
            message: reply
                .message
                .filter(|m| !m.trim().is_empty())
                .or(reply.error),
        }
    }
}
