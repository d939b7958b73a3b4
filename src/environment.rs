use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the backend the client talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on the local machine with the default development port.
    #[default]
    Local,
    /// Any other backend, addressed by its base URL.
    Custom(String),
}

impl Environment {
    /// Returns the backend base URL associated with the environment.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom(url) => url.trim_end_matches('/').to_string(),
        }
    }

    /// Value stored in the config file; parses back to the same environment.
    pub fn config_value(&self) -> String {
        match self {
            Environment::Local => "local".to_string(),
            Environment::Custom(_) => self.base_url(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "local" => Ok(Environment::Local),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom(trimmed.to_string()))
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}
