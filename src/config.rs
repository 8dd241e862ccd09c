//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default request body limit (25 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Intake configuration
    pub intake: IntakeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Intake configuration
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Which upload endpoints this process serves
    pub service: ServiceSelection,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

/// Upload endpoints served by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSelection {
    /// Only POST /upload_project_file
    Projects,
    /// Only POST /upload_resource_file
    Resources,
    /// Both upload endpoints
    All,
}

impl ServiceSelection {
    /// Whether the project endpoint is mounted
    pub fn serves_projects(&self) -> bool {
        matches!(self, ServiceSelection::Projects | ServiceSelection::All)
    }

    /// Whether the resource endpoint is mounted
    pub fn serves_resources(&self) -> bool {
        matches!(self, ServiceSelection::Resources | ServiceSelection::All)
    }

    /// Port used when PORT is not set
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceSelection::Projects => 8000,
            ServiceSelection::Resources => 5000,
            ServiceSelection::All => 8080,
        }
    }
}

impl FromStr for ServiceSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projects" | "project" => Ok(ServiceSelection::Projects),
            "resources" | "resource" => Ok(ServiceSelection::Resources),
            "all" => Ok(ServiceSelection::All),
            other => Err(format!("Unknown intake service: {}", other)),
        }
    }
}

impl fmt::Display for ServiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceSelection::Projects => "projects",
            ServiceSelection::Resources => "resources",
            ServiceSelection::All => "all",
        };
        f.write_str(name)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            service: ServiceSelection::All,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let service = env::var("INTAKE_SERVICE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ServiceSelection::All);

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(|| service.default_port()),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            intake: IntakeConfig {
                service,
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|b| b.parse().ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
