//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// File paths picked by the user in the browser frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPathsRequest {
    pub selected_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPathsResponse {
    pub selected_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Directory the frontend should open after login.
    pub home_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn error_response_round_trip_json() {
        let response = ErrorResponse {
            code: "not_found".to_string(),
            message: "resource missing".to_string(),
        };

        let json = serde_json::to_string(&response).expect("serialize error response");
        let decoded: ErrorResponse =
            serde_json::from_str(&json).expect("deserialize error response");

        assert_eq!(decoded, response);
    }

    #[test]
    fn selected_paths_round_trip_json() {
        let request = SelectedPathsRequest {
            selected_files: vec!["/srv/files/a.txt".to_string()],
        };

        let json = serde_json::to_string(&request).expect("serialize selected paths");
        let decoded: SelectedPathsRequest =
            serde_json::from_str(&json).expect("deserialize selected paths");

        assert_eq!(decoded, request);
    }
}
