use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::CascadeReport;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: String, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message,
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The acting user, passed explicitly on every request. Authentication
/// itself lives outside this service.
#[derive(Debug, Deserialize)]
pub struct OwnerQueryDto {
    pub user_id: Uuid,
}

/// Outcome of a cascading deletion: `completed` only when every sub-step
/// succeeded; otherwise the failures are listed.
#[derive(Debug, Serialize)]
pub struct CascadeReportDto {
    pub completed: bool,
    pub failures: Vec<String>,
}

impl From<CascadeReport> for CascadeReportDto {
    fn from(report: CascadeReport) -> Self {
        Self {
            completed: report.is_clean(),
            failures: report.failures().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}
