use growth_core::GrowthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Error body. `kind` is one of `validation`, `repository`, `computation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(err: &GrowthError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError::from(err)),
        }
    }
}

impl From<&GrowthError> for ApiError {
    fn from(err: &GrowthError) -> Self {
        let field = match err {
            GrowthError::Validation { field, .. } => Some(field.to_string()),
            _ => None,
        };
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            field,
        }
    }
}
