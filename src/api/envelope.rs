//! Uniform JSON response envelope
//!
//! Every route handler answers `{success, message?, data?}`. Upstream error
//! statuses are mirrored to the caller where known; anything else is a 500.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::backend::BackendError;

/// Response envelope shared by all endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 200 with data
pub fn exito<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiEnvelope {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
    })
}

/// Failure shape: the envelope with `data` always absent
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

/// 400 for rejected input, before any backend call
pub fn invalido(message: &str) -> HttpResponse {
    fallo(400, message.to_string())
}

/// Failure with an explicit status
pub fn fallo(status: u16, message: String) -> HttpResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorEnvelope {
        success: false,
        message,
    })
}

/// Map a backend error to the envelope. Configuration problems are never
/// detailed to the caller; upstream bodies are surfaced as-is.
pub fn desde_error(err: &BackendError) -> HttpResponse {
    match err {
        BackendError::NotConfigured(detail) => {
            tracing::error!(detail = %detail, "backend not configured");
            fallo(500, "Error de configuración del servidor".to_string())
        }
        BackendError::Api { status, message } => {
            tracing::error!(status = status, body = %message, "backend returned an error");
            fallo(*status, message.clone())
        }
        other => {
            tracing::error!(error = %other, "backend call failed");
            fallo(500, other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_is_mirrored() {
        let response = desde_error(&BackendError::Api {
            status: 404,
            message: "no existe".to_string(),
        });
        assert_eq!(response.status().as_u16(), 404);
    }

    #[test]
    fn test_configuration_error_is_opaque_500() {
        let response =
            desde_error(&BackendError::NotConfigured("SUNCAR_BACKEND__URL".to_string()));
        assert_eq!(response.status().as_u16(), 500);
    }

    #[test]
    fn test_unknown_status_falls_back_to_500() {
        let response = fallo(1000, "fuera de rango".to_string());
        assert_eq!(response.status().as_u16(), 500);
    }
}
