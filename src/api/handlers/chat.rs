//! Chatbot proxy endpoint

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::envelope;
use crate::AppState;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct SolicitudChat {
    pub message: String,
    pub model: Option<String>,
    pub streaming: Option<bool>,
}

/// POST /api/chat - forward a message to the chatbot backend
pub async fn conversar(
    state: web::Data<AppState>,
    body: web::Json<SolicitudChat>,
) -> HttpResponse {
    let message = body.message.trim();
    if message.is_empty() {
        return envelope::invalido("El campo message es requerido");
    }

    let solicitud = json!({
        "message": message,
        "model": body.model,
        "streaming": body.streaming.unwrap_or(false),
    });

    match state.backend.chat(&solicitud).await {
        Ok(respuesta) => envelope::exito(respuesta, "Respuesta generada correctamente"),
        Err(e) => envelope::desde_error(&e),
    }
}
