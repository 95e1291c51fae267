//! Quote submission endpoint

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::envelope;
use crate::AppState;

/// Quote request as submitted from the storefront form
#[derive(Debug, Deserialize)]
pub struct Cotizacion {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub direccion: Option<String>,
    pub provincia: Option<String>,
    pub municipio: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub consumo_mensual_kwh: Option<f64>,
    pub comentarios: Option<String>,
}

impl Cotizacion {
    fn validar(&self) -> Result<(), &'static str> {
        if self.nombre.trim().is_empty() {
            return Err("El campo nombre es requerido");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("El campo email es requerido");
        }
        if self.telefono.trim().is_empty() {
            return Err("El campo telefono es requerido");
        }
        if self.latitud.is_none() || self.longitud.is_none() {
            return Err("La ubicación (latitud y longitud) es requerida");
        }
        Ok(())
    }
}

/// POST /api/cotizacion - validate and forward a quote request
pub async fn enviar(
    state: web::Data<AppState>,
    body: web::Json<Cotizacion>,
) -> HttpResponse {
    if let Err(motivo) = body.validar() {
        return envelope::invalido(motivo);
    }

    let payload = json!({
        "nombre": body.nombre.trim(),
        "email": body.email.trim(),
        "telefono": body.telefono.trim(),
        "direccion": body.direccion,
        "provincia": body.provincia,
        "municipio": body.municipio,
        "latitud": body.latitud,
        "longitud": body.longitud,
        "consumo_mensual_kwh": body.consumo_mensual_kwh,
        "comentarios": body.comentarios,
        "fecha_solicitud": Utc::now().to_rfc3339(),
    });

    match state.backend.enviar_cotizacion(&payload).await {
        Ok(resultado) => {
            info!(email = %body.email.trim(), "quote request forwarded");
            envelope::exito(resultado, "Cotización enviada correctamente")
        }
        Err(e) => envelope::desde_error(&e),
    }
}
