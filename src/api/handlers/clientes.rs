//! Client verification and statistics endpoints

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::envelope;
use crate::AppState;

/// Verification request body
#[derive(Debug, Deserialize)]
pub struct SolicitudVerificacion {
    /// Client identifier (contract number or phone)
    pub identifier: String,
}

/// Query filters for the installed-kW statistics
#[derive(Debug, Deserialize)]
pub struct FiltroEstadisticas {
    pub provincia: Option<String>,
    pub municipio: Option<String>,
}

/// POST /api/clientes/verificar - passthrough client lookup
pub async fn verificar(
    state: web::Data<AppState>,
    body: web::Json<SolicitudVerificacion>,
) -> HttpResponse {
    let identifier = body.identifier.trim();
    if identifier.is_empty() {
        return envelope::invalido("El campo identifier es requerido");
    }

    match state
        .backend
        .verificar_cliente(&json!({ "identifier": identifier }))
        .await
    {
        Ok(cliente) => envelope::exito(cliente, "Cliente verificado correctamente"),
        Err(e) => envelope::desde_error(&e),
    }
}

/// GET /api/clientes/estadisticas/kw-instalados-por-municipio
pub async fn kw_instalados_por_municipio(
    state: web::Data<AppState>,
    query: web::Query<FiltroEstadisticas>,
) -> HttpResponse {
    let resultado = state
        .backend
        .kw_instalados_por_municipio(
            query.provincia.as_deref(),
            query.municipio.as_deref(),
        )
        .await;

    match resultado {
        Ok(estadisticas) => {
            envelope::exito(estadisticas, "Estadísticas obtenidas correctamente")
        }
        Err(e) => envelope::desde_error(&e),
    }
}
