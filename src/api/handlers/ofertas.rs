//! Offer endpoints: simplified list, detail by id, and the recommender

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::envelope::{self, ApiEnvelope, ErrorEnvelope};
use crate::backend::mapper::{oferta_detalle, oferta_resumen};
use crate::backend::materials::mapa_fotos_materiales;
use crate::backend::recommender::{self, Recomendacion};
use crate::backend::terms::garantias_activas;
use crate::backend::BackendError;
use crate::domain::OfertaPublica;
use crate::AppState;

/// Recommendation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConsultaRecomendacion {
    /// Free-text customer query, e.g. "kit para una casa con 2 aires"
    pub texto: String,
}

/// GET /api/ofertas/simplified - normalized offer list without detail fields
#[utoipa::path(
    get,
    path = "/api/ofertas/simplified",
    tag = "ofertas",
    responses(
        (status = 200, description = "Normalized offer list, inactive offers included with is_active=false", body = ApiEnvelope<Vec<OfertaPublica>>),
        (status = 500, description = "Backend unavailable or misconfigured", body = ErrorEnvelope)
    )
)]
pub async fn listar_simplificadas(state: web::Data<AppState>) -> HttpResponse {
    let confecciones = match state.backend.confecciones().await {
        Ok(c) => c,
        Err(e) => return envelope::desde_error(&e),
    };

    let ofertas: Vec<OfertaPublica> = confecciones.iter().map(oferta_resumen).collect();
    info!(ofertas = ofertas.len(), "serving simplified offer list");
    envelope::exito(ofertas, "Ofertas obtenidas correctamente")
}

/// GET /api/ofertas/{id} - offer detail with warranties and resolved items
#[utoipa::path(
    get,
    path = "/api/ofertas/{id}",
    tag = "ofertas",
    params(("id" = String, Path, description = "Offer identifier")),
    responses(
        (status = 200, description = "Offer detail", body = ApiEnvelope<OfertaPublica>),
        (status = 404, description = "Offer does not exist", body = ErrorEnvelope)
    )
)]
pub async fn obtener_oferta(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    if id.trim().is_empty() {
        return envelope::invalido("El identificador de la oferta es requerido");
    }

    let confeccion = match state.backend.confeccion(&id).await {
        Ok(c) => c,
        Err(BackendError::Api { status: 404, .. }) => {
            return envelope::fallo(404, "Oferta no encontrada".to_string());
        }
        Err(e) => return envelope::desde_error(&e),
    };

    // base() cannot fail here, the fetch above already needed it
    let base = match state.backend.base() {
        Ok(b) => b.to_string(),
        Err(e) => return envelope::desde_error(&e),
    };

    // Warranties and material photos are independent best-effort lookups
    let (garantias, fotos) = futures::join!(
        garantias_activas(&state.backend),
        mapa_fotos_materiales(&state.backend)
    );

    let oferta = oferta_detalle(&confeccion, garantias, &fotos, &base);
    envelope::exito(oferta, "Oferta obtenida correctamente")
}

/// POST /api/ofertas/recomendador - rank offers against a free-text query
#[utoipa::path(
    post,
    path = "/api/ofertas/recomendador",
    tag = "ofertas",
    request_body = ConsultaRecomendacion,
    responses(
        (status = 200, description = "Reconciled recommendation in ranking order", body = ApiEnvelope<Recomendacion>),
        (status = 400, description = "Empty query", body = ErrorEnvelope),
        (status = 500, description = "Candidate fetch failed or recommender reply malformed", body = ErrorEnvelope)
    )
)]
pub async fn recomendar(
    state: web::Data<AppState>,
    body: web::Json<ConsultaRecomendacion>,
) -> HttpResponse {
    let texto = body.texto.trim();
    if texto.is_empty() {
        return envelope::invalido("El campo texto es requerido");
    }

    match recommender::recomendar(&state.backend, texto).await {
        Ok(recomendacion) => {
            info!(
                ofertas = recomendacion.ofertas.len(),
                "recommendation reconciled"
            );
            envelope::exito(recomendacion, "Recomendación generada correctamente")
        }
        Err(e) => envelope::desde_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::backend::SuncarBackend;
    use crate::config::Settings;
    use actix_web::{test, App};

    fn estado_sin_backend() -> web::Data<AppState> {
        let settings = Settings::default();
        let backend = SuncarBackend::new(&settings.backend);
        web::Data::new(AppState { backend })
    }

    #[actix_web::test]
    async fn test_empty_query_is_rejected_before_backend() {
        let app = test::init_service(
            App::new()
                .app_data(estado_sin_backend())
                .configure(api::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/ofertas/recomendador")
            .set_json(serde_json::json!({ "texto": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_candidate_fetch_failure_short_circuits_recommender() {
        // A valid query against an unconfigured backend must fail on the
        // candidate fetch with the configuration envelope; the recommender
        // is never reached (no recommender URL exists to answer otherwise)
        let app = test::init_service(
            App::new()
                .app_data(estado_sin_backend())
                .configure(api::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/ofertas/recomendador")
            .set_json(serde_json::json!({ "texto": "kit para casa pequeña" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error de configuración del servidor");
    }

    #[actix_web::test]
    async fn test_unconfigured_backend_fails_closed() {
        let app = test::init_service(
            App::new()
                .app_data(estado_sin_backend())
                .configure(api::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/ofertas/simplified")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error de configuración del servidor");
    }
}
