//! OpenAPI 3.0 specification definition

use utoipa::OpenApi;

use crate::api::envelope::ErrorEnvelope;
use crate::api::handlers::health::HealthResponse;
use crate::api::handlers::ofertas::ConsultaRecomendacion;
use crate::backend::recommender::Recomendacion;
use crate::domain::{ElementoPublico, OfertaPublica};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SunCar Gateway API",
        version = "1.0.0",
        description = "Storefront gateway for the SunCar solar backend: normalized offers, recommendations and thin upstream proxies"
    ),
    servers(
        (url = "/", description = "Current server")
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "ofertas", description = "Offer catalog and recommendation endpoints")
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::ofertas::listar_simplificadas,
        crate::api::handlers::ofertas::obtener_oferta,
        crate::api::handlers::ofertas::recomendar,
    ),
    components(
        schemas(
            HealthResponse,
            OfertaPublica,
            ElementoPublico,
            Recomendacion,
            ConsultaRecomendacion,
            ErrorEnvelope,
        )
    )
)]
pub struct ApiDoc;
