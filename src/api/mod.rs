//! API module - HTTP routes and handlers

pub mod envelope;
pub mod handlers;
pub mod openapi;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;

/// Configure all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/ofertas")
                    // More specific routes first
                    .route("/simplified", web::get().to(handlers::ofertas::listar_simplificadas))
                    .route("/recomendador", web::post().to(handlers::ofertas::recomendar))
                    .route("/{id}", web::get().to(handlers::ofertas::obtener_oferta)),
            )
            .service(
                web::scope("/clientes")
                    .route("/verificar", web::post().to(handlers::clientes::verificar))
                    .route(
                        "/estadisticas/kw-instalados-por-municipio",
                        web::get().to(handlers::clientes::kw_instalados_por_municipio),
                    ),
            )
            .route("/cotizacion", web::post().to(handlers::cotizacion::enviar))
            .route("/chat", web::post().to(handlers::chat::conversar))
            .route(
                "/productos-catalogo",
                web::get().to(handlers::catalogo::productos_catalogo),
            )
            .route(
                "/galeriaweb/{carpeta}",
                web::get().to(handlers::galeria::fotos_carpeta),
            ),
    )
    .route("/health", web::get().to(handlers::health::health_check))
    // Swagger UI and OpenAPI spec
    .service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
