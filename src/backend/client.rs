//! SunCar backend HTTP client
//!
//! Thin typed wrapper over reqwest. Every call is attempted exactly once:
//! the gateway contract guarantees at most one upstream request per concern,
//! so there is deliberately no retry or backoff layer here.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::backend::models::*;
use crate::backend::{BackendError, BackendResult};
use crate::config::BackendSettings;

/// Typed client for the SunCar backend API
pub struct SuncarBackend {
    http: Client,
    base_url: String,
    recommender_url: String,
    token: String,
}

impl SuncarBackend {
    pub fn new(settings: &BackendSettings) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("suncar-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        SuncarBackend {
            http,
            base_url: settings.url.trim_end_matches('/').to_string(),
            recommender_url: settings
                .recommender_base()
                .trim_end_matches('/')
                .to_string(),
            token: settings.token.clone(),
        }
    }

    /// Backend base URL, failing closed when unconfigured
    pub fn base(&self) -> BackendResult<&str> {
        if self.base_url.is_empty() {
            Err(BackendError::NotConfigured(
                "SUNCAR_BACKEND__URL is not set".to_string(),
            ))
        } else {
            Ok(&self.base_url)
        }
    }

    fn url(&self, path: &str) -> BackendResult<Url> {
        let base = self.base()?;
        Url::parse(&format!("{}{}", base, path))
            .map_err(|e| BackendError::Parse(format!("invalid backend URL: {}", e)))
    }

    fn recommender_endpoint(&self) -> BackendResult<Url> {
        if self.recommender_url.is_empty() {
            return Err(BackendError::NotConfigured(
                "recommender URL is not set".to_string(),
            ));
        }
        Url::parse(&format!("{}/api/recomendador/ofertas", self.recommender_url))
            .map_err(|e| BackendError::Parse(format!("invalid recommender URL: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> BackendResult<T> {
        debug!(url = %url, "backend GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> BackendResult<T> {
        debug!(url = %url, "backend POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> BackendResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            BackendError::Parse(format!(
                "JSON parse error: {} - Body: {}",
                e,
                truncar_en_limite(&text, 500)
            ))
        })
    }

    /// Unwrap the backend's `{success, data, message}` envelope. A 2xx reply
    /// with success:false or missing data is an upstream shape error.
    fn desenvolver<T>(env: BackendEnvelope<T>) -> BackendResult<T> {
        if !env.success {
            return Err(BackendError::Upstream(
                env.message
                    .unwrap_or_else(|| "el backend reportó un error".to_string()),
            ));
        }
        env.data.ok_or_else(|| {
            BackendError::Upstream(
                env.message
                    .unwrap_or_else(|| "respuesta del backend sin datos".to_string()),
            )
        })
    }

    // ------------------------------------------------------------------
    // Offers
    // ------------------------------------------------------------------

    /// Full confección list, active and inactive
    pub async fn confecciones(&self) -> BackendResult<Vec<Confeccion>> {
        let url = self.url("/api/ofertas/confecciones")?;
        let env: BackendEnvelope<Vec<Confeccion>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    /// Confección list filtered server-side to publicly-active offers
    pub async fn confecciones_activas(&self) -> BackendResult<Vec<Confeccion>> {
        let mut url = self.url("/api/ofertas/confecciones")?;
        url.query_pairs_mut()
            .append_pair("tipo_oferta", TIPO_GENERICA)
            .append_pair("estado", ESTADO_APROBADA);
        let env: BackendEnvelope<Vec<Confeccion>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    pub async fn confeccion(&self, id: &str) -> BackendResult<Confeccion> {
        let url = self.url(&format!("/api/ofertas/confecciones/{}", id))?;
        let env: BackendEnvelope<Confeccion> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    // ------------------------------------------------------------------
    // Side lookups (callers degrade these to empty on failure)
    // ------------------------------------------------------------------

    pub async fn materiales(&self) -> BackendResult<Vec<Material>> {
        let url = self.url("/api/materiales")?;
        let env: BackendEnvelope<Vec<Material>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    pub async fn terminos_activos(&self) -> BackendResult<TerminosActivos> {
        let url = self.url("/api/terminos-condiciones/activo")?;
        let env: BackendEnvelope<TerminosActivos> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    pub async fn marcas(&self) -> BackendResult<Vec<Marca>> {
        let url = self.url("/api/marcas")?;
        let env: BackendEnvelope<Vec<Marca>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    // ------------------------------------------------------------------
    // Recommender
    // ------------------------------------------------------------------

    /// Forward the query plus candidate offers to the recommender. Returns
    /// the raw `data` payload; the reconciler inspects its `ofertas` field.
    /// On non-2xx the upstream body is preserved verbatim in the error.
    pub async fn recomendar(&self, solicitud: &Value) -> BackendResult<Value> {
        let url = self.recommender_endpoint()?;
        let env: BackendEnvelope<Value> = self.post_json(url, solicitud).await?;
        Self::desenvolver(env)
    }

    // ------------------------------------------------------------------
    // Thin proxies
    // ------------------------------------------------------------------

    pub async fn enviar_cotizacion(&self, cotizacion: &Value) -> BackendResult<Value> {
        let url = self.url("/api/cotizaciones")?;
        let env: BackendEnvelope<Value> = self.post_json(url, cotizacion).await?;
        Self::desenvolver(env)
    }

    pub async fn chat(&self, solicitud: &Value) -> BackendResult<RespuestaChat> {
        let url = self.url("/api/chat")?;
        let env: BackendEnvelope<RespuestaChat> = self.post_json(url, solicitud).await?;
        Self::desenvolver(env)
    }

    pub async fn verificar_cliente(&self, solicitud: &Value) -> BackendResult<Value> {
        let url = self.url("/api/clientes/verificar")?;
        let env: BackendEnvelope<Value> = self.post_json(url, solicitud).await?;
        Self::desenvolver(env)
    }

    pub async fn kw_instalados_por_municipio(
        &self,
        provincia: Option<&str>,
        municipio: Option<&str>,
    ) -> BackendResult<Vec<EstadisticaMunicipio>> {
        let mut url =
            self.url("/api/clientes/estadisticas/kw-instalados-por-municipio")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(p) = provincia {
                pairs.append_pair("provincia", p);
            }
            if let Some(m) = municipio {
                pairs.append_pair("municipio", m);
            }
        }
        let env: BackendEnvelope<Vec<EstadisticaMunicipio>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    pub async fn articulos_tienda(&self) -> BackendResult<Vec<ArticuloCatalogo>> {
        let url = self.url("/api/tienda/articulos")?;
        let env: BackendEnvelope<Vec<ArticuloCatalogo>> = self.get_json(url).await?;
        Self::desenvolver(env)
    }

    pub async fn galeria(&self, carpeta: &str) -> BackendResult<Value> {
        let url = self.url(&format!("/api/galeriaweb/{}", carpeta))?;
        let env: BackendEnvelope<Value> = self.get_json(url).await?;
        Self::desenvolver(env)
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
/// Backend bodies are Spanish text, so a fixed byte cut could land inside a
/// multi-byte character and panic.
fn truncar_en_limite(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendSettings;

    fn settings(url: &str) -> BackendSettings {
        BackendSettings {
            url: url.to_string(),
            token: "suncar-token-2025".to_string(),
            timeout_secs: 30,
            recommender_url: String::new(),
        }
    }

    #[test]
    fn test_unconfigured_base_fails_closed() {
        let backend = SuncarBackend::new(&settings(""));
        assert!(matches!(
            backend.base(),
            Err(BackendError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = SuncarBackend::new(&settings("http://api.test/"));
        assert_eq!(backend.base().unwrap(), "http://api.test");
    }

    #[test]
    fn test_truncation_respects_multibyte_boundaries() {
        // "ñ" spans bytes 499-500, right across the cut point
        let body = format!("{}ñ", "a".repeat(499));
        let truncado = truncar_en_limite(&body, 500);
        assert_eq!(truncado.len(), 499);
        assert!(truncado.chars().all(|c| c == 'a'));

        // Short and exactly-at-limit bodies pass through untouched
        assert_eq!(truncar_en_limite("señal", 500), "señal");
        let exacto = "a".repeat(500);
        assert_eq!(truncar_en_limite(&exacto, 500), exacto);
    }

    #[test]
    fn test_desenvolver_rejects_unsuccessful_payload() {
        let env = BackendEnvelope::<Vec<Material>> {
            success: false,
            data: None,
            message: Some("fallo interno".to_string()),
        };
        match SuncarBackend::desenvolver(env) {
            Err(BackendError::Upstream(msg)) => assert_eq!(msg, "fallo interno"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_desenvolver_rejects_missing_data() {
        let env = BackendEnvelope::<Vec<Material>> {
            success: true,
            data: None,
            message: None,
        };
        assert!(matches!(
            SuncarBackend::desenvolver(env),
            Err(BackendError::Upstream(_))
        ));
    }
}
