//! services/webhook_service.rs
//! Cliente HTTP hacia los webhooks de la plataforma de automatización.

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::de::DeserializeOwned;

use crate::config::app_config::{AppConfig, WebhookUrls};
use crate::errors::ServiceError;
use crate::models::product_model::{ExchangeRates, Product};
use crate::models::shipping_model::ShippingDispatchRequest;
use crate::models::webhook_model::WebhookKind;

/// Largo máximo del fragmento de respuesta incluido en errores
const SNIPPET_LEN: usize = 120;

#[derive(Clone, Debug)]
pub struct WebhookService {
    client: Client,
    urls: WebhookUrls,
}

/// Respuesta cruda del webhook, para reenviarla tal cual
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl WebhookService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("No se pudo construir el cliente HTTP")?;
        Ok(WebhookService {
            client,
            urls: config.webhooks.clone(),
        })
    }

    pub fn url(&self, kind: WebhookKind) -> &str {
        self.urls.url(kind)
    }

    /// Equipos principales (sin los registros marcados como "opcionales")
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.fetch_json(WebhookKind::Principal).await?;
        let total = products.len();
        let equipment: Vec<Product> = products
            .into_iter()
            .filter(|p| !p.is_optional_listing())
            .collect();
        log::info!("Webhook principal: {} registros, {} equipos", total, equipment.len());
        Ok(equipment)
    }

    pub async fn fetch_optionals(&self) -> Result<Vec<Product>> {
        let optionals: Vec<Product> = self.fetch_json(WebhookKind::Opcionales).await?;
        log::info!("Webhook opcionales: {} registros", optionals.len());
        Ok(optionals)
    }

    /// El webhook devuelve un arreglo; se usa el primer elemento.
    pub async fn fetch_exchange_rates(&self) -> Result<ExchangeRates> {
        let value: serde_json::Value = self.fetch_json(WebhookKind::TipoCambio).await?;
        let first = match value {
            serde_json::Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            obj @ serde_json::Value::Object(_) => obj,
            other => {
                return Err(ServiceError::UpstreamNotJson {
                    kind: WebhookKind::TipoCambio.to_string(),
                    snippet: snippet(other.to_string().as_bytes()),
                }
                .into())
            }
        };
        serde_json::from_value(first).context("Respuesta de tipo de cambio con formato inesperado")
    }

    /// GET al webhook y parseo del cuerpo como JSON
    pub async fn fetch_json<T: DeserializeOwned>(&self, kind: WebhookKind) -> Result<T> {
        let resp = self.send(kind, Method::GET, "", None).await?;
        if !(200..300).contains(&resp.status) {
            return Err(ServiceError::UpstreamStatus {
                kind: kind.to_string(),
                status: resp.status,
            }
            .into());
        }
        serde_json::from_slice(&resp.body).map_err(|_| {
            ServiceError::UpstreamNotJson {
                kind: kind.to_string(),
                snippet: snippet(&resp.body),
            }
            .into()
        })
    }

    /// Reenvía una petición al webhook: GET con el query string original,
    /// POST con el cuerpo JSON.
    pub async fn forward(
        &self,
        kind: WebhookKind,
        method: Method,
        query: &str,
        body: Option<serde_json::Value>,
    ) -> Result<UpstreamResponse> {
        self.send(kind, method, query, body).await
    }

    /// Envía los productos y puertos al webhook de cálculo de envío.
    /// Devuelve el status HTTP del webhook.
    pub async fn dispatch_shipping(&self, req: &ShippingDispatchRequest) -> Result<u16> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(req.products.len() * 3 + 3);
        for item in &req.products {
            params.push(("codigo", item.code.clone()));
            params.push(("tipo", item.kind.clone()));
            params.push(("precioEur", item.price_eur.to_string()));
        }
        params.push(("puertoOrigen", req.origin_port.clone()));
        params.push(("puertoDestino", req.destination_port.clone()));
        params.push(("descuento", req.discount_pct.to_string()));

        let kind = WebhookKind::CalculoEnvio;
        let resp = self
            .client
            .get(self.url(kind))
            .query(&params)
            .send()
            .await
            .map_err(|e| unavailable(kind, e))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            return Err(ServiceError::UpstreamStatus {
                kind: kind.to_string(),
                status,
            }
            .into());
        }
        log::info!(
            "Datos de envío enviados: {} productos, {} -> {}",
            req.products.len(),
            req.origin_port,
            req.destination_port
        );
        Ok(status)
    }

    async fn send(
        &self,
        kind: WebhookKind,
        method: Method,
        query: &str,
        body: Option<serde_json::Value>,
    ) -> Result<UpstreamResponse> {
        let mut url = self.url(kind).to_string();
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(query);
        }

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(json) = body {
            builder = builder.json(&json);
        }

        log::debug!("{} webhook {} -> {}", method, kind, url);
        let resp = builder.send().await.map_err(|e| unavailable(kind, e))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(|e| unavailable(kind, e))?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

fn unavailable(kind: WebhookKind, err: reqwest::Error) -> anyhow::Error {
    ServiceError::UpstreamUnavailable {
        kind: kind.to_string(),
        message: err.to_string(),
    }
    .into()
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(SNIPPET_LEN).collect()
}
