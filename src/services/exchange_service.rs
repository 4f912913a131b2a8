//! services/exchange_service.rs
//! Tipo de cambio EUR/USD -> CLP con caché en memoria.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::PricingError;
use crate::models::product_model::ExchangeRates;
use crate::services::pricing_service::validate_exchange_rate;
use crate::services::webhook_service::WebhookService;

#[derive(Clone, Debug)]
pub struct ExchangeService {
    webhooks: WebhookService,
    cache: Arc<RwLock<Option<CachedRates>>>,
    ttl: Duration,
    default_rate: f64,
}

#[derive(Clone, Debug)]
struct CachedRates {
    fetched_at: Instant,
    rates: ExchangeRates,
}

/// De dónde salió la tasa usada en un cálculo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Request,
    Webhook,
    Default,
}

impl ExchangeService {
    pub fn new(webhooks: WebhookService, ttl: Duration, default_rate: f64) -> Self {
        ExchangeService {
            webhooks,
            cache: Arc::new(RwLock::new(None)),
            ttl,
            default_rate,
        }
    }

    /// Tasas actuales; sólo consulta el webhook si la caché expiró.
    pub async fn current_rates(&self) -> Result<ExchangeRates> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.rates.clone());
            }
        }

        let rates = self.webhooks.fetch_exchange_rates().await?;
        log::info!(
            "Tipo de cambio actualizado ({}): USD {:?}, EUR {:?}",
            rates.date,
            rates.usd_clp,
            rates.eur_clp
        );
        *self.cache.write().await = Some(CachedRates {
            fetched_at: Instant::now(),
            rates: rates.clone(),
        });
        Ok(rates)
    }

    /// Tasa EUR -> moneda local: la del request si viene, si no la del webhook,
    /// y como último recurso la configurada por defecto.
    pub async fn resolve_rate(&self, explicit: Option<f64>) -> Result<(f64, RateSource)> {
        if let Some(rate) = explicit {
            validate_exchange_rate(rate)?;
            return Ok((rate, RateSource::Request));
        }

        let fetched = self.current_rates().await.and_then(|r| {
            let rate = r
                .eur_clp
                .ok_or_else(|| anyhow!("el webhook no informó Valor_Euro"))?;
            validate_exchange_rate(rate).map_err(|e: PricingError| anyhow!(e))?;
            Ok(rate)
        });

        match fetched {
            Ok(rate) => Ok((rate, RateSource::Webhook)),
            Err(e) => {
                log::warn!(
                    "No se pudo obtener tipo de cambio ({:#}), usando default {}",
                    e,
                    self.default_rate
                );
                Ok((self.default_rate, RateSource::Default))
            }
        }
    }
}
