//! config/app_config.rs
//! Configuración global del servicio, leída desde variables de entorno (.env).

use std::{collections::HashMap, path::PathBuf, str::FromStr, time::Duration};

use crate::models::webhook_model::WebhookKind;

/// Base por defecto de la plataforma de automatización
pub const DEFAULT_WEBHOOK_BASE: &str = "https://n8n-807184488368.southamerica-west1.run.app/webhook";

/// Rutas de cada webhook bajo la base
const DEFAULT_WEBHOOK_PATHS: [(WebhookKind, &str); 6] = [
    (WebhookKind::Principal, "6f697684-4cfc-4bc1-8918-bfffc9f20b9f"),
    (WebhookKind::Opcionales, "ac8b70a7-6be5-4e1a-87b3-3813464dd254"),
    (WebhookKind::VerDetalle, "c02247e7-84f0-49b3-a2df-28817da48017"),
    (WebhookKind::Cotizacion, "d9f32e08-c5d2-4a77-b3de-ba817e8fca3e"),
    (WebhookKind::CalculoEnvio, "ceec46e2-1fa3-4f9b-94bb-a974bc439bf6"),
    (WebhookKind::TipoCambio, "8012d60e-8a29-4910-b385-6514edc3d912"),
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Si está presente, cada cotización se respalda como `<id>.json` en esta carpeta
    pub archive_dir: Option<PathBuf>,
    pub webhooks: WebhookUrls,
    pub http_timeout: Duration,
    pub rate_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            db_path: PathBuf::from("data").join("quotes.db"),
            archive_dir: None,
            webhooks: WebhookUrls::with_base(DEFAULT_WEBHOOK_BASE),
            http_timeout: Duration::from_secs(30),
            rate_cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl AppConfig {
    /// Construye la configuración a partir del entorno; lo que falte queda en su default.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();

        let base = std::env::var("PRICESYNC_WEBHOOK_BASE")
            .unwrap_or_else(|_| DEFAULT_WEBHOOK_BASE.to_string());
        let mut webhooks = WebhookUrls::with_base(&base);
        for kind in WebhookKind::ALL {
            let key = format!("PRICESYNC_WEBHOOK_{}", kind.as_str().to_uppercase());
            if let Ok(url) = std::env::var(&key) {
                webhooks.set(kind, url);
            }
        }

        AppConfig {
            host: std::env::var("PRICESYNC_HOST").unwrap_or(defaults.host),
            port: env_or("PRICESYNC_PORT", defaults.port),
            db_path: std::env::var("PRICESYNC_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            archive_dir: std::env::var("PRICESYNC_ARCHIVE_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            webhooks,
            http_timeout: Duration::from_secs(env_or(
                "PRICESYNC_HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )),
            rate_cache_ttl: Duration::from_secs(env_or(
                "PRICESYNC_RATE_CACHE_SECS",
                defaults.rate_cache_ttl.as_secs(),
            )),
        }
    }

    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.db_path.to_string_lossy())
    }
}

/// URL destino de cada tipo de webhook
#[derive(Debug, Clone)]
pub struct WebhookUrls {
    urls: HashMap<WebhookKind, String>,
}

impl WebhookUrls {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let urls = DEFAULT_WEBHOOK_PATHS
            .iter()
            .map(|(kind, path)| (*kind, format!("{}/{}", base, path)))
            .collect();
        WebhookUrls { urls }
    }

    pub fn set(&mut self, kind: WebhookKind, url: String) {
        self.urls.insert(kind, url);
    }

    pub fn url(&self, kind: WebhookKind) -> &str {
        // with_base registra todos los tipos, nunca falta una entrada
        self.urls.get(&kind).map(String::as_str).unwrap_or_default()
    }
}

/// Lee una variable de entorno parseable, con fallback al default si falta o es inválida.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Valor inválido para {}: '{}', usando default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
