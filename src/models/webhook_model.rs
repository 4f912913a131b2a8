//! models/webhook_model.rs

use std::{fmt, str::FromStr};

use crate::errors::ServiceError;

/// Webhooks conocidos de la plataforma de automatización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookKind {
    Principal,
    Opcionales,
    VerDetalle,
    Cotizacion,
    CalculoEnvio,
    TipoCambio,
}

impl WebhookKind {
    pub const ALL: [WebhookKind; 6] = [
        WebhookKind::Principal,
        WebhookKind::Opcionales,
        WebhookKind::VerDetalle,
        WebhookKind::Cotizacion,
        WebhookKind::CalculoEnvio,
        WebhookKind::TipoCambio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookKind::Principal => "principal",
            WebhookKind::Opcionales => "opcionales",
            WebhookKind::VerDetalle => "ver_detalle",
            WebhookKind::Cotizacion => "cotizacion",
            WebhookKind::CalculoEnvio => "calculo_envio",
            WebhookKind::TipoCambio => "tipo_cambio",
        }
    }
}

impl fmt::Display for WebhookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebhookKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ServiceError::UnknownWebhook(s.to_string()))
    }
}
