//! services/pricing_service.rs
//! Lógica de cálculo de precios: margen, descuento, tipo de cambio, envío e IVA.
//!
//! Todo es puro y sin estado; el servicio solo guarda los parámetros por defecto.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::pricing_config::PricingConfig;
use crate::errors::PricingError;
use crate::models::product_model::Product;
use crate::models::quote_model::{
    Quote, QuoteLine, QuoteParams, QuoteRequest, QuoteTotals, ShippingBreakdown, ShippingParams,
    TaxBreakdown,
};

#[derive(Debug, Clone)]
pub struct PricingService {
    config: PricingConfig,
}

impl PricingService {
    pub fn new(config: PricingConfig) -> Self {
        PricingService { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Combina el request con los defaults. `exchange_rate` es la tasa ya resuelta
    /// (request, webhook o default).
    pub fn resolve_params(&self, req: &QuoteRequest, exchange_rate: f64) -> QuoteParams {
        QuoteParams {
            markup_pct: req.markup_pct.unwrap_or(self.config.markup_pct),
            discount_pct: req.discount_pct.unwrap_or(self.config.discount_pct),
            tax_regime: req.tax_regime.unwrap_or_default(),
            tax_pct: req.tax_pct.unwrap_or(self.config.tax_pct),
            exchange_rate,
            local_currency: self.config.local_currency.clone(),
            shipping: req.shipping.unwrap_or(self.config.shipping),
            origin_port: req.origin_port.clone(),
            destination_port: req.destination_port.clone(),
        }
    }

    /// Calcula una cotización completa con id y fecha nuevos.
    pub fn quote(&self, req: &QuoteRequest, exchange_rate: f64) -> Result<Quote, PricingError> {
        let params = self.resolve_params(req, exchange_rate);
        let now = Utc::now();
        compute_quote(&req.principal, &req.optionals, params, new_quote_id(now), now)
    }

    pub fn price(&self, base: f64, markup: Option<f64>, discount: Option<f64>) -> Result<f64, PricingError> {
        let markup = markup.unwrap_or(self.config.markup_pct);
        let discount = discount.unwrap_or(self.config.discount_pct);
        validate_price("base_price", base)?;
        validate_markup(markup)?;
        validate_percent("discount", discount)?;
        Ok(price_with_markup_and_discount(base, markup, discount))
    }
}

/// Redondeo a centavos (mitad lejos de cero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// precio = base × (1 + margen/100) × (1 − descuento/100)
pub fn price_with_markup_and_discount(base: f64, markup_pct: f64, discount_pct: f64) -> f64 {
    let with_markup = base * (1.0 + markup_pct / 100.0);
    round2(with_markup * (1.0 - discount_pct / 100.0))
}

pub fn apply_exchange_rate(price_eur: f64, rate: f64) -> f64 {
    round2(price_eur * rate)
}

/// Precio de una línea (principal u opcional)
pub fn price_line(item: &Product, params: &QuoteParams) -> QuoteLine {
    let base = item.price_or_zero();
    let margin = base * params.markup_pct / 100.0;
    let with_margin = base + margin;
    let with_margin_eur = round2(with_margin);
    let discount_eur = round2(with_margin * params.discount_pct / 100.0);
    // final = con margen − descuento, ambos ya en centavos
    let final_eur = round2(with_margin_eur - discount_eur);

    QuoteLine {
        code: item.code.clone(),
        name: item.name.clone(),
        base_eur: round2(base),
        margin_eur: round2(margin),
        with_margin_eur,
        discount_eur,
        final_eur,
        final_local: apply_exchange_rate(final_eur, params.exchange_rate),
    }
}

pub fn shipping_cost(net_eur: f64, shipping: &ShippingParams) -> ShippingBreakdown {
    let fixed = round2(shipping.base_cost_eur);
    let variable = round2(net_eur * shipping.variable_rate);
    let insurance = round2(net_eur * shipping.insurance_rate);
    ShippingBreakdown {
        fixed_eur: fixed,
        variable_eur: variable,
        insurance_eur: insurance,
        total_eur: round2(fixed + variable + insurance),
    }
}

/// Pipeline completo: líneas → totales → envío → IVA → gran total en EUR y moneda local.
pub fn compute_quote(
    principal: &Product,
    optionals: &[Product],
    params: QuoteParams,
    id: String,
    created_at: DateTime<Utc>,
) -> Result<Quote, PricingError> {
    validate_params(&params)?;
    validate_item(principal)?;
    for opt in optionals {
        validate_item(opt)?;
    }

    let principal_line = price_line(principal, &params);
    let optional_lines: Vec<QuoteLine> = optionals.iter().map(|o| price_line(o, &params)).collect();

    let lines: Vec<&QuoteLine> = std::iter::once(&principal_line)
        .chain(optional_lines.iter())
        .collect();
    let sum = |field: fn(&QuoteLine) -> f64| round2(lines.iter().map(|l| field(l)).sum::<f64>());

    let net_eur = sum(|l| l.final_eur);
    let totals = QuoteTotals {
        subtotal_base_eur: sum(|l| l.base_eur),
        subtotal_with_margin_eur: sum(|l| l.with_margin_eur),
        discount_total_eur: sum(|l| l.discount_eur),
        net_eur,
        net_local: apply_exchange_rate(net_eur, params.exchange_rate),
    };

    let shipping = shipping_cost(net_eur, &params.shipping);

    let rate_pct = params.tax_regime.effective_rate(params.tax_pct);
    let tax = TaxBreakdown {
        regime: params.tax_regime,
        rate_pct,
        taxable_base_eur: net_eur,
        tax_eur: round2(net_eur * rate_pct / 100.0),
    };

    let grand_total_eur = round2(net_eur + shipping.total_eur + tax.tax_eur);
    let grand_total_local = apply_exchange_rate(grand_total_eur, params.exchange_rate);

    Ok(Quote {
        id,
        created_at,
        principal: principal_line,
        optionals: optional_lines,
        totals,
        shipping,
        tax,
        grand_total_eur,
        grand_total_local,
        params,
    })
}

/// "COT-<YYYYMMDDHHMMSS>-<4 hex>"
pub fn new_quote_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("COT-{}-{}", now.format("%Y%m%d%H%M%S"), &suffix[..4])
}

// --------------------------------------------------------------------------------
// Validaciones
// --------------------------------------------------------------------------------

pub fn validate_params(params: &QuoteParams) -> Result<(), PricingError> {
    validate_markup(params.markup_pct)?;
    validate_percent("discount", params.discount_pct)?;
    validate_percent("tax", params.tax_pct)?;
    validate_exchange_rate(params.exchange_rate)?;

    let s = &params.shipping;
    for (field, value) in [
        ("base_cost_eur", s.base_cost_eur),
        ("variable_rate", s.variable_rate),
        ("insurance_rate", s.insurance_rate),
    ] {
        if !value.is_finite() {
            return Err(PricingError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(PricingError::NegativeShipping { field, value });
        }
    }
    Ok(())
}

pub fn validate_exchange_rate(rate: f64) -> Result<(), PricingError> {
    if !rate.is_finite() {
        return Err(PricingError::NotFinite { field: "exchange_rate" });
    }
    if rate <= 0.0 {
        return Err(PricingError::InvalidExchangeRate(rate));
    }
    Ok(())
}

fn validate_item(item: &Product) -> Result<(), PricingError> {
    let price = item.price_or_zero();
    if !price.is_finite() {
        return Err(PricingError::NotFinite { field: "pf_eur" });
    }
    if price < 0.0 {
        return Err(PricingError::NegativePrice {
            item: item.code.clone(),
            value: price,
        });
    }
    Ok(())
}

/// Monto suelto en EUR: finito y no negativo
pub fn validate_price(field: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(PricingError::NegativePrice {
            item: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_markup(markup: f64) -> Result<(), PricingError> {
    if !markup.is_finite() {
        return Err(PricingError::NotFinite { field: "markup" });
    }
    if markup < 0.0 {
        return Err(PricingError::NegativeMarkup(markup));
    }
    Ok(())
}

fn validate_percent(field: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NotFinite { field });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(PricingError::PercentOutOfRange { field, value });
    }
    Ok(())
}
