//! services/export_service.rs
//! Exportación del resumen de una cotización a CSV (concepto, valor).

use anyhow::{Context, Result};

use crate::models::quote_model::Quote;

/// Genera el CSV de dos columnas con el mismo orden de secciones que la planilla de cotización.
pub fn quote_to_csv(quote: &Quote) -> Result<String> {
    let p = &quote.params;
    let local = p.local_currency.as_str();
    let mut rows: Vec<(String, String)> = Vec::new();
    let mut push = |concept: &str, value: String| rows.push((concept.to_string(), value));

    push("Resumen de Cálculos", String::new());
    push("", String::new());
    push("Producto Principal:", String::new());
    push(&quote.principal.name, String::new());
    push("Precio Base:", eur(quote.principal.base_eur));
    push("Precio Final:", eur(quote.principal.final_eur));
    push("", String::new());

    push(&format!("Opcionales ({}):", quote.optionals.len()), String::new());
    for opt in &quote.optionals {
        push(&opt.name, String::new());
        push("Precio Final:", eur(opt.final_eur));
    }
    push("", String::new());

    let t = &quote.totals;
    push("Subtotales:", String::new());
    push("Subtotal Base:", eur(t.subtotal_base_eur));
    push(
        &format!("Con Margen ({}%):", percent(p.markup_pct)),
        eur(t.subtotal_with_margin_eur),
    );
    push(
        &format!("Descuento ({}%):", percent(p.discount_pct)),
        eur(-t.discount_total_eur),
    );
    push("Total Neto (EUR):", eur(t.net_eur));
    push(&format!("Total Neto ({}):", local), money(t.net_local, local));
    push("", String::new());

    let s = &quote.shipping;
    push("Costos de Envío:", String::new());
    push("Costo Base:", eur(s.fixed_eur));
    push("Costo Variable:", eur(s.variable_eur));
    push("Seguro:", eur(s.insurance_eur));
    push("Total Envío:", eur(s.total_eur));
    push("", String::new());

    push("Impuestos:", String::new());
    push("Base Imponible:", eur(quote.tax.taxable_base_eur));
    push(&format!("IVA ({}%):", percent(quote.tax.rate_pct)), eur(quote.tax.tax_eur));
    push("", String::new());

    push("TOTAL FINAL (EUR):", eur(quote.grand_total_eur));
    push(&format!("TOTAL FINAL ({}):", local), money(quote.grand_total_local, local));
    push("", String::new());
    push(
        &format!(
            "Configuracion generada: {}",
            quote.created_at.format("%d/%m/%Y, %H:%M:%S")
        ),
        String::new(),
    );
    push(&format!("ID: {}", quote.id), String::new());

    let mut writer = csv::Writer::from_writer(Vec::new());
    for (concept, value) in &rows {
        writer
            .write_record([concept, value])
            .context("Error escribiendo fila CSV")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Error finalizando CSV: {}", e))?;
    String::from_utf8(bytes).context("CSV con UTF-8 inválido")
}

/// "CONFIGURACION-<n>.csv", con n = parte numérica del id módulo 10000
pub fn export_file_name(quote_id: &str) -> String {
    let number = quote_id
        .split('-')
        .nth(1)
        .and_then(|digits| digits.parse::<u64>().ok());
    match number {
        Some(n) => format!("CONFIGURACION-{}.csv", n % 10_000),
        None => {
            let safe: String = quote_id
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect();
            format!("CONFIGURACION-{}.csv", safe)
        }
    }
}

/// Formato es-CL: "35.400,00"
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, grouped, frac)
}

fn eur(value: f64) -> String {
    format!("{} €", format_amount(value))
}

fn money(value: f64, currency: &str) -> String {
    format!("{} {}", format_amount(value), currency)
}

fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string().replace('.', ",")
    }
}
