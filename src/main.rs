use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::config::pricing_config::PricingConfig;
use crate::logger::init_logger;
use crate::models::product_model::Product;
use crate::models::quote_model::QuoteRequest;
use crate::services::catalog_service::CatalogService;
use crate::services::exchange_service::ExchangeService;
use crate::services::pricing_service::{price_with_markup_and_discount, PricingService};
use crate::services::quote_service::QuoteService;
use crate::services::shipping_service::ShippingService;
use crate::services::webhook_service::WebhookService;

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

/// Backend de cálculo de precios y cotizaciones
#[derive(Parser, Debug)]
#[command(name = "pricesync", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dirección donde escucha el servidor
    #[arg(long, env = "PRICESYNC_HOST", global = true)]
    host: Option<String>,

    /// Puerto del servidor
    #[arg(short, long, env = "PRICESYNC_PORT", global = true)]
    port: Option<u16>,

    /// Logs en nivel debug para el crate
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Levanta la API HTTP (default)
    Serve,
    /// Imprime un ejemplo de cálculo y de cotización completa
    Calc,
}

async fn setup_database(config: &AppConfig) -> Result<Pool<Sqlite>> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("No se pudo crear directorio {:?}", parent))?;
    }

    let db_url = config.database_url();
    log::info!("Conectando a SQLite en {}", db_url);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("No se pudo conectar a la base de datos SQLite")
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    let pricing_config = PricingConfig::from_env();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pricing_config).await,
        Command::Calc => run_calc(pricing_config),
    }
}

async fn serve(config: AppConfig, pricing_config: PricingConfig) -> Result<()> {
    let db_pool = setup_database(&config).await?;

    let quote_service = QuoteService::new(db_pool.clone(), config.archive_dir.clone());
    quote_service.run_migrations().await?;

    let webhook_service = WebhookService::new(&config)?;
    let exchange_service = ExchangeService::new(
        webhook_service.clone(),
        config.rate_cache_ttl,
        pricing_config.exchange_rate,
    );
    let catalog_service = CatalogService::new(webhook_service.clone());
    let shipping_service = ShippingService::new(pricing_config.freight.clone());
    let pricing_service = PricingService::new(pricing_config);

    log::info!("Levantando servidor en {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pricing_service.clone()))
            .app_data(web::Data::new(shipping_service.clone()))
            .app_data(web::Data::new(exchange_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(webhook_service.clone()))
            .app_data(web::Data::new(quote_service.clone()))
            .configure(app::init_app)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

/// Equivalente al modo "calc": un precio simple y una cotización de ejemplo
fn run_calc(pricing_config: PricingConfig) -> Result<()> {
    let (base, markup, discount) = (100.0, 20.0, 5.0);
    println!("\n--- CÁLCULO BÁSICO DE PRECIOS ---");
    println!("Precio base: €{}", base);
    println!("Margen aplicado: {}%", markup);
    println!("Descuento aplicado: {}%", discount);
    println!(
        "Precio final: €{}",
        price_with_markup_and_discount(base, markup, discount)
    );

    let rate = pricing_config.exchange_rate;
    let pricing = PricingService::new(pricing_config);
    let quote = pricing.quote(&sample_request(), rate)?;

    println!("\n--- EJEMPLO DE COTIZACIÓN COMPLETA ---");
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn sample_request() -> QuoteRequest {
    let item = |code: &str, name: &str, model: &str, price: f64, kg: f64, m3: f64| Product {
        code: code.to_string(),
        name: name.to_string(),
        description: String::new(),
        model: model.to_string(),
        price_eur: Some(price),
        domestic_transport_eur: None,
        weight_kg: Some(kg),
        volume_m3: Some(m3),
    };

    QuoteRequest {
        principal: item(
            "A141XL",
            "Chipeadora PTO A141XL - 3 Puntos de enlace - Cat.II - Abertura 410 x 300mm",
            "A141XL",
            22500.0,
            850.0,
            4.5,
        ),
        optionals: vec![
            item(
                "16521",
                "Eje PTO con Disco Volante de Inercia para Chipeadora A141XL - PTO",
                "A141XL",
                1250.0,
                45.0,
                0.2,
            ),
            item(
                "16902",
                "Eje PTO con Disco Volante de Inercia y Embrague para Chipeadora A141XL - PTO",
                "A141XL",
                1850.0,
                52.0,
                0.25,
            ),
        ],
        markup_pct: Some(18.5),
        discount_pct: Some(3.0),
        exchange_rate: None,
        tax_regime: None,
        tax_pct: None,
        shipping: None,
        origin_port: Some("valencia".to_string()),
        destination_port: Some("valparaiso".to_string()),
    }
}
