//! logger.rs
//! Configuración del logger usando env_logger.

use std::io::Write;

/// Inicializa env_logger una sola vez. RUST_LOG manda; si no está, "info".
/// `verbose` fuerza "debug" para el crate (flag --verbose del CLI).
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "pricesync=debug,info" } else { "info" };
    let log_env = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_env))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
