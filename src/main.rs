//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1: lee la configuración, arma la
//! tabla de rutas y corre el accept loop hasta que el proceso termine.

use http_server::commands;
use http_server::config::Config;
use http_server::server::Server;

fn main() {
    let config = Config::new();

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&config.log_level)
        .init();

    if let Err(e) = config.validate() {
        log::error!("Configuración inválida: {}", e);
        std::process::exit(1);
    }
    config.log_summary();

    // La tabla de rutas queda fija antes de aceptar conexiones
    let router = commands::build_router(&config);
    let server = Server::new(config, router);

    if let Err(e) = server.run() {
        log::error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
