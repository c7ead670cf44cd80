//! # Comandos del Servidor
//!
//! Este módulo contiene los handlers de la aplicación y arma la tabla de
//! rutas que usa el servidor.
//!
//! ## Categorías de comandos
//!
//! - **basic**: `/`, `/echo/{str}`, `/user-agent`
//! - **files**: `/files/{filename}` (solo con `--directory`)
//!
//! Cada comando es una función handler que recibe un Request
//! y retorna una Response.

pub mod basic;
pub mod files;

use crate::config::Config;
use crate::http::Request;
use crate::router::Router;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;

/// Construye la tabla de rutas de la aplicación
///
/// Se llama una sola vez antes de aceptar conexiones.
pub fn build_router(config: &Config) -> Router {
    let mut router = Router::new();

    router.get("/", root_handler);
    router.get("/echo/{str}", echo_handler);
    router.get("/user-agent", user_agent_handler);

    if let Some(dir) = &config.directory {
        let read_dir = dir.clone();
        router.get("/files/{filename}", move |req: &Request| read_file_handler(&read_dir, req));

        let write_dir = dir.clone();
        router.post("/files/{filename}", move |req: &Request| write_file_handler(&write_dir, req));
    }

    router
}
