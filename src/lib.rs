//! # HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: acepta conexiones
//! TCP, parsea el request, lo despacha a handlers por patrones de ruta con
//! parámetros y serializa la respuesta (texto o binario, con gzip opcional).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y serialización de responses
//! - `router`: Rutas `(método, patrón)` con placeholders `{nombre}`
//! - `server`: Accept loop y manejo de cada conexión
//! - `commands`: Handlers de la aplicación (echo, user-agent, archivos)
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_server::config::Config;
//! use http_server::http::{Request, Response};
//! use http_server::router::Router;
//! use http_server::server::Server;
//!
//! let mut router = Router::new();
//! router.get("/echo/{str}", |req: &Request| {
//!     Response::text(req.param("str").unwrap_or_default())
//! });
//!
//! let server = Server::new(Config::default(), router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod http;
pub mod router;
pub mod server;
