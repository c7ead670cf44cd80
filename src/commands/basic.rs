//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! Implementación de los endpoints básicos del servidor:
//! - `GET /`: responde 200 sin contenido
//! - `GET /echo/{str}`: devuelve el segmento como texto
//! - `GET /user-agent`: devuelve el header `User-Agent`
//!
//! Los endpoints con contenido comprimen con gzip si el cliente lo
//! acepta en `Accept-Encoding`.

use crate::http::{Encoding, Request, Response};

/// Codificación que pidió el cliente
fn negotiated_encoding(req: &Request) -> Encoding {
    Encoding::negotiate(req.header("Accept-Encoding"))
}

/// Handler para `GET /`
pub fn root_handler(_req: &Request) -> Response {
    Response::ok()
}

/// Handler para `GET /echo/{str}`
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 3
///
/// abc
/// ```
pub fn echo_handler(req: &Request) -> Response {
    let text = req.param("str").unwrap_or_default();
    Response::text(text).with_encoding(negotiated_encoding(req))
}

/// Handler para `GET /user-agent`
///
/// Si el header falta responde con un body vacío.
pub fn user_agent_handler(req: &Request) -> Response {
    let user_agent = req.header("User-Agent").unwrap_or_default();
    Response::text(user_agent).with_encoding(negotiated_encoding(req))
}
