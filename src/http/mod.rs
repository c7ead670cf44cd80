//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel:
//!
//! - Parsing de requests HTTP/1.1 (GET, POST, PUT, DELETE)
//! - Descripción de responses y su serialización (con gzip opcional)
//! - Códigos de estado
//!
//! No hay conexiones persistentes ni chunked transfer encoding: cada
//! conexión lleva un request y una response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Protocol, Request};
pub use response::{Content, ContentKind, Encoding, Response};
pub use status::StatusCode;
