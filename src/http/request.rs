//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero sobre el buffer
//! de la única lectura que se hace por conexión.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path PROTOCOL` separados por un espacio
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: los bytes crudos que siguen, sin truncar por `Content-Length`

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Terminador de línea del protocolo
const CRLF: &[u8] = b"\r\n";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// PUT - Reemplazar un recurso
    PUT,

    /// DELETE - Eliminar un recurso
    DELETE,
}

impl Method {
    /// Parsea un método HTTP desde el token crudo de la request line
    ///
    /// # Errores
    ///
    /// Retorna `UnsupportedMethod` si el token no es uno de los cuatro métodos
    fn from_bytes(token: &[u8]) -> Result<Self, ParseError> {
        match token {
            b"GET" => Ok(Method::GET),
            b"POST" => Ok(Method::POST),
            b"PUT" => Ok(Method::PUT),
            b"DELETE" => Ok(Method::DELETE),
            _ => Err(ParseError::UnsupportedMethod(
                String::from_utf8_lossy(token).into_owned(),
            )),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Versiones del protocolo aceptadas (solo HTTP/1.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http11,
}

impl Protocol {
    fn from_bytes(token: &[u8]) -> Result<Self, ParseError> {
        match token {
            b"HTTP/1.1" => Ok(Protocol::Http11),
            _ => Err(ParseError::UnsupportedProtocol(
                String::from_utf8_lossy(token).into_owned(),
            )),
        }
    }

    /// Token del protocolo tal como va en la request y en la status line
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http11 => "HTTP/1.1",
        }
    }
}

/// Representa un request HTTP/1.1 parseado
///
/// Es inmutable después del parsing, con la excepción de `params`,
/// que el router llena al encontrar la ruta.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST, PUT, DELETE)
    method: Method,

    /// Recurso pedido tal cual llegó (ej: "/echo/abc")
    resource: String,

    /// Protocolo (siempre HTTP/1.1)
    protocol: Protocol,

    /// Headers HTTP con las llaves tal cual se recibieron
    headers: HashMap<String, String>,

    /// Body del request, bytes tal cual llegaron
    body: Vec<u8>,

    /// Parámetros extraídos del patrón de la ruta (ej: {"str": "abc"})
    params: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// La request line no tiene exactamente tres tokens
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Recurso vacío en la request line
    #[error("Empty request resource")]
    EmptyResource,

    /// Protocolo distinto de HTTP/1.1
    #[error("Unsupported HTTP protocol: {0}")]
    UnsupportedProtocol(String),

    /// Header sin ':'
    #[error("Malformed header: {0:?}")]
    MalformedHeader(String),
}

impl Request {
    /// Parsea un request HTTP/1.1 desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes leídos del socket (solo la parte efectivamente leída)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_server::http::{Method, Request};
    ///
    /// let raw = b"GET /echo/hola HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/echo/hola");
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let lines = split_lines(buffer);

        // 1. Request line
        let (method, resource, protocol) = Self::parse_request_line(lines[0])?;

        // 2. Headers hasta la primera línea vacía
        let (headers, body_start) = Self::parse_headers(&lines)?;

        // 3. El resto es el body, re-unido con CRLF
        let body = match lines.get(body_start..) {
            Some(rest) if !rest.is_empty() => rest.join(CRLF),
            _ => Vec::new(),
        };

        Ok(Request {
            method,
            resource,
            protocol,
            headers,
            body,
            params: HashMap::new(),
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separados por un único espacio
    fn parse_request_line(line: &[u8]) -> Result<(Method, String, Protocol), ParseError> {
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();

        if parts.len() != 3 {
            return Err(ParseError::MalformedRequestLine(
                String::from_utf8_lossy(line).into_owned(),
            ));
        }

        let method = Method::from_bytes(parts[0])?;

        if parts[1].is_empty() {
            return Err(ParseError::EmptyResource);
        }
        let resource = String::from_utf8_lossy(parts[1]).into_owned();

        let protocol = Protocol::from_bytes(parts[2])?;

        Ok((method, resource, protocol))
    }

    /// Parsea los headers y retorna el índice de la primera línea del body
    ///
    /// Si nunca aparece la línea vacía no hay body.
    fn parse_headers(lines: &[&[u8]]) -> Result<(HashMap<String, String>, usize), ParseError> {
        let mut headers = HashMap::new();

        for (index, line) in lines.iter().enumerate().skip(1) {
            if line.is_empty() {
                return Ok((headers, index + 1));
            }

            let text = String::from_utf8_lossy(line);
            let (name, value) = text
                .split_once(':')
                .ok_or_else(|| ParseError::MalformedHeader(text.to_string()))?;

            // Duplicados: gana el último
            headers.insert(name.trim().to_string(), value.trim().to_string());
        }

        Ok((headers, lines.len()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el recurso (path) del request
    pub fn path(&self) -> &str {
        &self.resource
    }

    /// Obtiene el protocolo
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (la llave distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body completo tal cual se parseó
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Vista del body como texto; los bytes inválidos se reemplazan por U+FFFD
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Obtiene el body limitado por `Content-Length`
    ///
    /// Si el header falta, no es un número o es mayor que el body recibido,
    /// se retorna el body completo.
    pub fn content(&self) -> &[u8] {
        let body = self.body.as_slice();
        match self.header("Content-Length").and_then(|v| v.parse::<usize>().ok()) {
            Some(len) if len < body.len() => &body[..len],
            _ => body,
        }
    }

    /// Obtiene todos los parámetros de ruta
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Obtiene un parámetro de ruta específico
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::http::{Request, Response};
    /// use http_server::router::Router;
    ///
    /// let mut router = Router::new();
    /// router.get("/echo/{str}", |req: &Request| {
    ///     assert_eq!(req.param("str"), Some("abc"));
    ///     Response::ok()
    /// });
    ///
    /// let request = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
    /// router.dispatch(request);
    /// ```
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// Inyecta los parámetros extraídos por el router
    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }
}

/// Separa el buffer por CRLF
///
/// Siempre retorna al menos una línea (vacía si el buffer lo es).
fn split_lines(buffer: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut rest = buffer;

    while let Some(pos) = rest.windows(CRLF.len()).position(|w| w == CRLF) {
        lines.push(&rest[..pos]);
        rest = &rest[pos + CRLF.len()..];
    }
    lines.push(rest);

    lines
}
