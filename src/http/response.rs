//! # Construcción de Respuestas HTTP
//!
//! Un handler no escribe bytes: retorna una *descripción* de la respuesta
//! (tipo, contenido opcional y codificación) que este módulo convierte a
//! bytes HTTP/1.1 listos para el socket.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Encoding: gzip\r\n        <- solo con Encoding::Gzip
//! Content-Length: 26\r\n
//! \r\n
//! <bytes del body>
//! ```
//!
//! Solo `200 OK` con contenido lleva headers y body. El resto es la status
//! line seguida de una línea vacía.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_server::http::{Encoding, Response};
//!
//! let response = Response::text("abc123").with_encoding(Encoding::None);
//! let bytes = response.to_bytes().unwrap();
//!
//! assert_eq!(
//!     bytes,
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nabc123"
//! );
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

use super::{Protocol, StatusCode};

/// Tipo de contenido del body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `text/plain`
    PlainText,

    /// `application/octet-stream`
    OctetStream,
}

impl ContentKind {
    /// Valor del header `Content-Type`
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::PlainText => "text/plain",
            ContentKind::OctetStream => "application/octet-stream",
        }
    }
}

/// Contenido de una respuesta: tipo + bytes crudos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub kind: ContentKind,
    pub data: Vec<u8>,
}

/// Codificación aplicada al body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    None,
    Gzip,
}

impl Encoding {
    /// Elige la codificación a partir del header `Accept-Encoding`
    ///
    /// El header es una lista separada por comas; basta con que alguno de
    /// los valores sea `gzip`.
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::http::Encoding;
    ///
    /// assert_eq!(Encoding::negotiate(Some("deflate, gzip")), Encoding::Gzip);
    /// assert_eq!(Encoding::negotiate(Some("br")), Encoding::None);
    /// assert_eq!(Encoding::negotiate(None), Encoding::None);
    /// ```
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        let accepts_gzip = accept_encoding
            .map(|value| value.split(',').any(|scheme| scheme.trim() == "gzip"))
            .unwrap_or(false);

        if accepts_gzip {
            Encoding::Gzip
        } else {
            Encoding::None
        }
    }
}

/// Descripción de una respuesta HTTP/1.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Tipo de respuesta (200, 201, 404, 500)
    status: StatusCode,

    /// Contenido opcional; solo se envía con 200 OK
    content: Option<Content>,

    /// Codificación del contenido
    encoding: Encoding,
}

impl Response {
    /// Crea una respuesta sin contenido
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content: None,
            encoding: Encoding::None,
        }
    }

    /// 200 OK sin contenido
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    /// 201 Created
    pub fn created() -> Self {
        Self::new(StatusCode::Created)
    }

    /// 404 Not Found
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// 500 Internal Server Error
    pub fn internal_error() -> Self {
        Self::new(StatusCode::InternalServerError)
    }

    /// 200 OK con contenido `text/plain`
    pub fn text(body: &str) -> Self {
        Self::ok().with_content(ContentKind::PlainText, body.as_bytes().to_vec())
    }

    /// 200 OK con contenido `application/octet-stream`
    pub fn octet_stream(data: Vec<u8>) -> Self {
        Self::ok().with_content(ContentKind::OctetStream, data)
    }

    /// Establece el contenido de la respuesta
    pub fn with_content(mut self, kind: ContentKind, data: Vec<u8>) -> Self {
        self.content = Some(Content { kind, data });
        self
    }

    /// Establece la codificación del contenido
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Es determinística: la misma descripción produce siempre los mismos
    /// bytes (el header gzip no lleva timestamp ni nombre de archivo).
    ///
    /// # Errores
    ///
    /// Solo falla si la compresión gzip falla.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut result = Vec::new();

        // 1. Status line
        result.extend_from_slice(format!("{} {}\r\n", Protocol::Http11.as_str(), self.status).as_bytes());

        // 2. Headers + body, solo para 200 OK con contenido
        if let (StatusCode::Ok, Some(content)) = (self.status, &self.content) {
            result.extend_from_slice(
                format!("Content-Type: {}\r\n", content.kind.mime_type()).as_bytes(),
            );

            let body: Cow<'_, [u8]> = match self.encoding {
                Encoding::Gzip => {
                    result.extend_from_slice(b"Content-Encoding: gzip\r\n");
                    Cow::Owned(gzip(&content.data)?)
                }
                Encoding::None => Cow::Borrowed(&content.data),
            };

            result.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
            result.extend_from_slice(&body);
            return Ok(result);
        }

        // 3. Línea vacía final
        result.extend_from_slice(b"\r\n");

        Ok(result)
    }

    /// Obtiene el tipo de respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el contenido, si hay
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Obtiene la codificación
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

/// Comprime los bytes con framing gzip estándar
fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn split_head_body(bytes: &[u8]) -> (String, Vec<u8>) {
        let pos = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("missing blank line");
        (
            String::from_utf8(bytes[..pos + 4].to_vec()).unwrap(),
            bytes[pos + 4..].to_vec(),
        )
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.content().is_none());
        assert_eq!(response.encoding(), Encoding::None);
    }

    #[test]
    fn test_plain_text_bytes() {
        let bytes = Response::text("abc123").to_bytes().unwrap();

        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nabc123".to_vec()
        );
    }

    #[test]
    fn test_octet_stream_bytes() {
        let data = vec![0x00, 0x01, 0x02, 0xFF];
        let bytes = Response::octet_stream(data.clone()).to_bytes().unwrap();
        let (head, body) = split_head_body(&bytes);

        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: application/octet-stream\r\n"));
        assert!(head.contains("Content-Length: 4\r\n"));
        assert_eq!(body, data);
    }

    #[test]
    fn test_ok_without_content() {
        let bytes = Response::ok().to_bytes().unwrap();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
    }

    #[test]
    fn test_statuses_without_body() {
        assert_eq!(Response::created().to_bytes().unwrap(), b"HTTP/1.1 201 Created\r\n\r\n".to_vec());
        assert_eq!(Response::not_found().to_bytes().unwrap(), b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
        assert_eq!(
            Response::internal_error().to_bytes().unwrap(),
            b"HTTP/1.1 500 Internal Server Error\r\n\r\n".to_vec()
        );
    }

    #[test]
    fn test_content_ignored_unless_ok() {
        let response = Response::created().with_content(ContentKind::PlainText, b"ignored".to_vec());
        assert_eq!(response.to_bytes().unwrap(), b"HTTP/1.1 201 Created\r\n\r\n".to_vec());
    }

    #[test]
    fn test_gzip_round_trip() {
        let response = Response::text("abc123").with_encoding(Encoding::Gzip);
        let bytes = response.to_bytes().unwrap();
        let (head, body) = split_head_body(&bytes);

        assert!(head.contains("Content-Encoding: gzip\r\n"));
        assert!(head.contains(&format!("Content-Length: {}\r\n", body.len())));
        assert!(!head.contains("Content-Length: 6\r\n"));

        let mut decoded = String::new();
        GzDecoder::new(&body[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc123");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let plain = Response::text("same");
        let gzipped = Response::text("same").with_encoding(Encoding::Gzip);

        assert_eq!(plain.to_bytes().unwrap(), plain.to_bytes().unwrap());
        assert_eq!(gzipped.to_bytes().unwrap(), gzipped.to_bytes().unwrap());
    }

    #[test]
    fn test_negotiate() {
        assert_eq!(Encoding::negotiate(Some("gzip")), Encoding::Gzip);
        assert_eq!(Encoding::negotiate(Some("invalid-1, gzip, invalid-2")), Encoding::Gzip);
        assert_eq!(Encoding::negotiate(Some("invalid-1, invalid-2")), Encoding::None);
        assert_eq!(Encoding::negotiate(Some("")), Encoding::None);
        assert_eq!(Encoding::negotiate(None), Encoding::None);
    }
}
