//! # Comandos de Archivos
//! src/commands/files.rs
//!
//! Endpoints de lectura/escritura sobre el directorio configurado con
//! `--directory`:
//! - `GET /files/{filename}`: devuelve el archivo como `application/octet-stream`
//! - `POST /files/{filename}`: escribe el body del request y responde 201
//!
//! Los errores de I/O nunca salen del handler: archivo inexistente → 404,
//! cualquier otro error → 500.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::http::{Request, Response};

/// Resuelve el nombre de archivo dentro del directorio base
///
/// Rechaza nombres que podrían salir del directorio.
fn resolve(dir: &Path, req: &Request) -> Option<PathBuf> {
    let name = req.param("filename")?;

    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        log::warn!("Nombre de archivo rechazado: {:?}", name);
        return None;
    }

    Some(dir.join(name))
}

/// Handler para `GET /files/{filename}`
pub fn read_file_handler(dir: &Path, req: &Request) -> Response {
    let Some(path) = resolve(dir, req) else {
        return Response::not_found();
    };

    match fs::read(&path) {
        Ok(data) => Response::octet_stream(data),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Archivo no encontrado: {}", path.display());
            Response::not_found()
        }
        Err(e) => {
            log::error!("Error leyendo {}: {}", path.display(), e);
            Response::internal_error()
        }
    }
}

/// Handler para `POST /files/{filename}`
///
/// Escribe el body limitado por `Content-Length` (si viene). Si el
/// archivo existe se sobrescribe.
pub fn write_file_handler(dir: &Path, req: &Request) -> Response {
    let Some(path) = resolve(dir, req) else {
        return Response::not_found();
    };

    match fs::write(&path, req.content()) {
        Ok(()) => {
            log::debug!("Archivo escrito: {} ({} bytes)", path.display(), req.content().len());
            Response::created()
        }
        Err(e) => {
            log::error!("Error escribiendo {}: {}", path.display(), e);
            Response::internal_error()
        }
    }
}
