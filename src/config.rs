//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_server --port 4221 --directory /tmp/archivos
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/archivos RUST_LOG=debug ./http_server
//! ```

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http_server")]
#[command(about = "Servidor HTTP/1.1 mínimo con router de rutas parametrizadas")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio de archivos; habilita las rutas /files/{filename}
    #[arg(short, long, env = "FILES_DIR")]
    pub directory: Option<PathBuf>,

    /// Tamaño del buffer de la única lectura por conexión (bytes)
    #[arg(long = "read-buffer", default_value = "8192", env = "READ_BUFFER_SIZE")]
    pub read_buffer_size: usize,

    /// Filtro de logging (sintaxis de env_logger: "info", "http_server=debug", ...)
    #[arg(long = "log-level", default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

/// Errores de validación de la configuración
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Read buffer size must be >= 1")]
    EmptyReadBuffer,

    #[error("Files directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Files path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_buffer_size == 0 {
            return Err(ConfigError::EmptyReadBuffer);
        }

        if let Some(dir) = &self.directory {
            if !dir.exists() {
                return Err(ConfigError::DirectoryNotFound(dir.clone()));
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        log::info!("Dirección:   {}", self.address());
        log::info!("Buffer:      {} bytes", self.read_buffer_size);
        match &self.directory {
            Some(dir) => log::info!("Archivos:    {}", dir.display()),
            None => log::info!("Archivos:    deshabilitado"),
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: None,
            read_buffer_size: 8192,
            log_level: "info".to_string(),
        }
    }
}
