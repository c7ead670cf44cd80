//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread:
//!
//! ```text
//! Idle → Reading → Parsed | ParseFailed → Dispatched → Responding → Closed
//! ```
//!
//! Se hace una única lectura por conexión, se responde una vez y se cierra.
//! El router se comparte entre threads sin locks: está completo antes del
//! accept loop y nunca se modifica.

use std::io::{self, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use thiserror::Error;

use crate::config::Config;
use crate::http::{Request, Response};
use crate::router::Router;

/// Errores de transporte
///
/// `Bind` y `Accept` son fatales para el proceso; `Io` solo termina la
/// conexión en la que ocurrió.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Error accepting connection: {0}")]
    Accept(#[source] io::Error),

    #[error("Connection I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor con una tabla de rutas ya construida
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Abre el listener en la dirección configurada
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address();
        TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })
    }

    /// Abre el listener y atiende conexiones hasta que el proceso termine
    pub fn run(&self) -> Result<(), ServerError> {
        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Accept loop sobre un listener existente
    ///
    /// Un error de `accept` termina el loop: sin listener no se puede
    /// seguir sirviendo.
    pub fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        match listener.local_addr() {
            Ok(addr) => log::info!("Servidor escuchando en {}", addr),
            Err(_) => log::info!("Servidor escuchando"),
        }
        log::debug!("Modo concurrente: un thread por conexión");

        for stream in listener.incoming() {
            let stream = stream.map_err(ServerError::Accept)?;

            let router = Arc::clone(&self.router);
            let buffer_size = self.config.read_buffer_size;

            let peer_addr = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());

            log::debug!("Nueva conexión desde: {}", peer_addr);

            thread::spawn(move || {
                if let Err(e) = Self::handle_connection(stream, &router, buffer_size) {
                    log::error!("Error en conexión {}: {}", peer_addr, e);
                }
            });
        }

        Ok(())
    }

    /// Atiende una conexión: lee, parsea, despacha, escribe
    ///
    /// El stream se cierra al salir de la función en cualquier camino.
    /// Un error de lectura se retorna sin escribir nada; un request
    /// inválido se responde con 404.
    pub fn handle_connection<S: Read + Write>(
        mut stream: S,
        router: &Router,
        buffer_size: usize,
    ) -> Result<(), ServerError> {
        let start = Instant::now();

        let mut buffer = vec![0u8; buffer_size];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            log::debug!("Conexión cerrada sin datos");
            return Ok(());
        }

        log::trace!("{} bytes leídos", bytes_read);

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                log::info!("{} {}", request.method(), request.path());
                router.dispatch(request)
            }
            Err(e) => {
                log::warn!("Error de parseo: {}", e);
                Response::not_found()
            }
        };

        let bytes = match response.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Error serializando la respuesta: {}", e);
                return Ok(());
            }
        };

        stream.write_all(&bytes)?;
        stream.flush()?;

        log::debug!(
            "{} ({:.2}ms)",
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }
}
