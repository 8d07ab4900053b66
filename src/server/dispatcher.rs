//! # Dispatcher de Requests
//! src/server/dispatcher.rs
//!
//! El dispatcher es dueño del ciclo de vida de UNA conexión aceptada:
//!
//! ```text
//! AwaitRequestLine → ParseHeaders → Authenticate → Route → Respond → Closed
//! ```
//!
//! - La lectura acumula del socket hasta ver la línea en blanco que
//!   termina los headers (o EOF, o el tope del buffer): un request
//!   repartido en varios segmentos TCP se parsea completo.
//! - Request vacío o request line inválida: la conexión se cierra sin
//!   escribir respuesta alguna.
//! - Autenticación fallida: 401 y cierre, sin tocar archivos ni upstream.
//! - Ruta estática: se lee el archivo bajo el content root (404 si falta).
//! - Ruta `/api/*`: se reenvía al upstream y el body vuelve como JSON.
//! - Cualquier otra ruta: 404.
//!
//! Todos los errores se resuelven acá adentro: nada de lo que pase en
//! una conexión afecta al acceptor ni a otras conexiones en vuelo.

use crate::auth::{Authenticator, CredentialStore};
use crate::content::ContentResolver;
use crate::http::{Request, Response, StatusCode};
use crate::proxy::Forwarder;
use crate::router::RouteDecision;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

/// Tamaño máximo de request que se lee (request line + headers)
const READ_BUFFER_SIZE: usize = 8192;

/// Atiende conexiones individuales: parsea, autentica, rutea y responde
///
/// Compartido read-only entre todos los workers vía `Arc`.
pub struct Dispatcher {
    store: Arc<CredentialStore>,
    resolver: ContentResolver,
    forwarder: Forwarder,
}

impl Dispatcher {
    /// Crea un dispatcher con sus tres colaboradores
    pub fn new(store: Arc<CredentialStore>, resolver: ContentResolver, forwarder: Forwarder) -> Self {
        Self {
            store,
            resolver,
            forwarder,
        }
    }

    /// Maneja una conexión completa: lee, responde y cierra
    ///
    /// El socket se cierra al salir de esta función en todos los caminos
    /// (éxito y error), porque `stream` se dropea acá.
    pub fn handle(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let bytes_read = Self::read_request(&mut stream, &mut buffer)?;

        // El peer cerró sin mandar nada: no hay respuesta que dar
        if bytes_read == 0 {
            return Ok(());
        }

        let request = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => request,
            Err(e) => {
                // Request malformado: se corta la conexión sin respuesta
                println!("   ❌ Parse error: {} (conexión cerrada)", e);
                return Ok(());
            }
        };

        let username = Authenticator::username_from_header(request.authorization())
            .unwrap_or_else(|| "-".to_string());
        println!("   ✅ {} {} (user: {})", request.method(), request.path(), username);

        let response = self.dispatch(&request);

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        println!("   ✅ {}\n", response.status());

        Ok(())
    }

    /// Lee del socket hasta completar el bloque de headers
    ///
    /// Acumula lecturas hasta ver la línea en blanco que cierra los
    /// headers, EOF, o el tope del buffer. Un GET cuyos headers llegan
    /// en un segmento TCP posterior a la request line se lee entero.
    fn read_request(stream: &mut TcpStream, buffer: &mut [u8]) -> std::io::Result<usize> {
        let mut total = 0;

        while total < buffer.len() {
            let n = stream.read(&mut buffer[total..])?;
            if n == 0 {
                break;
            }
            total += n;

            if Self::headers_complete(&buffer[..total]) {
                break;
            }
        }

        Ok(total)
    }

    /// Detecta la línea en blanco que termina los headers
    ///
    /// Acepta terminadores CRLF y LF pelado, igual que el parser.
    fn headers_complete(buffer: &[u8]) -> bool {
        buffer.windows(4).any(|w| w == b"\r\n\r\n")
            || buffer.windows(2).any(|w| w == b"\n\n")
    }

    /// Decide la respuesta para un request ya parseado
    ///
    /// Separado de `handle` para poder testearlo sin sockets.
    pub fn dispatch(&self, request: &Request) -> Response {
        // 1. Puerta de autenticación: sin credenciales válidas no se
        //    ejecuta ni la resolución estática ni el proxy
        let authenticator = Authenticator::new(&self.store);
        if !authenticator.authenticate(request.authorization()) {
            return Response::unauthorized();
        }

        // 2. Ruteo por suffix/prefix del path
        match RouteDecision::decide(request.path()) {
            RouteDecision::Static { content_type, subdir } => {
                self.serve_static(request.path(), content_type, subdir)
            }
            RouteDecision::ProxyApi => self.serve_proxy(request.path()),
            RouteDecision::NotFound => Response::not_found(),
        }
    }

    /// Sirve un archivo estático, o 404 si no se puede leer
    fn serve_static(&self, path: &str, content_type: &str, subdir: &str) -> Response {
        match self.resolver.resolve(subdir, path) {
            Ok(bytes) => Response::new(StatusCode::Ok)
                .with_header("Content-Type", content_type)
                .with_body_bytes(bytes),
            Err(_) => Response::not_found(),
        }
    }

    /// Reenvía al upstream y arma la respuesta JSON
    ///
    /// Un upstream caído produce body vacío con 200 (quirk heredado).
    fn serve_proxy(&self, path: &str) -> Response {
        let body = self.forwarder.forward(path);

        Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }
}
