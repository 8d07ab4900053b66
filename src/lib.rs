//! # Edge Server
//! src/lib.rs
//!
//! Servidor HTTP de borde implementado desde cero: acepta conexiones TCP,
//! autentica con HTTP Basic, y sirve archivos estáticos o reenvía al web
//! application server upstream (reverse proxy). Una request por conexión,
//! solo GET.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses HTTP/1.0
//! - `auth`: Almacén de credenciales y autenticación Basic
//! - `router`: Clasificación del path (estático / proxy / not found)
//! - `content`: Resolución de archivos bajo el content root
//! - `proxy`: Forward de `/api/*` hacia el upstream
//! - `server`: Acceptor TCP, pool de workers y dispatcher por conexión
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use edge_server::config::Config;
//! use edge_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el accept loop");
//! ```

pub mod auth;
pub mod config;
pub mod content;
pub mod http;
pub mod proxy;
pub mod router;
pub mod server;
