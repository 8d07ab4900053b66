//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (`tcp`)
//! 2. Encola conexiones aceptadas para un pool acotado de workers (`pool`)
//! 3. Atiende cada conexión con la máquina de estados del dispatcher
//!    (`dispatcher`)

pub mod dispatcher;
pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use dispatcher::Dispatcher;
pub use pool::{ConnectionQueue, WorkerPool};
pub use tcp::Server;
