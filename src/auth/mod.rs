//! # Módulo de Autenticación
//! src/auth/mod.rs
//!
//! Este módulo implementa la puerta de autenticación del servidor:
//! 1. `store`: almacén inmutable username → password-hash (+ roles)
//! 2. `authenticator`: chequeo de credenciales HTTP Basic
//!
//! El almacén se carga una vez al arranque y se comparte read-only
//! entre todos los workers.

pub mod authenticator;
pub mod store;

// Re-exportar para facilitar el uso
pub use authenticator::{hash_password, Authenticator};
pub use store::{CredentialStore, StoreError};
