//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de borde con soporte
//! completo para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./edge_server --port 8080 \
//!   --workers 10 \
//!   --content-root ./resources \
//!   --upstream-host localhost \
//!   --upstream-port 8081
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! EDGE_PORT=8080 EDGE_HOST=0.0.0.0 ./edge_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP de borde
#[derive(Debug, Clone, Parser)]
#[command(name = "edge_server")]
#[command(about = "Servidor HTTP de borde: estáticos y reverse proxy con autenticación Basic")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "EDGE_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "EDGE_HOST")]
    pub host: String,

    // === Workers ===

    /// Tamaño del pool de workers que atienden conexiones
    #[arg(long, default_value = "10", env = "EDGE_WORKERS")]
    pub workers: usize,

    // === Contenido estático ===

    /// Content root con los subdirectorios html/, css/ e img/
    #[arg(long = "content-root", default_value = "./resources", env = "CONTENT_ROOT")]
    pub content_root: String,

    // === Credenciales ===

    /// Archivo properties con username=hash (una entrada por línea)
    #[arg(long = "users-file", default_value = "./resources/config/user.properties", env = "USERS_FILE")]
    pub users_file: String,

    /// Archivo properties con username=rol (opcional)
    #[arg(long = "roles-file", default_value = "./resources/config/role.properties", env = "ROLES_FILE")]
    pub roles_file: String,

    // === Upstream (WAS) ===

    /// Host del web application server upstream
    #[arg(long = "upstream-host", default_value = "localhost", env = "UPSTREAM_HOST")]
    pub upstream_host: String,

    /// Puerto del web application server upstream
    #[arg(long = "upstream-port", default_value = "8081", env = "UPSTREAM_PORT")]
    pub upstream_port: u16,

    /// Timeout para llamadas al upstream en milisegundos (0 = sin timeout)
    #[arg(long = "upstream-timeout-ms", default_value = "30000", env = "UPSTREAM_TIMEOUT_MS")]
    pub upstream_timeout_ms: u64,
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
    /// use edge_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.content_root.trim().is_empty() {
            return Err("Content root must not be empty".to_string());
        }

        if self.users_file.trim().is_empty() {
            return Err("Users file must not be empty".to_string());
        }

        if self.upstream_host.trim().is_empty() {
            return Err("Upstream host must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════╗");
        println!("║        Edge Server Configuration             ║");
        println!("╚══════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Workers:      {}", self.workers);
        println!();
        println!("📁 Static content:");
        println!("   Content root: {}", self.content_root);
        println!();
        println!("🔐 Credentials:");
        println!("   Users file:   {}", self.users_file);
        println!("   Roles file:   {}", self.roles_file);
        println!();
        println!("🔀 Upstream (WAS):");
        println!("   Origin:       http://{}:{}", self.upstream_host, self.upstream_port);
        if self.upstream_timeout_ms > 0 {
            println!("   Timeout:      {} ms", self.upstream_timeout_ms);
        } else {
            println!("   Timeout:      disabled");
        }
        println!();
        println!("════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            workers: 10,
            content_root: "./resources".to_string(),
            users_file: "./resources/config/user.properties".to_string(),
            roles_file: "./resources/config/role.properties".to_string(),
            upstream_host: "localhost".to_string(),
            upstream_port: 8081,
            upstream_timeout_ms: 30_000,
        }
    }
}
