//! # Edge Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de borde: parsea la configuración,
//! carga credenciales, bindea el puerto y corre el accept loop.

use edge_server::config::Config;
use edge_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Edge HTTP Server");
    println!("=================================\n");

    // Configuración desde CLI args y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Bind + carga de credenciales: cualquier falla acá es fatal
    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal al iniciar: {}", e);
            std::process::exit(1);
        }
    };

    // Accept loop (bloquea el thread principal)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
