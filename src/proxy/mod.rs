//! # Proxy Inverso hacia el WAS
//! src/proxy/mod.rs
//!
//! Reenvía los requests `/api/*` al web application server upstream
//! (por defecto `localhost:8081`) como un GET saliente, y devuelve el
//! body de la respuesta.
//!
//! ## Quirks heredados (deliberados)
//!
//! - El texto de la respuesta upstream se devuelve con TODAS sus líneas
//!   concatenadas sin separador. Para JSON en una línea es inocuo; para
//!   JSON multilínea compacta el texto sin romper su validez.
//! - Ante cualquier error de conexión o IO contra el upstream se
//!   devuelve un body vacío y el cliente igual recibe 200. El error
//!   solo queda en el log.

use std::time::Duration;

/// Forwarder de requests hacia un origin upstream fijo
pub struct Forwarder {
    agent: ureq::Agent,
    origin: String,
}

impl Forwarder {
    /// Crea un forwarder hacia `http://host:port`
    ///
    /// `timeout_ms = 0` desactiva el timeout (comportamiento original).
    ///
    /// # Ejemplo
    /// ```
    /// use edge_server::proxy::Forwarder;
    ///
    /// let forwarder = Forwarder::new("localhost", 8081, 30_000);
    /// assert_eq!(forwarder.origin(), "http://localhost:8081");
    /// ```
    pub fn new(host: &str, port: u16, timeout_ms: u64) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Self {
            agent: builder.build(),
            origin: format!("http://{}:{}", host, port),
        }
    }

    /// Obtiene el origin configurado
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Reenvía un path al upstream y retorna el body como texto
    ///
    /// El path se concatena al origin sin modificar. Las líneas de la
    /// respuesta se unen sin separador (quirk heredado). Ante error de
    /// upstream retorna string vacío.
    pub fn forward(&self, path: &str) -> String {
        let url = format!("{}{}", self.origin, path);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(e) => {
                eprintln!("   ❌ Upstream error en GET {}: {}", url, e);
                return String::new();
            }
        };

        let text = match response.into_string() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("   ❌ Error leyendo body del upstream {}: {}", url, e);
                return String::new();
            }
        };

        join_lines(&text)
    }
}

/// Une todas las líneas de un texto sin separador
fn join_lines(text: &str) -> String {
    text.lines().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Upstream falso: responde un HTTP 200 fijo a una conexión y termina
    fn fake_upstream(body: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        port
    }

    #[test]
    fn test_origin_format() {
        let forwarder = Forwarder::new("localhost", 8081, 0);
        assert_eq!(forwarder.origin(), "http://localhost:8081");
    }

    #[test]
    fn test_forward_returns_upstream_body() {
        let port = fake_upstream(r#"{"users":[1,2,3]}"#);
        let forwarder = Forwarder::new("127.0.0.1", port, 5_000);

        let body = forwarder.forward("/api/users");
        assert_eq!(body, r#"{"users":[1,2,3]}"#);
    }

    #[test]
    fn test_forward_joins_lines_without_separator() {
        let port = fake_upstream("{\n  \"ok\": true\n}");
        let forwarder = Forwarder::new("127.0.0.1", port, 5_000);

        let body = forwarder.forward("/api/status");
        assert_eq!(body, "{  \"ok\": true}");
    }

    #[test]
    fn test_forward_upstream_down_returns_empty() {
        // Puerto sin listener: error de conexión → body vacío
        let forwarder = Forwarder::new("127.0.0.1", 1, 2_000);

        let body = forwarder.forward("/api/users");
        assert_eq!(body, "");
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines("a\nb\nc"), "abc");
        assert_eq!(join_lines("a\r\nb\r\n"), "ab");
        assert_eq!(join_lines("una sola linea"), "una sola linea");
        assert_eq!(join_lines(""), "");
    }
}
