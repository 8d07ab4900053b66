//! # Decisión de Ruteo
//! src/router/mod.rs
//!
//! Este módulo clasifica el path de un request en una de tres variantes:
//! archivo estático, proxy hacia el upstream, o not found.
//!
//! ## Arquitectura
//!
//! ```text
//! path → RouteDecision → {Static | ProxyApi | NotFound}
//! ```
//!
//! La decisión es una función pura del path, con precedencia fija:
//! primero las extensiones conocidas, después el prefijo `/api/`.
//! La tabla es deliberadamente chica; extenderla es agregar un brazo
//! al match sin tocar el dispatcher.

/// Resultado de clasificar el path de un request
///
/// Exactamente una variante por path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Archivo estático bajo el content root
    Static {
        /// Content-Type a declarar en la respuesta
        content_type: &'static str,
        /// Subdirectorio bajo el content root (html, css, img)
        subdir: &'static str,
    },

    /// Forward al web application server upstream
    ProxyApi,

    /// Ninguna regla aplica
    NotFound,
}

impl RouteDecision {
    /// Clasifica un path según la tabla de ruteo fija
    ///
    /// Precedencia: `.html` → `.css` → `.png` → prefijo `/api/` → NotFound.
    ///
    /// # Ejemplo
    /// ```
    /// use edge_server::router::RouteDecision;
    ///
    /// let decision = RouteDecision::decide("/index.html");
    /// assert_eq!(decision, RouteDecision::Static {
    ///     content_type: "text/html",
    ///     subdir: "html",
    /// });
    ///
    /// assert_eq!(RouteDecision::decide("/api/users"), RouteDecision::ProxyApi);
    /// assert_eq!(RouteDecision::decide("/whatever"), RouteDecision::NotFound);
    /// ```
    pub fn decide(path: &str) -> Self {
        if path.ends_with(".html") {
            RouteDecision::Static {
                content_type: "text/html",
                subdir: "html",
            }
        } else if path.ends_with(".css") {
            RouteDecision::Static {
                content_type: "text/css",
                subdir: "css",
            }
        } else if path.ends_with(".png") {
            RouteDecision::Static {
                content_type: "image/png",
                subdir: "img",
            }
        } else if path.starts_with("/api/") {
            RouteDecision::ProxyApi
        } else {
            RouteDecision::NotFound
        }
    }
}
