//! # Resolución de Archivos Estáticos
//! src/content/mod.rs
//!
//! Mapea un path pedido por el cliente a un archivo bajo el content root,
//! organizado por tipo:
//!
//! ```text
//! resources/
//! ├── html/   ← *.html
//! ├── css/    ← *.css
//! └── img/    ← *.png
//! ```
//!
//! Cualquier falla de IO (archivo inexistente, permisos, error de disco)
//! se reporta como `NotFound`: el cliente solo distingue 200 de 404.
//!
//! A diferencia del diseño original, los paths con segmentos `..` se
//! rechazan antes de tocar el filesystem, para que un request no pueda
//! escapar del content root.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Error al resolver un archivo estático
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// El archivo no existe, no se puede leer, o el path es inseguro
    NotFound,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::NotFound => write!(f, "File not found"),
        }
    }
}

impl std::error::Error for ContentError {}

/// Resolver de archivos estáticos bajo un content root
#[derive(Debug, Clone)]
pub struct ContentResolver {
    root: PathBuf,
}

impl ContentResolver {
    /// Crea un resolver con el content root dado
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Obtiene el content root configurado
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve y lee un archivo: `root/subdir/<path>`
    ///
    /// El path del cliente se usa casi verbatim: solo se quita el `/`
    /// inicial y se validan los segmentos.
    ///
    /// # Retorna
    ///
    /// * `Ok(Vec<u8>)` - Contenido completo del archivo
    /// * `Err(ContentError::NotFound)` - Inexistente, ilegible o inseguro
    pub fn resolve(&self, subdir: &str, path: &str) -> Result<Vec<u8>, ContentError> {
        let relative = path.trim_start_matches('/');

        if !Self::is_safe_path(relative) {
            return Err(ContentError::NotFound);
        }

        let full_path = self.root.join(subdir).join(relative);

        fs::read(&full_path).map_err(|_| ContentError::NotFound)
    }

    /// Valida que un path relativo no escape del content root
    ///
    /// Rechaza segmentos `..`, paths absolutos y prefijos de drive.
    fn is_safe_path(relative: &str) -> bool {
        if relative.is_empty() {
            return false;
        }

        Path::new(relative).components().all(|c| {
            matches!(c, Component::Normal(_) | Component::CurDir)
        })
    }
}
