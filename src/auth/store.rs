//! # Almacén de Credenciales
//! src/auth/store.rs
//!
//! Mapa en memoria de username → password-hash (y opcionalmente
//! username → rol). Se construye una vez al arranque desde archivos
//! estilo properties y es inmutable después: se comparte vía `Arc`
//! entre todos los workers sin locking.
//!
//! ## Formato de archivo
//!
//! Una entrada por línea, `username=hash`:
//!
//! ```text
//! # usuarios del edge
//! admin=5f4dcc3b5aa765d61d8327deb882cf99
//! pablo=098f6bcd4621d373cade4e832627b4f6
//! ```
//!
//! Líneas vacías y comentarios (`#` o `!`) se ignoran. Si un username
//! se repite, gana la última entrada.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Error al cargar los archivos de credenciales
#[derive(Debug)]
pub enum StoreError {
    /// No se pudo leer el archivo de usuarios
    Io(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Cannot read credentials file: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Almacén inmutable de credenciales
///
/// Invariantes: username único (el HashMap lo garantiza), hash en hex
/// minúscula de largo fijo.
#[derive(Debug, Default)]
pub struct CredentialStore {
    /// username → hash MD5 (hex) del password
    credentials: HashMap<String, String>,

    /// username → rol (opcional, puede estar vacío)
    roles: HashMap<String, String>,
}

impl CredentialStore {
    /// Crea un almacén vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga el almacén desde archivos properties
    ///
    /// El archivo de usuarios es obligatorio; el de roles es opcional
    /// (pasar `None` o un path inexistente deja el mapa de roles vacío).
    ///
    /// # Errores
    ///
    /// Retorna error si el archivo de usuarios no se puede leer.
    pub fn load(users_file: &Path, roles_file: Option<&Path>) -> Result<Self, StoreError> {
        let users_text = fs::read_to_string(users_file)?;
        let credentials = Self::parse_properties(&users_text);

        let roles = match roles_file {
            Some(path) if path.exists() => {
                let roles_text = fs::read_to_string(path)?;
                Self::parse_properties(&roles_text)
            }
            _ => HashMap::new(),
        };

        Ok(Self { credentials, roles })
    }

    /// Parsea texto estilo properties: una entrada `key=value` por línea
    fn parse_properties(text: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim().to_string();
                let value = line[eq_pos + 1..].trim().to_string();
                if !key.is_empty() {
                    map.insert(key, value);
                }
            }
        }

        map
    }

    /// Inserta una credencial directamente (para tests y embedding)
    pub fn insert(&mut self, username: &str, password_hash: &str) {
        self.credentials.insert(username.to_string(), password_hash.to_string());
    }

    /// Asigna un rol a un usuario (para tests y embedding)
    pub fn insert_role(&mut self, username: &str, role: &str) {
        self.roles.insert(username.to_string(), role.to_string());
    }

    /// Busca el hash almacenado para un username
    pub fn lookup_hash(&self, username: &str) -> Option<&str> {
        self.credentials.get(username).map(|s| s.as_str())
    }

    /// Obtiene el rol de un usuario, si tiene uno asignado
    pub fn role(&self, username: &str) -> Option<&str> {
        self.roles.get(username).map(|s| s.as_str())
    }

    /// Verifica si un usuario tiene exactamente el rol dado
    pub fn has_role(&self, username: &str, role: &str) -> bool {
        self.role(username) == Some(role)
    }

    /// Cantidad de usuarios cargados
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Verifica si el almacén está vacío
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("edge_store_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_empty_store() {
        let store = CredentialStore::new();
        assert!(store.is_empty());
        assert_eq!(store.lookup_hash("admin"), None);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = CredentialStore::new();
        store.insert("admin", "5f4dcc3b5aa765d61d8327deb882cf99");

        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup_hash("admin"), Some("5f4dcc3b5aa765d61d8327deb882cf99"));
        assert_eq!(store.lookup_hash("otro"), None);
    }

    #[test]
    fn test_parse_properties_basic() {
        let map = CredentialStore::parse_properties(
            "admin=abc123\npablo=def456\n"
        );
        assert_eq!(map.get("admin"), Some(&"abc123".to_string()));
        assert_eq!(map.get("pablo"), Some(&"def456".to_string()));
    }

    #[test]
    fn test_parse_properties_skips_comments_and_blanks() {
        let map = CredentialStore::parse_properties(
            "# comentario\n\n! otro comentario\nadmin=abc\n"
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("admin"), Some(&"abc".to_string()));
    }

    #[test]
    fn test_parse_properties_duplicate_last_wins() {
        let map = CredentialStore::parse_properties("u=uno\nu=dos\n");
        assert_eq!(map.get("u"), Some(&"dos".to_string()));
    }

    #[test]
    fn test_parse_properties_trims_whitespace() {
        let map = CredentialStore::parse_properties("  admin = abc123  \n");
        assert_eq!(map.get("admin"), Some(&"abc123".to_string()));
    }

    #[test]
    fn test_parse_properties_value_with_equals() {
        // Solo el primer '=' separa key de value
        let map = CredentialStore::parse_properties("k=a=b\n");
        assert_eq!(map.get("k"), Some(&"a=b".to_string()));
    }

    #[test]
    fn test_load_from_files() {
        let users = temp_file("user.properties", "admin=5f4dcc3b5aa765d61d8327deb882cf99\n");
        let roles = temp_file("role.properties", "admin=administrator\n");

        let store = CredentialStore::load(&users, Some(&roles)).unwrap();

        assert_eq!(store.lookup_hash("admin"), Some("5f4dcc3b5aa765d61d8327deb882cf99"));
        assert_eq!(store.role("admin"), Some("administrator"));
        assert!(store.has_role("admin", "administrator"));
        assert!(!store.has_role("admin", "guest"));
    }

    #[test]
    fn test_load_missing_users_file_is_error() {
        let result = CredentialStore::load(Path::new("/nonexistent/user.properties"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_roles_file_is_ok() {
        let users = temp_file("user_only.properties", "admin=abc\n");
        let store = CredentialStore::load(&users, Some(Path::new("/nonexistent/role.properties"))).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.role("admin"), None);
    }
}
