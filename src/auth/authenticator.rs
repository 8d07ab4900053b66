//! # Autenticación HTTP Basic
//! src/auth/authenticator.rs
//!
//! Decodifica el header `Authorization: Basic <base64(user:pass)>`,
//! hashea el password y lo compara contra el almacén de credenciales.
//!
//! ## Sobre el hash
//!
//! Se usa MD5 sin salt por compatibilidad con los archivos de
//! credenciales existentes. MD5 NO es un hash apto para guardar
//! passwords: un despliegue serio debe migrar a bcrypt o argon2.
//! La comparación sí es de tiempo constante para no filtrar
//! información por timing.

use crate::auth::store::CredentialStore;
use base64::engine::general_purpose;
use base64::Engine as _;
use md5::{Digest, Md5};

/// Prefijo exacto del esquema soportado
const BASIC_PREFIX: &str = "Basic ";

/// Autenticador Basic contra un `CredentialStore`
///
/// Sin estado propio más allá de la referencia al almacén: cada
/// llamada a `authenticate` es una lectura pura.
pub struct Authenticator<'a> {
    store: &'a CredentialStore,
}

impl<'a> Authenticator<'a> {
    /// Crea un autenticador sobre el almacén dado
    pub fn new(store: &'a CredentialStore) -> Self {
        Self { store }
    }

    /// Autentica un header `Authorization` completo
    ///
    /// Retorna `false` ante cualquier problema: header ausente, esquema
    /// distinto de Basic, base64 inválido, separador `:` faltante,
    /// usuario desconocido o password incorrecto.
    ///
    /// # Ejemplo
    /// ```
    /// use edge_server::auth::{Authenticator, CredentialStore};
    ///
    /// let mut store = CredentialStore::new();
    /// store.insert("admin", "5f4dcc3b5aa765d61d8327deb882cf99"); // md5("password")
    ///
    /// let auth = Authenticator::new(&store);
    /// assert!(auth.authenticate(Some("Basic YWRtaW46cGFzc3dvcmQ=")));
    /// assert!(!auth.authenticate(Some("Basic YWRtaW46d3Jvbmc=")));
    /// assert!(!auth.authenticate(None));
    /// ```
    pub fn authenticate(&self, header: Option<&str>) -> bool {
        let Some((username, password)) = Self::decode_credentials(header) else {
            return false;
        };

        self.check_password(&username, &password)
    }

    /// Extrae el username del header, sin verificar el password
    ///
    /// Útil para logging y para consultas de rol.
    pub fn username_from_header(header: Option<&str>) -> Option<String> {
        Self::decode_credentials(header).map(|(user, _)| user)
    }

    /// Decodifica `Basic <base64>` en `(username, password)`
    ///
    /// El split es sobre el PRIMER `:`: los passwords pueden contener
    /// dos puntos, los usernames no.
    fn decode_credentials(header: Option<&str>) -> Option<(String, String)> {
        let header = header?;
        let encoded = header.strip_prefix(BASIC_PREFIX)?;

        let decoded_bytes = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded_bytes).ok()?;

        let colon_pos = decoded.find(':')?;
        let username = decoded[..colon_pos].to_string();
        let password = decoded[colon_pos + 1..].to_string();

        Some((username, password))
    }

    /// Verifica username + password contra el almacén
    fn check_password(&self, username: &str, password: &str) -> bool {
        let Some(stored_hash) = self.store.lookup_hash(username) else {
            return false;
        };

        let computed = hash_password(password);
        constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
    }
}

/// Calcula el hash MD5 de un password, en hex minúscula
///
/// # Ejemplo
/// ```
/// use edge_server::auth::hash_password;
/// assert_eq!(hash_password("password"), "5f4dcc3b5aa765d61d8327deb882cf99");
/// ```
pub fn hash_password(password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Comparación de bytes en tiempo constante
///
/// Recorre siempre ambos slices completos acumulando diferencias por XOR,
/// para que el tiempo no dependa de dónde difieren.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // md5("password") = 5f4dcc3b5aa765d61d8327deb882cf99
    const PASSWORD_MD5: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    fn store_with_admin() -> CredentialStore {
        let mut store = CredentialStore::new();
        store.insert("admin", PASSWORD_MD5);
        store
    }

    #[test]
    fn test_hash_password_known_value() {
        assert_eq!(hash_password("password"), PASSWORD_MD5);
    }

    #[test]
    fn test_hash_password_empty() {
        // md5("") es un valor bien conocido
        assert_eq!(hash_password(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_authenticate_valid_credentials() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        // base64("admin:password")
        assert!(auth.authenticate(Some("Basic YWRtaW46cGFzc3dvcmQ=")));
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        // base64("admin:wrong")
        assert!(!auth.authenticate(Some("Basic YWRtaW46d3Jvbmc=")));
    }

    #[test]
    fn test_authenticate_unknown_user() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        // base64("nadie:password")
        let encoded = general_purpose::STANDARD.encode("nadie:password");
        assert!(!auth.authenticate(Some(&format!("Basic {}", encoded))));
    }

    #[test]
    fn test_authenticate_missing_header() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        assert!(!auth.authenticate(None));
    }

    #[test]
    fn test_authenticate_wrong_scheme() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        assert!(!auth.authenticate(Some("Bearer abcdefgh1234567890")));
        assert!(!auth.authenticate(Some("basic YWRtaW46cGFzc3dvcmQ=")));
    }

    #[test]
    fn test_authenticate_invalid_base64() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        assert!(!auth.authenticate(Some("Basic !!!no-es-base64!!!")));
    }

    #[test]
    fn test_authenticate_missing_colon() {
        let store = store_with_admin();
        let auth = Authenticator::new(&store);

        // base64("adminpassword") — sin separador
        let encoded = general_purpose::STANDARD.encode("adminpassword");
        assert!(!auth.authenticate(Some(&format!("Basic {}", encoded))));
    }

    #[test]
    fn test_password_with_colon() {
        // El split es sobre el primer ':', el password puede tener más
        let mut store = CredentialStore::new();
        store.insert("u", &hash_password("pa:ss"));
        let auth = Authenticator::new(&store);

        let encoded = general_purpose::STANDARD.encode("u:pa:ss");
        assert!(auth.authenticate(Some(&format!("Basic {}", encoded))));
    }

    #[test]
    fn test_username_from_header() {
        let header = Some("Basic YWRtaW46cGFzc3dvcmQ=");
        assert_eq!(
            Authenticator::username_from_header(header),
            Some("admin".to_string())
        );
        assert_eq!(Authenticator::username_from_header(None), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
