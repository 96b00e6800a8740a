use leptos::prelude::*;

use super::api::ApiClient;
use super::models::Usuario;

const CLAVE_TOKEN: &str = "token";

/// Session context shared through `provide_context`. The token is the only
/// cross-component shared resource: it is written here (login, logout,
/// invalidation) and read everywhere else when building requests.
#[derive(Clone, Copy)]
pub struct Sesion {
    token: RwSignal<Option<String>>,
    usuario: RwSignal<Option<Usuario>>,
    validando: RwSignal<bool>,
}

impl Sesion {
    pub fn nueva() -> Self {
        let guardado = leer_token_guardado();
        Sesion {
            validando: RwSignal::new(guardado.is_some()),
            token: RwSignal::new(guardado),
            usuario: RwSignal::new(None),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn token_actual(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn usuario(&self) -> Option<Usuario> {
        self.usuario.get()
    }

    pub fn activa(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn validando(&self) -> bool {
        self.validando.get()
    }

    pub fn es_jugador(&self) -> bool {
        self.usuario.get().is_some_and(|usuario| usuario.es_jugador())
    }

    pub fn es_club(&self) -> bool {
        self.usuario.get().is_some_and(|usuario| usuario.es_club())
    }

    pub fn iniciar(&self, token: String, usuario: Usuario) {
        guardar_token(&token);
        self.token.set(Some(token));
        self.usuario.set(Some(usuario));
        self.validando.set(false);
    }

    pub fn cerrar(&self) {
        borrar_token();
        self.token.set(None);
        self.usuario.set(None);
        self.validando.set(false);
    }
}

pub fn proveer_sesion() -> Sesion {
    let sesion = Sesion::nueva();
    provide_context(sesion);
    sesion
}

pub fn usar_sesion() -> Sesion {
    expect_context::<Sesion>()
}

/// Revalidates the persisted token against the backend on startup. A rejected
/// or expired token invalidates the whole session.
pub async fn validar_sesion(sesion: Sesion, api: ApiClient) {
    let Some(token) = sesion.token_actual() else {
        sesion.validando.set(false);
        return;
    };
    match api.sesion_actual(&token).await {
        Ok(usuario) => {
            sesion.usuario.set(Some(usuario));
            sesion.validando.set(false);
        }
        Err(err) => {
            log::warn!("sesión persistida rechazada: {err}");
            sesion.cerrar();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn almacen() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn leer_token_guardado() -> Option<String> {
    almacen()?.get_item(CLAVE_TOKEN).ok()?
}

#[cfg(target_arch = "wasm32")]
fn guardar_token(token: &str) {
    if let Some(almacen) = almacen() {
        let _ = almacen.set_item(CLAVE_TOKEN, token);
    }
}

#[cfg(target_arch = "wasm32")]
fn borrar_token() {
    if let Some(almacen) = almacen() {
        let _ = almacen.remove_item(CLAVE_TOKEN);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn leer_token_guardado() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn guardar_token(_token: &str) {}

#[cfg(not(target_arch = "wasm32"))]
fn borrar_token() {}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(tipo: &str) -> Usuario {
        Usuario {
            id: 1,
            nombre: "Ana".to_string(),
            email: "ana@reservapp.test".to_string(),
            tipo: tipo.to_string(),
            telefono: None,
        }
    }

    #[test]
    fn iniciar_y_cerrar_sesion() {
        let sesion = Sesion::nueva();
        assert!(!sesion.activa());

        sesion.iniciar("tok".to_string(), usuario("JUGADOR"));
        assert!(sesion.activa());
        assert_eq!(sesion.token_actual().as_deref(), Some("tok"));
        assert!(sesion.es_jugador());
        assert!(!sesion.es_club());

        sesion.cerrar();
        assert!(!sesion.activa());
        assert!(sesion.usuario().is_none());
    }

    #[test]
    fn tipo_de_usuario_sin_distincion_de_mayusculas() {
        let sesion = Sesion::nueva();
        sesion.iniciar("tok".to_string(), usuario("club"));
        assert!(sesion.es_club());
    }
}
