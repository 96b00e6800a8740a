use std::collections::HashSet;

use async_trait::async_trait;
use leptos::prelude::*;

use super::api::{ApiClient, ApiError};
use super::models::Favorito;
use super::session::usar_sesion;

#[async_trait(?Send)]
pub trait FavoritosBackend {
    async fn mis_favoritos(&self, token: &str) -> Result<Vec<Favorito>, ApiError>;
    async fn agregar_favorito(
        &self,
        token: &str,
        cancha_id: i64,
        notas: Option<&str>,
    ) -> Result<(), ApiError>;
    async fn remover_favorito(&self, token: &str, cancha_id: i64) -> Result<(), ApiError>;
    async fn actualizar_notas_favorito(
        &self,
        token: &str,
        cancha_id: i64,
        notas: &str,
    ) -> Result<(), ApiError>;
}

/// Fast-membership set derived from the authoritative list; recomputed on
/// every reload, never patched incrementally.
pub fn ids_favoritos(favoritos: &[Favorito]) -> HashSet<i64> {
    favoritos.iter().map(|favorito| favorito.cancha.id).collect()
}

/// Loads the user's favorites. Without a token, or when the backend rejects
/// the credentials (401/403), this is simply "no favorites" rather than an
/// error: an absent session is an expected state here.
pub async fn cargar_favoritos<B: FavoritosBackend>(
    backend: &B,
    token: Option<&str>,
) -> Result<Vec<Favorito>, ApiError> {
    let Some(token) = token else {
        return Ok(Vec::new());
    };
    match backend.mis_favoritos(token).await {
        Ok(favoritos) => Ok(favoritos),
        Err(err) if err.es_no_autorizado() => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Adds or removes the cancha depending on current membership, then re-fetches
/// the canonical list. Local state is never patched in place.
pub async fn alternar_favorito<B: FavoritosBackend>(
    backend: &B,
    token: &str,
    ids: &HashSet<i64>,
    cancha_id: i64,
) -> Result<Vec<Favorito>, ApiError> {
    if ids.contains(&cancha_id) {
        backend.remover_favorito(token, cancha_id).await?;
    } else {
        backend.agregar_favorito(token, cancha_id, None).await?;
    }
    cargar_favoritos(backend, Some(token)).await
}

pub async fn actualizar_notas<B: FavoritosBackend>(
    backend: &B,
    token: &str,
    cancha_id: i64,
    notas: &str,
) -> Result<Vec<Favorito>, ApiError> {
    backend
        .actualizar_notas_favorito(token, cancha_id, notas)
        .await?;
    cargar_favoritos(backend, Some(token)).await
}

/// Signal bundle the pages render from; the list and the id set always come
/// from the latest reload together.
#[derive(Clone, Copy)]
pub struct EstadoFavoritos {
    pub favoritos: RwSignal<Vec<Favorito>>,
    pub ids: RwSignal<HashSet<i64>>,
    pub cargando: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl EstadoFavoritos {
    fn nuevo() -> Self {
        EstadoFavoritos {
            favoritos: RwSignal::new(Vec::new()),
            ids: RwSignal::new(HashSet::new()),
            cargando: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn es_favorito(&self, cancha_id: i64) -> bool {
        self.ids.get().contains(&cancha_id)
    }

    fn aplicar(&self, favoritos: Vec<Favorito>) {
        self.ids.set(ids_favoritos(&favoritos));
        self.favoritos.set(favoritos);
    }

    pub fn recargar(&self, api: ApiClient, token: Option<String>) {
        let estado = *self;
        estado.cargando.set(true);
        estado.error.set(None);
        leptos::task::spawn_local(async move {
            match cargar_favoritos(&api, token.as_deref()).await {
                Ok(favoritos) => estado.aplicar(favoritos),
                Err(err) => {
                    // the previous in-memory list stays as it was
                    estado
                        .error
                        .set(Some(err.mensaje_o("Error al cargar favoritos")));
                }
            }
            estado.cargando.set(false);
        });
    }

    pub fn alternar(&self, api: ApiClient, token: String, cancha_id: i64) {
        let estado = *self;
        estado.cargando.set(true);
        estado.error.set(None);
        leptos::task::spawn_local(async move {
            let ids = estado.ids.get_untracked();
            match alternar_favorito(&api, &token, &ids, cancha_id).await {
                Ok(favoritos) => estado.aplicar(favoritos),
                Err(err) => {
                    estado
                        .error
                        .set(Some(err.mensaje_o("Error al actualizar favoritos")));
                }
            }
            estado.cargando.set(false);
        });
    }

    pub fn guardar_notas(&self, api: ApiClient, token: String, cancha_id: i64, notas: String) {
        let estado = *self;
        estado.cargando.set(true);
        estado.error.set(None);
        leptos::task::spawn_local(async move {
            match actualizar_notas(&api, &token, cancha_id, &notas).await {
                Ok(favoritos) => estado.aplicar(favoritos),
                Err(err) => {
                    estado
                        .error
                        .set(Some(err.mensaje_o("Error al actualizar notas")));
                }
            }
            estado.cargando.set(false);
        });
    }
}

/// Hook-style constructor: loads on mount and reloads whenever the session
/// token changes, exactly like the rest of the read flows.
pub fn usar_favoritos() -> EstadoFavoritos {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let estado = EstadoFavoritos::nuevo();
    Effect::new(move |_| {
        estado.recargar(api.clone(), sesion.token());
    });
    estado
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::data::models::Cancha;

    fn cancha(id: i64) -> Cancha {
        Cancha {
            id,
            nombre: format!("Cancha {id}"),
            descripcion: None,
            deporte: "futbol".to_string(),
            ubicacion: "Centro".to_string(),
            precio_por_hora: Some(1000.0),
            imagenes: Vec::new(),
            disponible: true,
        }
    }

    fn favorito(id: i64, cancha_id: i64) -> Favorito {
        Favorito {
            id,
            cancha: cancha(cancha_id),
            notas: None,
            fecha_agregado: None,
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        listado: RefCell<Vec<Result<Vec<Favorito>, ApiError>>>,
        llamadas: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl FavoritosBackend for FakeBackend {
        async fn mis_favoritos(&self, _token: &str) -> Result<Vec<Favorito>, ApiError> {
            self.llamadas.borrow_mut().push("listar".to_string());
            if self.listado.borrow().is_empty() {
                return Ok(Vec::new());
            }
            self.listado.borrow_mut().remove(0)
        }

        async fn agregar_favorito(
            &self,
            _token: &str,
            cancha_id: i64,
            _notas: Option<&str>,
        ) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("agregar {cancha_id}"));
            Ok(())
        }

        async fn remover_favorito(&self, _token: &str, cancha_id: i64) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("remover {cancha_id}"));
            Ok(())
        }

        async fn actualizar_notas_favorito(
            &self,
            _token: &str,
            cancha_id: i64,
            _notas: &str,
        ) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("notas {cancha_id}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn sin_token_no_hay_peticion() {
        let backend = FakeBackend::default();
        let favoritos = cargar_favoritos(&backend, None).await.unwrap();
        assert!(favoritos.is_empty());
        assert!(backend.llamadas.borrow().is_empty());
    }

    #[tokio::test]
    async fn credenciales_rechazadas_equivalen_a_vacio() {
        let backend = FakeBackend::default();
        backend.listado.borrow_mut().push(Err(ApiError::Rechazo {
            status: 401,
            mensaje: "token vencido".to_string(),
        }));
        let favoritos = cargar_favoritos(&backend, Some("tok")).await.unwrap();
        assert!(favoritos.is_empty());
    }

    #[tokio::test]
    async fn otros_errores_si_se_propagan() {
        let backend = FakeBackend::default();
        backend
            .listado
            .borrow_mut()
            .push(Err(ApiError::Red("timeout".to_string())));
        assert!(cargar_favoritos(&backend, Some("tok")).await.is_err());
    }

    #[tokio::test]
    async fn alternar_agrega_y_luego_recarga() {
        let backend = FakeBackend::default();
        backend
            .listado
            .borrow_mut()
            .push(Ok(vec![favorito(1, 10), favorito(2, 20)]));

        let ids = HashSet::new();
        let favoritos = alternar_favorito(&backend, "tok", &ids, 20).await.unwrap();

        assert_eq!(
            *backend.llamadas.borrow(),
            vec!["agregar 20".to_string(), "listar".to_string()]
        );
        // membership reflects only the reloaded list
        let ids = ids_favoritos(&favoritos);
        assert!(ids.contains(&10));
        assert!(ids.contains(&20));
    }

    #[tokio::test]
    async fn alternar_remueve_cuando_ya_es_favorito() {
        let backend = FakeBackend::default();
        backend.listado.borrow_mut().push(Ok(vec![favorito(1, 10)]));

        let ids: HashSet<i64> = [20].into_iter().collect();
        let favoritos = alternar_favorito(&backend, "tok", &ids, 20).await.unwrap();

        assert_eq!(
            *backend.llamadas.borrow(),
            vec!["remover 20".to_string(), "listar".to_string()]
        );
        assert!(!ids_favoritos(&favoritos).contains(&20));
    }

    #[tokio::test]
    async fn actualizar_notas_tambien_recarga() {
        let backend = FakeBackend::default();
        backend.listado.borrow_mut().push(Ok(vec![favorito(1, 10)]));

        actualizar_notas(&backend, "tok", 10, "césped nuevo").await.unwrap();
        assert_eq!(
            *backend.llamadas.borrow(),
            vec!["notas 10".to_string(), "listar".to_string()]
        );
    }
}
