use async_trait::async_trait;

use super::api::ApiError;
use super::models::{AltaDeporte, PerfilJugador, PerfilJugadorDatos};

#[async_trait(?Send)]
pub trait PerfilBackend {
    async fn mi_perfil(&self, token: &str) -> Result<Option<PerfilJugador>, ApiError>;
    async fn guardar_perfil(&self, token: &str, datos: &PerfilJugadorDatos)
        -> Result<(), ApiError>;
    async fn agregar_deporte(&self, token: &str, alta: &AltaDeporte) -> Result<(), ApiError>;
    async fn eliminar_deporte(&self, token: &str, deporte: &str) -> Result<(), ApiError>;
    async fn agregar_adjetivo(&self, token: &str, adjetivo: &str) -> Result<(), ApiError>;
    async fn remover_adjetivo(&self, token: &str, adjetivo: &str) -> Result<(), ApiError>;
    async fn adjetivos_disponibles(&self, token: &str) -> Result<Vec<String>, ApiError>;
    async fn deportes_disponibles(&self, token: &str) -> Result<Vec<String>, ApiError>;
}

/// Loads the player profile. Same read policy as favorites: no token or
/// rejected credentials mean "no profile yet", not a failure.
pub async fn cargar_perfil<B: PerfilBackend>(
    backend: &B,
    token: Option<&str>,
) -> Result<Option<PerfilJugador>, ApiError> {
    let Some(token) = token else {
        return Ok(None);
    };
    match backend.mi_perfil(token).await {
        Ok(perfil) => Ok(perfil),
        Err(err) if err.es_no_autorizado() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Every profile mutation re-fetches the canonical profile afterwards instead
/// of trusting whatever the mutation response carried.
pub async fn guardar_perfil<B: PerfilBackend>(
    backend: &B,
    token: &str,
    datos: &PerfilJugadorDatos,
) -> Result<Option<PerfilJugador>, ApiError> {
    backend.guardar_perfil(token, datos).await?;
    cargar_perfil(backend, Some(token)).await
}

pub async fn agregar_deporte<B: PerfilBackend>(
    backend: &B,
    token: &str,
    alta: &AltaDeporte,
) -> Result<Option<PerfilJugador>, ApiError> {
    backend.agregar_deporte(token, alta).await?;
    cargar_perfil(backend, Some(token)).await
}

pub async fn eliminar_deporte<B: PerfilBackend>(
    backend: &B,
    token: &str,
    deporte: &str,
) -> Result<Option<PerfilJugador>, ApiError> {
    backend.eliminar_deporte(token, deporte).await?;
    cargar_perfil(backend, Some(token)).await
}

pub async fn agregar_adjetivo<B: PerfilBackend>(
    backend: &B,
    token: &str,
    adjetivo: &str,
) -> Result<Option<PerfilJugador>, ApiError> {
    backend.agregar_adjetivo(token, adjetivo).await?;
    cargar_perfil(backend, Some(token)).await
}

pub async fn remover_adjetivo<B: PerfilBackend>(
    backend: &B,
    token: &str,
    adjetivo: &str,
) -> Result<Option<PerfilJugador>, ApiError> {
    backend.remover_adjetivo(token, adjetivo).await?;
    cargar_perfil(backend, Some(token)).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        perfil: RefCell<Option<PerfilJugador>>,
        rechazar_lectura: RefCell<bool>,
        llamadas: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl PerfilBackend for FakeBackend {
        async fn mi_perfil(&self, _token: &str) -> Result<Option<PerfilJugador>, ApiError> {
            self.llamadas.borrow_mut().push("leer".to_string());
            if *self.rechazar_lectura.borrow() {
                return Err(ApiError::Rechazo {
                    status: 403,
                    mensaje: "prohibido".to_string(),
                });
            }
            Ok(self.perfil.borrow().clone())
        }

        async fn guardar_perfil(
            &self,
            _token: &str,
            datos: &PerfilJugadorDatos,
        ) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push("guardar".to_string());
            let mut perfil = self.perfil.borrow_mut();
            let mut nuevo = perfil.clone().unwrap_or_default();
            nuevo.altura = datos.altura;
            *perfil = Some(nuevo);
            Ok(())
        }

        async fn agregar_deporte(&self, _token: &str, alta: &AltaDeporte) -> Result<(), ApiError> {
            self.llamadas
                .borrow_mut()
                .push(format!("deporte {}", alta.deporte));
            Ok(())
        }

        async fn eliminar_deporte(&self, _token: &str, deporte: &str) -> Result<(), ApiError> {
            self.llamadas
                .borrow_mut()
                .push(format!("quitar deporte {deporte}"));
            Ok(())
        }

        async fn agregar_adjetivo(&self, _token: &str, adjetivo: &str) -> Result<(), ApiError> {
            self.llamadas
                .borrow_mut()
                .push(format!("adjetivo {adjetivo}"));
            Ok(())
        }

        async fn remover_adjetivo(&self, _token: &str, adjetivo: &str) -> Result<(), ApiError> {
            self.llamadas
                .borrow_mut()
                .push(format!("quitar adjetivo {adjetivo}"));
            Ok(())
        }

        async fn adjetivos_disponibles(&self, _token: &str) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }

        async fn deportes_disponibles(&self, _token: &str) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn sin_token_no_consulta() {
        let backend = FakeBackend::default();
        let perfil = cargar_perfil(&backend, None).await.unwrap();
        assert!(perfil.is_none());
        assert!(backend.llamadas.borrow().is_empty());
    }

    #[tokio::test]
    async fn lectura_rechazada_es_perfil_ausente() {
        let backend = FakeBackend::default();
        *backend.rechazar_lectura.borrow_mut() = true;
        let perfil = cargar_perfil(&backend, Some("tok")).await.unwrap();
        assert!(perfil.is_none());
    }

    #[tokio::test]
    async fn guardar_recarga_el_perfil_canonico() {
        let backend = FakeBackend::default();
        let datos = PerfilJugadorDatos {
            altura: Some(180),
            ..PerfilJugadorDatos::default()
        };
        let perfil = guardar_perfil(&backend, "tok", &datos).await.unwrap();
        assert_eq!(
            *backend.llamadas.borrow(),
            vec!["guardar".to_string(), "leer".to_string()]
        );
        assert_eq!(perfil.unwrap().altura, Some(180));
    }

    #[tokio::test]
    async fn mutaciones_de_deportes_recargan() {
        let backend = FakeBackend::default();
        let alta = AltaDeporte {
            deporte: "padel".to_string(),
            puntuacion: Some(4.5),
            posicion: None,
            anos_experiencia: Some(2),
            nivel: Some("intermedio".to_string()),
        };
        agregar_deporte(&backend, "tok", &alta).await.unwrap();
        eliminar_deporte(&backend, "tok", "padel").await.unwrap();
        assert_eq!(
            *backend.llamadas.borrow(),
            vec![
                "deporte padel".to_string(),
                "leer".to_string(),
                "quitar deporte padel".to_string(),
                "leer".to_string(),
            ]
        );
    }
}
