use async_trait::async_trait;

use super::api::ApiError;
use super::models::Reserva;

#[async_trait(?Send)]
pub trait MisReservasBackend {
    async fn mis_reservas(&self, token: &str) -> Result<Vec<Reserva>, ApiError>;
    async fn cancelar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError>;
}

pub async fn cargar_reservas<B: MisReservasBackend>(
    backend: &B,
    token: Option<&str>,
) -> Result<Vec<Reserva>, ApiError> {
    let Some(token) = token else {
        return Ok(Vec::new());
    };
    match backend.mis_reservas(token).await {
        Ok(reservas) => Ok(reservas),
        Err(err) if err.es_no_autorizado() => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Cancels and then re-fetches the canonical list.
pub async fn cancelar_reserva<B: MisReservasBackend>(
    backend: &B,
    token: &str,
    reserva_id: i64,
) -> Result<Vec<Reserva>, ApiError> {
    backend.cancelar_reserva(token, reserva_id).await?;
    cargar_reservas(backend, Some(token)).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        llamadas: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl MisReservasBackend for FakeBackend {
        async fn mis_reservas(&self, _token: &str) -> Result<Vec<Reserva>, ApiError> {
            self.llamadas.borrow_mut().push("listar".to_string());
            Ok(Vec::new())
        }

        async fn cancelar_reserva(&self, _token: &str, reserva_id: i64) -> Result<(), ApiError> {
            self.llamadas
                .borrow_mut()
                .push(format!("cancelar {reserva_id}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn cancelar_recarga_la_lista() {
        let backend = FakeBackend::default();
        cancelar_reserva(&backend, "tok", 9).await.unwrap();
        assert_eq!(
            *backend.llamadas.borrow(),
            vec!["cancelar 9".to_string(), "listar".to_string()]
        );
    }

    #[tokio::test]
    async fn sin_sesion_no_hay_peticion() {
        let backend = FakeBackend::default();
        assert!(cargar_reservas(&backend, None).await.unwrap().is_empty());
        assert!(backend.llamadas.borrow().is_empty());
    }
}
