use async_trait::async_trait;

use super::api::ApiError;
use super::models::Reserva;

#[async_trait(?Send)]
pub trait ReservasAdminBackend {
    async fn reservas_admin(&self, token: &str) -> Result<Vec<Reserva>, ApiError>;
    async fn confirmar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError>;
    async fn completar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError>;
    async fn cancelar_reserva_admin(&self, token: &str, reserva_id: i64) -> Result<(), ApiError>;
}

pub async fn cargar_reservas_admin<B: ReservasAdminBackend>(
    backend: &B,
    token: &str,
) -> Result<Vec<Reserva>, ApiError> {
    backend.reservas_admin(token).await
}

pub async fn confirmar<B: ReservasAdminBackend>(
    backend: &B,
    token: &str,
    reserva_id: i64,
) -> Result<Vec<Reserva>, ApiError> {
    backend.confirmar_reserva(token, reserva_id).await?;
    backend.reservas_admin(token).await
}

pub async fn completar<B: ReservasAdminBackend>(
    backend: &B,
    token: &str,
    reserva_id: i64,
) -> Result<Vec<Reserva>, ApiError> {
    backend.completar_reserva(token, reserva_id).await?;
    backend.reservas_admin(token).await
}

pub async fn cancelar<B: ReservasAdminBackend>(
    backend: &B,
    token: &str,
    reserva_id: i64,
) -> Result<Vec<Reserva>, ApiError> {
    backend.cancelar_reserva_admin(token, reserva_id).await?;
    backend.reservas_admin(token).await
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
    impl ReservasAdminBackend for FakeBackend {
        async fn reservas_admin(&self, _token: &str) -> Result<Vec<Reserva>, ApiError> {
            self.llamadas.borrow_mut().push("listar".to_string());
            Ok(Vec::new())
        }

        async fn confirmar_reserva(&self, _token: &str, id: i64) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("confirmar {id}"));
            Ok(())
        }

        async fn completar_reserva(&self, _token: &str, id: i64) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("completar {id}"));
            Ok(())
        }

        async fn cancelar_reserva_admin(&self, _token: &str, id: i64) -> Result<(), ApiError> {
            self.llamadas.borrow_mut().push(format!("cancelar {id}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn cada_mutacion_recarga_el_listado() {
        let backend = FakeBackend::default();
        confirmar(&backend, "tok", 1).await.unwrap();
        completar(&backend, "tok", 2).await.unwrap();
        cancelar(&backend, "tok", 3).await.unwrap();
        assert_eq!(
            *backend.llamadas.borrow(),
            vec![
                "confirmar 1".to_string(),
                "listar".to_string(),
                "completar 2".to_string(),
                "listar".to_string(),
                "cancelar 3".to_string(),
                "listar".to_string(),
            ]
        );
    }
}
