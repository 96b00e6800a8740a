use async_trait::async_trait;

use super::api::ApiError;
use super::models::{Producto, ProductoDatos};

#[async_trait(?Send)]
pub trait ProductosBackend {
    async fn productos(&self) -> Result<Vec<Producto>, ApiError>;
    async fn crear_producto(&self, token: &str, datos: &ProductoDatos) -> Result<(), ApiError>;
    async fn actualizar_producto(
        &self,
        token: &str,
        producto_id: i64,
        datos: &ProductoDatos,
    ) -> Result<(), ApiError>;
    async fn eliminar_producto(&self, token: &str, producto_id: i64) -> Result<(), ApiError>;
    async fn alternar_disponibilidad_producto(
        &self,
        token: &str,
        producto_id: i64,
    ) -> Result<(), ApiError>;
}

pub async fn cargar_productos<B: ProductosBackend>(backend: &B) -> Result<Vec<Producto>, ApiError> {
    backend.productos().await
}

pub async fn crear<B: ProductosBackend>(
    backend: &B,
    token: &str,
    datos: &ProductoDatos,
) -> Result<Vec<Producto>, ApiError> {
    backend.crear_producto(token, datos).await?;
    backend.productos().await
}

pub async fn actualizar<B: ProductosBackend>(
    backend: &B,
    token: &str,
    producto_id: i64,
    datos: &ProductoDatos,
) -> Result<Vec<Producto>, ApiError> {
    backend.actualizar_producto(token, producto_id, datos).await?;
    backend.productos().await
}

pub async fn eliminar<B: ProductosBackend>(
    backend: &B,
    token: &str,
    producto_id: i64,
) -> Result<Vec<Producto>, ApiError> {
    backend.eliminar_producto(token, producto_id).await?;
    backend.productos().await
}

pub async fn alternar_disponibilidad<B: ProductosBackend>(
    backend: &B,
    token: &str,
    producto_id: i64,
) -> Result<Vec<Producto>, ApiError> {
    backend
        .alternar_disponibilidad_producto(token, producto_id)
        .await?;
    backend.productos().await
}
