use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::favoritos::FavoritosBackend;
use super::mis_reservas::MisReservasBackend;
use super::models::{
    AltaDeporte, Cancha, ConfiguracionHorario, CrearReservaRequest, Disponibilidad, Favorito,
    Horario, PerfilJugador, PerfilJugadorDatos, Producto, ProductoDatos, Reserva,
    ReservaConfirmada, RespuestaAuth, RespuestaConfiguracion, RespuestaFavoritos,
    RespuestaHorarios, RespuestaListado, RespuestaPerfil, RespuestaReservaCreada,
    RespuestaReservas, RespuestaReservasAdmin, RespuestaSimple, RespuestaUsuario, Usuario,
};
use super::perfil::PerfilBackend;
use super::productos::ProductosBackend;
use super::reserva::{ConsultaDisponibilidad, ConsultaHorarios, ReservasBackend};
use super::reservas_admin::ReservasAdminBackend;

/// Errors at the HTTP boundary. Everything a caller needs downstream is the
/// 401/403 distinction and a user-facing message.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("error de red: {0}")]
    Red(String),
    /// Non-2xx response, with whatever message the backend attached.
    #[error("{mensaje}")]
    Rechazo { status: u16, mensaje: String },
    /// HTTP 200 but the envelope said success:false.
    #[error("{0}")]
    Fallo(String),
    #[error("respuesta inválida: {0}")]
    Decodificacion(String),
}

impl ApiError {
    pub fn es_no_autorizado(&self) -> bool {
        matches!(self, ApiError::Rechazo { status: 401 | 403, .. })
    }

    /// Backend-supplied message when there is one, otherwise the generic text.
    pub fn mensaje_o(&self, generico: &str) -> String {
        match self {
            ApiError::Rechazo { mensaje, .. } if !mensaje.is_empty() => mensaje.clone(),
            ApiError::Fallo(mensaje) if !mensaje.is_empty() => mensaje.clone(),
            _ => generico.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MensajeBackend {
    #[serde(default)]
    message: Option<String>,
}

/// Thin client over the REST backend. Every call site passes the current
/// session token explicitly; nothing reaches into ambient state.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        ApiClient {
            base: base.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn por_defecto() -> Self {
        ApiClient::new(option_env!("RESERVAPP_API_BASE").unwrap_or("http://localhost:8082"))
    }

    /// Builds a request with the Authorization header attached iff a token is
    /// present. Single entry point so the auth dependency is visible at every
    /// call site.
    fn solicitud(&self, metodo: Method, ruta: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base, ruta);
        let solicitud = self.http.request(metodo, url);
        match token {
            Some(token) => solicitud.bearer_auth(token),
            None => solicitud,
        }
    }

    // --- auth ---------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<RespuestaAuth, ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/auth/login", None)
            .json(&json!({ "email": email, "password": password }));
        decodificar(solicitud).await
    }

    pub async fn registrar(
        &self,
        nombre: &str,
        email: &str,
        password: &str,
        tipo: &str,
    ) -> Result<RespuestaAuth, ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/auth/register", None)
            .json(&json!({
                "nombre": nombre,
                "email": email,
                "password": password,
                "tipo": tipo,
            }));
        decodificar(solicitud).await
    }

    /// Validates the persisted token against /api/auth/me.
    pub async fn sesion_actual(&self, token: &str) -> Result<Usuario, ApiError> {
        let respuesta: RespuestaUsuario =
            decodificar(self.solicitud(Method::GET, "/api/auth/me", Some(token))).await?;
        match respuesta.user {
            Some(usuario) if respuesta.success => Ok(usuario),
            _ => Err(ApiError::Fallo("sesión inválida".to_string())),
        }
    }

    // --- canchas ------------------------------------------------------------

    pub async fn canchas(&self) -> Result<Vec<Cancha>, ApiError> {
        decodificar(self.solicitud(Method::GET, "/api/canchas", None)).await
    }

    pub async fn cancha(&self, cancha_id: i64) -> Result<Cancha, ApiError> {
        let ruta = format!("/api/canchas/{cancha_id}");
        decodificar(self.solicitud(Method::GET, &ruta, None)).await
    }

    pub async fn deportes(&self) -> Result<Vec<String>, ApiError> {
        decodificar(self.solicitud(Method::GET, "/api/canchas/deportes", None)).await
    }
}

async fn enviar(solicitud: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let respuesta = solicitud
        .send()
        .await
        .map_err(|err| ApiError::Red(err.to_string()))?;
    let status = respuesta.status();
    if !status.is_success() {
        let mensaje = respuesta
            .json::<MensajeBackend>()
            .await
            .ok()
            .and_then(|cuerpo| cuerpo.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(ApiError::Rechazo {
            status: status.as_u16(),
            mensaje,
        });
    }
    Ok(respuesta)
}

async fn decodificar<T: DeserializeOwned>(solicitud: RequestBuilder) -> Result<T, ApiError> {
    enviar(solicitud)
        .await?
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decodificacion(err.to_string()))
}

/// For mutations that answer with { success, message } and nothing else.
async fn decodificar_simple(solicitud: RequestBuilder, generico: &str) -> Result<(), ApiError> {
    let respuesta: RespuestaSimple = decodificar(solicitud).await?;
    if respuesta.success {
        Ok(())
    } else {
        Err(ApiError::Fallo(
            respuesta.message.unwrap_or_else(|| generico.to_string()),
        ))
    }
}

/// For mutations where only the status matters (the body may be the mutated
/// entity or empty); the caller re-fetches the canonical list anyway.
async fn solo_estado(solicitud: RequestBuilder) -> Result<(), ApiError> {
    enviar(solicitud).await.map(|_| ())
}

#[async_trait(?Send)]
impl ReservasBackend for ApiClient {
    async fn configuracion_horario(
        &self,
        cancha_id: i64,
    ) -> Result<ConfiguracionHorario, ApiError> {
        let ruta = format!("/api/configuracion-horarios/cancha/{cancha_id}");
        let respuesta: RespuestaConfiguracion =
            decodificar(self.solicitud(Method::GET, &ruta, None)).await?;
        match respuesta.configuracion {
            Some(configuracion) if respuesta.success => Ok(configuracion),
            _ => Err(ApiError::Fallo("la cancha no tiene configuración".to_string())),
        }
    }

    async fn horarios_disponibles(
        &self,
        consulta: &ConsultaHorarios,
    ) -> Result<Vec<Horario>, ApiError> {
        let ruta = format!(
            "/api/configuracion-horarios/horarios-disponibles/{}",
            consulta.cancha_id
        );
        let solicitud = self
            .solicitud(Method::GET, &ruta, None)
            .query(&[("fecha", consulta.fecha.as_str())]);
        let respuesta: RespuestaHorarios = decodificar(solicitud).await?;
        if respuesta.success {
            Ok(respuesta.horarios)
        } else {
            Err(ApiError::Fallo("horarios no disponibles".to_string()))
        }
    }

    async fn consultar_disponibilidad(
        &self,
        consulta: &ConsultaDisponibilidad,
    ) -> Result<Disponibilidad, ApiError> {
        let solicitud = self
            .solicitud(Method::GET, "/api/reservas/disponibilidad", None)
            .query(&[
                ("canchaId", consulta.cancha_id.to_string().as_str()),
                ("fechaInicio", consulta.fecha_inicio.as_str()),
                ("fechaFin", consulta.fecha_fin.as_str()),
            ]);
        decodificar(solicitud).await
    }

    async fn crear_reserva(
        &self,
        token: &str,
        solicitud: &CrearReservaRequest,
    ) -> Result<ReservaConfirmada, ApiError> {
        let peticion = self
            .solicitud(Method::POST, "/api/reservas", Some(token))
            .json(solicitud);
        let respuesta: RespuestaReservaCreada = decodificar(peticion).await?;
        Ok(respuesta.reserva)
    }
}

#[async_trait(?Send)]
impl FavoritosBackend for ApiClient {
    async fn mis_favoritos(&self, token: &str) -> Result<Vec<Favorito>, ApiError> {
        let solicitud = self.solicitud(Method::GET, "/api/favoritos/mis-favoritos", Some(token));
        let respuesta: RespuestaFavoritos = decodificar(solicitud).await?;
        // success:false here just means "nothing yet", per the backend
        Ok(if respuesta.success {
            respuesta.favoritos
        } else {
            Vec::new()
        })
    }

    async fn agregar_favorito(
        &self,
        token: &str,
        cancha_id: i64,
        notas: Option<&str>,
    ) -> Result<(), ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/favoritos/agregar", Some(token))
            .json(&json!({ "canchaId": cancha_id, "notas": notas }));
        decodificar_simple(solicitud, "Error al agregar favorito").await
    }

    async fn remover_favorito(&self, token: &str, cancha_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/favoritos/remover/{cancha_id}");
        decodificar_simple(
            self.solicitud(Method::DELETE, &ruta, Some(token)),
            "Error al remover favorito",
        )
        .await
    }

    async fn actualizar_notas_favorito(
        &self,
        token: &str,
        cancha_id: i64,
        notas: &str,
    ) -> Result<(), ApiError> {
        let ruta = format!("/api/favoritos/actualizar-notas/{cancha_id}");
        let solicitud = self
            .solicitud(Method::PUT, &ruta, Some(token))
            .json(&json!({ "notas": notas }));
        decodificar_simple(solicitud, "Error al actualizar notas").await
    }
}

#[async_trait(?Send)]
impl PerfilBackend for ApiClient {
    async fn mi_perfil(&self, token: &str) -> Result<Option<PerfilJugador>, ApiError> {
        let solicitud = self.solicitud(Method::GET, "/api/perfil-jugador/mi-perfil", Some(token));
        let respuesta: RespuestaPerfil = decodificar(solicitud).await?;
        if respuesta.success {
            Ok(respuesta.perfil)
        } else {
            Err(ApiError::Fallo(
                respuesta
                    .message
                    .unwrap_or_else(|| "Error al cargar el perfil".to_string()),
            ))
        }
    }

    async fn guardar_perfil(
        &self,
        token: &str,
        datos: &PerfilJugadorDatos,
    ) -> Result<(), ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/perfil-jugador/guardar", Some(token))
            .json(datos);
        decodificar_simple(solicitud, "Error al guardar el perfil").await
    }

    async fn agregar_deporte(&self, token: &str, alta: &AltaDeporte) -> Result<(), ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/perfil-jugador/deportes/agregar", Some(token))
            .json(alta);
        decodificar_simple(solicitud, "Error al agregar deporte").await
    }

    async fn eliminar_deporte(&self, token: &str, deporte: &str) -> Result<(), ApiError> {
        let ruta = format!(
            "/api/perfil-jugador/deportes/{}",
            urlencoding::encode(deporte)
        );
        decodificar_simple(
            self.solicitud(Method::DELETE, &ruta, Some(token)),
            "Error al eliminar deporte",
        )
        .await
    }

    async fn agregar_adjetivo(&self, token: &str, adjetivo: &str) -> Result<(), ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/perfil-jugador/adjetivos/agregar", Some(token))
            .json(&json!({ "adjetivo": adjetivo }));
        decodificar_simple(solicitud, "Error al agregar adjetivo").await
    }

    async fn remover_adjetivo(&self, token: &str, adjetivo: &str) -> Result<(), ApiError> {
        let ruta = format!(
            "/api/perfil-jugador/adjetivos/{}",
            urlencoding::encode(adjetivo)
        );
        decodificar_simple(
            self.solicitud(Method::DELETE, &ruta, Some(token)),
            "Error al remover adjetivo",
        )
        .await
    }

    async fn adjetivos_disponibles(&self, token: &str) -> Result<Vec<String>, ApiError> {
        let solicitud = self.solicitud(
            Method::GET,
            "/api/perfil-jugador/adjetivos-disponibles",
            Some(token),
        );
        let respuesta: RespuestaListado = decodificar(solicitud).await?;
        Ok(respuesta.adjetivos)
    }

    async fn deportes_disponibles(&self, token: &str) -> Result<Vec<String>, ApiError> {
        let solicitud = self.solicitud(
            Method::GET,
            "/api/perfil-jugador/deportes-disponibles",
            Some(token),
        );
        let respuesta: RespuestaListado = decodificar(solicitud).await?;
        Ok(respuesta.deportes)
    }
}

#[async_trait(?Send)]
impl MisReservasBackend for ApiClient {
    async fn mis_reservas(&self, token: &str) -> Result<Vec<Reserva>, ApiError> {
        let solicitud = self.solicitud(Method::GET, "/api/reservas/mis-reservas", Some(token));
        let respuesta: RespuestaReservas = decodificar(solicitud).await?;
        if respuesta.success {
            Ok(respuesta.reservas)
        } else {
            Err(ApiError::Fallo(
                respuesta
                    .message
                    .unwrap_or_else(|| "Error al cargar reservas".to_string()),
            ))
        }
    }

    async fn cancelar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/reservas/{reserva_id}");
        decodificar_simple(
            self.solicitud(Method::DELETE, &ruta, Some(token)),
            "Error al cancelar reserva",
        )
        .await
    }
}

#[async_trait(?Send)]
impl ReservasAdminBackend for ApiClient {
    async fn reservas_admin(&self, token: &str) -> Result<Vec<Reserva>, ApiError> {
        let solicitud = self.solicitud(Method::GET, "/api/reservas/admin/todas", Some(token));
        let respuesta: RespuestaReservasAdmin = decodificar(solicitud).await?;
        if respuesta.success {
            Ok(respuesta.data)
        } else {
            Err(ApiError::Fallo(
                respuesta
                    .message
                    .unwrap_or_else(|| "Error al cargar reservas".to_string()),
            ))
        }
    }

    async fn confirmar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/reservas/{reserva_id}/confirmar");
        decodificar_simple(
            self.solicitud(Method::PATCH, &ruta, Some(token)),
            "Error al confirmar reserva",
        )
        .await
    }

    async fn completar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/reservas/{reserva_id}/completar");
        decodificar_simple(
            self.solicitud(Method::PATCH, &ruta, Some(token)),
            "Error al completar reserva",
        )
        .await
    }

    async fn cancelar_reserva_admin(&self, token: &str, reserva_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/reservas/{reserva_id}");
        decodificar_simple(
            self.solicitud(Method::DELETE, &ruta, Some(token)),
            "Error al cancelar reserva",
        )
        .await
    }
}

#[async_trait(?Send)]
impl ProductosBackend for ApiClient {
    async fn productos(&self) -> Result<Vec<Producto>, ApiError> {
        decodificar(self.solicitud(Method::GET, "/api/productos", None)).await
    }

    async fn crear_producto(&self, token: &str, datos: &ProductoDatos) -> Result<(), ApiError> {
        let solicitud = self
            .solicitud(Method::POST, "/api/productos", Some(token))
            .json(datos);
        solo_estado(solicitud).await
    }

    async fn actualizar_producto(
        &self,
        token: &str,
        producto_id: i64,
        datos: &ProductoDatos,
    ) -> Result<(), ApiError> {
        let ruta = format!("/api/productos/{producto_id}");
        solo_estado(self.solicitud(Method::PUT, &ruta, Some(token)).json(datos)).await
    }

    async fn eliminar_producto(&self, token: &str, producto_id: i64) -> Result<(), ApiError> {
        let ruta = format!("/api/productos/{producto_id}");
        solo_estado(self.solicitud(Method::DELETE, &ruta, Some(token))).await
    }

    async fn alternar_disponibilidad_producto(
        &self,
        token: &str,
        producto_id: i64,
    ) -> Result<(), ApiError> {
        let ruta = format!("/api/productos/{producto_id}/toggle-disponibilidad");
        solo_estado(self.solicitud(Method::PATCH, &ruta, Some(token))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjunta_el_token_cuando_existe() {
        let cliente = ApiClient::new("https://reservapp.test");
        let peticion = cliente
            .solicitud(Method::GET, "/api/favoritos/mis-favoritos", Some("abc123"))
            .build()
            .unwrap();
        assert_eq!(
            peticion.url().as_str(),
            "https://reservapp.test/api/favoritos/mis-favoritos"
        );
        assert_eq!(
            peticion
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|valor| valor.to_str().ok()),
            Some("Bearer abc123")
        );
    }

    #[test]
    fn sin_token_no_hay_cabecera() {
        let cliente = ApiClient::new("https://reservapp.test");
        let peticion = cliente
            .solicitud(Method::GET, "/api/canchas", None)
            .build()
            .unwrap();
        assert!(peticion
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .is_none());
    }

    #[test]
    fn consulta_de_disponibilidad_lleva_los_parametros() {
        let cliente = ApiClient::new("https://reservapp.test");
        let consulta = ConsultaDisponibilidad {
            cancha_id: 7,
            fecha_inicio: "2024-06-01T10:00:00".to_string(),
            fecha_fin: "2024-06-01T11:00:00".to_string(),
        };
        let peticion = cliente
            .solicitud(Method::GET, "/api/reservas/disponibilidad", None)
            .query(&[
                ("canchaId", consulta.cancha_id.to_string().as_str()),
                ("fechaInicio", consulta.fecha_inicio.as_str()),
                ("fechaFin", consulta.fecha_fin.as_str()),
            ])
            .build()
            .unwrap();
        let url = peticion.url();
        assert_eq!(url.path(), "/api/reservas/disponibilidad");
        let pares: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pares.contains(&("canchaId".to_string(), "7".to_string())));
        assert!(pares.contains(&("fechaInicio".to_string(), "2024-06-01T10:00:00".to_string())));
        assert!(pares.contains(&("fechaFin".to_string(), "2024-06-01T11:00:00".to_string())));
    }

    #[test]
    fn rutas_con_texto_del_usuario_se_escapan() {
        let ruta = format!(
            "/api/perfil-jugador/deportes/{}",
            urlencoding::encode("tenis de mesa")
        );
        assert_eq!(ruta, "/api/perfil-jugador/deportes/tenis%20de%20mesa");
    }

    #[test]
    fn mensaje_o_prefiere_el_del_backend() {
        let rechazo = ApiError::Rechazo {
            status: 409,
            mensaje: "horario tomado".to_string(),
        };
        assert_eq!(rechazo.mensaje_o("genérico"), "horario tomado");
        let red = ApiError::Red("timeout".to_string());
        assert_eq!(red.mensaje_o("genérico"), "genérico");
        assert!(ApiError::Rechazo {
            status: 403,
            mensaje: String::new()
        }
        .es_no_autorizado());
    }
}
