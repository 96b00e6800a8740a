use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::api::ApiError;
use super::models::{
    parsear_hora, ConfiguracionHorario, CrearReservaRequest, Disponibilidad, Horario,
    ReservaConfirmada,
};

/// Backend calls the booking workflow depends on. `ApiClient` implements this
/// against the real REST API; tests drive the workflow with an in-memory fake.
#[async_trait(?Send)]
pub trait ReservasBackend {
    async fn configuracion_horario(&self, cancha_id: i64)
        -> Result<ConfiguracionHorario, ApiError>;
    async fn horarios_disponibles(
        &self,
        consulta: &ConsultaHorarios,
    ) -> Result<Vec<Horario>, ApiError>;
    async fn consultar_disponibilidad(
        &self,
        consulta: &ConsultaDisponibilidad,
    ) -> Result<Disponibilidad, ApiError>;
    async fn crear_reserva(
        &self,
        token: &str,
        solicitud: &CrearReservaRequest,
    ) -> Result<ReservaConfirmada, ApiError>;
}

/// Parameters a slot-list request was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultaHorarios {
    pub cancha_id: i64,
    pub fecha: String,
}

/// Parameters of an availability check: local timestamps without timezone
/// suffix, exactly as the backend expects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultaDisponibilidad {
    pub cancha_id: i64,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorValidacion {
    #[error("Por favor completa fecha, hora de inicio y hora de fin")]
    CamposDeTiempoIncompletos,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorEnvio {
    #[error("Debes iniciar sesión para reservar")]
    SinSesion,
    #[error("Por favor verifica la disponibilidad primero")]
    DisponibilidadSinConfirmar,
    #[error("Por favor completa todos los campos")]
    DatosDeContactoIncompletos,
    #[error("{0}")]
    Backend(String),
}

/// Form fields exactly as the user typed them. Dates are `YYYY-MM-DD`, times
/// `HH:MM`, both coming from typed browser inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatosFormulario {
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub nombre_jugador: String,
    pub telefono: String,
}

/// State of one booking-modal session for a single cancha.
///
/// Invariant: any change to fecha, hora_inicio or hora_fin discards the held
/// `Disponibilidad`, so a stale verification can never back a submission.
/// Responses from the network are applied through generation counters; a
/// response that does not match the latest issued generation of its family is
/// dropped instead of overwriting newer state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlujoReserva {
    pub cancha_id: i64,
    pub precio_por_hora: Option<f64>,
    pub datos: DatosFormulario,
    pub configuracion: Option<ConfiguracionHorario>,
    pub horarios: Vec<Horario>,
    pub disponibilidad: Option<Disponibilidad>,
    gen_horarios: u64,
    gen_disponibilidad: u64,
}

impl FlujoReserva {
    pub fn nuevo(cancha_id: i64, precio_por_hora: Option<f64>) -> Self {
        FlujoReserva {
            cancha_id,
            precio_por_hora,
            datos: DatosFormulario::default(),
            configuracion: None,
            horarios: Vec::new(),
            disponibilidad: None,
            gen_horarios: 0,
            gen_disponibilidad: 0,
        }
    }

    pub fn aplicar_configuracion(&mut self, configuracion: ConfiguracionHorario) {
        self.configuracion = Some(configuracion);
    }

    pub fn set_fecha(&mut self, fecha: String) {
        self.datos.fecha = fecha;
        self.disponibilidad = None;
    }

    pub fn set_hora_inicio(&mut self, hora: String) {
        self.datos.hora_inicio = hora;
        self.disponibilidad = None;
    }

    pub fn set_hora_fin(&mut self, hora: String) {
        self.datos.hora_fin = hora;
        self.disponibilidad = None;
    }

    pub fn seleccionar_horario(&mut self, horario: &Horario) {
        self.datos.hora_inicio = horario.hora_inicio.clone();
        self.datos.hora_fin = horario.hora_fin.clone();
        self.disponibilidad = None;
    }

    pub fn set_nombre_jugador(&mut self, nombre: String) {
        self.datos.nombre_jugador = nombre;
    }

    pub fn set_telefono(&mut self, telefono: String) {
        self.datos.telefono = telefono;
    }

    /// Starts a slot-list load. Returns `None` (no request) unless both a
    /// fecha and a configuration are present.
    pub fn consulta_horarios(&mut self) -> Option<(u64, ConsultaHorarios)> {
        if self.datos.fecha.is_empty() || self.configuracion.is_none() {
            return None;
        }
        self.gen_horarios += 1;
        Some((
            self.gen_horarios,
            ConsultaHorarios {
                cancha_id: self.cancha_id,
                fecha: self.datos.fecha.clone(),
            },
        ))
    }

    /// Applies a slot-list response; stale generations are dropped.
    pub fn aplicar_horarios(&mut self, generacion: u64, horarios: Vec<Horario>) -> bool {
        if generacion != self.gen_horarios {
            return false;
        }
        self.horarios = horarios;
        true
    }

    /// Validates the time fields and produces the availability query. Clears
    /// any previously held verdict so only the answer to THIS query counts.
    pub fn preparar_verificacion(
        &mut self,
    ) -> Result<(u64, ConsultaDisponibilidad), ErrorValidacion> {
        let (inicio, fin) = self
            .marcas_de_tiempo()
            .ok_or(ErrorValidacion::CamposDeTiempoIncompletos)?;
        self.disponibilidad = None;
        self.gen_disponibilidad += 1;
        Ok((
            self.gen_disponibilidad,
            ConsultaDisponibilidad {
                cancha_id: self.cancha_id,
                fecha_inicio: inicio,
                fecha_fin: fin,
            },
        ))
    }

    /// Applies a verification outcome; `None` records a failed check.
    pub fn aplicar_disponibilidad(
        &mut self,
        generacion: u64,
        resultado: Option<Disponibilidad>,
    ) -> bool {
        if generacion != self.gen_disponibilidad {
            return false;
        }
        self.disponibilidad = resultado;
        true
    }

    pub fn disponibilidad_confirmada(&self) -> bool {
        matches!(self.disponibilidad, Some(Disponibilidad { disponible: true }))
    }

    /// Display price: (minutes / 60) × hourly rate. Zero when the range is
    /// empty or inverted, or when the rate is unknown. Never sent anywhere;
    /// the backend owns the real price.
    pub fn monto_total(&self) -> f64 {
        let (precio, inicio, fin) = match (
            self.precio_por_hora,
            parsear_hora(&self.datos.hora_inicio),
            parsear_hora(&self.datos.hora_fin),
        ) {
            (Some(precio), Some(inicio), Some(fin)) => (precio, inicio, fin),
            _ => return 0.0,
        };
        let minutos = (fin - inicio).num_minutes();
        if minutos > 0 {
            minutos as f64 / 60.0 * precio
        } else {
            0.0
        }
    }

    /// Final gate before the creation request. Re-checks every precondition
    /// independently of whatever the UI currently has disabled.
    pub fn preparar_envio(&self, sesion_activa: bool) -> Result<CrearReservaRequest, ErrorEnvio> {
        if !sesion_activa {
            return Err(ErrorEnvio::SinSesion);
        }
        if !self.disponibilidad_confirmada() {
            return Err(ErrorEnvio::DisponibilidadSinConfirmar);
        }
        if self.datos.nombre_jugador.trim().is_empty() || self.datos.telefono.trim().is_empty() {
            return Err(ErrorEnvio::DatosDeContactoIncompletos);
        }
        let (fecha_inicio, fecha_fin) = self
            .marcas_de_tiempo()
            .ok_or(ErrorEnvio::DisponibilidadSinConfirmar)?;
        Ok(CrearReservaRequest {
            cancha_id: self.cancha_id,
            fecha_inicio,
            fecha_fin,
        })
    }

    fn marcas_de_tiempo(&self) -> Option<(String, String)> {
        Some((
            componer_marca(&self.datos.fecha, &self.datos.hora_inicio)?,
            componer_marca(&self.datos.fecha, &self.datos.hora_fin)?,
        ))
    }
}

/// Combines a calendar date and a wall-clock time into the local ISO-8601
/// timestamp (no timezone suffix) the backend expects.
pub fn componer_marca(fecha: &str, hora: &str) -> Option<String> {
    let fecha = NaiveDate::parse_from_str(fecha, "%Y-%m-%d").ok()?;
    let hora = parsear_hora(hora)?;
    Some(fecha.and_time(hora).format("%Y-%m-%dT%H:%M:%S").to_string())
}

pub fn ruta_pago(reserva_id: i64) -> String {
    format!("/pagar/{reserva_id}")
}

/// Loads the cancha's operating-hours configuration, substituting the fixed
/// default on any failure so the booking form stays usable.
pub async fn cargar_configuracion<B: ReservasBackend>(
    backend: &B,
    cancha_id: i64,
) -> ConfiguracionHorario {
    match backend.configuracion_horario(cancha_id).await {
        Ok(configuracion) => configuracion,
        Err(err) => {
            log::warn!("configuración de horarios de la cancha {cancha_id} no disponible: {err}");
            ConfiguracionHorario::default()
        }
    }
}

/// Loads the bookable slots for the issued query. Fails open: any error
/// collapses to "nothing available".
pub async fn cargar_horarios<B: ReservasBackend>(
    backend: &B,
    consulta: &ConsultaHorarios,
) -> Vec<Horario> {
    match backend.horarios_disponibles(consulta).await {
        Ok(horarios) => horarios,
        Err(err) => {
            log::warn!("horarios no disponibles para {}: {err}", consulta.fecha);
            Vec::new()
        }
    }
}

pub async fn verificar_disponibilidad<B: ReservasBackend>(
    backend: &B,
    consulta: &ConsultaDisponibilidad,
) -> Result<Disponibilidad, ApiError> {
    backend.consultar_disponibilidad(consulta).await
}

/// Runs the submit-time preconditions and, only if they all hold, sends the
/// creation request. A missing session or failed precondition returns before
/// any network traffic happens.
pub async fn confirmar_reserva<B: ReservasBackend>(
    backend: &B,
    token: Option<&str>,
    flujo: &FlujoReserva,
) -> Result<ReservaConfirmada, ErrorEnvio> {
    let Some(token) = token else {
        return Err(ErrorEnvio::SinSesion);
    };
    let solicitud = flujo.preparar_envio(true)?;
    backend
        .crear_reserva(token, &solicitud)
        .await
        .map_err(|err| {
            // a rejected credential on the money-moving path is a hard stop
            if err.es_no_autorizado() {
                ErrorEnvio::SinSesion
            } else {
                ErrorEnvio::Backend(err.mensaje_o("Error al crear la reserva"))
            }
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        configuracion: RefCell<VecDeque<Result<ConfiguracionHorario, ApiError>>>,
        horarios: RefCell<VecDeque<Result<Vec<Horario>, ApiError>>>,
        disponibilidad: RefCell<VecDeque<Result<Disponibilidad, ApiError>>>,
        creacion: RefCell<VecDeque<Result<ReservaConfirmada, ApiError>>>,
        consultas_horarios: RefCell<Vec<ConsultaHorarios>>,
        consultas_disponibilidad: RefCell<Vec<ConsultaDisponibilidad>>,
        creaciones: RefCell<Vec<(String, CrearReservaRequest)>>,
    }

    impl FakeBackend {
        fn agotado() -> ApiError {
            ApiError::Red("sin respuesta preparada".to_string())
        }
    }

    #[async_trait(?Send)]
    impl ReservasBackend for FakeBackend {
        async fn configuracion_horario(
            &self,
            _cancha_id: i64,
        ) -> Result<ConfiguracionHorario, ApiError> {
            self.configuracion
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Self::agotado()))
        }

        async fn horarios_disponibles(
            &self,
            consulta: &ConsultaHorarios,
        ) -> Result<Vec<Horario>, ApiError> {
            self.consultas_horarios.borrow_mut().push(consulta.clone());
            self.horarios
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Self::agotado()))
        }

        async fn consultar_disponibilidad(
            &self,
            consulta: &ConsultaDisponibilidad,
        ) -> Result<Disponibilidad, ApiError> {
            self.consultas_disponibilidad
                .borrow_mut()
                .push(consulta.clone());
            self.disponibilidad
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Self::agotado()))
        }

        async fn crear_reserva(
            &self,
            token: &str,
            solicitud: &CrearReservaRequest,
        ) -> Result<ReservaConfirmada, ApiError> {
            self.creaciones
                .borrow_mut()
                .push((token.to_string(), solicitud.clone()));
            self.creacion
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Self::agotado()))
        }
    }

    fn horario(inicio: &str, fin: &str) -> Horario {
        Horario {
            hora_inicio: inicio.to_string(),
            hora_fin: fin.to_string(),
        }
    }

    #[tokio::test]
    async fn configuracion_fallida_usa_la_predeterminada() {
        let backend = FakeBackend::default();
        backend
            .configuracion
            .borrow_mut()
            .push_back(Err(ApiError::Red("timeout".to_string())));

        let configuracion = cargar_configuracion(&backend, 5).await;
        assert_eq!(configuracion, ConfiguracionHorario::default());

        // the workflow stays operable with the default
        let mut flujo = FlujoReserva::nuevo(5, Some(1000.0));
        flujo.aplicar_configuracion(configuracion);
        flujo.set_fecha("2024-06-01".to_string());
        assert!(flujo.consulta_horarios().is_some());
    }

    #[test]
    fn cambiar_parametros_descarta_la_disponibilidad() {
        let mut flujo = FlujoReserva::nuevo(1, Some(500.0));
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        assert!(flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true })));
        assert!(flujo.disponibilidad_confirmada());

        flujo.set_hora_fin("12:00".to_string());
        assert!(flujo.disponibilidad.is_none());

        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));
        flujo.set_fecha("2024-06-02".to_string());
        assert!(flujo.disponibilidad.is_none());

        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));
        flujo.seleccionar_horario(&horario("09:00", "10:00"));
        assert!(flujo.disponibilidad.is_none());
    }

    #[test]
    fn verificacion_requiere_los_tres_campos() {
        let mut flujo = FlujoReserva::nuevo(1, None);
        assert_eq!(
            flujo.preparar_verificacion(),
            Err(ErrorValidacion::CamposDeTiempoIncompletos)
        );

        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        assert_eq!(
            flujo.preparar_verificacion(),
            Err(ErrorValidacion::CamposDeTiempoIncompletos)
        );

        flujo.set_hora_fin("11:00".to_string());
        let (_, consulta) = flujo.preparar_verificacion().unwrap();
        assert_eq!(consulta.fecha_inicio, "2024-06-01T10:00:00");
        assert_eq!(consulta.fecha_fin, "2024-06-01T11:00:00");
    }

    #[test]
    fn horarios_sin_fecha_o_configuracion_no_emiten_consulta() {
        let mut flujo = FlujoReserva::nuevo(1, None);
        assert!(flujo.consulta_horarios().is_none());

        flujo.set_fecha("2024-06-01".to_string());
        assert!(flujo.consulta_horarios().is_none());

        flujo.aplicar_configuracion(ConfiguracionHorario::default());
        assert!(flujo.consulta_horarios().is_some());
    }

    #[test]
    fn respuestas_de_horarios_fuera_de_orden_se_descartan() {
        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.aplicar_configuracion(ConfiguracionHorario::default());
        flujo.set_fecha("2024-06-01".to_string());
        let (gen_vieja, _) = flujo.consulta_horarios().unwrap();

        flujo.set_fecha("2024-06-02".to_string());
        let (gen_nueva, _) = flujo.consulta_horarios().unwrap();

        // the older request resolves last; its payload must not win
        assert!(flujo.aplicar_horarios(gen_nueva, vec![horario("10:00", "11:00")]));
        assert!(!flujo.aplicar_horarios(gen_vieja, vec![horario("09:00", "10:00")]));
        assert_eq!(flujo.horarios, vec![horario("10:00", "11:00")]);
    }

    #[test]
    fn verificacion_vieja_no_pisa_a_la_nueva() {
        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());
        let (gen_vieja, _) = flujo.preparar_verificacion().unwrap();
        let (gen_nueva, _) = flujo.preparar_verificacion().unwrap();

        assert!(flujo.aplicar_disponibilidad(gen_nueva, Some(Disponibilidad { disponible: false })));
        assert!(!flujo.aplicar_disponibilidad(gen_vieja, Some(Disponibilidad { disponible: true })));
        assert!(!flujo.disponibilidad_confirmada());
    }

    #[test]
    fn monto_total_por_minutos() {
        let mut flujo = FlujoReserva::nuevo(1, Some(1200.0));
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:30".to_string());
        assert!((flujo.monto_total() - 1800.0).abs() < f64::EPSILON);

        // inverted or empty range is worth nothing
        flujo.set_hora_fin("10:00".to_string());
        assert_eq!(flujo.monto_total(), 0.0);
        flujo.set_hora_fin("09:00".to_string());
        assert_eq!(flujo.monto_total(), 0.0);

        // unknown rate
        let mut sin_precio = FlujoReserva::nuevo(1, None);
        sin_precio.set_hora_inicio("10:00".to_string());
        sin_precio.set_hora_fin("11:00".to_string());
        assert_eq!(sin_precio.monto_total(), 0.0);
    }

    #[tokio::test]
    async fn envio_rechazado_localmente_no_llama_al_backend() {
        let backend = FakeBackend::default();
        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());
        flujo.set_nombre_jugador("Ana".to_string());
        flujo.set_telefono("555-1234".to_string());

        // sin sesión
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));
        let resultado = confirmar_reserva(&backend, None, &flujo).await;
        assert_eq!(resultado, Err(ErrorEnvio::SinSesion));

        // disponibilidad sin confirmar
        flujo.set_hora_fin("12:00".to_string());
        let resultado = confirmar_reserva(&backend, Some("tok"), &flujo).await;
        assert_eq!(resultado, Err(ErrorEnvio::DisponibilidadSinConfirmar));

        // contacto incompleto
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));
        flujo.set_nombre_jugador("  ".to_string());
        let resultado = confirmar_reserva(&backend, Some("tok"), &flujo).await;
        assert_eq!(resultado, Err(ErrorEnvio::DatosDeContactoIncompletos));

        // disponibilidad rechazada por el backend tampoco habilita el envío
        flujo.set_nombre_jugador("Ana".to_string());
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: false }));
        let resultado = confirmar_reserva(&backend, Some("tok"), &flujo).await;
        assert_eq!(resultado, Err(ErrorEnvio::DisponibilidadSinConfirmar));

        assert!(backend.creaciones.borrow().is_empty());
    }

    #[tokio::test]
    async fn recorrido_completo_hasta_el_pago() {
        let backend = FakeBackend::default();
        backend
            .configuracion
            .borrow_mut()
            .push_back(Err(ApiError::Red("sin configuración".to_string())));
        backend.horarios.borrow_mut().push_back(Ok(vec![
            horario("09:00", "10:00"),
            horario("10:00", "11:00"),
        ]));
        backend
            .disponibilidad
            .borrow_mut()
            .push_back(Ok(Disponibilidad { disponible: true }));
        backend
            .creacion
            .borrow_mut()
            .push_back(Ok(ReservaConfirmada { id: 42 }));

        let mut flujo = FlujoReserva::nuevo(7, Some(1000.0));
        flujo.aplicar_configuracion(cargar_configuracion(&backend, 7).await);
        assert_eq!(flujo.configuracion, Some(ConfiguracionHorario::default()));

        flujo.set_fecha("2024-06-01".to_string());
        let (generacion, consulta) = flujo.consulta_horarios().unwrap();
        let horarios = cargar_horarios(&backend, &consulta).await;
        assert!(flujo.aplicar_horarios(generacion, horarios));
        assert_eq!(flujo.horarios.len(), 2);

        let segundo = flujo.horarios[1].clone();
        flujo.seleccionar_horario(&segundo);

        let (generacion, consulta) = flujo.preparar_verificacion().unwrap();
        let verdicto = verificar_disponibilidad(&backend, &consulta).await.unwrap();
        assert!(flujo.aplicar_disponibilidad(generacion, Some(verdicto)));
        assert!(flujo.disponibilidad_confirmada());

        flujo.set_nombre_jugador("Ana".to_string());
        flujo.set_telefono("555-1234".to_string());

        let reserva = confirmar_reserva(&backend, Some("tok"), &flujo).await.unwrap();
        assert_eq!(reserva.id, 42);
        assert_eq!(ruta_pago(reserva.id), "/pagar/42");

        let creaciones = backend.creaciones.borrow();
        assert_eq!(creaciones.len(), 1);
        let (token, cuerpo) = &creaciones[0];
        assert_eq!(token, "tok");
        assert_eq!(
            serde_json::to_value(cuerpo).unwrap(),
            serde_json::json!({
                "canchaId": 7,
                "fechaInicio": "2024-06-01T10:00:00",
                "fechaFin": "2024-06-01T11:00:00",
            })
        );
    }

    #[tokio::test]
    async fn fallo_de_verificacion_no_toca_el_borrador() {
        let backend = FakeBackend::default();
        backend
            .disponibilidad
            .borrow_mut()
            .push_back(Err(ApiError::Red("timeout".to_string())));
        backend
            .disponibilidad
            .borrow_mut()
            .push_back(Ok(Disponibilidad { disponible: true }));

        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());

        let (generacion, consulta) = flujo.preparar_verificacion().unwrap();
        let resultado = verificar_disponibilidad(&backend, &consulta).await;
        assert!(resultado.is_err());
        flujo.aplicar_disponibilidad(generacion, None);

        assert_eq!(flujo.datos.hora_inicio, "10:00");
        assert_eq!(flujo.datos.hora_fin, "11:00");
        assert!(flujo.disponibilidad.is_none());

        // a later attempt succeeds over the same draft
        let (generacion, consulta) = flujo.preparar_verificacion().unwrap();
        let verdicto = verificar_disponibilidad(&backend, &consulta).await.unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(verdicto));
        assert!(flujo.disponibilidad_confirmada());
    }

    #[tokio::test]
    async fn error_del_backend_al_crear_conserva_el_mensaje() {
        let backend = FakeBackend::default();
        backend.creacion.borrow_mut().push_back(Err(ApiError::Rechazo {
            status: 409,
            mensaje: "La cancha ya está reservada".to_string(),
        }));

        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());
        flujo.set_nombre_jugador("Ana".to_string());
        flujo.set_telefono("555-1234".to_string());
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));

        let resultado = confirmar_reserva(&backend, Some("tok"), &flujo).await;
        assert_eq!(
            resultado,
            Err(ErrorEnvio::Backend("La cancha ya está reservada".to_string()))
        );
        // the draft stays intact for a retry
        assert_eq!(flujo.datos.nombre_jugador, "Ana");
        assert!(flujo.disponibilidad_confirmada());
    }

    #[tokio::test]
    async fn credencial_rechazada_al_crear_equivale_a_sesion_ausente() {
        let backend = FakeBackend::default();
        backend.creacion.borrow_mut().push_back(Err(ApiError::Rechazo {
            status: 401,
            mensaje: "token vencido".to_string(),
        }));

        let mut flujo = FlujoReserva::nuevo(1, None);
        flujo.set_fecha("2024-06-01".to_string());
        flujo.set_hora_inicio("10:00".to_string());
        flujo.set_hora_fin("11:00".to_string());
        flujo.set_nombre_jugador("Ana".to_string());
        flujo.set_telefono("555-1234".to_string());
        let (generacion, _) = flujo.preparar_verificacion().unwrap();
        flujo.aplicar_disponibilidad(generacion, Some(Disponibilidad { disponible: true }));

        let resultado = confirmar_reserva(&backend, Some("vencido"), &flujo).await;
        assert_eq!(resultado, Err(ErrorEnvio::SinSesion));
    }

    #[test]
    fn marcas_de_tiempo_normalizan_segundos() {
        assert_eq!(
            componer_marca("2024-06-01", "10:00").as_deref(),
            Some("2024-06-01T10:00:00")
        );
        assert_eq!(
            componer_marca("2024-06-01", "10:00:00").as_deref(),
            Some("2024-06-01T10:00:00")
        );
        assert!(componer_marca("2024-13-01", "10:00").is_none());
        assert!(componer_marca("", "10:00").is_none());
    }
}
