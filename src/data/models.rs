use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Operating-hours configuration of a cancha, as served by the backend.
/// Times are wall-clock strings ("09:00" or "09:00:00" depending on the
/// serializer); `dias_disponibles` is a comma-separated list of ISO weekday
/// numbers (1 = Monday .. 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguracionHorario {
    pub hora_apertura: String,
    pub hora_cierre: String,
    pub duracion_turno_minutos: u32,
    #[serde(default = "dias_todos")]
    pub dias_disponibles: String,
}

fn dias_todos() -> String {
    "1,2,3,4,5,6,7".to_string()
}

impl Default for ConfiguracionHorario {
    fn default() -> Self {
        ConfiguracionHorario {
            hora_apertura: "09:00".to_string(),
            hora_cierre: "22:00".to_string(),
            duracion_turno_minutos: 60,
            dias_disponibles: dias_todos(),
        }
    }
}

impl ConfiguracionHorario {
    pub fn dias(&self) -> HashSet<u8> {
        self.dias_disponibles
            .split(',')
            .filter_map(|d| d.trim().parse::<u8>().ok())
            .collect()
    }

    pub fn permite_dia(&self, dia_iso: u8) -> bool {
        self.dias().contains(&dia_iso)
    }
}

/// Parses the wall-clock strings the backend emits for LocalTime fields.
pub fn parsear_hora(valor: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(valor, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(valor, "%H:%M:%S"))
        .ok()
}

/// A bookable start/end pair for a concrete date. Produced entirely by the
/// backend; the client only renders and selects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horario {
    pub hora_inicio: String,
    pub hora_fin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disponibilidad {
    pub disponible: bool,
}

/// Body of POST /api/reservas. The backend recomputes price and ownership;
/// the client only ever sends these three fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearReservaRequest {
    pub cancha_id: i64,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservaConfirmada {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancha {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub deporte: String,
    pub ubicacion: String,
    #[serde(default)]
    pub precio_por_hora: Option<f64>,
    #[serde(default)]
    pub imagenes: Vec<String>,
    #[serde(default = "verdadero")]
    pub disponible: bool,
}

fn verdadero() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    /// "JUGADOR" o "CLUB"
    pub tipo: String,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl Usuario {
    pub fn es_jugador(&self) -> bool {
        self.tipo.eq_ignore_ascii_case("jugador")
    }

    pub fn es_club(&self) -> bool {
        self.tipo.eq_ignore_ascii_case("club")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    pub id: i64,
    #[serde(default)]
    pub cancha: Option<Cancha>,
    pub fecha_hora_inicio: String,
    pub fecha_hora_fin: String,
    #[serde(default)]
    pub monto_total: Option<f64>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub estado_pago: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorito {
    pub id: i64,
    pub cancha: Cancha,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub fecha_agregado: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeporteJugador {
    pub deporte: String,
    #[serde(default)]
    pub puntuacion: Option<f64>,
    #[serde(default)]
    pub posicion: Option<String>,
    #[serde(default)]
    pub anos_experiencia: Option<u32>,
    #[serde(default)]
    pub nivel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfilJugador {
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub altura: Option<u32>,
    #[serde(default)]
    pub peso: Option<u32>,
    #[serde(default)]
    pub deportes: Vec<DeporteJugador>,
    #[serde(default)]
    pub adjetivos: Vec<String>,
    #[serde(default)]
    pub rating_promedio: Option<f64>,
    #[serde(default)]
    pub partidos_jugados: Option<u32>,
    #[serde(default)]
    pub partidos_ganados: Option<u32>,
}

/// Editable subset of the profile sent to /api/perfil-jugador/guardar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfilJugadorDatos {
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub altura: Option<u32>,
    #[serde(default)]
    pub peso: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltaDeporte {
    pub deporte: String,
    #[serde(default)]
    pub puntuacion: Option<f64>,
    #[serde(default)]
    pub posicion: Option<String>,
    #[serde(default)]
    pub anos_experiencia: Option<u32>,
    #[serde(default)]
    pub nivel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub imagenes: Vec<String>,
    #[serde(default = "verdadero")]
    pub disponible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoDatos {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
}

// --- response envelopes -----------------------------------------------------
//
// The backend wraps most payloads in { success, message, <payload> }. Each
// envelope keeps the payload optional so a success:false body still decodes.

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaConfiguracion {
    pub success: bool,
    #[serde(default)]
    pub configuracion: Option<ConfiguracionHorario>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaHorarios {
    pub success: bool,
    #[serde(default)]
    pub horarios: Vec<Horario>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaReservaCreada {
    pub reserva: ReservaConfirmada,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaAuth {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Usuario>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaUsuario {
    pub success: bool,
    #[serde(default)]
    pub user: Option<Usuario>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaFavoritos {
    pub success: bool,
    #[serde(default)]
    pub favoritos: Vec<Favorito>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaPerfil {
    pub success: bool,
    #[serde(default)]
    pub perfil: Option<PerfilJugador>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaListado {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub adjetivos: Vec<String>,
    #[serde(default)]
    pub deportes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaReservas {
    pub success: bool,
    #[serde(default)]
    pub reservas: Vec<Reserva>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaReservasAdmin {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Reserva>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespuestaSimple {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuracion_por_defecto() {
        let cfg = ConfiguracionHorario::default();
        assert_eq!(cfg.hora_apertura, "09:00");
        assert_eq!(cfg.hora_cierre, "22:00");
        assert_eq!(cfg.duracion_turno_minutos, 60);
        assert_eq!(cfg.dias().len(), 7);
    }

    #[test]
    fn dias_disponibles_parciales() {
        let cfg = ConfiguracionHorario {
            dias_disponibles: "1, 3,5".to_string(),
            ..ConfiguracionHorario::default()
        };
        assert!(cfg.permite_dia(1));
        assert!(!cfg.permite_dia(2));
        assert!(cfg.permite_dia(5));
        assert!(!cfg.permite_dia(7));
    }

    #[test]
    fn horas_con_y_sin_segundos() {
        assert!(parsear_hora("09:00").is_some());
        assert!(parsear_hora("09:00:00").is_some());
        assert!(parsear_hora("25:00").is_none());
        assert!(parsear_hora("").is_none());
    }

    #[test]
    fn solicitud_de_reserva_usa_nombres_del_backend() {
        let solicitud = CrearReservaRequest {
            cancha_id: 7,
            fecha_inicio: "2024-06-01T10:00:00".to_string(),
            fecha_fin: "2024-06-01T11:00:00".to_string(),
        };
        let json = serde_json::to_value(&solicitud).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "canchaId": 7,
                "fechaInicio": "2024-06-01T10:00:00",
                "fechaFin": "2024-06-01T11:00:00",
            })
        );
    }

    #[test]
    fn envelope_sin_payload_decodifica() {
        let crudo = r#"{"success":false,"message":"sin configuracion"}"#;
        let resp: RespuestaConfiguracion = serde_json::from_str(crudo).unwrap();
        assert!(!resp.success);
        assert!(resp.configuracion.is_none());
    }
}
