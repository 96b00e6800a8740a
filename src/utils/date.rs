use chrono::{Local, NaiveDateTime};

use crate::data::models::parsear_hora;

/// Today's date in the `YYYY-MM-DD` shape date inputs expect.
pub fn hoy() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Renders a backend local timestamp ("2024-06-01T10:00:00") for display.
pub fn formatear_marca(marca: &str) -> String {
    match NaiveDateTime::parse_from_str(marca, "%Y-%m-%dT%H:%M:%S") {
        Ok(fecha_hora) => fecha_hora.format("%d %b %Y, %H:%M").to_string(),
        Err(_) => marca.to_string(),
    }
}

/// Trims backend wall-clock values ("09:00:00") down to "09:00" for display.
pub fn recortar_hora(valor: &str) -> String {
    match parsear_hora(valor) {
        Some(hora) => hora.format("%H:%M").to_string(),
        None => valor.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marca_legible() {
        assert_eq!(formatear_marca("2024-06-01T10:00:00"), "01 Jun 2024, 10:00");
        // anything unparseable passes through untouched
        assert_eq!(formatear_marca("mañana"), "mañana");
    }

    #[test]
    fn horas_recortadas() {
        assert_eq!(recortar_hora("09:00:00"), "09:00");
        assert_eq!(recortar_hora("09:00"), "09:00");
        assert_eq!(recortar_hora("todo el día"), "todo el día");
    }
}
