use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use dotenv::dotenv;

#[derive(Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the reservation backend the browser talks to
    pub api_base_url: String,
    /// Overrides the site address from the cargo-leptos metadata when set
    pub site_addr: Option<String>,
}

impl Settings {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok();

        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let mut settings: Settings = serde_yaml::from_str(&contents)?;

        settings.api_base_url = parse_env_var(&settings.api_base_url)?;

        Ok(settings)
    }
}

fn parse_env_var(value: &str) -> Result<String, Box<dyn std::error::Error>> {
    if value.starts_with("${") && value.ends_with("}") {
        let env_name = &value[2..value.len() - 1];
        match env::var(env_name) {
            Ok(val) => Ok(val),
            Err(_) => Err(format!("Environment variable '{}' not found", env_name).into()),
        }
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn carga_yaml_con_sustitucion() {
        let ruta = env::temp_dir().join("reservapp-settings-prueba.yaml");
        let mut archivo = File::create(&ruta).unwrap();
        writeln!(archivo, "api_base_url: \"${{RESERVAPP_PRUEBA_BASE}}\"").unwrap();
        writeln!(archivo, "site_addr: \"127.0.0.1:4000\"").unwrap();

        env::set_var("RESERVAPP_PRUEBA_BASE", "http://backend:8082");
        let settings = Settings::from_yaml(&ruta).unwrap();
        assert_eq!(settings.api_base_url, "http://backend:8082");
        assert_eq!(settings.site_addr.as_deref(), Some("127.0.0.1:4000"));
    }

    #[test]
    fn variable_faltante_es_error() {
        let ruta = env::temp_dir().join("reservapp-settings-faltante.yaml");
        let mut archivo = File::create(&ruta).unwrap();
        writeln!(archivo, "api_base_url: \"${{RESERVAPP_NO_DEFINIDA}}\"").unwrap();
        assert!(Settings::from_yaml(&ruta).is_err());
    }
}
