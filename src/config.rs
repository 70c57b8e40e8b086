use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const UMBRAL_CONSENSO_DEFAULT: usize = 3;
pub const MAX_PLANES_DEFAULT: usize = 1000;

/// Configuración del proceso, leída de variables de entorno (y de `.env` si existe).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind: String,
    pub umbral_consenso: usize,
    pub max_planes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from("scheduler.db"),
            bind: "127.0.0.1:5000".to_string(),
            umbral_consenso: UMBRAL_CONSENSO_DEFAULT,
            max_planes: MAX_PLANES_DEFAULT,
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    /// Honra PLANIFICADOR_DB_PATH, PLANIFICADOR_BIND, PLANIFICADOR_UMBRAL_CONSENSO
    /// y PLANIFICADOR_MAX_PLANES.
    pub fn from_env() -> Config {
        load_dotenv();
        Config::from_lookup(|k| env::var(k).ok())
    }

    /// Variante con lookup inyectable (tests).
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(p) = lookup("PLANIFICADOR_DB_PATH") {
            // se acepta también la forma sqlite://ruta
            let p = p.trim_start_matches("sqlite://").to_string();
            if !p.trim().is_empty() {
                cfg.db_path = PathBuf::from(p);
            }
        }
        if let Some(b) = lookup("PLANIFICADOR_BIND") {
            if !b.trim().is_empty() {
                cfg.bind = b.trim().to_string();
            }
        }
        cfg.umbral_consenso = numero_o_default(&lookup, "PLANIFICADOR_UMBRAL_CONSENSO", cfg.umbral_consenso);
        cfg.max_planes = numero_o_default(&lookup, "PLANIFICADOR_MAX_PLANES", cfg.max_planes);
        cfg
    }
}

fn numero_o_default<F>(lookup: &F, clave: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(clave) {
        None => default,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(v) if v > 0 => v,
            _ => {
                warn!(clave, valor = %raw, "valor numérico inválido, usando default {}", default);
                default
            }
        },
    }
}
