// Biblioteca raíz del crate `planificador`.
// Generación de planes de cursada sin solapamientos y consenso de modalidad
// por votos; `main` sólo arma la configuración y levanta el servidor.
pub mod models;
pub mod error;
pub mod config;
pub mod algorithm;
pub mod catalogo;
pub mod consenso;
pub mod api_json;
pub mod server;
pub mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use error::{PlanificadorError, Result};
