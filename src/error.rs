//! Errores del planificador.
//!
//! La clasificación se hace en el borde (handlers HTTP); el cálculo puro de
//! planes nunca devuelve error, a lo sumo un resultado vacío.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanificadorError {
    /// Campo faltante o mal formado en la solicitud.
    #[error("campo '{campo}' inválido: {mensaje}")]
    Validacion { campo: String, mensaje: String },

    #[error("no encontrado: {0}")]
    NoEncontrado(String),

    /// Falla inesperada del almacenamiento; el detalle se loguea, no se expone.
    #[error("error interno: {0}")]
    Interno(String),

    #[error("error de base de datos: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl PlanificadorError {
    pub fn validacion(campo: &str, mensaje: impl Into<String>) -> Self {
        PlanificadorError::Validacion { campo: campo.to_string(), mensaje: mensaje.into() }
    }

    /// Errores que deben presentarse al cliente con un mensaje genérico.
    pub fn es_interno(&self) -> bool {
        matches!(self, PlanificadorError::Interno(_) | PlanificadorError::Sqlite(_))
    }
}

pub type Result<T> = std::result::Result<T, PlanificadorError>;
