pub mod scheduler;
pub mod feedback;
pub mod docs;

pub use scheduler::*;
pub use feedback::*;
pub use docs::*;

use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::catalogo::Catalogo;
use crate::error::{PlanificadorError, Result};

pub const MENSAJE_ERROR_INTERNO: &str = "Error interno del servidor";

/// Estado compartido por todos los handlers.
pub struct EstadoApp {
    pub catalogo: Arc<dyn Catalogo>,
    pub umbral_consenso: usize,
    pub max_planes: usize,
}

/// Traduce un error del dominio a la respuesta HTTP. Los errores internos se
/// loguean con detalle y se devuelven con un mensaje genérico.
pub fn respuesta_error(e: &PlanificadorError) -> HttpResponse {
    match e {
        PlanificadorError::Validacion { campo, .. } => HttpResponse::BadRequest().json(json!({
            "success": false,
            "campo": campo,
            "error": e.to_string(),
        })),
        PlanificadorError::NoEncontrado(_) => HttpResponse::NotFound().json(json!({"success": false, "error": e.to_string()})),
        PlanificadorError::Interno(_) | PlanificadorError::Sqlite(_) => {
            error!(error = %e, "falla interna atendiendo la solicitud");
            HttpResponse::InternalServerError().json(json!({"success": false, "error": MENSAJE_ERROR_INTERNO}))
        }
    }
}

/// Corre una operación del catálogo en el pool bloqueante de actix.
pub async fn en_bloqueo<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(res) => res,
        Err(e) => Err(PlanificadorError::Interno(format!("tarea bloqueante: {}", e))),
    }
}
