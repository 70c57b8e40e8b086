use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api_json::validar_solicitud_voto;
use crate::consenso::{consultar_confirmada, consultar_pendientes, enviar_voto};
use crate::error::PlanificadorError;
use crate::models::{Modalidad, Sede};
use crate::server_handlers::{en_bloqueo, respuesta_error, EstadoApp};

/// POST /api/feedback/enviar
pub async fn enviar_feedback_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> impl Responder {
    let solicitud = match validar_solicitud_voto(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => return respuesta_error(&e),
    };

    let catalogo = estado.catalogo.clone();
    let umbral = estado.umbral_consenso;
    match en_bloqueo(move || enviar_voto(catalogo.as_ref(), &solicitud, umbral)).await {
        Ok(consenso) => HttpResponse::Ok().json(json!({
            "success": true,
            "mensaje": "Feedback enviado correctamente",
            "consenso": consenso,
        })),
        Err(e) => respuesta_error(&e),
    }
}

/// GET /api/feedback/curso/{codigo}/modalidad
pub async fn modalidad_curso_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.clone();
    match en_bloqueo(move || consultar_confirmada(catalogo.as_ref(), &codigo)).await {
        Ok(Some(m)) => HttpResponse::Ok().json(json!({"success": true, "modalidad": m})),
        Ok(None) => HttpResponse::NotFound().json(json!({"success": false, "error": "Sin modalidad confirmada aún"})),
        Err(e) => respuesta_error(&e),
    }
}

/// GET /api/feedback/curso/{codigo}/feedbacks
pub async fn feedbacks_curso_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.clone();
    let umbral = estado.umbral_consenso;
    match en_bloqueo(move || consultar_pendientes(catalogo.as_ref(), &codigo, umbral)).await {
        Ok(p) => HttpResponse::Ok().json(json!({"success": true, "feedbacks": p})),
        Err(e) => respuesta_error(&e),
    }
}

/// GET /api/feedback/todos-cursos
pub async fn todos_cursos_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let catalogo = estado.catalogo.clone();
    match en_bloqueo(move || catalogo.listar_cursos()).await {
        Ok(cursos) => HttpResponse::Ok().json(json!({"success": true, "total": cursos.len(), "cursos": cursos})),
        Err(e) => respuesta_error(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct FiltroModalidad {
    pub modalidad: String,
    #[serde(default)]
    pub sede: Option<String>,
}

/// GET /api/feedback/filtrar?modalidad=presencial&sede=PC
pub async fn filtrar_cursos_handler(estado: web::Data<EstadoApp>, query: web::Query<FiltroModalidad>) -> impl Responder {
    let filtro = query.into_inner();
    let modalidad = match Modalidad::parse_voto(&filtro.modalidad) {
        Some(m) => m,
        None if filtro.modalidad.trim().eq_ignore_ascii_case("sin_confirmar") => Modalidad::SinConfirmar,
        None => {
            return respuesta_error(&PlanificadorError::validacion(
                "modalidad",
                format!("'{}' no es una modalidad conocida", filtro.modalidad),
            ));
        }
    };
    let sede = match filtro.sede.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(token) => match Sede::from_token(token) {
            Sede::Desconocida => {
                return respuesta_error(&PlanificadorError::validacion("sede", format!("'{}' no es PC ni LH", token)));
            }
            s => Some(s),
        },
    };

    let catalogo = estado.catalogo.clone();
    match en_bloqueo(move || catalogo.filtrar_cursos_por_modalidad(modalidad, sede)).await {
        Ok(cursos) => HttpResponse::Ok().json(json!({"success": true, "total": cursos.len(), "cursos": cursos})),
        Err(e) => respuesta_error(&e),
    }
}
