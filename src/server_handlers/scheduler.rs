use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::algorithm::generar_respuesta;
use crate::api_json::validar_solicitud_planes;
use crate::server_handlers::{en_bloqueo, respuesta_error, EstadoApp, MENSAJE_ERROR_INTERNO};

/// POST /api/scheduler/generar-planes
pub async fn generar_planes_handler(
    req: HttpRequest,
    estado: web::Data<EstadoApp>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let solicitud = match validar_solicitud_planes(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => return respuesta_error(&e),
    };

    let client_ip = req.connection_info().realip_remote_addr().unwrap_or("unknown").to_string();
    let start = Instant::now();

    // La enumeración es CPU-bound: a lo sumo una por núcleo a la vez.
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    let sem = GLOBAL_SEM
        .get_or_init(|| Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))))
        .clone();

    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            error!("semáforo de generación cerrado");
            return HttpResponse::InternalServerError().json(json!({"success": false, "error": MENSAJE_ERROR_INTERNO}));
        }
    };

    let catalogo = estado.catalogo.clone();
    let max_planes = estado.max_planes;
    let n_cursos = solicitud.cursos.len();
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        generar_respuesta(catalogo.as_ref(), &solicitud, max_planes)
    });

    let respuesta = match blocking_handle.await {
        Ok(Ok(r)) => r,
        Ok(Err(e)) => return respuesta_error(&e),
        Err(e) => {
            error!(error = %e, "tarea de generación abortada");
            return HttpResponse::InternalServerError().json(json!({"success": false, "error": MENSAJE_ERROR_INTERNO}));
        }
    };

    info!(
        ip = %client_ip,
        cursos = n_cursos,
        planes = respuesta.total,
        success = respuesta.success,
        duration_ms = start.elapsed().as_millis() as u64,
        "generar-planes"
    );
    HttpResponse::Ok().json(respuesta)
}

/// GET /api/scheduler/curso/{codigo}
pub async fn curso_detalle_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.clone();
    match en_bloqueo(move || catalogo.obtener_curso(&codigo)).await {
        Ok(Some(curso)) => HttpResponse::Ok().json(json!({"success": true, "curso": curso})),
        Ok(None) => HttpResponse::NotFound().json(json!({"success": false, "error": "Curso no encontrado"})),
        Err(e) => respuesta_error(&e),
    }
}
