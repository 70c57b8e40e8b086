use actix_cors::Cors;
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::catalogo::Catalogo;
use crate::config::Config;
use crate::server_handlers::{
    curso_detalle_handler, enviar_feedback_handler, feedbacks_curso_handler, filtrar_cursos_handler,
    generar_planes_handler, health_handler, help_handler, modalidad_curso_handler, todos_cursos_handler, EstadoApp,
};

/// Cuerpos JSON mal formados se responden con el mismo formato de error que el resto.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(json!({
            "success": false,
            "campo": "body",
            "error": format!("JSON inválido: {}", err),
        }));
        InternalError::from_response(err, resp).into()
    })
}

/// Rutas de la API; también lo usan los tests para armar la app.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api/scheduler")
                .route("/generar-planes", web::post().to(generar_planes_handler))
                .route("/curso/{codigo}", web::get().to(curso_detalle_handler)),
        )
        .service(
            web::scope("/api/feedback")
                .route("/enviar", web::post().to(enviar_feedback_handler))
                .route("/curso/{codigo}/modalidad", web::get().to(modalidad_curso_handler))
                .route("/curso/{codigo}/feedbacks", web::get().to(feedbacks_curso_handler))
                .route("/todos-cursos", web::get().to(todos_cursos_handler))
                .route("/filtrar", web::get().to(filtrar_cursos_handler)),
        )
        .route("/api/health", web::get().to(health_handler))
        .route("/help", web::get().to(help_handler));
}

pub fn estado_app(config: &Config, catalogo: Arc<dyn Catalogo>) -> web::Data<EstadoApp> {
    web::Data::new(EstadoApp {
        catalogo,
        umbral_consenso: config.umbral_consenso,
        max_planes: config.max_planes,
    })
}

pub async fn run_server(config: Config, catalogo: Arc<dyn Catalogo>) -> std::io::Result<()> {
    let estado = estado_app(&config, catalogo);
    info!(bind = %config.bind, umbral = config.umbral_consenso, max_planes = config.max_planes, "iniciando servidor");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
