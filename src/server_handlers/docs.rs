use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::SolicitudPlanes;
use crate::models::{parse_hora, HorarioExcluido, ModalidadPreferida, Preferencias, SedePreferida};
use crate::server_handlers::EstadoApp;

pub async fn help_handler() -> impl Responder {
    let mut prioridades = HashMap::new();
    prioridades.insert("CB100-1".to_string(), 5);
    prioridades.insert("CB100-2".to_string(), 3);

    let horarios_excluidos = match (parse_hora("14:00"), parse_hora("16:00")) {
        (Some(hora_inicio), Some(hora_fin)) => vec![HorarioExcluido { dia: 1, hora_inicio, hora_fin }],
        _ => Vec::new(),
    };

    let example = SolicitudPlanes {
        cursos: vec!["CB100-1".to_string(), "CB100-2".to_string(), "61.03-1".to_string(), "75.01-1".to_string()],
        prioridades,
        horarios_excluidos,
        preferencias: Preferencias { sede: SedePreferida::Cualquiera, modalidad: ModalidadPreferida::Presencial },
        permitir_parciales: false,
        max_planes: Some(1000),
    };

    let help = json!({
        "description": "API del planificador de horarios. POST /api/scheduler/generar-planes genera combinaciones de cursos sin solapamientos (ver 'post_example'). POST /api/feedback/enviar registra un voto de modalidad (ver 'feedback_example').",
        "post_example": example,
        "feedback_example": {"curso_codigo": "61.03-1", "modalidad": "presencial", "sede": "PC", "padron": "12345"},
        "dias": "0 = domingo, 1 = lunes, ..., 6 = sábado",
        "preferencias": {"sede": ["ANY", "PC", "LH"], "modalidad": ["ANY", "presencial", "virtual"]},
        "modalidades_votables": ["presencial", "virtual", "hibrido"],
        "endpoints": [
            "POST /api/scheduler/generar-planes",
            "GET  /api/scheduler/curso/{codigo}",
            "POST /api/feedback/enviar",
            "GET  /api/feedback/curso/{codigo}/modalidad",
            "GET  /api/feedback/curso/{codigo}/feedbacks",
            "GET  /api/feedback/todos-cursos",
            "GET  /api/feedback/filtrar?modalidad=presencial&sede=PC",
            "GET  /api/health",
        ],
    });

    HttpResponse::Ok().json(help)
}

/// GET /api/health
pub async fn health_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "mensaje": "Backend funcionando",
        "umbral_consenso": estado.umbral_consenso,
        "max_planes": estado.max_planes,
    }))
}
