// generador.rs - Orquesta una solicitud de planes completa:
// resolver + filtrar + enumerar, analizar cada plan, reordenar por
// prioridad y armar estadísticas. Cero planes no es un error: se responde
// success = false con un diagnóstico de la causa.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithm::analyzer::{analizar_plan, AnalisisPlan};
use crate::algorithm::estadisticas::{generar_estadisticas, Estadisticas};
use crate::algorithm::planes::{generar_planes, GeneracionPlanes, OpcionesPlanes};
use crate::api_json::SolicitudPlanes;
use crate::catalogo::Catalogo;
use crate::error::Result;
use crate::models::Plan;

const TOP_PRIORIDADES: usize = 10;
pub const TIPO_ADVERTENCIA_NUNCA_USADOS: &str = "advertencia_nunca_usados";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausaSinPlanes {
    /// Ningún código pedido existe en el catálogo.
    CursosNoEncontrados,
    /// Las preferencias de sede/modalidad descartaron todos los cursos.
    Preferencias,
    /// Los horarios bloqueados descartaron todos los cursos restantes.
    HorariosExcluidos,
    /// Hay candidatos pero no existe combinación válida.
    Solapamiento,
}

/// Qué candidatos se perdieron antes de enumerar, y por qué.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReporteDescartes {
    pub no_encontrados: Vec<String>,
    pub descartados_preferencias: Vec<String>,
    pub descartados_excluidos: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RespuestaPlanes {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causa: Option<CausaSinPlanes>,
    pub estadisticas: Estadisticas,
    pub planes: Vec<Plan>,
    /// Paralelo a `planes`.
    pub analisis: Vec<AnalisisPlan>,
    /// Prioridad acumulada de cada plan, paralela a `planes`.
    pub prioridades: Vec<i64>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_advertencia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertencia: Option<String>,
    pub descartes: ReporteDescartes,
}

/// Suma saturada: prioridades extremas no desbordan, quedan en los límites de i64.
pub fn prioridad_total(plan: &Plan, solicitud: &SolicitudPlanes) -> i64 {
    plan.iter()
        .map(|c| solicitud.prioridad_de(&c.codigo))
        .fold(0i64, |acc, p| acc.saturating_add(p))
}

fn diagnosticar(generacion: &GeneracionPlanes, solicitud: &SolicitudPlanes, mensaje_solapamiento: &str) -> (CausaSinPlanes, String) {
    if generacion.resueltos.is_empty() {
        return (
            CausaSinPlanes::CursosNoEncontrados,
            format!("Ninguno de los {} cursos solicitados existe en el catálogo.", generacion.no_encontrados.len()),
        );
    }
    if generacion.candidatos == 0 && generacion.descartados_excluidos.is_empty() {
        let prefs = &solicitud.preferencias;
        return (
            CausaSinPlanes::Preferencias,
            format!(
                "Ningún curso cumple las preferencias (sede {}, modalidad {}).",
                prefs.sede.as_str(),
                prefs.modalidad.as_str()
            ),
        );
    }
    if generacion.candidatos == 0 {
        return (
            CausaSinPlanes::HorariosExcluidos,
            format!(
                "Todos los cursos chocan con tus {} horarios bloqueados.",
                solicitud.horarios_excluidos.len()
            ),
        );
    }
    (CausaSinPlanes::Solapamiento, mensaje_solapamiento.to_string())
}

/// Ejecuta una solicitud ya validada. `max_planes_default` se usa cuando la
/// solicitud no trae `max_planes`.
pub fn generar_respuesta<C: Catalogo + ?Sized>(
    catalogo: &C,
    solicitud: &SolicitudPlanes,
    max_planes_default: usize,
) -> Result<RespuestaPlanes> {
    let opciones = OpcionesPlanes {
        max_planes: solicitud.max_planes.unwrap_or(max_planes_default),
        permitir_parciales: solicitud.permitir_parciales,
        horarios_excluidos: solicitud.horarios_excluidos.clone(),
        preferencias: solicitud.preferencias,
    };
    let generacion = generar_planes(catalogo, &solicitud.cursos, &opciones)?;

    let mut estadisticas = generar_estadisticas(
        &generacion.planes,
        &solicitud.cursos,
        &generacion.resueltos,
        generacion.total_materias,
        solicitud.horarios_excluidos.len(),
    );

    let descartes = ReporteDescartes {
        no_encontrados: generacion.no_encontrados.clone(),
        descartados_preferencias: generacion.descartados_preferencias.clone(),
        descartados_excluidos: generacion.descartados_excluidos.clone(),
    };

    if generacion.planes.is_empty() {
        let (causa, mensaje) = diagnosticar(&generacion, solicitud, &estadisticas.mensaje);
        info!(causa = ?causa, "sin planes factibles");
        estadisticas.mensaje = mensaje.clone();
        return Ok(RespuestaPlanes {
            success: false,
            error: Some(mensaje),
            causa: Some(causa),
            estadisticas,
            planes: Vec::new(),
            analisis: Vec::new(),
            prioridades: Vec::new(),
            total: 0,
            tipo_advertencia: None,
            advertencia: None,
            descartes,
        });
    }

    let mut evaluados: Vec<(Plan, i64, AnalisisPlan)> = generacion
        .planes
        .into_iter()
        .map(|plan| {
            let total = prioridad_total(&plan, solicitud);
            let analisis = analizar_plan(&plan);
            (plan, total, analisis)
        })
        .collect();

    if !solicitud.prioridades.is_empty() {
        // estable: a igual prioridad se mantiene el orden por tamaño
        evaluados.sort_by(|a, b| b.1.cmp(&a.1));
        estadisticas.prioridades_totales = Some(evaluados.iter().take(TOP_PRIORIDADES).map(|e| e.1).collect());
        debug!(top = ?estadisticas.prioridades_totales, "planes reordenados por prioridad");
    }

    let total = evaluados.len();
    let mut planes = Vec::with_capacity(total);
    let mut prioridades = Vec::with_capacity(total);
    let mut analisis = Vec::with_capacity(total);
    for (plan, prio, an) in evaluados {
        planes.push(plan);
        prioridades.push(prio);
        analisis.push(an);
    }

    let advertencia = estadisticas.advertencia_nunca_usados.clone();
    Ok(RespuestaPlanes {
        success: true,
        error: None,
        causa: None,
        tipo_advertencia: advertencia.as_ref().map(|_| TIPO_ADVERTENCIA_NUNCA_USADOS.to_string()),
        advertencia,
        estadisticas,
        planes,
        analisis,
        prioridades,
        total,
        descartes,
    })
}
