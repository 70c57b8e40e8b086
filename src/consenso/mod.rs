//! Consenso de modalidad/sede a partir de votos anónimos.
//!
//! Cada padrón tiene a lo sumo un voto por curso; volver a votar reemplaza el
//! voto anterior. Tras cada voto se recalcula el consenso: el grupo
//! (modalidad, sede) más votado se escribe en el curso sólo si alcanza el
//! umbral. Empates en la cantidad de votos se resuelven por orden
//! lexicográfico del token de modalidad y luego del de sede (sin sede primero).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::catalogo::Catalogo;
use crate::error::{PlanificadorError, Result};
use crate::models::{Modalidad, Sede, VotoModalidad};

/// Voto tal como llega del cliente, antes de validar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolicitudVoto {
    pub curso_codigo: String,
    pub modalidad: String,
    #[serde(default)]
    pub sede: Option<String>,
    pub padron: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum EstadoConsenso {
    /// El grupo más votado alcanzó el umbral y quedó escrito en el curso.
    Confirmado { modalidad: Modalidad, sede: Sede, votos: i64 },
    /// Todavía nadie alcanza el umbral; el curso no se modificó.
    SinConsenso { votos_top: i64, umbral: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrupoVotos {
    pub modalidad: Modalidad,
    pub sede: Option<Sede>,
    pub votos: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalidadConfirmada {
    pub modalidad: Modalidad,
    pub sede: Sede,
    pub votos_totales: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotacionPendiente {
    pub modalidad: Modalidad,
    pub sede: Option<Sede>,
    pub votos: i64,
    pub porcentaje: f64,
    pub falta_para_confirmar: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotosPendientes {
    pub votaciones: Vec<VotacionPendiente>,
    pub total_votos: i64,
}

fn sede_token(sede: Option<Sede>) -> &'static str {
    sede.and_then(|s| s.as_token()).unwrap_or("")
}

/// Valida y normaliza un voto. La sede de un voto virtual se descarta.
fn validar_voto(solicitud: &SolicitudVoto) -> Result<(Modalidad, Option<Sede>)> {
    let modalidad = Modalidad::parse_voto(&solicitud.modalidad).ok_or_else(|| {
        PlanificadorError::validacion("modalidad", format!("'{}' no es virtual, presencial ni hibrido", solicitud.modalidad))
    })?;

    if modalidad == Modalidad::Virtual {
        return Ok((modalidad, None));
    }

    let sede = match solicitud.sede.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(token) => match Sede::from_token(token) {
            Sede::Desconocida => {
                return Err(PlanificadorError::validacion("sede", format!("'{}' no es PC ni LH", token)));
            }
            s => Some(s),
        },
    };
    Ok((modalidad, sede))
}

/// Registra (o reemplaza) el voto del padrón y recalcula el consenso.
pub fn enviar_voto<C: Catalogo + ?Sized>(catalogo: &C, solicitud: &SolicitudVoto, umbral: usize) -> Result<EstadoConsenso> {
    if solicitud.curso_codigo.trim().is_empty() {
        return Err(PlanificadorError::validacion("curso_codigo", "es requerido"));
    }
    if solicitud.padron.trim().is_empty() {
        return Err(PlanificadorError::validacion("padron", "es requerido"));
    }
    if catalogo.obtener_curso(&solicitud.curso_codigo)?.is_none() {
        return Err(PlanificadorError::NoEncontrado(format!("curso {}", solicitud.curso_codigo)));
    }

    let (modalidad, sede) = validar_voto(solicitud)?;
    let voto = VotoModalidad {
        curso_codigo: solicitud.curso_codigo.clone(),
        padron: solicitud.padron.trim().to_string(),
        modalidad,
        sede,
        actualizado: Utc::now(),
    };
    catalogo.upsert_voto(&voto)?;
    debug!(curso = %voto.curso_codigo, modalidad = %modalidad, "voto registrado");

    recalcular_consenso(catalogo, &solicitud.curso_codigo, umbral)
}

/// Agrupa por (modalidad, sede), del más votado al menos votado.
pub fn agrupar_votos(votos: &[VotoModalidad]) -> Vec<GrupoVotos> {
    let mut conteo: HashMap<(Modalidad, Option<Sede>), i64> = HashMap::new();
    for v in votos {
        *conteo.entry((v.modalidad, v.sede)).or_default() += 1;
    }
    let mut grupos: Vec<GrupoVotos> = conteo
        .into_iter()
        .map(|((modalidad, sede), votos)| GrupoVotos { modalidad, sede, votos })
        .collect();
    grupos.sort_by(|a, b| {
        b.votos
            .cmp(&a.votos)
            .then_with(|| a.modalidad.as_str().cmp(b.modalidad.as_str()))
            .then_with(|| sede_token(a.sede).cmp(sede_token(b.sede)))
    });
    grupos
}

/// Escribe en el curso el grupo más votado si alcanza `umbral`. Recalcular
/// sin votos nuevos vuelve a escribir los mismos valores.
pub fn recalcular_consenso<C: Catalogo + ?Sized>(catalogo: &C, curso_codigo: &str, umbral: usize) -> Result<EstadoConsenso> {
    let votos = catalogo.votos_de_curso(curso_codigo)?;
    let grupos = agrupar_votos(&votos);

    let Some(top) = grupos.first() else {
        return Ok(EstadoConsenso::SinConsenso { votos_top: 0, umbral });
    };

    if top.votos < umbral as i64 {
        debug!(curso = curso_codigo, votos_top = top.votos, umbral, "sin consenso todavía");
        return Ok(EstadoConsenso::SinConsenso { votos_top: top.votos, umbral });
    }

    let sede = top.sede.unwrap_or(Sede::Desconocida);
    catalogo.confirmar_modalidad(curso_codigo, top.modalidad, sede, top.votos)?;
    info!(curso = curso_codigo, modalidad = %top.modalidad, votos = top.votos, "modalidad confirmada por consenso");
    Ok(EstadoConsenso::Confirmado { modalidad: top.modalidad, sede, votos: top.votos })
}

/// Modalidad confirmada del curso, o `None` si sigue sin confirmar.
pub fn consultar_confirmada<C: Catalogo + ?Sized>(catalogo: &C, curso_codigo: &str) -> Result<Option<ModalidadConfirmada>> {
    let curso = catalogo
        .obtener_curso(curso_codigo)?
        .ok_or_else(|| PlanificadorError::NoEncontrado(format!("curso {}", curso_codigo)))?;
    if curso.modalidad == Modalidad::SinConfirmar {
        return Ok(None);
    }
    Ok(Some(ModalidadConfirmada { modalidad: curso.modalidad, sede: curso.sede, votos_totales: curso.votos_modalidad }))
}

/// Desglose de votos por grupo con porcentaje (1 decimal) y votos faltantes.
pub fn consultar_pendientes<C: Catalogo + ?Sized>(catalogo: &C, curso_codigo: &str, umbral: usize) -> Result<VotosPendientes> {
    let votos = catalogo.votos_de_curso(curso_codigo)?;
    let grupos = agrupar_votos(&votos);
    let total: i64 = grupos.iter().map(|g| g.votos).sum();

    let votaciones = grupos
        .into_iter()
        .map(|g| {
            let porcentaje = if total > 0 {
                ((g.votos as f64 / total as f64) * 1000.0).round() / 10.0
            } else {
                0.0
            };
            VotacionPendiente {
                modalidad: g.modalidad,
                sede: g.sede,
                votos: g.votos,
                porcentaje,
                falta_para_confirmar: (umbral as i64 - g.votos).max(0),
            }
        })
        .collect();

    Ok(VotosPendientes { votaciones, total_votos: total })
}
