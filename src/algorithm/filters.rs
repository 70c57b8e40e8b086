/// Filtros de candidatos previos a la enumeración de planes.
///
/// Los cursos que no pasan un filtro se quitan del pool de candidatos para
/// la solicitud completa, y se reportan por separado al llamador.
use crate::algorithm::conflict::curso_en_horarios_excluidos;
use crate::models::{Curso, HorarioExcluido, Preferencias};
use tracing::debug;

/// Devuelve true si el curso coincide con las preferencias del usuario.
///
/// Sede desconocida o modalidad no confirmada (sin confirmar, híbrida) nunca
/// eliminan un curso: la falta de información no es un desacuerdo.
pub fn curso_cumple_preferencias(curso: &Curso, prefs: &Preferencias) -> bool {
    let sede_ok = if curso.sede.es_conocida() {
        prefs.sede.acepta(curso.sede)
    } else {
        true
    };

    let mod_ok = if curso.modalidad.es_confirmada() {
        prefs.modalidad.acepta(curso.modalidad)
    } else {
        true
    };

    sede_ok && mod_ok
}

/// Resultado de aplicar los filtros: candidatos que siguen y códigos descartados por causa.
#[derive(Debug, Default)]
pub struct CandidatosFiltrados {
    pub cursos: Vec<Curso>,
    pub descartados_preferencias: Vec<String>,
    pub descartados_excluidos: Vec<String>,
}

/// Aplica preferencias y luego horarios excluidos, preservando el orden de entrada.
pub fn aplicar_filtros(
    cursos: Vec<Curso>,
    prefs: &Preferencias,
    excluidos: &[HorarioExcluido],
) -> CandidatosFiltrados {
    let mut out = CandidatosFiltrados::default();

    for curso in cursos {
        if !curso_cumple_preferencias(&curso, prefs) {
            debug!(curso = %curso.codigo, "descartado por preferencias de sede/modalidad");
            out.descartados_preferencias.push(curso.codigo);
            continue;
        }
        if curso_en_horarios_excluidos(&curso, excluidos) {
            debug!(curso = %curso.codigo, "descartado por horario excluido");
            out.descartados_excluidos.push(curso.codigo);
            continue;
        }
        out.cursos.push(curso);
    }

    out
}
