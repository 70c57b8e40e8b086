// planes.rs - Enumerador exhaustivo de planes sin solapamientos
//
// Un plan es un subconjunto de los cursos candidatos que cumple:
//   1. a lo sumo un curso por materia
//   2. ningún par de clases se solapa
//   3. si no se permiten parciales, cubre todas las materias del pool filtrado
//
// Los subconjuntos se recorren por tamaño creciente y, dentro de cada tamaño,
// en orden lexicográfico de índices (el mismo orden que "todas las
// combinaciones de tamaño k" sobre la lista de entrada). Un prefijo que ya
// viola 1 o 2 se poda sin generar sus extensiones.
//
// El tope `max_planes` es una válvula de seguridad, no un criterio de
// calidad: se verifica tras cada plan aceptado y, al truncar, se conservan
// los planes más chicos encontrados primero. Planes grandes que serían
// mejores pueden perderse según el orden de los códigos de entrada.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::algorithm::conflict::matriz_conflictos;
use crate::algorithm::filters::aplicar_filtros;
use crate::catalogo::Catalogo;
use crate::config::MAX_PLANES_DEFAULT;
use crate::error::Result;
use crate::models::{Curso, HorarioExcluido, Plan, Preferencias};

/// Parámetros de una generación de planes.
#[derive(Debug, Clone)]
pub struct OpcionesPlanes {
    pub max_planes: usize,
    pub permitir_parciales: bool,
    pub horarios_excluidos: Vec<HorarioExcluido>,
    pub preferencias: Preferencias,
}

impl Default for OpcionesPlanes {
    fn default() -> Self {
        OpcionesPlanes {
            max_planes: MAX_PLANES_DEFAULT,
            permitir_parciales: false,
            horarios_excluidos: Vec::new(),
            preferencias: Preferencias::default(),
        }
    }
}

/// Planes generados junto con el reporte de qué candidatos se perdieron y por qué.
#[derive(Debug, Default)]
pub struct GeneracionPlanes {
    pub planes: Vec<Plan>,
    /// Cursos resueltos contra el catálogo, antes de filtrar.
    pub resueltos: Vec<Curso>,
    /// Cursos que sobrevivieron a los filtros.
    pub candidatos: usize,
    /// Materias distintas entre los candidatos filtrados.
    pub total_materias: usize,
    pub no_encontrados: Vec<String>,
    pub descartados_preferencias: Vec<String>,
    pub descartados_excluidos: Vec<String>,
}

pub fn contar_materias(cursos: &[Curso]) -> usize {
    cursos.iter().map(|c| c.materia.codigo.as_str()).collect::<HashSet<_>>().len()
}

/// Resuelve los códigos contra el catálogo, filtra y enumera.
/// Códigos que no existen se descartan (se loguean y reportan, no abortan).
pub fn generar_planes<C: Catalogo + ?Sized>(
    catalogo: &C,
    codigos: &[String],
    opciones: &OpcionesPlanes,
) -> Result<GeneracionPlanes> {
    let mut vistos: HashSet<&str> = HashSet::new();
    let mut resueltos: Vec<Curso> = Vec::new();
    let mut no_encontrados: Vec<String> = Vec::new();

    for codigo in codigos {
        if !vistos.insert(codigo.as_str()) {
            continue;
        }
        match catalogo.obtener_curso(codigo)? {
            Some(curso) => resueltos.push(curso),
            None => {
                warn!(curso = %codigo, "no se encontró el curso; se ignora");
                no_encontrados.push(codigo.clone());
            }
        }
    }

    let n_resueltos = resueltos.len();
    let filtrados = aplicar_filtros(resueltos.clone(), &opciones.preferencias, &opciones.horarios_excluidos);
    let total_materias = contar_materias(&filtrados.cursos);

    debug!(
        resueltos = n_resueltos,
        candidatos = filtrados.cursos.len(),
        total_materias,
        "candidatos listos para enumerar"
    );

    let planes = enumerar_planes(&filtrados.cursos, opciones.max_planes, opciones.permitir_parciales);
    info!(planes = planes.len(), max_planes = opciones.max_planes, "planes generados");

    Ok(GeneracionPlanes {
        planes,
        resueltos,
        candidatos: filtrados.cursos.len(),
        total_materias,
        no_encontrados,
        descartados_preferencias: filtrados.descartados_preferencias,
        descartados_excluidos: filtrados.descartados_excluidos,
    })
}

/// Enumera todos los planes válidos sobre `cursos` (ya filtrados), hasta
/// `max_planes`. Resultado ordenado por cantidad de cursos descendente; el
/// orden de enumeración se mantiene entre planes del mismo tamaño.
pub fn enumerar_planes(cursos: &[Curso], max_planes: usize, permitir_parciales: bool) -> Vec<Plan> {
    let n = cursos.len();
    if n == 0 || max_planes == 0 {
        return Vec::new();
    }

    let total_materias = contar_materias(cursos);
    let conflictos = matriz_conflictos(cursos);

    let mut encontrados: Vec<Vec<usize>> = Vec::new();
    let mut actual: Vec<usize> = Vec::with_capacity(total_materias);

    // Con un curso por materia ningún plan supera `total_materias` cursos.
    for tamanio in 1..=total_materias {
        if encontrados.len() >= max_planes {
            break;
        }
        // Sin parciales sólo el tamaño que cubre todas las materias puede servir.
        if !permitir_parciales && tamanio != total_materias {
            continue;
        }
        let tope = buscar(0, tamanio, &conflictos, &mut actual, &mut encontrados, max_planes);
        if tope {
            debug!(tamanio, "tope de planes alcanzado");
            break;
        }
    }

    let mut planes: Vec<Plan> = encontrados
        .into_iter()
        .map(|ixs| ixs.into_iter().map(|i| cursos[i].clone()).collect())
        .collect();
    // sort_by es estable: dentro de un mismo tamaño se conserva el orden de enumeración
    planes.sort_by(|a, b| b.len().cmp(&a.len()));
    planes
}

/// Backtracking sobre índices crecientes. Devuelve true si se alcanzó el tope.
fn buscar(
    desde: usize,
    tamanio: usize,
    conflictos: &[Vec<bool>],
    actual: &mut Vec<usize>,
    encontrados: &mut Vec<Vec<usize>>,
    max_planes: usize,
) -> bool {
    if actual.len() == tamanio {
        encontrados.push(actual.clone());
        return encontrados.len() >= max_planes;
    }

    let n = conflictos.len();
    let faltan = tamanio - actual.len();
    if desde + faltan > n {
        return false;
    }

    for i in desde..=(n - faltan) {
        if actual.iter().any(|&j| conflictos[j][i]) {
            continue;
        }
        actual.push(i);
        let tope = buscar(i + 1, tamanio, conflictos, actual, encontrados, max_planes);
        actual.pop();
        if tope {
            return true;
        }
    }
    false
}
