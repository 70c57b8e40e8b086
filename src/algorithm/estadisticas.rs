// Estadísticas sobre un lote de planes generados, para feedback al usuario.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{Curso, Plan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estadisticas {
    pub total_planes: usize,
    pub total_cursos_seleccionados: usize,
    pub max_materias_simultaneas: usize,
    pub min_materias_simultaneas: usize,
    pub promedio_materias: f64,
    pub materias_incluidas: Vec<String>,
    pub cursos_nunca_usados: Vec<String>,
    pub advertencia_nunca_usados: Option<String>,
    pub horarios_excluidos_activos: usize,
    pub mensaje: String,
    /// Las 10 mayores prioridades acumuladas, sólo si la solicitud trajo prioridades.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioridades_totales: Option<Vec<i64>>,
}

fn redondear(valor: f64, decimales: i32) -> f64 {
    let factor = 10f64.powi(decimales);
    (valor * factor).round() / factor
}

/// `codigos_originales` es la lista tal como la pidió el usuario; `resueltos`
/// son los cursos que el catálogo devolvió (para nombrar los nunca usados);
/// `total_materias` es la cobertura completa posible tras los filtros.
pub fn generar_estadisticas(
    planes: &[Plan],
    codigos_originales: &[String],
    resueltos: &[Curso],
    total_materias: usize,
    horarios_excluidos_activos: usize,
) -> Estadisticas {
    if planes.is_empty() {
        let mut mensaje = "No se pudieron generar planes sin solapamientos. Los cursos seleccionados se solapan completamente.".to_string();
        if horarios_excluidos_activos > 0 {
            mensaje.push_str(&format!(
                " Tienes {} horarios bloqueados que pueden estar limitando las opciones.",
                horarios_excluidos_activos
            ));
        }
        return Estadisticas {
            total_planes: 0,
            total_cursos_seleccionados: codigos_originales.len(),
            max_materias_simultaneas: 0,
            min_materias_simultaneas: 0,
            promedio_materias: 0.0,
            materias_incluidas: Vec::new(),
            cursos_nunca_usados: Vec::new(),
            advertencia_nunca_usados: None,
            horarios_excluidos_activos,
            mensaje,
            prioridades_totales: None,
        };
    }

    let max_materias = planes.iter().map(|p| p.len()).max().unwrap_or(0);
    let min_materias = planes.iter().map(|p| p.len()).min().unwrap_or(0);
    let suma: usize = planes.iter().map(|p| p.len()).sum();
    let promedio = redondear(suma as f64 / planes.len() as f64, 2);

    let mut materias_incluidas: BTreeSet<String> = BTreeSet::new();
    let mut cursos_usados: HashSet<&str> = HashSet::new();
    for plan in planes {
        for curso in plan {
            materias_incluidas.insert(curso.materia.codigo.clone());
            cursos_usados.insert(curso.codigo.as_str());
        }
    }

    let cursos_nunca_usados: Vec<String> = codigos_originales
        .iter()
        .filter(|c| !cursos_usados.contains(c.as_str()))
        .cloned()
        .collect();

    let por_codigo: HashMap<&str, &Curso> = resueltos.iter().map(|c| (c.codigo.as_str(), c)).collect();
    let info_nunca_usados: Vec<String> = cursos_nunca_usados
        .iter()
        .map(|codigo| match por_codigo.get(codigo.as_str()) {
            Some(c) => format!("{} - {}", c.materia.nombre, c.catedra),
            None => format!("{} - no encontrado", codigo),
        })
        .collect();
    let advertencia_nunca_usados = if info_nunca_usados.is_empty() {
        None
    } else {
        Some(format!(
            "Los siguientes cursos no aparecen en ningún plan:\n {}",
            info_nunca_usados.join("\n")
        ))
    };

    let mensaje = if max_materias < total_materias {
        format!(
            "Se generaron {} planes válidos, pero ninguno cubre las {} materias: como máximo {} materias simultáneas",
            planes.len(),
            total_materias,
            max_materias
        )
    } else {
        format!("Se generaron {} planes válidos con hasta {} materias simultáneas", planes.len(), max_materias)
    };

    Estadisticas {
        total_planes: planes.len(),
        total_cursos_seleccionados: codigos_originales.len(),
        max_materias_simultaneas: max_materias,
        min_materias_simultaneas: min_materias,
        promedio_materias: promedio,
        materias_incluidas: materias_incluidas.into_iter().collect(),
        cursos_nunca_usados,
        advertencia_nunca_usados,
        horarios_excluidos_activos,
        mensaje,
        prioridades_totales: None,
    }
}
