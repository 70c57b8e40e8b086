//! Análisis heurístico de un plan: ventajas, desventajas y un puntaje 0-100.
//!
//! Reglas (en este orden):
//!
//! Ventajas
//! - días libres (lunes a sábado sin clases)
//! - carga equilibrada entre días (máx - mín de clases por día <= 2)
//!
//! Desventajas
//! - hueco de 2h o más entre clases consecutivas de un día (una por hueco)
//! - cambio de sede en un mismo día
//! - día con 4 o más clases
//! - 3 o más días con clases antes de las 9
//!
//! Puntaje: 50 + 10 por ventaja - 20 por desventaja, acotado a [0, 100].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{Clase, Curso, NOMBRES_DIAS};

const DIAS_HABILES: u8 = 6;
const HUECO_GRANDE_MIN: i32 = 120;
const CLASES_DIA_CARGADO: usize = 4;
const INICIO_TEMPRANO_MIN: i32 = 9 * 60;
const DIAS_TEMPRANOS_LIMITE: usize = 3;
const DIFERENCIA_EQUILIBRADA: usize = 2;

const SCORE_BASE: i32 = 50;
const PESO_VENTAJA: i32 = 10;
const PESO_DESVENTAJA: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoEtiqueta {
    DiasLibres,
    Equilibrado,
    HuecoGrande,
    CambioSede,
    DiaCargado,
    ClasesTempranas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etiqueta {
    pub tipo: TipoEtiqueta,
    pub texto: String,
    pub icono: String,
    pub color: String,
}

impl Etiqueta {
    fn new(tipo: TipoEtiqueta, texto: String, icono: &str, color: &str) -> Self {
        Etiqueta { tipo, texto, icono: icono.to_string(), color: color.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalisisPlan {
    pub ventajas: Vec<Etiqueta>,
    pub desventajas: Vec<Etiqueta>,
    pub score: i32,
    pub total_flags: usize,
}

/// Sede inferida del aula de una clase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SedeAula {
    PaseoColon,
    LasHeras,
    Principal,
}

fn sede_de_aula(aula: Option<&str>) -> Option<SedeAula> {
    let aula = aula?.trim();
    let lower = aula.to_lowercase();
    if lower.contains("pc") {
        Some(SedeAula::PaseoColon)
    } else if lower.contains("lh") {
        Some(SedeAula::LasHeras)
    } else if !aula.is_empty() && aula != "Aula a determinar" {
        Some(SedeAula::Principal)
    } else {
        None
    }
}

fn nombre_dia(dia: u8) -> &'static str {
    NOMBRES_DIAS.get(dia as usize).copied().unwrap_or("?")
}

pub fn analizar_plan(cursos: &[Curso]) -> AnalisisPlan {
    let mut ventajas: Vec<Etiqueta> = Vec::new();
    let mut desventajas: Vec<Etiqueta> = Vec::new();

    // clases por día, con la materia de cada una
    let mut por_dia: BTreeMap<u8, Vec<(&Curso, &Clase)>> = BTreeMap::new();
    for curso in cursos {
        for clase in &curso.clases {
            por_dia.entry(clase.dia).or_default().push((curso, clase));
        }
    }

    let ocupados = (1..=DIAS_HABILES).filter(|d| por_dia.contains_key(d)).count();
    let dias_libres = DIAS_HABILES as usize - ocupados;
    if dias_libres >= 2 {
        ventajas.push(Etiqueta::new(TipoEtiqueta::DiasLibres, format!("{} días sin clases", dias_libres), "🌴", "green"));
    } else if dias_libres == 1 {
        ventajas.push(Etiqueta::new(TipoEtiqueta::DiasLibres, "1 día sin clases".to_string(), "🌴", "green"));
    }

    for (dia, clases) in por_dia.iter() {
        let mut ordenadas: Vec<&Clase> = clases.iter().map(|(_, c)| *c).collect();
        ordenadas.sort_by_key(|c| c.inicio_min());
        for par in ordenadas.windows(2) {
            let hueco = par[1].inicio_min() - par[0].fin_min();
            if hueco >= HUECO_GRANDE_MIN {
                desventajas.push(Etiqueta::new(
                    TipoEtiqueta::HuecoGrande,
                    format!("{}: {}h libre entre clases", nombre_dia(*dia), hueco / 60),
                    "⏰",
                    "yellow",
                ));
            }
        }
    }

    for (dia, clases) in por_dia.iter() {
        let sedes: BTreeSet<SedeAula> = clases.iter().filter_map(|(_, c)| sede_de_aula(c.aula.as_deref())).collect();
        if sedes.len() > 1 {
            desventajas.push(Etiqueta::new(TipoEtiqueta::CambioSede, format!("{}: Cambio de sede", nombre_dia(*dia)), "🚌", "red"));
        }
    }

    for (dia, clases) in por_dia.iter() {
        if clases.len() >= CLASES_DIA_CARGADO {
            let materias: HashSet<&str> = clases.iter().map(|(c, _)| c.materia.codigo.as_str()).collect();
            desventajas.push(Etiqueta::new(
                TipoEtiqueta::DiaCargado,
                format!("{}: {} materias en un día", nombre_dia(*dia), materias.len()),
                "😰",
                "orange",
            ));
        }
    }

    let dias_tempranos = por_dia
        .values()
        .filter(|clases| clases.iter().any(|(_, c)| c.inicio_min() < INICIO_TEMPRANO_MIN))
        .count();
    if dias_tempranos >= DIAS_TEMPRANOS_LIMITE {
        desventajas.push(Etiqueta::new(
            TipoEtiqueta::ClasesTempranas,
            format!("{} días con clases antes de las 9", dias_tempranos),
            "🌅",
            "yellow",
        ));
    }

    let cantidades: Vec<usize> = por_dia.values().map(|c| c.len()).collect();
    if let (Some(max), Some(min)) = (cantidades.iter().max(), cantidades.iter().min()) {
        if max - min <= DIFERENCIA_EQUILIBRADA {
            ventajas.push(Etiqueta::new(TipoEtiqueta::Equilibrado, "Carga equilibrada entre días".to_string(), "⚖️", "blue"));
        }
    }

    let score = calcular_score(ventajas.len(), desventajas.len());
    let total_flags = ventajas.len() + desventajas.len();
    AnalisisPlan { ventajas, desventajas, score, total_flags }
}

pub fn calcular_score(ventajas: usize, desventajas: usize) -> i32 {
    let bruto = SCORE_BASE as i64 + PESO_VENTAJA as i64 * ventajas as i64 - PESO_DESVENTAJA as i64 * desventajas as i64;
    bruto.clamp(0, 100) as i32
}
