use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::consenso::SolicitudVoto;
use crate::error::{PlanificadorError, Result};
use crate::models::{HorarioExcluido, Preferencias, minutos};

/// Prioridad que se asume para cursos sin prioridad explícita.
pub const PRIORIDAD_DEFAULT: i64 = 3;

/// Parámetros de entrada para la generación de planes
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "cursos": ["CB100-1", "CB100-2", "61.03-1", "75.01-1"],
///   "prioridades": { "CB100-1": 5, "CB100-2": 3 },
///   "horarios_excluidos": [
///     {"dia": 1, "hora_inicio": "14:00", "hora_fin": "16:00"}
///   ],
///   "preferencias": { "sede": "ANY", "modalidad": "ANY" },
///   "permitir_parciales": false,
///   "max_planes": 1000
/// }
/// ```
///
/// # Campos:
/// - `cursos`: códigos de cursos candidatos (requerido, no vacío)
/// - `prioridades`: prioridad por código; los ausentes valen 3
/// - `horarios_excluidos`: compromisos fijos (día 0-6, domingo = 0)
/// - `preferencias`: sede `ANY|PC|LH`, modalidad `ANY|presencial|virtual`
/// - `permitir_parciales`: si es false sólo se devuelven planes que cubren todas las materias
/// - `max_planes`: tope de planes (opcional; default de configuración)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolicitudPlanes {
    pub cursos: Vec<String>,
    #[serde(default)]
    pub prioridades: HashMap<String, i64>,
    #[serde(default)]
    pub horarios_excluidos: Vec<HorarioExcluido>,
    #[serde(default)]
    pub preferencias: Preferencias,
    #[serde(default)]
    pub permitir_parciales: bool,
    #[serde(default)]
    pub max_planes: Option<usize>,
}

impl SolicitudPlanes {
    pub fn prioridad_de(&self, codigo: &str) -> i64 {
        self.prioridades.get(codigo).copied().unwrap_or(PRIORIDAD_DEFAULT)
    }
}

/// Deserializa un campo opcional reportando errores con el nombre del campo.
fn campo<T: DeserializeOwned>(obj: &Map<String, Value>, nombre: &str) -> Result<Option<T>> {
    match obj.get(nombre) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value::<T>(v.clone())
            .map(Some)
            .map_err(|e| PlanificadorError::validacion(nombre, e.to_string())),
    }
}

fn como_objeto(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| PlanificadorError::validacion("body", "se esperaba un objeto JSON"))
}

pub fn parse_solicitud_planes(json_str: &str) -> Result<SolicitudPlanes> {
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| PlanificadorError::validacion("body", e.to_string()))?;
    validar_solicitud_planes(&value)
}

/// Valida la solicitud campo por campo, antes de cualquier cálculo.
pub fn validar_solicitud_planes(value: &Value) -> Result<SolicitudPlanes> {
    let obj = como_objeto(value)?;

    let cursos_raw = obj
        .get("cursos")
        .ok_or_else(|| PlanificadorError::validacion("cursos", "se requiere la lista de códigos de cursos"))?;
    let arr = cursos_raw
        .as_array()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| PlanificadorError::validacion("cursos", "debe ser una lista no vacía"))?;
    let mut cursos = Vec::with_capacity(arr.len());
    for item in arr {
        let codigo = item
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PlanificadorError::validacion("cursos", format!("código inválido: {}", item)))?;
        cursos.push(codigo.to_string());
    }

    if let Some(v) = obj.get("horarios_excluidos") {
        if !v.is_array() && !v.is_null() {
            return Err(PlanificadorError::validacion("horarios_excluidos", "debe ser una lista"));
        }
    }
    let horarios_excluidos: Vec<HorarioExcluido> = campo(obj, "horarios_excluidos")?.unwrap_or_default();
    for (i, h) in horarios_excluidos.iter().enumerate() {
        if h.dia > 6 {
            return Err(PlanificadorError::validacion("horarios_excluidos", format!("bloque {}: día {} fuera de 0-6", i, h.dia)));
        }
        if minutos(&h.hora_fin) <= minutos(&h.hora_inicio) {
            return Err(PlanificadorError::validacion(
                "horarios_excluidos",
                format!("bloque {}: hora_fin debe ser posterior a hora_inicio", i),
            ));
        }
    }

    let prioridades: HashMap<String, i64> = campo(obj, "prioridades")?.unwrap_or_default();
    let preferencias: Preferencias = campo(obj, "preferencias")?.unwrap_or_default();
    let permitir_parciales: bool = campo(obj, "permitir_parciales")?.unwrap_or(false);
    let max_planes: Option<usize> = campo(obj, "max_planes")?;
    if max_planes == Some(0) {
        return Err(PlanificadorError::validacion("max_planes", "debe ser mayor que 0"));
    }

    Ok(SolicitudPlanes { cursos, prioridades, horarios_excluidos, preferencias, permitir_parciales, max_planes })
}

pub fn parse_solicitud_voto(json_str: &str) -> Result<SolicitudVoto> {
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| PlanificadorError::validacion("body", e.to_string()))?;
    validar_solicitud_voto(&value)
}

pub fn validar_solicitud_voto(value: &Value) -> Result<SolicitudVoto> {
    let obj = como_objeto(value)?;
    let mut requeridos: Vec<String> = Vec::new();
    for nombre in ["curso_codigo", "modalidad", "padron"] {
        let presente = match obj.get(nombre) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Number(_)) => nombre == "padron",
            _ => false,
        };
        if !presente {
            requeridos.push(nombre.to_string());
        }
    }
    if !requeridos.is_empty() {
        return Err(PlanificadorError::validacion(&requeridos.join(","), "faltan campos requeridos"));
    }

    // padrón numérico también se acepta
    let padron = match obj.get("padron") {
        Some(Value::Number(n)) => n.to_string(),
        _ => campo::<String>(obj, "padron")?.unwrap_or_default(),
    };

    Ok(SolicitudVoto {
        curso_codigo: campo::<String>(obj, "curso_codigo")?.unwrap_or_default(),
        modalidad: campo::<String>(obj, "modalidad")?.unwrap_or_default(),
        sede: campo::<String>(obj, "sede")?,
        padron,
    })
}
