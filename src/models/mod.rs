// Estructuras de datos principales del catálogo y de los planes generados.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Nombres cortos de los días, indexados por `Clase::dia` (domingo = 0).
pub const NOMBRES_DIAS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// Sede donde se dicta un curso. Cualquier token distinto de PC/LH queda como
/// `Desconocida`, que nunca elimina un curso al filtrar por preferencias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Sede {
    /// Paseo Colón
    PC,
    /// Las Heras
    LH,
    #[default]
    Desconocida,
}

impl Sede {
    pub fn from_token(token: &str) -> Sede {
        match token.trim().to_uppercase().as_str() {
            "PC" => Sede::PC,
            "LH" => Sede::LH,
            _ => Sede::Desconocida,
        }
    }

    /// Token persistido; `None` para sede desconocida.
    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            Sede::PC => Some("PC"),
            Sede::LH => Some("LH"),
            Sede::Desconocida => None,
        }
    }

    pub fn es_conocida(&self) -> bool {
        !matches!(self, Sede::Desconocida)
    }
}

impl Serialize for Sede {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_token() {
            Some(t) => serializer.serialize_str(t),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Sede {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| Sede::from_token(&s)).unwrap_or(Sede::Desconocida))
    }
}

/// Modalidad de dictado. `SinConfirmar` es el valor inicial hasta que el
/// consenso de votos la reemplaza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Modalidad {
    Presencial,
    Virtual,
    Hibrido,
    #[default]
    SinConfirmar,
}

impl Modalidad {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modalidad::Presencial => "presencial",
            Modalidad::Virtual => "virtual",
            Modalidad::Hibrido => "hibrido",
            Modalidad::SinConfirmar => "sin_confirmar",
        }
    }

    /// Interpreta un token almacenado. Valores desconocidos se tratan como sin confirmar.
    pub fn from_token(token: &str) -> Modalidad {
        Modalidad::parse_voto(token).unwrap_or(Modalidad::SinConfirmar)
    }

    /// Sólo los tres valores votables; `sin_confirmar` no es un voto válido.
    pub fn parse_voto(token: &str) -> Option<Modalidad> {
        match token.trim().to_lowercase().as_str() {
            "presencial" => Some(Modalidad::Presencial),
            "virtual" => Some(Modalidad::Virtual),
            "hibrido" | "híbrido" => Some(Modalidad::Hibrido),
            _ => None,
        }
    }

    /// Presencial y virtual son los únicos valores que cuentan como confirmados
    /// para el filtro de preferencias.
    pub fn es_confirmada(&self) -> bool {
        matches!(self, Modalidad::Presencial | Modalidad::Virtual)
    }
}

impl fmt::Display for Modalidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde para horas "HH:MM" sobre `NaiveTime`.
pub mod hora_hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hora: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hora.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hora(&s).ok_or_else(|| serde::de::Error::custom(format!("hora inválida: '{}'", s)))
    }
}

/// Acepta "HH:MM" y también "HH:MM:SS".
pub fn parse_hora(s: &str) -> Option<NaiveTime> {
    let t = s.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Minutos desde medianoche.
pub fn minutos(hora: &NaiveTime) -> i32 {
    (hora.hour() * 60 + hora.minute()) as i32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materia {
    pub codigo: String,
    pub nombre: String,
}

/// Un bloque semanal de un curso. Se asume `hora_fin > hora_inicio`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clase {
    pub dia: u8,
    #[serde(with = "hora_hhmm")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hora_hhmm")]
    pub hora_fin: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aula: Option<String>,
}

impl Clase {
    pub fn inicio_min(&self) -> i32 { minutos(&self.hora_inicio) }
    pub fn fin_min(&self) -> i32 { minutos(&self.hora_fin) }
}

/// Curso concreto (sección) de una materia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curso {
    pub codigo: String,
    pub materia: Materia,
    pub numero_curso: String,
    pub catedra: String,
    pub periodo: String,
    #[serde(default)]
    pub sede: Sede,
    #[serde(default)]
    pub modalidad: Modalidad,
    #[serde(default)]
    pub votos_modalidad: i64,
    #[serde(default)]
    pub clases: Vec<Clase>,
    #[serde(default)]
    pub docentes: Vec<String>,
}

/// Compromiso fijo del estudiante; mismas reglas de solapamiento que `Clase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorarioExcluido {
    pub dia: u8,
    #[serde(with = "hora_hhmm")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hora_hhmm")]
    pub hora_fin: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SedePreferida {
    #[default]
    Cualquiera,
    PC,
    LH,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalidadPreferida {
    #[default]
    Cualquiera,
    Presencial,
    Virtual,
}

impl SedePreferida {
    pub fn parse(token: &str) -> Option<SedePreferida> {
        match token.trim().to_uppercase().as_str() {
            "ANY" | "" => Some(SedePreferida::Cualquiera),
            "PC" => Some(SedePreferida::PC),
            "LH" => Some(SedePreferida::LH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SedePreferida::Cualquiera => "ANY",
            SedePreferida::PC => "PC",
            SedePreferida::LH => "LH",
        }
    }

    pub fn acepta(&self, sede: Sede) -> bool {
        match self {
            SedePreferida::Cualquiera => true,
            SedePreferida::PC => sede == Sede::PC,
            SedePreferida::LH => sede == Sede::LH,
        }
    }
}

impl ModalidadPreferida {
    pub fn parse(token: &str) -> Option<ModalidadPreferida> {
        match token.trim().to_lowercase().as_str() {
            "any" | "" => Some(ModalidadPreferida::Cualquiera),
            "presencial" => Some(ModalidadPreferida::Presencial),
            "virtual" => Some(ModalidadPreferida::Virtual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalidadPreferida::Cualquiera => "ANY",
            ModalidadPreferida::Presencial => "presencial",
            ModalidadPreferida::Virtual => "virtual",
        }
    }

    pub fn acepta(&self, modalidad: Modalidad) -> bool {
        match self {
            ModalidadPreferida::Cualquiera => true,
            ModalidadPreferida::Presencial => modalidad == Modalidad::Presencial,
            ModalidadPreferida::Virtual => modalidad == Modalidad::Virtual,
        }
    }
}

macro_rules! serde_por_token {
    ($tipo:ty, $nombre:literal) => {
        impl Serialize for $tipo {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $tipo {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$tipo>::parse(&s).ok_or_else(|| {
                    serde::de::Error::custom(format!("{} inválida: '{}'", $nombre, s))
                })
            }
        }
    };
}

serde_por_token!(SedePreferida, "sede");
serde_por_token!(ModalidadPreferida, "modalidad");

/// Preferencias de sede y modalidad del estudiante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferencias {
    #[serde(default)]
    pub sede: SedePreferida,
    #[serde(default)]
    pub modalidad: ModalidadPreferida,
}

/// Voto anónimo de un usuario sobre la modalidad de un curso. A lo sumo uno
/// por par (curso, padrón).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotoModalidad {
    pub curso_codigo: String,
    pub padron: String,
    pub modalidad: Modalidad,
    pub sede: Option<Sede>,
    pub actualizado: DateTime<Utc>,
}

/// Combinación de cursos sin solapamientos, a lo sumo uno por materia.
pub type Plan = Vec<Curso>;
