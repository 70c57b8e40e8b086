#![allow(dead_code)]

use planificador::models::{parse_hora, Clase, Curso, HorarioExcluido, Materia, Modalidad, Sede};

pub fn clase(dia: u8, ini: &str, fin: &str) -> Clase {
    Clase { dia, hora_inicio: parse_hora(ini).unwrap(), hora_fin: parse_hora(fin).unwrap(), aula: None }
}

pub fn clase_en(dia: u8, ini: &str, fin: &str, aula: &str) -> Clase {
    Clase { aula: Some(aula.to_string()), ..clase(dia, ini, fin) }
}

pub fn curso(codigo: &str, materia: &str, clases: Vec<Clase>) -> Curso {
    Curso {
        codigo: codigo.to_string(),
        materia: Materia { codigo: materia.to_string(), nombre: format!("Materia {}", materia) },
        numero_curso: codigo.rsplit('-').next().unwrap_or("1").to_string(),
        catedra: format!("Cátedra {}", codigo),
        periodo: "2025-1C".to_string(),
        sede: Sede::Desconocida,
        modalidad: Modalidad::SinConfirmar,
        votos_modalidad: 0,
        clases,
        docentes: vec!["Docente".to_string()],
    }
}

pub fn con(mut c: Curso, sede: Sede, modalidad: Modalidad) -> Curso {
    c.sede = sede;
    c.modalidad = modalidad;
    c
}

pub fn bloque(dia: u8, ini: &str, fin: &str) -> HorarioExcluido {
    HorarioExcluido { dia, hora_inicio: parse_hora(ini).unwrap(), hora_fin: parse_hora(fin).unwrap() }
}

pub fn codigos(plan: &[Curso]) -> Vec<&str> {
    plan.iter().map(|c| c.codigo.as_str()).collect()
}

/// Tres materias con dos cursos cada una, ninguno se solapa con otro.
pub fn seis_cursos_tres_materias() -> Vec<Curso> {
    vec![
        curso("M1-1", "M1", vec![clase(1, "08:00", "10:00")]),
        curso("M1-2", "M1", vec![clase(1, "10:00", "12:00")]),
        curso("M2-1", "M2", vec![clase(2, "08:00", "10:00")]),
        curso("M2-2", "M2", vec![clase(2, "10:00", "12:00")]),
        curso("M3-1", "M3", vec![clase(3, "08:00", "10:00")]),
        curso("M3-2", "M3", vec![clase(3, "10:00", "12:00")]),
    ]
}
