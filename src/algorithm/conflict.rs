// Detección de solapamientos entre clases, cursos y horarios excluidos.
//
// Todos los intervalos son semiabiertos [inicio, fin) en minutos: una clase
// que termina 10:00 no choca con otra que empieza 10:00.
use crate::models::{minutos, Clase, Curso, HorarioExcluido};

/// Verifica si dos rangos de minutos (inicio, fin) se solapan.
pub fn rangos_se_solapan(r1: (i32, i32), r2: (i32, i32)) -> bool {
    !(r1.1 <= r2.0 || r2.1 <= r1.0)
}

/// True si ambas clases caen el mismo día y sus rangos se intersectan.
pub fn clases_se_solapan(c1: &Clase, c2: &Clase) -> bool {
    if c1.dia != c2.dia {
        return false;
    }
    rangos_se_solapan((c1.inicio_min(), c1.fin_min()), (c2.inicio_min(), c2.fin_min()))
}

/// True si alguna clase de `c1` se solapa con alguna de `c2`.
pub fn cursos_se_solapan(c1: &Curso, c2: &Curso) -> bool {
    c1.clases.iter().any(|a| c2.clases.iter().any(|b| clases_se_solapan(a, b)))
}

/// True si la clase pisa alguno de los horarios excluidos de su mismo día.
pub fn clase_en_horarios_excluidos(clase: &Clase, excluidos: &[HorarioExcluido]) -> bool {
    excluidos.iter().any(|ex| {
        ex.dia == clase.dia
            && rangos_se_solapan(
                (clase.inicio_min(), clase.fin_min()),
                (minutos(&ex.hora_inicio), minutos(&ex.hora_fin)),
            )
    })
}

/// True si alguna clase del curso pisa algún horario excluido.
pub fn curso_en_horarios_excluidos(curso: &Curso, excluidos: &[HorarioExcluido]) -> bool {
    if excluidos.is_empty() {
        return false;
    }
    curso.clases.iter().any(|c| clase_en_horarios_excluidos(c, excluidos))
}

/// Matriz simétrica de conflictos entre cursos (misma materia o solapamiento).
/// `conflictos[i][j] == true` significa que i y j no pueden ir en el mismo plan.
pub fn matriz_conflictos(cursos: &[Curso]) -> Vec<Vec<bool>> {
    let n = cursos.len();
    let mut m = vec![vec![false; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let a = &cursos[i];
            let b = &cursos[j];
            if a.materia.codigo == b.materia.codigo || cursos_se_solapan(a, b) {
                m[i][j] = true;
                m[j][i] = true;
            }
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_hora;

    fn clase(dia: u8, ini: &str, fin: &str) -> Clase {
        Clase { dia, hora_inicio: parse_hora(ini).unwrap(), hora_fin: parse_hora(fin).unwrap(), aula: None }
    }

    #[test]
    fn test_rangos_se_solapan() {
        // 08:30-09:50 y 09:00-10:00 se solapan
        assert!(rangos_se_solapan((510, 590), (540, 600)));
        // 08:00-09:00 y 09:00-10:00 no se solapan (límite)
        assert!(!rangos_se_solapan((480, 540), (540, 600)));
    }

    #[test]
    fn test_clases_distinto_dia() {
        assert!(!clases_se_solapan(&clase(1, "09:00", "12:00"), &clase(2, "09:00", "12:00")));
    }

    #[test]
    fn test_clases_contenidas() {
        let larga = clase(3, "08:00", "14:00");
        let corta = clase(3, "10:00", "11:00");
        assert!(clases_se_solapan(&larga, &corta));
        assert!(clases_se_solapan(&corta, &larga));
    }

    #[test]
    fn test_excluido_borde() {
        let ex = HorarioExcluido { dia: 1, hora_inicio: parse_hora("12:00").unwrap(), hora_fin: parse_hora("14:00").unwrap() };
        assert!(!clase_en_horarios_excluidos(&clase(1, "09:00", "12:00"), std::slice::from_ref(&ex)));
        assert!(clase_en_horarios_excluidos(&clase(1, "13:30", "15:00"), &[ex]));
    }
}
