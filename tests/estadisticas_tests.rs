mod common;

use common::{clase, curso, seis_cursos_tres_materias};
use planificador::algorithm::estadisticas::generar_estadisticas;
use planificador::algorithm::planes::enumerar_planes;

fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_estadisticas_basicas() {
    let cursos = seis_cursos_tres_materias();
    let planes = enumerar_planes(&cursos, 1000, true);
    let pedidos: Vec<String> = cursos.iter().map(|c| c.codigo.clone()).collect();
    let e = generar_estadisticas(&planes, &pedidos, &cursos, 3, 0);
    assert_eq!(e.total_planes, 26);
    assert_eq!(e.total_cursos_seleccionados, 6);
    assert_eq!(e.max_materias_simultaneas, 3);
    assert_eq!(e.min_materias_simultaneas, 1);
    // (6*1 + 12*2 + 8*3) / 26 = 54 / 26
    assert_eq!(e.promedio_materias, 2.08);
    assert_eq!(e.materias_incluidas, strs(&["M1", "M2", "M3"]));
    assert!(e.cursos_nunca_usados.is_empty());
    assert!(e.advertencia_nunca_usados.is_none());
    assert_eq!(e.mensaje, "Se generaron 26 planes válidos con hasta 3 materias simultáneas");
}

#[test]
fn test_cursos_nunca_usados() {
    let a = curso("A-1", "A", vec![clase(1, "08:00", "10:00")]);
    let b = curso("B-1", "B", vec![clase(1, "09:00", "11:00")]);
    let c = curso("C-1", "C", vec![clase(2, "08:00", "10:00")]);
    let cursos = vec![a, b, c];
    // A y B chocan; se conservan sólo los planes con A
    let planes = enumerar_planes(&cursos, 100, true)
        .into_iter()
        .filter(|p| p.iter().any(|c| c.codigo == "A-1"))
        .collect::<Vec<_>>();
    let pedidos = strs(&["A-1", "B-1", "C-1", "Z-9"]);
    let e = generar_estadisticas(&planes, &pedidos, &cursos, 3, 0);
    assert_eq!(e.cursos_nunca_usados, strs(&["B-1", "Z-9"]));
    let adv = e.advertencia_nunca_usados.unwrap();
    assert!(adv.contains("Materia B - Cátedra B-1"));
    assert!(adv.contains("Z-9 - no encontrado"));
    assert!(e.mensaje.contains("ninguno cubre las 3 materias"));
}

#[test]
fn test_sin_planes() {
    let e = generar_estadisticas(&[], &strs(&["A-1", "B-1"]), &[], 2, 2);
    assert_eq!(e.total_planes, 0);
    assert_eq!(e.total_cursos_seleccionados, 2);
    assert_eq!(e.promedio_materias, 0.0);
    assert!(e.mensaje.starts_with("No se pudieron generar planes sin solapamientos"));
    assert!(e.mensaje.contains("Tienes 2 horarios bloqueados"));
}
