mod common;

use std::collections::HashMap;

use common::{bloque, clase, codigos, con, curso, seis_cursos_tres_materias};
use planificador::algorithm::generador::{generar_respuesta, CausaSinPlanes, TIPO_ADVERTENCIA_NUNCA_USADOS};
use planificador::api_json::SolicitudPlanes;
use planificador::catalogo::CatalogoMemoria;
use planificador::models::{Modalidad, ModalidadPreferida, Preferencias, Sede, SedePreferida};

fn solicitud(cursos: &[&str]) -> SolicitudPlanes {
    SolicitudPlanes {
        cursos: cursos.iter().map(|s| s.to_string()).collect(),
        prioridades: HashMap::new(),
        horarios_excluidos: Vec::new(),
        preferencias: Preferencias::default(),
        permitir_parciales: false,
        max_planes: None,
    }
}

#[test]
fn test_respuesta_exitosa() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let s = solicitud(&["M1-1", "M1-2", "M2-1", "M2-2", "M3-1", "M3-2"]);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(r.success);
    assert_eq!(r.total, 8);
    assert_eq!(r.planes.len(), r.analisis.len());
    assert_eq!(r.planes.len(), r.prioridades.len());
    // sin prioridades explícitas cada curso vale 3
    assert!(r.prioridades.iter().all(|p| *p == 9));
    assert!(r.estadisticas.prioridades_totales.is_none());
    assert!(r.tipo_advertencia.is_none());
    assert!(r.analisis.iter().all(|a| a.score >= 0 && a.score <= 100));
}

#[test]
fn test_reordena_por_prioridad() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let mut s = solicitud(&["M1-1", "M1-2", "M2-1", "M2-2", "M3-1", "M3-2"]);
    s.prioridades.insert("M1-2".to_string(), 10);
    s.prioridades.insert("M3-2".to_string(), 1);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(r.success);
    for par in r.prioridades.windows(2) {
        assert!(par[0] >= par[1]);
    }
    // M1-2 con M3-1: 10 + 3 + 3
    assert_eq!(r.prioridades[0], 16);
    assert!(codigos(&r.planes[0]).contains(&"M1-2"));
    assert!(codigos(&r.planes[0]).contains(&"M3-1"));
    assert_eq!(r.estadisticas.prioridades_totales.as_ref().map(|v| v.len()), Some(8));
    assert_eq!(r.estadisticas.prioridades_totales.as_ref().map(|v| v[0]), Some(16));
}

#[test]
fn test_empates_conservan_orden_por_tamanio() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let mut s = solicitud(&["M1-1", "M2-1", "M3-1"]);
    s.permitir_parciales = true;
    s.prioridades.insert("M1-1".to_string(), 0);
    s.prioridades.insert("M2-1".to_string(), 0);
    s.prioridades.insert("M3-1".to_string(), 0);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert_eq!(r.total, 7);
    assert!(r.prioridades.iter().all(|p| *p == 0));
    let tamanios: Vec<usize> = r.planes.iter().map(|p| p.len()).collect();
    assert_eq!(tamanios, vec![3, 2, 2, 2, 1, 1, 1]);
}

#[test]
fn test_advertencia_nunca_usados() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let s = solicitud(&["M1-1", "M2-1", "NOEXISTE-1"]);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(r.success);
    assert_eq!(r.tipo_advertencia.as_deref(), Some(TIPO_ADVERTENCIA_NUNCA_USADOS));
    assert!(r.advertencia.unwrap().contains("NOEXISTE-1 - no encontrado"));
    assert_eq!(r.descartes.no_encontrados, vec!["NOEXISTE-1".to_string()]);
}

#[test]
fn test_diagnostico_cursos_inexistentes() {
    let catalogo = CatalogoMemoria::new();
    let r = generar_respuesta(&catalogo, &solicitud(&["X-1", "Y-1"]), 1000).unwrap();
    assert!(!r.success);
    assert_eq!(r.causa, Some(CausaSinPlanes::CursosNoEncontrados));
    assert_eq!(r.total, 0);
    assert!(r.error.is_some());
}

#[test]
fn test_diagnostico_preferencias() {
    let cursos = vec![
        con(curso("A-1", "A", vec![clase(1, "08:00", "10:00")]), Sede::LH, Modalidad::Virtual),
        con(curso("B-1", "B", vec![clase(2, "08:00", "10:00")]), Sede::LH, Modalidad::Presencial),
    ];
    let catalogo = CatalogoMemoria::con_cursos(cursos).unwrap();
    let mut s = solicitud(&["A-1", "B-1"]);
    s.preferencias = Preferencias { sede: SedePreferida::PC, modalidad: ModalidadPreferida::Cualquiera };
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(!r.success);
    assert_eq!(r.causa, Some(CausaSinPlanes::Preferencias));
    assert_eq!(r.descartes.descartados_preferencias.len(), 2);
}

#[test]
fn test_diagnostico_horarios_excluidos() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let mut s = solicitud(&["M1-1", "M1-2"]);
    s.horarios_excluidos = vec![bloque(1, "07:00", "13:00")];
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(!r.success);
    assert_eq!(r.causa, Some(CausaSinPlanes::HorariosExcluidos));
    assert!(r.error.unwrap().contains("1 horarios bloqueados"));
}

#[test]
fn test_diagnostico_solapamiento() {
    let cursos = vec![
        curso("A-1", "A", vec![clase(1, "08:00", "10:00")]),
        curso("B-1", "B", vec![clase(1, "09:00", "11:00")]),
    ];
    let catalogo = CatalogoMemoria::con_cursos(cursos).unwrap();
    let r = generar_respuesta(&catalogo, &solicitud(&["A-1", "B-1"]), 1000).unwrap();
    assert!(!r.success);
    assert_eq!(r.causa, Some(CausaSinPlanes::Solapamiento));
    assert!(r.error.unwrap().starts_with("No se pudieron generar planes sin solapamientos"));
}

#[test]
fn test_max_planes_de_la_solicitud() {
    let catalogo = CatalogoMemoria::con_cursos(seis_cursos_tres_materias()).unwrap();
    let mut s = solicitud(&["M1-1", "M1-2", "M2-1", "M2-2", "M3-1", "M3-2"]);
    s.max_planes = Some(3);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert_eq!(r.total, 3);
    let r = generar_respuesta(&catalogo, &solicitud(&["M1-1", "M1-2", "M2-1", "M2-2", "M3-1", "M3-2"]), 5).unwrap();
    assert_eq!(r.total, 5);
}

#[test]
fn test_prioridades_extremas_no_desbordan() {
    let cursos = vec![
        curso("A-1", "A", vec![clase(1, "08:00", "10:00")]),
        curso("B-1", "B", vec![clase(2, "08:00", "10:00")]),
        curso("C-1", "C", vec![clase(3, "08:00", "10:00")]),
        curso("C-2", "C", vec![clase(4, "08:00", "10:00")]),
    ];
    let catalogo = CatalogoMemoria::con_cursos(cursos).unwrap();
    let mut s = solicitud(&["A-1", "B-1", "C-1", "C-2"]);
    s.prioridades.insert("A-1".to_string(), i64::MAX);
    s.prioridades.insert("B-1".to_string(), i64::MAX);
    s.prioridades.insert("C-1".to_string(), i64::MIN);
    s.prioridades.insert("C-2".to_string(), 1);
    let r = generar_respuesta(&catalogo, &s, 1000).unwrap();
    assert!(r.success);
    assert_eq!(r.total, 2);
    // A + B satura en i64::MAX; con C-1 la suma queda en MAX + MIN = -1
    assert_eq!(r.prioridades, vec![i64::MAX, -1]);
    assert!(codigos(&r.planes[0]).contains(&"C-2"));
}
