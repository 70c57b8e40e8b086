mod common;

use common::{clase, clase_en, curso};
use planificador::algorithm::analyzer::{analizar_plan, TipoEtiqueta};

#[test]
fn test_hueco_de_150_minutos() {
    let plan = vec![
        curso("A-1", "A", vec![clase(1, "09:00", "11:00")]),
        curso("B-1", "B", vec![clase(1, "13:30", "15:00")]),
    ];
    let r = analizar_plan(&plan);
    let huecos: Vec<_> = r.desventajas.iter().filter(|e| e.tipo == TipoEtiqueta::HuecoGrande).collect();
    assert_eq!(huecos.len(), 1);
    assert_eq!(huecos[0].texto, "Lun: 2h libre entre clases");
}

#[test]
fn test_hueco_menor_a_dos_horas_no_cuenta() {
    let plan = vec![
        curso("A-1", "A", vec![clase(2, "09:00", "11:00")]),
        curso("B-1", "B", vec![clase(2, "12:59", "15:00")]),
    ];
    let r = analizar_plan(&plan);
    assert!(r.desventajas.iter().all(|e| e.tipo != TipoEtiqueta::HuecoGrande));
}

#[test]
fn test_plan_de_ejemplo() {
    let plan = vec![
        curso("CB100-1", "CB100", vec![clase_en(0, "09:00", "12:00", "201-PC"), clase_en(2, "14:00", "17:00", "201-PC")]),
        curso("61.03-1", "61.03", vec![clase_en(1, "08:00", "11:00", "301-LH")]),
    ];
    let r = analizar_plan(&plan);
    let tipos: Vec<TipoEtiqueta> = r.ventajas.iter().map(|e| e.tipo).collect();
    assert_eq!(tipos, vec![TipoEtiqueta::DiasLibres, TipoEtiqueta::Equilibrado]);
    assert_eq!(r.ventajas[0].texto, "4 días sin clases");
    assert!(r.desventajas.is_empty());
    assert_eq!(r.score, 70);
    assert_eq!(r.total_flags, 2);
}

#[test]
fn test_cambio_de_sede_y_dia_cargado() {
    let plan = vec![
        curso("A-1", "A", vec![clase_en(3, "08:00", "09:00", "101-PC")]),
        curso("B-1", "B", vec![clase_en(3, "09:00", "10:00", "202-LH")]),
        curso("C-1", "C", vec![clase_en(3, "10:00", "11:00", "101-PC")]),
        curso("D-1", "D", vec![clase_en(3, "11:00", "12:00", "Aula a determinar")]),
    ];
    let r = analizar_plan(&plan);
    let textos: Vec<&str> = r.desventajas.iter().map(|e| e.texto.as_str()).collect();
    assert!(textos.contains(&"Mié: Cambio de sede"));
    assert!(textos.contains(&"Mié: 4 materias en un día"));
    assert_eq!(r.total_flags, r.ventajas.len() + r.desventajas.len());
}

#[test]
fn test_clases_tempranas() {
    let plan = vec![
        curso("A-1", "A", vec![clase(1, "07:00", "09:00"), clase(3, "08:30", "10:00")]),
        curso("B-1", "B", vec![clase(5, "08:00", "10:00")]),
    ];
    let r = analizar_plan(&plan);
    let tempranas: Vec<_> = r.desventajas.iter().filter(|e| e.tipo == TipoEtiqueta::ClasesTempranas).collect();
    assert_eq!(tempranas.len(), 1);
    assert_eq!(tempranas[0].texto, "3 días con clases antes de las 9");
}

#[test]
fn test_score_siempre_en_rango() {
    let vacio = analizar_plan(&[]);
    // plan vacío: seis días libres y nada más
    assert_eq!(vacio.ventajas.len(), 1);
    assert_eq!(vacio.score, 60);

    // muchas desventajas a la vez no bajan de 0
    let mut cursos = Vec::new();
    for dia in 1..=5u8 {
        cursos.push(curso(&format!("T{}-1", dia), &format!("T{}", dia), vec![
            clase_en(dia, "07:00", "08:00", "1-PC"),
            clase_en(dia, "11:00", "12:00", "2-LH"),
            clase_en(dia, "14:00", "15:00", "1-PC"),
            clase_en(dia, "17:00", "18:00", "2-LH"),
        ]));
    }
    let r = analizar_plan(&cursos);
    assert!(r.score >= 0 && r.score <= 100);
    assert_eq!(r.score, 0);
}
