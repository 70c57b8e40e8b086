mod common;

use common::{clase, clase_en, con, curso};
use planificador::catalogo::{Catalogo, CatalogoSqlite};
use planificador::models::{Modalidad, Sede};

#[test]
fn test_guardar_y_leer_curso() {
    let dir = tempfile::tempdir().unwrap();
    let cat = CatalogoSqlite::open(dir.path().join("sub/dir/catalogo.db")).unwrap();

    // clases desordenadas: se leen por día y hora
    let original = curso("61.03-1", "61.03", vec![clase_en(3, "14:00", "17:00", "201-PC"), clase(1, "08:00", "11:00")]);
    cat.guardar_curso(&original).unwrap();

    let leido = cat.obtener_curso("61.03-1").unwrap().unwrap();
    assert_eq!(leido.materia, original.materia);
    assert_eq!(leido.catedra, original.catedra);
    assert_eq!(leido.docentes, original.docentes);
    assert_eq!(leido.clases.len(), 2);
    assert_eq!(leido.clases[0].dia, 1);
    assert_eq!(leido.clases[1].aula.as_deref(), Some("201-PC"));
    assert_eq!(leido.modalidad, Modalidad::SinConfirmar);
    assert_eq!(leido.sede, Sede::Desconocida);

    assert!(cat.obtener_curso("NOEXISTE").unwrap().is_none());
}

#[test]
fn test_reimportar_no_pisa_consenso() {
    let dir = tempfile::tempdir().unwrap();
    let cat = CatalogoSqlite::open(dir.path().join("c.db")).unwrap();
    cat.guardar_curso(&curso("A-1", "A", vec![clase(1, "08:00", "10:00")])).unwrap();
    cat.confirmar_modalidad("A-1", Modalidad::Virtual, Sede::Desconocida, 4).unwrap();

    let mut nuevo = curso("A-1", "A", vec![clase(2, "18:00", "20:00")]);
    nuevo.catedra = "Otra cátedra".to_string();
    cat.guardar_curso(&nuevo).unwrap();

    let leido = cat.obtener_curso("A-1").unwrap().unwrap();
    assert_eq!(leido.catedra, "Otra cátedra");
    assert_eq!(leido.clases.len(), 1);
    assert_eq!(leido.clases[0].dia, 2);
    assert_eq!(leido.modalidad, Modalidad::Virtual);
    assert_eq!(leido.votos_modalidad, 4);
}

#[test]
fn test_listar_y_filtrar_por_modalidad() {
    let dir = tempfile::tempdir().unwrap();
    let cat = CatalogoSqlite::open(dir.path().join("c.db")).unwrap();
    cat.guardar_curso(&curso("B-1", "B", vec![])).unwrap();
    cat.guardar_curso(&curso("A-2", "A", vec![])).unwrap();
    cat.guardar_curso(&curso("A-1", "A", vec![])).unwrap();
    cat.confirmar_modalidad("A-1", Modalidad::Presencial, Sede::PC, 3).unwrap();
    cat.confirmar_modalidad("A-2", Modalidad::Presencial, Sede::LH, 3).unwrap();

    let todos: Vec<String> = cat.listar_cursos().unwrap().into_iter().map(|c| c.codigo).collect();
    assert_eq!(todos, vec!["A-1", "A-2", "B-1"]);

    let presenciales = cat.filtrar_cursos_por_modalidad(Modalidad::Presencial, None).unwrap();
    assert_eq!(presenciales.len(), 2);
    let en_pc = cat.filtrar_cursos_por_modalidad(Modalidad::Presencial, Some(Sede::PC)).unwrap();
    assert_eq!(en_pc.len(), 1);
    assert_eq!(en_pc[0].codigo, "A-1");
    assert!(cat.filtrar_cursos_por_modalidad(Modalidad::Virtual, None).unwrap().is_empty());
}

#[test]
fn test_reabrir_conserva_datos() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.db");
    {
        let cat = CatalogoSqlite::open(&path).unwrap();
        cat.guardar_curso(&con(curso("A-1", "A", vec![]), Sede::LH, Modalidad::Presencial)).unwrap();
    }
    let cat = CatalogoSqlite::open(&path).unwrap();
    let leido = cat.obtener_curso("A-1").unwrap().unwrap();
    assert_eq!(leido.sede, Sede::LH);
    assert_eq!(leido.modalidad, Modalidad::Presencial);
}
