use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalogo::Catalogo;
use crate::error::{PlanificadorError, Result};
use crate::models::{parse_hora, Clase, Curso, Materia, Modalidad, Sede, VotoModalidad};

/// Catálogo respaldado por SQLite. Cada operación abre una conexión de vida
/// corta contra `path`, así que el valor es `Send + Sync` sin locks propios.
#[derive(Debug, Clone)]
pub struct CatalogoSqlite {
    path: PathBuf,
}

impl CatalogoSqlite {
    /// Crea el directorio si hace falta y asegura el esquema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<CatalogoSqlite> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| PlanificadorError::Interno(format!("no se pudo crear {}: {}", dir.display(), e)))?;
            }
        }
        let cat = CatalogoSqlite { path };
        cat.init_db()?;
        Ok(cat)
    }

    fn conectar(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.conectar()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS materias (
                codigo TEXT PRIMARY KEY,
                nombre TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cursos (
                codigo TEXT PRIMARY KEY,
                materia_codigo TEXT NOT NULL,
                numero_curso TEXT NOT NULL,
                catedra TEXT NOT NULL,
                periodo TEXT NOT NULL,
                sede TEXT,
                modalidad TEXT NOT NULL DEFAULT 'sin_confirmar',
                votos_modalidad INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS clases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                curso_codigo TEXT NOT NULL,
                dia INTEGER NOT NULL,
                hora_inicio TEXT NOT NULL,
                hora_fin TEXT NOT NULL,
                aula TEXT
            );

            CREATE TABLE IF NOT EXISTS curso_docentes (
                curso_codigo TEXT NOT NULL,
                docente_nombre TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS feedback_modalidad (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                curso_codigo TEXT NOT NULL,
                usuario_padron TEXT NOT NULL,
                modalidad TEXT NOT NULL,
                sede TEXT,
                actualizado TEXT NOT NULL,
                UNIQUE(curso_codigo, usuario_padron)
            );

            CREATE INDEX IF NOT EXISTS idx_cursos_materia ON cursos(materia_codigo);
            CREATE INDEX IF NOT EXISTS idx_clases_curso ON clases(curso_codigo);
            CREATE INDEX IF NOT EXISTS idx_feedback_curso ON feedback_modalidad(curso_codigo);",
        )?;
        info!(path = %self.path.display(), "catálogo sqlite listo");
        Ok(())
    }
}

fn leer_hora(s: &str, codigo: &str) -> Result<chrono::NaiveTime> {
    parse_hora(s).ok_or_else(|| PlanificadorError::Interno(format!("hora inválida '{}' en curso {}", s, codigo)))
}

/// Lee un curso completo (materia, clases y docentes) usando una conexión abierta.
fn leer_curso(conn: &Connection, codigo: &str) -> Result<Option<Curso>> {
    let fila = conn
        .query_row(
            "SELECT c.codigo, c.numero_curso, c.catedra, c.periodo, c.sede, c.modalidad, c.votos_modalidad,
                    m.codigo, m.nombre
             FROM cursos c
             JOIN materias m ON c.materia_codigo = m.codigo
             WHERE c.codigo = ?1",
            params![codigo],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()?;

    let Some((codigo, numero_curso, catedra, periodo, sede, modalidad, votos, materia_codigo, materia_nombre)) = fila else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT dia, hora_inicio, hora_fin, aula FROM clases WHERE curso_codigo = ?1 ORDER BY dia, hora_inicio",
    )?;
    let filas_clases = stmt.query_map(params![codigo], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?, row.get::<_, Option<String>>(3)?))
    })?;
    let mut clases = Vec::new();
    for r in filas_clases {
        let (dia, ini, fin, aula) = r?;
        let dia = u8::try_from(dia)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or_else(|| PlanificadorError::Interno(format!("día inválido {} en curso {}", dia, codigo)))?;
        clases.push(Clase { dia, hora_inicio: leer_hora(&ini, &codigo)?, hora_fin: leer_hora(&fin, &codigo)?, aula });
    }

    let mut stmt = conn.prepare("SELECT docente_nombre FROM curso_docentes WHERE curso_codigo = ?1")?;
    let docentes = stmt
        .query_map(params![codigo], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(Curso {
        codigo,
        materia: Materia { codigo: materia_codigo, nombre: materia_nombre },
        numero_curso,
        catedra,
        periodo,
        sede: sede.as_deref().map(Sede::from_token).unwrap_or(Sede::Desconocida),
        modalidad: Modalidad::from_token(&modalidad),
        votos_modalidad: votos,
        clases,
        docentes,
    }))
}

impl Catalogo for CatalogoSqlite {
    fn obtener_curso(&self, codigo: &str) -> Result<Option<Curso>> {
        let conn = self.conectar()?;
        leer_curso(&conn, codigo)
    }

    fn listar_cursos(&self) -> Result<Vec<Curso>> {
        let conn = self.conectar()?;
        let mut stmt = conn.prepare(
            "SELECT c.codigo FROM cursos c
             JOIN materias m ON c.materia_codigo = m.codigo
             ORDER BY m.nombre, c.numero_curso, c.codigo",
        )?;
        let codigos = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut out = Vec::with_capacity(codigos.len());
        for codigo in codigos {
            if let Some(c) = leer_curso(&conn, &codigo)? {
                out.push(c);
            }
        }
        Ok(out)
    }

    fn guardar_curso(&self, curso: &Curso) -> Result<()> {
        let mut conn = self.conectar()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO materias (codigo, nombre) VALUES (?1, ?2)
             ON CONFLICT(codigo) DO UPDATE SET nombre = excluded.nombre",
            params![curso.materia.codigo, curso.materia.nombre],
        )?;
        tx.execute(
            "INSERT INTO cursos (codigo, materia_codigo, numero_curso, catedra, periodo, sede, modalidad, votos_modalidad)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(codigo) DO UPDATE SET
                materia_codigo = excluded.materia_codigo,
                numero_curso = excluded.numero_curso,
                catedra = excluded.catedra,
                periodo = excluded.periodo",
            params![
                curso.codigo,
                curso.materia.codigo,
                curso.numero_curso,
                curso.catedra,
                curso.periodo,
                curso.sede.as_token(),
                curso.modalidad.as_str(),
                curso.votos_modalidad,
            ],
        )?;
        tx.execute("DELETE FROM clases WHERE curso_codigo = ?1", params![curso.codigo])?;
        tx.execute("DELETE FROM curso_docentes WHERE curso_codigo = ?1", params![curso.codigo])?;
        for clase in &curso.clases {
            tx.execute(
                "INSERT INTO clases (curso_codigo, dia, hora_inicio, hora_fin, aula) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    curso.codigo,
                    clase.dia as i64,
                    clase.hora_inicio.format("%H:%M").to_string(),
                    clase.hora_fin.format("%H:%M").to_string(),
                    clase.aula,
                ],
            )?;
        }
        for docente in &curso.docentes {
            tx.execute(
                "INSERT INTO curso_docentes (curso_codigo, docente_nombre) VALUES (?1, ?2)",
                params![curso.codigo, docente],
            )?;
        }
        tx.commit()?;
        debug!(curso = %curso.codigo, clases = curso.clases.len(), "curso guardado");
        Ok(())
    }

    fn upsert_voto(&self, voto: &VotoModalidad) -> Result<()> {
        let conn = self.conectar()?;
        // Primer voto del padrón: insert. Voto repetido: se pisa, no se suma.
        conn.execute(
            "INSERT INTO feedback_modalidad (curso_codigo, usuario_padron, modalidad, sede, actualizado)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(curso_codigo, usuario_padron)
             DO UPDATE SET modalidad = excluded.modalidad, sede = excluded.sede, actualizado = excluded.actualizado",
            params![
                voto.curso_codigo,
                voto.padron,
                voto.modalidad.as_str(),
                voto.sede.and_then(|s| s.as_token()),
                voto.actualizado.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn votos_de_curso(&self, codigo: &str) -> Result<Vec<VotoModalidad>> {
        let conn = self.conectar()?;
        let mut stmt = conn.prepare(
            "SELECT curso_codigo, usuario_padron, modalidad, sede, actualizado
             FROM feedback_modalidad WHERE curso_codigo = ?1 ORDER BY usuario_padron",
        )?;
        let filas = stmt.query_map(params![codigo], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for r in filas {
            let (curso_codigo, padron, modalidad, sede, ts) = r?;
            let actualizado = DateTime::parse_from_rfc3339(&ts)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| PlanificadorError::Interno(format!("timestamp inválido '{}': {}", ts, e)))?;
            out.push(VotoModalidad {
                curso_codigo,
                padron,
                modalidad: Modalidad::from_token(&modalidad),
                sede: sede.as_deref().map(Sede::from_token),
                actualizado,
            });
        }
        Ok(out)
    }

    fn confirmar_modalidad(&self, codigo: &str, modalidad: Modalidad, sede: Sede, votos: i64) -> Result<()> {
        let conn = self.conectar()?;
        conn.execute(
            "UPDATE cursos SET modalidad = ?1, sede = ?2, votos_modalidad = ?3 WHERE codigo = ?4",
            params![modalidad.as_str(), sede.as_token(), votos, codigo],
        )?;
        Ok(())
    }
}
