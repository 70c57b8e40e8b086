//! Acceso al catálogo de cursos y a los votos de modalidad.
//!
//! El núcleo (enumeración, análisis, consenso) sólo conoce el trait
//! `Catalogo`; nunca abre ni cierra conexiones por su cuenta.

pub mod db;
pub mod memoria;

pub use db::CatalogoSqlite;
pub use memoria::CatalogoMemoria;

use crate::error::Result;
use crate::models::{Curso, Modalidad, Sede, VotoModalidad};

pub trait Catalogo: Send + Sync {
    fn obtener_curso(&self, codigo: &str) -> Result<Option<Curso>>;

    /// Todos los cursos, ordenados por nombre de materia y número de curso.
    fn listar_cursos(&self) -> Result<Vec<Curso>>;

    /// Alta o reemplazo de un curso importado. No pisa sede, modalidad ni
    /// votos de un curso ya existente: esos campos sólo los escribe el consenso.
    fn guardar_curso(&self, curso: &Curso) -> Result<()>;

    /// Inserta o actualiza, como una sola operación, el voto del par (curso, padrón).
    fn upsert_voto(&self, voto: &VotoModalidad) -> Result<()>;

    fn votos_de_curso(&self, codigo: &str) -> Result<Vec<VotoModalidad>>;

    fn confirmar_modalidad(&self, codigo: &str, modalidad: Modalidad, sede: Sede, votos: i64) -> Result<()>;

    /// Cursos con la modalidad pedida y, si se indica, la sede pedida.
    fn filtrar_cursos_por_modalidad(&self, modalidad: Modalidad, sede: Option<Sede>) -> Result<Vec<Curso>> {
        let cursos = self.listar_cursos()?;
        Ok(cursos
            .into_iter()
            .filter(|c| c.modalidad == modalidad && sede.map_or(true, |s| c.sede == s))
            .collect())
    }
}
