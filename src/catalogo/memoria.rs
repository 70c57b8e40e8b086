use std::collections::HashMap;
use std::sync::RwLock;

use crate::catalogo::Catalogo;
use crate::error::{PlanificadorError, Result};
use crate::models::{Curso, Modalidad, Sede, VotoModalidad};

#[derive(Debug, Default)]
struct Estado {
    cursos: HashMap<String, Curso>,
    votos: HashMap<(String, String), VotoModalidad>,
}

/// Catálogo en memoria para tests y corridas de demostración.
#[derive(Debug, Default)]
pub struct CatalogoMemoria {
    estado: RwLock<Estado>,
}

fn envenenado<T>(_: T) -> PlanificadorError {
    PlanificadorError::Interno("lock del catálogo envenenado".to_string())
}

impl CatalogoMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn con_cursos(cursos: Vec<Curso>) -> Result<Self> {
        let cat = Self::new();
        for c in &cursos {
            cat.guardar_curso(c)?;
        }
        Ok(cat)
    }
}

impl Catalogo for CatalogoMemoria {
    fn obtener_curso(&self, codigo: &str) -> Result<Option<Curso>> {
        let estado = self.estado.read().map_err(envenenado)?;
        Ok(estado.cursos.get(codigo).cloned())
    }

    fn listar_cursos(&self) -> Result<Vec<Curso>> {
        let estado = self.estado.read().map_err(envenenado)?;
        let mut cursos: Vec<Curso> = estado.cursos.values().cloned().collect();
        cursos.sort_by(|a, b| {
            a.materia.nombre
                .cmp(&b.materia.nombre)
                .then(a.numero_curso.cmp(&b.numero_curso))
                .then(a.codigo.cmp(&b.codigo))
        });
        Ok(cursos)
    }

    fn guardar_curso(&self, curso: &Curso) -> Result<()> {
        let mut estado = self.estado.write().map_err(envenenado)?;
        let mut nuevo = curso.clone();
        nuevo.clases.sort_by_key(|c| (c.dia, c.hora_inicio));
        if let Some(previo) = estado.cursos.get(&curso.codigo) {
            nuevo.sede = previo.sede;
            nuevo.modalidad = previo.modalidad;
            nuevo.votos_modalidad = previo.votos_modalidad;
        }
        estado.cursos.insert(nuevo.codigo.clone(), nuevo);
        Ok(())
    }

    fn upsert_voto(&self, voto: &VotoModalidad) -> Result<()> {
        let mut estado = self.estado.write().map_err(envenenado)?;
        estado.votos.insert((voto.curso_codigo.clone(), voto.padron.clone()), voto.clone());
        Ok(())
    }

    fn votos_de_curso(&self, codigo: &str) -> Result<Vec<VotoModalidad>> {
        let estado = self.estado.read().map_err(envenenado)?;
        let mut votos: Vec<VotoModalidad> = estado.votos.values().filter(|v| v.curso_codigo == codigo).cloned().collect();
        votos.sort_by(|a, b| a.padron.cmp(&b.padron));
        Ok(votos)
    }

    fn confirmar_modalidad(&self, codigo: &str, modalidad: Modalidad, sede: Sede, votos: i64) -> Result<()> {
        let mut estado = self.estado.write().map_err(envenenado)?;
        if let Some(curso) = estado.cursos.get_mut(codigo) {
            curso.modalidad = modalidad;
            curso.sede = sede;
            curso.votos_modalidad = votos;
        }
        Ok(())
    }
}
