// Núcleo de cálculo: solapamientos, filtros, enumeración de planes,
// análisis heurístico y estadísticas.
pub mod conflict;
pub mod filters;
pub mod planes;
pub mod analyzer;
pub mod estadisticas;
pub mod generador;

pub use analyzer::{analizar_plan, calcular_score, AnalisisPlan, Etiqueta, TipoEtiqueta};
pub use estadisticas::{generar_estadisticas, Estadisticas};
pub use filters::{aplicar_filtros, curso_cumple_preferencias};
pub use generador::{generar_respuesta, CausaSinPlanes, RespuestaPlanes};
pub use planes::{enumerar_planes, generar_planes, GeneracionPlanes, OpcionesPlanes};
