// --- Planificador de horarios - Archivo principal ---

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use planificador::catalogo::{Catalogo, CatalogoSqlite};
use planificador::config::Config;
use planificador::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!("=== Planificador de horarios (API) ===");

    let catalogo: Arc<dyn Catalogo> = match CatalogoSqlite::open(&config.db_path) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(path = %config.db_path.display(), error = %e, "no se pudo abrir el catálogo");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Iniciando servidor en http://{}", config.bind);
    run_server(config, catalogo).await
}
