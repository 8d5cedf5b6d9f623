//! Accepts Base64 secrets and stores each one on disk under the text it decodes to.
use actix_web::{middleware::Logger, web, App, HttpServer};
use contact_book::{config::SecretConfig, routes};
use log::*;

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let config = SecretConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // create the folder we dump secrets into, if it doesn't already exist
    std::fs::create_dir_all(&config.dir).map_err(|e| {
        error!("couldn't make {} folder: {}", config.dir.display(), e);
        e
    })?;

    let listen = config.listen.clone();
    let config = web::Data::new(config);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(config.clone())
            .configure(routes::secret::configure)
    })
    .bind((listen.host.as_str(), listen.port))?;

    info!("Live on {}", listen.port);
    server.run().await
}
