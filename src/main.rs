use actix::Actor;
use actix_web::{middleware::Logger, web, App, HttpServer};
use contact_book::{routes, Config, Store};
use log::*;

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store = Store::new().start();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(store.clone()))
            .configure(routes::contacts::configure)
    })
    .bind((config.host.as_str(), config.port))?;

    info!("[ ready ] {}", config.base_url());
    server.run().await
}
