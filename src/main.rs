#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;

mod boot;
mod catalog;
mod config;
mod loader;
mod models;
mod render;
mod routes;

use config::AppConfig;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let cfg = AppConfig::load(config::CONFIG_FILE);

    // Boot check — verify/create directories, validate data files
    boot::run(&cfg);

    rocket::build()
        .manage(cfg)
        .mount("/static", FileServer::from("site/static"))
        .mount("/", routes::public::routes())
        .register("/", catchers![not_found, server_error])
}
