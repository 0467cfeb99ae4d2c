use actix_web::{dev::Server, get, App, HttpResponse, HttpServer, Responder};
use log::*;

use crate::errors::ServerError;

/// Liveness probe for the hosting platform. Static body, no auth, no shared state.
#[get("/")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("Bot is running!")
}

/// Build the liveness server. Spawn the returned future on its own task; it runs until the
/// process terminates.
pub fn create_health_server(port: u16) -> Result<Server, ServerError> {
    let srv = HttpServer::new(|| App::new().service(health)).bind(("0.0.0.0", port))?.run();
    Ok(srv)
}

#[cfg(test)]
mod test {
    use actix_web::{test, App};

    use super::*;

    #[actix_web::test]
    async fn health_returns_static_body() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, "Bot is running!");
    }
}
