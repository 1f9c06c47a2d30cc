//! A small server demonstrating exact routes, pattern routes and middleware.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_router`, then try:
//!
//! ```text
//! curl -i http://127.0.0.1:8080/
//! curl -i http://127.0.0.1:8080/users/42
//! curl -i -X DELETE http://127.0.0.1:8080/users/42
//! curl -i -X DELETE -H 'Authorization: admin' http://127.0.0.1:8080/users/42
//! ```

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use microroute_rs::{
    HandlerFn, HandlerFuture, HttpRequest, HttpResponse, Method, Middleware, PathArgument,
    QueryParameter, Route, Router, RouterError, ServerConfig, StatusCode, handler_fn,
    serve_connection,
};
use tokio::net::TcpListener;

/// Logs how long the rest of the chain took.
struct Timing;

impl Middleware for Timing {
    fn name(&self) -> &str {
        "timing"
    }

    fn description(&self) -> &str {
        "Logs the time spent in the handler chain"
    }

    fn wrap(&self, next: HandlerFn) -> HandlerFn {
        Arc::new(move |req: HttpRequest| -> HandlerFuture {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let started = Instant::now();
                let label = format!("{} {}", req.method, req.path);
                let result = next(req).await;
                info!("{label} took {:?}", started.elapsed());
                result
            })
        })
    }
}

/// Rejects requests without `Authorization: admin`.
struct AdminOnly;

impl Middleware for AdminOnly {
    fn name(&self) -> &str {
        "admin-only"
    }

    fn description(&self) -> &str {
        "Requires the Authorization header to be `admin`"
    }

    fn wrap(&self, next: HandlerFn) -> HandlerFn {
        let forbidden = handler_fn(|_req| async {
            Ok(HttpResponse::new(StatusCode::Forbidden).with_body_string("admins only\n"))
        });
        Arc::new(move |req: HttpRequest| -> HandlerFuture {
            if req.get_header("Authorization").map(String::as_str) == Some("admin") {
                next(req)
            } else {
                forbidden(req)
            }
        })
    }
}

fn build_router() -> Result<Router, RouterError> {
    let mut router = Router::new();

    router.add(
        Route::exact("/")?
            .set_description("Landing page")
            .set_handler(|_req| async {
                Ok(HttpResponse::new(StatusCode::Ok)
                    .with_content_type("text/plain")
                    .with_body_string("Welcome to microroute-rs!\n"))
            }),
    )?;

    router.add(
        Route::pattern(r"^/users/(?P<user_id>[0-9]+)$")?
            .set_tag("Users")
            .set_description("Fetch a user")
            .add_path_argument(PathArgument::new("user_id", &42)?)
            .add_query_parameter(QueryParameter::new("verbose", &true)?)
            .add_middleware(Timing)
            .set_handler(|req| async move {
                let id = req.param("user_id").unwrap_or_default();
                let verbose = req.has_query_param("verbose");
                let body = serde_json::json!({ "id": id, "verbose": verbose });
                HttpResponse::new(StatusCode::Ok)
                    .with_json(&body)
                    .map_err(RouterError::from)
            }),
    )?;

    router.add(
        Route::pattern(r"^/users/(?P<user_id>[0-9]+)$")?
            .set_method(Method::DELETE)
            .set_tag("Users")
            .set_description("Delete a user")
            .add_middleware(Timing)
            .add_middleware(AdminOnly)
            .set_handler(|req| async move {
                let id = req.param("user_id").unwrap_or_default().to_string();
                Ok(HttpResponse::new(StatusCode::Ok).with_body_string(format!("deleted {id}\n")))
            }),
    )?;

    Ok(router)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let router = Arc::new(build_router()?);
    router.log_routes();

    let config = Arc::new(ServerConfig::default());
    let listener = TcpListener::bind("127.0.0.1:8080").await?;
    info!("Listening on http://127.0.0.1:8080");

    loop {
        let (mut socket, addr) = listener.accept().await?;
        let router = Arc::clone(&router);
        let config = Arc::clone(&config);

        tokio::spawn(async move {
            if let Err(e) = serve_connection(&mut socket, &router, &config).await {
                error!("Error serving {addr}: {e}");
            }
        });
    }
}
