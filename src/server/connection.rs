//! Serve a single request from an established stream.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use log::{debug, error, info};

use crate::parser::parse_request;
use crate::router::Router;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// Write `response` to `socket`, filling in the `Server` header if missing.
async fn write_response(
    socket: &mut (impl AsyncWrite + Unpin),
    mut response: HttpResponse,
    config: &ServerConfig,
) -> Result<(), Error> {
    if response.get_header("Server").is_none() {
        response.set_header("Server", config.server_name.as_str());
    }
    socket.write_all(&response.to_bytes()).await?;
    socket.flush().await?;
    Ok(())
}

/// Read one request from `socket`, dispatch it through `router` and write the
/// response back.
///
/// An unmatched request is answered with the router's not-found response and
/// is not an error. Parse failures are answered with `400 Bad Request` and
/// handler failures with `500 Internal Server Error`; both are also returned
/// to the caller.
pub async fn serve_connection(
    socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
    router: &Router,
    config: &ServerConfig,
) -> Result<(), Error> {
    let mut buf = vec![0; config.read_buffer_size];

    let n = socket.read(&mut buf).await?;
    if n == 0 {
        return Ok(()); // Connection closed
    }

    let request = match parse_request(&buf[..n]) {
        Ok(req) => req,
        Err(e) => {
            debug!("Rejecting unparsable request: {e}");
            let response = HttpResponse::new(StatusCode::BadRequest)
                .with_content_type("text/plain")
                .with_body_string(format!("Error parsing request: {e}"));
            write_response(socket, response, config).await?;
            return Err(Error::ParseError(e));
        }
    };

    let method = request.method.clone();
    let path = request.path.clone();

    match router.dispatch(request).await {
        Ok(response) => {
            info!("{method} {path} -> {status}", status = response.status.as_u16());
            write_response(socket, response, config).await
        }
        Err(e) => {
            error!("{method} {path} failed: {e}");
            let response = HttpResponse::new(StatusCode::InternalServerError)
                .with_content_type("text/plain")
                .with_body_string(format!("Internal server error: {e}"));
            write_response(socket, response, config).await?;
            Err(Error::RouterError(e))
        }
    }
}
