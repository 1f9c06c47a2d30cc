//! Tests for responses and the connection adapter.

#[cfg(test)]
mod server_tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use crate::parser::Method;
    use crate::router::{Error as RouterError, Route, Router};
    use crate::server::{serve_connection, Error, HttpResponse, ServerConfig, StatusCode};

    // Mock TcpStream for testing
    struct MockTcpStream {
        read_data: Cursor<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: &[u8]) -> Self {
            Self {
                read_data: Cursor::new(read_data.to_vec()),
                write_data: Vec::new(),
            }
        }

        fn written(&self) -> String {
            String::from_utf8_lossy(&self.write_data).into_owned()
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            this.write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn test_router() -> Router {
        let mut router = Router::new();
        router
            .add(Route::exact("/test").unwrap().set_handler(|_req| async {
                Ok(HttpResponse::new(StatusCode::Ok)
                    .with_content_type("text/plain")
                    .with_body_string("Test response"))
            }))
            .unwrap();
        router
            .add(
                Route::pattern(r"^/users/(?P<id>\d+)$")
                    .unwrap()
                    .set_method(Method::POST)
                    .set_handler(|req| async move {
                        let id = req.param("id").unwrap_or_default().to_string();
                        Ok(HttpResponse::new(StatusCode::Created)
                            .with_header("Server", "custom")
                            .with_body_string(format!("created {id}")))
                    }),
            )
            .unwrap();
        router
            .add(Route::exact("/fail").unwrap().set_handler(|_req| async {
                Err(RouterError::HandlerError("database unavailable".to_string()))
            }))
            .unwrap();
        router
    }

    #[test]
    fn test_status_code_reason_phrase() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }

    #[test]
    fn test_default_response_is_untouched() {
        let response = HttpResponse::default();
        assert_eq!(response.status, StatusCode::Ok);
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_not_found_response() {
        let response = HttpResponse::not_found();
        assert_eq!(response.status, StatusCode::NotFound);
        assert_eq!(response.body, b"404 page not found\n");
        assert_eq!(
            response.get_header("content-type"),
            Some(&"text/plain; charset=utf-8".to_string())
        );
    }

    #[test]
    fn test_write_and_set_status() {
        let mut response = HttpResponse::default();
        response.write(b"Hello, ");
        response.write(b"world!");
        response.set_status(StatusCode::Accepted);

        assert_eq!(response.status, StatusCode::Accepted);
        assert_eq!(response.body, b"Hello, world!");
        assert_eq!(response.headers.get("Content-Length"), Some(&"13".to_string()));
    }

    #[test]
    fn test_write_replaces_content_length_in_any_case() {
        let mut response = HttpResponse::new(StatusCode::Ok).with_header("content-length", "0");
        response.write(b"abc");

        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.get_header("Content-Length"), Some(&"3".to_string()));
        assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc");
    }

    #[test]
    fn test_with_header_replaces_ignoring_case() {
        let response = HttpResponse::new(StatusCode::Ok)
            .with_header("content-type", "text/html")
            .with_body_string("hi")
            .with_content_type("text/plain");

        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.get_header("CONTENT-TYPE"), Some(&"text/plain".to_string()));

        let framed = String::from_utf8_lossy(&response.to_bytes()).into_owned();
        assert_eq!(framed.matches("Content-Length").count(), 1);
        assert!(!framed.contains("text/html"));
    }

    #[test]
    fn test_with_json() {
        let response = HttpResponse::new(StatusCode::Ok)
            .with_json(&serde_json::json!({"id": 1}))
            .unwrap();
        assert_eq!(response.body, br#"{"id":1}"#);
        assert_eq!(response.headers.get("Content-Type"), Some(&"application/json".to_string()));
    }

    #[test]
    fn test_http_response_to_bytes() {
        let response = HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("Hello, world!");

        let bytes = response.to_bytes();
        let response_str = String::from_utf8_lossy(&bytes);

        assert!(response_str.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response_str.contains("Content-Type: text/plain\r\n"));
        assert!(response_str.contains("Content-Length: 13\r\n"));
        assert!(response_str.ends_with("\r\n\r\nHello, world!"));
    }

    #[test]
    fn test_empty_response_is_framed() {
        let bytes = HttpResponse::default().to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    }

    #[tokio::test]
    async fn test_serve_connection_with_valid_request() {
        let mut stream = MockTcpStream::new(b"GET /test HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.contains("Server: microroute-rs\r\n"));
        assert!(response.ends_with("Test response"));
    }

    #[tokio::test]
    async fn test_serve_connection_binds_captures() {
        let mut stream = MockTcpStream::new(b"POST /users/77 HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(response.contains("Server: custom\r\n"));
        assert!(!response.contains("microroute-rs"));
        assert!(response.ends_with("created 77"));
    }

    #[tokio::test]
    async fn test_serve_connection_with_not_found() {
        let mut stream = MockTcpStream::new(b"GET /nonexistent HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        // Not found is a normal outcome
        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.ends_with("404 page not found\n"));
    }

    #[tokio::test]
    async fn test_serve_connection_method_mismatch_is_not_found() {
        let mut stream = MockTcpStream::new(b"GET /users/77 HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(result.is_ok());
        assert!(stream.written().starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[tokio::test]
    async fn test_serve_connection_with_invalid_request() {
        let mut stream = MockTcpStream::new(b"INVALID REQUEST");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains("Error parsing request:"));
    }

    #[tokio::test]
    async fn test_serve_connection_with_handler_error() {
        let mut stream = MockTcpStream::new(b"GET /fail HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(matches!(result, Err(Error::RouterError(RouterError::HandlerError(_)))));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(response.contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_serve_connection_closed_stream() {
        let mut stream = MockTcpStream::new(b"");
        let result = serve_connection(&mut stream, &test_router(), &ServerConfig::default()).await;

        assert!(result.is_ok());
        assert!(stream.written().is_empty());
    }

    #[tokio::test]
    async fn test_custom_server_name() {
        let config = ServerConfig {
            server_name: "edge".to_string(),
            ..ServerConfig::default()
        };
        let mut stream = MockTcpStream::new(b"GET /test HTTP/1.1\r\nHost: localhost\r\n\r\n");
        serve_connection(&mut stream, &test_router(), &config).await.unwrap();

        assert!(stream.written().contains("Server: edge\r\n"));
    }

    #[tokio::test]
    async fn test_shared_router_across_tasks() {
        let router = Arc::new(test_router());
        let mut tasks = tokio::task::JoinSet::new();

        for id in 0..8 {
            let router = Arc::clone(&router);
            tasks.spawn(async move {
                let request = format!("POST /users/{id} HTTP/1.1\r\nHost: localhost\r\n\r\n");
                let mut stream = MockTcpStream::new(request.as_bytes());
                serve_connection(&mut stream, &router, &ServerConfig::default()).await.unwrap();
                (id, stream.written())
            });
        }

        while let Some(result) = tasks.join_next().await {
            let (id, response) = result.unwrap();
            assert!(response.ends_with(&format!("created {id}")));
        }
    }
}
