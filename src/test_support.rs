//! Local HTTP endpoints used as probe targets in tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::body::Incoming;
use hyper::header::{LAST_MODIFIED, LOCATION};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

pub const LAST_MODIFIED_VALUE: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

async fn route(req: Request<Incoming>) -> Result<Response<String>, Infallible> {
    let builder = Response::builder();
    let response = match req.uri().path() {
        "/ok" => builder
            .status(StatusCode::OK)
            .header(LAST_MODIFIED, LAST_MODIFIED_VALUE)
            .body("ok".to_string()),
        "/slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            builder.status(StatusCode::OK).body("slow".to_string())
        }
        "/moved" => builder
            .status(StatusCode::MOVED_PERMANENTLY)
            .header(LOCATION, "/ok")
            .body(String::new()),
        "/teapot" => builder.status(StatusCode::IM_A_TEAPOT).body(String::new()),
        "/broken" => builder
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(String::new()),
        _ => builder.status(StatusCode::NOT_FOUND).body(String::new()),
    };
    Ok(response.expect("static response parts are valid"))
}

/// Serves `/ok`, `/slow`, `/moved`, `/teapot`, `/broken`; anything else is 404.
pub async fn spawn_http_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
    let addr = listener.local_addr().expect("test server address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service_fn(route))
                    .await;
            });
        }
    });

    addr
}

/// Accepts connections and never writes a byte.
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind silent server");
    let addr = listener.local_addr().expect("silent server address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn closed_port_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe port");
    let addr = listener.local_addr().expect("probe port address");
    drop(listener);
    addr
}
