use std::{convert::Infallible, future::Future, io, net::SocketAddr, sync::Arc, time::Duration};

use futures_channel::mpsc::unbounded;
use futures_util::{
    future::{self, Either},
    pin_mut, StreamExt, TryStreamExt,
};
use http_body_util::Full;
use hyper::{
    body::{Bytes, Incoming},
    header::{HeaderValue, CONTENT_TYPE},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{GameError, Result};
use crate::message::{message_send, parse_input, ServerMessage};
use crate::resources::StaticResource;
use crate::session::{GameSession, PlayerDefaults};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds both listeners and serves them. Only start-up failures are returned.
pub async fn run(config: Config) -> Result<()> {
    let resources =
        Arc::new(StaticResource::load(&config.static_dir, &config.ws_endpoint()).await?);
    let http_listener = TcpListener::bind(config.http_addr).await?;
    let ws_listener = TcpListener::bind(config.ws_addr).await?;
    info!(http = %config.http_addr, ws = %config.ws_addr, "Listening");

    tokio::join!(
        serve_http(http_listener, resources),
        serve_websocket(ws_listener, config.player_defaults()),
    );
    Ok(())
}

/// Waits for the next connection. A failed accept (aborted handshake, out of
/// descriptors) is logged and retried after a short pause so the listener
/// keeps running.
async fn accept_next<F, Fut, T>(mut accept: F, listener: &str) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(accepted) => return accepted,
            Err(err) => {
                warn!(listener, "Accept failed, retrying: {}", err);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

pub async fn serve_http(listener: TcpListener, resources: Arc<StaticResource>) {
    loop {
        let (stream, addr) = accept_next(|| listener.accept(), "http").await;
        let io = TokioIo::new(stream);
        let resources = Arc::clone(&resources);
        tokio::spawn(async move {
            let service = service_fn(move |req| serve_static(req, Arc::clone(&resources)));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%addr, "Error serving connection: {}", err);
            }
        });
    }
}

async fn serve_static(
    req: Request<Incoming>,
    resources: Arc<StaticResource>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    Ok(route(req.method(), req.uri().path(), &resources))
}

fn route(method: &Method, path: &str, resources: &StaticResource) -> Response<Full<Bytes>> {
    let (body, content_type) = match (method, path) {
        (&Method::GET, "/" | "/index.html") => (&resources.homepage, "text/html; charset=utf-8"),
        (&Method::GET, "/app.js") => (&resources.javascript, "text/javascript; charset=utf-8"),
        (&Method::GET, "/grid.css") => (&resources.css, "text/css; charset=utf-8"),
        _ => {
            let mut response = Response::new(Full::new(Bytes::from_static(b"Not found")));
            *response.status_mut() = StatusCode::NOT_FOUND;
            return response;
        }
    };
    let mut response = Response::new(Full::new(body.clone()));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Accepts WebSocket clients; every connection gets its own session.
pub async fn serve_websocket(listener: TcpListener, defaults: PlayerDefaults) {
    loop {
        let (stream, addr) = accept_next(|| listener.accept(), "websocket").await;
        let defaults = defaults.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, addr, defaults).await {
                warn!(%addr, "Connection ended with error: {}", err);
            }
        });
    }
}

#[instrument(skip(raw_stream, defaults))]
async fn handle_connection(
    raw_stream: TcpStream,
    addr: SocketAddr,
    defaults: PlayerDefaults,
) -> Result<()> {
    info!("Incoming TCP connection");
    let ws_stream = tokio_tungstenite::accept_async(raw_stream).await?;
    info!("WebSocket connection established");

    let (outgoing, incoming) = ws_stream.split();
    let (tx, rx) = unbounded();
    let mut session = GameSession::new(defaults);
    message_send(&tx, &ServerMessage::State(session.snapshot()));

    let replies = rx.map(Ok).forward(outgoing);
    let requests = incoming.try_for_each(|msg| {
        let reply = match parse_input(&msg) {
            Ok(Some(command)) => Some(
                session
                    .dispatch(command)
                    .map(ServerMessage::State)
                    .unwrap_or_else(ServerMessage::error),
            ),
            Ok(None) => None,
            Err(err) => Some(ServerMessage::error(err)),
        };
        if let Some(reply) = reply {
            message_send(&tx, &reply);
        }
        future::ok(())
    });

    pin_mut!(replies, requests);
    let outcome = match future::select(replies, requests).await {
        Either::Left((result, _)) => result,
        Either::Right((result, _)) => result,
    };

    info!("Disconnected");
    outcome.map_err(GameError::from)
}
