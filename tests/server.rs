use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use tack::{respond, ActionResult, Params, Resource, Router, Server, Status};

struct Posts {
    params: Params,
}

impl Resource for Posts {
    fn read(&self, id: &str) -> ActionResult {
        Ok(Some(respond(format!("post {id}"), Status::Ok, &[])))
    }

    fn create(&self) -> ActionResult {
        let title = self.params.get("title").cloned().unwrap_or_default();
        Ok(Some(respond(title, Status::Created, &[])))
    }
}

async fn send(
    addr: std::net::SocketAddr,
    req: hyper::Request<Full<Bytes>>,
) -> (u16, hyper::HeaderMap, String) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);

    let res = sender.send_request(req).await.unwrap();
    let status = res.status().as_u16();
    let headers = res.headers().clone();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

fn request(method: &str, uri: &str, content_type: Option<&str>, body: &str) -> hyper::Request<Full<Bytes>> {
    let mut builder = hyper::Request::builder().method(method).uri(uri).header("host", "localhost");
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    builder.body(Full::new(Bytes::from(body.to_owned()))).unwrap()
}

#[tokio::test]
async fn serves_routes_over_tcp_and_drains_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().mount("Posts", |_id: Option<String>, params: Params| Posts { params });

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::from_listener(listener).serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));

    let (status, headers, body) = send(addr, request("GET", "/posts/42", None, "")).await;
    assert_eq!(status, 200);
    assert_eq!(body, "post 42");
    assert_eq!(headers["content-type"], "text/html");
    assert_eq!(headers["content-length"], "7");

    let (status, _, body) = send(
        addr,
        request("PUT", "/posts?title=query", Some("application/x-www-form-urlencoded"), "title=from+form"),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body, "from form");

    let (status, _, body) = send(addr, request("POST", "/posts", None, "")).await;
    assert_eq!(status, 501);
    assert_eq!(body, "Not Implemented");

    let (status, _, _) = send(addr, request("GET", "/nested/path/here", None, "")).await;
    assert_eq!(status, 404);

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn rejects_invalid_address() {
    let res = Server::bind("not an address").serve_with_shutdown(Router::new(), async {}).await;
    assert!(matches!(res, Err(tack::Error::InvalidAddress(addr)) if addr == "not an address"));
}
