//! Minimal tack example — an in-memory `Posts` resource and a status page.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example posts
//!
//! Try:
//!   curl http://localhost:3000/posts
//!   curl -X PUT  'http://localhost:3000/posts?title=hello'
//!   curl         http://localhost:3000/posts/1
//!   curl         'http://localhost:3000/posts/1?callback=show'
//!   curl -X POST http://localhost:3000/posts/1 -d 'title=updated'
//!   curl -X DELETE http://localhost:3000/posts/1
//!   curl http://localhost:3000/status

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tack::middleware::{HandlerExt, Jsonp, Trace};
use tack::resource::unprocessable;
use tack::{respond, ActionResult, Params, Request, Resource, Response, Router, Server, Status};

#[derive(Default)]
struct Store {
    next_id: u64,
    posts: BTreeMap<u64, String>,
}

type Db = Arc<Mutex<Store>>;

struct Posts {
    db: Db,
    params: Params,
}

impl Posts {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn title(&self) -> Option<&str> {
        self.params.get("title").map(String::as_str).filter(|t| !t.trim().is_empty())
    }
}

// Unparseable ids fail with `?` and surface as a bare 500.
impl Resource for Posts {
    fn list(&self) -> ActionResult {
        let store = self.store();
        let items: Vec<String> = store.posts.iter().map(|(id, t)| format!("<li>{id}: {t}</li>")).collect();
        Ok(Some(respond(format!("<ul>{}</ul>", items.concat()), Status::Ok, &[])))
    }

    fn read(&self, id: &str) -> ActionResult {
        let id: u64 = id.parse()?;
        Ok(self.store().posts.get(&id).map(|title| respond(title.clone(), Status::Ok, &[])))
    }

    fn create(&self) -> ActionResult {
        let Some(title) = self.title() else {
            return Ok(Some(unprocessable()));
        };
        let mut store = self.store();
        store.next_id += 1;
        let id = store.next_id;
        store.posts.insert(id, title.to_owned());
        let location = format!("/posts/{id}");
        Ok(Some(respond("Created", Status::Created, &[("Location", location.as_str())])))
    }

    fn update(&self, id: &str) -> ActionResult {
        let id: u64 = id.parse()?;
        let Some(title) = self.title() else {
            return Ok(Some(unprocessable()));
        };
        let mut store = self.store();
        Ok(store.posts.get_mut(&id).map(|post| {
            *post = title.to_owned();
            respond("OK", Status::Ok, &[])
        }))
    }

    fn delete(&self, id: &str) -> ActionResult {
        let id: u64 = id.parse()?;
        Ok(self.store().posts.remove(&id).map(|_| respond("OK", Status::Ok, &[])))
    }
}

// GET /status — one handler for every method, no resource instance.
fn status(_req: &Request) -> Response {
    Response::text("OK")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let db: Db = Arc::default();
    let app = Router::new()
        .mount("Posts", move |_id, params| Posts { db: Arc::clone(&db), params })
        .handler("Status", status)
        .layer(Jsonp::new)
        .layer(Trace::new);

    let addr = std::env::var("TACK_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_owned());
    if let Err(e) = Server::bind(&addr).serve(app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
