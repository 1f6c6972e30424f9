use breadcrumb::types::{CreateSessionResponse, EntriesResponse, FindResponse, SizeResponse};
use navtrail::NavtrailConfig;
use navtrail::service::{ServiceManager, TrailHttpService};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::sync::broadcast;

struct TestServer {
    base: String,
    manager: ServiceManager,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(debug: bool) -> Self {
        let mut config = NavtrailConfig::default();
        config.env = "test".to_string();
        config.bind.http.port = 0;
        config.session.debug = debug;

        let (shutdown_tx, _) = broadcast::channel(4);
        let mut manager = ServiceManager::new(config.clone(), shutdown_tx);
        manager.add_service(Box::new(TrailHttpService::new(config)));
        let handle = manager.start_all().await.expect("start server");
        let addr = manager.local_addr().expect("bound address");

        Self {
            base: format!("http://{addr}/sessions"),
            manager,
            handle,
        }
    }

    async fn shutdown(mut self) {
        self.manager.stop_all().await.expect("stop services");
        self.handle.await.expect("server task");
    }
}

async fn new_session(client: &Client, base: &str) -> String {
    let resp = client.post(base).send().await.expect("create session");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: CreateSessionResponse = resp.json().await.expect("session json");
    body.session_id
}

async fn post_size(client: &Client, url: &str, body: Value) -> usize {
    let resp = client.post(url).json(&body).send().await.expect("post");
    assert_eq!(resp.status(), StatusCode::OK, "POST {url}");
    let body: SizeResponse = resp.json().await.expect("size json");
    body.size
}

#[tokio::test]
async fn navigation_flow_renders_breadcrumbs() {
    let server = TestServer::start(false).await;
    let client = Client::new();
    let sid = new_session(&client, &server.base).await;
    let trail = format!("{}/{sid}/trail", server.base);

    assert_eq!(
        post_size(
            &client,
            &format!("{trail}/visit"),
            json!({"label": "home", "link": "/home", "display": "Home"}),
        )
        .await,
        1
    );
    assert_eq!(
        post_size(
            &client,
            &format!("{trail}/visit"),
            json!({"label": "cart", "link": "/cart", "display": "Cart"}),
        )
        .await,
        2
    );
    // refresh of the same page keeps a single crumb
    assert_eq!(
        post_size(
            &client,
            &format!("{trail}/visit"),
            json!({"label": "cart", "link": "/cart", "display": "Cart"}),
        )
        .await,
        2
    );

    let html = client
        .get(&trail)
        .send()
        .await
        .expect("render all")
        .text()
        .await
        .expect("html");
    assert_eq!(
        html,
        "<a href='/home' class='navbar' title='Home'>Home</a>&nbsp;&gt;&nbsp;\
         <a href='/cart' class='navbar' title='Cart'>Cart</a>&nbsp;&gt;&nbsp;"
    );

    let found: FindResponse = client
        .get(format!("{trail}/find?label=cart"))
        .send()
        .await
        .expect("find")
        .json()
        .await
        .expect("find json");
    assert_eq!(found.index, 1);

    let missing: FindResponse = client
        .get(format!("{trail}/find?label=checkout"))
        .send()
        .await
        .expect("find missing")
        .json()
        .await
        .expect("find json");
    assert_eq!(missing.index, -1);

    server.shutdown().await;
}

#[tokio::test]
async fn out_of_range_and_unknown_session_errors() {
    let server = TestServer::start(true).await;
    let client = Client::new();
    let sid = new_session(&client, &server.base).await;
    let trail = format!("{}/{sid}/trail", server.base);

    post_size(
        &client,
        &format!("{trail}/entries"),
        json!({"label": "a", "link": "/a", "display": "A"}),
    )
    .await;

    let resp = client
        .post(format!("{trail}/remove-top"))
        .json(&json!({"count": 1}))
        .send()
        .await
        .expect("remove-top");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error json");
    assert_eq!(body["code"], 400);

    let entries: EntriesResponse = client
        .get(format!("{trail}/entries"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("entries json");
    assert_eq!(entries.size, 1);

    let resp = client
        .get(format!("{trail}/entries/5"))
        .send()
        .await
        .expect("render entry");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{}/no-such-session/trail", server.base))
        .send()
        .await
        .expect("unknown session");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/{sid}", server.base))
        .send()
        .await
        .expect("delete session");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let health: Value = client
        .get(format!("{}/health", server.base))
        .send()
        .await
        .expect("health")
        .json()
        .await
        .expect("health json");
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["sessions"], 0);

    server.shutdown().await;
}
