use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: PathBuf,
}

impl TestApp {
    fn data_file(&self) -> PathBuf {
        self.root.join("data").join("todos.json")
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated data file per test run; do not touch data/ in the workspace
    let root = std::env::temp_dir().join(format!("todo_api_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = root.join("data").join("todos.json");
    cfg.storage.static_dir = root.join("public");
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, root })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_store_file_created_on_startup() -> anyhow::Result<()> {
    let app = start_server().await?;
    let content = tokio::fs::read_to_string(app.data_file()).await?;
    assert_eq!(content, "[]");
    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_todo_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let todos_url = format!("{}/api/todos", app.base_url);

    // Create
    let res = c.post(&todos_url).json(&json!({"title": " Buy milk "})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["done"], false);
    let id = created["id"].as_i64().ok_or_else(|| anyhow::anyhow!("id is not an integer"))?;

    // List shows it first
    let list = c.get(&todos_url).send().await?.json::<Value>().await?;
    assert_eq!(list[0], created);

    // Persisted pretty-printed
    let on_disk = tokio::fs::read_to_string(app.data_file()).await?;
    assert!(on_disk.contains("\n  {\n    \"id\": "));
    assert_eq!(serde_json::from_str::<Value>(&on_disk)?, list);

    // Update done only
    let res = c.patch(format!("{}/{}", todos_url, id)).json(&json!({"done": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["done"], true);
    assert_eq!(updated["title"], "Buy milk");

    // Delete
    let res = c.delete(format!("{}/{}", todos_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"ok": true}));

    // Gone
    let list = c.get(&todos_url).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([]));

    let res = c.delete(format!("{}/{}", todos_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "not found"}));

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_all_kept() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let todos_url = format!("{}/api/todos", app.base_url);

    let mut handles = Vec::new();
    for i in 0..16 {
        let c = c.clone();
        let url = todos_url.clone();
        handles.push(tokio::spawn(async move {
            c.post(url).json(&json!({"title": format!("task {i}")})).send().await
        }));
    }
    for h in handles {
        assert_eq!(h.await??.status(), HttpStatusCode::CREATED);
    }

    let list = c.get(&todos_url).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 16);
    let mut ids: Vec<i64> = list.iter().filter_map(|t| t["id"].as_i64()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}
