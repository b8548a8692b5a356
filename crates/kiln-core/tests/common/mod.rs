#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::{Cursor, Write},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{routing::get, Router};
use kiln_core::{configs::LauncherConfig, repository::java_runner::JavaRunner};
use tokio::net::TcpListener;

pub const RELEASE: &str = "1.20.1";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Local HTTP server that counts requests per path. Paths it was not given
/// answer with 404.
pub struct TestServer {
    base_url: String,
    request_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    pub async fn start<F>(delay: Duration, files: F) -> Self
    where
        F: FnOnce(&str) -> Vec<(String, Vec<u8>)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        let request_counts = Arc::new(Mutex::new(HashMap::new()));
        let counts = request_counts.clone();

        let app = files(&base_url)
            .into_iter()
            .fold(Router::new(), |router, (path, body)| {
                router.route(
                    &path,
                    get(move || {
                        let body = body.clone();
                        async move {
                            tokio::time::sleep(delay).await;
                            body
                        }
                    }),
                )
            })
            .layer(axum::middleware::from_fn(
                move |req: axum::http::Request<axum::body::Body>, next: axum::middleware::Next| {
                    let counts = counts.clone();
                    async move {
                        let path = req.uri().path().to_string();
                        if let Ok(mut counts) = counts.lock() {
                            *counts.entry(path).or_insert(0) += 1;
                        }
                        next.run(req).await
                    }
                },
            ));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            request_counts,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.request_counts.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.request_counts.lock().unwrap().values().sum()
    }
}

pub fn config(server: &TestServer) -> LauncherConfig {
    LauncherConfig {
        release_index_url: server.url("/index.json"),
        rate_limit_millis: 0,
        java: JavaRunner::command("true"),
        ..Default::default()
    }
}

pub fn index_json(base_url: &str) -> String {
    format!(
        r#"{{
            "latest": {{"release": "{RELEASE}", "snapshot": "23w31a"}},
            "versions": [
                {{"id": "23w31a", "type": "snapshot", "url": "{base_url}/23w31a.json"}},
                {{"id": "{RELEASE}", "type": "release", "url": "{base_url}/{RELEASE}.json"}},
                {{"id": "b1.7.3", "type": "old_beta", "url": "{base_url}/b1.7.3.json"}}
            ]
        }}"#
    )
}

/// Descriptor with a generic library, a library with linux natives and,
/// if `with_missing`, a library the server does not have.
pub fn descriptor_json(base_url: &str, with_missing: bool) -> String {
    let missing = if with_missing {
        format!(
            r#",{{"name": "org:missing:1", "downloads": {{"artifact": {{"path": "org/missing/missing.jar", "url": "{base_url}/libraries/org/missing/missing.jar"}}}}}}"#
        )
    } else {
        String::new()
    };

    format!(
        r#"{{
            "arguments": {{
                "game": ["--username", "${{auth_player_name}}"],
                "jvm": [
                    {{"rules": [{{"action": "allow", "os": {{"name": "osx"}}}}], "value": ["-XstartOnFirstThread"]}},
                    "-Djava.library.path=${{natives_directory}}",
                    "-Dminecraft.launcher.brand=${{launcher_name}}",
                    "-cp",
                    "${{classpath}}"
                ]
            }},
            "assetIndex": {{"id": "5"}},
            "downloads": {{"client": {{"url": "{base_url}/client.jar"}}}},
            "id": "{RELEASE}",
            "libraries": [
                {{"name": "org:a:1", "downloads": {{"artifact": {{"path": "org/a/a.jar", "url": "{base_url}/libraries/org/a/a.jar"}}}}}},
                {{"name": "org:a:1", "downloads": {{"artifact": {{"path": "org/a/a.jar", "url": "{base_url}/libraries/org/a/a.jar"}}}}}},
                {{
                    "name": "org:l:1",
                    "downloads": {{
                        "artifact": {{"path": "org/l/l.jar", "url": "{base_url}/libraries/org/l/l.jar"}},
                        "classifiers": {{
                            "natives-linux": {{"path": "org/l/l-natives-linux.jar", "url": "{base_url}/libraries/org/l/l-natives-linux.jar"}},
                            "natives-windows": {{"path": "org/l/l-natives-windows.jar", "url": "{base_url}/libraries/org/l/l-natives-windows.jar"}}
                        }}
                    }}
                }}
                {missing}
            ],
            "mainClass": "net.minecraft.client.main.Main"
        }}"#
    )
}

pub fn natives_jar() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in [("linux/liblwjgl.so", b"so".as_slice()), ("META-INF/MANIFEST.MF", b"mf".as_slice())] {
        writer.start_file(name, zip::write::FileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Every file a release needs, served by [`TestServer`].
pub fn release_files(base_url: &str, with_missing: bool) -> Vec<(String, Vec<u8>)> {
    vec![
        ("/index.json".into(), index_json(base_url).into_bytes()),
        (format!("/{RELEASE}.json"), descriptor_json(base_url, with_missing).into_bytes()),
        ("/client.jar".into(), b"client".to_vec()),
        ("/libraries/org/a/a.jar".into(), b"a".to_vec()),
        ("/libraries/org/l/l.jar".into(), b"l".to_vec()),
        ("/libraries/org/l/l-natives-linux.jar".into(), natives_jar()),
    ]
}
