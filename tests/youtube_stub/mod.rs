use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

pub const API_KEY: &str = "test-api-key";

/// Stubbed video platform API.
///
/// Channels it knows about (by uploads playlist id):
/// - `UUgoodchannel`: two playlist pages (2 ids + continuation, then 1 id).
/// - `UUbrokenpage`: page 1 succeeds with a continuation token, page 2
///   returns a 500.
/// - `UUemptychannel`: zero videos.
/// - `UUmixedbatches`: 60 ids; the first detail batch contains a
///   `failbatch-` id and fails, the second batch succeeds.
/// - `UUallfail`: every detail batch fails.
pub struct YouTubeStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl YouTubeStub {
    pub fn spawn() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start youtube stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let path = url.split('?').next().unwrap_or(&url);

                if query_param(&url, "key").as_deref() != Some(API_KEY) {
                    respond_json(request, 403, error_body("missing or invalid API key"));
                    continue;
                }

                match path {
                    "/playlistItems" => {
                        let playlist_id = query_param(&url, "playlistId").unwrap_or_default();
                        let page_token = query_param(&url, "pageToken");
                        let (status, body) = playlist_page(&playlist_id, page_token.as_deref());
                        respond_json(request, status, body);
                    }
                    "/videos" => {
                        let ids = query_param(&url, "id").unwrap_or_default();
                        let ids: Vec<&str> =
                            ids.split(',').filter(|id| !id.is_empty()).collect();
                        if ids.iter().any(|id| id.starts_with("failbatch-")) {
                            respond_json(request, 500, error_body("backend failure"));
                            continue;
                        }
                        let items: Vec<Value> = ids.into_iter().map(video_item).collect();
                        respond_json(request, 200, json!({ "items": items }));
                    }
                    _ => {
                        respond_json(request, 404, error_body("not found"));
                    }
                }
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for YouTubeStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn playlist_page(playlist_id: &str, page_token: Option<&str>) -> (u16, Value) {
    match (playlist_id, page_token) {
        ("UUgoodchannel", None) => (
            200,
            json!({
                "items": [playlist_item("vid001"), playlist_item("vid002")],
                "nextPageToken": "page-2",
            }),
        ),
        ("UUgoodchannel", Some("page-2")) => {
            (200, json!({ "items": [playlist_item("vid003")] }))
        }
        ("UUbrokenpage", None) => (
            200,
            json!({
                "items": [playlist_item("vid001")],
                "nextPageToken": "page-2",
            }),
        ),
        ("UUbrokenpage", Some(_)) => (500, error_body("backend failure")),
        ("UUemptychannel", None) => (200, json!({ "items": [] })),
        ("UUmixedbatches", None) => {
            let items: Vec<Value> = (0..60)
                .map(|idx| {
                    if idx == 0 {
                        playlist_item("failbatch-000")
                    } else {
                        playlist_item(&format!("ok-{idx:03}"))
                    }
                })
                .collect();
            (200, json!({ "items": items }))
        }
        ("UUallfail", None) => (
            200,
            json!({ "items": [playlist_item("failbatch-001"), playlist_item("failbatch-002")] }),
        ),
        _ => (404, error_body(&format!("unknown playlist: {playlist_id}"))),
    }
}

fn playlist_item(video_id: &str) -> Value {
    json!({ "contentDetails": { "videoId": video_id } })
}

fn video_item(video_id: &str) -> Value {
    match video_id {
        "vid001" => json!({
            "id": "vid001",
            "snippet": {
                "channelTitle": "Stub Channel",
                "title": "First video",
                "description": "Intro video",
                "tags": ["rust", "etl"],
                "publishedAt": "2024-10-06T12:00:00Z",
            },
            "statistics": {
                "viewCount": "1234",
                "likeCount": "56",
                "favoriteCount": "0",
                "commentCount": "7",
            },
            "contentDetails": {
                "duration": "PT15M33S",
                "definition": "hd",
                "caption": "false",
            },
        }),
        // Every per-row degradation at once: malformed counter, unparsable
        // timestamp, empty duration, missing text fields.
        "vid002" => json!({
            "id": "vid002",
            "snippet": {
                "channelTitle": "Stub Channel",
                "title": "Second video",
                "publishedAt": "not-a-timestamp",
            },
            "statistics": {
                "viewCount": "1,234",
                "commentCount": "3",
            },
            "contentDetails": {
                "duration": "",
                "definition": "sd",
                "caption": "false",
            },
        }),
        // No statistics section at all.
        "vid003" => json!({
            "id": "vid003",
            "snippet": {
                "channelTitle": "Stub Channel",
                "title": "Third video",
                "description": "Stream replay",
                "publishedAt": "2024-10-07T00:00:00Z",
            },
            "contentDetails": {
                "duration": "PT1H2M3S",
                "definition": "hd",
                "caption": "true",
            },
        }),
        other => json!({
            "id": other,
            "snippet": {
                "channelTitle": "Stub Channel",
                "title": format!("Video {other}"),
                "publishedAt": "2024-10-06T12:00:00Z",
            },
            "statistics": { "viewCount": "10" },
            "contentDetails": { "duration": "PT1M" },
        }),
    }
}

fn error_body(message: &str) -> Value {
    json!({ "error": { "code": 500, "message": message } })
}

fn respond_json(request: tiny_http::Request, status: u16, body: Value) {
    let mut response =
        tiny_http::Response::from_string(body.to_string()).with_status_code(status);
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("build header");
    response = response.with_header(header);
    let _ = request.respond(response);
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name {
            return Some(percent_decode(value));
        }
    }
    None
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'%' if idx + 3 <= bytes.len() => {
                let hex = &value[idx + 1..idx + 3];
                match u8::from_str_radix(hex, 16) {
                    Ok(byte) => {
                        out.push(byte);
                        idx += 3;
                    }
                    Err(_) => {
                        out.push(b'%');
                        idx += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                idx += 1;
            }
            byte => {
                out.push(byte);
                idx += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
