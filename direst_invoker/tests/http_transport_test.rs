use std::net::SocketAddr;

use direst_invoker::{
    InvokerConfig, InvokerError, WindInvoker,
    transport::{HttpTransport, Transport},
};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

/// Serves one HTTP response and hands back the raw request it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });

    (addr, rx)
}

fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn posts_json_and_decodes_response() {
    let (addr, request) = serve_once("200 OK", r#"{"close": [1.5, 2.5]}"#).await;
    let config = InvokerConfig::new(format!("http://{addr}/iFind/")).unwrap();
    let transport = HttpTransport::new(&config).unwrap();

    let response = transport
        .post_json(&format!("http://{addr}/iFind/THS_DateQuery/"), &json!({"exchange": "SSE"}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!({"close": [1.5, 2.5]})));

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /iFind/THS_DateQuery/ HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"exchange":"SSE"}"#));
}

#[tokio::test]
async fn non_json_body_decodes_to_none() {
    let (addr, _request) = serve_once("200 OK", "<html>gateway</html>").await;
    let config = InvokerConfig::new(format!("http://{addr}/")).unwrap();
    let transport = HttpTransport::new(&config).unwrap();

    let response = transport
        .post_json(&format!("http://{addr}/wsq/"), &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn error_status_surfaces_through_invoker() {
    let (addr, _request) = serve_once(
        "500 Internal Server Error",
        r#"{"errcode": -40522017, "message": "quota exceeded"}"#,
    )
    .await;
    let wind = WindInvoker::new(InvokerConfig::new(format!("http://{addr}/wind/")).unwrap()).unwrap();

    let err = wind.wss("600000.SH", "close", "").await.unwrap_err();

    assert!(matches!(
        err,
        InvokerError::Api {
            status: 500,
            errcode: -40522017,
            ..
        }
    ));
    assert_eq!(err.message(), Some("quota exceeded"));
}

#[tokio::test]
async fn connection_failure_is_request_error() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = InvokerConfig::new(format!("http://{addr}/")).unwrap();
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport
        .post_json(&format!("http://{addr}/wsq/"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, InvokerError::Request { .. }));
}
