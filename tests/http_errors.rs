#![allow(clippy::unwrap_used)]
//! Both service clients against a local HTTP stub: status and timeout mapping.

use std::net::SocketAddr;
use std::time::Duration;

use sampark_chat::{
    ChatConfig, ChatError, ChatModel, GeminiClient, GoogleTranslator, LanguageCode, Message,
    Translator,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Read one HTTP request (headers plus `Content-Length` body) off the stream
async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Answer a single request with `status` and `body`; hands back the raw request
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        tx.send(request).ok();
    });

    (addr, rx)
}

/// Accept a connection and never answer
async fn serve_silence() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    addr
}

fn config_for(addr: SocketAddr) -> ChatConfig {
    ChatConfig {
        gemini_api_key: "gemini-test-key".to_string(),
        gemini_endpoint: format!("http://{addr}/v1beta"),
        translate_api_key: Some("translate-test-key".to_string()),
        translate_endpoint: format!("http://{addr}/language/translate/v2"),
        ..Default::default()
    }
}

const UNAUTHORIZED_BODY: &str = r#"{"error":{"code":401,"message":"API key not valid"}}"#;

#[tokio::test]
async fn test_gemini_unauthorized_is_api_error() {
    let (addr, request) = serve_once("401 Unauthorized", UNAUTHORIZED_BODY).await;
    let client = GeminiClient::new(&config_for(addr)).unwrap();

    let err = client
        .invoke(&[Message::system("Be polite."), Message::user("Hello")])
        .await
        .unwrap_err();

    match err {
        ChatError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: gemini-test-key"));
}

#[tokio::test]
async fn test_translate_unauthorized_is_api_error() {
    let (addr, request) = serve_once("401 Unauthorized", UNAUTHORIZED_BODY).await;
    let translator = GoogleTranslator::new(&config_for(addr)).unwrap();

    let err = translator
        .translate("Hello", &LanguageCode::parse("hi").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ChatError::ApiError { status: 401, .. }));

    let request = request.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert_eq!(request_line, "POST /language/translate/v2 HTTP/1.1");
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: translate-test-key"));
}

#[tokio::test]
async fn test_translate_success_parses_body() {
    let (addr, _request) = serve_once(
        "200 OK",
        r#"{"data":{"translations":[{"translatedText":"Hola","detectedSourceLanguage":"en"}]}}"#,
    )
    .await;
    let translator = GoogleTranslator::new(&config_for(addr)).unwrap();

    let translation = translator
        .translate("Hello", &LanguageCode::parse("es").unwrap())
        .await
        .unwrap();

    assert_eq!(translation.text, "Hola");
}

#[tokio::test]
async fn test_request_timeout_is_timeout_error() {
    let addr = serve_silence().await;
    let config = ChatConfig {
        timeout_ms: Some(200),
        ..config_for(addr)
    };
    let client = GeminiClient::new(&config).unwrap();

    let err = client.invoke(&[Message::user("Hello")]).await.unwrap_err();

    assert!(matches!(err, ChatError::TimeoutError));
}
