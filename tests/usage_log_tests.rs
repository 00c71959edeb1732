use std::io;
use std::sync::{Arc, Mutex};

use qianfan_lm::{LanguageModel, OptionMap, QianfanConfig, QianfanLm};
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

#[derive(Clone, Default)]
struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).to_string()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_subscriber(writer: &CaptureWriter) -> impl tracing::Subscriber {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(writer.clone())
        .finish()
}

fn adapter_for(server: &MockServer) -> QianfanLm {
    let config = QianfanConfig::new("test-key".to_string()).with_base_url(server.uri());
    QianfanLm::new(config).expect("adapter")
}

#[tokio::test]
async fn usage_line_is_emitted_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "as-1",
            "result": "ok",
            "usage": { "prompt_tokens": 5, "completion_tokens": 37, "total_tokens": 42 }
        })))
        .mount(&server)
        .await;

    let writer = CaptureWriter::default();
    let _guard = tracing::subscriber::set_default(capture_subscriber(&writer));

    let mut lm = adapter_for(&server);
    lm.call("hello", true, false, OptionMap::new())
        .await
        .expect("completions");

    let output = writer.contents();
    let usage_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("Qianfan response token usage"))
        .collect();
    assert_eq!(usage_lines.len(), 1);
    assert!(usage_lines[0].contains("42"));
}

#[tokio::test]
async fn absent_usage_data_emits_no_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "as-1", "result": "ok" })),
        )
        .mount(&server)
        .await;

    let writer = CaptureWriter::default();
    let _guard = tracing::subscriber::set_default(capture_subscriber(&writer));

    let mut lm = adapter_for(&server);
    let completions = lm
        .call("hello", true, false, OptionMap::new())
        .await
        .expect("completions");
    assert_eq!(completions, vec!["ok".to_string()]);

    let output = writer.contents();
    assert!(!output.contains("Qianfan response token usage"));
}
