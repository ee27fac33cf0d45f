//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use super::test_context::test_bot_token;

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot pointed at the mock server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri is a valid url");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    fn method_path(name: &str) -> String {
        format!(r"(?i)^/bot{}/{}$", regex_escape(&test_bot_token()), name)
    }

    /// Successful copyMessage for every recipient not otherwise mocked
    pub async fn mock_copy_message_ok(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("copymessage")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": { "message_id": 77 }
            })))
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// copyMessage to `chat_id` fails as if the user blocked the bot
    pub async fn mock_copy_message_blocked(&self, chat_id: i64) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("copymessage")))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("sendmessage")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_body()))
            .mount(&self.server)
            .await;
    }

    /// getChat answers "chat not found"
    pub async fn mock_get_chat_not_found(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("getchat")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.server)
            .await;
    }
}

fn sent_message_body() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 123,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "TestBot",
                "username": "test_bot"
            },
            "chat": {
                "id": 987654321,
                "first_name": "Test",
                "type": "private"
            },
            "date": 1640995200,
            "text": "Test message"
        }
    })
}

fn regex_escape(text: &str) -> String {
    regex::escape(text)
}
