//! Scripted `ChatModel` for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{ChatModel, ChatRequest, LlmError, LlmResponse};

#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    ApiError { status: u16, message: String },
}

impl MockReply {
    pub fn text(content: impl Into<String>) -> Self {
        MockReply::Text(content.into())
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        MockReply::ApiError {
            status,
            message: message.into(),
        }
    }
}

/// Answers each call with the next queued reply and records every request.
#[derive(Default)]
pub struct MockChatModel {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatModel {
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn model(&self) -> &str {
        "mock"
    }

    async fn invoke(&self, request: &ChatRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Text(content)) => Ok(LlmResponse::text(content)),
            Some(MockReply::ApiError { status, message }) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::Api {
                status: 500,
                message: "mock has no replies left".to_string(),
            }),
        }
    }
}
