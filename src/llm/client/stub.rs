//! 测试用的可编排客户端

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Completion, CompletionRequest, LlmClient, LlmError, LlmResult, TokenUsage};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail(String),
}

pub(crate) struct StubClient {
    name: String,
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    healthy: bool,
    web_search: bool,
    requests: Mutex<Vec<CompletionRequest>>,
    health_calls: AtomicUsize,
}

impl StubClient {
    pub(crate) fn replying(name: &str, text: &str) -> Self {
        Self::new(name, Reply::Text(text.to_string()))
    }

    pub(crate) fn failing(name: &str, message: &str) -> Self {
        Self::new(name, Reply::Fail(message.to_string()))
    }

    fn new(name: &str, fallback: Reply) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(VecDeque::new()),
            fallback,
            healthy: true,
            web_search: false,
            requests: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
        }
    }

    /// 依次返回脚本中的回复，用完后返回默认回复
    pub(crate) fn with_script(self, replies: Vec<Reply>) -> Self {
        *self.script.lock().unwrap() = replies.into();
        self
    }

    pub(crate) fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub(crate) fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StubClient {
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Text(text) => Ok(Completion {
                text,
                usage: TokenUsage::new(100, 50),
            }),
            Reply::Fail(message) => Err(LlmError::Transport(format!("{}: {}", self.name, message))),
        }
    }

    fn supports_web_search(&self) -> bool {
        self.web_search
    }

    async fn health_check(&self) -> bool {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.healthy
    }

    fn name(&self) -> &str {
        &self.name
    }
}
