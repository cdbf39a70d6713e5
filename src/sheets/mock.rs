use super::Transport;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Records every call and answers with queued bodies, then `{}`.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<VecDeque<String>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, body: &str) {
        self.responses.lock().unwrap().push_back(body.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Vec<u8> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "{}".to_string())
            .into_bytes()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        Ok(self.record(Call {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        }))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Vec<u8>> {
        Ok(self.record(Call {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        }))
    }
}
