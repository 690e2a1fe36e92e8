#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use direst_invoker::{
    errors::InvokerError,
    transport::{RawResponse, Transport},
};
use serde_json::{Value, json};

type Responder = dyn Fn(&str, &Value) -> RawResponse + Send + Sync;

/// In-memory gateway: records every request and answers from a script.
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<RawResponse>>,
    responder: Option<Box<Responder>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    /// Replays `responses` in order; extra requests get a 500.
    pub fn new(responses: Vec<RawResponse>) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(responses.into()),
            responder: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answers every request with `f(url, body)`.
    pub fn from_fn(f: impl Fn(&str, &Value) -> RawResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(VecDeque::new()),
            responder: Some(Box::new(f)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, InvokerError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));

        if let Some(responder) = &self.responder {
            return Ok(responder(url, body));
        }
        Ok(self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| error(500, -1, "unscripted request")))
    }
}

pub fn ok(body: Value) -> RawResponse {
    RawResponse {
        status: 200,
        body: Some(body),
    }
}

pub fn error(status: u16, errcode: i64, message: &str) -> RawResponse {
    RawResponse {
        status,
        body: Some(json!({"errcode": errcode, "message": message})),
    }
}

/// iFinD-style column table with one row per code in `batch`.
pub fn rows_for(batch: &str) -> Value {
    let codes: Vec<&str> = batch.split(',').collect();
    let close: Vec<f64> = (0..codes.len()).map(|i| i as f64).collect();
    json!({"thscode": codes, "close": close})
}
