// Shared fakes for the viewer integration tests. Not every test file uses
// every helper.
#![allow(dead_code)]

use sblgnt_viewer_engine::{Console, Fetch, FetchError, FetchOptions, FetchResponse};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Serves canned JSON by URL and records every request
#[derive(Clone, Default)]
pub struct FakeFetch {
    routes: Rc<RefCell<HashMap<String, FetchResponse>>>,
    calls: Rc<RefCell<Vec<(String, FetchOptions)>>>,
}

impl FakeFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, url: &str, body: Value) -> Self {
        self.routes
            .borrow_mut()
            .insert(url.to_string(), FetchResponse::ok(body.to_string()));
        self
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.routes
            .borrow_mut()
            .insert(url.to_string(), FetchResponse::status(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn options(&self) -> Vec<FetchOptions> {
        self.calls.borrow().iter().map(|(_, options)| *options).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for FakeFetch {
    fn fetch(&self, url: &str, options: FetchOptions) -> Result<FetchResponse, FetchError> {
        self.calls.borrow_mut().push((url.to_string(), options));
        self.routes
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[derive(Clone, Default)]
pub struct RecordingConsole {
    errors: Rc<RefCell<Vec<String>>>,
}

impl RecordingConsole {
    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }
}

impl Console for RecordingConsole {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

pub fn book(display_name: &str, verses: &[(&str, &str)]) -> Value {
    let verses: Vec<Value> = verses
        .iter()
        .map(|(reference, text)| serde_json::json!({ "reference": reference, "text": text }))
        .collect();
    serde_json::json!({ "display_name": display_name, "header": "", "verses": verses })
}

pub fn manifest(books: &[(&str, &str, &str)]) -> Value {
    let books: Vec<Value> = books
        .iter()
        .map(|(book_id, display_name, data_url)| {
            serde_json::json!({ "book_id": book_id, "display_name": display_name, "data_url": data_url })
        })
        .collect();
    serde_json::json!({ "books": books })
}
