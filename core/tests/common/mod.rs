// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use ruta::{Route, Router, RutaError};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use tracing::Level;

// --- Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Router Creators ---

/// A router that always matches `value` with the given score.
pub fn match_router(value: &'static str, score: f64) -> Router<(), String> {
  Router::from_sync(move |_| (value.to_string(), score))
}

/// A router that always produces nothing.
pub fn none_router() -> Router<(), String> {
  Router::from_sync(|_| Option::<String>::None)
}

/// A router that matches `value` and bumps `invocations` every time it runs.
pub fn counting_match_router(
  value: &'static str,
  score: f64,
  invocations: Arc<AtomicUsize>,
) -> Router<(), String> {
  Router::from_sync(move |_| {
    invocations.fetch_add(1, Ordering::SeqCst);
    (value.to_string(), score)
  })
}

/// A router that produces nothing and bumps `invocations` every time it runs.
pub fn counting_none_router(invocations: Arc<AtomicUsize>) -> Router<(), String> {
  Router::from_sync(move |_| {
    invocations.fetch_add(1, Ordering::SeqCst);
    Option::<String>::None
  })
}

/// A router that fails with a handler error, bumping `invocations` first.
pub fn failing_router(message: &'static str, invocations: Arc<AtomicUsize>) -> Router<(), String> {
  Router::new(move |_| {
    let invocations = invocations.clone();
    async move {
      invocations.fetch_add(1, Ordering::SeqCst);
      Err(RutaError::Internal(message.to_string()))
    }
  })
}

// --- Reply-collecting context for named-action tests ---

/// A stand-in for a caller-supplied execution context (e.g. a reply channel):
/// resolved actions send into it, tests inspect what arrived.
#[derive(Clone, Default)]
pub struct Replies {
  sent: Arc<Mutex<Vec<String>>>,
}

impl Replies {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn send(&self, message: impl Into<String>) {
    self.sent.lock().unwrap().push(message.into());
  }

  pub fn sent(&self) -> Vec<String> {
    self.sent.lock().unwrap().clone()
  }
}

// --- Assertions ---

pub fn assert_score(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-9,
    "expected score {expected}, got {actual}"
  );
}

pub fn assert_is_match(route: &Route<String>, value: &str, score: f64) {
  let matched = route
    .as_match()
    .unwrap_or_else(|| panic!("expected a Match route, got {}", route.variant_name()));
  assert_eq!(matched.value, value);
  assert_score(matched.score, score);
}
