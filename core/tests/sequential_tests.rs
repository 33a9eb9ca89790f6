// tests/sequential_tests.rs
mod common;

use common::*;
use ruta::{pipe, Route, Router, RutaError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn then_feeds_unwrapped_value_into_next_stage() {
  setup_tracing();
  let router = Router::from_sync(|_: ()| Some("hi".to_string()))
    .then(Router::from_sync(|s: String| Some(s.repeat(2))));

  let route = router.route(()).await.unwrap();
  assert_is_match(&route, "hihi", 1.0);
}

#[tokio::test]
async fn then_short_circuits_on_no_route() {
  setup_tracing();
  let later_invocations = Arc::new(AtomicUsize::new(0));
  let counter = later_invocations.clone();

  let router = Router::from_sync(|_: ()| Option::<String>::None).then(Router::from_sync(
    move |s: String| {
      counter.fetch_add(1, Ordering::SeqCst);
      Some(s)
    },
  ));

  let route = router.route(()).await.unwrap();
  assert!(route.is_none());
  assert_eq!(later_invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn then_preserves_no_route_reason() {
  setup_tracing();
  let router = Router::from_sync(|_: ()| ruta::NoRoute::because("empty input"))
    .then(Router::<String, String>::no_route());

  match router.route(()).await.unwrap() {
    Route::None(no_route) => assert_eq!(no_route.reason.as_deref(), Some("empty input")),
    other => panic!("expected None, got {}", other.variant_name()),
  }
}

#[tokio::test]
async fn then_passes_action_through_without_invoking_next() {
  setup_tracing();
  let later_invocations = Arc::new(AtomicUsize::new(0));
  let counter = later_invocations.clone();

  let router = Router::<(), String>::from_sync(|_| {
    Route::action(|| async { Ok(()) })
  })
  .then(Router::from_sync(move |s: String| {
    counter.fetch_add(1, Ordering::SeqCst);
    Some(s)
  }));

  let route = router.route(()).await.unwrap();
  assert!(matches!(route, Route::Action(_)));
  assert_eq!(later_invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn then_rejects_multiple_at_the_pipe_boundary() {
  setup_tracing();
  let router = Router::<(), String>::from_sync(|_| {
    Route::Multiple(ruta::MultipleRoute::new(vec![
      Route::found_with("a".to_string(), 0.5),
      Route::found_with("b".to_string(), 0.5),
    ]))
  })
  .then(Router::<String, String>::no_route());

  match router.route(()).await {
    Err(RutaError::UnexpectedVariant { at, found, .. }) => {
      assert_eq!(at, "then");
      assert_eq!(found, "Multiple");
    }
    other => panic!("expected UnexpectedVariant, got {other:?}"),
  }
}

#[tokio::test]
async fn followed_by_runs_later_stage_even_on_no_route() {
  setup_tracing();
  let later_invocations = Arc::new(AtomicUsize::new(0));
  let counter = later_invocations.clone();

  let router = Router::from_sync(|_: ()| Option::<String>::None).followed_by(Router::from_sync(
    move |carried: Option<String>| {
      counter.fetch_add(1, Ordering::SeqCst);
      assert!(carried.is_none());
      Some("cleanup ran".to_string())
    },
  ));

  let route = router.route(()).await.unwrap();
  assert_is_match(&route, "cleanup ran", 1.0);
  assert_eq!(later_invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn followed_by_carries_the_matched_value() {
  setup_tracing();
  let router = Router::from_sync(|_: ()| Some("payload".to_string())).followed_by(
    Router::from_sync(|carried: Option<String>| carried.map(|v| format!("got {v}"))),
  );

  let route = router.route(()).await.unwrap();
  assert_is_match(&route, "got payload", 1.0);
}

#[tokio::test]
async fn pipe_of_zero_stages_is_the_no_route_identity() {
  setup_tracing();
  let router = pipe::<String>(vec![]);
  let route = router.route("anything".to_string()).await.unwrap();
  assert!(route.is_none());
}

#[tokio::test]
async fn pipe_of_one_stage_behaves_like_that_stage() {
  setup_tracing();
  let router = pipe(vec![Router::from_sync(|s: String| Some(s.to_uppercase()))]);
  let route = router.route("hi".to_string()).await.unwrap();
  assert_is_match(&route, "HI", 1.0);
}

#[tokio::test]
async fn pipe_chains_stages_left_to_right() {
  setup_tracing();
  let router = pipe(vec![
    Router::from_sync(|s: String| Some(format!("{s}a"))),
    Router::from_sync(|s: String| Some(format!("{s}b"))),
    Router::from_sync(|s: String| Some(format!("{s}c"))),
  ]);
  let route = router.route("x".to_string()).await.unwrap();
  assert_is_match(&route, "xabc", 1.0);
}

#[tokio::test]
async fn handler_errors_propagate_through_then() {
  setup_tracing();
  let invocations = Arc::new(AtomicUsize::new(0));
  let router = failing_router("stage exploded", invocations.clone())
    .then(Router::<String, String>::no_route());

  match router.route(()).await {
    Err(RutaError::Internal(message)) => assert_eq!(message, "stage exploded"),
    other => panic!("expected Internal error, got {other:?}"),
  }
  assert_eq!(invocations.load(Ordering::SeqCst), 1);
}
