// tests/registry_tests.rs
mod common;

use common::*;
use ruta::{
  args_as, do_route, resolve_actions, ActionRegistry, NamedRoute, Route, Router, RutaError,
};
use std::sync::Arc;

fn greeting_registry() -> Arc<ActionRegistry<Replies>> {
  let registry = ActionRegistry::<Replies>::new();
  registry.bind("greet", |replies: Replies, args| async move {
    let name: String = args_as(&args, "greet")?;
    replies.send(format!("Hello, {name}!"));
    Ok(())
  });
  registry.bind("help", |replies: Replies, _args| async move {
    replies.send("Try saying hello.");
    Ok(())
  });
  Arc::new(registry)
}

#[tokio::test]
async fn resolving_a_named_route_yields_an_invokable_action() {
  setup_tracing();
  let registry = greeting_registry();
  let replies = Replies::new();

  let named = NamedRoute::new("greet", "Bill".to_string()).with_score(0.8);
  let action = registry.resolve_named(&named, replies.clone()).unwrap();
  assert_score(action.score, 0.8);

  // Nothing sent until the action actually runs.
  assert!(replies.sent().is_empty());
  let executed = do_route::<String>(Route::Action(action)).await.unwrap();
  assert!(executed);
  assert_eq!(replies.sent(), vec!["Hello, Bill!"]);
}

#[tokio::test]
async fn resolving_an_unknown_name_fails_fast() {
  setup_tracing();
  let registry = greeting_registry();
  let named = NamedRoute::new("unknown", ());

  match registry.resolve_named(&named, Replies::new()) {
    Err(RutaError::UnknownAction { name }) => assert_eq!(name, "unknown"),
    other => panic!("expected UnknownAction, got {other:?}"),
  }
}

#[tokio::test]
async fn args_downcast_mismatch_is_a_typed_error() {
  setup_tracing();
  let registry = greeting_registry();
  let replies = Replies::new();

  // The handler attached a u32 where the binding expects a String.
  let named = NamedRoute::new("greet", 42u32);
  let action = registry.resolve_named(&named, replies.clone()).unwrap();

  match do_route::<String>(Route::Action(action)).await {
    Err(RutaError::ArgsTypeMismatch { action_name, .. }) => assert_eq!(action_name, "greet"),
    other => panic!("expected ArgsTypeMismatch, got {other:?}"),
  }
  assert!(replies.sent().is_empty());
}

#[test]
#[should_panic(expected = "already bound")]
fn binding_the_same_name_twice_panics() {
  let registry = ActionRegistry::<Replies>::new();
  registry.bind("greet", |_replies, _args| async { Ok(()) });
  registry.bind("greet", |_replies, _args| async { Ok(()) });
}

#[tokio::test]
async fn resolve_actions_adapts_named_routes_end_to_end() {
  setup_tracing();
  let registry = greeting_registry();
  let replies = Replies::new();

  // The matching handler only names the action; it never sends anything.
  let matcher = Router::<String, String>::from_sync(|input: String| {
    input
      .strip_prefix("hi ")
      .map(|name| Route::named("greet", name.to_string()).with_score(0.9))
      .unwrap_or_else(Route::none)
  });

  let router = resolve_actions(matcher, registry.clone(), replies.clone());

  let executed = router.execute("hi Bill".to_string()).await.unwrap();
  assert!(executed);
  assert_eq!(replies.sent(), vec!["Hello, Bill!"]);

  let executed = router.execute("goodbye".to_string()).await.unwrap();
  assert!(!executed);
}

#[tokio::test]
async fn the_same_routing_logic_runs_against_different_contexts() {
  setup_tracing();
  let registry = greeting_registry();

  let matcher =
    Router::<(), String>::from_sync(|_| Route::named("help", ()));

  let production = Replies::new();
  let test_double = Replies::new();

  resolve_actions(matcher.clone(), registry.clone(), production.clone())
    .execute(())
    .await
    .unwrap();
  resolve_actions(matcher, registry.clone(), test_double.clone())
    .execute(())
    .await
    .unwrap();

  assert_eq!(production.sent(), vec!["Try saying hello."]);
  assert_eq!(test_double.sent(), vec!["Try saying hello."]);
}

#[tokio::test]
async fn resolve_actions_resolves_members_of_a_tie() {
  setup_tracing();
  let registry = greeting_registry();
  let replies = Replies::new();

  let tie = Router::<(), String>::from_sync(|_| {
    Route::Multiple(ruta::MultipleRoute::new(vec![
      Route::named("greet", "Ann".to_string()).with_score(0.5),
      Route::named("help", ()).with_score(0.5),
    ]))
  });

  let route = resolve_actions(tie, registry, replies)
    .route(())
    .await
    .unwrap();
  let members = route.as_multiple().expect("expected a Multiple route");
  assert!(members
    .routes
    .iter()
    .all(|r| matches!(r, Route::Action(_))));
}
