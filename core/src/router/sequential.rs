// ruta/src/router/sequential.rs

//! Sequential chaining: `then` (short-circuiting pipe) and `followed_by`
//! (non-short-circuiting combine). Both suspend serially; the next stage is
//! not started until the previous stage's route is fully known.

use crate::error::RutaError;
use crate::route::model::Route;
use crate::router::definition::Router;
use tracing::{event, Level};

impl<In, V> Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
{
  /// Feeds this router's matched value into `next`.
  ///
  /// On `Route::None` the chain short-circuits: `next` is never invoked and
  /// the `NoRoute` (with its diagnostic reason) is returned. On `Route::Match`
  /// the unwrapped value becomes `next`'s input and `next`'s route is returned
  /// as-is, without score folding. `Action` and `Named` routes carry no
  /// pipeable payload and pass through unchanged; a `Multiple` reaching a pipe
  /// boundary is a contract violation.
  pub fn then<W>(self, next: Router<V, W>) -> Router<In, W>
  where
    W: Send + 'static,
  {
    Router::new(move |input: In| {
      let prev = self.clone();
      let next = next.clone();
      async move {
        match prev.route(input).await? {
          Route::None(no_route) => {
            event!(Level::DEBUG, reason = ?no_route.reason, "then: short-circuiting on NoRoute.");
            Ok(Route::None(no_route))
          }
          Route::Match(matched) => next.route(matched.value).await,
          Route::Action(action) => Ok(Route::Action(action)),
          Route::Named(named) => Ok(Route::Named(named)),
          other @ Route::Multiple(_) => Err(RutaError::UnexpectedVariant {
            at: "then",
            expected: "None, Match, Action, or Named",
            found: other.variant_name(),
          }),
        }
      }
    })
  }

  /// Like [`Router::then`], but `next` always runs, even when this router
  /// produced nothing. `next` receives `Some(value)` when the previous stage
  /// matched and `None` otherwise, so cleanup/logging stages still see every
  /// invocation.
  pub fn followed_by<W>(self, next: Router<Option<V>, W>) -> Router<In, W>
  where
    W: Send + 'static,
  {
    Router::new(move |input: In| {
      let prev = self.clone();
      let next = next.clone();
      async move {
        let carried = match prev.route(input).await? {
          Route::Match(matched) => Some(matched.value),
          other => {
            event!(
              Level::TRACE,
              variant = other.variant_name(),
              "followed_by: previous stage carried no value, continuing anyway."
            );
            None
          }
        };
        next.route(carried).await
      }
    })
  }
}

/// Builds an N-stage pipe over a uniform value type by folding
/// [`Router::then`] left to right. Zero stages yields the identity router that
/// always produces `Route::None`.
pub fn pipe<V>(stages: Vec<Router<V, V>>) -> Router<V, V>
where
  V: Send + 'static,
{
  let mut stages = stages.into_iter();
  let Some(head) = stages.next() else {
    return Router::no_route();
  };
  stages.fold(head, |composed, stage| composed.then(stage))
}
