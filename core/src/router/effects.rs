// ruta/src/router/effects.rs

//! Side-effect execution: `tap` observes a route without altering it,
//! `do_route` runs a winning action, and `Router::execute` combines routing
//! with execution.

use crate::error::{RutaError, RutaResult};
use crate::route::model::Route;
use crate::router::definition::Router;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// The future an observer builds from a borrowed route. The observer inspects
/// the route synchronously and returns an owned future, so the route itself
/// is never captured and flows through unchanged.
pub type ObserveFuture = Pin<Box<dyn Future<Output = RutaResult<()>> + Send>>;

impl<In, V> Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
{
  /// Observes every route this router produces. The observer's async effect
  /// is awaited exactly once per invocation, its errors propagate, and the
  /// original route passes through untouched — `tap` never alters the
  /// pipeline value.
  pub fn tap<F>(self, observe: F) -> Router<In, V>
  where
    F: Fn(&Route<V>) -> ObserveFuture + Send + Sync + 'static,
  {
    let observe = Arc::new(observe);
    Router::new(move |input: In| {
      let prev = self.clone();
      let observe = Arc::clone(&observe);
      async move {
        let route = prev.route(input).await?;
        observe(&route).await?;
        Ok(route)
      }
    })
  }

  /// Routes `input` and executes the winning action, if any.
  ///
  /// Resolves to `true` when an `Action` route was invoked and `false` when
  /// there was nothing to execute. See [`do_route`] for the variant rules.
  #[instrument(
    name = "Router::execute",
    skip_all,
    fields(value_type = %std::any::type_name::<V>()),
    err(Display)
  )]
  pub async fn execute(&self, input: In) -> RutaResult<bool> {
    let route = self.route(input).await?;
    do_route(route).await
  }
}

/// Executes a routing outcome for its side effect.
///
/// An `Action` route's thunk is invoked and `true` is returned. `None` and
/// `Match` carry nothing invokable and return `false`. A `Named` route here
/// means resolution was skipped — that is a contract violation, as is a
/// `Multiple`, which is ranking state and never a terminal side-effect target.
pub async fn do_route<V>(route: Route<V>) -> RutaResult<bool>
where
  V: Send + 'static,
{
  match route {
    Route::Action(action_route) => {
      event!(Level::DEBUG, score = action_route.score, "do_route: invoking action.");
      (action_route.action)().await?;
      Ok(true)
    }
    Route::None(no_route) => {
      event!(Level::DEBUG, reason = ?no_route.reason, "do_route: nothing to execute.");
      Ok(false)
    }
    Route::Match(_) => Ok(false),
    Route::Named(named) => Err(RutaError::UnresolvedAction { name: named.name }),
    other @ Route::Multiple(_) => Err(RutaError::UnexpectedVariant {
      at: "do_route",
      expected: "a single executable route",
      found: other.variant_name(),
    }),
  }
}
