// ruta/src/router/definition.rs

//! The `Router<In, V>` type: an input-to-route async function that every
//! combinator produces and consumes.

use crate::error::RutaResult;
use crate::route::model::Route;
use crate::route::normalize::IntoRoute;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future a router evaluation resolves to: exactly one `Route<V>`, or an
/// error. Handlers in the source's sense ("sync value, promise, or stream")
/// are reframed as this single-shot task; a router never yields more than one
/// route per invocation.
pub type RouteFuture<V> = Pin<Box<dyn Future<Output = RutaResult<Route<V>>> + Send>>;

/// Type alias for a pre-boxed routing handler, for callers who build handlers
/// the long way (`Box::new(move |input| Box::pin(async move { .. }))`).
pub type Handler<In, V> = Box<dyn Fn(In) -> RouteFuture<V> + Send + Sync>;

/// A composable routing function from `In` to a single `Route<V>`.
///
/// `Router` is cheap to clone (`Arc`-shared) and is the unit the combinators
/// operate on: `then`/`followed_by` for sequencing, `first` for alternation,
/// `multiple`/`best` for scored selection, `branch`/`if_true` for conditional
/// dispatch, and `tap`/`execute` for side effects.
pub struct Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
{
  pub(crate) handler: Arc<dyn Fn(In) -> RouteFuture<V> + Send + Sync>,
}

impl<In, V> Clone for Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
{
  fn clone(&self) -> Self {
    Router {
      handler: Arc::clone(&self.handler),
    }
  }
}

impl<In, V> Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
{
  /// Wraps a fallible async handler that already speaks the route algebra.
  pub fn new<F, Fut>(handler: F) -> Self
  where
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RutaResult<Route<V>>> + Send + 'static,
  {
    Router {
      handler: Arc::new(move |input: In| -> RouteFuture<V> { Box::pin(handler(input)) }),
    }
  }

  /// Adopts a pre-boxed [`Handler`].
  pub fn from_handler(handler: Handler<In, V>) -> Self {
    Router {
      handler: Arc::from(handler),
    }
  }

  /// Wraps an infallible async handler whose output is normalized into a
  /// route at the boundary.
  pub fn from_async<F, Fut, R>(handler: F) -> Self
  where
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoRoute<V> + Send,
  {
    Self::new(move |input: In| {
      let fut = handler(input);
      async move { Ok(fut.await.into_route()) }
    })
  }

  /// Wraps a synchronous raw handler; its return value is normalized.
  pub fn from_sync<F, R>(handler: F) -> Self
  where
    F: Fn(In) -> R + Send + Sync + 'static,
    R: IntoRoute<V>,
  {
    Self::new(move |input: In| {
      let route = handler(input).into_route();
      async move { Ok(route) }
    })
  }

  /// The zero-handler identity: always routes to `Route::None`.
  pub fn no_route() -> Self {
    Self::new(|_input: In| async { Ok(Route::none()) })
  }

  /// Evaluates this router against one input, producing exactly one route.
  pub fn route(&self, input: In) -> RouteFuture<V> {
    (self.handler)(input)
  }
}
