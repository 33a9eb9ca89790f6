// ruta/src/router/alternation.rs

//! Ordered alternation: `first` tries routers left to right and returns the
//! first non-`None` route.

use crate::route::model::Route;
use crate::router::definition::Router;
use tracing::{event, Level};

/// Tries `routers` in argument order and returns the first route that is not
/// `Route::None`.
///
/// Evaluation is strictly serial: router `k + 1` is not started until router
/// `k`'s route is fully known. This is load-bearing, not an optimization —
/// later routers may have observable side effects and must never run once an
/// earlier one wins. An empty vector, or all routers producing `None`, yields
/// `Route::None`.
pub fn first<In, V>(routers: Vec<Router<In, V>>) -> Router<In, V>
where
  In: Clone + Send + Sync + 'static,
  V: Send + 'static,
{
  Router::new(move |input: In| {
    let routers = routers.clone();
    async move {
      for (index, router) in routers.iter().enumerate() {
        let route = router.route(input.clone()).await?;
        if !route.is_none() {
          event!(Level::DEBUG, winner = index, "first: router produced a route.");
          return Ok(route);
        }
        event!(Level::TRACE, index, "first: router produced nothing, trying next.");
      }
      Ok(Route::none())
    }
  })
}
