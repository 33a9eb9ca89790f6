// ruta/src/router/scoring.rs

//! Scored selection: `multiple` gathers routes from all routers concurrently,
//! `sort_routes`/`take_top` rank them, and `best` picks winners within a
//! tolerance, surfacing ties as `Route::Multiple` rather than resolving them
//! arbitrarily.

use crate::route::model::{MultipleRoute, Route};
use crate::router::definition::Router;
use futures::future;
use tracing::{event, Level};

/// Options for the `top` prefix selection. Validated at construction, not at
/// invocation: a `max_results` of zero or a tolerance outside [0, 1] is a
/// programmer error and panics immediately.
#[derive(Debug, Clone, Copy)]
pub struct TopOptions {
  pub max_results: usize,
  pub tolerance: f64,
}

impl TopOptions {
  pub fn new(max_results: usize, tolerance: f64) -> Self {
    if max_results < 1 {
      panic!("Ruta setup error: top requires max_results >= 1, got {max_results}");
    }
    if !(0.0..=1.0).contains(&tolerance) {
      panic!("Ruta setup error: top tolerance must be within [0, 1], got {tolerance}");
    }
    TopOptions {
      max_results,
      tolerance,
    }
  }
}

impl Default for TopOptions {
  fn default() -> Self {
    TopOptions {
      max_results: usize::MAX,
      tolerance: 0.0,
    }
  }
}

/// Runs all `routers` concurrently and collects every non-`None` route,
/// flattening one level of nested `Multiple` results.
///
/// Zero collected routes yields `Route::None`; exactly one yields that route
/// unwrapped; two or more yield a `Route::Multiple` in argument order
/// (completion order never influences ranking input).
pub fn multiple<In, V>(routers: Vec<Router<In, V>>) -> Router<In, V>
where
  In: Clone + Send + Sync + 'static,
  V: Send + 'static,
{
  Router::new(move |input: In| {
    let routers = routers.clone();
    async move {
      let pending: Vec<_> = routers.iter().map(|r| r.route(input.clone())).collect();
      let outcomes = future::join_all(pending).await;

      let mut collected = Vec::new();
      for outcome in outcomes {
        match outcome? {
          Route::None(_) => {}
          Route::Multiple(nested) => collected.extend(nested.routes),
          route => collected.push(route),
        }
      }

      event!(Level::DEBUG, collected = collected.len(), "multiple: gather complete.");
      match collected.len() {
        0 => Ok(Route::none_because("no router produced a route")),
        1 => {
          // Length checked above.
          let only = collected.pop().unwrap();
          Ok(only)
        }
        _ => Ok(Route::Multiple(MultipleRoute::new(collected))),
      }
    }
  })
}

/// Stable sort of routes by score; descending unless `ascending` is set. Ties
/// keep their original relative order.
pub fn sort_routes<V>(routes: &mut [Route<V>], ascending: bool)
where
  V: Send + 'static,
{
  if ascending {
    routes.sort_by(|a, b| a.score().total_cmp(&b.score()));
  } else {
    routes.sort_by(|a, b| b.score().total_cmp(&a.score()));
  }
}

/// Takes the winning prefix of an already descending-sorted sequence: routes
/// whose score is within `opts.tolerance` of the leading score, capped at
/// `opts.max_results`.
pub fn take_top<V>(routes: Vec<Route<V>>, opts: &TopOptions) -> Vec<Route<V>>
where
  V: Send + 'static,
{
  let Some(leader) = routes.first() else {
    return routes;
  };
  let leading_score = leader.score();
  routes
    .into_iter()
    .take(opts.max_results)
    .take_while(|route| route.score() + opts.tolerance >= leading_score)
    .collect()
}

/// Score-based selection: gather via [`multiple`], rank descending, and keep
/// the single best route within `tolerance` of the top score.
///
/// Zero winners yield `Route::None`. Exactly one winner is returned still
/// wrapped in its scored variant (its score stays available for further
/// composition). Two or more routes tied within `tolerance` come back as a
/// `Route::Multiple` in original order — the tie is surfaced to the caller,
/// never silently broken.
pub fn best<In, V>(tolerance: f64, routers: Vec<Router<In, V>>) -> Router<In, V>
where
  In: Clone + Send + Sync + 'static,
  V: Send + 'static,
{
  // Construction-time validation, matching TopOptions semantics.
  let opts = TopOptions::new(1, tolerance);
  let gathered = multiple(routers);

  Router::new(move |input: In| {
    let gathered = gathered.clone();
    async move {
      match gathered.route(input).await? {
        Route::Multiple(tie) => {
          let mut routes = tie.routes;
          sort_routes(&mut routes, false);
          let leading_score = routes.first().map(Route::score);

          // max_results = 1 bounds the outright winner; the tolerance window
          // decides how many competitors count as tied with it.
          let window = TopOptions {
            max_results: usize::MAX,
            tolerance: opts.tolerance,
          };
          let mut winners = take_top(routes, &window);

          event!(
            Level::DEBUG,
            winners = winners.len(),
            leading_score,
            "best: ranking complete."
          );
          match winners.len() {
            0 => Ok(Route::none()),
            1 => {
              // Length checked above.
              let winner = winners.pop().unwrap();
              Ok(winner)
            }
            _ => Ok(Route::Multiple(MultipleRoute::new(winners))),
          }
        }
        // Zero or one gathered routes: multiple() already reduced them.
        route => Ok(route),
      }
    }
  })
}
