// ruta/src/router/conditional.rs

//! Conditional dispatch: `branch` routes on a discriminator's Match/NoRoute
//! outcome, `if_true` specializes it to a boolean discriminator.

use crate::error::RutaError;
use crate::route::model::{MatchRoute, Route};
use crate::router::definition::Router;
use tracing::{event, Level};

/// Runs `get_match`; on a `Match`, dispatches to `on_match` (which receives
/// the full [`MatchRoute`], not just its value) and folds the match's score
/// into the continuation's route multiplicatively. On `None`, dispatches to
/// `on_no_match` when supplied, else passes the `NoRoute` through with its
/// diagnostic reason intact.
///
/// The discriminator's outcome must be binary: any other variant (`Action`,
/// `Named`, `Multiple`) is a contract violation and errors out rather than
/// being swallowed.
pub fn branch<In, V, W>(
  get_match: Router<In, V>,
  on_match: Router<MatchRoute<V>, W>,
  on_no_match: Option<Router<In, W>>,
) -> Router<In, W>
where
  In: Clone + Send + Sync + 'static,
  V: Send + 'static,
  W: Send + 'static,
{
  Router::new(move |input: In| {
    let get_match = get_match.clone();
    let on_match = on_match.clone();
    let on_no_match = on_no_match.clone();
    async move {
      match get_match.route(input.clone()).await? {
        Route::Match(matched) => {
          let match_score = matched.score;
          event!(Level::DEBUG, score = match_score, "branch: discriminator matched.");
          let routed = on_match.route(matched).await?;
          Ok(routed.combined_with(match_score))
        }
        Route::None(no_route) => match on_no_match {
          Some(router) => router.route(input).await,
          None => Ok(Route::None(no_route)),
        },
        other => Err(RutaError::UnexpectedVariant {
          at: "branch",
          expected: "Match or None",
          found: other.variant_name(),
        }),
      }
    }
  })
}

/// `branch` specialized to a boolean discriminator; "a non-boolean
/// discriminator raises" is enforced by the `Router<In, bool>` type.
///
/// `Match(true)` dispatches to `on_true` (score-combined). `Match(false)`
/// falls through as `Route::None` so that `on_false` runs when supplied, or
/// the absence is reported. A discriminator producing `None` behaves like
/// false. Other variants are contract violations.
pub fn if_true<In, W>(
  predicate: Router<In, bool>,
  on_true: Router<In, W>,
  on_false: Option<Router<In, W>>,
) -> Router<In, W>
where
  In: Clone + Send + Sync + 'static,
  W: Send + 'static,
{
  Router::new(move |input: In| {
    let predicate = predicate.clone();
    let on_true = on_true.clone();
    let on_false = on_false.clone();
    async move {
      match predicate.route(input.clone()).await? {
        Route::Match(matched) if matched.value => {
          event!(Level::DEBUG, score = matched.score, "if_true: condition held.");
          let routed = on_true.route(input).await?;
          Ok(routed.combined_with(matched.score))
        }
        Route::Match(_) => match on_false {
          Some(router) => router.route(input).await,
          None => Ok(Route::none_because("condition evaluated to false")),
        },
        Route::None(no_route) => match on_false {
          Some(router) => router.route(input).await,
          None => Ok(Route::None(no_route)),
        },
        other => Err(RutaError::UnexpectedVariant {
          at: "if_true",
          expected: "Match or None",
          found: other.variant_name(),
        }),
      }
    }
  })
}
