// ruta/src/lib.rs

//! Ruta: an asynchronous routing and result-combination engine.
//!
//! Ruta composes candidate handlers — functions that inspect an input and
//! optionally produce a result — into a single router, with:
//!  - A closed `Route` algebra (no-route, action, scored match, named action,
//!    unresolved tie) with normalized confidence scores.
//!  - Sequential chaining with short-circuit (`then`) and without
//!    (`followed_by`).
//!  - Ordered alternation (`first`) with a strict never-start-the-loser
//!    guarantee.
//!  - Concurrent scored selection (`multiple`, `best`) with deterministic tie
//!    handling and a tolerance window.
//!  - Conditional dispatch (`branch`, `if_true`) with multiplicative score
//!    combination.
//!  - Side-effect taps (`tap`) and execution (`do_route`, `Router::execute`).
//!  - Deferred named actions (`ActionRegistry`/`ActionResolver`) that decouple
//!    "what to do" from "how to execute it".

pub mod error;
pub mod registry;
pub mod route;
pub mod router;

// --- Re-exports for the Public API ---

// The route algebra.
pub use crate::route::model::{
  ActionArgs, ActionFn, ActionFuture, ActionRoute, MatchRoute, MultipleRoute, NamedRoute, NoRoute,
  Route,
};
pub use crate::route::normalize::{normalize, IntoRoute};
pub use crate::route::score::{combine_scores, normalized_score};

// The router and its combinators.
pub use crate::router::alternation::first;
pub use crate::router::conditional::{branch, if_true};
pub use crate::router::definition::{Handler, RouteFuture, Router};
pub use crate::router::effects::{do_route, ObserveFuture};
pub use crate::router::scoring::{best, multiple, sort_routes, take_top, TopOptions};
pub use crate::router::sequential::pipe;

// Deferred action resolution.
pub use crate::registry::{args_as, resolve_actions, ActionRegistry, ActionResolver, BoundAction};

pub use crate::error::{RutaError, RutaResult};
