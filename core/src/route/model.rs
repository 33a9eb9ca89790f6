// ruta/src/route/model.rs

//! The `Route<V>` algebra: the closed set of outcomes a handler can produce.
//!
//! Routes are immutable value objects. A route's variant is fixed at
//! construction; "changing" a score goes through a consuming constructor
//! (`with_score`, `combined_with`), never in-place mutation. A route lives for
//! a single routing invocation: combinators consume routes to build new ones,
//! and `do_route` ends an `Action` route's life by running its thunk.

use crate::route::score::{combine_scores, normalized_score};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future produced by invoking an `ActionFn` thunk.
pub type ActionFuture = Pin<Box<dyn Future<Output = crate::error::RutaResult<()>> + Send>>;

/// A zero-argument, side-effecting async thunk. The thunk closes over
/// everything it needs; nothing is passed in at execution time.
pub type ActionFn = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// Opaque, shared argument payload for a named action, downcast at execution
/// time via [`crate::registry::args_as`].
pub type ActionArgs = Arc<dyn Any + Send + Sync>;

/// A handler explicitly produced nothing comparable to a usable outcome.
/// Carries an optional human-readable reason for diagnostics; absence is not
/// a failure and must flow through combinators untouched.
#[derive(Debug, Clone)]
pub struct NoRoute {
  pub reason: Option<String>,
  pub score: f64,
}

impl NoRoute {
  pub fn new() -> Self {
    NoRoute {
      reason: None,
      score: 1.0,
    }
  }

  pub fn because(reason: impl Into<String>) -> Self {
    NoRoute {
      reason: Some(reason.into()),
      score: 1.0,
    }
  }
}

impl Default for NoRoute {
  fn default() -> Self {
    Self::new()
  }
}

/// An invokable side effect selected by routing, to be run later by
/// [`crate::router::effects::do_route`].
#[derive(Clone)]
pub struct ActionRoute {
  pub action: ActionFn,
  pub score: f64,
}

impl fmt::Debug for ActionRoute {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ActionRoute")
      .field("action", &"<thunk>")
      .field("score", &self.score)
      .finish()
  }
}

/// A matched value with a confidence score in (0, 1].
#[derive(Debug, Clone)]
pub struct MatchRoute<V> {
  pub value: V,
  pub score: f64,
}

impl<V> MatchRoute<V> {
  pub fn new(value: V) -> Self {
    MatchRoute { value, score: 1.0 }
  }

  pub fn with_score(value: V, score: f64) -> Self {
    MatchRoute {
      value,
      score: normalized_score(Some(score)),
    }
  }
}

/// A reference to a named, not-yet-resolved action plus its call arguments.
///
/// A handler returns a `NamedRoute` instead of invoking anything, so the
/// action can later be resolved against a context (a reply channel, a test
/// double) that was not available at match time. Resolution happens only
/// through an [`crate::registry::ActionResolver`] lookup, never directly.
#[derive(Clone)]
pub struct NamedRoute {
  pub name: String,
  pub args: ActionArgs,
  pub source: Option<String>,
  pub score: f64,
}

impl NamedRoute {
  pub fn new(name: impl Into<String>, args: impl Any + Send + Sync) -> Self {
    NamedRoute {
      name: name.into(),
      args: Arc::new(args),
      source: None,
      score: 1.0,
    }
  }

  pub fn with_score(mut self, score: f64) -> Self {
    self.score = normalized_score(Some(score));
    self
  }

  pub fn with_source(mut self, source: impl Into<String>) -> Self {
    self.source = Some(source.into());
    self
  }
}

impl fmt::Debug for NamedRoute {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NamedRoute")
      .field("name", &self.name)
      .field("source", &self.source)
      .field("score", &self.score)
      .finish()
  }
}

/// An unresolved tie among two or more scored routes. Intermediate ranking
/// state only: `do_route` refuses to execute it, and tie-break is left to the
/// caller.
#[derive(Debug, Clone)]
pub struct MultipleRoute<V> {
  pub routes: Vec<Route<V>>,
}

impl<V> MultipleRoute<V> {
  /// Invariant: a `MultipleRoute` holds at least two routes. Combinators only
  /// build one after checking the count, so this is asserted, not validated.
  pub fn new(routes: Vec<Route<V>>) -> Self {
    debug_assert!(routes.len() >= 2, "MultipleRoute requires at least two routes");
    MultipleRoute { routes }
  }
}

/// The tagged-variant outcome of evaluating a handler.
#[derive(Debug, Clone)]
pub enum Route<V> {
  None(NoRoute),
  Action(ActionRoute),
  Match(MatchRoute<V>),
  Named(NamedRoute),
  Multiple(MultipleRoute<V>),
}

impl<V> Route<V> {
  /// A route carrying nothing, with no diagnostic reason.
  pub fn none() -> Self {
    Route::None(NoRoute::new())
  }

  /// A route carrying nothing, with a diagnostic reason.
  pub fn none_because(reason: impl Into<String>) -> Self {
    Route::None(NoRoute::because(reason))
  }

  /// Wraps a zero-argument async thunk as an `Action` route. This is the only
  /// way to build one, so the thunk cannot take arguments by construction.
  pub fn action<F, Fut>(thunk: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = crate::error::RutaResult<()>> + Send + 'static,
  {
    let action: ActionFn = Arc::new(move || -> ActionFuture { Box::pin(thunk()) });
    Route::Action(ActionRoute { action, score: 1.0 })
  }

  /// A matched value with score 1.
  pub fn found(value: V) -> Self {
    Route::Match(MatchRoute::new(value))
  }

  /// A matched value with an explicit score; the score is normalized into
  /// (0, 1].
  pub fn found_with(value: V, score: f64) -> Self {
    Route::Match(MatchRoute::with_score(value, score))
  }

  /// A deferred reference to the action registered under `name`.
  pub fn named(name: impl Into<String>, args: impl Any + Send + Sync) -> Self {
    Route::Named(NamedRoute::new(name, args))
  }

  pub fn is_none(&self) -> bool {
    matches!(self, Route::None(_))
  }

  /// The variant's score. `Multiple` reports its best member's score.
  pub fn score(&self) -> f64 {
    match self {
      Route::None(r) => r.score,
      Route::Action(r) => r.score,
      Route::Match(r) => r.score,
      Route::Named(r) => r.score,
      Route::Multiple(m) => m
        .routes
        .iter()
        .map(Route::score)
        .fold(f64::MIN, f64::max),
    }
  }

  /// Short variant name, used in `UnexpectedVariant` diagnostics.
  pub fn variant_name(&self) -> &'static str {
    match self {
      Route::None(_) => "None",
      Route::Action(_) => "Action",
      Route::Match(_) => "Match",
      Route::Named(_) => "Named",
      Route::Multiple(_) => "Multiple",
    }
  }

  /// Returns the same route with its score replaced (normalized).
  pub fn with_score(self, score: f64) -> Self {
    let score = normalized_score(Some(score));
    match self {
      Route::None(mut r) => {
        r.score = score;
        Route::None(r)
      }
      Route::Action(mut r) => {
        r.score = score;
        Route::Action(r)
      }
      Route::Match(mut r) => {
        r.score = score;
        Route::Match(r)
      }
      Route::Named(mut r) => {
        r.score = score;
        Route::Named(r)
      }
      Route::Multiple(m) => Route::Multiple(MultipleRoute {
        routes: m.routes.into_iter().map(|r| r.with_score(score)).collect(),
      }),
    }
  }

  /// Folds an outer score into this route multiplicatively. This is the single
  /// arithmetic rule for composing confidences across nested scored contexts.
  pub fn combined_with(self, outer_score: f64) -> Self {
    match self {
      Route::Multiple(m) => Route::Multiple(MultipleRoute {
        routes: m
          .routes
          .into_iter()
          .map(|r| r.combined_with(outer_score))
          .collect(),
      }),
      route => {
        let combined = combine_scores(route.score(), outer_score);
        route.with_score(combined)
      }
    }
  }

  pub fn as_match(&self) -> Option<&MatchRoute<V>> {
    match self {
      Route::Match(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_named(&self) -> Option<&NamedRoute> {
    match self {
      Route::Named(n) => Some(n),
      _ => None,
    }
  }

  pub fn as_multiple(&self) -> Option<&MultipleRoute<V>> {
    match self {
      Route::Multiple(m) => Some(m),
      _ => None,
    }
  }
}
