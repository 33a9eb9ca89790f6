// ruta/src/route/normalize.rs

//! The single normalization entry point every combinator boundary goes
//! through. Raw handler outputs are turned into `Route<V>` values by the
//! [`IntoRoute`] conversions; no combinator re-implements its own type
//! sniffing.

use crate::route::model::{ActionRoute, MatchRoute, NamedRoute, NoRoute, Route};

/// Conversion from a raw handler output into the route algebra.
///
/// The supported shapes mirror the normalization table:
/// - `Option::None` becomes `Route::None`,
/// - an existing `Route<V>` (or variant struct) is taken unchanged,
/// - `Some(value)` becomes a `Match` with score 1,
/// - `(value, score)` becomes a `Match` with the normalized score.
///
/// Action thunks are built through [`Route::action`], which admits only
/// zero-argument closures; there is no runtime arity check to violate.
pub trait IntoRoute<V> {
  fn into_route(self) -> Route<V>;
}

impl<V> IntoRoute<V> for Route<V> {
  fn into_route(self) -> Route<V> {
    self
  }
}

impl<V> IntoRoute<V> for NoRoute {
  fn into_route(self) -> Route<V> {
    Route::None(self)
  }
}

impl<V> IntoRoute<V> for ActionRoute {
  fn into_route(self) -> Route<V> {
    Route::Action(self)
  }
}

impl<V> IntoRoute<V> for MatchRoute<V> {
  fn into_route(self) -> Route<V> {
    Route::Match(self)
  }
}

impl<V> IntoRoute<V> for NamedRoute {
  fn into_route(self) -> Route<V> {
    Route::Named(self)
  }
}

impl<V> IntoRoute<V> for Option<V> {
  fn into_route(self) -> Route<V> {
    match self {
      Some(value) => Route::found(value),
      None => Route::none(),
    }
  }
}

impl<V> IntoRoute<V> for (V, f64) {
  fn into_route(self) -> Route<V> {
    Route::found_with(self.0, self.1)
  }
}

/// Normalizes a raw handler output into a `Route<V>`.
pub fn normalize<V, R: IntoRoute<V>>(raw: R) -> Route<V> {
  raw.into_route()
}
