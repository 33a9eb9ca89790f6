// ruta/src/route/mod.rs

//! The route model: variants, score arithmetic, and normalization.

pub mod model;
pub mod normalize;
pub mod score;

pub use model::{
  ActionArgs, ActionFn, ActionFuture, ActionRoute, MatchRoute, MultipleRoute, NamedRoute, NoRoute,
  Route,
};
pub use normalize::{normalize, IntoRoute};
pub use score::{combine_scores, normalized_score};
