// ruta/src/router/mod.rs

//! The `Router` type and its combinator set.

pub mod alternation;
pub mod conditional;
pub mod definition;
pub mod effects;
pub mod scoring;
pub mod sequential;

pub use alternation::first;
pub use conditional::{branch, if_true};
pub use definition::{Handler, RouteFuture, Router};
pub use effects::{do_route, ObserveFuture};
pub use scoring::{best, multiple, sort_routes, take_top, TopOptions};
pub use sequential::pipe;
