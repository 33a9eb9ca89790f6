// ruta/src/registry.rs

//! Deferred action references: a table of named action bindings, resolved
//! against a caller-supplied context at execution time.
//!
//! A matching handler often must not directly call the side effect it picks,
//! because the effect needs a context (a reply channel, a test double) that
//! only the caller of the whole routing pipeline knows. Handlers therefore
//! return a lightweight `NamedRoute { name, args }`; a later stage with the
//! context in hand resolves the name through a registry into an invokable
//! `ActionRoute`. Resolving an unknown name is an error, never a silent no-op.

use crate::error::{RutaError, RutaResult};
use crate::route::model::{ActionArgs, ActionFn, ActionFuture, ActionRoute, MultipleRoute, NamedRoute, Route};
use crate::router::definition::Router;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, Level};

/// A bound action: invoked with the resolution context and the argument
/// payload the matching handler attached to its `NamedRoute`.
pub type BoundAction<Ctx> = dyn Fn(Ctx, ActionArgs) -> Pin<Box<dyn Future<Output = RutaResult<()>> + Send>>
  + Send
  + Sync;

/// Resolves a [`NamedRoute`] into an invokable [`ActionRoute`] against a
/// context. [`ActionRegistry`] is the standard implementation; substituting a
/// custom resolver (a remote lookup, a recording test double) changes how
/// names bind without touching the routing logic that produced them.
#[async_trait]
pub trait ActionResolver<Ctx>: Send + Sync
where
  Ctx: Send + 'static,
{
  async fn resolve(&self, named: &NamedRoute, ctx: Ctx) -> RutaResult<ActionRoute>;
}

/// A table of named action bindings keyed by name.
pub struct ActionRegistry<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  bindings: RwLock<HashMap<String, Arc<BoundAction<Ctx>>>>,
}

impl<Ctx> ActionRegistry<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    ActionRegistry {
      bindings: RwLock::new(HashMap::new()),
    }
  }

  /// Binds `name` to an action. Binding the same name twice is a programming
  /// error (a typo or a duplicated setup path) and panics immediately.
  pub fn bind<F, Fut>(&self, name: impl Into<String>, action: F)
  where
    F: Fn(Ctx, ActionArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RutaResult<()>> + Send + 'static,
  {
    let name = name.into();
    let mut bindings = self.bindings.write();
    if bindings.contains_key(&name) {
      panic!("Ruta setup error: action '{}' is already bound.", name);
    }
    event!(Level::DEBUG, action = %name, "Binding named action.");
    let bound: Arc<BoundAction<Ctx>> = Arc::new(
      move |ctx: Ctx, args: ActionArgs| -> Pin<Box<dyn Future<Output = RutaResult<()>> + Send>> {
        Box::pin(action(ctx, args))
      },
    );
    bindings.insert(name, bound);
  }

  /// Looks up `named.name` and closes the binding over `ctx` and the route's
  /// arguments, yielding an `ActionRoute` that carries the named route's
  /// score. Fails with [`RutaError::UnknownAction`] on a missing name.
  pub fn resolve_named(&self, named: &NamedRoute, ctx: Ctx) -> RutaResult<ActionRoute> {
    let binding = self
      .bindings
      .read()
      .get(&named.name)
      .cloned()
      .ok_or_else(|| RutaError::UnknownAction {
        name: named.name.clone(),
      })?;

    event!(Level::DEBUG, action = %named.name, source = ?named.source, "Resolved named action.");
    let args = Arc::clone(&named.args);
    let action: ActionFn = Arc::new(move || -> ActionFuture {
      let binding = Arc::clone(&binding);
      let ctx = ctx.clone();
      let args = Arc::clone(&args);
      Box::pin(async move { binding(ctx, args).await })
    });
    Ok(ActionRoute {
      action,
      score: named.score,
    })
  }
}

impl<Ctx> Default for ActionRegistry<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl<Ctx> ActionResolver<Ctx> for ActionRegistry<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  async fn resolve(&self, named: &NamedRoute, ctx: Ctx) -> RutaResult<ActionRoute> {
    self.resolve_named(named, ctx)
  }
}

/// Adapts `router` so every `Named` route it produces — including members of
/// a `Multiple` tie — is resolved into an invokable `Action` route against
/// `ctx`. Other variants pass through unchanged.
pub fn resolve_actions<In, V, Ctx>(
  router: Router<In, V>,
  resolver: Arc<dyn ActionResolver<Ctx>>,
  ctx: Ctx,
) -> Router<In, V>
where
  In: Send + 'static,
  V: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
{
  Router::new(move |input: In| {
    let router = router.clone();
    let resolver = Arc::clone(&resolver);
    let ctx = ctx.clone();
    async move {
      let route = router.route(input).await?;
      resolve_route(route, resolver.as_ref(), ctx).await
    }
  })
}

async fn resolve_route<V, Ctx>(
  route: Route<V>,
  resolver: &dyn ActionResolver<Ctx>,
  ctx: Ctx,
) -> RutaResult<Route<V>>
where
  V: Send + 'static,
  Ctx: Clone + Send + 'static,
{
  match route {
    Route::Named(named) => Ok(Route::Action(resolver.resolve(&named, ctx).await?)),
    Route::Multiple(tie) => {
      let mut resolved = Vec::with_capacity(tie.routes.len());
      for member in tie.routes {
        match member {
          Route::Named(named) => {
            resolved.push(Route::Action(resolver.resolve(&named, ctx.clone()).await?));
          }
          other => resolved.push(other),
        }
      }
      Ok(Route::Multiple(MultipleRoute::new(resolved)))
    }
    other => Ok(other),
  }
}

/// Downcasts a named action's argument payload to `T`, failing with a typed
/// error when the handler and the binding disagree about the payload type.
pub fn args_as<T>(args: &ActionArgs, action_name: &str) -> RutaResult<T>
where
  T: Clone + 'static,
{
  args
    .downcast_ref::<T>()
    .cloned()
    .ok_or_else(|| RutaError::ArgsTypeMismatch {
      action_name: action_name.to_string(),
      expected_type: std::any::type_name::<T>().to_string(),
    })
}
