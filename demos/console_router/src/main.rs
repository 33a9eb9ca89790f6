// demos/console_router/src/main.rs

//! A minimal console channel adapter built on the ruta core: intent matchers
//! name deferred actions, an `ActionRegistry` binds those names to a reply
//! channel, and each input line is routed and executed.

use anyhow::Result;
use ruta::{args_as, best, first, resolve_actions, ActionRegistry, Route, Router};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// The reply channel only the outermost caller knows about. Matching handlers
/// never see it; they name actions instead.
#[derive(Clone)]
struct ConsoleChannel;

impl ConsoleChannel {
  fn send(&self, message: &str) {
    println!("{message}");
  }
}

fn build_registry() -> Arc<ActionRegistry<ConsoleChannel>> {
  let registry = ActionRegistry::<ConsoleChannel>::new();

  registry.bind("greet", |channel: ConsoleChannel, args| async move {
    let name: String = args_as(&args, "greet")?;
    channel.send(&format!("Hello, {name}!"));
    Ok(())
  });

  registry.bind("echo", |channel: ConsoleChannel, args| async move {
    let text: String = args_as(&args, "echo")?;
    channel.send(&text);
    Ok(())
  });

  registry.bind("help", |channel: ConsoleChannel, _args| async move {
    channel.send("Commands: 'hello <name>', 'say <text>', 'help'.");
    Ok(())
  });

  Arc::new(registry)
}

/// Intent matchers. Each one inspects the line and either names an action
/// with its arguments or produces nothing.
fn build_matchers() -> Router<String, String> {
  let greet = Router::from_sync(|line: String| {
    line
      .strip_prefix("hello ")
      .map(|name| Route::named("greet", name.trim().to_string()).with_score(0.9))
      .unwrap_or_else(Route::none)
  });

  let echo = Router::from_sync(|line: String| {
    line
      .strip_prefix("say ")
      .map(|text| Route::named("echo", text.to_string()).with_score(0.6))
      .unwrap_or_else(Route::none)
  });

  let help = Router::from_sync(|line: String| {
    if line.trim() == "help" {
      Route::named("help", ())
    } else {
      Route::none()
    }
  });

  // "hello"/"say" compete by score; a bare "help" is tried first.
  first(vec![help, best(0.0, vec![greet, echo])])
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let channel = ConsoleChannel;
  let router = resolve_actions(build_matchers(), build_registry(), channel.clone());

  channel.send("console_router ready. Type 'help' for commands, Ctrl-D to exit.");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await? {
    let line = line.trim().to_string();
    if line.is_empty() {
      continue;
    }
    let executed = router.execute(line.clone()).await?;
    if !executed {
      channel.send("I didn't catch that. Type 'help' for commands.");
    }
    info!(input = %line, executed, "Routed one line.");
  }

  Ok(())
}
