//! Prime counter shell
//!
//! Reads one command per line from stdin and prints the state after every
//! change. Run with `--help` for options, then type `help`.
//!
//! FRAMEWORK PATTERN: the main loop
//! - The store is owned here and is the only writer of state
//! - Commands become actions; actions go through the store
//! - Effects become keyed tasks; task results come back over a channel and
//!   go through the store like any other action

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use compose_dispatch::{
    ActionFilter, ActionLoggerMiddleware, DispatchResult, StoreWithMiddleware, TaskManager,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use prime_counter::action::AppAction;
use prime_counter::api::{PrimeLookup, WolframAlpha, DEFAULT_ENDPOINT};
use prime_counter::command::{Command, HELP};
use prime_counter::effect::{handle_effect, Effect};
use prime_counter::reducer::app_reducer;
use prime_counter::state::AppState;
use prime_counter::view;

/// Recent actions kept by the action logger
const ACTION_HISTORY: usize = 64;

type AppStore = StoreWithMiddleware<AppState, AppAction, ActionLoggerMiddleware, DispatchResult<Effect>>;

#[derive(Parser, Debug)]
#[command(name = "prime-counter")]
#[command(about = "A counter with favorite primes, driven by composed reducers")]
struct Args {
    /// Wolfram|Alpha app id used by `nth`
    #[arg(long, env = "WOLFRAM_ALPHA_APP_ID")]
    app_id: Option<String>,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Lookup timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Log every dispatched action (at debug level)
    #[arg(long)]
    log_actions: bool,

    /// Only log actions matching these comma-separated globs
    #[arg(long, value_name = "PATTERNS")]
    log_include: Option<String>,

    /// Never log actions matching these comma-separated globs
    #[arg(long, value_name = "PATTERNS")]
    log_exclude: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.log_actions { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if args.app_id.is_none() {
        tracing::warn!("no Wolfram|Alpha app id; `nth` lookups will fail");
    }
    let lookup = WolframAlpha::new(
        args.app_id.clone().unwrap_or_default(),
        args.endpoint.clone(),
        Duration::from_secs(args.timeout_secs),
    )
    .context("failed to build HTTP client")?;
    tracing::info!(endpoint = %lookup.endpoint(), "prime counter starting");

    let logger = ActionLoggerMiddleware::new(ActionFilter::new(
        args.log_include.as_deref(),
        args.log_exclude.as_deref(),
    ))
    .with_history(ACTION_HISTORY)
    .active(args.log_actions);

    let mut store = AppStore::new(AppState::default(), app_reducer(), logger);
    store.subscribe(|state| print!("{}", view::render(state)));

    run(&mut store, &lookup).await?;

    if let Some(history) = store.middleware().history() {
        tracing::debug!(actions = history.len(), "session finished");
    }
    Ok(())
}

async fn run<L>(store: &mut AppStore, lookup: &L) -> Result<()>
where
    L: PrimeLookup + Clone + Send + Sync + 'static,
{
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(action_tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", view::render(store.state()));
    println!("type `help` for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };

                match command {
                    Command::Show => print!("{}", view::render(store.state())),
                    Command::Json => {
                        println!("{}", serde_json::to_string_pretty(store.state())?)
                    }
                    Command::Help => println!("{}", HELP),
                    _ => {}
                }

                match command.action(store.state()) {
                    Ok(Some(action)) => {
                        if !dispatch(store, &mut tasks, lookup, action) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }

            Some(action) = action_rx.recv() => {
                dispatch(store, &mut tasks, lookup, action);
            }
        }
    }

    tasks.cancel_all();
    Ok(())
}

/// Dispatch an action and start its effects. Returns `false` on quit.
fn dispatch<L>(
    store: &mut AppStore,
    tasks: &mut TaskManager<AppAction>,
    lookup: &L,
    action: AppAction,
) -> bool
where
    L: PrimeLookup + Clone + Send + Sync + 'static,
{
    let quit = matches!(action, AppAction::Quit);
    let result = store.dispatch(action);
    for effect in result.effects {
        handle_effect(effect, tasks, lookup);
    }
    !quit
}
