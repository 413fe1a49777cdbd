//! Runs an [`Engine`] as a tokio task.
//!
//! Requests arrive on a channel and commands leave on another. Between
//! requests the task sleeps until the engine's next deadline and polls it.
//! Queued requests are always drained before a tick, so a blur that is
//! immediately followed by focus on a sibling field never reports `blur`.

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::action::Action;
use crate::config::OtpConfig;
use crate::engine::Engine;
use crate::key::InputEvent;
use crate::traits::VariableStore;
use crate::types::Command;

#[derive(Debug, Clone)]
pub enum Request {
    Event(InputEvent),
    Action(Action),
    Reconfigure(OtpConfig),
}

/// Mounts `engine` and serves `requests` until the channel closes or the
/// command receiver goes away, then returns the engine.
///
/// After the request channel closes, work that is already scheduled (a
/// pending blur or a debounced `change`) still runs before returning.
pub async fn run<V: VariableStore>(
    mut engine: Engine<V>,
    mut requests: mpsc::Receiver<Request>,
    commands: mpsc::UnboundedSender<Command>,
) -> Engine<V> {
    if !forward(&commands, engine.mount()) {
        return engine;
    }

    loop {
        let deadline = engine.next_deadline();
        let batch = tokio::select! {
            biased;
            request = requests.recv() => match request {
                Some(request) => apply(&mut engine, request),
                None => break,
            },
            () = sleep_until(deadline), if deadline.is_some() => engine.poll(now()),
        };
        if !forward(&commands, batch) {
            tracing::debug!("command receiver dropped, stopping");
            return engine;
        }
    }

    while let Some(deadline) = engine.next_deadline() {
        sleep_until(Some(deadline)).await;
        if !forward(&commands, engine.poll(now())) {
            break;
        }
    }
    engine
}

fn apply<V: VariableStore>(engine: &mut Engine<V>, request: Request) -> Vec<Command> {
    match request {
        Request::Event(event) => engine.handle_event(event, now()),
        Request::Action(action) => engine.dispatch(action, now()),
        Request::Reconfigure(config) => engine.reconfigure(config),
    }
}

fn forward(commands: &mpsc::UnboundedSender<Command>, batch: Vec<Command>) -> bool {
    batch.into_iter().all(|command| commands.send(command).is_ok())
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

fn sleep_until(deadline: Option<std::time::Instant>) -> time::Sleep {
    time::sleep_until(deadline.map_or_else(Instant::now, Instant::from_std))
}
