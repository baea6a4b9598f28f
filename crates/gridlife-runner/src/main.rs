//! Headless driver for the Gridlife engines.
//!
//! Plays the outside collaborators of the engines: a timer that calls
//! `step`, a renderer that prints each frame, and (for Snake) an input
//! source that steers between steps.

mod autopilot;
mod telemetry;

use anyhow::{Context, Result};
use gridlife_core::{Error, Mode, RunnerConfig};
use gridlife_world::{render, Automaton, ConwayEngine, SnakeEngine};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = RunnerConfig::load(path.as_deref()).context("failed to load runner config")?;

    info!(
        mode = ?config.mode,
        step_delay_ms = config.step_delay_ms(),
        max_steps = ?config.max_steps,
        "Starting Gridlife runner"
    );

    match config.mode {
        Mode::Conway => {
            let mut engine = ConwayEngine::new(config.conway.clone())?;
            let births = engine.populate_random(config.conway.initial_density)?;
            info!(births, "Seeded Conway grid");
            drive(Arc::new(Mutex::new(engine)), &config, |_| {}).await
        }
        Mode::Snake => {
            let mut engine = SnakeEngine::new(config.snake.clone())?;
            engine.toggle_running();
            let steer = config.autopilot;
            drive(Arc::new(Mutex::new(engine)), &config, move |engine: &mut SnakeEngine| {
                if steer {
                    let direction = autopilot::choose_direction(engine);
                    engine.set_direction(direction);
                }
            })
            .await
        }
    }
}

/// Run the tick task until it finishes or a shutdown signal arrives, then
/// report the final state.
async fn drive<A, F>(engine: Arc<Mutex<A>>, config: &RunnerConfig, steer: F) -> Result<()>
where
    A: Automaton + Send + 'static,
    F: FnMut(&mut A) + Send + 'static,
{
    let ticker = tokio::spawn(run_ticks(
        engine.clone(),
        config.step_delay_ms(),
        config.max_steps,
        steer,
    ));

    tokio::select! {
        joined = ticker => {
            match joined {
                Ok(Ok(steps)) => info!(steps, "Run complete"),
                Ok(Err(e)) => error!("Run failed: {}", e),
                Err(e) => error!("Tick task aborted: {}", e),
            }
        }
        _ = shutdown_signal() => {
            info!("Stopping runner");
        }
    }

    let engine = engine.lock();
    info!(automaton = engine.label(), status = %engine.status(), "Final state");
    Ok(())
}

/// Step the engine on a fixed interval. The lock is held for the whole
/// step so input and rendering never observe a half-applied generation.
async fn run_ticks<A, F>(
    engine: Arc<Mutex<A>>,
    step_delay_ms: u64,
    max_steps: Option<u64>,
    mut steer: F,
) -> Result<u64>
where
    A: Automaton + Send + 'static,
    F: FnMut(&mut A) + Send + 'static,
{
    let mut ticker = interval(Duration::from_millis(step_delay_ms));
    let mut steps = 0u64;

    loop {
        ticker.tick().await;

        let (screen, finished) = {
            let mut engine = engine.lock();
            steer(&mut *engine);
            let finished = match engine.advance() {
                Ok(_) => engine.is_finished(),
                Err(Error::NoFreePlacement) => {
                    warn!("Grid is full, nothing left to place");
                    true
                }
                Err(e) => return Err(e.into()),
            };
            (render::screen(&*engine), finished)
        };

        steps += 1;
        println!("{}\n", screen);

        if finished || max_steps.map_or(false, |max| steps >= max) {
            return Ok(steps);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
