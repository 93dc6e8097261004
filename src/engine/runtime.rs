// src/engine/runtime.rs

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info};

use crate::engine::queue::ChangeQueue;
use crate::pipeline::PipelineController;

/// Events sent into the runtime from the watcher or external signals.
///
/// - the watcher sends `SourceChanged`
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    SourceChanged { path: PathBuf },
    ShutdownRequested,
}

/// The main orchestration runtime.
///
/// Responsibilities:
/// - Consume `RuntimeEvent`s from the watcher and the signal handler.
/// - Run pipelines strictly one at a time; the loop suspends for the
///   full duration of each external command.
/// - Apply the queue/coalesce policy for changes that arrive mid-run.
///
/// Shutdown is delivered as an event on the same channel, so it is
/// honored between pipeline runs, never mid-step.
pub struct Runtime {
    events_rx: mpsc::Receiver<RuntimeEvent>,
    controller: PipelineController,
    queue: ChangeQueue,
}

impl Runtime {
    pub fn new(events_rx: mpsc::Receiver<RuntimeEvent>, controller: PipelineController) -> Self {
        Self {
            events_rx,
            controller,
            queue: ChangeQueue::new(),
        }
    }

    /// Main event loop.
    ///
    /// Returns when a shutdown is requested or all event senders are gone.
    pub async fn run(mut self) -> Result<()> {
        info!("watchci runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                RuntimeEvent::SourceChanged { path } => {
                    self.queue.record(path);
                    self.drain_queue().await
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        info!("watchci runtime exiting");
        Ok(())
    }

    /// Run pipelines until the queue is empty, folding in any events that
    /// arrived while a pipeline was running.
    ///
    /// Returns false when a shutdown request was found among them.
    async fn drain_queue(&mut self) -> bool {
        while let Some(path) = self.queue.next() {
            let report = self.controller.run_for_change(&path).await;
            debug!(
                module = %report.module,
                steps = report.steps.len(),
                "pipeline run finished"
            );

            if !self.collect_new_events() {
                return false;
            }
        }
        true
    }

    /// Non-blocking sweep of the event channel into the change queue.
    fn collect_new_events(&mut self) -> bool {
        loop {
            match self.events_rx.try_recv() {
                Ok(RuntimeEvent::SourceChanged { path }) => self.queue.record(path),
                Ok(RuntimeEvent::ShutdownRequested) => {
                    info!("shutdown requested, stopping runtime");
                    return false;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return true,
            }
        }
    }
}
