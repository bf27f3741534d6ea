use tokio::sync::mpsc;

use crate::reconstruct::Reconstruction;

use super::{
    events::{GenerationEvent, RunSignal},
    run::AnnotationRun,
};

/// How a driven run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(Reconstruction),
    Failed(String),
    /// The event stream or the signal consumer went away before a terminal
    /// event. Nothing was committed.
    Cancelled,
}

/// Pumps `events` through `run`, forwarding every signal to `signals`.
///
/// Both channels are unbounded, so the producer never waits on the parser.
/// Suspends only while waiting for the next event. Stops at the first
/// terminal signal. If the event channel closes early, or nobody is
/// listening for signals any more, the run is cancelled and its buffered
/// judgments are dropped.
pub async fn drive(
    mut run: AnnotationRun,
    mut events: mpsc::UnboundedReceiver<GenerationEvent>,
    signals: mpsc::UnboundedSender<RunSignal>,
) -> RunOutcome {
    while let Some(event) = events.recv().await {
        for signal in run.handle(event) {
            let outcome = match &signal {
                RunSignal::Done(reconstruction) => {
                    Some(RunOutcome::Completed(reconstruction.clone()))
                }
                RunSignal::Error(message) => Some(RunOutcome::Failed(message.clone())),
                _ => None,
            };

            if signals.send(signal).is_err() {
                log::debug!("signal receiver dropped; cancelling run");
                run.cancel();
                return RunOutcome::Cancelled;
            }
            if let Some(outcome) = outcome {
                return outcome;
            }
        }
    }

    log::debug!("event stream closed before a terminal event");
    run.cancel();
    RunOutcome::Cancelled
}
