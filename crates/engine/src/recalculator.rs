use crate::error::EngineError;
use crate::pipeline::Pipeline;
use events::{Evaluation, Outcome};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use validator::RawInput;

/// Turns a raw form into an evaluation. Runs on the blocking thread pool.
type Evaluate = Arc<dyn Fn(&RawInput) -> Evaluation + Send + Sync>;

/// The newest submitted form, tagged with its sequence number.
#[derive(Debug, Clone, Default)]
struct Request {
    sequence: u64,
    input: Option<RawInput>,
}

/// A debounced, last-request-wins recalculation service.
///
/// Submissions overwrite each other: the background task waits until no new
/// request has arrived for the debounce period, evaluates only the newest one,
/// and publishes its outcome. If another request lands while an evaluation is
/// running, that evaluation's outcome is dropped instead of published.
pub struct Recalculator {
    requests: watch::Sender<Request>,
    outcomes: watch::Receiver<Option<Arc<Outcome>>>,
    task: JoinHandle<()>,
}

impl Recalculator {
    /// Spawns the background task on the current tokio runtime.
    pub fn spawn(pipeline: Pipeline, debounce: Duration) -> Self {
        Self::spawn_with(debounce, move |raw: &RawInput| pipeline.evaluate_raw(raw))
    }

    /// Like `spawn`, with a custom evaluation step.
    pub fn spawn_with<F>(debounce: Duration, evaluate: F) -> Self
    where
        F: Fn(&RawInput) -> Evaluation + Send + Sync + 'static,
    {
        let (requests, request_rx) = watch::channel(Request::default());
        let (outcome_tx, outcomes) = watch::channel(None);

        let task = tokio::spawn(run(Arc::new(evaluate), debounce, request_rx, outcome_tx));
        tracing::info!(debounce_ms = debounce.as_millis() as u64, "Recalculator started.");

        Self {
            requests,
            outcomes,
            task,
        }
    }

    /// Submits a new form, superseding any request that has not been surfaced
    /// yet. Returns the sequence number of the submission.
    pub fn submit(&self, input: RawInput) -> u64 {
        let mut sequence = 0;
        self.requests.send_modify(|request| {
            request.sequence += 1;
            request.input = Some(input);
            sequence = request.sequence;
        });
        tracing::debug!(sequence, "Recalculation requested.");
        sequence
    }

    /// A receiver that observes every surfaced outcome.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Outcome>>> {
        self.outcomes.clone()
    }

    /// The most recently surfaced outcome, if any.
    pub fn latest(&self) -> Option<Arc<Outcome>> {
        self.outcomes.borrow().clone()
    }

    /// Stops accepting requests, evaluates a request still waiting out its
    /// debounce period, and waits for the background task to finish.
    pub async fn shutdown(self) -> Result<(), EngineError> {
        let Recalculator { requests, task, .. } = self;
        drop(requests);
        task.await?;
        tracing::info!("Recalculator stopped.");
        Ok(())
    }
}

async fn run(
    evaluate: Evaluate,
    debounce: Duration,
    mut requests: watch::Receiver<Request>,
    outcomes: watch::Sender<Option<Arc<Outcome>>>,
) {
    let mut closed = false;
    while !closed {
        if requests.changed().await.is_err() {
            break;
        }

        // Every new submission restarts the quiet period.
        loop {
            tokio::select! {
                _ = sleep(debounce) => break,
                changed = requests.changed() => {
                    if changed.is_err() {
                        closed = true;
                        break;
                    }
                }
            }
        }

        let request = requests.borrow_and_update().clone();
        let Some(input) = request.input else {
            continue;
        };

        let evaluation = {
            let evaluate = Arc::clone(&evaluate);
            match tokio::task::spawn_blocking(move || evaluate(&input)).await {
                Ok(evaluation) => evaluation,
                Err(error) => {
                    tracing::error!(sequence = request.sequence, %error, "Recalculation aborted.");
                    continue;
                }
            }
        };

        if !closed && requests.has_changed().unwrap_or(false) {
            tracing::debug!(
                sequence = request.sequence,
                "Discarding stale outcome; a newer request arrived."
            );
            continue;
        }

        tracing::debug!(
            sequence = request.sequence,
            completed = evaluation.is_completed(),
            "Publishing recalculation outcome."
        );
        outcomes.send_replace(Some(Arc::new(Outcome::new(request.sequence, evaluation))));
    }
}
