//! Conversion coordinator: the single owner of converter state.

use std::sync::Arc;

use parking_lot::RwLock;
use quickfx_fx::RateProvider;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::metrics::{Metrics, MetricsSnapshot};
use crate::state::{reduce, ConverterState, Disposition, Event, FetchRequest};

/// Drives [`reduce`] and performs the rate fetches it asks for.
///
/// Overlapping fetches are allowed: callers may dispatch several pair changes
/// before executing the resulting requests. Only the latest request's result
/// is applied.
pub struct Coordinator {
    /// Session ID for log correlation.
    session_id: Uuid,
    /// Rate source.
    provider: Arc<dyn RateProvider>,
    /// Current snapshot.
    state: RwLock<ConverterState>,
    /// Publishes every new snapshot.
    updates: watch::Sender<ConverterState>,
    /// Activity counters.
    metrics: Arc<Metrics>,
}

impl Coordinator {
    /// Create a coordinator with default initial state.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self::with_state(provider, ConverterState::default())
    }

    /// Create a coordinator starting from `initial`.
    pub fn with_state(provider: Arc<dyn RateProvider>, initial: ConverterState) -> Self {
        let (updates, _) = watch::channel(initial.clone());

        Self {
            session_id: Uuid::new_v4(),
            provider,
            state: RwLock::new(initial),
            updates,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ConverterState {
        self.state.read().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<ConverterState> {
        self.updates.subscribe()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Apply one event and return the fetch it requires, if any.
    pub fn dispatch(&self, event: Event) -> Option<FetchRequest> {
        self.metrics.event_dispatched();
        let resolved_ok = matches!(&event, Event::RateResolved { outcome: Ok(_), .. });

        let mut state = self.state.write();
        let transition = reduce(&state, event);

        match &transition.disposition {
            Disposition::Applied if resolved_ok => self.metrics.fetch_succeeded(),
            Disposition::Applied | Disposition::Unchanged => {}
            Disposition::AmountRejected => {
                self.metrics.amount_edit_rejected();
                debug!(session_id = %self.session_id, "Amount edit rejected");
            }
            Disposition::RefreshBlocked(reason) => {
                self.metrics.refresh_blocked();
                debug!(session_id = %self.session_id, reason = %reason, "Refresh blocked");
            }
            Disposition::FetchFailed(reason) => {
                self.metrics.fetch_failed();
                warn!(
                    session_id = %self.session_id,
                    pair = %transition.state.pair,
                    error = %reason,
                    "Rate fetch failed"
                );
            }
            Disposition::Stale { seq, latest } => {
                self.metrics.stale_response_dropped();
                warn!(
                    session_id = %self.session_id,
                    seq,
                    latest,
                    "Dropping superseded rate response"
                );
            }
        }

        if let Some(request) = &transition.effect {
            self.metrics.fetch_started();
            debug!(
                session_id = %self.session_id,
                seq = request.seq,
                pair = %request.pair,
                "Rate fetch scheduled"
            );
        }

        if transition.state != *state {
            *state = transition.state;
            self.updates.send_replace(state.clone());
        }

        transition.effect
    }

    /// Perform a fetch and feed its result back in.
    #[instrument(skip(self, request), fields(session_id = %self.session_id, seq = request.seq, pair = %request.pair))]
    pub async fn execute(&self, request: FetchRequest) {
        let outcome = self
            .provider
            .convert(1.0, &request.pair.from, &request.pair.to)
            .await;

        if let Ok(rate) = &outcome {
            info!(rate, provider = self.provider.name(), "Exchange rate received");
        }

        self.dispatch(Event::RateResolved {
            seq: request.seq,
            outcome,
        });
    }

    /// Dispatch an event, run any fetch it triggers, and return the resulting state.
    pub async fn handle(&self, event: Event) -> ConverterState {
        if let Some(request) = self.dispatch(event) {
            self.execute(request).await;
        }
        self.snapshot()
    }

    /// Run the initial refresh for the session.
    pub async fn start(&self) -> ConverterState {
        info!(
            session_id = %self.session_id,
            provider = self.provider.name(),
            "Starting converter session"
        );
        self.handle(Event::Started).await
    }
}
