//! Converter state and the pure reducer that advances it.

use quickfx_common::{AmountText, Currency, CurrencyPair, NumericAmount};
use quickfx_fx::FxResult;

use crate::error::RefreshError;

/// Where the current rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No rate requested yet, or the last refresh was blocked.
    Idle,
    /// A fetch for the current pair is in flight.
    Loading,
    /// The rate field holds a rate for the current pair.
    Succeeded,
    /// The last fetch failed; the rate is 0.
    Failed,
}

/// Immutable snapshot of everything the converter knows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    /// Text in the amount field.
    pub amount: AmountText,
    /// Selected currencies.
    pub pair: CurrencyPair,
    /// 1 `pair.from` = `rate` `pair.to`. 0 means not available.
    pub rate: f64,
    /// Fetch lifecycle.
    pub status: FetchStatus,
    /// User-visible error message.
    pub error: Option<String>,
    /// Sequence number of the most recently issued refresh.
    pub latest_request: u64,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            amount: AmountText::default(),
            pair: CurrencyPair::default(),
            rate: 0.0,
            status: FetchStatus::Idle,
            error: None,
            latest_request: 0,
        }
    }
}

impl ConverterState {
    /// Initial state with a specific amount and pair.
    pub fn new(amount: AmountText, pair: CurrencyPair) -> Self {
        Self {
            amount,
            pair,
            ..Default::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn numeric_amount(&self) -> NumericAmount {
        self.amount.numeric()
    }

    /// Amount times rate; 0 when the amount is invalid or no rate is available.
    pub fn converted_amount(&self) -> f64 {
        match self.numeric_amount() {
            NumericAmount::Valid(value) if self.rate != 0.0 => value * self.rate,
            _ => 0.0,
        }
    }

    /// 1 / rate, or `None` while no rate is available.
    pub fn inverse_rate(&self) -> Option<f64> {
        if self.rate > 0.0 {
            Some(1.0 / self.rate)
        } else {
            None
        }
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Session started; runs the first refresh.
    Started,
    /// The amount field changed to this raw text.
    AmountChanged(String),
    /// A new source currency was selected.
    FromChanged(Currency),
    /// A new target currency was selected.
    ToChanged(Currency),
    /// The swap button was pressed.
    Swapped,
    /// The user asked to refresh the rate for the current pair.
    RetryRequested,
    /// A fetch issued as request `seq` completed.
    RateResolved { seq: u64, outcome: FxResult<f64> },
}

/// Rate fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Sequence number to report back in [`Event::RateResolved`].
    pub seq: u64,
    /// Pair to fetch 1 unit of.
    pub pair: CurrencyPair,
}

/// What the reducer did with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// State changed.
    Applied,
    /// Event had no effect.
    Unchanged,
    /// Amount text did not match the allowed pattern.
    AmountRejected,
    /// A refresh stopped before fetching.
    RefreshBlocked(RefreshError),
    /// A fetch completed with an error.
    FetchFailed(RefreshError),
    /// A fetch result arrived for a superseded request.
    Stale { seq: u64, latest: u64 },
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The new snapshot.
    pub state: ConverterState,
    /// Fetch to perform, if any.
    pub effect: Option<FetchRequest>,
    /// Outcome classification.
    pub disposition: Disposition,
}

impl Transition {
    fn unchanged(state: &ConverterState) -> Self {
        Self {
            state: state.clone(),
            effect: None,
            disposition: Disposition::Unchanged,
        }
    }

    fn applied(state: ConverterState) -> Self {
        Self {
            state,
            effect: None,
            disposition: Disposition::Applied,
        }
    }
}

/// Advance `state` by one event.
pub fn reduce(state: &ConverterState, event: Event) -> Transition {
    match event {
        Event::Started | Event::RetryRequested => refresh(state.clone()),

        Event::AmountChanged(text) => match AmountText::parse(&text) {
            Some(amount) if amount == state.amount => Transition::unchanged(state),
            Some(amount) => {
                let was_valid = state.numeric_amount().is_valid();
                let next = ConverterState {
                    amount,
                    ..state.clone()
                };

                // Validity gates the refresh, so a flip either way re-runs it.
                if next.numeric_amount().is_valid() != was_valid {
                    refresh(next)
                } else {
                    Transition::applied(next)
                }
            }
            None => Transition {
                state: state.clone(),
                effect: None,
                disposition: Disposition::AmountRejected,
            },
        },

        Event::FromChanged(from) => {
            change_pair(state, CurrencyPair::new(from, state.pair.to.clone()))
        }

        Event::ToChanged(to) => {
            change_pair(state, CurrencyPair::new(state.pair.from.clone(), to))
        }

        Event::Swapped => change_pair(state, state.pair.swapped()),

        Event::RateResolved { seq, outcome } => resolve(state, seq, outcome),
    }
}

/// Refresh only when the pair actually differs.
fn change_pair(state: &ConverterState, pair: CurrencyPair) -> Transition {
    if pair == state.pair {
        return Transition::unchanged(state);
    }

    refresh(ConverterState {
        pair,
        ..state.clone()
    })
}

/// Rate-refresh procedure for the pair in `state`.
///
/// Every refresh claims a new sequence number, so any fetch still in flight
/// for an earlier pair resolves as stale.
fn refresh(mut state: ConverterState) -> Transition {
    state.latest_request += 1;

    // The amount is not part of the request, but an invalid one still blocks it.
    if !state.numeric_amount().is_valid() {
        let error = RefreshError::InvalidAmount;
        state.error = Some(error.user_message().to_string());
        if state.status == FetchStatus::Loading {
            state.status = FetchStatus::Idle;
        }
        return Transition {
            state,
            effect: None,
            disposition: Disposition::RefreshBlocked(error),
        };
    }

    if state.pair.is_identity() {
        state.rate = 1.0;
        state.error = None;
        state.status = FetchStatus::Succeeded;
        return Transition::applied(state);
    }

    state.status = FetchStatus::Loading;
    state.error = None;
    let effect = FetchRequest {
        seq: state.latest_request,
        pair: state.pair.clone(),
    };

    Transition {
        state,
        effect: Some(effect),
        disposition: Disposition::Applied,
    }
}

fn resolve(state: &ConverterState, seq: u64, outcome: FxResult<f64>) -> Transition {
    if seq != state.latest_request || state.status != FetchStatus::Loading {
        return Transition {
            state: state.clone(),
            effect: None,
            disposition: Disposition::Stale {
                seq,
                latest: state.latest_request,
            },
        };
    }

    let mut next = state.clone();
    match outcome {
        Ok(rate) => {
            next.rate = rate;
            next.status = FetchStatus::Succeeded;
            Transition::applied(next)
        }
        Err(e) => {
            let error = RefreshError::from(e);
            next.rate = 0.0;
            next.status = FetchStatus::Failed;
            next.error = Some(error.user_message().to_string());
            Transition {
                state: next,
                effect: None,
                disposition: Disposition::FetchFailed(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FETCH_FAILED_MESSAGE, INVALID_AMOUNT_MESSAGE};
    use proptest::prelude::*;
    use quickfx_fx::{FetchError, FxError};

    fn started() -> (ConverterState, FetchRequest) {
        let t = reduce(&ConverterState::default(), Event::Started);
        (t.state, t.effect.unwrap())
    }

    fn loaded(rate: f64) -> ConverterState {
        let (state, request) = started();
        reduce(
            &state,
            Event::RateResolved {
                seq: request.seq,
                outcome: Ok(rate),
            },
        )
        .state
    }

    #[test]
    fn test_defaults() {
        let state = ConverterState::default();
        assert_eq!(state.amount.as_str(), "1.00");
        assert_eq!(state.pair, CurrencyPair::new(Currency::usd(), Currency::eur()));
        assert_eq!(state.rate, 0.0);
        assert_eq!(state.status, FetchStatus::Idle);
    }

    #[test]
    fn test_start_issues_fetch() {
        let (state, request) = started();

        assert!(state.is_loading());
        assert_eq!(state.error, None);
        assert_eq!(request.pair, CurrencyPair::default());
        assert_eq!(request.seq, state.latest_request);
    }

    #[test]
    fn test_rate_resolved_success() {
        let mut state = loaded(0.9);
        state = reduce(&state, Event::AmountChanged("100".into())).state;

        assert_eq!(state.status, FetchStatus::Succeeded);
        assert!((state.converted_amount() - 90.0).abs() < 1e-9);
        assert!((state.inverse_rate().unwrap() - 1.0 / 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_rate_resolved_failure() {
        let (state, request) = started();
        let t = reduce(
            &state,
            Event::RateResolved {
                seq: request.seq,
                outcome: Err(FxError::Fetch(FetchError::Status {
                    status: 500,
                    reason: "Internal Server Error".into(),
                })),
            },
        );

        assert_eq!(t.state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(t.state.rate, 0.0);
        assert_eq!(t.state.status, FetchStatus::Failed);
        assert_eq!(t.state.converted_amount(), 0.0);
        assert_eq!(t.state.inverse_rate(), None);
        assert!(matches!(t.disposition, Disposition::FetchFailed(_)));
    }

    #[test]
    fn test_rate_not_found_surfaces_fetch_message() {
        let (state, request) = started();
        let t = reduce(
            &state,
            Event::RateResolved {
                seq: request.seq,
                outcome: Err(FxError::RateNotFound(Currency::eur())),
            },
        );

        assert_eq!(t.state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(t.state.rate, 0.0);
    }

    #[test]
    fn test_amount_change_does_not_refetch() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::AmountChanged("250.5".into()));

        assert!(t.effect.is_none());
        assert_eq!(t.state.amount.as_str(), "250.5");
        assert_eq!(t.state.latest_request, state.latest_request);
    }

    #[test]
    fn test_rejected_amount_keeps_previous_text() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::AmountChanged("abc".into()));

        assert_eq!(t.disposition, Disposition::AmountRejected);
        assert_eq!(t.state, state);
        assert_eq!(t.state.error, None);
    }

    #[test]
    fn test_invalid_amount_blocks_refresh() {
        let state = loaded(0.9);
        let state = reduce(&state, Event::AmountChanged("".into())).state;
        let t = reduce(&state, Event::ToChanged(Currency::gbp()));

        assert!(t.effect.is_none());
        assert_eq!(t.state.error.as_deref(), Some(INVALID_AMOUNT_MESSAGE));
        assert_eq!(t.state.rate, 0.9);
        assert_eq!(t.state.pair.to, Currency::gbp());
        assert_eq!(t.state.converted_amount(), 0.0);
        assert_eq!(
            t.disposition,
            Disposition::RefreshBlocked(RefreshError::InvalidAmount)
        );
    }

    #[test]
    fn test_clearing_amount_shows_error_immediately() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::AmountChanged("".into()));

        assert!(t.effect.is_none());
        assert_eq!(t.state.amount.as_str(), "");
        assert_eq!(t.state.error.as_deref(), Some(INVALID_AMOUNT_MESSAGE));
        assert_eq!(
            t.disposition,
            Disposition::RefreshBlocked(RefreshError::InvalidAmount)
        );
    }

    #[test]
    fn test_valid_amount_after_blocked_refresh_fetches_new_pair() {
        let state = loaded(0.9);
        let state = reduce(&state, Event::AmountChanged("".into())).state;
        let state = reduce(&state, Event::ToChanged(Currency::jpy())).state;

        let t = reduce(&state, Event::AmountChanged("5".into()));
        let request = t.effect.unwrap();

        assert_eq!(request.pair, CurrencyPair::new(Currency::usd(), Currency::jpy()));
        assert_eq!(request.seq, t.state.latest_request);
        assert_eq!(t.state.error, None);
        assert!(t.state.is_loading());

        let t = reduce(
            &t.state,
            Event::RateResolved {
                seq: request.seq,
                outcome: Ok(150.0),
            },
        );
        assert!((t.state.converted_amount() - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_pair_rate_is_one() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::ToChanged(Currency::usd()));

        assert!(t.effect.is_none());
        assert_eq!(t.state.rate, 1.0);
        assert_eq!(t.state.error, None);
        assert_eq!(t.state.status, FetchStatus::Succeeded);
    }

    #[test]
    fn test_reselecting_same_currency_is_noop() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::FromChanged(Currency::usd()));

        assert_eq!(t.disposition, Disposition::Unchanged);
        assert!(t.effect.is_none());
    }

    #[test]
    fn test_swap_refetches_reversed_pair() {
        let state = loaded(0.9);
        let t = reduce(&state, Event::Swapped);
        let request = t.effect.unwrap();

        assert_eq!(request.pair, CurrencyPair::new(Currency::eur(), Currency::usd()));
        assert!(t.state.is_loading());
    }

    #[test]
    fn test_stale_response_dropped() {
        let (state, first) = started();
        let t = reduce(&state, Event::ToChanged(Currency::gbp()));
        let second = t.effect.unwrap();
        let state = t.state;

        let t = reduce(
            &state,
            Event::RateResolved {
                seq: first.seq,
                outcome: Ok(0.9),
            },
        );
        assert_eq!(
            t.disposition,
            Disposition::Stale {
                seq: first.seq,
                latest: second.seq
            }
        );
        assert!(t.state.is_loading());

        let t = reduce(
            &t.state,
            Event::RateResolved {
                seq: second.seq,
                outcome: Ok(0.79),
            },
        );
        assert_eq!(t.state.rate, 0.79);
        assert_eq!(t.state.pair.to, Currency::gbp());
    }

    #[test]
    fn test_retry_refetches_current_pair() {
        let (state, first) = started();
        let state = reduce(
            &state,
            Event::RateResolved {
                seq: first.seq,
                outcome: Err(FxError::Fetch(FetchError::Transport("refused".into()))),
            },
        )
        .state;

        let t = reduce(&state, Event::RetryRequested);
        let retry = t.effect.unwrap();

        assert_eq!(retry.pair, state.pair);
        assert!(retry.seq > first.seq);
        assert_eq!(t.state.error, None);
    }

    fn arb_currency() -> impl Strategy<Value = Currency> {
        prop::sample::select(vec!["USD", "EUR", "GBP", "JPY", "CHF"]).prop_map(Currency::new)
    }

    proptest! {
        #[test]
        fn rejected_edits_leave_amount_unchanged(
            start in "[0-9]{1,4}(\\.[0-9]{1,2})?",
            edit in "[0-9]{0,3}[^0-9.][0-9.]{0,3}",
        ) {
            let state = ConverterState::new(AmountText::parse(&start).unwrap(), CurrencyPair::default());
            let t = reduce(&state, Event::AmountChanged(edit));

            prop_assert_eq!(t.disposition, Disposition::AmountRejected);
            prop_assert_eq!(t.state.amount, state.amount);
        }

        #[test]
        fn swap_twice_restores_pair(from in arb_currency(), to in arb_currency()) {
            let state = ConverterState::new(AmountText::default(), CurrencyPair::new(from, to));
            let once = reduce(&state, Event::Swapped).state;
            let twice = reduce(&once, Event::Swapped).state;

            prop_assert_eq!(twice.pair, state.pair);
        }

        #[test]
        fn identity_pair_never_fetches(code in arb_currency(), amount in "[0-9]{1,5}") {
            let state = ConverterState::new(
                AmountText::parse(&amount).unwrap(),
                CurrencyPair::new(Currency::usd(), Currency::eur()),
            );
            let t = reduce(&state, Event::FromChanged(code.clone()));
            let t = reduce(&t.state, Event::ToChanged(code));

            prop_assert!(t.effect.is_none());
            prop_assert_eq!(t.state.rate, 1.0);
        }
    }
}
