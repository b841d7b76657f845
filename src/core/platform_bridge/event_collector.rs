//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the backend's event queue for one loop iteration.
//
// Architecture:
//   Backend::wait_event(remaining) → dispatch(event) → DrainControl
//
// The wait is bounded by the iteration's deadline, so a steady stream of
// input can delay but never starve the update/render ticks. A hard cap on
// events per iteration covers backends that deliver a burst faster than
// the clock advances.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::Backend;
use crate::core::error::AppResult;
use crate::core::event::Event;

//=== DrainControl ========================================================

/// Returned by the dispatch callback after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrainControl {
    Continue,
    Break,
}

//=== EventCollector ======================================================

/// Pulls events until the deadline, a `Break`, or the burst cap.
pub(crate) struct EventCollector {
    max_events: usize,
}

impl EventCollector {
    pub(crate) const MAX_EVENTS_PER_ITERATION: usize = 256;

    pub(crate) fn new() -> Self {
        Self {
            max_events: Self::MAX_EVENTS_PER_ITERATION,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_cap(max_events: usize) -> Self {
        Self { max_events }
    }

    /// Waits for and dispatches events until `wait_until` passes.
    ///
    /// `wait_until = None` blocks until the first event arrives. Returns
    /// the number of events dispatched; the first dispatch error aborts
    /// the drain and is propagated.
    pub(crate) fn drain<B, F>(
        &mut self,
        backend: &B,
        wait_until: Option<Duration>,
        mut dispatch: F,
    ) -> AppResult<usize>
    where
        B: Backend,
        F: FnMut(Event) -> AppResult<DrainControl>,
    {
        let mut drained = 0;

        loop {
            let timeout = wait_until.map(|deadline| deadline.saturating_sub(backend.now()));

            let Some(event) = backend.wait_event(timeout) else {
                break;
            };

            trace!(target: "app::events", "Dispatching {:?}", event);
            drained += 1;

            if dispatch(event)? == DrainControl::Break {
                break;
            }

            if drained >= self.max_events {
                warn!(
                    target: "app::events",
                    "Event queue backlog: drained {} events this iteration",
                    drained
                );
                break;
            }
        }

        Ok(drained)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
