// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission capture and result panel state.
//!
//! A host may try to (re)attach its submission hook many times, for example
//! whenever its UI is rebuilt. [`SubmissionController`] makes attaching
//! idempotent so one user action always yields exactly one estimation.

use tracing::debug;
use wattcheck_core::HourOfDay;

use crate::engine::{Estimation, EstimationEngine};

/// Receives each captured submission.
pub trait SubmissionHandler {
    type Output;

    fn on_submit(&mut self, query: &str, hour: HourOfDay) -> Self::Output;
}

/// Any engine can be used directly as a handler.
impl SubmissionHandler for EstimationEngine {
    type Output = Estimation;

    fn on_submit(&mut self, query: &str, hour: HourOfDay) -> Estimation {
        self.estimate(query, hour)
    }
}

/// Owns a handler and whether it is currently attached.
pub struct SubmissionController<H> {
    handler: H,
    bound: bool,
}

impl<H: SubmissionHandler> SubmissionController<H> {
    /// A controller that is not yet bound.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            bound: false,
        }
    }

    /// Attach the handler if it is not already attached.
    ///
    /// Returns `true` only on the call that actually bound it.
    pub fn ensure_bound(&mut self) -> bool {
        if self.bound {
            return false;
        }
        self.bound = true;
        debug!("submission handler bound");
        true
    }

    /// Detach the handler. Submissions are ignored until rebound.
    pub fn unbind(&mut self) {
        if self.bound {
            debug!("submission handler unbound");
        }
        self.bound = false;
    }

    /// Deliver one user submission; `None` while unbound.
    pub fn submit(&mut self, query: &str, hour: HourOfDay) -> Option<H::Output> {
        if !self.bound {
            return None;
        }
        Some(self.handler.on_submit(query, hour))
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

/// Whether the detailed breakdown is shown under a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    /// Flip the panel and return the new state.
    pub fn toggle(&mut self) -> PanelState {
        *self = match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        };
        *self
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingHandler {
        engine: EstimationEngine,
        calls: usize,
    }

    impl SubmissionHandler for CountingHandler {
        type Output = Estimation;

        fn on_submit(&mut self, query: &str, hour: HourOfDay) -> Estimation {
            self.calls += 1;
            self.engine.estimate(query, hour)
        }
    }

    fn counting() -> SubmissionController<CountingHandler> {
        SubmissionController::new(CountingHandler {
            engine: EstimationEngine::default(),
            calls: 0,
        })
    }

    #[test]
    fn unbound_controller_ignores_submissions() {
        let mut c = counting();
        assert!(c.submit("hi", HourOfDay(9)).is_none());
        assert_eq!(c.handler().calls, 0);
    }

    #[test]
    fn ensure_bound_is_idempotent() {
        let mut c = counting();
        assert!(c.ensure_bound());
        assert!(!c.ensure_bound());
        assert!(!c.ensure_bound());
        assert!(c.submit("hi", HourOfDay(9)).is_some());
    }

    #[test]
    fn repeated_binding_never_duplicates_evaluation() {
        let mut c = counting();
        for _ in 0..5 {
            c.ensure_bound();
        }
        assert!(c.submit("hi", HourOfDay(9)).is_some());
        assert_eq!(c.handler().calls, 1);
    }

    #[test]
    fn unbind_then_rebind() {
        let mut c = counting();
        c.ensure_bound();
        c.unbind();
        assert!(c.submit("hi", HourOfDay(9)).is_none());
        assert!(c.ensure_bound());
        assert!(c.submit("hi", HourOfDay(9)).is_some());
        assert_eq!(c.handler().calls, 1);
    }

    #[test]
    fn engine_is_a_handler() {
        let mut c = SubmissionController::new(EstimationEngine::default());
        c.ensure_bound();
        let e = c.submit("hi", HourOfDay(9)).unwrap();
        assert_eq!(e.assistant.score, 5);
    }

    #[test]
    fn panel_toggles() {
        let mut p = PanelState::default();
        assert!(!p.is_expanded());
        assert_eq!(p.toggle(), PanelState::Expanded);
        assert!(p.is_expanded());
        assert_eq!(p.toggle(), PanelState::Collapsed);
    }
}
