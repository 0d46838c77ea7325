//! Submission state behind the verification UI
//!
//! A [`VerificationSession`] owns the input text and the last accepted
//! report. Front ends call [`VerificationSession::submit`] to start a
//! request, run it however their event loop allows, and hand the outcome
//! back through [`VerificationSession::resolve`]. Several submissions may
//! be in flight at once; the session decides which outcome is shown.

use crate::models::{VerificationResult, VerifyRequest};
use crate::report::ReportView;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Which outcome wins when submissions overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseOrdering {
    /// Only the most recent submission may update the display
    #[default]
    LastSubmitted,
    /// Whatever arrives last is displayed, regardless of submission order
    LastArrived,
}

/// Visible request phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingResponse { seq: u64 },
}

/// A request handed out by [`VerificationSession::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub request: VerifyRequest,
}

/// What happened to an outcome passed to [`VerificationSession::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result replaced the displayed report
    Applied,
    /// The failure is now the displayed error
    Failed,
    /// Superseded by a later submission, dropped
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Status,
    Schema,
    Other,
}

/// User-facing description of a failed submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionError {
    pub seq: u64,
    pub kind: ErrorKind,
    pub message: String,
}

impl SubmissionError {
    pub fn from_core(seq: u64, err: &CoreError) -> Self {
        let (kind, message) = match err {
            CoreError::Http(e) if e.is_timeout() => (
                ErrorKind::Network,
                "The verification service did not respond in time.".to_string(),
            ),
            CoreError::Http(e) => (
                ErrorKind::Network,
                format!("Could not reach the verification service: {}", e),
            ),
            CoreError::Status { status, .. } => (
                ErrorKind::Status,
                format!("The verification service returned an error (HTTP {}).", status),
            ),
            CoreError::Schema(msg) => (
                ErrorKind::Schema,
                format!("The verification service sent an unreadable report: {}", msg),
            ),
            other => (ErrorKind::Other, other.to_string()),
        };
        Self { seq, kind, message }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerificationSession {
    input: String,
    result: Option<VerificationResult>,
    received_at: Option<DateTime<Utc>>,
    error: Option<SubmissionError>,
    ordering: ResponseOrdering,
    last_seq: u64,
    applied_seq: Option<u64>,
    in_flight: BTreeSet<u64>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ordering(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Replace the input text as typed
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Start a submission of the current input
    ///
    /// Never refuses: an empty input is submitted as is, and earlier
    /// submissions may still be in flight.
    pub fn submit(&mut self) -> Submission {
        self.last_seq += 1;
        let seq = self.last_seq;
        self.in_flight.insert(seq);
        debug!(seq, in_flight = self.in_flight.len(), "Submission started");

        Submission {
            seq,
            request: VerifyRequest::new(self.input.clone()),
        }
    }

    /// Hand back the outcome of submission `seq`
    pub fn resolve(&mut self, seq: u64, outcome: CoreResult<VerificationResult>) -> Resolution {
        if !self.in_flight.remove(&seq) {
            debug!(seq, "Ignoring outcome for unknown or already resolved submission");
            return Resolution::Stale;
        }

        if self.ordering == ResponseOrdering::LastSubmitted && seq != self.last_seq {
            debug!(seq, latest = self.last_seq, "Dropping outcome of superseded submission");
            return Resolution::Stale;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.received_at = Some(Utc::now());
                self.error = None;
                self.applied_seq = Some(seq);
                Resolution::Applied
            }
            Err(err) => {
                self.error = Some(SubmissionError::from_core(seq, &err));
                Resolution::Failed
            }
        }
    }

    pub fn phase(&self) -> Phase {
        let awaiting = match self.ordering {
            ResponseOrdering::LastSubmitted => {
                Some(self.last_seq).filter(|seq| self.in_flight.contains(seq))
            }
            ResponseOrdering::LastArrived => self.in_flight.iter().next_back().copied(),
        };
        match awaiting {
            Some(seq) => Phase::AwaitingResponse { seq },
            None => Phase::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase(), Phase::AwaitingResponse { .. })
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    /// Submission whose result is currently displayed
    pub fn applied_seq(&self) -> Option<u64> {
        self.applied_seq
    }

    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_at
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn report(&self) -> Option<ReportView> {
        self.result.as_ref().map(ReportView::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::VerificationService;
    use crate::models::tests::sample_result;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn result_for(text: &str) -> VerificationResult {
        let mut result = sample_result();
        result.explanation = format!("report for {}", text);
        result
    }

    #[test]
    fn test_initial_state() {
        let session = VerificationSession::new();
        assert_eq!(session.input(), "");
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(session.report().is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.ordering(), ResponseOrdering::LastSubmitted);
    }

    #[test]
    fn test_update_input_is_verbatim() {
        let mut session = VerificationSession::new();
        for text in ["a", "", "  padded  ", "line\nbreak", "ünïcödé"] {
            session.update_input(text);
            assert_eq!(session.input(), text);
        }
    }

    #[test]
    fn test_submit_empty_input() {
        let mut session = VerificationSession::new();
        let submission = session.submit();
        assert_eq!(submission.seq, 1);
        assert_eq!(submission.request, VerifyRequest::new(""));
        assert_eq!(session.phase(), Phase::AwaitingResponse { seq: 1 });
    }

    #[test]
    fn test_submit_does_not_clear_input() {
        let mut session = VerificationSession::new();
        session.update_input("claim text");
        let submission = session.submit();
        session.resolve(submission.seq, Ok(result_for("claim text")));
        assert_eq!(session.input(), "claim text");
    }

    #[test]
    fn test_success_replaces_result() {
        let mut session = VerificationSession::new();
        session.update_input("x");
        let first = session.submit();
        assert_eq!(session.resolve(first.seq, Ok(result_for("x"))), Resolution::Applied);
        assert!(session.received_at().is_some());

        session.update_input("y");
        let second = session.submit();
        let mut replacement = result_for("y");
        replacement.claims.truncate(1);
        session.resolve(second.seq, Ok(replacement.clone()));

        assert_eq!(session.result(), Some(&replacement));
        assert_eq!(session.applied_seq(), Some(second.seq));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut session = VerificationSession::new();
        let first = session.submit();
        session.resolve(first.seq, Ok(result_for("x")));

        let second = session.submit();
        let outcome = session.resolve(
            second.seq,
            Err(CoreError::Status {
                status: 503,
                body: String::new(),
            }),
        );

        assert_eq!(outcome, Resolution::Failed);
        assert_eq!(session.result(), Some(&result_for("x")));
        let error = session.error().unwrap();
        assert_eq!(error.kind, ErrorKind::Status);
        assert_eq!(error.seq, second.seq);
        assert!(error.message.contains("503"));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_success_clears_error() {
        let mut session = VerificationSession::new();
        let first = session.submit();
        session.resolve(first.seq, Err(CoreError::Schema("missing field `claims`".into())));
        assert_eq!(session.error().unwrap().kind, ErrorKind::Schema);

        let second = session.submit();
        session.resolve(second.seq, Ok(result_for("x")));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_dismiss_error() {
        let mut session = VerificationSession::new();
        let first = session.submit();
        session.resolve(first.seq, Err(CoreError::Config("bad".into())));
        assert_eq!(session.error().unwrap().kind, ErrorKind::Other);
        session.dismiss_error();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_last_submitted_wins_when_earlier_arrives_late() {
        let mut session = VerificationSession::new();
        session.update_input("x");
        let a = session.submit();
        session.update_input("y");
        let b = session.submit();

        assert_eq!(session.resolve(b.seq, Ok(result_for("y"))), Resolution::Applied);
        assert_eq!(session.resolve(a.seq, Ok(result_for("x"))), Resolution::Stale);

        assert_eq!(session.result().unwrap().explanation, "report for y");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_last_submitted_pending_until_latest_resolves() {
        let mut session = VerificationSession::new();
        let a = session.submit();
        let b = session.submit();

        assert_eq!(session.resolve(a.seq, Ok(result_for("x"))), Resolution::Stale);
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::AwaitingResponse { seq: b.seq });

        session.resolve(b.seq, Ok(result_for("y")));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut session = VerificationSession::new();
        let a = session.submit();
        let b = session.submit();
        session.resolve(b.seq, Ok(result_for("y")));
        let outcome = session.resolve(a.seq, Err(CoreError::Schema("late".into())));
        assert_eq!(outcome, Resolution::Stale);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_last_arrived_ordering() {
        let mut session = VerificationSession::with_ordering(ResponseOrdering::LastArrived);
        session.update_input("x");
        let a = session.submit();
        session.update_input("y");
        let b = session.submit();

        assert_eq!(session.resolve(b.seq, Ok(result_for("y"))), Resolution::Applied);
        assert_eq!(session.phase(), Phase::AwaitingResponse { seq: a.seq });
        assert_eq!(session.resolve(a.seq, Ok(result_for("x"))), Resolution::Applied);

        assert_eq!(session.result().unwrap().explanation, "report for x");
        assert_eq!(session.applied_seq(), Some(a.seq));
    }

    #[test]
    fn test_duplicate_resolution_is_ignored() {
        let mut session = VerificationSession::new();
        let a = session.submit();
        session.resolve(a.seq, Ok(result_for("x")));
        assert_eq!(session.resolve(a.seq, Ok(result_for("again"))), Resolution::Stale);
        assert_eq!(session.resolve(99, Ok(result_for("unknown"))), Resolution::Stale);
        assert_eq!(session.result().unwrap().explanation, "report for x");
    }

    #[test]
    fn test_identical_responses_render_identically() {
        let mut session = VerificationSession::new();
        session.update_input("same");

        let first = session.submit();
        session.resolve(first.seq, Ok(result_for("same")));
        let first_html = session.report().unwrap().to_html();

        let second = session.submit();
        session.resolve(second.seq, Ok(result_for("same")));
        let second_html = session.report().unwrap().to_html();

        assert_eq!(first_html, second_html);
    }

    /// Service double answering after a per-text delay
    struct DelayedService {
        slow_text: &'static str,
    }

    #[async_trait]
    impl VerificationService for DelayedService {
        async fn verify(&self, text: &str) -> CoreResult<VerificationResult> {
            let delay = if text == self.slow_text { 50 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(result_for(text))
        }
    }

    async fn run(
        session: Rc<RefCell<VerificationSession>>,
        service: &DelayedService,
        text: &str,
    ) {
        let submission = {
            let mut session = session.borrow_mut();
            session.update_input(text);
            session.submit()
        };
        let outcome = service.verify(&submission.request.text).await;
        session.borrow_mut().resolve(submission.seq, outcome);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_overlapping_submissions_last_submitted() {
        let service = DelayedService { slow_text: "x" };
        let session = Rc::new(RefCell::new(VerificationSession::new()));

        futures::join!(
            run(session.clone(), &service, "x"),
            run(session.clone(), &service, "y"),
        );

        let session = session.borrow();
        assert_eq!(session.result().unwrap().explanation, "report for y");
        assert!(!session.is_pending());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_overlapping_submissions_last_arrived() {
        let service = DelayedService { slow_text: "x" };
        let session = Rc::new(RefCell::new(VerificationSession::with_ordering(
            ResponseOrdering::LastArrived,
        )));

        futures::join!(
            run(session.clone(), &service, "x"),
            run(session.clone(), &service, "y"),
        );

        assert_eq!(session.borrow().result().unwrap().explanation, "report for x");
    }
}
