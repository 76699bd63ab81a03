//! Client-side practice flow.
//!
//! `idle → searched → occupation selected → scenario active`, held as an
//! explicit `Stage` value. At most one request is outstanding; each one is
//! identified by a `Ticket`. Starting a new request supersedes the previous
//! one, and a completion carrying a superseded ticket is ignored, so a slow
//! response can never overwrite what a newer action put on screen.
//!
//! Stages only move forward when the request behind them succeeds. A failure
//! clears the loading state, sets a message and leaves everything else as it was.

use thiserror::Error;

use crate::models::occupation::Occupation;
use crate::models::scenario::Scenario;

pub const NO_RESULTS_MESSAGE: &str = "No matching jobs found. Try a different search term.";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search for jobs. Please try again.";
pub const SCENARIOS_FAILED_MESSAGE: &str = "Failed to generate scenarios. Please try again.";
pub const FEEDBACK_FAILED_MESSAGE: &str =
    "Unable to generate feedback at this time. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Scenarios,
    Feedback,
}

/// Identifies one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    id: u64,
    kind: RequestKind,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Whether a completion changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was superseded or cancelled; nothing changed.
    Stale,
}

/// Which panel a scenario-active view shows below the answer box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Feedback,
    Example,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    Searched {
        results: Vec<Occupation>,
    },
    OccupationSelected {
        results: Vec<Occupation>,
        occupation: Occupation,
        scenarios: Vec<Scenario>,
    },
    ScenarioActive {
        results: Vec<Occupation>,
        occupation: Occupation,
        scenarios: Vec<Scenario>,
        active: usize,
        response: String,
        feedback: Option<String>,
        view: View,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("no {0} to choose from yet")]
    NotAvailable(&'static str),

    #[error("choice {index} is out of range (1-{len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
struct Pending {
    ticket: Ticket,
    /// Occupation being loaded by a scenarios request.
    occupation: Option<Occupation>,
}

/// One browser-tab's worth of practice state. Nothing here outlives the session.
#[derive(Debug)]
pub struct Session {
    stage: Stage,
    pending: Option<Pending>,
    next_ticket: u64,
    message: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            pending: None,
            next_ticket: 0,
            message: None,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Last user-facing notice (no results, or a failed step).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True while a request of `kind` is outstanding. Drives disabled buttons.
    pub fn is_loading(&self, kind: RequestKind) -> bool {
        self.pending.as_ref().is_some_and(|p| p.ticket.kind == kind)
    }

    /// The occupation whose scenarios are being loaded, if any.
    pub fn loading_occupation(&self) -> Option<&Occupation> {
        self.pending.as_ref().and_then(|p| p.occupation.as_ref())
    }

    pub fn results(&self) -> &[Occupation] {
        match &self.stage {
            Stage::Idle => &[],
            Stage::Searched { results }
            | Stage::OccupationSelected { results, .. }
            | Stage::ScenarioActive { results, .. } => results,
        }
    }

    pub fn occupation(&self) -> Option<&Occupation> {
        match &self.stage {
            Stage::OccupationSelected { occupation, .. }
            | Stage::ScenarioActive { occupation, .. } => Some(occupation),
            _ => None,
        }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        match &self.stage {
            Stage::OccupationSelected { scenarios, .. }
            | Stage::ScenarioActive { scenarios, .. } => scenarios,
            _ => &[],
        }
    }

    pub fn active_scenario(&self) -> Option<&Scenario> {
        match &self.stage {
            Stage::ScenarioActive {
                scenarios, active, ..
            } => scenarios.get(*active),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&str> {
        match &self.stage {
            Stage::ScenarioActive { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<&str> {
        match &self.stage {
            Stage::ScenarioActive { feedback, .. } => feedback.as_deref(),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<View> {
        match &self.stage {
            Stage::ScenarioActive { view, .. } => Some(*view),
            _ => None,
        }
    }

    /// Drops the outstanding request; its completion will be `Stale`.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn issue(&mut self, kind: RequestKind, occupation: Option<Occupation>) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            kind,
        };
        self.pending = Some(Pending { ticket, occupation });
        self.message = None;
        ticket
    }

    /// Takes the pending request if `ticket` is still the current one.
    fn settle(&mut self, ticket: Ticket) -> Option<Pending> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }

    // ── search ──────────────────────────────────────────────────────────────

    pub fn begin_search(&mut self, query: &str) -> Result<Ticket, FlowError> {
        if query.trim().is_empty() {
            return Err(FlowError::EmptyInput("job title"));
        }
        Ok(self.issue(RequestKind::Search, None))
    }

    /// A successful search replaces everything downstream, even with zero hits.
    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Occupation>, String>,
    ) -> Completion {
        if self.settle(ticket).is_none() {
            return Completion::Stale;
        }
        match outcome {
            Ok(results) => {
                if results.is_empty() {
                    self.message = Some(NO_RESULTS_MESSAGE.to_string());
                }
                self.stage = Stage::Searched { results };
            }
            Err(_) => self.message = Some(SEARCH_FAILED_MESSAGE.to_string()),
        }
        Completion::Applied
    }

    // ── occupation → scenarios ──────────────────────────────────────────────

    /// Starts loading scenarios for search result `index` (0-based).
    pub fn begin_select(&mut self, index: usize) -> Result<Ticket, FlowError> {
        let results = self.results();
        if results.is_empty() {
            return Err(FlowError::NotAvailable("occupations"));
        }
        let occupation = results.get(index).cloned().ok_or(FlowError::OutOfRange {
            index: index + 1,
            len: results.len(),
        })?;
        Ok(self.issue(RequestKind::Scenarios, Some(occupation)))
    }

    pub fn finish_select(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Scenario>, String>,
    ) -> Completion {
        let Some(pending) = self.settle(ticket) else {
            return Completion::Stale;
        };
        match (outcome, pending.occupation) {
            (Ok(scenarios), Some(occupation)) => {
                self.stage = Stage::OccupationSelected {
                    results: self.results().to_vec(),
                    occupation,
                    scenarios,
                };
            }
            _ => self.message = Some(SCENARIOS_FAILED_MESSAGE.to_string()),
        }
        Completion::Applied
    }

    // ── scenario → answer → feedback ────────────────────────────────────────

    /// Makes scenario `index` (0-based) active, clearing any previous answer
    /// and feedback. An outstanding feedback request is cancelled.
    pub fn choose_scenario(&mut self, index: usize) -> Result<(), FlowError> {
        let (results, occupation, scenarios) = match &self.stage {
            Stage::OccupationSelected {
                results,
                occupation,
                scenarios,
            }
            | Stage::ScenarioActive {
                results,
                occupation,
                scenarios,
                ..
            } => (results.clone(), occupation.clone(), scenarios.clone()),
            _ => return Err(FlowError::NotAvailable("scenarios")),
        };
        if index >= scenarios.len() {
            return Err(FlowError::OutOfRange {
                index: index + 1,
                len: scenarios.len(),
            });
        }
        if self.is_loading(RequestKind::Feedback) {
            self.cancel();
        }
        self.stage = Stage::ScenarioActive {
            results,
            occupation,
            scenarios,
            active: index,
            response: String::new(),
            feedback: None,
            view: View::Feedback,
        };
        Ok(())
    }

    pub fn set_response(&mut self, text: &str) -> Result<(), FlowError> {
        match &mut self.stage {
            Stage::ScenarioActive { response, .. } => {
                *response = text.to_string();
                Ok(())
            }
            _ => Err(FlowError::NotAvailable("active scenario")),
        }
    }

    pub fn begin_feedback(&mut self) -> Result<Ticket, FlowError> {
        match self.response() {
            None => Err(FlowError::NotAvailable("active scenario")),
            Some(r) if r.trim().is_empty() => Err(FlowError::EmptyInput("response")),
            Some(_) => Ok(self.issue(RequestKind::Feedback, None)),
        }
    }

    pub fn finish_feedback(&mut self, ticket: Ticket, outcome: Result<String, String>) -> Completion {
        if self.settle(ticket).is_none() {
            return Completion::Stale;
        }
        match (outcome, &mut self.stage) {
            (Ok(text), Stage::ScenarioActive { feedback, view, .. }) => {
                *feedback = Some(text);
                *view = View::Feedback;
            }
            _ => self.message = Some(FEEDBACK_FAILED_MESSAGE.to_string()),
        }
        Completion::Applied
    }

    pub fn show(&mut self, wanted: View) -> Result<(), FlowError> {
        match &mut self.stage {
            Stage::ScenarioActive { view, .. } => {
                *view = wanted;
                Ok(())
            }
            _ => Err(FlowError::NotAvailable("active scenario")),
        }
    }

    /// Flips between feedback and the example answer. Never issues a request,
    /// so feedback already received stays on the session.
    pub fn toggle_view(&mut self) -> Result<View, FlowError> {
        let next = match self.view() {
            Some(View::Feedback) => View::Example,
            Some(View::Example) => View::Feedback,
            None => return Err(FlowError::NotAvailable("active scenario")),
        };
        self.show(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::scenario::ScenarioKind;

    fn occupations() -> Vec<Occupation> {
        vec![
            Occupation {
                code: "41-2011.00".to_string(),
                title: "Cashiers".to_string(),
            },
            Occupation {
                code: "41-2021.00".to_string(),
                title: "Counter and Rental Clerks".to_string(),
            },
        ]
    }

    fn scenarios() -> Vec<Scenario> {
        (0..5)
            .map(|i| Scenario {
                kind: ScenarioKind::Email,
                title: format!("Scenario {i}"),
                prompt: "Reply to the customer".to_string(),
                tips: vec!["Be polite".to_string()],
                example: "Dear customer...".to_string(),
                criteria: vec!["Tone".to_string()],
            })
            .collect()
    }

    /// A session with search results, scenarios loaded and scenario 0 active.
    fn active_session() -> Session {
        let mut session = Session::new();
        let t = session.begin_search("cashier").unwrap();
        session.finish_search(t, Ok(occupations()));
        let t = session.begin_select(0).unwrap();
        session.finish_select(t, Ok(scenarios()));
        session.choose_scenario(0).unwrap();
        session
    }

    #[test]
    fn test_happy_path_walks_all_stages() {
        let mut session = Session::new();
        assert_eq!(session.stage(), &Stage::Idle);

        let t = session.begin_search("Cashier").unwrap();
        assert!(session.is_loading(RequestKind::Search));
        assert_eq!(session.finish_search(t, Ok(occupations())), Completion::Applied);
        assert!(matches!(session.stage(), Stage::Searched { .. }));
        assert!(!session.is_loading(RequestKind::Search));

        let t = session.begin_select(0).unwrap();
        assert_eq!(session.loading_occupation().unwrap().title, "Cashiers");
        session.finish_select(t, Ok(scenarios()));
        assert_eq!(session.occupation().unwrap().code, "41-2011.00");
        assert_eq!(session.scenarios().len(), 5);

        session.choose_scenario(0).unwrap();
        session.set_response("Hello. I can help. Thank you.").unwrap();
        let t = session.begin_feedback().unwrap();
        session.finish_feedback(t, Ok("STRENGTHS: ... OVERALL: ...".to_string()));

        assert_eq!(session.feedback(), Some("STRENGTHS: ... OVERALL: ..."));
        assert_eq!(session.view(), Some(View::Feedback));
        assert_eq!(session.message(), None);
    }

    #[test]
    fn test_empty_query_is_rejected_without_request() {
        let mut session = Session::new();
        assert_eq!(
            session.begin_search("   "),
            Err(FlowError::EmptyInput("job title"))
        );
        assert!(!session.is_loading(RequestKind::Search));
    }

    #[test]
    fn test_search_with_no_hits_sets_message() {
        let mut session = Session::new();
        let t = session.begin_search("zzz").unwrap();
        session.finish_search(t, Ok(vec![]));

        assert_eq!(session.message(), Some(NO_RESULTS_MESSAGE));
        assert_eq!(session.begin_select(0), Err(FlowError::NotAvailable("occupations")));
    }

    #[test]
    fn test_failed_scenarios_keep_previous_state() {
        let mut session = active_session();
        session.set_response("draft answer").unwrap();
        let before = session.stage().clone();

        let t = session.begin_select(1).unwrap();
        session.finish_select(t, Err("500".to_string()));

        assert_eq!(session.stage(), &before);
        assert_eq!(session.message(), Some(SCENARIOS_FAILED_MESSAGE));
        assert!(!session.is_loading(RequestKind::Scenarios));
    }

    #[test]
    fn test_new_search_clears_downstream_only_on_success() {
        let mut session = active_session();

        let t = session.begin_search("clerk").unwrap();
        session.finish_search(t, Err("timeout".to_string()));
        assert!(session.active_scenario().is_some());
        assert_eq!(session.message(), Some(SEARCH_FAILED_MESSAGE));

        let t = session.begin_search("clerk").unwrap();
        session.finish_search(t, Ok(occupations()));
        assert!(matches!(session.stage(), Stage::Searched { .. }));
        assert!(session.scenarios().is_empty());
        assert_eq!(session.message(), None);
    }

    #[test]
    fn test_superseded_response_is_stale() {
        let mut session = Session::new();
        let old = session.begin_search("cashier").unwrap();
        let new = session.begin_search("clerk").unwrap();

        let late = vec![Occupation {
            code: "99-9999.00".to_string(),
            title: "Stale".to_string(),
        }];
        assert_eq!(session.finish_search(old, Ok(late)), Completion::Stale);
        assert_eq!(session.stage(), &Stage::Idle);
        assert!(session.is_loading(RequestKind::Search));

        assert_eq!(session.finish_search(new, Ok(occupations())), Completion::Applied);
        assert_eq!(session.results()[0].title, "Cashiers");
    }

    #[test]
    fn test_search_supersedes_pending_scenarios() {
        let mut session = Session::new();
        let t = session.begin_search("cashier").unwrap();
        session.finish_search(t, Ok(occupations()));

        let scenarios_ticket = session.begin_select(0).unwrap();
        let _search = session.begin_search("clerk").unwrap();

        assert_eq!(
            session.finish_select(scenarios_ticket, Ok(scenarios())),
            Completion::Stale
        );
        assert!(session.scenarios().is_empty());
    }

    #[test]
    fn test_choosing_scenario_clears_answer_and_cancels_feedback() {
        let mut session = active_session();
        session.set_response("my answer").unwrap();
        let t = session.begin_feedback().unwrap();

        session.choose_scenario(2).unwrap();

        assert_eq!(session.response(), Some(""));
        assert_eq!(session.active_scenario().unwrap().title, "Scenario 2");
        assert!(!session.is_loading(RequestKind::Feedback));
        assert_eq!(
            session.finish_feedback(t, Ok("late feedback".to_string())),
            Completion::Stale
        );
        assert_eq!(session.feedback(), None);
    }

    #[test]
    fn test_feedback_requires_answer_and_failure_keeps_answer() {
        let mut session = active_session();
        assert_eq!(session.begin_feedback(), Err(FlowError::EmptyInput("response")));

        session.set_response("I will fix it.").unwrap();
        let t = session.begin_feedback().unwrap();
        session.finish_feedback(t, Err("502".to_string()));

        assert_eq!(session.response(), Some("I will fix it."));
        assert_eq!(session.feedback(), None);
        assert_eq!(session.message(), Some(FEEDBACK_FAILED_MESSAGE));
    }

    #[test]
    fn test_cancel_makes_completion_stale() {
        let mut session = Session::new();
        let t = session.begin_search("cashier").unwrap();
        session.cancel();
        assert_eq!(session.finish_search(t, Ok(occupations())), Completion::Stale);
    }

    #[test]
    fn test_view_toggle_and_range_checks() {
        let mut session = active_session();
        session.show(View::Example).unwrap();
        assert_eq!(session.view(), Some(View::Example));

        assert_eq!(
            session.choose_scenario(9),
            Err(FlowError::OutOfRange { index: 10, len: 5 })
        );
        assert_eq!(
            Session::new().show(View::Example),
            Err(FlowError::NotAvailable("active scenario"))
        );
    }

    #[test]
    fn test_toggle_view_returns_to_received_feedback() {
        let mut session = active_session();
        session.set_response("Sorry, I will fix it.").unwrap();
        let t = session.begin_feedback().unwrap();
        session.finish_feedback(t, Ok("STRENGTHS: clear apology.".to_string()));

        assert_eq!(session.toggle_view(), Ok(View::Example));
        assert_eq!(session.view(), Some(View::Example));
        assert_eq!(session.toggle_view(), Ok(View::Feedback));

        assert_eq!(session.feedback(), Some("STRENGTHS: clear apology."));
        assert!(!session.is_loading(RequestKind::Feedback));
        assert_eq!(
            Session::new().toggle_view(),
            Err(FlowError::NotAvailable("active scenario"))
        );
    }
}
