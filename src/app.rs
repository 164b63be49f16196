use std::sync::Arc;

use crate::categories::CategoryFilter;
use crate::domain::FactRepository;
use crate::errors::RepoError;
use crate::form::NewFactForm;
use crate::list::{self, FactListView};
use crate::models::{Fact, VoteKind};

/// The single user-facing failure signal. Every backend failure surfaces as
/// one of these, uniformly; none is swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    FetchFailed,
    SubmitFailed,
    VoteFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::FetchFailed => "There was a problem getting data",
            Notice::SubmitFailed => "There was a problem saving your recipe",
            Notice::VoteFailed => "There was a problem recording your vote",
        }
    }
}

/// Handle for one in-flight fetch. Carries the sequence number that decides,
/// at completion time, whether the response is still the authoritative one.
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    filter: CategoryFilter,
}

/// Top-level state coordinator: owns the shared fact collection, the loading
/// and form-visibility flags, the active category filter, and the injected
/// backend handle. All mutation happens through its methods; the event loop
/// driving them serializes access.
pub struct App {
    repo: Arc<dyn FactRepository>,
    facts: Vec<Fact>,
    is_loading: bool,
    show_form: bool,
    form: NewFactForm,
    current_category: CategoryFilter,
    fetch_seq: u64,
    pending_vote: Option<i64>,
    notice: Option<Notice>,
}

impl App {
    pub fn new(repo: Arc<dyn FactRepository>) -> Self {
        Self {
            repo,
            facts: Vec::new(),
            is_loading: false,
            show_form: false,
            form: NewFactForm::new(),
            current_category: CategoryFilter::All,
            fetch_seq: 0,
            pending_vote: None,
            notice: None,
        }
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    pub fn form(&self) -> &NewFactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NewFactForm {
        &mut self.form
    }

    pub fn current_category(&self) -> &CategoryFilter {
        &self.current_category
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Consumes the pending notice, if any. The UI alerts once per notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    /// Label of the single open/close button above the form.
    pub fn form_toggle_label(&self) -> &'static str {
        if self.show_form { "Close" } else { "Share your recipe" }
    }

    /// Projects the collection into the list view, marking the row whose
    /// vote round-trip is in flight.
    pub fn list_view(&self) -> FactListView {
        list::render(&self.facts, self.pending_vote)
    }

    // --- Fetch flow ---
    //
    // Split-phase so a driver owning the event loop can run several fetches
    // concurrently: rapid category switches issue increasing sequence
    // numbers, and only the latest-issued response is applied when it lands.

    /// Records the new active category, marks the shell loading, and hands
    /// back the ticket for this fetch.
    pub fn begin_fetch(&mut self, filter: CategoryFilter) -> FetchTicket {
        self.current_category = filter.clone();
        self.is_loading = true;
        self.fetch_seq += 1;
        FetchTicket { seq: self.fetch_seq, filter }
    }

    /// The network phase; owns no shell state.
    pub async fn run_fetch(&self, ticket: &FetchTicket) -> Result<Vec<Fact>, RepoError> {
        self.repo.list(&ticket.filter).await
    }

    /// Applies a completed fetch. A response whose ticket is not the
    /// latest-issued is stale and discarded outright, leaving the loading
    /// flag to the fetch that superseded it. On success the collection is
    /// replaced wholesale; on failure a notice is raised and the collection
    /// is left untouched.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Fact>, RepoError>) {
        if ticket.seq != self.fetch_seq {
            tracing::debug!(
                stale_seq = ticket.seq,
                current_seq = self.fetch_seq,
                "Discarding stale fetch response"
            );
            return;
        }
        self.is_loading = false;
        match result {
            Ok(facts) => {
                tracing::debug!(count = facts.len(), category = %ticket.filter.label(), "Facts loaded");
                self.facts = facts;
            }
            Err(error) => {
                tracing::warn!(%error, category = %ticket.filter.label(), "Fetch failed");
                self.notice = Some(Notice::FetchFailed);
            }
        }
    }

    /// Convenience path for a driver without concurrent fetches: the initial
    /// load and every subsequent filter click go through here.
    pub async fn select_category(&mut self, filter: CategoryFilter) {
        let ticket = self.begin_fetch(filter);
        let result = self.run_fetch(&ticket).await;
        self.finish_fetch(ticket, result);
    }

    // --- Submission flow ---

    /// Submits the form. An invalid draft is a silent no-op: no network call,
    /// no state change. On success the persisted row is prepended to the
    /// collection, the fields are cleared, and the form is hidden; on failure
    /// a notice is raised and the form stays open with its fields intact.
    pub async fn submit_form(&mut self) {
        let draft = match self.form.draft() {
            Ok(draft) => draft,
            Err(reason) => {
                tracing::debug!(%reason, "Draft rejected, nothing submitted");
                return;
            }
        };

        self.form.set_uploading(true);
        let result = self.repo.insert(&draft).await;
        self.form.set_uploading(false);

        match result {
            Ok(fact) => {
                tracing::info!(fact_id = fact.id, "Recipe submitted");
                self.facts.insert(0, fact);
                self.form.reset();
                self.show_form = false;
            }
            Err(error) => {
                tracing::warn!(%error, "Insert failed");
                self.notice = Some(Notice::SubmitFailed);
            }
        }
    }

    // --- Vote flow ---

    /// Casts one vote on a fact. The new count is the currently displayed
    /// value plus one; on success the backend's returned row replaces the
    /// displayed one, so the tally always reflects backend state rather than
    /// a speculative local increment. A second click on a row whose vote is
    /// still in flight is ignored.
    pub async fn cast_vote(&mut self, id: i64, kind: VoteKind) {
        if self.pending_vote == Some(id) {
            return;
        }
        let Some(current) = self.facts.iter().find(|f| f.id == id).map(|f| kind.count_in(f))
        else {
            tracing::warn!(fact_id = id, "Vote for a fact not in the collection");
            return;
        };

        self.pending_vote = Some(id);
        let result = self.repo.set_vote(id, kind, current + 1).await;
        self.pending_vote = None;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.facts.iter_mut().find(|f| f.id == id) {
                    *slot = updated;
                }
            }
            Err(error) => {
                tracing::warn!(%error, fact_id = id, "Vote failed");
                self.notice = Some(Notice::VoteFailed);
            }
        }
    }
}
