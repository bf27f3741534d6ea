//! # Review Session
//!
//! One document's evolving annotated text, its pending changes and its undo
//! history.
//!
//! The annotated body is the single source of truth. The plain text is always
//! `recover(annotated)` and the change list is always `parse(annotated)`; both
//! are re-derived after every mutation rather than patched, so change indices
//! and offsets are only valid until the next mutation.
//!
//! ## Lifecycle
//!
//! ```text
//! Plain --run--> Pending(N) --resolve--> Pending(N-1) ... --> Plain
//!   ^                |
//!   +------undo------+
//! ```
//!
//! A completed run replaces the whole pending set; unresolved changes from an
//! earlier run are dropped (they are still in the undo history).
//!
//! Every resolution hands `header + plain` to the [`PersistenceSink`]. A failed
//! save is reported in [`Resolved::persisted`] and never rolls anything back.

pub mod error;
pub mod history;
pub mod sink;

use uuid::Uuid;

use crate::codec::{self, ChangeRecord, Decision};
use crate::reconstruct::{OutputMode, Reconstruction};
use crate::segment::{Segmented, segment, split_header};
use crate::stream::AnnotationRun;

pub use error::SessionError;
pub use history::{History, Snapshot};
pub use sink::{Persisted, PersistenceSink, SinkError};

pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Result of a resolution or undo.
#[derive(Debug)]
pub struct Resolved {
    /// Changes still pending afterwards.
    pub pending: usize,
    pub persisted: Persisted,
}

/// Permission to run one annotation pass over the session's current text.
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub id: Uuid,
    /// The plain document, segmented when the run began.
    pub document: Segmented,
}

impl RunTicket {
    /// A stream parser over this ticket's segmentation.
    pub fn annotation_run(&self, mode: OutputMode) -> AnnotationRun {
        AnnotationRun::new(self.document.clone(), mode)
    }
}

pub struct Session {
    header: Option<String>,
    annotated: String,
    plain: String,
    changes: Vec<ChangeRecord>,
    history: History,
    active_run: Option<Uuid>,
    sink: Option<Box<dyn PersistenceSink>>,
    version: u64,
}

impl Session {
    /// Starts a session over `document`. Nothing is pending until a run
    /// completes.
    pub fn new(document: &str, history_depth: usize) -> Self {
        let (header, body) = split_header(document);
        Self {
            header: header.map(str::to_string),
            annotated: body.to_string(),
            plain: body.to_string(),
            changes: vec![],
            history: History::new(history_depth),
            active_run: None,
            sink: None,
            version: 0,
        }
    }

    pub fn with_sink(mut self, sink: impl PersistenceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The body with pending changes in place.
    pub fn annotated(&self) -> &str {
        &self.annotated
    }

    /// The body with every pending change rejected.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Header plus plain body: what gets saved.
    pub fn document(&self) -> String {
        self.with_header(&self.plain)
    }

    /// Header plus annotated body.
    pub fn annotated_document(&self) -> String {
        self.with_header(&self.annotated)
    }

    pub fn changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Incremented on every mutation, undo and completed run.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn run_active(&self) -> bool {
        self.active_run.is_some()
    }

    pub fn accept(&mut self, index: usize) -> Result<Resolved, SessionError> {
        self.resolve_one(index, |c| c.resolve(Decision::Accepted).to_string())
    }

    pub fn reject(&mut self, index: usize) -> Result<Resolved, SessionError> {
        self.resolve_one(index, |c| c.resolve(Decision::Rejected).to_string())
    }

    /// Accepts change `index` with `text` in place of its proposed insertion.
    pub fn accept_edited(&mut self, index: usize, text: &str) -> Result<Resolved, SessionError> {
        self.resolve_one(index, |c| {
            c.with_inserted(text)
                .resolve(Decision::Accepted)
                .to_string()
        })
    }

    pub fn accept_all(&mut self) -> Result<Resolved, SessionError> {
        self.resolve_all(Decision::Accepted)
    }

    pub fn reject_all(&mut self) -> Result<Resolved, SessionError> {
        self.resolve_all(Decision::Rejected)
    }

    /// Restores the state before the last mutation or completed run.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Resolved> {
        let snapshot = self.history.pop()?;
        log::debug!("undo: {} changes pending again", snapshot.changes.len());
        self.annotated = snapshot.annotated;
        self.plain = snapshot.plain;
        self.changes = snapshot.changes;
        self.version += 1;
        Some(Resolved {
            pending: self.pending(),
            persisted: self.persist(),
        })
    }

    /// Claims the session for one annotation run.
    pub fn begin_run(&mut self) -> Result<RunTicket, SessionError> {
        if self.active_run.is_some() {
            return Err(SessionError::RunActive);
        }
        let id = Uuid::new_v4();
        self.active_run = Some(id);
        log::debug!("run {id} started");
        Ok(RunTicket {
            id,
            document: segment(&self.document()),
        })
    }

    /// Commits a finished run, replacing every pending change.
    ///
    /// Fails with [`SessionError::StaleRun`] if the ticket is not the active
    /// run, or if the plain text was changed while the run was in flight. The
    /// guard is released either way once the ticket matches.
    pub fn complete_run(
        &mut self,
        ticket: RunTicket,
        reconstruction: Reconstruction,
    ) -> Result<usize, SessionError> {
        self.release(&ticket)?;
        if ticket.document.body != self.plain {
            log::warn!("run {} finished against outdated text; discarded", ticket.id);
            return Err(SessionError::StaleRun);
        }

        self.history.push(self.snapshot());
        self.annotated = reconstruction.annotated_body;
        self.rederive();
        self.version += 1;
        log::info!(
            "run {} committed: {} changes pending, {} warnings",
            ticket.id,
            self.pending(),
            reconstruction.warnings.len()
        );
        Ok(self.pending())
    }

    /// Releases the run guard without committing anything.
    pub fn abort_run(&mut self, ticket: RunTicket) -> Result<(), SessionError> {
        self.release(&ticket)?;
        log::debug!("run {} aborted", ticket.id);
        Ok(())
    }

    fn release(&mut self, ticket: &RunTicket) -> Result<(), SessionError> {
        match self.active_run {
            None => Err(SessionError::NoActiveRun),
            Some(id) if id != ticket.id => Err(SessionError::StaleRun),
            Some(_) => {
                self.active_run = None;
                Ok(())
            }
        }
    }

    fn resolve_one(
        &mut self,
        index: usize,
        replacement: impl FnOnce(&ChangeRecord) -> String,
    ) -> Result<Resolved, SessionError> {
        self.check_changes()?;
        let change = self
            .changes
            .get(index)
            .ok_or(SessionError::NoSuchChange {
                index,
                pending: self.changes.len(),
            })?;

        let mut annotated = String::with_capacity(self.annotated.len());
        annotated.push_str(&self.annotated[..change.span.start]);
        annotated.push_str(&replacement(change));
        annotated.push_str(&self.annotated[change.span.end..]);
        Ok(self.commit(annotated))
    }

    fn resolve_all(&mut self, decision: Decision) -> Result<Resolved, SessionError> {
        if self.changes.is_empty() {
            return Ok(Resolved {
                pending: 0,
                persisted: Persisted::Skipped,
            });
        }
        self.check_changes()?;
        let annotated = codec::rewrite(&self.annotated, &self.changes, |c| {
            c.resolve(decision).to_string()
        });
        Ok(self.commit(annotated))
    }

    fn commit(&mut self, annotated: String) -> Resolved {
        self.history.push(self.snapshot());
        self.annotated = annotated;
        self.rederive();
        self.version += 1;
        Resolved {
            pending: self.pending(),
            persisted: self.persist(),
        }
    }

    fn rederive(&mut self) {
        self.plain = codec::recover(&self.annotated);
        self.changes = codec::parse(&self.annotated);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            annotated: self.annotated.clone(),
            plain: self.plain.clone(),
            changes: self.changes.clone(),
        }
    }

    fn persist(&mut self) -> Persisted {
        let document = self.document();
        let Some(sink) = self.sink.as_mut() else {
            return Persisted::Skipped;
        };
        match sink.save(&document) {
            Ok(()) => Persisted::Saved,
            Err(e) => {
                log::warn!("{e}");
                Persisted::Failed(e)
            }
        }
    }

    /// Changes must be in order, non-overlapping and point at their own text.
    fn check_changes(&self) -> Result<(), SessionError> {
        let mut previous_end = 0;
        for change in &self.changes {
            let span = change.span;
            if span.start < previous_end {
                return Err(SessionError::Invariant(format!(
                    "change {} at {}..{} overlaps the previous change",
                    change.index, span.start, span.end
                )));
            }
            if self.annotated.get(span.range()) != Some(change.raw.as_str()) {
                return Err(SessionError::Invariant(format!(
                    "change {} at {}..{} no longer matches the annotated text",
                    change.index, span.start, span.end
                )));
            }
            previous_end = span.end;
        }
        Ok(())
    }

    fn with_header(&self, body: &str) -> String {
        match &self.header {
            Some(header) => format!("{header}{body}"),
            None => body.to_string(),
        }
    }
}
