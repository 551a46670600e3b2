//! List View state machine.
//!
//! The view owns a [`ListState`] and turns each [`ListCommand`] it yields
//! into exactly one backend request. Fetch results carry the
//! [`FetchTicket`] they were issued with, so a response that arrives after a
//! newer fetch started is dropped instead of overwriting fresher data.

use super::error::ApiError;
use super::normalizer::Row;
use serde_json::Value;

/// One displayed row plus the source document it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub row: Row,
    pub record: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Fetch(FetchTicket),
    Delete { id: String },
}

/// Result of executing one [`ListCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<ListItem>, ApiError>,
    },
    Deleted(Result<(), ApiError>),
}

pub const FETCH_FAILED: &str = "Failed to load data. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    generation: u64,
    loading: bool,
    settled_once: bool,
    items: Vec<ListItem>,
    error: Option<String>,
    open_menu: Option<String>,
    pending_delete: Option<String>,
    deleting: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the first fetch has settled, and during any refetch.
    pub fn is_loading(&self) -> bool {
        self.loading || !self.settled_once
    }

    pub fn is_empty(&self) -> bool {
        self.settled_once && self.items.is_empty() && self.error.is_none()
    }

    pub fn item(&self, id: &str) -> Option<&ListItem> {
        self.items.iter().find(|i| i.row.id == id)
    }

    pub fn begin_fetch(&mut self) -> ListCommand {
        self.generation += 1;
        self.loading = true;
        ListCommand::Fetch(FetchTicket(self.generation))
    }

    /// Apply a fetch outcome. Returns false when the ticket is stale.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ListItem>, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.settled_once = true;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                self.items.clear();
                self.error = Some(err.user_message(FETCH_FAILED));
            }
        }
        let menu_gone = self
            .open_menu
            .as_deref()
            .is_some_and(|id| self.item(id).is_none());
        if menu_gone {
            self.open_menu = None;
        }
        true
    }

    pub fn open_menu_id(&self) -> Option<&str> {
        self.open_menu.as_deref()
    }

    /// Toggle the action menu of one row; at most one menu is open.
    pub fn toggle_menu(&mut self, id: &str) {
        if self.open_menu.as_deref() == Some(id) {
            self.open_menu = None;
        } else {
            self.open_menu = Some(id.to_string());
        }
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    /// Delete chosen from a row menu; the view now asks for confirmation.
    pub fn request_delete(&mut self, id: &str) {
        self.open_menu = None;
        if !self.deleting {
            self.pending_delete = Some(id.to_string());
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Outcome of the confirmation prompt. Declining issues nothing.
    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<ListCommand> {
        let id = self.pending_delete.take()?;
        if !confirmed {
            return None;
        }
        self.deleting = true;
        Some(ListCommand::Delete { id })
    }

    /// After the delete call: refetch on success, keep the rows on failure.
    pub fn on_delete_result(&mut self, result: Result<(), ApiError>) -> Option<ListCommand> {
        self.deleting = false;
        match result {
            Ok(()) => {
                self.error = None;
                Some(self.begin_fetch())
            }
            Err(err) => {
                self.error = Some(err.user_message(DELETE_FAILED));
                None
            }
        }
    }

    /// A form reported success; the list reloads.
    pub fn on_saved(&mut self) -> ListCommand {
        self.begin_fetch()
    }

    /// Whether a fetch result with this ticket would still be applied.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Fold the outcome of an executed command back in and return the
    /// follow-up command, if any.
    pub fn settle(&mut self, outcome: CommandOutcome) -> Option<ListCommand> {
        match outcome {
            CommandOutcome::Fetched { ticket, result } => {
                self.apply_fetch(ticket, result);
                None
            }
            CommandOutcome::Deleted(result) => self.on_delete_result(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizer::Cell;

    fn item(id: &str) -> ListItem {
        ListItem {
            row: Row::new(id, vec![("name", Cell::Text(id.to_uppercase()))]),
            record: serde_json::json!({ "_id": id }),
        }
    }

    fn ticket(cmd: ListCommand) -> FetchTicket {
        match cmd {
            ListCommand::Fetch(t) => t,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn loading_until_first_fetch_settles() {
        let mut list = ListState::new();
        assert!(list.is_loading());
        let t = ticket(list.begin_fetch());
        assert!(list.apply_fetch(t, Ok(vec![])));
        assert!(!list.is_loading());
        assert!(list.is_empty());
    }

    #[test]
    fn stale_fetch_is_dropped() {
        let mut list = ListState::new();
        let first = ticket(list.begin_fetch());
        let second = ticket(list.begin_fetch());
        assert!(list.apply_fetch(second, Ok(vec![item("b")])));
        assert!(!list.apply_fetch(first, Ok(vec![item("a")])));
        assert_eq!(list.items()[0].row.id, "b");
    }

    #[test]
    fn fetch_error_clears_rows_and_shows_message() {
        let mut list = ListState::new();
        let t = ticket(list.begin_fetch());
        list.apply_fetch(t, Ok(vec![item("a")]));
        let t = ticket(list.begin_fetch());
        list.apply_fetch(t, Err(ApiError::Transport("offline".into())));
        assert!(list.items().is_empty());
        assert_eq!(list.error(), Some(FETCH_FAILED));
        assert!(!list.is_empty(), "an error is not an empty list");
    }

    #[test]
    fn declined_delete_issues_no_request() {
        let mut list = ListState::new();
        list.request_delete("a");
        assert_eq!(list.pending_delete(), Some("a"));
        assert_eq!(list.resolve_delete(false), None);
        assert_eq!(list.pending_delete(), None);
        assert_eq!(list.resolve_delete(true), None);
    }

    #[test]
    fn confirmed_delete_then_single_refetch() {
        let mut list = ListState::new();
        let t = ticket(list.begin_fetch());
        list.apply_fetch(t, Ok(vec![item("a"), item("b")]));

        list.toggle_menu("a");
        list.request_delete("a");
        assert_eq!(list.open_menu_id(), None);
        assert_eq!(
            list.resolve_delete(true),
            Some(ListCommand::Delete { id: "a".into() })
        );
        let refetch = list.on_delete_result(Ok(())).map(ticket);
        assert!(refetch.is_some());
        assert!(list.is_loading());
        assert!(list.apply_fetch(refetch.unwrap(), Ok(vec![item("b")])));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn failed_delete_keeps_rows() {
        let mut list = ListState::new();
        let t = ticket(list.begin_fetch());
        list.apply_fetch(t, Ok(vec![item("a")]));
        list.request_delete("a");
        list.resolve_delete(true);
        let err = ApiError::Status {
            status: 403,
            message: Some("Not allowed".into()),
        };
        assert_eq!(list.on_delete_result(Err(err)), None);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.error(), Some("Not allowed"));
    }

    #[test]
    fn single_menu_open_at_a_time() {
        let mut list = ListState::new();
        list.toggle_menu("a");
        list.toggle_menu("b");
        assert_eq!(list.open_menu_id(), Some("b"));
        list.toggle_menu("b");
        assert_eq!(list.open_menu_id(), None);
    }

    #[test]
    fn open_menu_closes_when_row_disappears() {
        let mut list = ListState::new();
        list.toggle_menu("gone");
        let t = ticket(list.on_saved());
        list.apply_fetch(t, Ok(vec![item("a")]));
        assert_eq!(list.open_menu_id(), None);
    }

    #[test]
    fn save_refetch_ignores_late_initial_response() {
        let mut list = ListState::new();
        let initial = list.begin_fetch();
        let refetch = list.on_saved();
        assert_ne!(initial, refetch);

        let fetched = |cmd: ListCommand, rows: Vec<ListItem>| CommandOutcome::Fetched {
            ticket: ticket(cmd),
            result: Ok(rows),
        };
        assert_eq!(list.settle(fetched(refetch, vec![item("a"), item("new")])), None);
        assert!(!list.is_loading());

        // the first request answers last with the pre-save rows
        assert_eq!(list.settle(fetched(initial, vec![item("a")])), None);
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.items()[1].row.id, "new");
    }

    #[test]
    fn delete_chain_issues_request_then_one_refetch() {
        let mut list = ListState::new();
        let t = ticket(list.begin_fetch());
        list.settle(CommandOutcome::Fetched {
            ticket: t,
            result: Ok(vec![item("a"), item("b")]),
        });

        list.request_delete("a");
        let delete = list.resolve_delete(true);
        assert_eq!(delete, Some(ListCommand::Delete { id: "a".into() }));

        let refetch = list.settle(CommandOutcome::Deleted(Ok(()))).map(ticket);
        let Some(refetch) = refetch else {
            panic!("a successful delete must refetch");
        };
        assert!(list.is_current(refetch));
        let next = list.settle(CommandOutcome::Fetched {
            ticket: refetch,
            result: Ok(vec![item("b")]),
        });
        assert_eq!(next, None);
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn outside_click_closes_the_open_menu() {
        let mut list = ListState::new();
        list.toggle_menu("a");
        list.close_menu();
        assert_eq!(list.open_menu_id(), None);
        list.toggle_menu("a");
        assert_eq!(list.open_menu_id(), Some("a"));
    }
}
