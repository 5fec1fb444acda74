//! Remote data state for pages, plus the generation counter that drops
//! responses from superseded requests.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for LoadState<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(message) => LoadState::Failed(message),
        }
    }
}

/// Each `begin()` invalidates every ticket handed out before it.
#[derive(Clone, Copy)]
pub struct RequestGuard {
    generation: StoredValue<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGuard {
    pub fn new() -> Self {
        Self {
            generation: StoredValue::new(0),
        }
    }

    pub fn begin(&self) -> Ticket {
        self.generation.update_value(|g| *g += 1);
        Ticket(self.generation.get_value())
    }

    /// False once a newer request has started or the owning page is gone.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.try_get_value() == Some(ticket.0)
    }

    /// Put `state` into `Loading`, run `request` and store its outcome
    /// unless a later `load` superseded it.
    pub fn load<T, F>(&self, state: RwSignal<LoadState<T>>, request: F)
    where
        T: Send + Sync + 'static,
        F: Future<Output = Result<T, String>> + 'static,
    {
        let ticket = self.begin();
        state.set(LoadState::Loading);
        let guard = *self;
        spawn_local(async move {
            let result = request.await;
            if !guard.is_current(ticket) {
                log::debug!("dropping response for superseded request");
                return;
            }
            state.set(result.into());
        });
    }
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_from_result() {
        let ok: LoadState<Vec<i32>> = Ok(vec![1, 2]).into();
        assert_eq!(ok.ready(), Some(&vec![1, 2]));
        assert!(!ok.is_loading());

        let failed: LoadState<Vec<i32>> = Err("Network error".to_string()).into();
        assert_eq!(failed.error(), Some("Network error"));
        assert_eq!(failed.ready(), None);
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
