//! Plumbing shared by every list screen: a lifetime that makes late
//! completions no-ops, and a list holder that never loses rendered rows to an
//! error.

use std::future::Future;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::error::AppResult;

pub struct ScreenHandle {
    closed: watch::Sender<bool>,
}

impl ScreenHandle {
    pub fn close(&self) {
        self.closed.send_replace(true);
    }
}

#[derive(Clone)]
pub struct ScreenLifetime {
    closed: watch::Receiver<bool>,
}

impl ScreenLifetime {
    pub fn open() -> (ScreenHandle, ScreenLifetime) {
        let (tx, rx) = watch::channel(false);
        (ScreenHandle { closed: tx }, ScreenLifetime { closed: rx })
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow() || self.closed.has_changed().is_err()
    }

    pub async fn closed(&self) {
        let mut rx = self.closed.clone();
        // An Err means the handle was dropped, which also ends the session.
        let _ = rx.wait_for(|closed| *closed).await;
    }

    /// Runs `work` for as long as the session is open. Returns `None` when the
    /// session closed first, or closed while the result was in flight.
    pub async fn run<F>(&self, work: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.closed() => None,
            out = work => {
                if self.is_closed() {
                    None
                } else {
                    Some(out)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loaded: bool,
    pub notice: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            notice: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn apply(&mut self, result: AppResult<Vec<T>>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                self.notice = None;
            }
            Err(e) => {
                warn!("List refresh failed, keeping {} rows: {}", self.items.len(), e);
                self.notice = Some("Failed to load landmarks".to_string());
            }
        }
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
