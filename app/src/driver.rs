//! Event driver: runs a `UserList` against a `Transport`.
//!
//! # Design
//! The driver owns the component and is only used from one task, so the
//! view state needs no locking. Each dispatched request runs in its own
//! spawned task under a child of the driver's cancellation scope and reports
//! back over a channel; `next_completion` applies those reports one at a
//! time, in arrival order. Unmounting (or dropping the driver) cancels the
//! scope, which aborts every in-flight request: the initial load and
//! mutations alike.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use user_list_core::{
    Action, ApiError, Completion, Dispatch, HttpResponse, Node, OpId, UserList, UsersClient,
    ViewState,
};

use crate::transport::Transport;

type Outcome = (OpId, Result<HttpResponse, ApiError>);

pub struct Driver<T: Transport> {
    list: UserList,
    transport: Arc<T>,
    scope: CancellationToken,
    in_flight: HashMap<OpId, CancellationToken>,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl<T: Transport> Driver<T> {
    pub fn new(client: UsersClient, transport: T) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            list: UserList::new(client),
            transport: Arc::new(transport),
            scope: CancellationToken::new(),
            in_flight: HashMap::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.list.state()
    }

    pub fn render(&self) -> Node {
        self.list.render()
    }

    /// Requests sent and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Start the initial load. False if the component was mounted before.
    pub fn mount(&mut self) -> bool {
        match self.list.mount() {
            Some(dispatch) => {
                self.spawn(dispatch);
                true
            }
            None => false,
        }
    }

    /// Handle a button press. False if the press had nothing to act on.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, ApiError> {
        match self.list.dispatch(action)? {
            Some(dispatch) => {
                self.spawn(dispatch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handle a press from the terminal. Returns a notice for the user when
    /// the press started no request; a failure to build the request is
    /// reported the same way instead of ending the session.
    pub fn press(&mut self, action: Action) -> Option<String> {
        match self.dispatch(action) {
            Ok(true) => None,
            Ok(false) => {
                debug!(?action, "nothing to act on");
                Some("nothing to act on".to_string())
            }
            Err(e) => {
                warn!(?action, error = %e, "could not send request");
                Some(e.to_string())
            }
        }
    }

    /// Wait for the next request to finish and apply it. `None` when nothing
    /// is in flight.
    pub async fn next_completion(&mut self) -> Option<(OpId, Completion)> {
        while !self.in_flight.is_empty() {
            let (op, outcome) = self.rx.recv().await?;
            // Reports from operations dropped by unmount are stale.
            if self.in_flight.remove(&op).is_none() {
                continue;
            }
            let completion = self.list.complete(op, outcome);
            debug!(%op, ?completion, "applied");
            return Some((op, completion));
        }
        None
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) -> Vec<(OpId, Completion)> {
        let mut done = Vec::new();
        while let Some(completion) = self.next_completion().await {
            done.push(completion);
        }
        done
    }

    /// Tear the component down and abort everything it started.
    pub fn unmount(&mut self) {
        for op in self.list.unmount() {
            if let Some(token) = self.in_flight.remove(&op) {
                token.cancel();
            }
        }
        self.scope.cancel();
        self.in_flight.clear();
    }

    fn spawn(&mut self, dispatch: Dispatch) {
        let Dispatch { op, request } = dispatch;
        let token = self.scope.child_token();
        self.in_flight.insert(op, token.clone());
        debug!(%op, method = %request.method, path = %request.path, "sending");

        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Err(ApiError::Cancelled),
                outcome = transport.execute(request) => outcome,
            };
            // The driver may be gone already.
            let _ = tx.send((op, outcome));
        });
    }
}

impl<T: Transport> Drop for Driver<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
