//! Chat widget - View Model

use super::error::AskError;
use super::model::{AskClient, Message};
use super::transcript::ChatTranscript;
use contracts::agent::AskResponse;
use futures::future::{abortable, AbortHandle};
use leptos::prelude::*;
use std::future::Future;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ChatWidgetVm {
    pub transcript: RwSignal<ChatTranscript>,
}

impl ChatWidgetVm {
    pub fn new() -> Self {
        Self {
            transcript: RwSignal::new(ChatTranscript::new()),
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.transcript.with(|t| t.messages().to_vec())
    }

    pub fn is_sending(&self) -> bool {
        self.transcript.with(|t| t.is_sending())
    }

    /// Returns the question to send, `None` when the submission is dropped
    /// or the widget is already disposed.
    pub fn begin(&self, raw_input: &str) -> Option<String> {
        self.transcript.try_update(|t| t.begin(raw_input)).flatten()
    }

    /// Returns `false` when the widget was disposed before the reply arrived.
    pub fn resolve(&self, outcome: Result<AskResponse, AskError>) -> bool {
        self.transcript.try_update(|t| t.resolve(outcome)).is_some()
    }

    /// Ask `question` and settle the transcript with the outcome.
    ///
    /// `on_settled` runs after the transcript left the sending state, so the
    /// send control is already enabled when it moves focus back to the
    /// input. Aborting through the returned handle skips both.
    pub fn exchange<C>(
        self,
        client: Rc<C>,
        question: String,
        on_settled: impl FnOnce() + 'static,
    ) -> (impl Future<Output = ()>, AbortHandle)
    where
        C: AskClient + 'static,
    {
        let (task, handle) = abortable(async move {
            let outcome = client.ask(&question).await;
            if self.resolve(outcome) {
                on_settled();
            }
        });
        let task = async move {
            if task.await.is_err() {
                log::debug!("Chat request aborted");
            }
        };
        (task, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct CannedClient {
        outcome: Result<AskResponse, AskError>,
        calls: Cell<usize>,
    }

    impl CannedClient {
        fn new(outcome: Result<AskResponse, AskError>) -> Rc<Self> {
            Rc::new(Self {
                outcome,
                calls: Cell::new(0),
            })
        }
    }

    impl AskClient for CannedClient {
        async fn ask(&self, _question: &str) -> Result<AskResponse, AskError> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.clone()
        }
    }

    fn answer(text: &str) -> Result<AskResponse, AskError> {
        Ok(AskResponse {
            answer: Some(text.to_string()),
            error: None,
        })
    }

    /// Records whether `on_settled` ran and whether sending was already off.
    fn focus_recorder(vm: ChatWidgetVm) -> (Rc<RefCell<Option<bool>>>, impl FnOnce() + 'static) {
        let seen = Rc::new(RefCell::new(None));
        let record = {
            let seen = seen.clone();
            move || *seen.borrow_mut() = Some(vm.is_sending())
        };
        (seen, record)
    }

    #[test]
    fn resolve_after_dispose_is_dropped() {
        let owner = Owner::new();
        let vm = owner.with(ChatWidgetVm::new);
        assert!(vm.begin("hello").is_some());

        drop(owner);

        assert!(!vm.resolve(answer("too late")));
        assert!(vm.begin("again").is_none());
    }

    #[test]
    fn exchange_settles_before_focus() {
        for outcome in [
            answer("X"),
            Err(AskError::from_status(404, "missing".into())),
            Err(AskError::from_status(500, "boom".into())),
            Err(AskError::from_fetch_failure("TypeError: Failed to fetch".into())),
        ] {
            let owner = Owner::new();
            let vm = owner.with(ChatWidgetVm::new);
            let client = CannedClient::new(outcome);
            let question = vm.begin("hello").unwrap();
            let (seen, on_settled) = focus_recorder(vm);

            let (task, _handle) = vm.exchange(client.clone(), question, on_settled);
            block_on(task);

            assert_eq!(client.calls.get(), 1);
            assert_eq!(*seen.borrow(), Some(false));
            assert!(!vm.is_sending());
            assert!(vm.messages().iter().all(|m| !m.pending));
        }
    }

    #[test]
    fn aborted_exchange_never_resolves() {
        let owner = Owner::new();
        let vm = owner.with(ChatWidgetVm::new);
        let client = CannedClient::new(answer("X"));
        let question = vm.begin("hello").unwrap();
        let (seen, on_settled) = focus_recorder(vm);

        let (task, handle) = vm.exchange(client.clone(), question, on_settled);
        handle.abort();
        block_on(task);

        assert_eq!(client.calls.get(), 0);
        assert_eq!(*seen.borrow(), None);
        assert!(vm.is_sending());
        assert_eq!(vm.messages().len(), 2);
    }

    #[test]
    fn exchange_after_dispose_skips_focus() {
        let owner = Owner::new();
        let vm = owner.with(ChatWidgetVm::new);
        let client = CannedClient::new(answer("X"));
        let question = vm.begin("hello").unwrap();
        let (seen, on_settled) = focus_recorder(vm);
        let (task, _handle) = vm.exchange(client, question, on_settled);

        drop(owner);
        block_on(task);

        assert_eq!(*seen.borrow(), None);
    }
}
