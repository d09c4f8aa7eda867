//! Per-chat serialized action dispatch.
//!
//! Every chat gets its own worker task fed by an unbounded channel, so
//! actions from one chat are handled strictly in arrival order while
//! different chats proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::application::use_cases::{NavigateUseCase, NavigationOutcome};
use crate::domain::entities::ChatId;
use crate::domain::navigation::UserAction;

struct Worker {
    tx: mpsc::UnboundedSender<UserAction>,
    handle: JoinHandle<()>,
}

/// Routes actions to per-chat workers.
pub struct ChatDispatcher {
    use_case: Arc<NavigateUseCase>,
    idle_timeout: Duration,
    workers: HashMap<ChatId, Worker>,
}

impl ChatDispatcher {
    /// Creates dispatcher; workers stop after `idle_timeout` without actions.
    #[must_use]
    pub fn new(use_case: Arc<NavigateUseCase>, idle_timeout: Duration) -> Self {
        Self {
            use_case,
            idle_timeout,
            workers: HashMap::new(),
        }
    }

    /// Queues an action behind everything already queued for its chat.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: UserAction) {
        let chat_id = action.chat_id;

        // A closed channel means the worker went idle; its replacement waits
        // for it so nothing drained during shutdown is overtaken.
        let action = match self.workers.get(&chat_id) {
            Some(worker) => match worker.tx.send(action) {
                Ok(()) => return,
                Err(mpsc::error::SendError(action)) => action,
            },
            None => action,
        };

        let previous = self.workers.remove(&chat_id).map(|worker| worker.handle);
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(
            self.use_case.clone(),
            chat_id,
            previous,
            action,
            rx,
            self.idle_timeout,
        ));

        debug!(%chat_id, workers = self.workers.len() + 1, "Spawned chat worker");
        self.workers.insert(chat_id, Worker { tx, handle });
    }

    /// Forgets workers that have already stopped.
    pub fn prune_finished(&mut self) {
        self.workers.retain(|_, worker| !worker.handle.is_finished());
    }

    /// Number of workers not yet pruned.
    #[must_use]
    pub fn active_workers(&self) -> usize {
        self.workers.len()
    }

    /// Stops accepting actions and waits for every queued one to finish.
    pub async fn shutdown(self) {
        let handles: Vec<_> = self
            .workers
            .into_iter()
            .map(|(chat_id, worker)| {
                drop(worker.tx);
                (chat_id, worker.handle)
            })
            .collect();

        debug!(workers = handles.len(), "Waiting for chat workers");

        for (chat_id, handle) in handles {
            if let Err(e) = handle.await {
                error!(%chat_id, error = %e, "Chat worker terminated abnormally");
            }
        }
    }
}

async fn run_worker(
    use_case: Arc<NavigateUseCase>,
    chat_id: ChatId,
    previous: Option<JoinHandle<()>>,
    first: UserAction,
    mut rx: mpsc::UnboundedReceiver<UserAction>,
    idle_timeout: Duration,
) {
    if let Some(previous) = previous
        && let Err(e) = previous.await
    {
        warn!(%chat_id, error = %e, "Previous chat worker terminated abnormally");
    }

    handle_action(&use_case, &first).await;

    loop {
        match tokio::time::timeout(idle_timeout, rx.recv()).await {
            Ok(Some(action)) => handle_action(&use_case, &action).await,
            Ok(None) => break,
            Err(_) => {
                rx.close();
                while let Ok(action) = rx.try_recv() {
                    handle_action(&use_case, &action).await;
                }
                debug!(%chat_id, "Chat worker idle, stopping");
                break;
            }
        }
    }
}

async fn handle_action(use_case: &NavigateUseCase, action: &UserAction) {
    match use_case.execute(action).await {
        Ok(NavigationOutcome::Rendered { screen, .. }) => {
            debug!(chat_id = %action.chat_id, %screen, "Action handled");
        }
        Ok(NavigationOutcome::NotFound { id }) => {
            debug!(chat_id = %action.chat_id, %id, "Unknown attraction requested");
        }
        Err(e) if e.is_network_error() => {
            warn!(
                chat_id = %action.chat_id,
                action = %action.kind,
                error = %e,
                "Bot API unreachable, action dropped"
            );
        }
        Err(e) => {
            error!(
                chat_id = %action.chat_id,
                action = %action.kind,
                error = %e,
                "Failed to handle action"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::screen_renderer;
    use crate::domain::catalog::Catalog;
    use crate::domain::entities::{Coordinates, PointOfInterest};
    use crate::domain::navigation::{BotCommand, NavAction};
    use crate::domain::ports::mocks::{RecordingTransport, TransportCall};

    fn catalog() -> Catalog {
        Catalog::new(vec![PointOfInterest::new(
            "a",
            "Kremlin",
            "Old fortress",
            "Dzerzhinskogo st., 1",
            Coordinates::new(57.04, 34.96),
            "https://example.com/kremlin.jpg",
        )])
        .unwrap()
    }

    fn setup(idle: Duration) -> (ChatDispatcher, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let use_case = Arc::new(NavigateUseCase::new(Arc::new(catalog()), transport.clone()));

        (ChatDispatcher::new(use_case, idle), transport)
    }

    fn sent_texts(transport: &RecordingTransport, chat: ChatId) -> Vec<String> {
        transport
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::SendText {
                    chat_id, message, ..
                } if chat_id == chat => Some(message.text),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_actions_in_one_chat_are_ordered() {
        let (mut dispatcher, transport) = setup(Duration::from_secs(60));
        let chat = ChatId(1);

        dispatcher.dispatch(UserAction::command(chat, BotCommand::Start));
        dispatcher.dispatch(UserAction::command(chat, BotCommand::Attractions));
        dispatcher.dispatch(UserAction::command(chat, BotCommand::Help));
        dispatcher.shutdown().await;

        assert_eq!(
            sent_texts(&transport, chat),
            vec![
                screen_renderer::main_menu(None).text().to_string(),
                screen_renderer::attraction_list(&catalog()).text().to_string(),
                screen_renderer::help().text().to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_chats_get_separate_workers() {
        let (mut dispatcher, transport) = setup(Duration::from_secs(60));

        dispatcher.dispatch(UserAction::command(ChatId(1), BotCommand::Start));
        dispatcher.dispatch(UserAction::command(ChatId(2), BotCommand::Start));
        assert_eq!(dispatcher.active_workers(), 2);

        dispatcher.shutdown().await;

        assert_eq!(sent_texts(&transport, ChatId(1)).len(), 1);
        assert_eq!(sent_texts(&transport, ChatId(2)).len(), 1);
    }

    #[tokio::test]
    async fn test_idle_worker_is_replaced() {
        let (mut dispatcher, transport) = setup(Duration::from_millis(10));
        let chat = ChatId(7);

        dispatcher.dispatch(UserAction::command(chat, BotCommand::Start));
        tokio::time::sleep(Duration::from_millis(200)).await;
        dispatcher.prune_finished();
        assert_eq!(dispatcher.active_workers(), 0);

        dispatcher.dispatch(UserAction::button(
            chat,
            NavAction::Attraction("a".to_string()),
            None,
            "cb-1",
        ));
        dispatcher.shutdown().await;

        assert_eq!(sent_texts(&transport, chat).len(), 2);
        assert_eq!(transport.photos().len(), 1);
    }

    #[tokio::test]
    async fn test_photo_slot_survives_worker_restart() {
        let (mut dispatcher, transport) = setup(Duration::from_millis(10));
        let chat = ChatId(3);

        dispatcher.dispatch(UserAction::button(
            chat,
            NavAction::Attraction("a".to_string()),
            None,
            "cb-1",
        ));
        tokio::time::sleep(Duration::from_millis(200)).await;

        dispatcher.dispatch(UserAction::command(chat, BotCommand::Start));
        dispatcher.shutdown().await;

        let photo_id = transport.photos()[0].0;
        assert_eq!(transport.deleted(), vec![photo_id]);
    }

    #[tokio::test]
    async fn test_failed_action_does_not_stop_worker() {
        let (mut dispatcher, transport) = setup(Duration::from_secs(60));
        let chat = ChatId(5);
        transport.set_fail_photo(true);

        dispatcher.dispatch(UserAction::button(
            chat,
            NavAction::Attraction("a".to_string()),
            None,
            "cb-1",
        ));
        dispatcher.dispatch(UserAction::command(chat, BotCommand::Help));
        dispatcher.shutdown().await;

        assert_eq!(
            transport.last_text().unwrap().text,
            screen_renderer::help().text()
        );
    }
}
