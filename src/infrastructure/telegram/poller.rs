//! Long-polling update loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::client::TelegramClient;
use super::dto::UpdateDto;
use crate::domain::entities::{ChatId, MessageId};
use crate::domain::errors::TransportError;
use crate::domain::navigation::{BotCommand, NavAction, UserAction};
use crate::infrastructure::dispatcher::ChatDispatcher;

const RETRY_DELAY_BASE: Duration = Duration::from_secs(1);
const RETRY_DELAY_MAX: Duration = Duration::from_secs(60);

/// Pulls updates from the Bot API and feeds them to the dispatcher.
pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    dispatcher: ChatDispatcher,
    poll_timeout: Duration,
    bot_username: Option<String>,
    offset: Option<i64>,
}

impl UpdatePoller {
    /// Creates poller starting from the oldest unconfirmed update.
    #[must_use]
    pub fn new(
        client: Arc<TelegramClient>,
        dispatcher: ChatDispatcher,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            client,
            dispatcher,
            poll_timeout,
            bot_username: None,
            offset: None,
        }
    }

    /// Username used to tell this bot's `/command@username` apart from
    /// commands addressed to other bots in the same group.
    #[must_use]
    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Polls until `shutdown` resolves, then drains the chat workers.
    ///
    /// # Errors
    /// Returns the error that made further polling pointless, such as a
    /// revoked token.
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), TransportError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut failures: u32 = 0;

        info!("Polling for updates");

        let result = loop {
            let polled = tokio::select! {
                () = &mut shutdown => break Ok(()),
                polled = self.client.get_updates(self.offset, self.poll_timeout) => polled,
            };

            match polled {
                Ok(updates) => {
                    failures = 0;
                    self.handle_updates(updates);
                    self.dispatcher.prune_finished();
                }
                Err(e) if is_fatal(&e) => {
                    error!(error = %e, "Polling rejected by Bot API");
                    break Err(e);
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let delay = retry_delay(&e, failures);
                    warn!(
                        error = %e,
                        attempt = failures,
                        delay_ms = delay.as_millis(),
                        "Polling failed, retrying"
                    );

                    tokio::select! {
                        () = &mut shutdown => break Ok(()),
                        () = sleep(delay) => {}
                    }
                }
            }
        };

        info!(
            workers = self.dispatcher.active_workers(),
            "Stopping, waiting for pending actions"
        );
        self.dispatcher.shutdown().await;
        info!("Poller stopped");

        result
    }

    fn handle_updates(&mut self, updates: Vec<UpdateDto>) {
        for update in updates {
            self.offset = Some(update.update_id + 1);

            match update_to_action(update, self.bot_username.as_deref()) {
                Some(action) => self.dispatcher.dispatch(action),
                None => debug!("Ignoring update"),
            }
        }
    }
}

/// Maps an update to a user action; anything the bot does not understand,
/// or commands meant for another bot, yield `None`.
#[must_use]
pub fn update_to_action(update: UpdateDto, bot_username: Option<&str>) -> Option<UserAction> {
    if let Some(message) = update.message {
        let command = BotCommand::parse(message.text.as_deref()?, bot_username)?;
        let action = UserAction::command(ChatId(message.chat.id), command);

        return Some(match message.from {
            Some(sender) => action.with_sender_name(sender.first_name),
            None => action,
        });
    }

    let query = update.callback_query?;
    let Some(nav) = query.data.as_deref().and_then(NavAction::decode) else {
        debug!(data = ?query.data, "Unrecognized callback payload");
        return None;
    };

    let (chat_id, origin) = match &query.message {
        Some(message) => (
            ChatId(message.chat.id),
            Some(MessageId(message.message_id)),
        ),
        None => (ChatId(query.from.id), None),
    };

    Some(UserAction::button(chat_id, nav, origin, query.id).with_sender_name(query.from.first_name))
}

/// The token was revoked or never existed.
fn is_fatal(error: &TransportError) -> bool {
    matches!(error, TransportError::Api { code: 401 | 404, .. })
}

fn retry_delay(error: &TransportError, attempt: u32) -> Duration {
    if let TransportError::RateLimited { retry_after_secs } = error {
        return Duration::from_secs(*retry_after_secs);
    }

    RETRY_DELAY_BASE
        .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1).min(6)))
        .min(RETRY_DELAY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::ActionKind;
    use serde_json::json;

    const BOT: Option<&str> = Some("torzhok_bot");

    fn update(raw: serde_json::Value) -> UpdateDto {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_command_message_becomes_action() {
        let action = update_to_action(
            update(json!({
                "update_id": 1,
                "message": {
                    "message_id": 10,
                    "chat": {"id": 42},
                    "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
                    "text": "/start"
                }
            })),
            BOT,
        )
        .unwrap();

        assert_eq!(action.chat_id, ChatId(42));
        assert_eq!(action.kind, ActionKind::Command(BotCommand::Start));
        assert_eq!(action.sender_name.as_deref(), Some("Anna"));
        assert_eq!(action.origin, None);
    }

    #[test]
    fn test_command_for_other_bot_is_ignored() {
        let raw = |text: &str| {
            update(json!({
                    "update_id": 1,
                    "message": {"message_id": 10, "chat": {"id": -5}, "text": text}
                }))
            };

            assert!(update_to_action(raw("/start@some_other_bot"), BOT).is_none());
            assert!(update_to_action(raw("/start@torzhok_bot"), BOT).is_some());
        }

        #[test]
        fn test_plain_text_is_ignored() {
            let action = update_to_action(
            update(json!({
                "update_id": 1,
                "message": {"message_id": 10, "chat": {"id": 42}, "text": "hello"}
            })),
            BOT,
        );
        assert!(action.is_none());

        let action = update_to_action(
            update(json!({
                "update_id": 2,
                "message": {"message_id": 11, "chat": {"id": 42}}
            })),
            BOT,
        );
        assert!(action.is_none());
    }

    #[test]
    fn test_callback_becomes_button_action() {
        let action = update_to_action(
            update(json!({
                "update_id": 3,
                "callback_query": {
                    "id": "cb-9",
                    "from": {"id": 7, "first_name": "Ivan"},
                    "message": {"message_id": 55, "chat": {"id": -100}},
                    "data": "attraction:kremlin"
                }
            })),
            BOT,
        )
        .unwrap();

        assert_eq!(action.chat_id, ChatId(-100));
        assert_eq!(action.origin, Some(MessageId(55)));
        assert_eq!(action.callback_id.as_deref(), Some("cb-9"));
        assert_eq!(
            action.kind,
            ActionKind::Navigation(NavAction::Attraction("kremlin".to_string()))
        );
    }

    #[test]
    fn test_callback_without_message_uses_sender_chat() {
        let action = update_to_action(
            update(json!({
                "update_id": 4,
                "callback_query": {
                    "id": "cb-1",
                    "from": {"id": 7, "first_name": "Ivan"},
                    "data": "menu:help"
                }
            })),
            BOT,
        )
        .unwrap();

        assert_eq!(action.chat_id, ChatId(7));
        assert_eq!(action.origin, None);
    }

    #[test]
    fn test_unknown_callback_payload_is_ignored() {
        let action = update_to_action(
            update(json!({
                "update_id": 5,
                "callback_query": {
                    "id": "cb-1",
                    "from": {"id": 7, "first_name": "Ivan"},
                    "data": "weather:today"
                }
            })),
            BOT,
        );
        assert!(action.is_none());
    }

    #[test]
    fn test_only_token_rejections_are_fatal() {
        assert!(is_fatal(&TransportError::api(401, "Unauthorized")));
        assert!(is_fatal(&TransportError::api(404, "Not Found")));
        assert!(!is_fatal(&TransportError::api(409, "Conflict")));
        assert!(!is_fatal(&TransportError::network("down")));
    }

    #[test]
    fn test_retry_delay() {
        let network = TransportError::network("down");

        assert_eq!(retry_delay(&network, 1), Duration::from_secs(1));
        assert_eq!(retry_delay(&network, 3), Duration::from_secs(4));
        assert_eq!(retry_delay(&network, 30), RETRY_DELAY_MAX);
        assert_eq!(
            retry_delay(
                &TransportError::RateLimited {
                    retry_after_secs: 12
                },
                1
            ),
            Duration::from_secs(12)
        );
    }
}
