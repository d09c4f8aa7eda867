//! Telegram Bot API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::dto::{
    AnswerCallbackQueryParams, ApiResponse, BotCommandDto, DeleteMessageParams,
    EditMessageTextParams, GetUpdatesParams, InlineKeyboardMarkup, LinkPreviewOptions,
    MessageDto, SendMessageParams, SendPhotoParams, SetMyCommandsParams, UpdateDto, UserDto,
    parse_mode,
};
use crate::application::services::screen_renderer::command_description;
use crate::domain::entities::{BotToken, ChatId, MessageId};
use crate::domain::errors::TransportError;
use crate::domain::navigation::BotCommand;
use crate::domain::ports::{OutgoingPhoto, OutgoingText, TransportPort};
use crate::infrastructure::config::TelegramConfig;

const USER_AGENT: &str = concat!("torzhok-bot/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;
const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Bot API client.
///
/// Method URLs embed the token, so they are built per call, wiped after the
/// request is created, and `reqwest` errors are logged without their URL.
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: BotToken,
    request_timeout: Duration,
}

impl TelegramClient {
    /// Creates client for the given token.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: &BotToken, config: &TelegramConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                TransportError::unexpected(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: token.clone(),
            request_timeout: config.request_timeout(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token.as_str())
    }

    /// Returns the bot's own account; used as a startup check.
    ///
    /// # Errors
    /// Returns error if the token is rejected or the API is unreachable.
    pub async fn get_me(&self) -> Result<UserDto, TransportError> {
        self.call("getMe", &serde_json::json!({}), self.request_timeout)
            .await
    }

    /// Long-polls for updates after `offset`.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<UpdateDto>, TransportError> {
        let params = GetUpdatesParams {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params, poll_timeout + self.request_timeout)
            .await
    }

    /// Publishes the command list shown in the client's menu.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn set_my_commands(&self) -> Result<(), TransportError> {
        let params = SetMyCommandsParams {
            commands: BotCommand::ALL
                .iter()
                .map(|command| BotCommandDto {
                    command: command.name(),
                    description: command_description(*command),
                })
                .collect(),
        };
        self.call::<_, bool>("setMyCommands", &params, self.request_timeout)
            .await
            .map(|_| ())
    }

    async fn call<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Duration,
    ) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(method, "Calling Bot API");

        let mut url = self.method_url(method);
        let request = self.client.post(&url).timeout(timeout).json(params);
        url.zeroize();

        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            warn!(method, error = %e, "Failed to reach Bot API");
            if e.is_timeout() {
                TransportError::network("request timed out")
            } else if e.is_connect() {
                TransportError::network("failed to connect to Bot API")
            } else {
                TransportError::network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            warn!(method, error = %e, "Failed to read Bot API response");
            TransportError::network(e.to_string())
        })?;

        decode_response(method, status, &body)
    }
}

fn decode_response<R>(method: &str, status: StatusCode, body: &[u8]) -> Result<R, TransportError>
where
    R: DeserializeOwned,
{
    let envelope = match serde_json::from_slice::<ApiResponse<R>>(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(status_error(status)),
        Err(e) => {
            warn!(method, error = %e, "Failed to parse Bot API response");
            return Err(TransportError::decode(format!("{method}: {e}")));
        }
    };

    into_result(method, envelope)
}

fn into_result<R>(method: &str, envelope: ApiResponse<R>) -> Result<R, TransportError> {
    if envelope.ok {
        return envelope
            .result
            .ok_or_else(|| TransportError::decode(format!("{method}: response has no result")));
    }

    let code = envelope.error_code.unwrap_or_default();
    if code == i64::from(StatusCode::TOO_MANY_REQUESTS.as_u16()) {
        let retry_after_secs = envelope
            .parameters
            .and_then(|parameters| parameters.retry_after)
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(TransportError::RateLimited { retry_after_secs });
    }

    let description = envelope
        .description
        .unwrap_or_else(|| "no description".to_string());
    Err(TransportError::api(code, description))
}

fn status_error(status: StatusCode) -> TransportError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimited {
            retry_after_secs: DEFAULT_RETRY_AFTER_SECS,
        },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            TransportError::network("Bot API is temporarily unavailable")
        }
        _ => TransportError::api(i64::from(status.as_u16()), format!("HTTP {status}")),
    }
}

fn link_preview(message: &OutgoingText) -> Option<LinkPreviewOptions> {
    message
        .disable_link_preview
        .then_some(LinkPreviewOptions { is_disabled: true })
}

#[async_trait]
impl TransportPort for TelegramClient {
    async fn send_text(
        &self,
        chat_id: ChatId,
        message: OutgoingText,
    ) -> Result<MessageId, TransportError> {
        let params = SendMessageParams {
            chat_id: chat_id.as_i64(),
            parse_mode: parse_mode(message.format),
            link_preview_options: link_preview(&message),
            reply_markup: InlineKeyboardMarkup::from_keyboard(&message.keyboard),
            text: message.text,
        };

        let sent: MessageDto = self
            .call("sendMessage", &params, self.request_timeout)
            .await?;
        Ok(MessageId(sent.message_id))
    }

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: OutgoingText,
    ) -> Result<(), TransportError> {
        let params = EditMessageTextParams {
            chat_id: chat_id.as_i64(),
            message_id: message_id.as_i64(),
            parse_mode: parse_mode(message.format),
            link_preview_options: link_preview(&message),
            reply_markup: InlineKeyboardMarkup::from_keyboard(&message.keyboard),
            text: message.text,
        };

        self.call::<_, serde_json::Value>("editMessageText", &params, self.request_timeout)
            .await
            .map(|_| ())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: OutgoingPhoto,
    ) -> Result<MessageId, TransportError> {
        let params = SendPhotoParams {
            chat_id: chat_id.as_i64(),
            photo: photo.image_url,
            caption: photo.caption,
        };

        let sent: MessageDto = self
            .call("sendPhoto", &params, self.request_timeout)
            .await?;
        Ok(MessageId(sent.message_id))
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        let params = DeleteMessageParams {
            chat_id: chat_id.as_i64(),
            message_id: message_id.as_i64(),
        };

        self.call::<_, bool>("deleteMessage", &params, self.request_timeout)
            .await
            .map(|_| ())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        let params = AnswerCallbackQueryParams {
            callback_query_id: callback_id,
        };

        self.call::<_, bool>("answerCallbackQuery", &params, self.request_timeout)
            .await
            .map(|_| ())
    }
}
