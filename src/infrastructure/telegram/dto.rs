//! Bot API wire structures.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Button, Keyboard};
use crate::domain::ports::TextFormat;

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Method result on success.
    pub result: Option<T>,
    /// Human-readable error description.
    pub description: Option<String>,
    /// Error code, mirrors the HTTP status.
    pub error_code: Option<i64>,
    /// Extra error details.
    pub parameters: Option<ResponseParameters>,
}

/// Extra details attached to failed requests.
#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    /// Seconds to wait before repeating a rate-limited request.
    pub retry_after: Option<u64>,
}

/// Bot API user structure.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    /// Telegram user ID.
    pub id: i64,
    /// Whether the user is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// First name, always present.
    pub first_name: String,
    /// Optional username without the `@`.
    pub username: Option<String>,
}

/// Bot API chat structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatDto {
    /// Telegram chat ID.
    pub id: i64,
}

/// Bot API message structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    /// Message ID, unique within the chat.
    pub message_id: i64,
    /// Chat the message belongs to.
    pub chat: ChatDto,
    /// Sender; empty for channel posts.
    pub from: Option<UserDto>,
    /// Text for text messages.
    pub text: Option<String>,
}

/// Bot API callback query (inline button press).
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQueryDto {
    /// Query ID used to acknowledge the press.
    pub id: String,
    /// User who pressed the button.
    pub from: UserDto,
    /// Message carrying the button; absent when too old.
    pub message: Option<MessageDto>,
    /// Button payload.
    pub data: Option<String>,
}

/// Incoming update; kinds the bot does not subscribe to are left empty.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDto {
    /// Monotonic update ID used for the polling offset.
    pub update_id: i64,
    /// New incoming message.
    pub message: Option<MessageDto>,
    /// New button press.
    pub callback_query: Option<CallbackQueryDto>,
}

/// Inline keyboard button; exactly one of `callback_data` and `url` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    /// Button caption.
    pub text: String,
    /// Payload sent back on press.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    /// Link opened on press.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows, top to bottom.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Button> for InlineKeyboardButton {
    fn from(button: &Button) -> Self {
        match button {
            Button::Action { label, action } => Self {
                text: label.clone(),
                callback_data: Some(action.encode()),
                url: None,
            },
            Button::Link { label, url } => Self {
                text: label.clone(),
                callback_data: None,
                url: Some(url.clone()),
            },
        }
    }
}

impl InlineKeyboardMarkup {
    /// Converts a keyboard; empty keyboards become `None` so the field is omitted.
    #[must_use]
    pub fn from_keyboard(keyboard: &Keyboard) -> Option<Self> {
        if keyboard.is_empty() {
            return None;
        }
        Some(Self {
            inline_keyboard: keyboard
                .rows()
                .iter()
                .map(|row| row.iter().map(InlineKeyboardButton::from).collect())
                .collect(),
        })
    }
}

/// Link preview settings.
#[derive(Debug, Serialize)]
pub struct LinkPreviewOptions {
    /// Turns the preview off.
    pub is_disabled: bool,
}

/// `parse_mode` value for a text format; plain text omits the field.
#[must_use]
pub const fn parse_mode(format: TextFormat) -> Option<&'static str> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some("HTML"),
    }
}

/// `sendMessage` parameters.
#[derive(Debug, Serialize)]
pub struct SendMessageParams {
    /// Target chat.
    pub chat_id: i64,
    /// Message body.
    pub text: String,
    /// Markup mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    /// Link preview settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
    /// Inline keyboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// `editMessageText` parameters.
#[derive(Debug, Serialize)]
pub struct EditMessageTextParams {
    /// Chat holding the message.
    pub chat_id: i64,
    /// Message to replace.
    pub message_id: i64,
    /// New body.
    pub text: String,
    /// Markup mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    /// Link preview settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
    /// New inline keyboard; omitted removes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// `sendPhoto` parameters.
#[derive(Debug, Serialize)]
pub struct SendPhotoParams {
    /// Target chat.
    pub chat_id: i64,
    /// Photo URL or file ID.
    pub photo: String,
    /// Caption text.
    pub caption: String,
}

/// `deleteMessage` parameters.
#[derive(Debug, Serialize)]
pub struct DeleteMessageParams {
    /// Chat holding the message.
    pub chat_id: i64,
    /// Message to delete.
    pub message_id: i64,
}

/// `answerCallbackQuery` parameters.
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryParams<'a> {
    /// Query being acknowledged.
    pub callback_query_id: &'a str,
}

/// `getUpdates` parameters.
#[derive(Debug, Serialize)]
pub struct GetUpdatesParams {
    /// First update ID to return; confirms everything before it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Long-poll timeout in seconds.
    pub timeout: u64,
    /// Update kinds to receive.
    pub allowed_updates: &'static [&'static str],
}

/// Command menu entry.
#[derive(Debug, Serialize)]
pub struct BotCommandDto {
    /// Command name without the slash.
    pub command: &'static str,
    /// Menu description.
    pub description: &'static str,
}

/// `setMyCommands` parameters.
#[derive(Debug, Serialize)]
pub struct SetMyCommandsParams {
    /// Full command list.
    pub commands: Vec<BotCommandDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::NavAction;
    use serde_json::json;

    #[test]
    fn test_keyboard_serialization() {
        let keyboard = Keyboard::new()
            .row(vec![
                Button::link("Map", "https://yandex.ru/maps/?pt=1,2"),
                Button::action("Back", NavAction::AttractionList),
            ]);

        let markup = InlineKeyboardMarkup::from_keyboard(&keyboard).unwrap();

        assert_eq!(
            serde_json::to_value(markup).unwrap(),
            json!({
                "inline_keyboard": [[
                    {"text": "Map", "url": "https://yandex.ru/maps/?pt=1,2"},
                    {"text": "Back", "callback_data": "menu:attractions"}
                ]]
            })
        );
    }

    #[test]
    fn test_empty_keyboard_is_omitted() {
        let params = SendMessageParams {
            chat_id: 1,
            text: "hi".to_string(),
            parse_mode: parse_mode(TextFormat::Plain),
            link_preview_options: None,
            reply_markup: InlineKeyboardMarkup::from_keyboard(&Keyboard::new()),
        };

        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({"chat_id": 1, "text": "hi"})
        );
    }

    #[test]
    fn test_update_with_callback_query() {
        let raw = json!({
            "update_id": 10,
            "callback_query": {
                "id": "4382",
                "from": {"id": 7, "is_bot": false, "first_name": "Anna"},
                "message": {"message_id": 55, "chat": {"id": 7, "type": "private"}, "date": 1},
                "chat_instance": "-1",
                "data": "attraction:a"
            }
        });

        let update: UpdateDto = serde_json::from_value(raw).unwrap();
        let query = update.callback_query.unwrap();

        assert_eq!(query.data.as_deref(), Some("attraction:a"));
        assert_eq!(query.message.unwrap().message_id, 55);
        assert!(update.message.is_none());
    }

    #[test]
    fn test_error_envelope() {
        let raw = r#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 5","parameters":{"retry_after":5}}"#;

        let response: ApiResponse<bool> = serde_json::from_str(raw).unwrap();

        assert!(!response.ok);
        assert_eq!(response.error_code, Some(429));
        assert_eq!(response.parameters.unwrap().retry_after, Some(5));
    }
}
