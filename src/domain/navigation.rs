//! Navigation vocabulary: commands, button actions and screens.

use std::fmt;

use crate::domain::entities::{ChatId, MessageId};

/// Upper bound the messaging platform puts on a button payload, in bytes.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

const MENU_PREFIX: &str = "menu";
const ATTRACTION_PREFIX: &str = "attraction";

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotCommand {
    /// `/start`: main menu.
    Start,
    /// `/help`: usage notes.
    Help,
    /// `/attractions`: the catalog list.
    Attractions,
}

impl BotCommand {
    /// Every command, in the order published to the command menu.
    pub const ALL: [Self; 3] = [Self::Start, Self::Help, Self::Attractions];

    /// Parses message text such as `/start`, `/help@torzhok_bot` or `/attractions now`.
    ///
    /// A command addressed with `@username` is accepted only when it names
    /// `bot_username`; in group chats the others belong to other bots.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = match name.split_once('@') {
            Some((name, addressee)) => {
                let ours = bot_username.is_some_and(|username| {
                    addressee.eq_ignore_ascii_case(username.trim_start_matches('@'))
                });
                if !ours {
                    return None;
                }
                name
            }
            None => name,
        };

        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "attractions" => Some(Self::Attractions),
            _ => None,
        }
    }

    /// Command name without the leading slash.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Attractions => "attractions",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// Payload carried by an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// `menu:main`
    MainMenu,
    /// `menu:attractions`
    AttractionList,
    /// `menu:help`
    Help,
    /// `attraction:<id>`
    Attraction(String),
}

impl NavAction {
    /// Decodes a button payload (`menu:main`, `attraction:<id>`, ...).
    ///
    /// Returns `None` for payloads this bot never emits.
    #[must_use]
    pub fn decode(payload: &str) -> Option<Self> {
        let (kind, value) = payload.split_once(':')?;

        match (kind, value) {
            (MENU_PREFIX, "main") => Some(Self::MainMenu),
            (MENU_PREFIX, "attractions") => Some(Self::AttractionList),
            (MENU_PREFIX, "help") => Some(Self::Help),
            (ATTRACTION_PREFIX, id) => Some(Self::Attraction(id.to_string())),
            _ => None,
        }
    }

    /// Encodes the action into a button payload.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Longest identifier that still fits into a button payload.
    #[must_use]
    pub const fn max_identifier_len() -> usize {
        MAX_CALLBACK_DATA_LEN - ATTRACTION_PREFIX.len() - 1
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainMenu => write!(f, "{MENU_PREFIX}:main"),
            Self::AttractionList => write!(f, "{MENU_PREFIX}:attractions"),
            Self::Help => write!(f, "{MENU_PREFIX}:help"),
            Self::Attraction(id) => write!(f, "{ATTRACTION_PREFIX}:{id}"),
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Typed slash command.
    Command(BotCommand),
    /// Inline button press.
    Navigation(NavAction),
}

impl ActionKind {
    /// Screen this action leads to.
    #[must_use]
    pub fn target_screen(&self) -> Screen {
        match self {
            Self::Command(BotCommand::Start) | Self::Navigation(NavAction::MainMenu) => {
                Screen::MainMenu
            }
            Self::Command(BotCommand::Help) | Self::Navigation(NavAction::Help) => Screen::Help,
            Self::Command(BotCommand::Attractions) | Self::Navigation(NavAction::AttractionList) => {
                Screen::AttractionList
            }
            Self::Navigation(NavAction::Attraction(id)) => Screen::AttractionDetail(id.clone()),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => write!(f, "{command}"),
            Self::Navigation(action) => write!(f, "{action}"),
        }
    }
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Greeting with the top-level buttons.
    MainMenu,
    /// One button per catalog entry.
    AttractionList,
    /// Detail card for the given identifier.
    AttractionDetail(String),
    /// Usage notes.
    Help,
}

impl Screen {
    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MainMenu => "main_menu",
            Self::AttractionList => "attraction_list",
            Self::AttractionDetail(_) => "attraction_detail",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttractionDetail(id) => write!(f, "{}({id})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// An inbound action addressed to one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAction {
    /// Chat the action came from.
    pub chat_id: ChatId,
    /// What was asked for.
    pub kind: ActionKind,
    /// Message whose button was pressed, if any.
    pub origin: Option<MessageId>,
    /// Button press acknowledgement handle.
    pub callback_id: Option<String>,
    /// Sender's first name, used in the greeting.
    pub sender_name: Option<String>,
}

impl UserAction {
    /// Action for a typed command.
    #[must_use]
    pub const fn command(chat_id: ChatId, command: BotCommand) -> Self {
        Self {
            chat_id,
            kind: ActionKind::Command(command),
            origin: None,
            callback_id: None,
            sender_name: None,
        }
    }

    /// Action for a button press on `origin`.
    #[must_use]
    pub fn button(
        chat_id: ChatId,
        action: NavAction,
        origin: Option<MessageId>,
        callback_id: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            kind: ActionKind::Navigation(action),
            origin,
            callback_id: Some(callback_id.into()),
            sender_name: None,
        }
    }

    /// Sets the sender's display name.
    #[must_use]
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }
}
