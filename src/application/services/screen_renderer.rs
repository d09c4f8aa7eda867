//! Screen rendering.
//!
//! Every function here is pure: it turns the data a screen needs into a
//! [`RenderInstruction`] and never talks to the transport.

use crate::application::dto::RenderInstruction;
use crate::domain::catalog::Catalog;
use crate::domain::entities::{Button, Keyboard, PointOfInterest};
use crate::domain::navigation::{BotCommand, NavAction};
use crate::domain::ports::{OutgoingPhoto, OutgoingText};

/// Project name used in greetings.
pub const PROJECT_NAME: &str = "Цифровой Торжокъ";

/// Heading of the attraction list.
pub const LIST_HEADER: &str = "Выберите достопримечательность, чтобы узнать подробности:";
/// Shown instead of the list when the catalog is empty.
pub const EMPTY_CATALOG_NOTICE: &str =
    "Извините, список достопримечательностей пока пуст. Попробуйте позже.";
/// Shown for identifiers missing from the catalog.
pub const NOT_FOUND_NOTICE: &str =
    "К сожалению, не удалось найти информацию об этой достопримечательности.";

// Button captions.
#[allow(missing_docs)]
pub const ATTRACTIONS_LABEL: &str = "🏛 Достопримечательности";
#[allow(missing_docs)]
pub const HELP_LABEL: &str = "❓ Помощь";
#[allow(missing_docs)]
pub const BACK_TO_MENU_LABEL: &str = "« Главное меню";
#[allow(missing_docs)]
pub const BACK_TO_LIST_LABEL: &str = "« К списку";
#[allow(missing_docs)]
pub const MAP_LABEL: &str = "📍 Точка на карте";
#[allow(missing_docs)]
pub const ROUTE_LABEL: &str = "🚗 Построить маршрут";

/// Short description shown in the client's command menu.
#[must_use]
pub const fn command_description(command: BotCommand) -> &'static str {
    match command {
        BotCommand::Start => "Приветствие и главное меню",
        BotCommand::Help => "Справка по командам",
        BotCommand::Attractions => "Список достопримечательностей",
    }
}

/// Greeting with the two top-level actions.
#[must_use]
pub fn main_menu(sender_name: Option<&str>) -> RenderInstruction {
    let greeting = match sender_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Здравствуйте, {name}!"),
        None => "Здравствуйте!".to_string(),
    };
    let text = format!(
        "{greeting} Добро пожаловать в проект «{PROJECT_NAME}».\n\
         Я помогу вам узнать о достопримечательностях города и проложить маршрут."
    );

    let keyboard = Keyboard::new()
        .button(Button::action(ATTRACTIONS_LABEL, NavAction::AttractionList))
        .button(Button::action(HELP_LABEL, NavAction::Help));

    RenderInstruction::new(OutgoingText::new(text).with_keyboard(keyboard))
}

/// Usage notes listing every command.
#[must_use]
pub fn help() -> RenderInstruction {
    let commands: String = BotCommand::ALL
        .iter()
        .map(|command| format!("{command} — {};\n", command_description(*command)))
        .collect();
    let text = format!(
        "Доступные команды:\n{commands}\
         Нажмите на интересующий объект, чтобы получить подробности и ссылки на карту."
    );

    let keyboard =
        Keyboard::new().button(Button::action(BACK_TO_MENU_LABEL, NavAction::MainMenu));

    RenderInstruction::new(OutgoingText::new(text).with_keyboard(keyboard))
}

/// One button per entry plus a way back; an empty catalog gets a bare notice.
#[must_use]
pub fn attraction_list(catalog: &Catalog) -> RenderInstruction {
    if catalog.is_empty() {
        return RenderInstruction::new(OutgoingText::new(EMPTY_CATALOG_NOTICE));
    }

    let keyboard = catalog
        .all()
        .iter()
        .fold(Keyboard::new(), |keyboard, entry| {
            keyboard.button(Button::action(
                entry.name(),
                NavAction::Attraction(entry.id().to_string()),
            ))
        })
        .button(Button::action(BACK_TO_MENU_LABEL, NavAction::MainMenu));

    RenderInstruction::new(OutgoingText::new(LIST_HEADER).with_keyboard(keyboard))
}

/// Detail card with map and route links, plus the entry's photo.
#[must_use]
pub fn attraction_detail(entry: &PointOfInterest) -> RenderInstruction {
    let text = format!(
        "<b>{name}</b>\nАдрес: {address}\n\n{description}",
        name = escape_html(entry.name()),
        address = escape_html(entry.address()),
        description = escape_html(entry.description()),
    );

    let keyboard = Keyboard::new()
        .row(vec![
            Button::link(MAP_LABEL, entry.map_link()),
            Button::link(ROUTE_LABEL, entry.route_link()),
        ])
        .button(Button::action(BACK_TO_LIST_LABEL, NavAction::AttractionList));

    RenderInstruction::new(
        OutgoingText::new(text)
            .html()
            .without_link_preview()
            .with_keyboard(keyboard),
    )
    .with_photo(OutgoingPhoto::new(entry.image_url(), entry.name()))
}

/// Notice for an unknown identifier, with a way back to the list.
#[must_use]
pub fn not_found() -> RenderInstruction {
    let keyboard =
        Keyboard::new().button(Button::action(BACK_TO_LIST_LABEL, NavAction::AttractionList));

    RenderInstruction::new(OutgoingText::new(NOT_FOUND_NOTICE).with_keyboard(keyboard))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
