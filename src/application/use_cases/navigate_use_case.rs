//! Menu navigation use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::RenderInstruction;
use crate::application::services::PhotoTracker;
use crate::application::services::screen_renderer;
use crate::domain::catalog::Catalog;
use crate::domain::entities::{ChatId, MessageId};
use crate::domain::errors::{NavigationError, TransportError};
use crate::domain::navigation::{Screen, UserAction};
use crate::domain::ports::{OutgoingPhoto, OutgoingText, TransportPort};

/// Result of handling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A screen was shown.
    Rendered {
        /// Screen now on display.
        screen: Screen,
        /// Message holding the screen text.
        message_id: MessageId,
        /// Photo sent with the screen.
        photo: Option<MessageId>,
    },
    /// The requested attraction does not exist; a notice was shown instead.
    NotFound {
        /// Identifier that was asked for.
        id: String,
    },
}

/// Turns user actions into rendered screens.
///
/// Holds no screen history. The only per-chat state is the photo slot, so
/// each chat must feed its actions in order.
#[derive(Clone)]
pub struct NavigateUseCase {
    catalog: Arc<Catalog>,
    transport: Arc<dyn TransportPort>,
    photos: Arc<PhotoTracker>,
}

impl NavigateUseCase {
    /// Creates new navigation use case.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, transport: Arc<dyn TransportPort>) -> Self {
        Self {
            catalog,
            transport,
            photos: Arc::new(PhotoTracker::new()),
        }
    }

    #[cfg(test)]
    fn photo_tracker(&self) -> &PhotoTracker {
        &self.photos
    }

    /// Handles one action for one chat.
    ///
    /// # Errors
    /// Returns error if the new screen or its photo could not be delivered.
    /// Cleanup failures are logged and never returned.
    pub async fn execute(&self, action: &UserAction) -> Result<NavigationOutcome, NavigationError> {
        let chat_id = action.chat_id;
        debug!(%chat_id, action = %action.kind, "Handling action");

        if let Some(callback_id) = &action.callback_id {
            self.acknowledge(callback_id).await;
        }

        let screen = action.kind.target_screen();
        let instruction = match &screen {
            Screen::MainMenu => screen_renderer::main_menu(action.sender_name.as_deref()),
            Screen::Help => screen_renderer::help(),
            Screen::AttractionList => screen_renderer::attraction_list(&self.catalog),
            Screen::AttractionDetail(id) => {
                let Some(entry) = self.catalog.get(id) else {
                    debug!(%chat_id, id = %id, "Attraction not found");
                    let notice = screen_renderer::not_found();
                    self.show(action, notice.message)
                        .await
                        .map_err(|e| NavigationError::render("not_found", e))?;
                    return Ok(NavigationOutcome::NotFound { id: id.clone() });
                };
                screen_renderer::attraction_detail(entry)
            }
        };

        self.clear_photo(chat_id).await;

        let RenderInstruction { message, photo } = instruction;
        let message_id = self
            .show(action, message)
            .await
            .map_err(|e| NavigationError::render(screen.to_string(), e))?;

        let photo_id = match photo {
            Some(photo) => Some(self.send_photo(chat_id, &screen, photo).await?),
            None => None,
        };

        info!(%chat_id, %screen, %message_id, "Screen rendered");

        Ok(NavigationOutcome::Rendered {
            screen,
            message_id,
            photo: photo_id,
        })
    }

    /// Edits the message whose button was pressed, or sends a new one.
    async fn show(
        &self,
        action: &UserAction,
        message: OutgoingText,
    ) -> Result<MessageId, TransportError> {
        let chat_id = action.chat_id;

        let Some(origin) = action.origin else {
            return self.transport.send_text(chat_id, message).await;
        };

        match self
            .transport
            .edit_text(chat_id, origin, message.clone())
            .await
        {
            Ok(()) => Ok(origin),
            Err(e) if e.is_not_modified() => {
                debug!(%chat_id, message_id = %origin, "Screen unchanged");
                Ok(origin)
            }
            Err(e @ TransportError::Api { .. }) => {
                warn!(
                    %chat_id,
                    message_id = %origin,
                    error = %e,
                    "Cannot edit message, sending a new one"
                );
                self.transport.send_text(chat_id, message).await
            }
            Err(e) => Err(e),
        }
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        screen: &Screen,
        photo: OutgoingPhoto,
    ) -> Result<MessageId, NavigationError> {
        let message_id = self
            .transport
            .send_photo(chat_id, photo)
            .await
            .map_err(|e| NavigationError::photo(screen.to_string(), e))?;

        if let Some(stale) = self.photos.record(chat_id, message_id) {
            warn!(%chat_id, message_id = %stale, "Replaced a photo that was never cleared");
        }

        Ok(message_id)
    }

    /// Best-effort removal of the chat's live photo.
    async fn clear_photo(&self, chat_id: ChatId) {
        let Some(message_id) = self.photos.take(chat_id) else {
            return;
        };

        match self.transport.delete_message(chat_id, message_id).await {
            Ok(()) => debug!(%chat_id, %message_id, "Previous photo removed"),
            Err(e) => debug!(%chat_id, %message_id, error = %e, "Failed to remove previous photo"),
        }
    }

    async fn acknowledge(&self, callback_id: &str) {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            debug!(error = %e, "Failed to acknowledge button press");
        }
    }
}
