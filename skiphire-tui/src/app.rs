use skiphire_core::{
    model::{EnrichedOffering, OfferingId},
    ports::BookingPort,
    service::SkipSelectionService,
    view_model::ViewEvent,
};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pane {
    Offerings,
    Details,
}

pub(crate) struct App {
    pub service: SkipSelectionService,
    pub events: UnboundedReceiver<ViewEvent>,

    pub cursor: usize,
    pub focus: Pane,

    pub message: Option<String>,
}

/// Booking collaborator that only tells the user what was chosen.
#[derive(Default)]
struct BookingNotice(Option<String>);

impl BookingPort for BookingNotice {
    fn confirm(&mut self, offering: &EnrichedOffering) {
        self.0 = Some(format!(
            "You selected {} yard skip!",
            offering.offering.size
        ));
    }
}

impl App {
    pub(crate) fn new(mut service: SkipSelectionService) -> Self {
        let events = service.subscribe();
        Self {
            service,
            events,
            cursor: 0,
            focus: Pane::Offerings,
            message: None,
        }
    }

    fn offering_count(&self) -> usize {
        self.service.view_model().offerings().len()
    }

    pub(crate) fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub(crate) fn move_down(&mut self) {
        if self.cursor + 1 < self.offering_count() {
            self.cursor += 1;
        }
    }

    pub(crate) fn select_current(&mut self) {
        let Some(offering) = self.service.view_model().offerings().get(self.cursor) else {
            return;
        };
        let id = offering.id();
        let size = offering.offering.size;

        if self.service.select(id) {
            self.message = None;
        } else {
            self.message = Some(format!("The {size} yard skip is unavailable here"));
        }
        self.sync_events();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.service.clear();
        self.focus = Pane::Offerings;
        self.message = None;
    }

    pub(crate) fn book(&mut self) {
        let mut notice = BookingNotice::default();
        self.message = if self.service.confirm(&mut notice) {
            notice.0
        } else {
            Some("Select a skip first".into())
        };
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Offerings if self.service.view_model().details_visible() => Pane::Details,
            _ => Pane::Offerings,
        };
    }

    /// Drain view events; a focus request moves the user into the details pane.
    pub(crate) fn sync_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ViewEvent::FocusDetails { id } => self.focus_details(id),
            }
        }
    }

    fn focus_details(&mut self, id: OfferingId) {
        if let Some(row) = self
            .service
            .view_model()
            .offerings()
            .iter()
            .position(|offering| offering.id() == id)
        {
            self.cursor = row;
        }
        self.focus = Pane::Details;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{loaded_app, skip};

    #[tokio::test]
    async fn selecting_moves_focus_to_details() {
        let mut app = loaded_app(vec![skip(1, 4, false), skip(2, 6, false)]).await;
        app.move_down();
        app.select_current();

        assert_eq!(app.focus, Pane::Details);
        assert_eq!(app.cursor, 1);
        assert_eq!(app.service.view_model().selected_id(), Some(OfferingId(2)));
    }

    #[tokio::test]
    async fn forbidden_row_reports_unavailable() {
        let mut app = loaded_app(vec![skip(1, 4, false), skip(2, 40, true)]).await;
        app.move_down();
        app.select_current();

        assert_eq!(app.focus, Pane::Offerings);
        assert_eq!(app.service.view_model().selected_id(), None);
        assert_eq!(
            app.message.as_deref(),
            Some("The 40 yard skip is unavailable here")
        );
    }

    #[tokio::test]
    async fn booking_without_selection_asks_for_one() {
        let mut app = loaded_app(vec![skip(1, 8, false)]).await;
        app.book();
        assert_eq!(app.message.as_deref(), Some("Select a skip first"));

        app.select_current();
        app.book();
        assert_eq!(app.message.as_deref(), Some("You selected 8 yard skip!"));
    }

    #[tokio::test]
    async fn cursor_stays_within_the_list() {
        let mut app = loaded_app(vec![skip(1, 4, false), skip(2, 6, false)]).await;
        app.move_up();
        assert_eq!(app.cursor, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 1);
    }
}
