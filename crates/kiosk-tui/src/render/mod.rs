//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use kiosk_app::{AppState, Screen};

use crate::theme::palette;
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure: reads the state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let session = &state.session;
    match state.screen() {
        Screen::Loading => frame.render_widget(
            widgets::StatusScreen::Loading {
                frame: state.spinner_frame,
            },
            area,
        ),
        Screen::LoadingGame => frame.render_widget(
            widgets::StatusScreen::ConnectingGame {
                frame: state.spinner_frame,
            },
            area,
        ),
        Screen::Blocked => frame.render_widget(
            widgets::StatusScreen::Blocked {
                device: session.device_id.as_ref(),
            },
            area,
        ),
        Screen::Error => frame.render_widget(
            widgets::StatusScreen::Error {
                message: session
                    .error_message
                    .as_deref()
                    .unwrap_or("Unexpected error."),
            },
            area,
        ),
        Screen::Lobby => render_lobby(frame, state, area),
        Screen::Game => render_game(frame, state, area),
    }

    // Overlays: alert stays on top of the confirm dialog
    if let Some(dialog) = &state.confirm_dialog {
        frame.render_widget(widgets::ConfirmDialog::new(dialog), area);
    }
    if let Some(message) = &state.alert {
        frame.render_widget(widgets::AlertDialog::new(message), area);
    }
}

fn render_lobby(frame: &mut Frame, state: &AppState, area: Rect) {
    let [header, catalog, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let credits = state.credits_display();
    frame.render_widget(
        widgets::LobbyHeader::new(state.session.device_id.as_ref(), &credits),
        header,
    );

    let padded = Rect::new(
        catalog.x + 1,
        catalog.y + catalog.height.min(1),
        catalog.width.saturating_sub(2),
        catalog.height.saturating_sub(1),
    );
    frame.render_widget(
        widgets::CatalogGrid::new(&state.session.catalog, state.lobby.selected)
            .fallback(state.session.catalog_is_fallback),
        padded,
    );

    frame.render_widget(
        widgets::Footer::new(&state.settings.api.client_version),
        footer,
    );
}

fn render_game(frame: &mut Frame, state: &AppState, area: Rect) {
    let title = state.session.active_title().unwrap_or_default();
    let credits = state.credits_display();

    let [toolbar, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    frame.render_widget(widgets::GameToolbar::new(title, &credits), toolbar);
    frame.render_widget(widgets::GameBody::new(title), body);
}
