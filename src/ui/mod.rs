/// UI module
///
/// This module builds the widget tree:
/// - Sign-in / sign-up card (auth.rs)
/// - Camera capture panel with live preview (capture.rs)
/// - Photo + overlay viewer with transform controls (viewer.rs)
/// - Webhook trigger card (webhook.rs)
/// plus the static marketing chrome below.

use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::Message;

pub mod auth;
pub mod capture;
pub mod viewer;
pub mod webhook;

/// Hero header shown at the top of the page
pub fn header<'a>() -> Element<'a, Message> {
    let hero = column![
        text("AR Camera Studio").size(48),
        text("Capture photos and bring them to life with interactive 3D AR models.").size(18),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    container(hero)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(30)
        .into()
}

/// The three feature blurbs from the marketing section
pub fn features<'a>() -> Element<'a, Message> {
    row![
        feature(
            "\u{1F4F7}",
            "Smart Camera",
            "High-quality photo capture with settings tuned for AR overlays.",
        ),
        feature(
            "\u{1F3AF}",
            "Interactive AR",
            "Real-time 3D model rendering with scale and rotation controls.",
        ),
        feature(
            "\u{26A1}",
            "Auto Workflows",
            "Seamless n8n integration for automated backend processing.",
        ),
    ]
    .spacing(24)
    .into()
}

fn feature<'a>(icon: &'a str, title: &'a str, blurb: &'a str) -> Element<'a, Message> {
    let card = column![
        text(icon).size(28),
        text(title).size(18),
        text(blurb).size(13),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .max_width(280);

    container(card)
        .padding(20)
        .style(container::rounded_box)
        .into()
}

pub fn footer<'a>() -> Element<'a, Message> {
    container(text("Built with Rust, iced, and n8n automation").size(13))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(20)
        .into()
}
