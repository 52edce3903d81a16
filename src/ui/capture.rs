/// Camera capture panel
///
/// Two states: an idle card inviting the user to start the camera, and a
/// streaming view with a live preview plus stop/capture controls. Shown
/// only while signed in and no photo is held.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::Message;

pub fn view<'a>(preview: Option<&Handle>, camera_error: Option<&'a str>) -> Element<'a, Message> {
    let panel = match preview {
        Some(handle) => streaming(handle),
        None => idle(camera_error),
    };

    container(panel)
        .max_width(720)
        .padding(24)
        .style(container::rounded_box)
        .into()
}

fn idle(camera_error: Option<&str>) -> Element<'_, Message> {
    let mut card = column![
        text("Ready to Capture?").size(28),
        text("Start your camera to capture photos for the AR experience.").size(14),
        button("Start Camera")
            .on_press(Message::StartCamera)
            .padding(10),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    if let Some(error) = camera_error {
        card = card.push(text(error).size(13).style(text::danger));
    }

    card.into()
}

fn streaming<'a>(preview: &Handle) -> Element<'a, Message> {
    column![
        image(preview.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(360),
        row![
            button("Stop").on_press(Message::StopCamera).padding(10),
            button("Capture")
                .on_press(Message::CapturePhoto)
                .padding(10),
        ]
        .spacing(16),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}
