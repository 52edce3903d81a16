/// AR viewer panel
///
/// Stacks the animated overlay canvas on top of the captured photo and
/// exposes the three transform controls (zoom in, zoom out, rotate) plus
/// the "New Photo" action that ends the capture session.

use iced::widget::image::Handle;
use iced::widget::{button, canvas, column, container, horizontal_space, image, row, stack, text};
use iced::{alignment, Alignment, ContentFit, Element, Length};

use crate::overlay::scene::OverlayScene;
use crate::state::transform::TransformParams;
use crate::Message;

pub fn view<'a>(photo: &Handle, transform: TransformParams, clock: f32) -> Element<'a, Message> {
    let background = image(photo.clone())
        .content_fit(ContentFit::Cover)
        .width(Length::Fill)
        .height(Length::Fill);

    let scene = canvas(OverlayScene { transform, clock })
        .width(Length::Fill)
        .height(Length::Fill);

    let controls = column![
        button(text("+").size(18)).on_press(Message::ScaleUp).padding(8),
        button(text("-").size(18)).on_press(Message::ScaleDown).padding(8),
        button(text("⟳").size(18)).on_press(Message::RotateModel).padding(8),
    ]
    .spacing(8);

    let composed = stack![
        background,
        scene,
        container(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .padding(16),
    ]
    .width(Length::Fill)
    .height(440);

    let caption = row![
        column![
            text("AR Experience Active").size(20),
            text(format!(
                "Scale: {:.1}x \u{00b7} Rotation: {:.0}\u{00b0}",
                transform.scale,
                transform.display_rotation()
            ))
            .size(14),
        ]
        .spacing(4),
        horizontal_space(),
        button("New Photo").on_press(Message::NewPhoto).padding(10),
    ]
    .align_y(Alignment::Center)
    .spacing(16);

    container(column![composed, caption].spacing(16))
        .max_width(960)
        .padding(24)
        .style(container::rounded_box)
        .into()
}
