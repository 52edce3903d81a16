/// Automation webhook card
///
/// Lets the user paste an n8n webhook URL and fire the capture event at
/// it. The trigger is optimistic; the root never learns whether the
/// remote side accepted it.

use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

pub fn view(url: &str, busy: bool) -> Element<'_, Message> {
    let trigger = if busy {
        button(text("Triggering...")).padding(10).width(Length::Fill)
    } else {
        button(text("Trigger Workflow"))
            .on_press(Message::TriggerWebhook)
            .padding(10)
            .width(Length::Fill)
    };

    let card = column![
        text("n8n Automation").size(24),
        text("Connect your n8n workflows to automate backend processes.").size(14),
        text_input("https://your-n8n.app/webhook/...", url)
            .on_input(Message::WebhookUrlChanged)
            .on_submit(Message::TriggerWebhook)
            .padding(10),
        trigger,
        text("This sends user data and photo capture events to your workflow.").size(12),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(card)
        .max_width(420)
        .padding(24)
        .style(container::rounded_box)
        .into()
}
