/// Sign-in / sign-up card
///
/// Renders the simulated authentication form. All edits and submits go
/// back to the root as messages; nothing here mutates the session.

use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::session::{AuthMode, Phase, Session};
use crate::Message;

pub fn view(session: &Session) -> Element<'_, Message> {
    let card = match session.phase() {
        Phase::SignedIn => signed_in_card(),
        _ => sign_in_form(session),
    };

    container(card)
        .max_width(420)
        .padding(24)
        .style(container::rounded_box)
        .into()
}

fn signed_in_card<'a>() -> Element<'a, Message> {
    column![
        text("Welcome Back!").size(24),
        text("You're signed in and ready to capture AR photos.").size(14),
        button("Sign Out")
            .on_press(Message::SignOut)
            .padding(10)
            .width(Length::Fill),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}

fn sign_in_form(session: &Session) -> Element<'_, Message> {
    let (title, subtitle, toggle_label) = match session.mode {
        AuthMode::SignIn => (
            "Sign In",
            "Welcome back! Sign in to access your AR camera.",
            "Don't have an account? Sign up",
        ),
        AuthMode::SignUp => (
            "Create Account",
            "Join us to start your AR photography journey.",
            "Already have an account? Sign in",
        ),
    };

    // Disabled (no on_press) while the simulated check is pending
    let submit = if session.is_authenticating() {
        button(text("Processing...")).padding(10).width(Length::Fill)
    } else {
        button(text(title))
            .on_press(Message::SubmitAuth)
            .padding(10)
            .width(Length::Fill)
    };

    column![
        text(title).size(24),
        text(subtitle).size(14),
        text_input("Enter your email", &session.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::SubmitAuth)
            .padding(10),
        text_input("Enter your password", &session.password)
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SubmitAuth)
            .padding(10),
        submit,
        button(text(toggle_label).size(14))
            .on_press(Message::ToggleAuthMode)
            .style(button::text),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}
