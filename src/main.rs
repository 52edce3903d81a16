use iced::time::Instant;
use iced::widget::image::Handle as ImageHandle;
use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod capture;
mod overlay;
mod state;
mod ui;
mod webhook;

use capture::device::{CameraDevice, CaptureError, FrameSource};
use capture::photo::{frame_to_rgba, CapturedPhoto};
use state::session::{AuthMode, AuthTicket, Session, AUTH_DELAY};
use state::transform::TransformParams;
use webhook::CaptureEvent;

/// Animation and preview refresh interval (~30 Hz)
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Main application state
///
/// The root owns everything; child views render from references and send
/// edits back as messages, so every mutation goes through `update`.
struct ArCameraStudio {
    /// Simulated sign-in session gating the capture features
    session: Session,
    /// Open camera, present only while the live preview is on screen.
    /// Shared with the background task that grabs preview frames.
    camera: Option<Arc<Mutex<Box<dyn FrameSource>>>>,
    /// Latest preview frame, refreshed while streaming
    preview: Option<ImageHandle>,
    /// A preview grab is running; don't queue another until it lands
    preview_in_flight: bool,
    /// Last camera failure, shown on the idle capture card until a retry
    camera_error: Option<String>,
    /// The captured photo, alive until the user asks for a new one
    photo: Option<CapturedPhoto>,
    /// Display handle for the captured photo, built once at capture time
    photo_handle: Option<ImageHandle>,
    /// Overlay scale/rotation controls
    transform: TransformParams,
    webhook_url: String,
    webhook_busy: bool,
    /// Status message to display to the user
    status: String,
    started_at: Instant,
    /// Seconds since launch, advanced by ticks; drives the overlay loops
    clock: f32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // Sign-in form
    EmailChanged(String),
    PasswordChanged(String),
    ToggleAuthMode,
    SubmitAuth,
    /// The simulated credential check finished
    AuthCompleted(AuthTicket),
    SignOut,
    // Camera
    StartCamera,
    StopCamera,
    CapturePhoto,
    NewPhoto,
    // Overlay controls
    ScaleUp,
    ScaleDown,
    RotateModel,
    // Webhook
    WebhookUrlChanged(String),
    TriggerWebhook,
    WebhookFinished,
    /// Animation / preview heartbeat
    Tick(Instant),
    /// A background preview grab finished (None on a dropped frame)
    PreviewFrame(Option<ImageHandle>),
}

impl ArCameraStudio {
    fn new() -> (Self, Task<Message>) {
        (
            ArCameraStudio {
                session: Session::new(),
                camera: None,
                preview: None,
                preview_in_flight: false,
                camera_error: None,
                photo: None,
                photo_handle: None,
                transform: TransformParams::new(),
                webhook_url: String::new(),
                webhook_busy: false,
                status: String::from("Sign in to start capturing AR photos."),
                started_at: Instant::now(),
                clock: 0.0,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EmailChanged(email) => {
                self.session.email = email;
            }
            Message::PasswordChanged(password) => {
                self.session.password = password;
            }
            Message::ToggleAuthMode => {
                self.session.toggle_mode();
            }
            Message::SubmitAuth => match self.session.submit() {
                Ok(ticket) => {
                    self.status = String::from("Checking your credentials...");
                    return Task::perform(
                        async move {
                            tokio::time::sleep(AUTH_DELAY).await;
                            ticket
                        },
                        Message::AuthCompleted,
                    );
                }
                Err(error) => {
                    self.status = format!("{error}.");
                }
            },
            Message::AuthCompleted(ticket) => {
                // A stale ticket (sign-out happened meanwhile) is dropped
                if self.session.complete(ticket) {
                    let verb = match self.session.mode {
                        AuthMode::SignIn => "signed in",
                        AuthMode::SignUp => "signed up",
                    };
                    self.status = format!("Successfully {verb}! Welcome to AR Camera.");
                }
            }
            Message::SignOut => {
                self.close_camera();
                self.session.sign_out();
                self.status = String::from("Successfully logged out.");
            }
            Message::StartCamera => {
                if self.camera.is_none() {
                    match CameraDevice::open_default() {
                        Ok(device) => {
                            self.camera =
                                Some(Arc::new(Mutex::new(Box::new(device) as Box<dyn FrameSource>)));
                            self.camera_error = None;
                            self.status =
                                String::from("Camera ready! Tap capture to take a photo.");
                        }
                        Err(error) => {
                            tracing::warn!(%error, "camera start failed");
                            self.status = match &error {
                                CaptureError::PermissionDenied(_) => String::from(
                                    "Camera access denied. Please enable camera permissions.",
                                ),
                                _ => String::from("Camera unavailable. Connect one and retry."),
                            };
                            self.camera_error = Some(error.to_string());
                        }
                    }
                }
            }
            Message::StopCamera => {
                self.close_camera();
                self.status = String::from("Camera stopped.");
            }
            Message::CapturePhoto => {
                if let Some(camera) = self.camera.as_ref() {
                    let snapshot = match camera.lock() {
                        Ok(mut guard) => guard
                            .grab()
                            .and_then(|frame| CapturedPhoto::from_frame(&frame)),
                        Err(_) => Err(CaptureError::Frame("camera lock poisoned".into())),
                    };
                    match snapshot {
                        Ok(photo) => {
                            tracing::debug!(
                                handoff_bytes = photo.data_uri().len(),
                                "photo encoded for handoff"
                            );
                            self.photo_handle = Some(ImageHandle::from_rgba(
                                photo.width,
                                photo.height,
                                photo.rgba.clone(),
                            ));
                            self.photo = Some(photo);
                            self.transform.reset();
                            self.close_camera();
                            self.status = String::from("Photo captured! AR models loading...");
                        }
                        Err(error) => {
                            tracing::warn!(%error, "photo capture failed");
                            self.status = String::from("Could not capture a photo. Try again.");
                        }
                    }
                }
            }
            Message::NewPhoto => {
                self.photo = None;
                self.photo_handle = None;
                self.transform.reset();
                self.status = String::from("Ready for a new photo.");
            }
            Message::ScaleUp => {
                self.transform.increase_scale();
            }
            Message::ScaleDown => {
                self.transform.decrease_scale();
            }
            Message::RotateModel => {
                self.transform.rotate_step();
            }
            Message::WebhookUrlChanged(url) => {
                self.webhook_url = url;
            }
            Message::TriggerWebhook => {
                if self.webhook_url.trim().is_empty() {
                    self.status = String::from("Please enter your n8n webhook URL.");
                } else {
                    // Optimistic: the response is never inspected, so this
                    // is all the confirmation the user will get
                    self.webhook_busy = true;
                    self.status = String::from(
                        "n8n workflow triggered! Check your n8n dashboard for execution details.",
                    );

                    let email = if self.session.email.trim().is_empty() {
                        "demo@example.com"
                    } else {
                        self.session.email.as_str()
                    };
                    let event = CaptureEvent::photo_captured(email);
                    return Task::perform(
                        webhook::trigger(self.webhook_url.clone(), event),
                        |_| Message::WebhookFinished,
                    );
                }
            }
            Message::WebhookFinished => {
                self.webhook_busy = false;
            }
            Message::Tick(now) => {
                self.clock = now.duration_since(self.started_at).as_secs_f32();

                // Kick off a background preview grab while streaming, one
                // at a time so a slow camera can't pile up tasks or stall
                // the UI thread
                if let Some(camera) = self.camera.as_ref().map(Arc::clone) {
                    if !self.preview_in_flight {
                        self.preview_in_flight = true;
                        return Task::perform(grab_preview(camera), Message::PreviewFrame);
                    }
                }
            }
            Message::PreviewFrame(handle) => {
                self.preview_in_flight = false;
                // A grab can land after the camera was closed; drop it
                if self.camera.is_some() {
                    if let Some(handle) = handle {
                        self.preview = Some(handle);
                    }
                }
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut page = column![ui::header(), ui::auth::view(&self.session)]
            .spacing(30)
            .padding(20)
            .align_x(Alignment::Center);

        if self.session.is_signed_in() {
            page = match &self.photo_handle {
                Some(photo) => page.push(ui::viewer::view(photo, self.transform, self.clock)),
                None => page.push(ui::capture::view(
                    self.preview.as_ref(),
                    self.camera_error.as_deref(),
                )),
            };
            page = page.push(ui::webhook::view(&self.webhook_url, self.webhook_busy));
        }

        page = page
            .push(text(&self.status).size(16))
            .push(ui::features())
            .push(ui::footer());

        scrollable(container(page).width(Length::Fill).center_x(Length::Fill)).into()
    }

    /// Tick only while something on screen is animating
    fn subscription(&self) -> Subscription<Message> {
        let animating =
            self.camera.is_some() || (self.session.is_signed_in() && self.photo.is_some());
        if animating {
            iced::time::every(TICK_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Release the camera stream, if one is open. Safe to call on any
    /// path that leaves the capture screen.
    fn close_camera(&mut self) {
        if let Some(camera) = self.camera.take() {
            match camera.lock() {
                Ok(mut guard) => guard.close(),
                Err(_) => tracing::warn!("camera lock poisoned during shutdown"),
            }
        }
        self.preview = None;
    }
}

/// Grab one preview frame off the UI thread. The camera's blocking read
/// runs on the blocking pool; a dropped frame yields `None`.
async fn grab_preview(camera: Arc<Mutex<Box<dyn FrameSource>>>) -> Option<ImageHandle> {
    let grabbed = tokio::task::spawn_blocking(move || match camera.lock() {
        Ok(mut guard) => guard.grab(),
        Err(_) => Err(CaptureError::Frame("camera lock poisoned".into())),
    })
    .await;

    match grabbed {
        Ok(Ok(frame)) => {
            let (width, height) = frame.dimensions();
            Some(ImageHandle::from_rgba(width, height, frame_to_rgba(&frame)))
        }
        Ok(Err(error)) => {
            tracing::debug!(%error, "preview frame dropped");
            None
        }
        Err(error) => {
            tracing::debug!(%error, "preview task failed");
            None
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "AR Camera Studio",
        ArCameraStudio::update,
        ArCameraStudio::view,
    )
    .subscription(ArCameraStudio::subscription)
    .theme(ArCameraStudio::theme)
    .centered()
    .run_with(ArCameraStudio::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Camera stand-in producing a fixed synthetic frame
    struct TestSource {
        closed: Arc<AtomicBool>,
    }

    impl FrameSource for TestSource {
        fn grab(&mut self) -> Result<RgbImage, CaptureError> {
            Ok(RgbImage::from_pixel(32, 24, image::Rgb([10, 20, 30])))
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn app_with_camera() -> (ArCameraStudio, Arc<AtomicBool>) {
        let (mut app, _) = ArCameraStudio::new();
        let closed = Arc::new(AtomicBool::new(false));
        app.camera = Some(Arc::new(Mutex::new(Box::new(TestSource {
            closed: closed.clone(),
        }) as Box<dyn FrameSource>)));
        (app, closed)
    }

    #[test]
    fn test_capture_releases_camera_and_resets_transform() {
        let (mut app, closed) = app_with_camera();
        app.transform.scale = 2.2;
        app.transform.rotation = 90.0;

        let _ = app.update(Message::CapturePhoto);

        assert!(app.photo.is_some());
        assert!(app.photo_handle.is_some());
        assert!(app.camera.is_none());
        assert!(closed.load(Ordering::SeqCst));
        assert_eq!(app.transform, TransformParams::default());

        let photo = app.photo.as_ref().unwrap();
        assert_eq!((photo.width, photo.height), (32, 24));
    }

    #[test]
    fn test_new_photo_clears_capture_session() {
        let (mut app, _) = app_with_camera();
        let _ = app.update(Message::CapturePhoto);
        let _ = app.update(Message::ScaleUp);
        let _ = app.update(Message::RotateModel);
        assert_ne!(app.transform, TransformParams::default());

        let _ = app.update(Message::NewPhoto);

        assert!(app.photo.is_none());
        assert!(app.photo_handle.is_none());
        assert_eq!(app.transform, TransformParams::default());
    }

    #[test]
    fn test_sign_out_releases_open_camera() {
        let (mut app, closed) = app_with_camera();
        app.preview = Some(ImageHandle::from_rgba(1, 1, vec![0, 0, 0, 255]));

        let _ = app.update(Message::SignOut);

        assert!(app.camera.is_none());
        assert!(app.preview.is_none());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_empty_credentials_produce_validation_notice() {
        let (mut app, _) = ArCameraStudio::new();
        let _ = app.update(Message::SubmitAuth);

        assert!(!app.session.is_signed_in());
        assert!(app.status.contains("fill in all fields"));
    }

    #[test]
    fn test_empty_webhook_url_is_rejected_without_dispatch() {
        let (mut app, _) = ArCameraStudio::new();
        let _ = app.update(Message::TriggerWebhook);

        assert!(!app.webhook_busy);
        assert!(app.status.contains("webhook URL"));
    }

    #[tokio::test]
    async fn test_preview_grab_produces_frame() {
        let camera: Arc<Mutex<Box<dyn FrameSource>>> = Arc::new(Mutex::new(Box::new(
            TestSource {
                closed: Arc::new(AtomicBool::new(false)),
            },
        )));

        let handle = grab_preview(camera).await;
        assert!(handle.is_some());
    }

    #[test]
    fn test_tick_runs_one_preview_grab_at_a_time() {
        let (mut app, _) = app_with_camera();
        assert!(!app.preview_in_flight);

        let _ = app.update(Message::Tick(Instant::now()));
        assert!(app.preview_in_flight);

        // The grab lands: the frame is shown and the slot frees up
        let frame = ImageHandle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let _ = app.update(Message::PreviewFrame(Some(frame)));
        assert!(!app.preview_in_flight);
        assert!(app.preview.is_some());
    }

    #[test]
    fn test_late_preview_is_dropped_after_camera_closes() {
        let (mut app, _) = app_with_camera();
        let _ = app.update(Message::Tick(Instant::now()));
        let _ = app.update(Message::StopCamera);

        let frame = ImageHandle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let _ = app.update(Message::PreviewFrame(Some(frame)));

        assert!(app.preview.is_none());
        assert!(!app.preview_in_flight);
    }
}
