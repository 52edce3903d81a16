/// State management module
///
/// This module handles all application state that is independent of the
/// UI toolkit:
/// - Simulated sign-in session and its phases (session.rs)
/// - Overlay transform parameters and their update rules (transform.rs)

pub mod session;
pub mod transform;
