/// Simulated sign-in session
///
/// This is a demo gate, not real authentication: submitting non-empty
/// credentials always succeeds after a fixed delay that stands in for a
/// credential-check round trip. There is no token, no storage, no expiry.
///
/// The delay makes one race possible: the user can sign out while the
/// simulated check is still pending. Each submit hands out an `AuthTicket`
/// stamped with the current generation; sign-out (and any newer submit)
/// bumps the generation, so a stale completion is ignored instead of
/// resurrecting the session.

use std::time::Duration;

/// How long the simulated credential check takes
pub const AUTH_DELAY: Duration = Duration::from_secs(1);

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SignedOut,
    /// Submit accepted, simulated credential check in flight
    Authenticating,
    SignedIn,
}

/// Whether the form is in sign-in or sign-up mode.
/// Both modes take the same simulated path; only the labels differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

/// Token handed out by `submit`, redeemed when the simulated delay fires.
/// Only the ticket from the latest submit is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTicket(u64);

/// Why a submit was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("please fill in all fields")]
    MissingFields,
    #[error("a sign-in attempt is already in progress")]
    AlreadyPending,
}

/// Session state: the authentication phase plus the transient form fields.
/// Fields are never persisted and are cleared on sign-out.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::SignedOut,
            email: String::new(),
            password: String::new(),
            mode: AuthMode::SignIn,
            generation: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_signed_in(&self) -> bool {
        self.phase == Phase::SignedIn
    }

    pub fn is_authenticating(&self) -> bool {
        self.phase == Phase::Authenticating
    }

    /// Submit the form. Both fields must be non-empty; on success the
    /// session enters `Authenticating` and the returned ticket should be
    /// redeemed with `complete` after `AUTH_DELAY`.
    pub fn submit(&mut self) -> Result<AuthTicket, SubmitError> {
        if self.phase == Phase::Authenticating {
            return Err(SubmitError::AlreadyPending);
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(SubmitError::MissingFields);
        }

        self.generation += 1;
        self.phase = Phase::Authenticating;
        Ok(AuthTicket(self.generation))
    }

    /// Redeem a ticket once the simulated delay has elapsed. Returns true
    /// if the session transitioned to `SignedIn`. A ticket from before a
    /// sign-out (or a newer submit) is stale and is dropped silently.
    pub fn complete(&mut self, ticket: AuthTicket) -> bool {
        if self.phase == Phase::Authenticating && ticket.0 == self.generation {
            self.phase = Phase::SignedIn;
            true
        } else {
            tracing::debug!(?ticket, "ignoring stale authentication completion");
            false
        }
    }

    /// Sign out, clearing the transient credential fields. Also cancels
    /// any in-flight simulated check by invalidating its ticket.
    pub fn sign_out(&mut self) {
        self.generation += 1;
        self.phase = Phase::SignedOut;
        self.email.clear();
        self.password.clear();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}
