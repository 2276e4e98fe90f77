//! Contact form state and validation.
//!
//! The form mirrors a classic three-field contact block: name, email,
//! message. Leaving a field validates it (blur validation); submitting
//! validates everything and, if clean, runs a simulated submission: a
//! fixed two-second "sending" state followed by a success banner that
//! hides itself. There is no real network I/O behind it.

use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;

/// Simulated round-trip before a submission reports success.
pub const SUBMIT_DELAY: Duration = Duration::from_secs(2);
/// How long the success banner stays up.
pub const SUCCESS_VISIBLE: Duration = Duration::from_secs(5);

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// The three input fields, in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Message => 2,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Editing,
    Submitting { done_at: Instant },
    Success { hide_at: Instant },
}

/// Complete form state: field values, per-field errors, focus, and the
/// submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    values: [String; 3],
    errors: [Option<&'static str>; 3],
    focused: Field,
    state: SubmitState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            values: [String::new(), String::new(), String::new()],
            errors: [None, None, None],
            focused: Field::Name,
            state: SubmitState::Editing,
        }
    }

    pub const fn focused(&self) -> Field {
        self.focused
    }

    pub const fn state(&self) -> SubmitState {
        self.state
    }

    /// Whether input should be refused (a submission is in flight).
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, SubmitState::Submitting { .. })
    }

    pub const fn success_visible(&self) -> bool {
        matches!(self.state, SubmitState::Success { .. })
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub const fn error(&self, field: Field) -> Option<&'static str> {
        self.errors[field.index()]
    }

    /// Append a character to the focused field. Ignored while busy.
    pub fn input(&mut self, c: char) {
        if self.is_busy() {
            return;
        }
        if c == '\n' || c.is_control() {
            return;
        }
        self.values[self.focused.index()].push(c);
    }

    /// Remove the last character of the focused field. Ignored while busy.
    pub fn backspace(&mut self) {
        if self.is_busy() {
            return;
        }
        self.values[self.focused.index()].pop();
    }

    /// Focus a specific field directly (e.g. from a mouse click),
    /// validating the field being left.
    pub fn focus(&mut self, field: Field) {
        if self.focused != field {
            self.blur_current();
            self.focused = field;
        }
    }

    /// Move focus forward, validating the field being left.
    pub fn focus_next(&mut self) {
        self.blur_current();
        self.focused = self.focused.next();
    }

    /// Move focus backward, validating the field being left.
    pub fn focus_previous(&mut self) {
        self.blur_current();
        self.focused = self.focused.previous();
    }

    fn blur_current(&mut self) {
        let field = self.focused;
        self.errors[field.index()] = validate(field, self.value(field)).err();
    }

    /// Validate every field and, if all pass, start the simulated
    /// submission. Returns whether a submission started.
    pub fn submit(&mut self, now: Instant) -> bool {
        if self.is_busy() {
            return false;
        }
        let mut all_valid = true;
        for field in Field::ALL {
            let error = validate(field, self.value(field)).err();
            all_valid &= error.is_none();
            self.errors[field.index()] = error;
        }
        if all_valid {
            self.state = SubmitState::Submitting {
                done_at: now + SUBMIT_DELAY,
            };
        }
        all_valid
    }

    /// Advance the submission lifecycle. Returns true when visible state
    /// changed and a repaint is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            SubmitState::Submitting { done_at } if now >= done_at => {
                // Submission "succeeded": clear the form and show the banner.
                self.values = [String::new(), String::new(), String::new()];
                self.errors = [None, None, None];
                self.focused = Field::Name;
                self.state = SubmitState::Success {
                    hide_at: now + SUCCESS_VISIBLE,
                };
                true
            }
            SubmitState::Success { hide_at } if now >= hide_at => {
                self.state = SubmitState::Editing;
                true
            }
            _ => false,
        }
    }

    /// The next lifecycle deadline, if any. Used by the event loop to
    /// bound its poll timeout.
    pub const fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SubmitState::Editing => None,
            SubmitState::Submitting { done_at } => Some(done_at),
            SubmitState::Success { hide_at } => Some(hide_at),
        }
    }
}

/// Validate one field's value against its rule.
///
/// # Errors
///
/// Returns the user-facing message for the first rule the value breaks.
pub fn validate(field: Field, value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    match field {
        Field::Name => {
            if trimmed.chars().count() < MIN_NAME_CHARS {
                return Err("Enter a name of at least 2 characters");
            }
        }
        Field::Email => {
            if !EMAIL_RE.is_match(trimmed) {
                return Err("Enter a valid email address");
            }
        }
        Field::Message => {
            if trimmed.is_empty() {
                return Err("A message is required");
            }
            if trimmed.chars().count() < MIN_MESSAGE_CHARS {
                return Err("Write a message of at least 10 characters");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        for c in "Ada".chars() {
            form.input(c);
        }
        form.focus_next();
        for c in "ada@example.org".chars() {
            form.input(c);
        }
        form.focus_next();
        for c in "I would like to join the spring workshop.".chars() {
            form.input(c);
        }
        form
    }

    #[test]
    fn test_name_requires_two_characters() {
        assert!(validate(Field::Name, "A").is_err());
        assert!(validate(Field::Name, "  A  ").is_err());
        assert!(validate(Field::Name, "Al").is_ok());
    }

    #[test]
    fn test_email_rule_matches_reference_pattern() {
        assert!(validate(Field::Email, "ada@example.org").is_ok());
        assert!(validate(Field::Email, "a@b.c").is_ok());
        assert!(validate(Field::Email, "not-an-email").is_err());
        assert!(validate(Field::Email, "a b@c.d").is_err());
        assert!(validate(Field::Email, "a@b").is_err());
        assert!(validate(Field::Email, "@b.c").is_err());
    }

    #[test]
    fn test_message_required_then_length_checked() {
        assert_eq!(validate(Field::Message, "   "), Err("A message is required"));
        assert!(validate(Field::Message, "too short").is_err());
        assert!(validate(Field::Message, "long enough to pass").is_ok());
    }

    #[test]
    fn test_leaving_a_field_records_its_error() {
        let mut form = ContactForm::new();
        form.input('A');
        form.focus_next();

        assert_eq!(form.focused(), Field::Email);
        assert!(form.error(Field::Name).is_some());
    }

    #[test]
    fn test_submit_with_invalid_fields_does_not_start() {
        let mut form = ContactForm::new();
        let started = form.submit(Instant::now());

        assert!(!started);
        assert_eq!(form.state(), SubmitState::Editing);
        for field in Field::ALL {
            assert!(form.error(field).is_some());
        }
    }

    #[test]
    fn test_submission_lifecycle_round_trip() {
        let now = Instant::now();
        let mut form = filled_form();

        assert!(form.submit(now));
        assert!(form.is_busy());

        // Not done yet.
        assert!(!form.tick(now + SUBMIT_DELAY - Duration::from_millis(1)));

        // Success clears the fields and shows the banner.
        let done = now + SUBMIT_DELAY;
        assert!(form.tick(done));
        assert!(form.success_visible());
        assert_eq!(form.value(Field::Name), "");
        assert_eq!(form.value(Field::Message), "");

        // Banner hides itself and the form is editable again.
        assert!(form.tick(done + SUCCESS_VISIBLE));
        assert_eq!(form.state(), SubmitState::Editing);
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let now = Instant::now();
        let mut form = filled_form();
        form.submit(now);

        form.input('x');
        form.backspace();
        assert_eq!(form.value(Field::Message), "I would like to join the spring workshop.");
    }

    #[test]
    fn test_double_submit_does_not_restart_the_clock() {
        let now = Instant::now();
        let mut form = filled_form();
        assert!(form.submit(now));
        let state = form.state();

        assert!(!form.submit(now + Duration::from_millis(500)));
        assert_eq!(form.state(), state);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut form = ContactForm::new();
        form.input('\n');
        form.input('\t');
        assert_eq!(form.value(Field::Name), "");
    }
}
