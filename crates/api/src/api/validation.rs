// Input validation for request bodies
//
// Field limits mirror the column sizes in the migrations. Checks run in the
// handlers before any service call, so rejected input never reaches a store.

use std::sync::LazyLock;

use corkboard_core::{Error, Result};
use regex::Regex;

// =============================================================================
// Field Limits
// =============================================================================

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 50;

pub const MAX_EMAIL_CHARS: usize = 100;

pub const MIN_PASSWORD_CHARS: usize = 6;

pub const MAX_BOARD_TITLE_CHARS: usize = 200;
pub const MAX_BOARD_DESCRIPTION_CHARS: usize = 1000;

pub const MAX_NOTE_COLOR_CHARS: usize = 50;
pub const MAX_NOTE_TAG_CHARS: usize = 30;

/// Something, an @, something; no whitespace anywhere
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

static EMAIL_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN));

// =============================================================================
// Validation Functions
// =============================================================================

fn reject(field: &str, message: String) -> Error {
    tracing::warn!(field, "{}", message);
    Error::validation(message)
}

pub fn validate_username(username: &str) -> Result<()> {
    let len = username.trim().chars().count();
    if !(MIN_USERNAME_CHARS..=MAX_USERNAME_CHARS).contains(&len) {
        return Err(reject(
            "username",
            format!(
                "Username must be between {} and {} characters",
                MIN_USERNAME_CHARS, MAX_USERNAME_CHARS
            ),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(reject("email", "Email is required".to_string()));
    }
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(reject(
            "email",
            format!("Email must not exceed {} characters", MAX_EMAIL_CHARS),
        ));
    }

    let regex = EMAIL_REGEX
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Invalid email pattern: {}", e))?;
    if !regex.is_match(email) {
        return Err(reject("email", "Email should be valid".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(reject(
            "password",
            format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_CHARS
            ),
        ));
    }
    Ok(())
}

pub fn validate_board_title(title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(reject("title", "Title is required".to_string()));
    }
    if title.chars().count() > MAX_BOARD_TITLE_CHARS {
        return Err(reject(
            "title",
            format!("Title must not exceed {} characters", MAX_BOARD_TITLE_CHARS),
        ));
    }
    Ok(())
}

pub fn validate_board_description(description: Option<&str>) -> Result<()> {
    if description.is_some_and(|d| d.chars().count() > MAX_BOARD_DESCRIPTION_CHARS) {
        return Err(reject(
            "description",
            format!(
                "Description must not exceed {} characters",
                MAX_BOARD_DESCRIPTION_CHARS
            ),
        ));
    }
    Ok(())
}

pub fn validate_note_color(color: &str) -> Result<()> {
    if color.chars().count() > MAX_NOTE_COLOR_CHARS {
        return Err(reject(
            "color",
            format!("Color must not exceed {} characters", MAX_NOTE_COLOR_CHARS),
        ));
    }
    Ok(())
}

/// Color is mandatory when a note is created
pub fn validate_new_note_color(color: &str) -> Result<()> {
    if color.trim().is_empty() {
        return Err(reject("color", "Color is required".to_string()));
    }
    validate_note_color(color)
}

pub fn validate_note_tag(tag: &str) -> Result<()> {
    if tag.chars().count() > MAX_NOTE_TAG_CHARS {
        return Err(reject(
            "tag",
            format!("Tag must not exceed {} characters", MAX_NOTE_TAG_CHARS),
        ));
    }
    Ok(())
}
