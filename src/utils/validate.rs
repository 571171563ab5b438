use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AppConfig;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// Teacher accounts are T + 8 digits, students S + 8 digits.
static USER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[TSA]\d{8}$").expect("Invalid user id regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_user_id(user_id: &str) -> Result<(), &'static str> {
    if !USER_ID_RE.is_match(user_id) {
        return Err("User id must be T/S followed by 8 digits");
    }
    Ok(())
}

/// Password policy result.
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Policy: at least 8 characters with upper, lower and a digit.
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

/// Media kinds with distinct allowed URL prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Audio,
}

fn prefixes_for(kind: MediaKind) -> &'static [String] {
    let media = &AppConfig::get().media;
    match kind {
        MediaKind::Video => &media.video_prefixes,
        MediaKind::Image => &media.image_prefixes,
        MediaKind::Audio => &media.audio_prefixes,
    }
}

/// Check an authored media path against the allow-list for its kind.
///
/// Absolute http(s) URLs are always accepted; everything else must match one
/// of the configured public prefixes.
pub fn validate_media_path(kind: MediaKind, path: &str) -> Result<(), String> {
    if is_allowed_media_path(path, prefixes_for(kind)) {
        Ok(())
    } else {
        Err(format!("Media path '{path}' is not under an allowed prefix"))
    }
}

fn is_allowed_media_path(path: &str, prefixes: &[String]) -> bool {
    if path.starts_with("http://") || path.starts_with("https://") {
        return true;
    }
    prefixes.iter().any(|p| path.starts_with(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_password_character_classes() {
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);
    }

    #[test]
    fn test_user_id_format() {
        assert!(validate_user_id("T00000001").is_ok());
        assert!(validate_user_id("S12345678").is_ok());
        assert!(validate_user_id("X00000001").is_err());
        assert!(validate_user_id("T0000001").is_err());
        assert!(validate_user_id("T000000001").is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("student@center.edu.vn").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_media_prefix_matrix() {
        let image = ["/img-test/".to_string(), "/assets/".to_string(), "/assets1/".to_string()];
        let audio = ["/audio/".to_string(), "/audio-for-test/".to_string()];
        let video = ["/video/".to_string()];

        assert!(is_allowed_media_path("/img-test/q1.png", &image));
        assert!(is_allowed_media_path("/assets1/banner.jpg", &image));
        assert!(!is_allowed_media_path("/video/q1.png", &image));

        assert!(is_allowed_media_path("/audio-for-test/part2.mp3", &audio));
        assert!(!is_allowed_media_path("/img-test/part2.mp3", &audio));

        assert!(is_allowed_media_path("/video/week1.mp4", &video));
        assert!(is_allowed_media_path("https://cdn.example.com/week1.mp4", &video));
        assert!(is_allowed_media_path("http://cdn.example.com/week1.mp4", &video));
        assert!(!is_allowed_media_path("ftp://cdn.example.com/week1.mp4", &video));
        assert!(!is_allowed_media_path("../secret.mp4", &video));
    }
}
