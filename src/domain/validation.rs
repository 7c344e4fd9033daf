//! Field rules for patient drafts
//!
//! Callers validate a [`PatientDraft`] before handing it to the store; the
//! store itself assumes valid input.

use super::errors::CaredeskError;
use super::patient::PatientDraft;
use super::result::Result;
use url::Url;

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 1000;

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

pub const NAME_REQUIRED: &str = "Name is required";
pub const WEBSITE_INVALID: &str =
    "Please enter a valid URL (starting with http:// or https://)";
pub const AVATAR_INVALID: &str = "URL must be a valid image";

impl PatientDraft {
    /// Checks every field rule and reports all violations at once
    ///
    /// # Errors
    ///
    /// Returns `CaredeskError::Validation` with one message per failed rule,
    /// joined by `"; "`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caredesk::domain::PatientDraft;
    ///
    /// let draft = PatientDraft {
    ///     name: "Ada Lovelace".to_string(),
    ///     description: "Regular check-up patient".to_string(),
    ///     website: "https://ada.example.com".to_string(),
    ///     avatar: String::new(),
    /// };
    /// assert!(draft.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(CaredeskError::Validation(issues.join("; ")))
        }
    }

    /// All rule violations, in field order
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let name_len = self.name.trim().chars().count();
        if name_len < NAME_MIN {
            issues.push(NAME_REQUIRED.to_string());
        } else if name_len > NAME_MAX {
            issues.push(format!("Name cannot exceed {NAME_MAX} characters"));
        }

        let description_len = self.description.trim().chars().count();
        if description_len < DESCRIPTION_MIN {
            issues.push(format!(
                "Description must have at least {DESCRIPTION_MIN} characters"
            ));
        } else if description_len > DESCRIPTION_MAX {
            issues.push(format!(
                "Description cannot exceed {DESCRIPTION_MAX} characters"
            ));
        }

        if !is_http_url(&self.website) {
            issues.push(format!("website: {WEBSITE_INVALID}"));
        }

        if !self.avatar.is_empty() {
            if !is_http_url(&self.avatar) {
                issues.push(format!("avatar: {WEBSITE_INVALID}"));
            } else if !looks_like_image(&self.avatar) {
                issues.push(AVATAR_INVALID.to_string());
            }
        }

        issues
    }
}

/// True for absolute URLs with an `http://` or `https://` prefix
pub fn is_http_url(candidate: &str) -> bool {
    (candidate.starts_with("http://") || candidate.starts_with("https://"))
        && Url::parse(candidate).is_ok()
}

/// True when the URL names a common image type or an avatar service
pub fn looks_like_image(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext)) || candidate.contains("avatar")
}
