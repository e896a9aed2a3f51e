use thiserror::Error;

use super::profile::{Gender, Preference, Profile};
use crate::constants::{CURRENT_USER_ID, MIN_INTERESTS};

/// A missing onboarding field, in the words shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("請輸入您的姓名")]
    MissingName,
    #[error("請輸入您的年齡")]
    MissingAge,
    #[error("請輸入您的居住地")]
    MissingLocation,
    #[error("請選擇您的性別")]
    MissingGender,
    #[error("請選擇想認識的對象性別")]
    MissingPreference,
    #[error("請簡單介紹一下自己")]
    MissingBio,
    #[error("請至少選擇 3 個興趣")]
    TooFewInterests,
}

/// Draft of the user's own profile, filled in during onboarding.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub age: Option<u8>,
    pub location: String,
    pub bio: String,
    pub gender: Option<Gender>,
    pub preference: Option<Preference>,
    pub interests: Vec<String>,
    pub image_url: Option<String>,
}

impl ProfileForm {
    /// Add the tag if absent, remove it if present.
    pub fn toggle_interest(&mut self, tag: &str) {
        if let Some(idx) = self.interests.iter().position(|t| t == tag) {
            self.interests.remove(idx);
        } else {
            self.interests.push(tag.to_string());
        }
    }

    /// Check every field at once so the form can list all problems together.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::MissingName);
        }
        if self.age.is_none() {
            errors.push(FieldError::MissingAge);
        }
        if self.location.trim().is_empty() {
            errors.push(FieldError::MissingLocation);
        }
        if self.gender.is_none() {
            errors.push(FieldError::MissingGender);
        }
        if self.preference.is_none() {
            errors.push(FieldError::MissingPreference);
        }
        if self.bio.trim().is_empty() {
            errors.push(FieldError::MissingBio);
        }
        if self.interests.len() < MIN_INTERESTS {
            errors.push(FieldError::TooFewInterests);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the user's profile. The id is fixed so the roster can keep the
    /// user out of the candidate sets.
    pub fn build(&self) -> Result<Profile, Vec<FieldError>> {
        self.validate()?;
        let image_url = match &self.image_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => default_avatar_url(&self.name),
        };
        Ok(Profile {
            id: CURRENT_USER_ID.to_string(),
            name: self.name.trim().to_string(),
            age: self.age.unwrap_or_default(),
            location: self.location.trim().to_string(),
            distance_km: 0.0,
            bio: self.bio.trim().to_string(),
            interests: self.interests.clone(),
            image_url,
            gender: self.gender,
            preference: self.preference,
            last_message: None,
            last_message_time: None,
        })
    }
}

/// Generated placeholder avatar for profiles without an uploaded photo.
fn default_avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=0D9488&color=fff&size=400",
        percent_encode(name)
    )
}

// Minimal query-string escaping; everything outside the URL unreserved set
// is emitted as %XX per UTF-8 byte.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProfileForm {
        ProfileForm {
            name: "王大明".to_string(),
            age: Some(68),
            location: "台北市".to_string(),
            bio: "退休教師，喜歡爬山。".to_string(),
            gender: Some(Gender::Male),
            preference: Some(Preference::Female),
            interests: vec!["爬山".to_string(), "茶道".to_string(), "閱讀".to_string()],
            image_url: None,
        }
    }

    #[test]
    fn test_empty_form_reports_every_missing_field() {
        let errors = ProfileForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&FieldError::MissingName));
        assert!(errors.contains(&FieldError::TooFewInterests));
    }

    #[test]
    fn test_two_interests_is_too_few() {
        let mut form = filled_form();
        form.interests.pop();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::TooFewInterests]);
    }

    #[test]
    fn test_toggle_interest_adds_and_removes() {
        let mut form = ProfileForm::default();
        form.toggle_interest("爬山");
        assert_eq!(form.interests, vec!["爬山"]);
        form.toggle_interest("爬山");
        assert!(form.interests.is_empty());
    }

    #[test]
    fn test_build_uses_sentinel_id_and_zero_distance() {
        let profile = filled_form().build().unwrap();
        assert_eq!(profile.id, CURRENT_USER_ID);
        assert!(profile.is_current_user());
        assert_eq!(profile.distance_km, 0.0);
        assert!(profile.last_message.is_none());
    }

    #[test]
    fn test_build_falls_back_to_generated_avatar() {
        let profile = filled_form().build().unwrap();
        assert!(profile.image_url.starts_with("https://ui-avatars.com/api/?name="));
        // The name must be escaped, not embedded raw
        assert!(!profile.image_url.contains("王大明"));

        let mut form = filled_form();
        form.image_url = Some("https://example.com/me.png".to_string());
        let profile = form.build().unwrap();
        assert_eq!(profile.image_url, "https://example.com/me.png");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Amy_123"), "Amy_123");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("王"), "%E7%8E%8B");
    }
}
