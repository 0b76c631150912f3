// engine/src/content.rs

use models::errors::SiteResult;
use storage::{RecordStore, KEY_ABOUT, KEY_PRIVACY};

/// Shown until an administrator saves their own About text.
pub const DEFAULT_ABOUT: &str = "AU-JRC is a community secondary school serving \
the junior and senior high school levels. This page introduces the school, its \
programs, and its admission calendar.";

/// Shown until an administrator saves their own Privacy notice.
pub const DEFAULT_PRIVACY: &str = "Privacy Notice. Information collected through \
the reservation form is used only to process enrollment reservations and is not \
shared outside the school.";

/// TVL specializations offered on the reservation form.
pub const TVL_SPECIALIZATIONS: [&str; 3] = ["ICT", "Home Economics", "Cookery"];

pub fn load_about(store: &RecordStore) -> String {
    store.load_text(KEY_ABOUT, DEFAULT_ABOUT)
}

pub fn load_privacy(store: &RecordStore) -> String {
    store.load_text(KEY_PRIVACY, DEFAULT_PRIVACY)
}

/// Saves the About text; an all-whitespace submission restores the default.
pub fn save_about(store: &RecordStore, text: &str) -> SiteResult<()> {
    save_or_default(store, KEY_ABOUT, text, DEFAULT_ABOUT)
}

/// Saves the Privacy notice; an all-whitespace submission restores the
/// default.
pub fn save_privacy(store: &RecordStore, text: &str) -> SiteResult<()> {
    save_or_default(store, KEY_PRIVACY, text, DEFAULT_PRIVACY)
}

fn save_or_default(store: &RecordStore, key: &str, text: &str, default: &str) -> SiteResult<()> {
    let trimmed = text.trim();
    let value = if trimmed.is_empty() { default } else { trimmed };
    store.save_text(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("records")).unwrap();
        (dir, store)
    }

    #[test]
    fn should_fall_back_to_default_content() {
        let (_dir, store) = open_store();
        assert_eq!(load_about(&store), DEFAULT_ABOUT);
        assert_eq!(load_privacy(&store), DEFAULT_PRIVACY);
    }

    #[test]
    fn should_save_trimmed_content() {
        let (_dir, store) = open_store();
        save_about(&store, "  New about text.  ").unwrap();
        assert_eq!(load_about(&store), "New about text.");
    }

    #[test]
    fn should_restore_default_on_blank_save() {
        let (_dir, store) = open_store();
        save_privacy(&store, "Custom notice.").unwrap();
        save_privacy(&store, "   ").unwrap();
        assert_eq!(load_privacy(&store), DEFAULT_PRIVACY);
    }

    #[test]
    fn should_offer_tvl_specializations() {
        assert_eq!(TVL_SPECIALIZATIONS, ["ICT", "Home Economics", "Cookery"]);
    }
}
