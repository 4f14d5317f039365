use model::preferences::{Language, Theme, UserPreferences};
use tokio::sync::watch;

/// Language and theme chosen on the settings screen. Not persisted.
pub struct Preferences {
    state: watch::Sender<UserPreferences>,
}

impl Preferences {
    pub fn new(initial: UserPreferences) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<UserPreferences> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> UserPreferences {
        *self.state.borrow()
    }

    pub fn set_language(&self, language: Language) {
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.language, language) != language);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.theme, theme) != theme);
    }

    pub fn set(&self, preferences: UserPreferences) {
        self.state
            .send_if_modified(|state| std::mem::replace(state, preferences) != preferences);
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(UserPreferences::default())
    }
}
