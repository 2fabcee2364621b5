use crate::channel::Channel;
use crate::decision::UpdateDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    NotNow,
    Update,
}

/// What a presentation layer shows when an update is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePrompt {
    pub title: String,
    pub message: String,
    pub new_version: String,
    pub download_url: Option<String>,
    pub mandatory: bool,
    pub channel: Channel,
    pub actions: Vec<PromptAction>,
}

impl UpdatePrompt {
    #[must_use]
    pub fn new(
        display_name: &str,
        channel: Channel,
        new_version: String,
        download_url: Option<String>,
        mandatory: bool,
    ) -> Self {
        let mut actions = Vec::with_capacity(2);
        if !mandatory {
            actions.push(PromptAction::NotNow);
        }
        actions.push(PromptAction::Update);

        Self {
            title: "New version".to_string(),
            message: format!(
                "A new version of {display_name} is available on {}. Update now!",
                channel.label()
            ),
            new_version,
            download_url,
            mandatory,
            channel,
            actions,
        }
    }

    /// Build a prompt for `UpdateAvailable`; other decisions yield `None`.
    #[must_use]
    pub fn from_decision(
        decision: &UpdateDecision,
        display_name: &str,
        channel: Channel,
    ) -> Option<Self> {
        match decision {
            UpdateDecision::UpdateAvailable {
                new_version,
                download_url,
                mandatory,
            } => Some(Self::new(
                display_name,
                channel,
                new_version.clone(),
                download_url.clone(),
                *mandatory,
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dismissable(&self) -> bool {
        self.actions.contains(&PromptAction::NotNow)
    }
}

/// Presentation collaborator invoked by the caller on `UpdateAvailable`.
pub trait UpdatePresenter {
    fn present_update_prompt(&self, prompt: &UpdatePrompt);
}
