use std::cell::RefCell;
use std::io::Write;

use log::warn;
use storecheck_core::{PromptAction, UpdatePresenter, UpdatePrompt};

/// Writes the update prompt to a terminal and optionally opens the download
/// page.
pub struct ConsolePresenter<W> {
    out: RefCell<W>,
    open_download_url: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, open_download_url: bool) -> Self {
        Self {
            out: RefCell::new(out),
            open_download_url,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

pub fn render_prompt(prompt: &UpdatePrompt) -> String {
    let mut text = format!("{}\n{}\n", prompt.title, prompt.message);
    text.push_str(&format!("  version: {}\n", prompt.new_version));
    if let Some(url) = &prompt.download_url {
        text.push_str(&format!("  download: {url}\n"));
    }

    let actions: Vec<&str> = prompt
        .actions
        .iter()
        .map(|action| match action {
            PromptAction::NotNow => "Not now",
            PromptAction::Update => "Update",
        })
        .collect();
    text.push_str(&format!("  [{}]\n", actions.join("] [")));
    text
}

impl<W: Write> UpdatePresenter for ConsolePresenter<W> {
    fn present_update_prompt(&self, prompt: &UpdatePrompt) {
        let text = render_prompt(prompt);
        if let Err(e) = self.out.borrow_mut().write_all(text.as_bytes()) {
            warn!("Failed to write update prompt: {e}");
        }

        if self.open_download_url
            && let Some(url) = &prompt.download_url
            && let Err(e) = open::that(url)
        {
            warn!("Failed to open {url}: {e}");
        }
    }
}
