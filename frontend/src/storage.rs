use leptos::prelude::window;
use serde::{Deserialize, Serialize};
use web_sys::Storage;

/// Storage key for the create-ticket draft, `autosave_<form id>` like the
/// server-rendered pages used.
pub const TICKET_DRAFT_KEY: &str = "autosave_create-ticket-form";

/// In-progress create-ticket form content, persisted so a reload or
/// navigation does not lose the draft.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub deadline: String,
}

impl TicketDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.category.is_empty()
            && self.priority.is_empty()
            && self.deadline.is_empty()
    }
}

fn local_storage() -> Option<Storage> {
    window().local_storage().ok().flatten()
}

pub fn load_draft(key: &str) -> Option<TicketDraft> {
    let raw = local_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&raw) {
        Ok(draft) => Some(draft),
        Err(e) => {
            log::error!("Error loading saved form data: {e}");
            None
        }
    }
}

pub fn save_draft(key: &str, draft: &TicketDraft) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Ok(raw) = serde_json::to_string(draft) {
        let _ = storage.set_item(key, &raw);
    }
}

/// Drops the saved draft, called once the form submits successfully.
pub fn clear_draft(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_survives_partial_payloads() {
        // Older saves may predate a field; missing keys default to empty.
        let draft: TicketDraft =
            serde_json::from_str(r#"{"title": "VPN down", "description": "cannot connect"}"#)
                .unwrap();
        assert_eq!(draft.title, "VPN down");
        assert_eq!(draft.category, "");
        assert!(!draft.is_empty());
        assert!(TicketDraft::default().is_empty());
    }
}
