use leptos::prelude::{document, window};
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlDocument;

/// Extracts a named cookie from a `document.cookie` style string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(rest) = pair.strip_prefix(name) {
            if let Some(value) = rest.strip_prefix('=') {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// The CSRF token the server left in a client-readable cookie. Mutating
/// requests echo it back in the `X-CSRFToken` header.
pub fn csrf_token() -> Option<String> {
    let cookies = document().dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    cookie_value(&cookies, "csrftoken")
}

/// Human-readable file size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}

/// Local wall-clock time for a server ISO-8601 timestamp; unparseable input
/// is shown as-is.
pub fn format_timestamp(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&chrono::Local).format("%H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// The search box only auto-submits once the query is long enough to mean
/// something.
pub fn should_auto_search(query: &str) -> bool {
    query.len() >= 2
}

/// Sets the document-level theme attribute the stylesheet switches on.
pub fn apply_theme(dark_mode: bool) {
    if let Some(root) = document().document_element() {
        let theme = if dark_mode { "dark" } else { "light" };
        let _ = root.set_attribute("data-theme", theme);
    }
}

/// Writes `text` to the system clipboard and invokes `on_copied` on success.
pub fn copy_to_clipboard(text: String, on_copied: impl FnOnce() + 'static) {
    let promise = window().navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if JsFuture::from(promise).await.is_ok() {
            on_copied();
        } else {
            log::error!("Failed to write to clipboard");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_parses_the_named_cookie() {
        let cookies = "csrftoken=abc123; sessionid=deadbeef; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
        // A cookie whose name merely starts with the needle must not match.
        assert_eq!(cookie_value("csrftoken2=x; csrftoken=y", "csrftoken").as_deref(), Some("y"));
    }

    #[test]
    fn file_sizes_render_like_the_upload_widget() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn timestamps_render_as_wall_clock_time() {
        let rendered = format_timestamp("2025-08-01T09:30:00+00:00");
        assert_eq!(rendered.len(), 5);
        assert!(rendered.contains(':'));
        // Unparseable input falls through untouched rather than panicking.
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
    }

    #[test]
    fn search_auto_submits_only_from_two_characters() {
        assert!(!should_auto_search(""));
        assert!(!should_auto_search("p"));
        assert!(should_auto_search("pr"));
        assert!(should_auto_search("printer broken"));
    }
}
