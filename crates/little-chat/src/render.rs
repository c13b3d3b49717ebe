//! Terminal rendering of transcript messages.

use little_chat_core::{Message, Role};
use owo_colors::OwoColorize;

/// Prefix drawn in front of every rendered message.
pub const BAR_CHAR: &str = "▎";

/// Renders a message as a single colored line, prefixed with its
/// timestamp.
pub fn render_message(message: &Message) -> String {
    let timestamp = message.timestamp();
    let timestamp = timestamp.dimmed();
    let content = message.content();
    match message.role() {
        Role::User => format!(
            "{}{timestamp} 🙂 {}",
            BAR_CHAR.bright_green(),
            content.white()
        ),
        Role::Assistant => format!(
            "{}{timestamp} 🤖 {}",
            BAR_CHAR.bright_cyan(),
            content.bright_white()
        ),
        Role::Error => format!(
            "{}{timestamp} ⚠️  {}",
            BAR_CHAR.bright_red(),
            content.red()
        ),
    }
}

/// Renders the diagnostic line shown when a clear fails.
///
/// The transcript itself is untouched in that case, so this line is never
/// part of it.
pub fn render_reset_failure(reason: &str) -> String {
    format!(
        "{}could not clear the conversation: {reason}",
        BAR_CHAR.bright_yellow()
    )
    .dimmed()
    .to_string()
}

/// Renders the number of messages in the transcript.
pub fn render_counter(count: usize) -> String {
    let noun = if count == 1 { "message" } else { "messages" };
    format!("[{count} {noun}]").dimmed().to_string()
}
