use std::collections::HashMap;

use super::super::input_event::CommandInvocation;

/// Whether the command belongs to the tracker itself (start/stop, markers).
pub fn is_own_command(invocation: &CommandInvocation, prefix: &str) -> bool {
    invocation
        .command_id
        .as_deref()
        .is_some_and(|id| id.starts_with(prefix))
}

/// Anonymous implementations have no stable name worth showing.
pub fn is_anonymous_implementation(name: &str) -> bool {
    name.contains('$') || name.contains("{{closure}}")
}

fn local_shortcut_text(invocation: &CommandInvocation) -> Option<String> {
    if !is_anonymous_implementation(&invocation.implementation) {
        return None;
    }
    invocation.shortcut.map(|stroke| stroke.text())
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).map(str::to_string)
}

/// Label shown for a command, most specific source first.
///
/// Presentation text, then command id, then the local shortcut of an
/// anonymous implementation, then the known-label table, then the raw
/// implementation name.
pub fn resolve_command_label(
    invocation: &CommandInvocation,
    known_labels: &HashMap<String, String>,
) -> String {
    non_blank(invocation.presentation_text.as_deref())
        .or_else(|| invocation.command_id.clone())
        .or_else(|| local_shortcut_text(invocation))
        .or_else(|| known_labels.get(&invocation.implementation).cloned())
        .unwrap_or_else(|| invocation.implementation.clone())
}
