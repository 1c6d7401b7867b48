//! Output formatter trait

use council_domain::SessionRecord;

/// Trait for formatting finished debate sessions
pub trait OutputFormatter {
    /// Format the full transcript
    fn format(&self, record: &SessionRecord) -> String;

    /// Format as JSON
    fn format_json(&self, record: &SessionRecord) -> String;

    /// Format the moderator synthesis only (concise output)
    fn format_synthesis_only(&self, record: &SessionRecord) -> String;
}
