//! Edit-command detection. Corrections arrive as fresh utterances ("delete my
//! last workout"), never as mutations of an already-logged entry, so the log
//! endpoint checks for a command before anything reaches the model.

/// Commands recognized in an inbound utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    DeleteLatest,
}

/// Scans an utterance for an edit command. A command requires a deletion
/// verb, a recency word, and a log-entity word; ordinary workout text has at
/// most one of the three.
pub fn detect_edit_command(utterance: &str) -> Option<EditCommand> {
    let lowered = utterance.to_lowercase();

    let verb = ["delete", "remove", "undo", "scratch"]
        .iter()
        .any(|w| lowered.contains(w));
    let recency = ["last", "latest", "previous", "most recent"]
        .iter()
        .any(|w| lowered.contains(w));
    let entity = ["workout", "exercise", "entry", "log", "session"]
        .iter()
        .any(|w| lowered.contains(w));

    if verb && recency && entity {
        Some(EditCommand::DeleteLatest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_my_last_workout() {
        assert_eq!(
            detect_edit_command("delete my last workout"),
            Some(EditCommand::DeleteLatest)
        );
    }

    #[test]
    fn test_remove_latest_entry_case_insensitive() {
        assert_eq!(
            detect_edit_command("Remove my LATEST entry please"),
            Some(EditCommand::DeleteLatest)
        );
    }

    #[test]
    fn test_undo_previous_session() {
        assert_eq!(
            detect_edit_command("undo the previous session"),
            Some(EditCommand::DeleteLatest)
        );
    }

    #[test]
    fn test_plain_logging_text_is_not_a_command() {
        assert_eq!(detect_edit_command("5 pull-ups, 10 push-ups"), None);
        assert_eq!(detect_edit_command("yesterday: ran 5k in 25 minutes"), None);
    }

    #[test]
    fn test_partial_phrase_is_not_a_command() {
        // Recency word without a deletion verb.
        assert_eq!(detect_edit_command("same workout as last session"), None);
        // Deletion verb without a log entity.
        assert_eq!(detect_edit_command("removed the last plate and did 5 reps"), None);
    }
}
