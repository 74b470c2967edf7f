//! Pure projection from stream entries to renderable rows.
//!
//! Escaping happens here, next to every field, so the security invariant is
//! checkable in one place. The full feedback text rides on the row for the
//! modal; only the preview lands in the table cell.

use grade_core::ProcessedResult;
use services::RowEntry;

use crate::vm::escape_text;

const EM_DASH: &str = "\u{2014}";

/// One rendered line of the results table. All text fields are escaped.
#[derive(Clone, Debug, PartialEq)]
pub enum RowVm {
    Result(ResultRowVm),
    Error(ErrorRowVm),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultRowVm {
    pub file_name: String,
    pub student_name: String,
    /// Matched roster name, or an em-dash when there was no match.
    pub matched_name: String,
    pub matched: bool,
    /// `"92%"`, or an em-dash when zero/absent.
    pub match_percentage: String,
    pub score: String,
    pub comment_preview: String,
    /// Full feedback text for the modal; never rendered inline.
    pub comment: String,
}

/// Full-width informational failure row. Not counted toward progress.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorRowVm {
    pub text: String,
}

#[must_use]
pub fn map_row_entry(entry: &RowEntry) -> RowVm {
    match entry {
        RowEntry::Result(result) => RowVm::Result(map_result_row(result)),
        RowEntry::Error { file, message } => RowVm::Error(ErrorRowVm {
            text: escape_text(&format!("Could not process {file}: {message}")),
        }),
    }
}

fn map_result_row(result: &ProcessedResult) -> ResultRowVm {
    let matched = result.match_status.is_success();
    let matched_name = match result.matched_name.as_deref() {
        Some(name) if !name.is_empty() => escape_text(name),
        _ => EM_DASH.to_string(),
    };
    let match_percentage = if result.match_percentage == 0 {
        EM_DASH.to_string()
    } else {
        format!("{}%", result.match_percentage)
    };
    let score = match result.score.as_deref() {
        Some(score) if !score.is_empty() => escape_text(score),
        _ => EM_DASH.to_string(),
    };

    ResultRowVm {
        file_name: escape_text(&result.file_name),
        student_name: escape_text(&result.student_name),
        matched_name,
        matched,
        match_percentage,
        score,
        comment_preview: escape_text(result.comment_preview.as_deref().unwrap_or_default()),
        comment: escape_text(result.comment.as_deref().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grade_core::MatchStatus;

    fn matched_result() -> ProcessedResult {
        ProcessedResult {
            file_name: "bob.pdf".to_string(),
            student_name: "Bob".to_string(),
            matched_name: Some("Bob Smith".to_string()),
            match_percentage: 92,
            match_status: MatchStatus::Success,
            score: Some("8/10".to_string()),
            comment: Some("Good work".to_string()),
            comment_preview: Some("Good work".to_string()),
        }
    }

    #[test]
    fn maps_matched_result_row() {
        let entry = RowEntry::Result(matched_result());
        let RowVm::Result(row) = map_row_entry(&entry) else {
            panic!("expected result row");
        };
        assert!(row.matched);
        assert_eq!(row.matched_name, "Bob Smith");
        assert_eq!(row.match_percentage, "92%");
        assert_eq!(row.score, "8/10");
        assert_eq!(row.comment, "Good work");
    }

    #[test]
    fn absent_fields_fall_back_to_em_dash() {
        let entry = RowEntry::Result(ProcessedResult {
            matched_name: None,
            match_percentage: 0,
            match_status: MatchStatus::NoMatch,
            score: None,
            comment: None,
            comment_preview: None,
            ..matched_result()
        });
        let RowVm::Result(row) = map_row_entry(&entry) else {
            panic!("expected result row");
        };
        assert!(!row.matched);
        assert_eq!(row.matched_name, EM_DASH);
        assert_eq!(row.match_percentage, EM_DASH);
        assert_eq!(row.score, EM_DASH);
        assert_eq!(row.comment_preview, "");
    }

    #[test]
    fn badge_is_a_pure_function_of_match_status() {
        // Even a 100% similarity score renders as unmatched if the backend
        // says so.
        let entry = RowEntry::Result(ProcessedResult {
            match_percentage: 100,
            match_status: MatchStatus::NoMatch,
            ..matched_result()
        });
        let RowVm::Result(row) = map_row_entry(&entry) else {
            panic!("expected result row");
        };
        assert!(!row.matched);
    }

    #[test]
    fn every_text_field_is_escaped() {
        let entry = RowEntry::Result(ProcessedResult {
            file_name: "<b>.pdf".to_string(),
            student_name: "<i>Bob</i>".to_string(),
            matched_name: Some("Bob <script>".to_string()),
            score: Some("<8/10>".to_string()),
            comment: Some("x < y".to_string()),
            comment_preview: Some("x < y".to_string()),
            ..matched_result()
        });
        let RowVm::Result(row) = map_row_entry(&entry) else {
            panic!("expected result row");
        };
        for field in [
            &row.file_name,
            &row.student_name,
            &row.matched_name,
            &row.score,
            &row.comment,
            &row.comment_preview,
        ] {
            assert!(!field.contains('<'), "unescaped field: {field}");
        }
    }

    #[test]
    fn error_rows_escape_backend_text() {
        let entry = RowEntry::Error {
            file: "x.pdf".to_string(),
            message: "<img src=x>".to_string(),
        };
        let RowVm::Error(row) = map_row_entry(&entry) else {
            panic!("expected error row");
        };
        assert!(row.text.contains("x.pdf"));
        assert!(!row.text.contains('<'));
    }
}
