use crate::application::ports::assistant_provider::MessageAnnotation;

/// Replaces each citation annotation in a response body with a sequential
/// footnote marker, numbered in order of appearance.
///
/// Only the rewritten body is kept; no separate source list is produced.
/// Annotations whose source span no longer occurs in the text are skipped
/// without consuming a footnote number.
pub fn apply_footnotes(text: &str, annotations: &[MessageAnnotation]) -> String {
    let mut body = text.to_string();
    let mut index = 1;

    for annotation in annotations {
        if annotation.source_text.is_empty() || !body.contains(&annotation.source_text) {
            continue;
        }
        let marker = format!("<sup>[{}]</sup>", index);
        body = body.replacen(&annotation.source_text, &marker, 1);
        index += 1;
    }

    body
}
