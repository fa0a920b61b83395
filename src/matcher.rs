/// Keyword vocabulary recognized in chat text when deriving a field
/// request. The order is part of the contract: labels are matched in this
/// order, and it decides which label claims a line when labels overlap
/// ("amount" is a substring of "total amount"). Do not reorder casually.
pub const FIELD_KEYWORDS: &[&str] = &[
    "invoice number",
    "vendor",
    "date",
    "total amount",
    "amount",
    "due date",
];

/// Field set used when the chat gives no usable request.
pub const DEFAULT_FIELDS: &[&str] = &["invoice number", "vendor", "date", "total amount"];

/// One extracted record: label/value pairs in request order, plus the
/// source filename. Every requested label is present, empty when nothing
/// in the document matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    fields: Vec<(String, String)>,
    filename: String,
}

impl ExtractedRow {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Label/value pairs in the order they were requested.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Scan document text line by line for each requested field label and pull
/// a best-guess value per label. For each label the first line containing
/// it (case-insensitively) wins: with a colon, the value is everything
/// after the first colon; without one, the line with the label stripped.
/// No numeric parsing, no date or currency normalization.
pub fn match_fields(text: &str, fields: &[&str], filename: &str) -> ExtractedRow {
    let lines: Vec<&str> = text.lines().collect();

    let fields = fields
        .iter()
        .map(|&field| {
            let value = lines
                .iter()
                .find_map(|line| match_line(line, field))
                .unwrap_or_default();
            (field.to_string(), value)
        })
        .collect();

    ExtractedRow {
        fields,
        filename: filename.to_string(),
    }
}

/// Pull a value for `label` out of `line`, if the line mentions the label.
fn match_line(line: &str, label: &str) -> Option<String> {
    let pos = find_ignore_ascii_case(line, label)?;
    let value = match line.split_once(':') {
        Some((_, after)) => after.trim().to_string(),
        None => {
            let mut stripped = String::with_capacity(line.len() - label.len());
            stripped.push_str(&line[..pos]);
            stripped.push_str(&line[pos + label.len()..]);
            stripped.trim().to_string()
        }
    };
    Some(value)
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_line_takes_value_after_first_colon() {
        let row = match_fields("Invoice Number: INV-123\n", &["invoice number"], "a.pdf");
        assert_eq!(row.get("invoice number"), Some("INV-123"));
    }

    #[test]
    fn colonless_line_strips_the_label() {
        let row = match_fields("Total Amount 500\n", &["total amount"], "a.pdf");
        assert_eq!(row.get("total amount"), Some("500"));
    }

    #[test]
    fn unmatched_labels_are_present_but_empty() {
        let row = match_fields("nothing relevant here\n", &["vendor", "due date"], "a.pdf");
        assert_eq!(row.get("vendor"), Some(""));
        assert_eq!(row.get("due date"), Some(""));
        assert_eq!(row.fields().len(), 2);
    }

    #[test]
    fn first_matching_line_wins() {
        let text = "Date: 2025-01-01\nDue Date: 2025-02-01\n";
        let row = match_fields(text, &["date"], "a.pdf");
        assert_eq!(row.get("date"), Some("2025-01-01"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let row = match_fields("VENDOR: Acme Corp\n", &["vendor"], "a.pdf");
        assert_eq!(row.get("vendor"), Some("Acme Corp"));
    }

    #[test]
    fn overlapping_labels_can_claim_the_same_line() {
        // "amount" also matches the "Total Amount" line; with a colon both
        // labels read the same value.
        let row = match_fields("Total Amount: 750.00\n", &["total amount", "amount"], "a.pdf");
        assert_eq!(row.get("total amount"), Some("750.00"));
        assert_eq!(row.get("amount"), Some("750.00"));
    }

    #[test]
    fn stripping_keeps_the_rest_of_the_line() {
        // Known limitation: without a colon, "amount" strips only its own
        // occurrence and keeps the surrounding words.
        let row = match_fields("Total Amount 88.00\n", &["amount"], "a.pdf");
        assert_eq!(row.get("amount"), Some("Total  88.00"));
    }

    #[test]
    fn row_keys_follow_request_order() {
        let row = match_fields("", &["vendor", "date"], "inv.pdf");
        let labels: Vec<&str> = row.fields().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["vendor", "date"]);
        assert_eq!(row.filename(), "inv.pdf");
    }
}
