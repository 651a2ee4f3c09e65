const HINT_OPEN: &str = "[[SEARCH:";
const HINT_CLOSE: &str = "]]";

/// Pull the `[[SEARCH:keyword]]` markers the assistant is told to emit, in
/// reply order. Blank keywords are skipped.
pub fn extract_search_hints(reply: &str) -> Vec<String> {
    let mut hints = Vec::new();
    let mut rest = reply;

    while let Some(start) = rest.find(HINT_OPEN) {
        let after_open = &rest[start + HINT_OPEN.len()..];
        let Some(end) = after_open.find(HINT_CLOSE) else {
            break;
        };

        let keyword = after_open[..end].trim();
        if !keyword.is_empty() {
            hints.push(keyword.to_owned());
        }
        rest = &after_open[end + HINT_CLOSE.len()..];
    }

    hints
}

/// Reply text with the markers removed, for display.
pub fn strip_search_hints(reply: &str) -> String {
    let mut out = String::with_capacity(reply.len());
    let mut rest = reply;

    while let Some(start) = rest.find(HINT_OPEN) {
        let after_open = &rest[start + HINT_OPEN.len()..];
        let Some(end) = after_open.find(HINT_CLOSE) else {
            break;
        };
        out.push_str(rest[..start].trim_end_matches(' '));
        rest = &after_open[end + HINT_CLOSE.len()..];
    }
    out.push_str(rest);

    out
}

#[cfg(test)]
mod tests {
    use super::{extract_search_hints, strip_search_hints};

    #[test]
    fn extracts_hints_in_order() {
        let reply = "Ada GT Radial [[SEARCH:Champiro]] dan Dunlop [[SEARCH: Enasave ]].";
        assert_eq!(extract_search_hints(reply), vec!["Champiro", "Enasave"]);
    }

    #[test]
    fn ignores_blank_and_unterminated_hints() {
        assert!(extract_search_hints("[[SEARCH:   ]]").is_empty());
        assert!(extract_search_hints("cari [[SEARCH:185/65").is_empty());
        assert!(extract_search_hints("tidak ada").is_empty());
    }

    #[test]
    fn strips_markers_for_display() {
        assert_eq!(
            strip_search_hints("Stok ada [[SEARCH:185/65]] 4 unit."),
            "Stok ada 4 unit."
        );
        assert_eq!(
            strip_search_hints("Ada [[SEARCH:Champiro]].\nMampir ya"),
            "Ada.\nMampir ya"
        );
        assert_eq!(strip_search_hints("tanpa penanda"), "tanpa penanda");
    }
}
