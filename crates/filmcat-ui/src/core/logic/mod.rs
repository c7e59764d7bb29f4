//! Pure UI helpers extracted from components for non-wasm testing.

use std::collections::BTreeSet;
use std::fmt::Write;

/// Encode key/value pairs as an `application/x-www-form-urlencoded` query (no leading `?`).
#[must_use]
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        let _ = write!(
            out,
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        );
    }
    out
}

/// Split a raw query string into decoded pairs, in order.
///
/// Accepts an optional leading `?`, treats `+` as a space and skips empty
/// segments. Undecodable segments are kept verbatim.
#[must_use]
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), |decoded| decoded.into_owned())
}

/// Parse a comma-separated id list, dropping blanks and non-numeric entries.
#[must_use]
pub fn parse_id_list(raw: &str) -> BTreeSet<u32> {
    raw.split(',')
        .map(str::trim)
        .filter_map(|id| id.parse().ok())
        .collect()
}

/// Join ids into the comma-separated wire form.
#[must_use]
pub fn join_ids(ids: &BTreeSet<u32>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Toggle the presence of an id in the selection set.
#[must_use]
pub fn toggle_selection(selected: &BTreeSet<u32>, id: u32) -> BTreeSet<u32> {
    let mut next = selected.clone();
    if !next.remove(&id) {
        next.insert(id);
    }
    next
}

/// Case-insensitive substring match used by the genre/actor search boxes.
#[must_use]
pub fn name_matches(name: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_percent_encoded() {
        assert_eq!(
            encode_pairs([("producer", "Mosfilm & Co"), ("genre_ids", "1,2")]),
            "producer=Mosfilm%20%26%20Co&genre_ids=1%2C2"
        );
        assert_eq!(encode_pairs(std::iter::empty()), "");
    }

    #[test]
    fn query_parsing_decodes_and_skips_empty_segments() {
        assert_eq!(
            parse_query("?query=star+wars&&genre_ids=1%2C2&flag"),
            vec![
                ("query".to_string(), "star wars".to_string()),
                ("genre_ids".to_string(), "1,2".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }

    #[test]
    fn id_lists_round_trip() {
        let ids = parse_id_list("3, 1,x,,2");
        assert_eq!(ids.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(join_ids(&ids), "1,2,3");
        assert_eq!(join_ids(&BTreeSet::new()), "");
    }

    #[test]
    fn toggle_selection_adds_and_removes() {
        let set = BTreeSet::new();
        let added = toggle_selection(&set, 4);
        assert!(added.contains(&4));
        let removed = toggle_selection(&added, 4);
        assert!(removed.is_empty());
    }

    #[test]
    fn name_filter_ignores_case_and_blank_needles() {
        assert!(name_matches("Андрей Тарковский", "тарков"));
        assert!(name_matches("Drama", "DRA"));
        assert!(name_matches("Drama", "  "));
        assert!(!name_matches("Comedy", "dra"));
    }
}
