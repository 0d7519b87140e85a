/// Case-insensitive substring filter over note names. An empty query keeps
/// everything; order is preserved.
pub fn filter_names<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return names.iter().map(String::as_str).collect();
    }
    let needle = query.to_lowercase();
    names
        .iter()
        .map(String::as_str)
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let files = names(&["Notes.md", "Other.md"]);
        assert_eq!(filter_names(&files, "not"), vec!["Notes.md"]);
        assert_eq!(filter_names(&files, "NOT"), vec!["Notes.md"]);
        assert_eq!(filter_names(&files, "the"), vec!["Other.md"]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let files = names(&["b.md", "a.md"]);
        assert_eq!(filter_names(&files, ""), vec!["b.md", "a.md"]);
    }

    #[test]
    fn extension_is_part_of_the_name() {
        let files = names(&["Notes.md", "todo.txt"]);
        assert_eq!(filter_names(&files, ".MD"), vec!["Notes.md"]);
    }

    #[test]
    fn no_match_is_empty() {
        let files = names(&["Notes.md"]);
        assert!(filter_names(&files, "zzz").is_empty());
    }
}
