/// First candidate present in `available`, in candidate order.
///
/// Matching is exact (case-sensitive); priority is list order, never the
/// order of `available`.
pub fn resolve_column<'a, I, S>(candidates: I, available: &[S]) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .find(|candidate| available.iter().any(|name| name.as_ref() == *candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order_wins_over_column_order() {
        let available = vec!["Stain", "stain_id", "other"];
        let found = resolve_column(["stainID", "stain_id", "stain", "Stain"], &available);
        assert_eq!(found, Some("stain_id"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let available = vec!["STAINID".to_string()];
        assert_eq!(resolve_column(["stainID"], &available), None);
    }

    #[test]
    fn empty_inputs_resolve_to_none() {
        let available: Vec<String> = Vec::new();
        assert_eq!(resolve_column(["stainID"], &available), None);
        assert_eq!(resolve_column(std::iter::empty(), &["stainID"]), None);
    }
}
