//! Question id normalisation.
//!
//! Grouped questions repeat a base question once per group member and mark
//! the member with a `__<n>` suffix: `ESS_1__10` is member `10` of `ESS_1`.

/// Marker separating a question id from its grouping suffix.
pub const GROUP_MARKER: &str = "__";

/// Strip the grouping suffix from a question id.
///
/// Only the last marker counts. An id starting with the marker is returned
/// unchanged, as it has no base id to fall back to.
///
/// ```
/// use surveylog_types::uid::normalise;
///
/// assert_eq!(normalise("ESS_1__10"), "ESS_1");
/// assert_eq!(normalise("ESS_1"), "ESS_1");
/// assert_eq!(normalise("__10"), "__10");
/// ```
pub fn normalise(uid: &str) -> &str {
    match uid.rfind(GROUP_MARKER) {
        Some(index) if index > 0 => &uid[..index],
        _ => uid,
    }
}

/// Strip the grouping suffix from every id, keeping order and length.
pub fn normalise_all<S: AsRef<str>>(uids: &[S]) -> Vec<&str> {
    uids.iter().map(|uid| normalise(uid.as_ref())).collect()
}

/// The grouping suffix of a question id, without the marker.
pub fn group_suffix(uid: &str) -> Option<&str> {
    match uid.rfind(GROUP_MARKER) {
        Some(index) if index > 0 => Some(&uid[index + GROUP_MARKER.len()..]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_suffix() {
        assert_eq!(normalise("ESS_1__10"), "ESS_1");
        assert_eq!(normalise("a__b__c"), "a__b");
    }

    #[test]
    fn keeps_plain_ids() {
        assert_eq!(normalise("ESS_1"), "ESS_1");
        assert_eq!(normalise(""), "");
        assert_eq!(normalise("a_b"), "a_b");
    }

    #[test]
    fn marker_at_start() {
        assert_eq!(normalise("__10"), "__10");
        assert_eq!(normalise("__"), "__");
    }

    #[test]
    fn trailing_marker() {
        assert_eq!(normalise("ESS__"), "ESS");
    }

    #[test]
    fn normalise_list() {
        let uids = vec!["ESS_1__10".to_string(), "ESS_2__10".to_string(), "X".to_string()];
        assert_eq!(normalise_all(&uids), vec!["ESS_1", "ESS_2", "X"]);
        assert!(normalise_all::<&str>(&[]).is_empty());
    }

    #[test]
    fn suffix() {
        assert_eq!(group_suffix("ESS_1__10"), Some("10"));
        assert_eq!(group_suffix("__10"), None);
        assert_eq!(group_suffix("ESS_1"), None);
    }
}
