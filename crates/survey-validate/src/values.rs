//! Interpretation of categorical answers.

/// Answers recorded as "yes" by the survey forms.
const AFFIRMATIVE: [&str; 4] = ["yes", "y", "true", "1"];

/// Case-insensitive "yes"; `None` is never affirmative.
pub fn is_affirmative(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        AFFIRMATIVE.iter().any(|yes| v.eq_ignore_ascii_case(yes))
    })
}

/// An amenity answer that does not show the amenity: "no" or nothing.
pub fn is_absent_or_no(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => {
            let v = v.trim();
            v.is_empty() || v.eq_ignore_ascii_case("no")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_vocabulary() {
        assert!(is_affirmative(Some("Yes")));
        assert!(is_affirmative(Some(" y ")));
        assert!(is_affirmative(Some("1")));
        assert!(!is_affirmative(Some("No")));
        assert!(!is_affirmative(Some("yes please")));
        assert!(!is_affirmative(None));
    }

    #[test]
    fn absent_or_no() {
        assert!(is_absent_or_no(None));
        assert!(is_absent_or_no(Some(" NO ")));
        assert!(is_absent_or_no(Some("")));
        assert!(!is_absent_or_no(Some("Yes")));
        assert!(!is_absent_or_no(Some("Don't know")));
    }
}
