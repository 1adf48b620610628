//! Text shape helpers shared by the scoring components.

/// Whether every alphabetic character is uppercase (and at least one exists).
pub fn is_all_caps(text: &str) -> bool {
    let mut has_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// Whether the text is title-cased: each word starts with an uppercase
/// letter and continues in lowercase. Words without alphabetic characters
/// are ignored.
pub fn is_title_case(text: &str) -> bool {
    let mut has_word = false;
    for word in text.split_whitespace() {
        let mut chars = word.chars().skip_while(|c| !c.is_alphabetic());
        match chars.next() {
            Some(first) => {
                has_word = true;
                if !first.is_uppercase() {
                    return false;
                }
                if chars.any(|c| c.is_alphabetic() && c.is_uppercase()) {
                    return false;
                }
            }
            None => continue,
        }
    }
    has_word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_caps() {
        assert!(is_all_caps("EXECUTIVE SUMMARY"));
        assert!(is_all_caps("SECTION 2.1"));
        assert!(!is_all_caps("Executive Summary"));
        assert!(!is_all_caps("1234"));
        assert!(!is_all_caps(""));
    }

    #[test]
    fn test_title_case() {
        assert!(is_title_case("Data Collection Methods"));
        assert!(is_title_case("2.3 Data Collection"));
        assert!(!is_title_case("Data collection methods"));
        assert!(!is_title_case("DATA COLLECTION"));
        assert!(!is_title_case("1 2 3"));
    }
}
