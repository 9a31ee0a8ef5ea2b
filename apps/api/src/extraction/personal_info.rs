//! Personal info extraction: first email, first phone number, first
//! `City, ST`-shaped line. First match wins; later candidates are ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::extraction::profile::PersonalInfo;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("email regex is valid")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Optional country code, optional parens around the area code,
        // -, . or space separators.
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("phone regex is valid")
    })
}

fn location_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "Austin, TX" / "New York, NY" shapes.
        Regex::new(r"\b[A-Z][A-Za-z .'-]+,\s*[A-Z]{2}\b").expect("location regex is valid")
    })
}

/// Scans the line sequence for email, phone and location. Absent values are
/// heuristic misses, not errors.
pub fn extract_personal_info(lines: &[String]) -> PersonalInfo {
    let first_match = |re: &Regex| {
        lines
            .iter()
            .find_map(|line| re.find(line))
            .map(|m| m.as_str().to_string())
    };

    PersonalInfo {
        email: first_match(email_re()),
        phone: first_match(phone_re()),
        location: first_match(location_re()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_email_wins() {
        let info = extract_personal_info(&lines(&[
            "Jane Doe",
            "jane@example.com | backup: jane.doe@old.example.org",
            "other@later.example.com",
        ]));
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_phone_shapes() {
        for raw in ["(512) 555-0199", "512-555-0199", "+1 512 555 0199", "512.555.0199"] {
            let info = extract_personal_info(&lines(&[raw]));
            assert!(info.phone.is_some(), "no phone found in {raw:?}");
        }
    }

    #[test]
    fn test_city_state_location() {
        let info = extract_personal_info(&lines(&["Austin, TX", "jane@example.com"]));
        assert_eq!(info.location.as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn test_empty_lines_yield_all_absent() {
        let info = extract_personal_info(&[]);
        assert_eq!(info, PersonalInfo::default());
    }

    #[test]
    fn test_no_aggregation_across_lines() {
        // A missing phone does not borrow digits from unrelated lines.
        let info = extract_personal_info(&lines(&["Jane Doe", "Engineer"]));
        assert!(info.email.is_none());
        assert!(info.phone.is_none());
        assert!(info.location.is_none());
    }
}
