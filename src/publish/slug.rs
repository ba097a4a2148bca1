//! Repository-name slug derivation.

/// Derives a stable repository name from a business name: lower-case,
/// every character outside `[a-z0-9]` replaced with `-`, consecutive
/// `-` collapsed, truncated to 50 characters.
pub fn repo_slug(business_name: &str) -> String {
    let mut slug = String::with_capacity(business_name.len());
    let mut last_was_dash = false;
    for ch in business_name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    slug.truncate(50);
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(repo_slug("Oase Coffee Lab!"), "oase-coffee-lab-");
    }

    #[test]
    fn test_consecutive_separators_collapse() {
        assert_eq!(repo_slug("A  --  B"), "a-b");
    }

    #[test]
    fn test_digits_preserved() {
        assert_eq!(repo_slug("Warung 24/7"), "warung-24-7");
    }

    #[test]
    fn test_non_ascii_maps_to_dash() {
        assert_eq!(repo_slug("Café Über"), "caf-ber");
    }

    #[test]
    fn test_truncated_to_fifty() {
        let long = "x".repeat(80);
        assert_eq!(repo_slug(&long).len(), 50);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(repo_slug("Oase Coffee Lab!"), repo_slug("Oase Coffee Lab!"));
    }
}
