//! English inflection helpers used for list naming.
//!
//! Only the final word of a phrase is inflected; everything before it is
//! kept verbatim. Case of the inflected word follows the input word.

use convert_case::{Case, Casing};

/// Title-case an identifier: `blogPost` / `blog_post` → `Blog Post`.
#[must_use]
pub fn titleize(s: &str) -> String {
    s.to_case(Case::Title)
}

/// Human-readable label for a field path: `firstName` → `First name`.
#[must_use]
pub fn humanize(s: &str) -> String {
    s.to_case(Case::Sentence)
}

/// URL segment: `Blog Posts` → `blog-posts`.
#[must_use]
pub fn dasherize(s: &str) -> String {
    s.to_case(Case::Kebab).to_lowercase()
}

/// `Blog Post` → `blogPost`.
#[must_use]
pub fn camelize_lower(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// `Blog Post` → `BlogPost`.
#[must_use]
pub fn camelize_upper(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Pluralize the last word of a phrase. Already-plural words are kept.
#[must_use]
pub fn pluralize(s: &str) -> String {
    inflect_last_word(s, plural_word)
}

/// Singularize the last word of a phrase. Already-singular words are kept.
#[must_use]
pub fn singularize(s: &str) -> String {
    inflect_last_word(s, singular_word)
}

fn inflect_last_word(s: &str, rule: fn(&str) -> String) -> String {
    let (prefix, word) = split_last_word(s);
    if word.is_empty() {
        return s.to_string();
    }

    let inflected = rule(&word.to_lowercase());

    format!("{prefix}{}", restore_case(word, &inflected))
}

// Split at the last separator or lower→upper camel boundary.
fn split_last_word(s: &str) -> (&str, &str) {
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (idx, ch) in s.char_indices() {
        if matches!(ch, ' ' | '_' | '-') {
            start = idx + ch.len_utf8();
        } else if ch.is_uppercase() && prev.is_some_and(char::is_lowercase) {
            start = idx;
        }
        prev = Some(ch);
    }

    s.split_at(start)
}

fn restore_case(original: &str, inflected: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let all_upper = original.chars().count() > 1 && original.chars().all(|c| !c.is_lowercase());

    if all_upper {
        return inflected.to_uppercase();
    }
    if first_upper {
        let mut out = String::with_capacity(inflected.len());
        let mut it = inflected.chars();
        if let Some(first) = it.next() {
            out.extend(first.to_uppercase());
            out.push_str(it.as_str());
        }
        return out;
    }

    inflected.to_string()
}

fn plural_word(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}

fn singular_word(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_regular_and_irregular_words() {
        assert_eq!(pluralize("User"), "Users");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("Key"), "Keys");
        assert_eq!(pluralize("Sheep"), "Sheep");
    }

    #[test]
    fn keeps_plural_words_plural() {
        assert_eq!(pluralize("Users"), "Users");
        assert_eq!(pluralize("People"), "People");
        assert_eq!(pluralize("Categories"), "Categories");
    }

    #[test]
    fn singularizes_last_word_only() {
        assert_eq!(singularize("Blog Posts"), "Blog Post");
        assert_eq!(singularize("Users"), "User");
        assert_eq!(singularize("Addresses"), "Address");
        assert_eq!(singularize("Status"), "Status");
        assert_eq!(singularize("People"), "Person");
    }

    #[test]
    fn sibilant_endings_survive_a_round_trip() {
        for (word, plural) in [
            ("Status", "Statuses"),
            ("Bus", "Buses"),
            ("Campus", "Campuses"),
            ("Gas", "Gases"),
            ("Atlas", "Atlases"),
            ("Analysis", "Analyses"),
        ] {
            assert_eq!(pluralize(word), plural);
            assert_eq!(singularize(plural), word);
            assert_eq!(singularize(&pluralize(word)), word);
        }
    }

    #[test]
    fn camel_boundary_is_a_word_boundary() {
        assert_eq!(pluralize("BlogPost"), "BlogPosts");
        assert_eq!(singularize("BlogPosts"), "BlogPost");
    }

    #[test]
    fn restores_upper_case_words() {
        assert_eq!(pluralize("FAQ"), "FAQS");
    }

    #[test]
    fn casing_helpers() {
        assert_eq!(titleize("BlogPost"), "Blog Post");
        assert_eq!(titleize("User"), "User");
        assert_eq!(humanize("firstName"), "First name");
        assert_eq!(dasherize("Blog Posts"), "blog-posts");
        assert_eq!(camelize_lower("Blog Post"), "blogPost");
        assert_eq!(camelize_upper("Blog Posts"), "BlogPosts");
    }
}
