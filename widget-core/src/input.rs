//! Input handling shared by both widgets: trimming, emptiness checks and
//! category key normalization.

use crate::{error::ValidationError, model::NewExcuse};

/// Trimmed city name, or [`ValidationError::EmptyCity`] for blank input.
pub fn city_query(raw: &str) -> Result<String, ValidationError> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(ValidationError::EmptyCity);
    }
    Ok(city.to_string())
}

/// Validate the add-excuse form. The category is checked before the excuse.
pub fn new_excuse(category: &str, excuse: &str) -> Result<NewExcuse, ValidationError> {
    let category = category.trim();
    let excuse = excuse.trim();

    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if excuse.is_empty() {
        return Err(ValidationError::EmptyExcuse);
    }

    Ok(NewExcuse {
        category: category_key(category),
        excuse: excuse.to_string(),
    })
}

/// `"Work  Stuff"` -> `"work_stuff"`. Runs of whitespace collapse to one `_`.
pub fn category_key(display: &str) -> String {
    display
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// `"late_home"` -> `"Late Home"`.
pub fn category_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_city_is_rejected() {
        for raw in ["", " ", "\t", "  \n  "] {
            assert_eq!(city_query(raw), Err(ValidationError::EmptyCity));
        }
    }

    #[test]
    fn city_is_trimmed() {
        assert_eq!(city_query("  Paris ").as_deref(), Ok("Paris"));
    }

    #[test]
    fn category_key_is_lowercase_underscored() {
        assert_eq!(category_key("Work Stuff"), "work_stuff");
        assert_eq!(category_key("Late   Home"), "late_home");
        assert_eq!(category_key("general"), "general");
    }

    #[test]
    fn category_label_title_cases_words() {
        assert_eq!(category_label("forgot_event"), "Forgot Event");
        assert_eq!(category_label("general"), "General");
    }

    #[test]
    fn new_excuse_normalizes_category() {
        let new = new_excuse(" Work Stuff ", " traffic ").expect("valid input");
        assert_eq!(new.category, "work_stuff");
        assert_eq!(new.excuse, "traffic");
    }

    #[test]
    fn new_excuse_checks_category_first() {
        assert_eq!(new_excuse(" ", ""), Err(ValidationError::EmptyCategory));
        assert_eq!(new_excuse("work", "  "), Err(ValidationError::EmptyExcuse));
    }
}
