/// Categories offered to the user when recording an expense, in display order.
///
/// Stored categories are free-form; this list is a suggestion, not a constraint.
pub const SUGGESTED_CATEGORIES: [&str; 9] = [
    "Food",
    "Transport",
    "Entertainment",
    "Housing",
    "Utilities",
    "Healthcare",
    "Education",
    "Shopping",
    "Other",
];

pub const DEFAULT_CATEGORY: &str = SUGGESTED_CATEGORIES[0];

pub fn is_suggested(category: &str) -> bool {
    SUGGESTED_CATEGORIES.contains(&category)
}

/// Maps a case-insensitive match onto the suggested spelling, leaving unknown names untouched.
pub fn normalize(category: &str) -> String {
    let trimmed = category.trim();
    SUGGESTED_CATEGORIES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .map(|known| known.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
