use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqCategory {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
}

/// Look up a category by name, ignoring case and surrounding whitespace.
#[must_use]
pub fn find_category<'a>(categories: &'a [FaqCategory], name: &str) -> Option<&'a FaqCategory> {
    let wanted = name.trim();
    categories
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(wanted))
}
