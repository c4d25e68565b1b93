use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;

/// Which endpoint is asking. The two treat a blank query differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterContext {
    /// Blank query means "no results".
    Search,
    /// Missing query means "no text filter".
    Listing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFilter {
    Unfiltered,
    MatchNothing,
    /// Case-insensitive substring over title, subtitle, content and author name.
    Contains(String),
}

impl TextFilter {
    /// In-process evaluation of the filter against an entity's text fields.
    pub fn matches(&self, fields: &[Option<&str>]) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::MatchNothing => false,
            Self::Contains(needle) => {
                let needle = needle.to_lowercase();
                fields
                    .iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

pub fn build_filter(query: Option<&str>, context: FilterContext) -> TextFilter {
    match query.map(str::trim).filter(|value| !value.is_empty()) {
        Some(needle) => TextFilter::Contains(needle.to_owned()),
        None => match context {
            FilterContext::Search => TextFilter::MatchNothing,
            FilterContext::Listing => TextFilter::Unfiltered,
        },
    }
}

/// `ILIKE` pattern for a substring search with `%`, `_` and `\` escaped.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    All,
    Category(CategoryId),
    Author(AuthorId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub scope: PostScope,
    pub text: TextFilter,
}

impl PostFilter {
    pub fn all() -> Self {
        Self {
            scope: PostScope::All,
            text: TextFilter::Unfiltered,
        }
    }

    pub fn scoped(scope: PostScope) -> Self {
        Self {
            scope,
            text: TextFilter::Unfiltered,
        }
    }

    pub fn search(query: Option<&str>) -> Self {
        Self {
            scope: PostScope::All,
            text: build_filter(query, FilterContext::Search),
        }
    }

    pub fn matches_nothing(&self) -> bool {
        self.text == TextFilter::MatchNothing
    }
}
