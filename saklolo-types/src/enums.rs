use serde::{Deserialize, Serialize};

/// Kind of emergency a help request is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Typhoon,
    Fire,
    Earthquake,
    Crime,
}

impl Category {
    /// All categories in the order they are offered in the form
    pub const ALL: [Category; 4] = [
        Category::Typhoon,
        Category::Fire,
        Category::Earthquake,
        Category::Crime,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Typhoon => "TYPHOON",
            Category::Fire => "FIRE",
            Category::Earthquake => "EARTHQUAKE",
            Category::Crime => "CRIME",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Typhoon => "Typhoon",
            Category::Fire => "Fire",
            Category::Earthquake => "Earthquake",
            Category::Crime => "Crime",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Category::Typhoon => Category::Fire,
            Category::Fire => Category::Earthquake,
            Category::Earthquake => Category::Crime,
            Category::Crime => Category::Typhoon,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Category::Typhoon => Category::Crime,
            Category::Fire => Category::Typhoon,
            Category::Earthquake => Category::Fire,
            Category::Crime => Category::Earthquake,
        }
    }
}

/// Feed ordering selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortMode {
    #[default]
    Latest,
    Popular,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Latest => "LATEST",
            SortMode::Popular => "POPULAR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Latest => "Latest",
            SortMode::Popular => "Popular",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            SortMode::Latest => SortMode::Popular,
            SortMode::Popular => SortMode::Latest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Dark,
    Light,
    Solarized,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "Default",
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::Solarized => "Solarized",
        }
    }

    /// Case-insensitive so values from env vars and TOML files both work
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(ColorScheme::Default),
            "dark" => Some(ColorScheme::Dark),
            "light" => Some(ColorScheme::Light),
            "solarized" => Some(ColorScheme::Solarized),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_in_wire_case() {
        let json = serde_json::to_string(&Category::Earthquake).unwrap();
        assert_eq!(json, "\"EARTHQUAKE\"");
        let parsed: Category = serde_json::from_str("\"CRIME\"").unwrap();
        assert_eq!(parsed, Category::Crime);
        assert!(serde_json::from_str::<Category>("\"FLOOD\"").is_err());
    }

    #[test]
    fn category_cycle_visits_every_variant() {
        let mut seen = vec![Category::Typhoon];
        let mut current = Category::Typhoon.next();
        while current != Category::Typhoon {
            seen.push(current);
            current = current.next();
        }
        assert_eq!(seen, Category::ALL.to_vec());
        for category in Category::ALL {
            assert_eq!(category.next().previous(), category);
        }
    }

    #[test]
    fn sort_mode_defaults_to_latest_and_toggles() {
        assert_eq!(SortMode::default(), SortMode::Latest);
        assert_eq!(SortMode::Latest.toggle(), SortMode::Popular);
        assert_eq!(SortMode::Popular.toggle(), SortMode::Latest);
    }

    #[test]
    fn color_scheme_parse_is_case_insensitive() {
        assert_eq!(ColorScheme::parse("SOLARIZED"), Some(ColorScheme::Solarized));
        assert_eq!(ColorScheme::parse("neon"), None);
    }
}
