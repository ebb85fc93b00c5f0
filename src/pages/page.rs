use crate::error::{DashboardError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Overview,
    Providers,
    Receivers,
    FoodListings,
    Claims,
    Analytics,
    Query,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Overview,
        Page::Providers,
        Page::Receivers,
        Page::FoodListings,
        Page::Claims,
        Page::Analytics,
        Page::Query,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Providers => "Providers",
            Page::Receivers => "Receivers",
            Page::FoodListings => "Food Listings",
            Page::Claims => "Claims",
            Page::Analytics => "Analytics",
            Page::Query => "Query",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Providers => "providers",
            Page::Receivers => "receivers",
            Page::FoodListings => "food-listings",
            Page::Claims => "claims",
            Page::Analytics => "analytics",
            Page::Query => "query",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Page::ALL
            .into_iter()
            .find(|p| {
                let slug: String = p.slug().chars().filter(|c| *c != '-').collect();
                slug == wanted || (wanted == "listings" && *p == Page::FoodListings)
            })
            .ok_or_else(|| {
                let names: Vec<&str> = Page::ALL.iter().map(|p| p.slug()).collect();
                DashboardError::Config(format!(
                    "Unknown page '{}'. Choose one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_names() {
        assert_eq!("overview".parse::<Page>().unwrap(), Page::Overview);
        assert_eq!("Food Listings".parse::<Page>().unwrap(), Page::FoodListings);
        assert_eq!("food_listings".parse::<Page>().unwrap(), Page::FoodListings);
        assert_eq!("listings".parse::<Page>().unwrap(), Page::FoodListings);
        assert_eq!("QUERY".parse::<Page>().unwrap(), Page::Query);
        assert!("settings".parse::<Page>().is_err());
    }
}
