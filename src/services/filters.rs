use crate::models::{FilterSpec, SurveyResponse};

const DEFAULT_MIN_PRICE: u32 = 1000;
const DEFAULT_MAX_PRICE: u32 = 10000;

const BASELINE_RATING: f32 = 4.0;
const ELEVATED_RATING: f32 = 4.5;

/// Survey answers that bump the minimum rating to the elevated threshold.
///
/// A rule table rather than a scoring model: each entry pairs an answer
/// predicate with the rating it forces. First match wins.
const RATING_RULES: &[(fn(&SurveyResponse) -> bool, f32)] = &[
    (
        |s| s.fashion_interest == "Yes, they love fashion",
        ELEVATED_RATING,
    ),
    (
        |s| s.home_decor_interest == "Yes, they enjoy decorating their space",
        ELEVATED_RATING,
    ),
];

/// Parses a budget answer like "₹5,000-₹10,000" into a (min, max) pair.
///
/// Everything that is not an ASCII digit or a dash is stripped before
/// splitting, so currency symbols and thousands separators are tolerated.
/// A missing, unparsable, or zero side falls back to the default bound.
pub fn parse_budget(budget: &str) -> (u32, u32) {
    let cleaned: String = budget
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let mut parts = cleaned.splitn(2, '-');
    let min = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MIN_PRICE);
    let max = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_PRICE);

    // An inverted range means the answer wasn't a usable "A-B" pair, such as
    // a dash-less "5000 to 10000" collapsing into one large number.
    if min > max {
        return (DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE);
    }

    (min, max)
}

/// Derives the product-lookup filters for a run from the raw survey.
///
/// Pure and infallible: malformed answers degrade to defaults, never errors.
pub fn derive_filters(survey: &SurveyResponse) -> FilterSpec {
    let (min_price, max_price) = parse_budget(&survey.budget);

    let min_rating = RATING_RULES
        .iter()
        .find(|(applies, _)| applies(survey))
        .map(|(_, rating)| *rating)
        .unwrap_or(BASELINE_RATING);

    FilterSpec {
        min_price,
        max_price,
        min_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget_with_currency_symbols() {
        assert_eq!(parse_budget("₹5,000-₹10,000"), (5000, 10000));
        assert_eq!(parse_budget("$200-$500"), (200, 500));
        assert_eq!(parse_budget("1500-3000"), (1500, 3000));
    }

    #[test]
    fn test_parse_budget_malformed_falls_back_to_defaults() {
        assert_eq!(parse_budget(""), (1000, 10000));
        assert_eq!(parse_budget("no idea"), (1000, 10000));
        assert_eq!(parse_budget("-"), (1000, 10000));
        assert_eq!(parse_budget("5000"), (5000, 10000));
        assert_eq!(parse_budget("-8000"), (1000, 8000));
    }

    #[test]
    fn test_parse_budget_inverted_range_falls_back_to_defaults() {
        // Dash-less wording glues the numbers together into a bogus minimum
        assert_eq!(parse_budget("5000 to 10000"), (1000, 10000));
        assert_eq!(parse_budget("9000-2000"), (1000, 10000));
        let (min, max) = parse_budget("₹50,000 or so");
        assert!(min <= max);
    }

    #[test]
    fn test_fashion_affinity_elevates_rating() {
        let survey = SurveyResponse {
            budget: "₹5,000-₹10,000".to_string(),
            fashion_interest: "Yes, they love fashion".to_string(),
            ..Default::default()
        };
        let filters = derive_filters(&survey);
        assert_eq!(filters.min_price, 5000);
        assert_eq!(filters.max_price, 10000);
        assert_eq!(filters.min_rating, 4.5);
    }

    #[test]
    fn test_home_decor_affinity_elevates_rating() {
        let survey = SurveyResponse {
            budget: "1000-2000".to_string(),
            home_decor_interest: "Yes, they enjoy decorating their space".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_filters(&survey).min_rating, 4.5);
    }

    #[test]
    fn test_baseline_rating_without_affinity() {
        let survey = SurveyResponse {
            budget: "1000-2000".to_string(),
            fashion_interest: "Not really".to_string(),
            home_decor_interest: "No".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_filters(&survey).min_rating, 4.0);
    }

    #[test]
    fn test_derive_filters_is_deterministic() {
        let survey = SurveyResponse {
            budget: "₹2,500-₹7,500".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_filters(&survey), derive_filters(&survey));
    }
}
