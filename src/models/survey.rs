use serde::{Deserialize, Serialize};

/// Raw survey answers driving both generation and filtering.
///
/// Field names mirror the survey form's question keys, so the wire format is
/// camelCase. Provided once per pipeline run and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub age_range: String,
    pub gender: String,
    pub gift_preference: String,
    pub tech_gadgets_interest: String,
    pub relaxation_method: String,
    pub fashion_interest: String,
    pub exercise_frequency: String,
    pub dietary_preferences: String,
    pub favorite_color_palette: String,
    pub experience_gifts_interest: String,
    pub home_decor_interest: String,
    pub clothing_gift_preference: String,
    pub cooking_interest: String,
    pub book_interest: String,
    pub weekend_preference: String,
    pub organizing_tool_interest: String,
    pub movie_preference: Vec<String>,
    pub adventurousness: String,
    pub lifestyle_gift_preference: String,
    pub beauty_product_interest: String,
    #[serde(rename = "DIYInterest")]
    pub diy_interest: String,
    pub hobby_gift_interest: String,
    pub sustainability_preference: String,
    pub budget: String,
    pub specific_hobbies: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_wire_format() {
        let json = r#"{
            "ageRange": "25-34",
            "gender": "Female",
            "giftPreference": "Decorative",
            "techGadgetsInterest": "Sometimes",
            "relaxationMethod": "Meditating/Yoga",
            "fashionInterest": "Yes, they love fashion",
            "exerciseFrequency": "Few times a week",
            "dietaryPreferences": "Vegan",
            "favoriteColorPalette": "Soft/pastel colors",
            "experienceGiftsInterest": "Yes, they love experiences",
            "homeDecorInterest": "Yes, they enjoy decorating their space",
            "clothingGiftPreference": "They love clothing gifts",
            "cookingInterest": "They cook occasionally",
            "bookInterest": "Yes, they're a bookworm",
            "weekendPreference": "Relaxing at home",
            "organizingToolInterest": "Sometimes",
            "moviePreference": ["Drama", "Romance"],
            "adventurousness": "Sometimes open to trying new things",
            "lifestyleGiftPreference": "A mix of both",
            "beautyProductInterest": "Occasionally",
            "DIYInterest": "Sometimes",
            "hobbyGiftInterest": "Yes, they'd love gifts related to their hobbies",
            "sustainabilityPreference": "Sustainable",
            "budget": "₹5,000-₹10,000",
            "specificHobbies": "Painting and gardening"
        }"#;

        let survey: SurveyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(survey.budget, "₹5,000-₹10,000");
        assert_eq!(survey.movie_preference, vec!["Drama", "Romance"]);
        assert_eq!(survey.diy_interest, "Sometimes");

        let value = serde_json::to_value(&survey).unwrap();
        assert!(value["ageRange"].is_string());
        assert!(value["DIYInterest"].is_string());
        assert!(value["specificHobbies"].is_string());
    }
}
