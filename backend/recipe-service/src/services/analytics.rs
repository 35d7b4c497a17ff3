/// History analytics - ingredient frequency and generation trend
use crate::models::Recipe;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of ingredients reported in `top_ingredients`
pub const TOP_INGREDIENTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalytics {
    pub total_recipes: usize,
    pub top_ingredients: Vec<IngredientFrequency>,
    pub recipes_per_day: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientFrequency {
    pub ingredient: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Summarize stored recipes.
///
/// Ingredient names are trimmed and lowercased before counting; blank names
/// are skipped. Ties are broken by name. Days are UTC dates, oldest first.
pub fn summarize(recipes: &[Recipe], top_n: usize) -> HistoryAnalytics {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for recipe in recipes {
        *per_day.entry(recipe.created_at.date_naive()).or_default() += 1;

        for ingredient in &recipe.ingredients {
            let name = ingredient.name.trim().to_lowercase();
            if !name.is_empty() {
                *frequencies.entry(name).or_default() += 1;
            }
        }
    }

    let mut top_ingredients: Vec<IngredientFrequency> = frequencies
        .into_iter()
        .map(|(ingredient, frequency)| IngredientFrequency {
            ingredient,
            frequency,
        })
        .collect();
    top_ingredients.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.ingredient.cmp(&b.ingredient))
    });
    top_ingredients.truncate(top_n);

    HistoryAnalytics {
        total_recipes: recipes.len(),
        top_ingredients,
        recipes_per_day: per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn recipe_on(day: u32, pantry: &[&str]) -> Recipe {
        let mut recipe = Recipe::new(String::new(), String::new(), pantry.iter().copied());
        recipe.created_at = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        recipe
    }

    fn frequency(ingredient: &str, frequency: usize) -> IngredientFrequency {
        IngredientFrequency {
            ingredient: ingredient.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_empty_history() {
        let analytics = summarize(&[], TOP_INGREDIENTS);
        assert_eq!(analytics.total_recipes, 0);
        assert!(analytics.top_ingredients.is_empty());
        assert!(analytics.recipes_per_day.is_empty());
    }

    #[test]
    fn test_ingredients_are_normalized_and_ranked() {
        let recipes = vec![
            recipe_on(1, &["Eggs", "flour", "  "]),
            recipe_on(1, &[" eggs ", "milk"]),
            recipe_on(2, &["EGGS", "Milk", "butter"]),
        ];

        let analytics = summarize(&recipes, TOP_INGREDIENTS);
        assert_eq!(
            analytics.top_ingredients,
            vec![
                frequency("eggs", 3),
                frequency("milk", 2),
                frequency("butter", 1),
                frequency("flour", 1),
            ]
        );
    }

    #[test]
    fn test_top_n_limits_ingredients() {
        let pantry: Vec<String> = (0..15).map(|i| format!("item{:02}", i)).collect();
        let recipe = Recipe::new(String::new(), String::new(), pantry);

        let analytics = summarize(&[recipe], TOP_INGREDIENTS);
        assert_eq!(analytics.top_ingredients.len(), TOP_INGREDIENTS);
        assert_eq!(analytics.top_ingredients[0].ingredient, "item00");
    }

    #[test]
    fn test_recipes_grouped_per_day_oldest_first() {
        let recipes = vec![
            recipe_on(5, &[]),
            recipe_on(2, &["rice"]),
            recipe_on(5, &["beans"]),
        ];

        let analytics = summarize(&recipes, TOP_INGREDIENTS);
        assert_eq!(analytics.total_recipes, 3);
        assert_eq!(
            analytics.recipes_per_day,
            vec![
                DailyCount {
                    date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                    count: 1
                },
                DailyCount {
                    date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                    count: 2
                },
            ]
        );
    }
}
