use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use juniper::GraphQLObject;

use super::error::{Error, Result};
use super::location::segment_by_location;
use super::meal::extract_meals;
use super::recipe::{extract_recipes, NoiseFilter, RecipeEntry};

/// A favorite food spotted on a menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, GraphQLObject, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub recipe_name: String,
    pub location_name: String,
    pub meal_label: String,
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} ({})",
            self.recipe_name, self.location_name, self.meal_label
        )
    }
}

/// Case-insensitive "contains" test for one keyword. Holds the keyword
/// lower-cased.
#[derive(Debug, Clone)]
pub struct FoodMatcher(String);

impl FoodMatcher {
    pub fn new(food: &str) -> Self {
        Self(food.to_lowercase())
    }

    #[inline]
    pub fn is_match(&self, entry: &RecipeEntry) -> bool {
        entry.is_plausible_item && entry.name.to_lowercase().contains(&self.0)
    }
}

pub fn match_food(
    entries: &[RecipeEntry],
    food: &str,
    location_name: &str,
    meal_label: &str,
) -> Vec<MatchResult> {
    let matcher = FoodMatcher::new(food);
    matches_with(&matcher, entries, location_name, meal_label)
}

fn matches_with(
    matcher: &FoodMatcher,
    entries: &[RecipeEntry],
    location_name: &str,
    meal_label: &str,
) -> Vec<MatchResult> {
    entries
        .iter()
        .filter(|entry| matcher.is_match(entry))
        .map(|entry| MatchResult {
            recipe_name: entry.name.to_string(),
            location_name: location_name.to_owned(),
            meal_label: meal_label.to_owned(),
        })
        .collect()
}

/// Keeps the first of every result that renders to the same text.
pub fn dedup_rendered(results: &mut Vec<MatchResult>) {
    let mut seen = HashSet::with_capacity(results.len());
    results.retain(|result| seen.insert(result.to_string()));
}

/// Validated favorite-food search over a set of dining locations.
#[derive(Debug, Clone)]
pub struct FavoritesQuery {
    foods: Vec<(String, FoodMatcher)>,
    locations: Vec<String>,
    filter: NoiseFilter,
}

impl FavoritesQuery {
    pub fn new(foods: Vec<String>, locations: Vec<String>, filter: NoiseFilter) -> Result<Self> {
        if foods.is_empty() {
            return Err(Error::MissingFoods);
        }
        if locations.is_empty() {
            return Err(Error::MissingLocations);
        }
        let foods = foods
            .into_iter()
            .map(|food| {
                let food = food.trim().to_owned();
                if food.is_empty() {
                    Err(Error::BlankFood)
                } else {
                    let matcher = FoodMatcher::new(&food);
                    Ok((food, matcher))
                }
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            foods,
            locations,
            filter,
        })
    }

    pub fn foods(&self) -> impl ExactSizeIterator<Item = &str> {
        self.foods.iter().map(|(food, _)| food.as_str())
    }

    /// Matches for each food, in the order the foods were given. Each list is
    /// de-duplicated on its rendered text.
    pub fn matches_by_food(&self, markup: &str) -> Vec<(&str, Vec<MatchResult>)> {
        let mut out: Vec<(&str, Vec<MatchResult>)> = self
            .foods
            .iter()
            .map(|(food, _)| (food.as_str(), vec![]))
            .collect();
        for block in segment_by_location(markup, &self.locations) {
            for meal in extract_meals(&block) {
                let entries = extract_recipes(&meal, self.filter);
                for ((_, matcher), (_, hits)) in self.foods.iter().zip(out.iter_mut()) {
                    hits.extend(matches_with(matcher, &entries, &block.name, &meal.label));
                }
            }
        }
        for (_, hits) in &mut out {
            dedup_rendered(hits);
        }
        out
    }

    /// Every match for every food on one day, duplicates collapsed.
    pub fn matches(&self, markup: &str) -> Vec<MatchResult> {
        let mut all: Vec<MatchResult> = self
            .matches_by_food(markup)
            .into_iter()
            .flat_map(|(_, hits)| hits)
            .collect();
        dedup_rendered(&mut all);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn example() -> String {
        fs::read_to_string("./src/parse/html_examples/day_menu.html").unwrap()
    }

    fn query(foods: &[&str], locations: &[&str]) -> FavoritesQuery {
        FavoritesQuery::new(
            foods.iter().map(ToString::to_string).collect(),
            locations.iter().map(ToString::to_string).collect(),
            NoiseFilter::default(),
        )
        .unwrap()
    }

    const CROSSROADS_CURRY: &str = r#"
        <li class="location-name Crossroads"><span class="cafe-title">Crossroads</span>
          <ul><li class="preiod-name Dinner"><span>Fall - Dinner<i class="arrow"></i></span>
            <ul><li class="recip" data-id="1"><span>Chicken Curry</span></li></ul>
          </li></ul>
        </li>"#;

    #[test]
    fn test_concrete_scenario() {
        let results = query(&["curry"], &["Crossroads"]).matches(CROSSROADS_CURRY);
        assert_eq!(
            results,
            vec![MatchResult {
                recipe_name: "Chicken Curry".into(),
                location_name: "Crossroads".into(),
                meal_label: "Dinner".into(),
            }]
        );
        assert_eq!(results[0].to_string(), "Chicken Curry at Crossroads (Dinner)");
    }

    #[test]
    fn test_other_target_yields_nothing() {
        assert!(query(&["curry"], &["Foothill"])
            .matches(CROSSROADS_CURRY)
            .is_empty());
    }

    #[test]
    fn test_match_food_is_case_insensitive() {
        let entries = [
            RecipeEntry {
                name: "CHICKEN CURRY".into(),
                is_plausible_item: true,
            },
            RecipeEntry {
                name: "Rice".into(),
                is_plausible_item: true,
            },
        ];
        let hits = match_food(&entries, "Curry", "Crossroads", "Dinner");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe_name, "CHICKEN CURRY");
    }

    #[test]
    fn test_keyword_is_literal() {
        let entries = [RecipeEntry {
            name: "Chicken (Halal)".into(),
            is_plausible_item: true,
        }];
        assert_eq!(match_food(&entries, "(halal)", "Cafe 3", "Lunch").len(), 1);
        assert!(match_food(&entries, "c.icken", "Cafe 3", "Lunch").is_empty());
    }

    #[test]
    fn test_huge_keyword_is_just_a_miss() {
        let food = "a".repeat(1_500_000);
        let q = query(&[food.as_str()], &["Crossroads"]);
        assert!(q.matches(&example()).is_empty());
        assert!(q.matches(CROSSROADS_CURRY).is_empty());
    }

    #[test]
    fn test_noisy_entry_never_matches() {
        let entries = [RecipeEntry {
            name: format!("A fragrant curry {}", "x".repeat(100)).into(),
            is_plausible_item: false,
        }];
        assert!(match_food(&entries, "curry", "Crossroads", "Dinner").is_empty());
    }

    #[test]
    fn test_no_leakage() {
        let html = example();
        for location in ["Crossroads", "Café 3", "Foothill"] {
            let results = query(&["rice", "curry", "pancake"], &[location]).matches(&html);
            assert!(!results.is_empty(), "{location} should have a hit");
            assert!(results.iter().all(|r| r.location_name == location));
        }
    }

    #[test]
    fn test_dedup_on_rendered_text() {
        let html = example();
        // Foothill lists Cheese Pizza twice at lunch and once at dinner
        let results = query(&["pizza"], &["Foothill"]).matches(&html);
        let rendered: Vec<_> = results.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Cheese Pizza at Foothill (Lunch)",
                "Cheese Pizza at Foothill (Dinner)"
            ]
        );
    }

    #[test]
    fn test_matches_collapse_across_foods() {
        let html = example();
        let q = query(&["curry", "chicken"], &["Crossroads"]);
        let by_food = q.matches_by_food(&html);
        assert_eq!(by_food[0].0, "curry");
        assert_eq!(by_food[1].0, "chicken");
        assert!(by_food[0].1.iter().any(|r| r.recipe_name == "Chicken Curry"));
        assert!(by_food[1].1.iter().any(|r| r.recipe_name == "Chicken Curry"));
        let all = q.matches(&html);
        assert_eq!(
            all.iter()
                .filter(|r| r.recipe_name == "Chicken Curry")
                .count(),
            1
        );
    }

    #[test]
    fn test_idempotent() {
        let html = example();
        let q = query(&["rice", "pizza", "curry"], &["Crossroads", "Foothill"]);
        assert_eq!(q.matches(&html), q.matches(&html));
    }

    #[test]
    fn test_query_validation() {
        let f = NoiseFilter::default();
        assert_eq!(
            FavoritesQuery::new(vec![], vec!["Crossroads".into()], f).unwrap_err(),
            Error::MissingFoods
        );
        assert_eq!(
            FavoritesQuery::new(vec!["curry".into()], vec![], f).unwrap_err(),
            Error::MissingLocations
        );
        assert_eq!(
            FavoritesQuery::new(vec!["  ".into()], vec!["Crossroads".into()], f).unwrap_err(),
            Error::BlankFood
        );
        let q = query(&[" curry "], &["Crossroads"]);
        assert_eq!(q.foods().collect::<Vec<_>>(), ["curry"]);
    }

    #[test]
    fn test_malformed_markup_degrades_to_empty() {
        let q = query(&["curry"], &["Crossroads"]);
        assert!(q.matches("").is_empty());
        assert!(q.matches("<html><body>Service unavailable").is_empty());
        assert!(q
            .matches(r#"<li class="location-name"><li class="preiod-name"><li class="recip">"#)
            .is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_extraction() {
        let html = example();
        let q = query(&["rice", "curry", "pizza"], &["Crossroads", "Café 3", "Foothill"]);
        let expected = q.matches(&html);
        let results = std::sync::Mutex::new(vec![]);
        tokio_scoped::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(async {
                    let found = q.matches(&html);
                    results.lock().unwrap().push(found);
                });
            }
        });
        let results = results.into_inner().unwrap();
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| *r == expected));
    }
}
