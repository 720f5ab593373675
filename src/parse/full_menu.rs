use juniper::GraphQLObject;

use super::location::segment_by_location;
use super::meal::extract_meals;
use super::recipe::{extract_recipes, NoiseFilter};

#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject, serde::Serialize, serde::Deserialize)]
pub struct MealMenu {
    pub meal: String,
    pub recipes: Vec<String>,
}

/// Everything one location serves on one day.
#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject, serde::Serialize, serde::Deserialize)]
pub struct LocationMenu {
    pub location: String,
    pub meals: Vec<MealMenu>,
}

/// `None` when the location does not appear in the markup at all. A location
/// that appears with no parseable meals yields an empty `meals` list.
pub fn extract_full_menu(
    markup: &str,
    target_location: &str,
    filter: NoiseFilter,
) -> Option<LocationMenu> {
    let blocks = segment_by_location(markup, &[target_location]);
    if blocks.is_empty() {
        return None;
    }
    let meals = blocks
        .iter()
        .flat_map(|block| extract_meals(block))
        .map(|meal| MealMenu {
            recipes: extract_recipes(&meal, filter)
                .into_iter()
                .filter(|entry| entry.is_plausible_item)
                .map(|entry| entry.name.into_owned())
                .collect(),
            meal: meal.label.into_owned(),
        })
        .collect();
    Some(LocationMenu {
        location: target_location.to_owned(),
        meals,
    })
}

#[cfg(test)]
mod tests {
    use juniper::{EmptyMutation, EmptySubscription, RootNode};
    use serde_json::json;

    use super::*;
    use std::fs;

    fn example() -> String {
        fs::read_to_string("./src/parse/html_examples/day_menu.html").unwrap()
    }

    #[test]
    fn test_extract_full_menu() {
        let html = example();
        let menu = extract_full_menu(&html, "Crossroads", NoiseFilter::default())
            .expect("Crossroads is in the example html");
        assert_eq!(menu.location, "Crossroads");
        assert_eq!(
            menu.meals.iter().map(|m| m.meal.as_str()).collect::<Vec<_>>(),
            ["Breakfast", "Brunch", "Dinner"]
        );
        // the long description is filtered out
        assert_eq!(
            menu.meals[2].recipes,
            ["Chicken Curry", "Steamed Jasmine Rice", "Mac & Cheese"]
        );
    }

    #[test]
    fn test_missing_location() {
        let html = example();
        assert!(extract_full_menu(&html, "Clark Kerr Campus", NoiseFilter::default()).is_none());
    }

    #[test]
    fn test_only_target_location_is_read() {
        let html = example();
        let menu = extract_full_menu(&html, "Foothill", NoiseFilter::default()).unwrap();
        assert!(menu
            .meals
            .iter()
            .flat_map(|m| &m.recipes)
            .all(|r| !r.contains("Curry")));
    }

    #[tokio::test]
    async fn test_schema() {
        let html = example();
        let menu = extract_full_menu(&html, "Café 3", NoiseFilter::default()).unwrap();
        let schema = RootNode::new(
            menu,
            EmptyMutation::<()>::new(),
            EmptySubscription::<()>::new(),
        );
        let query = r"
            {
                location
                meals {
                    meal
                    recipes
                }
            }
        ";
        let binding = juniper::Variables::default();
        let res = juniper::execute(query, None, &schema, &binding, &())
            .await
            .unwrap()
            .0;
        assert_eq!(
            serde_json::to_value(res).expect("json should be valid"),
            json!({
                "location": "Café 3",
                "meals": [
                    { "meal": "Lunch", "recipes": ["Vegetable Curry", "Brown Rice"] },
                    { "meal": "Dinner", "recipes": ["Chicken Curry"] }
                ]
            })
        );
    }
}
