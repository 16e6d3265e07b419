//! Offline Recipe Fallback
//!
//! Deterministic recipes built from fixed templates. Used when no API key is
//! configured or when the model reply cannot be used, so the generator always
//! has something to serve.

use crate::recipe::Recipe;

/// Fixed recipe template, parameterized only by the ingredient label
struct Template {
    name_prefix: &'static str,
    name_suffix: &'static str,
    description: &'static str,
    extras: [&'static str; 2],
    steps: [&'static str; 5],
    cook_time: &'static str,
    difficulty: &'static str,
    tips: &'static str,
}

const FUSION: Template = Template {
    name_prefix: "Fusion",
    name_suffix: "Delight",
    description: "A creative fusion dish that combines your ingredients in an unexpected way",
    extras: ["Seasonings to taste", "Cooking oil"],
    steps: [
        "Prepare all ingredients by washing and chopping as needed",
        "Heat oil in a large pan over medium heat",
        "Combine ingredients in a creative fusion style",
        "Cook while stirring occasionally for 10-15 minutes",
        "Season to taste and serve hot",
    ],
    cook_time: "25 minutes",
    difficulty: "Medium",
    tips: "This fusion approach creates unique flavor combinations. Feel free to experiment with spices!",
};

const CLASSIC_TEMPLATES: [Template; 3] = [
    Template {
        name_prefix: "Classic",
        name_suffix: "Skillet",
        description: "A hearty, traditional dish featuring your available ingredients",
        extras: ["Salt and pepper to taste", "2 tbsp olive oil"],
        steps: [
            "Heat olive oil in a large skillet over medium heat",
            "Add ingredients in order of cooking time needed",
            "Season with salt and pepper",
            "Cook for 15-20 minutes, stirring occasionally",
            "Serve hot and enjoy",
        ],
        cook_time: "20 minutes",
        difficulty: "Easy",
        tips: "This versatile recipe works with many ingredient combinations. Adjust cooking time based on your ingredients.",
    },
    Template {
        name_prefix: "Baked",
        name_suffix: "Casserole",
        description: "A comforting baked dish that brings out the best in your ingredients",
        extras: ["1 cup broth or water", "Herbs and spices to taste"],
        steps: [
            "Preheat oven to 375°F (190°C)",
            "Layer ingredients in a baking dish",
            "Add broth and seasonings",
            "Cover and bake for 30-35 minutes",
            "Let rest for 5 minutes before serving",
        ],
        cook_time: "40 minutes",
        difficulty: "Easy",
        tips: "Casseroles are forgiving and can be customized with whatever ingredients you have on hand.",
    },
    Template {
        name_prefix: "Quick",
        name_suffix: "Stir-Fry",
        description: "A fast and flavorful stir-fry that maximizes the taste of your ingredients",
        extras: ["2 tbsp soy sauce", "1 tbsp oil for cooking"],
        steps: [
            "Heat oil in a wok or large pan over high heat",
            "Add harder ingredients first, softer ones later",
            "Stir-fry quickly, keeping ingredients moving",
            "Add soy sauce in the last minute",
            "Serve immediately over rice or noodles",
        ],
        cook_time: "15 minutes",
        difficulty: "Medium",
        tips: "High heat and quick cooking preserve the texture and nutrients of your ingredients.",
    },
];

/// Display label from at most the first three ingredients
fn ingredient_label(ingredients: &[String]) -> String {
    ingredients
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Template {
    fn render(&self, label: &str, ingredients: &[String]) -> Recipe {
        let mut items: Vec<String> = ingredients
            .iter()
            .map(|ing| format!("1 portion {ing}"))
            .collect();
        items.extend(self.extras.iter().map(|s| s.to_string()));

        Recipe {
            name: format!("{} {} {}", self.name_prefix, label, self.name_suffix),
            description: self.description.to_string(),
            ingredients: items,
            steps: self.steps.iter().map(|s| s.to_string()).collect(),
            cook_time: self.cook_time.to_string(),
            difficulty: self.difficulty.to_string(),
            tips: self.tips.to_string(),
        }
    }
}

/// Synthesize recipes without any network access
///
/// Returns exactly one recipe in surprise mode and three otherwise.
pub fn synthesize(ingredients: &[String], surprise: bool) -> Vec<Recipe> {
    let label = ingredient_label(ingredients);

    if surprise {
        return vec![FUSION.render(&label, ingredients)];
    }

    CLASSIC_TEMPLATES
        .iter()
        .map(|template| template.render(&label, ingredients))
        .collect()
}
