//! Prompt Construction
//!
//! Builds the single user message sent to the completion endpoint.

const NO_RESTRICTIONS: &str = "no specific dietary restrictions";

/// Render the dietary preference, spelling out the unconstrained case
fn dietary_text(dietary: &str) -> &str {
    if dietary == "none" {
        NO_RESTRICTIONS
    } else {
        dietary
    }
}

/// Create the prompt for a generation request
///
/// Surprise mode asks for one unconventional recipe as a JSON object, normal
/// mode for three practical recipes as a JSON array.
pub fn build_prompt(ingredients: &[String], dietary: &str, surprise: bool) -> String {
    let ingredients = ingredients.join(", ");
    let dietary = dietary_text(dietary);

    if surprise {
        return format!(
            r#"You are a creative and innovative chef. A user has these ingredients: {ingredients}. Their dietary preference is: {dietary}.

Create 1 VERY CREATIVE and UNEXPECTED recipe that combines these ingredients in a surprising way. Think outside the box - maybe fusion cuisine, unusual combinations, or creative presentations.

Return ONLY a valid JSON object with this exact structure:
{{
  "name": "Creative Recipe Name",
  "description": "Brief description highlighting what makes it unique",
  "ingredients": ["ingredient 1 with quantity", "ingredient 2 with quantity"],
  "steps": ["Step 1", "Step 2", "Step 3"],
  "cookTime": "X minutes",
  "difficulty": "Easy/Medium/Hard",
  "tips": "Helpful tips or substitutions"
}}

Make it fun, creative, and delicious!"#
        );
    }

    format!(
        r#"You are a helpful and creative home chef. A user has these ingredients: {ingredients}. Their dietary preference is: {dietary}.

Generate 3 practical, delicious recipes that use these ingredients. Make them varied in style and cooking method.

Return ONLY a valid JSON array with this exact structure:
[
  {{
    "name": "Recipe Name",
    "description": "Brief description of the dish",
    "ingredients": ["ingredient 1 with quantity", "ingredient 2 with quantity"],
    "steps": ["Step 1", "Step 2", "Step 3"],
    "cookTime": "X minutes",
    "difficulty": "Easy/Medium/Hard",
    "tips": "Helpful tips or substitutions"
  }}
]

Focus on practical, achievable recipes that taste great!"#
    )
}
