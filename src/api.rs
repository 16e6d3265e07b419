//! Request Boundary
//!
//! Framework-free handling of a generate-recipes request: body decoding,
//! ingredient validation, id assignment and mapping of failures onto
//! HTTP-style status codes. A web server only needs to forward the body and
//! write back the [`ApiReply`].

use crate::error::GenerationError;
use crate::recipe::{GenerationRequest, Recipe, RecipeSource};
use crate::RecipeGenerator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "AI service temporarily unavailable. Please try again later.";
const NO_INGREDIENTS_MESSAGE: &str = "Please provide at least one ingredient";
const NO_VALID_INGREDIENTS_MESSAGE: &str = "Please provide valid ingredients";
const DEFAULT_DIETARY: &str = "none";

/// Incoming request body: `{ingredients, dietary, surpriseMe}`
///
/// Ingredients stay loosely typed so a non-list value is reported as a
/// validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    #[serde(default)]
    pub ingredients: Option<Value>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub surprise_me: Option<bool>,
}

impl GenerateRecipesRequest {
    pub fn new(ingredients: &[&str], dietary: Option<&str>, surprise_me: bool) -> Self {
        Self {
            ingredients: Some(Value::from(ingredients.to_vec())),
            dietary: dietary.map(str::to_string),
            surprise_me: Some(surprise_me),
        }
    }

    /// Check the body and turn it into a generation request
    ///
    /// Entries are trimmed and blanks (or non-strings) dropped; order is kept.
    pub fn validate(self) -> Result<GenerationRequest, ApiError> {
        let entries = match self.ingredients {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => return Err(ApiError::Validation(NO_INGREDIENTS_MESSAGE.to_string())),
        };

        let ingredients: Vec<String> = entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|ing| !ing.is_empty())
            .map(str::to_string)
            .collect();

        if ingredients.is_empty() {
            return Err(ApiError::Validation(
                NO_VALID_INGREDIENTS_MESSAGE.to_string(),
            ));
        }

        let dietary = self
            .dietary
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DIETARY.to_string());

        Ok(GenerationRequest::new(
            ingredients,
            dietary,
            self.surprise_me.unwrap_or(false),
        ))
    }
}

/// A recipe as handed to the client, with its assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeWithId {
    pub id: i64,
    #[serde(flatten)]
    pub recipe: Recipe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRecipesResponse {
    pub recipes: Vec<RecipeWithId>,
    pub source: RecipeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced at the request boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Generation(GenerationError::RemoteService { .. }) => 503,
            ApiError::Generation(_) | ApiError::MalformedBody(_) => 500,
        }
    }

    /// Message safe to show the end user
    ///
    /// Remote service failures get a fixed message; the upstream text stays in
    /// the logs.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Generation(GenerationError::RemoteService { .. }) => {
                SERVICE_UNAVAILABLE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    fn into_reply(self) -> ApiReply {
        ApiReply::json(
            self.status(),
            &ErrorBody {
                error: self.user_message(),
            },
        )
    }
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self {
                status: 500,
                body: serde_json::json!({ "error": e.to_string() }),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Attach ids: current time in milliseconds plus the recipe's position
pub fn assign_ids(recipes: Vec<Recipe>, now_millis: i64) -> Vec<RecipeWithId> {
    recipes
        .into_iter()
        .enumerate()
        .map(|(index, recipe)| RecipeWithId {
            id: now_millis + index as i64,
            recipe,
        })
        .collect()
}

/// Run a decoded request through the generator
pub async fn generate(
    generator: &RecipeGenerator,
    request: GenerateRecipesRequest,
) -> Result<GenerateRecipesResponse, ApiError> {
    let request = request.validate()?;
    let result = generator.generate(&request).await?;

    info!(
        count = result.recipes.len(),
        source = %result.source,
        surprise = request.surprise,
        "recipes generated"
    );

    Ok(GenerateRecipesResponse {
        recipes: assign_ids(result.recipes, chrono::Utc::now().timestamp_millis()),
        source: result.source,
    })
}

/// Handle a decoded request, mapping failures to error replies
pub async fn handle_generate(
    generator: &RecipeGenerator,
    request: GenerateRecipesRequest,
) -> ApiReply {
    match generate(generator, request).await {
        Ok(response) => ApiReply::json(200, &response),
        Err(err) => {
            warn!(status = err.status(), error = %err, "generate request failed");
            err.into_reply()
        }
    }
}

/// Handle a raw JSON request body
pub async fn handle_json(generator: &RecipeGenerator, body: &str) -> ApiReply {
    match serde_json::from_str::<GenerateRecipesRequest>(body) {
        Ok(request) => handle_generate(generator, request).await,
        Err(e) => {
            let err = ApiError::MalformedBody(e.to_string());
            warn!(error = %err, "could not decode request body");
            err.into_reply()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FakeProvider;
    use serde_json::json;

    fn decode(body: Value) -> GenerateRecipesRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_missing_or_empty_ingredients() {
        for body in [
            json!({}),
            json!({"ingredients": []}),
            json!({"ingredients": "eggs"}),
            json!({"ingredients": null}),
        ] {
            let err = decode(body).validate().unwrap_err();
            assert_eq!(err.status(), 400);
            assert_eq!(err.user_message(), "Please provide at least one ingredient");
        }
    }

    #[test]
    fn test_blank_ingredients_rejected() {
        let err = decode(json!({"ingredients": ["  ", "", null]}))
            .validate()
            .unwrap_err();
        assert_eq!(err.user_message(), "Please provide valid ingredients");
    }

    #[test]
    fn test_ingredients_trimmed_in_order() {
        let request = decode(json!({"ingredients": [" eggs ", "", "tomatoes", "eggs"]}))
            .validate()
            .unwrap();
        assert_eq!(request.ingredients, vec!["eggs", "tomatoes", "eggs"]);
        assert_eq!(request.dietary, "none");
        assert!(!request.surprise);
    }

    #[test]
    fn test_dietary_and_surprise_passed_through() {
        let request = decode(json!({
            "ingredients": ["rice"],
            "dietary": "vegan",
            "surpriseMe": true
        }))
            .validate()
            .unwrap();
        assert_eq!(request.dietary, "vegan");
        assert!(request.surprise);

        let request = decode(json!({"ingredients": ["rice"], "dietary": ""}))
            .validate()
            .unwrap();
        assert_eq!(request.dietary, "none");
    }

    #[test]
    fn test_status_mapping() {
        let remote = ApiError::from(GenerationError::RemoteService {
            status: 500,
            message: "upstream exploded".to_string(),
        });
        assert_eq!(remote.status(), 503);
        assert_eq!(remote.user_message(), SERVICE_UNAVAILABLE_MESSAGE);

        let other = ApiError::from(GenerationError::EmptyResponse);
        assert_eq!(other.status(), 500);
        assert_eq!(other.user_message(), "No response from AI model");
    }

    #[test]
    fn test_assign_ids_sequential() {
        let recipes = vec![Recipe::placeholder(0), Recipe::placeholder(1)];
        let with_ids = assign_ids(recipes, 1_700_000_000_000);
        assert_eq!(with_ids[0].id, 1_700_000_000_000);
        assert_eq!(with_ids[1].id, 1_700_000_000_001);

        let json = serde_json::to_value(&with_ids[0]).unwrap();
        assert_eq!(json["id"], 1_700_000_000_000i64);
        assert_eq!(json["name"], "Recipe 1");
        assert_eq!(json["cookTime"], "30 minutes");
    }

    #[tokio::test]
    async fn test_handle_generate_offline() {
        let reply = handle_generate(
            &RecipeGenerator::fallback_only(),
            GenerateRecipesRequest::new(&["eggs", "tomatoes"], None, false),
        )
        .await;
        assert!(reply.is_success());
        assert_eq!(reply.body["source"], "mock");
        assert_eq!(reply.body["recipes"].as_array().unwrap().len(), 3);
        assert_eq!(reply.body["recipes"][0]["name"], "Classic eggs, tomatoes Skillet");
        assert!(reply.body["recipes"][0]["id"].is_i64());
    }

    #[tokio::test]
    async fn test_handle_generate_remote_failure_hides_upstream_text() {
        let generator = RecipeGenerator::with_provider(FakeProvider::with_error(
            GenerationError::RemoteService {
                status: 500,
                message: "internal stack trace".to_string(),
            },
        ));
        let reply =
            handle_generate(&generator, GenerateRecipesRequest::new(&["eggs"], None, false)).await;
        assert_eq!(reply.status, 503);
        assert_eq!(reply.body["error"], SERVICE_UNAVAILABLE_MESSAGE);
        assert!(!reply.body.to_string().contains("stack trace"));
    }

    #[tokio::test]
    async fn test_handle_json_malformed_body() {
        let reply = handle_json(&RecipeGenerator::fallback_only(), "{not json").await;
        assert_eq!(reply.status, 500);
        assert!(
            reply.body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body")
        );
    }

    #[tokio::test]
    async fn test_handle_json_validation() {
        let reply = handle_json(&RecipeGenerator::fallback_only(), r#"{"ingredients": []}"#).await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body["error"], "Please provide at least one ingredient");
    }
}
