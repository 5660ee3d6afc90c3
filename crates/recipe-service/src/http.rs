use async_trait::async_trait;
use recipe_core::{
    AdjustmentType, Recipe, RecipeError, RecipeInput, RecipeService, RecipeStep, Result,
    StepAdjustKind,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument};

pub const GENERATE_PATH: &str = "/recipe/generate";
pub const ADJUST_PATH: &str = "/recipe/adjust";
pub const ADJUST_INGREDIENTS_PATH: &str = "/recipe/adjust-ingredients";
pub const ADJUST_STEP_PATH: &str = "/recipe/adjust-step";
pub const SUGGEST_PATH: &str = "/recipe/suggest-ingredients";

fn transport_err(e: impl ToString) -> RecipeError {
    RecipeError::Transport(e.to_string())
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    input: &'a RecipeInput,
}

#[derive(Serialize)]
struct AdjustRequest<'a> {
    recipe: &'a Recipe,
    #[serde(rename = "type")]
    adjustment: AdjustmentType,
}

#[derive(Serialize)]
struct AdjustIngredientsRequest<'a> {
    recipe: &'a Recipe,
}

#[derive(Serialize)]
struct AdjustStepRequest<'a> {
    step: &'a RecipeStep,
    #[serde(rename = "type")]
    kind: StepAdjustKind,
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    ingredient: &'a str,
}

/// Recipe service backed by a remote JSON API, one POST endpoint per operation.
pub struct HttpRecipeService {
    client: Client,
    base_url: String,
}

impl HttpRecipeService {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` and return the raw response text of a 2xx reply.
    async fn post_raw<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_err)?;

        if !status.is_success() {
            return Err(RecipeError::Server {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("HTTP_SERVICE: {} -> {} bytes", path, text.len());
        Ok(text)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let text = self.post_raw(path, body).await?;
        serde_json::from_str(&text)
            .map_err(|e| RecipeError::Decode(format!("{} - body: {}", e, text)))
    }
}

#[async_trait]
impl RecipeService for HttpRecipeService {
    #[instrument(skip(self, input), fields(query = %input.query))]
    async fn generate(&self, input: &RecipeInput) -> Result<Recipe> {
        info!("HTTP_SERVICE: Requesting recipe");
        self.post(GENERATE_PATH, &GenerateRequest { input }).await
    }

    #[instrument(skip(self, recipe), fields(recipe = %recipe.id))]
    async fn adjust_whole(&self, recipe: &Recipe, adjustment: AdjustmentType) -> Result<Recipe> {
        info!("HTTP_SERVICE: Requesting {:?} adjustment", adjustment);
        self.post(ADJUST_PATH, &AdjustRequest { recipe, adjustment })
            .await
    }

    #[instrument(skip(self, recipe), fields(recipe = %recipe.id, ingredients = recipe.ingredients.len()))]
    async fn adjust_by_ingredients(&self, recipe: &Recipe) -> Result<Recipe> {
        info!("HTTP_SERVICE: Requesting ingredient-driven update");
        self.post(ADJUST_INGREDIENTS_PATH, &AdjustIngredientsRequest { recipe })
            .await
    }

    #[instrument(skip(self, step), fields(step = %step.id))]
    async fn adjust_step(&self, step: &RecipeStep, kind: StepAdjustKind) -> Result<String> {
        let text = self
            .post_raw(ADJUST_STEP_PATH, &AdjustStepRequest { step, kind })
            .await?;

        // A JSON string body is unwrapped; anything else is taken as plain text.
        match serde_json::from_str::<String>(&text) {
            Ok(content) => Ok(content),
            Err(_) => Ok(text.trim().to_string()),
        }
    }

    #[instrument(skip(self))]
    async fn suggest_substitutes(&self, ingredient_name: &str) -> Result<Vec<String>> {
        self.post(
            SUGGEST_PATH,
            &SuggestRequest {
                ingredient: ingredient_name,
            },
        )
        .await
    }
}
