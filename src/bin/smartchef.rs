//! SmartChef CLI - Generate recipes from the ingredients you have
//!
//! Talks to OpenRouter when `OPENROUTER_API_KEY` is set and falls back to
//! built-in recipes otherwise.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use smartchef::api::{self, GenerateRecipesRequest};
use smartchef::{
    GeneratorConfig, OpenRouterProvider, RecipeGenerator, RecipeSource, build_prompt, synthesize,
};
use std::io::{self, Read};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartchef")]
#[command(version)]
#[command(about = "Generate recipes from a list of ingredients", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recipes for a set of ingredients
    Generate {
        /// Ingredient to cook with (repeat for more)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,

        /// Dietary preference, e.g. vegetarian
        #[arg(short, long, default_value = "none")]
        dietary: String,

        /// One unexpected recipe instead of three practical ones
        #[arg(short, long)]
        surprise: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Override the configured model
        #[arg(long)]
        model: Option<String>,
    },

    /// Handle a raw JSON request body (reads from stdin if not provided)
    Request {
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Print the prompt that would be sent to the model
    Prompt {
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,

        #[arg(short, long, default_value = "none")]
        dietary: String,

        #[arg(short, long)]
        surprise: bool,
    },

    /// Print the offline fallback recipes as JSON
    Fallback {
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,

        #[arg(short, long)]
        surprise: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human readable recipes
    Text,
    /// JSON response with recipe ids and source
    Json,
}

fn read_input(input: Option<String>) -> Result<String> {
    match input {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer.trim().to_string())
        }
    }
}

fn build_generator(model: Option<String>) -> Result<RecipeGenerator> {
    let config = GeneratorConfig::load()?;
    let generator = match (OpenRouterProvider::from_config(&config), model) {
        (Some(provider), Some(model)) => RecipeGenerator::with_provider(provider.with_model(model)),
        (None, Some(model)) => {
            warn!(%model, "no OpenRouter API key configured; ignoring --model override");
            RecipeGenerator::from_config(&config)
        }
        _ => RecipeGenerator::from_config(&config),
    };
    Ok(generator)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smartchef=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            ingredients,
            dietary,
            surprise,
            format,
            model,
        } => {
            let generator = build_generator(model)?;
            let ingredients: Vec<&str> = ingredients.iter().map(String::as_str).collect();
            let request =
                GenerateRecipesRequest::new(&ingredients, Some(dietary.as_str()), surprise);

            match format {
                OutputFormat::Json => {
                    let reply = api::handle_generate(&generator, request).await;
                    println!("{}", serde_json::to_string_pretty(&reply.body)?);
                    if !reply.is_success() {
                        std::process::exit(1);
                    }
                }
                OutputFormat::Text => {
                    let request = request.validate()?;
                    let result = generator.generate(&request).await?;

                    for recipe in &result.recipes {
                        println!("{}", recipe.name);
                        println!("{}", recipe.description);
                        println!("{} | {}", recipe.cook_time, recipe.difficulty);
                        println!();
                        println!("Ingredients:");
                        for item in &recipe.ingredients {
                            println!("  - {}", item);
                        }
                        println!("Steps:");
                        for (i, step) in recipe.steps.iter().enumerate() {
                            println!("  {}. {}", i + 1, step);
                        }
                        println!("Tip: {}", recipe.tips);
                        println!();
                    }

                    eprintln!("---");
                    eprintln!("Recipes: {}", result.recipes.len());
                    eprintln!("Source: {}", result.source);
                    if result.source == RecipeSource::Mock && generator.has_provider() {
                        eprintln!("Model reply unusable; served built-in recipes");
                    }
                }
            }
        }

        Commands::Request { input } => {
            let body = read_input(input)?;
            let generator = build_generator(None)?;
            let reply = api::handle_json(&generator, &body).await;
            println!("{}", serde_json::to_string_pretty(&reply)?);
            if !reply.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Prompt {
            ingredients,
            dietary,
            surprise,
        } => {
            println!("{}", build_prompt(&ingredients, &dietary, surprise));
        }

        Commands::Fallback {
            ingredients,
            surprise,
        } => {
            let recipes = synthesize(&ingredients, surprise);
            println!("{}", serde_json::to_string_pretty(&recipes)?);
        }
    }

    Ok(())
}
