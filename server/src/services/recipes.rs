//! Recipe aggregation: nests cuisine, author, allergens and ingredients into
//! recipe rows, and drives the filtered, paginated listing.
//!
//! Related rows are loaded in one query per relation for the whole batch of
//! recipes and stitched together in memory.

use crate::error::{AppError, AppResult};
use crate::models::{Allergen, Cuisine, Measurement, Recipe};
use crate::queries;
use crate::queries::recipes::{RecipeFilter, SortSpec};
use crate::services::pagination::{Page, PageRequest};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct AuthorRef {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct RecipeIngredientView {
    /// Ingredient id
    pub id: i32,
    pub name: String,
    pub quantity: f64,
    /// 1 = grams, 2 = pieces, 3 = milliliters
    #[schema(value_type = i32)]
    pub measurement: Measurement,
}

/// A recipe with every related group attached.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct RecipeResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub difficulty: i32,
    pub cuisine: Option<Cuisine>,
    pub author: AuthorRef,
    pub allergens: Vec<Allergen>,
    pub ingredients: Vec<RecipeIngredientView>,
}

/// A recipe with only the requested groups attached. Groups that were not
/// requested are left out of the JSON entirely; a requested cuisine that is
/// unset serializes as `null`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub difficulty: i32,
    pub description: String,
    pub cooking_time: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Cuisine>)]
    pub cuisine: Option<Option<Cuisine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<Allergen>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeIngredientView>>,
}

/// Related groups to attach in a selective response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    pub cuisine: bool,
    pub author: bool,
    pub allergens: bool,
    pub ingredients: bool,
}

impl Include {
    pub const ALL: Self = Self {
        cuisine: true,
        author: true,
        allergens: true,
        ingredients: true,
    };

    /// Parse a comma-separated list such as `"cuisine, author"`. Unknown
    /// names are ignored.
    pub fn parse(spec: Option<&str>) -> Self {
        let mut include = Self::default();
        for name in split_list(spec) {
            match name {
                "cuisine" => include.cuisine = true,
                "author" => include.author = true,
                "allergens" => include.allergens = true,
                "ingredients" => include.ingredients = true,
                other => tracing::debug!(include = other, "ignoring unknown include"),
            }
        }
        include
    }
}

/// Parse a comma-separated `select` list; empty means "keep everything".
pub fn parse_select(spec: Option<&str>) -> Vec<String> {
    split_list(spec).map(str::to_string).collect()
}

fn split_list(spec: Option<&str>) -> impl Iterator<Item = &str> {
    spec.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Related rows for a batch of recipes, keyed by id.
#[derive(Default)]
struct Relations {
    cuisines: HashMap<i32, Cuisine>,
    authors: HashMap<i32, AuthorRef>,
    allergens: HashMap<i32, Vec<Allergen>>,
    ingredients: HashMap<i32, Vec<RecipeIngredientView>>,
}

impl Relations {
    fn load(
        conn: &mut SqliteConnection,
        recipes: &[Recipe],
        include: Include,
    ) -> AppResult<Self> {
        let mut relations = Self::default();
        if recipes.is_empty() {
            return Ok(relations);
        }
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();

        if include.cuisine {
            let cuisine_ids = distinct(recipes.iter().filter_map(|r| r.cuisine_id));
            relations.cuisines = queries::cuisines::get_by_ids(conn, &cuisine_ids)?
                .into_iter()
                .map(|c| (c.id, c))
                .collect();
        }

        if include.author {
            let author_ids = distinct(recipes.iter().map(|r| r.author_id));
            relations.authors = queries::users::get_by_ids(conn, &author_ids)?
                .into_iter()
                .map(|u| {
                    (
                        u.id,
                        AuthorRef {
                            id: u.id,
                            first_name: u.first_name,
                            last_name: u.last_name,
                        },
                    )
                })
                .collect();
        }

        if include.allergens {
            for (recipe_id, allergen) in queries::recipes::allergen_links(conn, &recipe_ids)? {
                relations
                    .allergens
                    .entry(recipe_id)
                    .or_default()
                    .push(allergen);
            }
        }

        if include.ingredients {
            for line in queries::recipes::ingredient_links(conn, &recipe_ids)? {
                relations
                    .ingredients
                    .entry(line.recipe_id)
                    .or_default()
                    .push(RecipeIngredientView {
                        id: line.ingredient_id,
                        name: line.name,
                        quantity: line.quantity,
                        measurement: line.measurement,
                    });
            }
        }

        Ok(relations)
    }

    fn cuisine(&self, recipe: &Recipe) -> Option<Cuisine> {
        recipe
            .cuisine_id
            .and_then(|id| self.cuisines.get(&id))
            .cloned()
    }

    fn author(&self, recipe: &Recipe) -> AppResult<AuthorRef> {
        self.authors
            .get(&recipe.author_id)
            .cloned()
            .ok_or(AppError::MissingAuthor {
                recipe_id: recipe.id,
                author_id: recipe.author_id,
            })
    }

    fn allergens(&mut self, recipe_id: i32) -> Vec<Allergen> {
        self.allergens.remove(&recipe_id).unwrap_or_default()
    }

    fn ingredients(&mut self, recipe_id: i32) -> Vec<RecipeIngredientView> {
        self.ingredients.remove(&recipe_id).unwrap_or_default()
    }
}

fn distinct(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Attach every related group to each recipe, preserving input order.
/// A recipe whose author row is missing fails the whole batch.
pub fn compose_full_many(
    conn: &mut SqliteConnection,
    recipes: Vec<Recipe>,
) -> AppResult<Vec<RecipeResponse>> {
    let mut relations = Relations::load(conn, &recipes, Include::ALL)?;
    recipes
        .into_iter()
        .map(|recipe| {
            Ok(RecipeResponse {
                cuisine: relations.cuisine(&recipe),
                author: relations.author(&recipe)?,
                allergens: relations.allergens(recipe.id),
                ingredients: relations.ingredients(recipe.id),
                id: recipe.id,
                title: recipe.title,
                description: recipe.description,
                cooking_time: recipe.cooking_time,
                difficulty: recipe.difficulty,
            })
        })
        .collect()
}

pub fn compose_full(conn: &mut SqliteConnection, recipe: Recipe) -> AppResult<RecipeResponse> {
    let mut composed = compose_full_many(conn, vec![recipe])?;
    composed
        .pop()
        .ok_or_else(|| AppError::Internal("composed recipe missing".to_string()))
}

/// Attach only the groups named in `include`.
pub fn compose_selective_many(
    conn: &mut SqliteConnection,
    recipes: Vec<Recipe>,
    include: Include,
) -> AppResult<Vec<RecipeSummary>> {
    let mut relations = Relations::load(conn, &recipes, include)?;
    recipes
        .into_iter()
        .map(|recipe| {
            Ok(RecipeSummary {
                cuisine: include.cuisine.then(|| relations.cuisine(&recipe)),
                author: include
                    .author
                    .then(|| relations.author(&recipe))
                    .transpose()?,
                allergens: include.allergens.then(|| relations.allergens(recipe.id)),
                ingredients: include
                    .ingredients
                    .then(|| relations.ingredients(recipe.id)),
                id: recipe.id,
                title: recipe.title,
                difficulty: recipe.difficulty,
                description: recipe.description,
                cooking_time: recipe.cooking_time,
            })
        })
        .collect()
}

pub fn compose_selective(
    conn: &mut SqliteConnection,
    recipe: Recipe,
    include: Include,
) -> AppResult<RecipeSummary> {
    let mut composed = compose_selective_many(conn, vec![recipe], include)?;
    composed
        .pop()
        .ok_or_else(|| AppError::Internal("composed recipe missing".to_string()))
}

/// Keep only the named top-level keys. An empty list keeps everything.
pub fn project_fields(object: Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    if fields.is_empty() {
        return object;
    }
    object
        .into_iter()
        .filter(|(key, _)| fields.iter().any(|f| f == key))
        .collect()
}

fn to_object<T: Serialize>(value: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal("expected a JSON object".to_string())),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// Recipes that use the ingredient, composed with `include` groups and then
/// cut down to the `select` keys.
pub fn list_by_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i32,
    include: Option<&str>,
    select: Option<&str>,
) -> AppResult<Vec<Map<String, Value>>> {
    queries::ingredients::get_by_id(conn, ingredient_id)?
        .ok_or(AppError::NotFound("Ingredient"))?;

    let recipe_ids = queries::ingredients::get_recipe_ids_by_ingredient(conn, ingredient_id)?;
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }

    let recipes = queries::recipes::get_by_ids(conn, &recipe_ids)?;
    let fields = parse_select(select);
    let summaries = compose_selective_many(conn, recipes, Include::parse(include))?;

    summaries
        .iter()
        .map(|summary| Ok(project_fields(to_object(summary)?, &fields)))
        .collect()
}

/// Filtered, sorted, paginated listing of fully composed recipes.
///
/// `sort` names a recipe column, descending with a `-` prefix; it defaults
/// to `-id` and unknown columns leave the rows in id order.
pub fn list_paginated(
    conn: &mut SqliteConnection,
    name_like: Option<&str>,
    ingredient_ids: &[i32],
    sort: Option<&str>,
    page: PageRequest,
) -> AppResult<Page<RecipeResponse>> {
    let mut filter = RecipeFilter {
        title_contains: name_like.filter(|s| !s.is_empty()).map(str::to_string),
        recipe_ids: None,
    };

    if !ingredient_ids.is_empty() {
        let recipe_ids = queries::recipes::get_recipe_ids_by_ingredient_ids(conn, ingredient_ids)?;
        if recipe_ids.is_empty() {
            return Ok(Page::new(Vec::new(), 0, page));
        }
        filter.recipe_ids = Some(recipe_ids);
    }

    let sort = match sort {
        None => Some(SortSpec::default()),
        Some(raw) => {
            let parsed = SortSpec::parse(raw);
            if parsed.is_none() {
                tracing::debug!(sort = raw, "ignoring sort on unknown recipe field");
            }
            parsed
        }
    };

    let total = queries::recipes::filtered_count(conn, &filter)?;
    let rows = queries::recipes::filtered_page(conn, &filter, sort, page.offset(), page.size)?;
    let items = compose_full_many(conn, rows)?;

    Ok(Page::new(items, total, page))
}
