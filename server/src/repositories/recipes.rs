use crate::error::{AppError, AppResult};
use crate::models::{
    Measurement, NewRecipe, NewRecipeAllergen, NewRecipeIngredient, Recipe, RecipeChangeset,
};
use crate::queries;
use crate::schema::{recipe_allergens, recipe_ingredients, recipes};
use crate::validation;
use diesel::prelude::*;
use serde::Deserialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeIngredientInput {
    pub ingredient_id: i32,
    pub quantity: f64,
    /// 1 = grams, 2 = pieces, 3 = milliliters
    #[schema(value_type = i32, minimum = 1, maximum = 3)]
    pub measurement: Measurement,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub difficulty: i32,
    #[serde(default)]
    pub cuisine_id: Option<i32>,
    #[serde(default)]
    pub allergen_ids: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientInput>,
}

impl CreateRecipeRequest {
    pub fn validate(&self) -> AppResult<()> {
        validation::short_text("title", &self.title)?;
        validation::non_empty("description", &self.description)?;
        validation::positive_i32("cooking_time", self.cooking_time)?;
        validation::in_range("difficulty", self.difficulty, 1, 5)?;
        for line in &self.ingredients {
            validation::positive_f64("quantity", line.quantity)?;
        }
        Ok(())
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub difficulty: Option<i32>,
}

impl UpdateRecipeRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validation::short_text("title", title)?;
        }
        if let Some(description) = &self.description {
            validation::non_empty("description", description)?;
        }
        if let Some(cooking_time) = self.cooking_time {
            validation::positive_i32("cooking_time", cooking_time)?;
        }
        if let Some(difficulty) = self.difficulty {
            validation::in_range("difficulty", difficulty, 1, 5)?;
        }
        Ok(())
    }

    fn changeset(&self) -> RecipeChangeset<'_> {
        RecipeChangeset {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
        }
    }
}

/// Insert the recipe and its allergen and ingredient links as one unit.
/// A referenced cuisine, allergen or ingredient that does not exist fails
/// the whole insert with `NotFound`.
pub fn create(
    conn: &mut SqliteConnection,
    author_id: i32,
    request: &CreateRecipeRequest,
) -> AppResult<Recipe> {
    let allergen_ids: Vec<i32> = request
        .allergen_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let ingredient_ids: Vec<i32> = request
        .ingredients
        .iter()
        .map(|line| line.ingredient_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    conn.transaction::<_, AppError, _>(|conn| {
        if let Some(cuisine_id) = request.cuisine_id {
            queries::cuisines::get_by_id(conn, cuisine_id)?
                .ok_or(AppError::NotFound("Cuisine"))?;
        }
        let found = queries::allergens::get_by_ids(conn, &allergen_ids)?;
        if found.len() != allergen_ids.len() {
            return Err(AppError::NotFound("Allergen"));
        }
        let found = queries::ingredients::get_by_ids(conn, &ingredient_ids)?;
        if found.len() != ingredient_ids.len() {
            return Err(AppError::NotFound("Ingredient"));
        }

        let recipe = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                title: &request.title,
                description: &request.description,
                cooking_time: request.cooking_time,
                difficulty: request.difficulty,
                cuisine_id: request.cuisine_id,
                author_id,
            })
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        let allergen_rows: Vec<NewRecipeAllergen> = allergen_ids
            .iter()
            .map(|&allergen_id| NewRecipeAllergen {
                recipe_id: recipe.id,
                allergen_id,
            })
            .collect();
        if !allergen_rows.is_empty() {
            diesel::insert_into(recipe_allergens::table)
                .values(&allergen_rows)
                .execute(conn)?;
        }

        let ingredient_rows: Vec<NewRecipeIngredient> = request
            .ingredients
            .iter()
            .map(|line| NewRecipeIngredient {
                recipe_id: recipe.id,
                ingredient_id: line.ingredient_id,
                quantity: line.quantity,
                measurement: line.measurement,
            })
            .collect();
        if !ingredient_rows.is_empty() {
            diesel::insert_into(recipe_ingredients::table)
                .values(&ingredient_rows)
                .execute(conn)?;
        }

        Ok(recipe)
    })
}

/// `None` when the recipe does not exist. An update with no fields returns
/// the row unchanged.
pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    request: &UpdateRecipeRequest,
) -> AppResult<Option<Recipe>> {
    let changeset = request.changeset();
    if changeset.is_empty() {
        return Ok(queries::recipes::get_by_id(conn, id)?);
    }

    let recipe = diesel::update(recipes::table.find(id))
        .set(&changeset)
        .returning(Recipe::as_returning())
        .get_result(conn)
        .optional()?;
    Ok(recipe)
}

/// Removes the recipe together with its allergen and ingredient links.
pub fn delete(conn: &mut SqliteConnection, id: i32) -> AppResult<bool> {
    conn.transaction::<_, AppError, _>(|conn| {
        diesel::delete(recipe_allergens::table.filter(recipe_allergens::recipe_id.eq(id)))
            .execute(conn)?;
        diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id)))
            .execute(conn)?;
        let deleted = diesel::delete(recipes::table.find(id)).execute(conn)?;
        Ok(deleted > 0)
    })
}
