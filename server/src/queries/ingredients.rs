use crate::models::Ingredient;
use crate::schema::{ingredients, recipe_ingredients};
use diesel::prelude::*;

pub fn get_all(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Ingredient>> {
    ingredients::table
        .select(Ingredient::as_select())
        .order(ingredients::id)
        .offset(offset)
        .limit(limit)
        .load(conn)
}

pub fn get_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Ingredient>> {
    ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()
}

pub fn get_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Ingredient>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    ingredients::table
        .filter(ingredients::id.eq_any(ids))
        .select(Ingredient::as_select())
        .order(ingredients::id)
        .load(conn)
}

/// Ids of every recipe that lists the ingredient, in recipe id order.
pub fn get_recipe_ids_by_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i32,
) -> QueryResult<Vec<i32>> {
    recipe_ingredients::table
        .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
        .select(recipe_ingredients::recipe_id)
        .distinct()
        .order(recipe_ingredients::recipe_id)
        .load(conn)
}
