use crate::error::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use diesel::prelude::*;

const DUPLICATE: &str = "An ingredient with this name already exists";

pub fn create(conn: &mut SqliteConnection, name: &str) -> AppResult<Ingredient> {
    diesel::insert_into(ingredients::table)
        .values(NewIngredient { name })
        .returning(Ingredient::as_returning())
        .get_result(conn)
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    name: &str,
) -> AppResult<Option<Ingredient>> {
    diesel::update(ingredients::table.find(id))
        .set(ingredients::name.eq(name))
        .returning(Ingredient::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

/// Recipe lines using the ingredient are removed with it.
pub fn delete(conn: &mut SqliteConnection, id: i32) -> AppResult<bool> {
    let deleted = diesel::delete(ingredients::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}
