use crate::error::{AppError, AppResult};
use crate::models::{Cuisine, NewCuisine};
use crate::schema::cuisines;
use diesel::prelude::*;

const DUPLICATE: &str = "A cuisine with this name already exists";

pub fn create(conn: &mut SqliteConnection, name: &str) -> AppResult<Cuisine> {
    diesel::insert_into(cuisines::table)
        .values(NewCuisine { name })
        .returning(Cuisine::as_returning())
        .get_result(conn)
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

pub fn update(conn: &mut SqliteConnection, id: i32, name: &str) -> AppResult<Option<Cuisine>> {
    diesel::update(cuisines::table.find(id))
        .set(cuisines::name.eq(name))
        .returning(Cuisine::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

/// Recipes of a deleted cuisine keep existing with no cuisine.
pub fn delete(conn: &mut SqliteConnection, id: i32) -> AppResult<bool> {
    let deleted = diesel::delete(cuisines::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}
