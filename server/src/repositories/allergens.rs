use crate::error::{AppError, AppResult};
use crate::models::{Allergen, NewAllergen};
use crate::schema::allergens;
use diesel::prelude::*;

const DUPLICATE: &str = "An allergen with this name already exists";

pub fn create(conn: &mut SqliteConnection, name: &str) -> AppResult<Allergen> {
    diesel::insert_into(allergens::table)
        .values(NewAllergen { name })
        .returning(Allergen::as_returning())
        .get_result(conn)
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    name: &str,
) -> AppResult<Option<Allergen>> {
    diesel::update(allergens::table.find(id))
        .set(allergens::name.eq(name))
        .returning(Allergen::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))
}

/// Links from recipes go with it.
pub fn delete(conn: &mut SqliteConnection, id: i32) -> AppResult<bool> {
    let deleted = diesel::delete(allergens::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}
