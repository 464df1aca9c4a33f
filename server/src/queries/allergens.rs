use crate::models::Allergen;
use crate::schema::allergens;
use diesel::prelude::*;

pub fn get_all(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Allergen>> {
    allergens::table
        .select(Allergen::as_select())
        .order(allergens::id)
        .offset(offset)
        .limit(limit)
        .load(conn)
}

pub fn get_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Allergen>> {
    allergens::table
        .find(id)
        .select(Allergen::as_select())
        .first(conn)
        .optional()
}

pub fn get_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Allergen>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    allergens::table
        .filter(allergens::id.eq_any(ids))
        .select(Allergen::as_select())
        .order(allergens::id)
        .load(conn)
}
