use crate::models::Cuisine;
use crate::schema::cuisines;
use diesel::prelude::*;

pub fn get_all(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Cuisine>> {
    cuisines::table
        .select(Cuisine::as_select())
        .order(cuisines::id)
        .offset(offset)
        .limit(limit)
        .load(conn)
}

pub fn get_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Cuisine>> {
    cuisines::table
        .find(id)
        .select(Cuisine::as_select())
        .first(conn)
        .optional()
}

pub fn get_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Cuisine>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    cuisines::table
        .filter(cuisines::id.eq_any(ids))
        .select(Cuisine::as_select())
        .order(cuisines::id)
        .load(conn)
}
