use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Integer;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(Sqlite))]
pub struct User {
    pub id: i32,
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: i32,
    pub token_hash: &'a str,
    pub expires_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::cuisines)]
#[diesel(check_for_backend(Sqlite))]
pub struct Cuisine {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cuisines)]
pub struct NewCuisine<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::allergens)]
#[diesel(check_for_backend(Sqlite))]
pub struct Allergen {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::allergens)]
pub struct NewAllergen<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(Sqlite))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(Sqlite))]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub difficulty: i32,
    pub cuisine_id: Option<i32>,
    pub author_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub cooking_time: i32,
    pub difficulty: i32,
    pub cuisine_id: Option<i32>,
    pub author_id: i32,
}

/// Partial update of a recipe; `None` fields are left untouched.
#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub cooking_time: Option<i32>,
    pub difficulty: Option<i32>,
}

impl RecipeChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.cooking_time.is_none()
            && self.difficulty.is_none()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_allergens)]
pub struct NewRecipeAllergen {
    pub recipe_id: i32,
    pub allergen_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
    pub measurement: Measurement,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(Sqlite))]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown measurement code {0}; expected 1 (grams), 2 (pieces) or 3 (milliliters)")]
pub struct MeasurementError(pub i32);

/// Unit attached to an ingredient quantity. Stored and serialized as its
/// integer code.
#[derive(
    AsExpression, FromSqlRow, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
#[diesel(sql_type = Integer)]
#[serde(try_from = "i32", into = "i32")]
pub enum Measurement {
    Grams,
    Pieces,
    Milliliters,
}

impl Measurement {
    pub const fn code(self) -> i32 {
        match self {
            Self::Grams => 1,
            Self::Pieces => 2,
            Self::Milliliters => 3,
        }
    }
}

impl TryFrom<i32> for Measurement {
    type Error = MeasurementError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Grams),
            2 => Ok(Self::Pieces),
            3 => Ok(Self::Milliliters),
            other => Err(MeasurementError(other)),
        }
    }
}

impl From<Measurement> for i32 {
    fn from(measurement: Measurement) -> Self {
        measurement.code()
    }
}

impl ToSql<Integer, Sqlite> for Measurement {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.code());
        Ok(IsNull::No)
    }
}

impl FromSql<Integer, Sqlite> for Measurement {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> deserialize::Result<Self> {
        let code = <i32 as FromSql<Integer, Sqlite>>::from_sql(value)?;
        Ok(Self::try_from(code)?)
    }
}
