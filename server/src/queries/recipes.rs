use crate::db::unicode_lower;
use crate::models::{Allergen, Measurement, Recipe};
use crate::queries::contains_pattern;
use crate::schema::{allergens, ingredients, recipe_allergens, recipe_ingredients, recipes};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

pub type BoxedRecipeQuery<'a, ST = recipes::SqlType> = recipes::BoxedQuery<'a, Sqlite, ST>;

pub fn get_all(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Recipe>> {
    recipes::table
        .select(Recipe::as_select())
        .order(recipes::id)
        .offset(offset)
        .limit(limit)
        .load(conn)
}

pub fn get_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Recipe>> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()
}

pub fn get_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Recipe>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    recipes::table
        .filter(recipes::id.eq_any(ids))
        .select(Recipe::as_select())
        .order(recipes::id)
        .load(conn)
}

/// Distinct ids of recipes using ANY of the given ingredients.
pub fn get_recipe_ids_by_ingredient_ids(
    conn: &mut SqliteConnection,
    ingredient_ids: &[i32],
) -> QueryResult<Vec<i32>> {
    if ingredient_ids.is_empty() {
        return Ok(Vec::new());
    }
    recipe_ingredients::table
        .filter(recipe_ingredients::ingredient_id.eq_any(ingredient_ids))
        .select(recipe_ingredients::recipe_id)
        .distinct()
        .order(recipe_ingredients::recipe_id)
        .load(conn)
}

/// Allergens linked to any of the recipes, as `(recipe_id, allergen)`,
/// ordered by recipe then allergen id.
pub fn allergen_links(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> QueryResult<Vec<(i32, Allergen)>> {
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }
    recipe_allergens::table
        .inner_join(allergens::table)
        .filter(recipe_allergens::recipe_id.eq_any(recipe_ids))
        .select((recipe_allergens::recipe_id, Allergen::as_select()))
        .order((recipe_allergens::recipe_id, allergens::id))
        .load(conn)
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct IngredientLink {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: f64,
    pub measurement: Measurement,
}

/// Ingredient lines of any of the recipes, in insertion order per recipe.
pub fn ingredient_links(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> QueryResult<Vec<IngredientLink>> {
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }
    recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::ingredient_id,
            ingredients::name,
            recipe_ingredients::quantity,
            recipe_ingredients::measurement,
        ))
        .order((recipe_ingredients::recipe_id, recipe_ingredients::id))
        .load(conn)
}

/// Filters for the paginated listing.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Restrict to these recipe ids. `Some(vec![])` matches nothing.
    pub recipe_ids: Option<Vec<i32>>,
}

impl RecipeFilter {
    fn apply<'a, ST>(&self, mut query: BoxedRecipeQuery<'a, ST>) -> BoxedRecipeQuery<'a, ST> {
        if let Some(text) = &self.title_contains {
            let pattern = contains_pattern(&text.to_lowercase());
            query = query.filter(unicode_lower(recipes::title).like(pattern).escape('\\'));
        }
        if let Some(ids) = &self.recipe_ids {
            query = query.filter(recipes::id.eq_any(ids.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Description,
    CookingTime,
    Difficulty,
    CuisineId,
    AuthorId,
}

impl SortField {
    pub fn from_column(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "cooking_time" => Some(Self::CookingTime),
            "difficulty" => Some(Self::Difficulty),
            "cuisine_id" => Some(Self::CuisineId),
            "author_id" => Some(Self::AuthorId),
            _ => None,
        }
    }
}

/// A recipe column plus direction, parsed from `field` or `-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            descending: true,
        }
    }
}

impl SortSpec {
    /// `None` when the name is not a recipe column.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        SortField::from_column(name).map(|field| Self { field, descending })
    }

    fn apply<'a>(self, query: BoxedRecipeQuery<'a>) -> BoxedRecipeQuery<'a> {
        use SortField::*;
        match (self.field, self.descending) {
            (Id, false) => query.order(recipes::id.asc()),
            (Id, true) => query.order(recipes::id.desc()),
            (Title, false) => query.order(recipes::title.asc()),
            (Title, true) => query.order(recipes::title.desc()),
            (Description, false) => query.order(recipes::description.asc()),
            (Description, true) => query.order(recipes::description.desc()),
            (CookingTime, false) => query.order(recipes::cooking_time.asc()),
            (CookingTime, true) => query.order(recipes::cooking_time.desc()),
            (Difficulty, false) => query.order(recipes::difficulty.asc()),
            (Difficulty, true) => query.order(recipes::difficulty.desc()),
            (CuisineId, false) => query.order(recipes::cuisine_id.asc()),
            (CuisineId, true) => query.order(recipes::cuisine_id.desc()),
            (AuthorId, false) => query.order(recipes::author_id.asc()),
            (AuthorId, true) => query.order(recipes::author_id.desc()),
        }
    }
}

/// One window of filtered recipes. Without a sort the rows come back in
/// id order; ties under a sort are also broken by id.
pub fn filtered_page(
    conn: &mut SqliteConnection,
    filter: &RecipeFilter,
    sort: Option<SortSpec>,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Recipe>> {
    let mut query = filter.apply(recipes::table.into_boxed());
    if let Some(sort) = sort {
        query = sort.apply(query);
    }
    query
        .then_order_by(recipes::id.asc())
        .offset(offset)
        .limit(limit)
        .load::<Recipe>(conn)
}

pub fn filtered_count(conn: &mut SqliteConnection, filter: &RecipeFilter) -> QueryResult<i64> {
    filter
        .apply(recipes::table.count().into_boxed())
        .get_result(conn)
}
