//! Writes: create / update / delete per entity, each returning the row as
//! stored.

pub mod allergens;
pub mod cuisines;
pub mod ingredients;
pub mod recipes;

use crate::error::AppResult;
use crate::validation;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body for creating or renaming a cuisine, allergen or ingredient.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NamedInput {
    pub name: String,
}

impl NamedInput {
    pub fn validate(&self) -> AppResult<()> {
        validation::short_text("name", &self.name)
    }
}
