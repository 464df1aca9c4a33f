//! Seed data shared by the unit tests.

use crate::models::{
    Measurement, NewAllergen, NewCuisine, NewIngredient, NewRecipe, NewRecipeAllergen,
    NewRecipeIngredient, NewUser,
};
use crate::schema::{
    allergens, cuisines, ingredients, recipe_allergens, recipe_ingredients, recipes, users,
};
use diesel::prelude::*;

pub struct Catalog {
    pub author: i32,
    pub italian: i32,
    pub gluten: i32,
    pub dairy: i32,
    pub nuts: i32,
    pub pasta: i32,
    pub tomato: i32,
    pub cheese: i32,
    pub olive_oil: i32,
}

pub struct SeededRecipes {
    pub carbonara: i32,
    pub pizza: i32,
    pub salad: i32,
}

pub fn seed_user(conn: &mut SqliteConnection, email: &str, first: &str, last: &str) -> i32 {
    diesel::insert_into(users::table)
        .values(NewUser {
            email,
            hashed_password: "not-a-real-hash",
            first_name: first,
            last_name: last,
        })
        .returning(users::id)
        .get_result(conn)
        .unwrap()
}

fn cuisine(conn: &mut SqliteConnection, name: &str) -> i32 {
    diesel::insert_into(cuisines::table)
        .values(NewCuisine { name })
        .returning(cuisines::id)
        .get_result(conn)
        .unwrap()
}

fn allergen(conn: &mut SqliteConnection, name: &str) -> i32 {
    diesel::insert_into(allergens::table)
        .values(NewAllergen { name })
        .returning(allergens::id)
        .get_result(conn)
        .unwrap()
}

fn ingredient(conn: &mut SqliteConnection, name: &str) -> i32 {
    diesel::insert_into(ingredients::table)
        .values(NewIngredient { name })
        .returning(ingredients::id)
        .get_result(conn)
        .unwrap()
}

/// One author, one cuisine, three allergens, four ingredients.
pub fn seed_catalog(conn: &mut SqliteConnection) -> Catalog {
    Catalog {
        author: seed_user(conn, "test@example.com", "Test", "User"),
        italian: cuisine(conn, "Italian"),
        gluten: allergen(conn, "Gluten"),
        dairy: allergen(conn, "Dairy"),
        nuts: allergen(conn, "Nuts"),
        pasta: ingredient(conn, "Pasta"),
        tomato: ingredient(conn, "Tomato"),
        cheese: ingredient(conn, "Cheese"),
        olive_oil: ingredient(conn, "Olive Oil"),
    }
}

/// Bare recipe row without links.
pub fn seed_recipe(
    conn: &mut SqliteConnection,
    title: &str,
    cuisine_id: Option<i32>,
    author_id: i32,
) -> i32 {
    diesel::insert_into(recipes::table)
        .values(NewRecipe {
            title,
            description: "Seeded for tests",
            cooking_time: 20,
            difficulty: 1,
            cuisine_id,
            author_id,
        })
        .returning(recipes::id)
        .get_result(conn)
        .unwrap()
}

fn link_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    ingredient_id: i32,
    quantity: f64,
    measurement: Measurement,
) {
    diesel::insert_into(recipe_ingredients::table)
        .values(NewRecipeIngredient {
            recipe_id,
            ingredient_id,
            quantity,
            measurement,
        })
        .execute(conn)
        .unwrap();
}

/// Spaghetti Carbonara (pasta, cheese; gluten, dairy), Margherita Pizza
/// (tomato, cheese) and Caesar Salad (olive oil, no cuisine).
pub fn seed_recipes(conn: &mut SqliteConnection, catalog: &Catalog) -> SeededRecipes {
    let carbonara = diesel::insert_into(recipes::table)
        .values(NewRecipe {
            title: "Spaghetti Carbonara",
            description: "Classic Italian pasta dish",
            cooking_time: 30,
            difficulty: 2,
            cuisine_id: Some(catalog.italian),
            author_id: catalog.author,
        })
        .returning(recipes::id)
        .get_result(conn)
        .unwrap();
    let pizza = diesel::insert_into(recipes::table)
        .values(NewRecipe {
            title: "Margherita Pizza",
            description: "Traditional Italian pizza",
            cooking_time: 45,
            difficulty: 3,
            cuisine_id: Some(catalog.italian),
            author_id: catalog.author,
        })
        .returning(recipes::id)
        .get_result(conn)
        .unwrap();
    let salad = diesel::insert_into(recipes::table)
        .values(NewRecipe {
            title: "Caesar Salad",
            description: "Fresh salad with Caesar dressing",
            cooking_time: 15,
            difficulty: 1,
            cuisine_id: None,
            author_id: catalog.author,
        })
        .returning(recipes::id)
        .get_result(conn)
        .unwrap();

    diesel::insert_into(recipe_allergens::table)
        .values(&vec![
            NewRecipeAllergen {
                recipe_id: carbonara,
                allergen_id: catalog.gluten,
            },
            NewRecipeAllergen {
                recipe_id: carbonara,
                allergen_id: catalog.dairy,
            },
        ])
        .execute(conn)
        .unwrap();

    link_ingredient(conn, carbonara, catalog.pasta, 200.0, Measurement::Grams);
    link_ingredient(conn, carbonara, catalog.cheese, 100.0, Measurement::Grams);
    link_ingredient(conn, pizza, catalog.tomato, 150.0, Measurement::Grams);
    link_ingredient(conn, pizza, catalog.cheese, 200.0, Measurement::Grams);
    link_ingredient(conn, salad, catalog.olive_oil, 50.0, Measurement::Milliliters);

    SeededRecipes {
        carbonara,
        pizza,
        salad,
    }
}
