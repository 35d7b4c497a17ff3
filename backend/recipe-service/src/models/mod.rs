/// Data models for recipe-service
///
/// A `Recipe` is an aggregate: it owns its ordered `Ingredient`s and every
/// store loads and persists the two together.
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated recipe with its ingredients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a new recipe stamped with the current instant.
    ///
    /// One ingredient is created per pantry item, in input order.
    pub fn new<I, S>(title: String, instructions: String, pantry: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = Uuid::new_v4();
        let ingredients = pantry
            .into_iter()
            .map(|name| Ingredient::new(id, name))
            .collect();

        Self {
            id,
            title,
            instructions,
            ingredients,
            created_at: now_micros(),
        }
    }

    /// Reassemble an aggregate from its stored rows
    pub fn from_rows(row: RecipeRow, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            instructions: row.instructions,
            ingredients,
            created_at: row.created_at,
        }
    }
}

/// Current instant rounded up to whole microseconds.
///
/// timestamptz keeps microseconds; rounding up keeps the stamp at or after
/// the moment it was taken.
fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    let truncated = now.trunc_subsecs(6);
    if truncated < now {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}

/// Named component owned by exactly one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
}

impl Ingredient {
    pub fn new(recipe_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipe_id,
            name: name.into(),
        }
    }
}

/// `recipes` table row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}
