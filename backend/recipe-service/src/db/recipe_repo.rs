use super::RecipeRepository;
use crate::error::Result;
use crate::models::{Ingredient, Recipe, RecipeRow};
use crate::SERVICE_NAME;
use async_trait::async_trait;
use db_pool::acquire_with_metrics;
use sqlx::{Connection, PgConnection, PgPool};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL-backed recipe repository
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load ingredients for the given recipes, grouped by recipe, in position order
    async fn ingredients_for(
        conn: &mut PgConnection,
        recipe_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Ingredient>>> {
        let rows = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, recipe_id, name
            FROM ingredients
            WHERE recipe_id = ANY($1)
            ORDER BY recipe_id, position
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(&mut *conn)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Ingredient>> = HashMap::new();
        for ingredient in rows {
            grouped
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn list_all(&self) -> Result<Vec<Recipe>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, instructions, created_at
            FROM recipes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut ingredients = Self::ingredients_for(&mut conn, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owned = ingredients.remove(&row.id).unwrap_or_default();
                Recipe::from_rows(row, owned)
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, instructions, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredients = Self::ingredients_for(&mut conn, &[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        Ok(Some(Recipe::from_rows(row, ingredients)))
    }

    async fn add(&self, recipe: &Recipe) -> Result<()> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let mut tx = conn.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO recipes (id, title, instructions, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.instructions)
        .bind(recipe.created_at)
        .execute(&mut *tx)
        .await?;

        if !recipe.ingredients.is_empty() {
            let ids: Vec<Uuid> = recipe.ingredients.iter().map(|i| i.id).collect();
            let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
            let positions: Vec<i32> = (0..recipe.ingredients.len() as i32).collect();

            sqlx::query(
                r#"
                INSERT INTO ingredients (id, recipe_id, name, position)
                SELECT ingredient_id, $2, name, position
                FROM UNNEST($1::uuid[], $3::text[], $4::int4[]) AS t(ingredient_id, name, position)
                "#,
            )
            .bind(&ids)
            .bind(recipe.id)
            .bind(&names)
            .bind(&positions)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            recipe_id = %recipe.id,
            ingredient_count = recipe.ingredients.len(),
            "Stored recipe in PostgreSQL"
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
