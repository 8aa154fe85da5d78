//! Repository for the `style_options` table.

use clubsite_core::style::StyleOptions;
use clubsite_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::models::style_options::StyleOptionsRow;

/// Column list for style_options queries.
const COLUMNS: &str = "id, background_type, background_color, background_gradient, \
    background_image, background_image_opacity, text_color, text_align, \
    padding_top, padding_bottom, padding_left, padding_right, margin_top, margin_bottom, \
    container_width, border_radius, shadow, animate_on_scroll, hover_effect, custom_class, \
    created_at, updated_at";

type StyleQuery<'q> = QueryAs<'q, Postgres, StyleOptionsRow, PgArguments>;

/// Bind every styling field as `$1..$19`, in `COLUMNS` order (minus id).
fn bind_options<'q>(query: StyleQuery<'q>, o: &'q StyleOptions) -> StyleQuery<'q> {
    query
        .bind(o.background_type.as_str())
        .bind(&o.background_color)
        .bind(&o.background_gradient)
        .bind(&o.background_image)
        .bind(o.background_image_opacity)
        .bind(&o.text_color)
        .bind(o.text_align.as_str())
        .bind(o.padding_top.as_str())
        .bind(o.padding_bottom.as_str())
        .bind(o.padding_left.as_str())
        .bind(o.padding_right.as_str())
        .bind(o.margin_top.as_str())
        .bind(o.margin_bottom.as_str())
        .bind(o.container_width.as_str())
        .bind(o.border_radius)
        .bind(o.shadow)
        .bind(o.animate_on_scroll)
        .bind(o.hover_effect.as_str())
        .bind(&o.custom_class)
}

/// Provides persistence for block style options.
pub struct StyleOptionsRepo;

impl StyleOptionsRepo {
    /// Insert a style options row. Takes a connection so callers can create
    /// it inside the transaction that creates the owning block.
    pub async fn create(
        conn: &mut PgConnection,
        options: &StyleOptions,
    ) -> Result<StyleOptionsRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO style_options
                (background_type, background_color, background_gradient, background_image,
                 background_image_opacity, text_color, text_align,
                 padding_top, padding_bottom, padding_left, padding_right,
                 margin_top, margin_bottom, container_width, border_radius,
                 shadow, animate_on_scroll, hover_effect, custom_class)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19)
             RETURNING {COLUMNS}"
        );
        bind_options(sqlx::query_as::<_, StyleOptionsRow>(&query), options)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StyleOptionsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM style_options WHERE id = $1");
        sqlx::query_as::<_, StyleOptionsRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a row known to exist, on a caller-held connection.
    pub async fn load(conn: &mut PgConnection, id: DbId) -> Result<StyleOptionsRow, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM style_options WHERE id = $1");
        sqlx::query_as::<_, StyleOptionsRow>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Overwrite every styling field of an existing row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        options: &StyleOptions,
    ) -> Result<Option<StyleOptionsRow>, sqlx::Error> {
        let query = format!(
            "UPDATE style_options SET
                background_type = $1, background_color = $2, background_gradient = $3,
                background_image = $4, background_image_opacity = $5, text_color = $6,
                text_align = $7, padding_top = $8, padding_bottom = $9, padding_left = $10,
                padding_right = $11, margin_top = $12, margin_bottom = $13,
                container_width = $14, border_radius = $15, shadow = $16,
                animate_on_scroll = $17, hover_effect = $18, custom_class = $19
             WHERE id = $20
             RETURNING {COLUMNS}"
        );
        bind_options(sqlx::query_as::<_, StyleOptionsRow>(&query), options)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load several rows at once, for page assembly.
    pub async fn find_many(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<StyleOptionsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM style_options WHERE id = ANY($1)");
        sqlx::query_as::<_, StyleOptionsRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM style_options WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
