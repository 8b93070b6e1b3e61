//! Repository for the `birds` table.

use sqlx::{PgConnection, PgPool};

use crate::models::species::Species;

/// Column list for `birds` queries. `id` is widened because the table's
/// `SERIAL` key is 32-bit.
pub(crate) const COLUMNS: &str = "id::BIGINT AS id, slug, common_name, wins, losses";

/// Fetch-or-create access to species rows keyed by slug.
pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Return the row for `slug`, creating it with zero tallies if absent.
    ///
    /// When the row exists and `common_name` is given and differs from the
    /// stored value, the stored name is replaced. Tallies are never touched.
    pub async fn ensure(
        pool: &PgPool,
        slug: &str,
        common_name: Option<&str>,
    ) -> Result<Species, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::ensure_in(&mut conn, slug, common_name).await
    }

    /// [`Self::ensure`] on an existing connection, typically an open transaction.
    ///
    /// Locks the row until the surrounding transaction ends.
    pub async fn ensure_in(
        conn: &mut PgConnection,
        slug: &str,
        common_name: Option<&str>,
    ) -> Result<Species, sqlx::Error> {
        // The conditional DO UPDATE returns no row when nothing changed; the
        // conflicting row is still locked, so the follow-up read is stable.
        let upsert = format!(
            "INSERT INTO birds (slug, common_name) VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET common_name = EXCLUDED.common_name \
             WHERE EXCLUDED.common_name IS NOT NULL \
               AND birds.common_name IS DISTINCT FROM EXCLUDED.common_name \
             RETURNING {COLUMNS}"
        );
        let written = sqlx::query_as::<_, Species>(&upsert)
            .bind(slug)
            .bind(common_name)
            .fetch_optional(&mut *conn)
            .await?;

        match written {
            Some(species) => Ok(species),
            None => {
                let query = format!("SELECT {COLUMNS} FROM birds WHERE slug = $1");
                sqlx::query_as::<_, Species>(&query)
                    .bind(slug)
                    .fetch_one(&mut *conn)
                    .await
            }
        }
    }

    /// Find a species by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM birds WHERE slug = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
