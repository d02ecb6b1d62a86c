//! Repositories for the `folders` and `articles` tables.

use kbase::model::{Category, NewArticle, NewFolder};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{ArticleRow, FolderRow};

const FOLDER_COLUMNS: &str = "id, name, category, created_at, updated_at";

/// Article columns plus both media lists, each aggregated in `position` order.
const ARTICLE_COLUMNS: &str = "a.id, a.folder_id, a.title, a.content, a.category, \
     COALESCE((SELECT array_agg(i.url ORDER BY i.position) FROM article_images i \
               WHERE i.article_id = a.id), '{}') AS images, \
     COALESCE((SELECT array_agg(v.url ORDER BY v.position) FROM article_videos v \
               WHERE v.article_id = a.id), '{}') AS videos, \
     a.created_at, a.updated_at";

pub struct FolderRepo;

impl FolderRepo {
    /// List folders, optionally for one category, ordered by name ascending.
    pub async fn list(
        pool: &PgPool,
        category: Option<Category>,
    ) -> Result<Vec<FolderRow>, sqlx::Error> {
        let query = format!(
            "SELECT {FOLDER_COLUMNS} FROM folders
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, FolderRow>(&query)
            .bind(category.map(|c| c.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &NewFolder) -> Result<FolderRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (id, name, category)
             VALUES ($1, $2, $3)
             RETURNING {FOLDER_COLUMNS}"
        );
        sqlx::query_as::<_, FolderRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.category.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM folders WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a folder; its articles and their media go with it through
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct ArticleRepo;

impl ArticleRepo {
    /// List articles filtered by folder and/or category, newest first.
    pub async fn list(
        pool: &PgPool,
        folder_id: Option<Uuid>,
        category: Option<Category>,
    ) -> Result<Vec<ArticleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles a
             WHERE ($1::uuid IS NULL OR a.folder_id = $1)
               AND ($2::text IS NULL OR a.category = $2)
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(folder_id)
            .bind(category.map(|c| c.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the article and its media in one transaction. Any failure
    /// rolls the whole insert back.
    pub async fn create(pool: &PgPool, input: &NewArticle) -> Result<ArticleRow, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO articles (id, folder_id, title, content, category)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(input.folder_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category.as_str())
        .execute(&mut *tx)
        .await?;

        insert_media(&mut tx, "article_images", id, &input.images).await?;
        insert_media(&mut tx, "article_videos", id, &input.videos).await?;

        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Replace title and content. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles SET title = $2, content = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn insert_media(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    article_id: Uuid,
    urls: &[String],
) -> Result<(), sqlx::Error> {
    let query = format!("INSERT INTO {table} (id, article_id, url, position) VALUES ($1, $2, $3, $4)");
    for (position, url) in urls.iter().enumerate() {
        sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(article_id)
            .bind(url)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
