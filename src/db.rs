use log::{info, warn};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use std::fs;
use std::path::Path;

use crate::config::AppConfig;

pub async fn connect_db(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let url = config.database_url();
    ensure_sqlite_dir(&url);
    let db = Database::connect(&url).await?;
    init_schema(&db).await?;
    Ok(db)
}

fn ensure_sqlite_dir(url: &str) {
    let Some(path) = sqlite_file_path(url) else {
        return;
    };
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("could not create sqlite directory {}: {}", parent.display(), e);
        }
    }
}

fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

/// Creates the favorites schema on SQLite. Other backends are migrated out of band.
pub async fn init_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    if backend != DbBackend::Sqlite {
        return Ok(());
    }

    let sql = include_str!("../schema-sqlite.sql");
    for stmt in split_sql(sql) {
        db.execute(Statement::from_string(backend, stmt)).await?;
    }
    info!("sqlite schema ready");
    Ok(())
}

fn split_sql(input: &str) -> Vec<String> {
    let mut buf = String::new();
    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }
        buf.push_str(line);
        buf.push('\n');
    }
    buf.split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sql_drops_comments_and_blank_statements() {
        let sql = "-- header\nCREATE TABLE a (id INTEGER);\n\n-- note\nCREATE INDEX i ON a (id);\n;\n";
        let stmts = split_sql(sql);
        assert_eq!(
            stmts,
            vec![
                "CREATE TABLE a (id INTEGER)".to_string(),
                "CREATE INDEX i ON a (id)".to_string(),
            ]
        );
    }

    #[test]
    fn bundled_schema_has_both_tables_and_the_unique_index() {
        let stmts = split_sql(include_str!("../schema-sqlite.sql"));
        assert_eq!(stmts.len(), 3);
        assert!(stmts[0].contains("t_user"));
        assert!(stmts[1].contains("t_favorite"));
        assert!(stmts[2].starts_with("CREATE UNIQUE INDEX"));
    }

    #[test]
    fn sqlite_file_path_handles_url_shapes() {
        assert_eq!(
            sqlite_file_path("sqlite://./data/favorites.sqlite?mode=rwc"),
            Some("./data/favorites.sqlite")
        );
        assert_eq!(sqlite_file_path("sqlite:/tmp/x.db"), Some("/tmp/x.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("mysql://localhost/favorites"), None);
    }

    #[test]
    fn sqlite_dir_is_created_and_failures_only_warn() {
        let dir = std::env::temp_dir().join(format!("favorites-db-{}", std::process::id()));
        let file = dir.join("nested").join("favorites.sqlite");
        ensure_sqlite_dir(&format!("sqlite://{}?mode=rwc", file.display()));
        assert!(file.parent().unwrap().is_dir());
        let _ = fs::remove_dir_all(&dir);

        ensure_sqlite_dir("sqlite:///dev/null/nested/favorites.sqlite?mode=rwc");
        assert!(!Path::new("/dev/null/nested").exists());
    }

    #[actix_rt::test]
    async fn init_schema_is_repeatable() {
        let db = crate::test_support::memory_db().await;
        init_schema(&db).await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name='t_favorite'",
            ))
            .await
            .unwrap();
        assert!(row.is_some());
    }
}
