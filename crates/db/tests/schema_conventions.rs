use sqlx::PgPool;

/// All `id` columns must be UUIDs.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_uuid(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 3, "expected users, projects and tasks");
    for (table, data_type) in &rows {
        assert_eq!(data_type, "uuid", "Table {table}.id should be uuid, got {data_type}");
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns should exist; TEXT is used throughout.
#[sqlx::test(migrations = "./migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "varchar columns found: {rows:?}");
}

/// The status CHECK constraint rejects values outside the enumeration.
#[sqlx::test(migrations = "./migrations")]
async fn test_task_status_check_constraint(pool: PgPool) {
    let (user_id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, name, password_hash) VALUES ('c@x.com', 'C', 'h') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let result = sqlx::query("INSERT INTO tasks (user_id, title, status) VALUES ($1, 'T', 'DONE')")
        .bind(user_id)
        .execute(&pool)
        .await;

    let err = result.expect_err("invalid status must violate ck_tasks_status");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_tasks_status"));
}

/// Migrations apply and the health check passes.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    nexustrack_db::health_check(&pool).await.unwrap();
}
