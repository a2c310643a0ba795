use sqlrun::domain::ScriptSpec;

pub const CREATE_QUERY: &str = "CREATE TABLE users (id SERIAL PRIMARY KEY, name VARCHAR(255))";
pub const INSERT_QUERY: &str = "INSERT INTO users (name) VALUES ('John'), ('Jane'), ('Bob')";
pub const BAD_QUERY: &str = "SELEKT * FORM x";

pub fn create_insert_batch() -> Vec<ScriptSpec> {
    vec![
        ScriptSpec::new("create_tables", CREATE_QUERY),
        ScriptSpec::new("insert_data", INSERT_QUERY),
    ]
}

pub fn batch_with_bad_script() -> Vec<ScriptSpec> {
    vec![
        ScriptSpec::new("create_tables", CREATE_QUERY),
        ScriptSpec::new("bad_script", BAD_QUERY),
        ScriptSpec::new("insert_data", INSERT_QUERY),
    ]
}

pub fn users_lifecycle_batch() -> Vec<ScriptSpec> {
    vec![
        ScriptSpec::new("create_users_table", CREATE_QUERY),
        ScriptSpec::new("insert_sample_users", INSERT_QUERY),
        ScriptSpec::new(
            "update_user_status",
            "UPDATE users SET status = 'premium' WHERE name = 'John'",
        ),
        ScriptSpec::new("query_active_users", "SELECT id, name FROM users"),
        ScriptSpec::new(
            "cleanup_inactive_users",
            "DELETE FROM users WHERE status = 'inactive'",
        ),
    ]
}
