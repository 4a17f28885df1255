use serde_json::Value;
use sqlx::{Postgres, Transaction};

/// Builder for partial `UPDATE ... SET` statements.
///
/// Column names are `&'static str` supplied by the calling handler, never
/// caller input; values are always bound as parameters. Absent fields are
/// simply not added, so the statement covers exactly the fields present in
/// the request.
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, Value)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Add an assignment when the value is present
    pub fn set_opt(mut self, column: &'static str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render `UPDATE {table} SET col = $n, ... WHERE {key_column} = $last`
    fn sql(&self, key_column: &str) -> String {
        let set_clauses: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("\"{}\" = ${}", column, i + 1))
            .collect();

        format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = ${}",
            self.table,
            set_clauses.join(", "),
            key_column,
            self.assignments.len() + 1
        )
    }

    /// Execute against the given transaction; returns rows affected
    pub async fn execute(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        key_column: &'static str,
        key: i64,
    ) -> Result<u64, sqlx::Error> {
        let sql = self.sql(key_column);

        let mut query = sqlx::query(&sql);
        for (_, value) in &self.assignments {
            query = bind_value(query, value);
        }
        query = query.bind(key);

        let done = query.execute(&mut **tx).await?;
        Ok(done.rows_affected())
    }
}

/// Bind a JSON value to the query with a concrete SQL type
fn bind_value<'q>(
    q: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Arrays and objects are stored as JSON-encoded text columns
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_only_present_fields_in_order() {
        let builder = UpdateBuilder::new("questions")
            .set_opt("question_type", Some(json!("text")))
            .set_opt("description", None)
            .set_opt("required", Some(json!(true)));

        assert_eq!(
            builder.sql("id"),
            "UPDATE \"questions\" SET \"question_type\" = $1, \"required\" = $2 WHERE \"id\" = $3"
        );
    }

    #[test]
    fn empty_builder_reports_empty() {
        let builder = UpdateBuilder::new("questions").set_opt("description", None);
        assert!(builder.is_empty());
    }

    #[test]
    fn single_field_update() {
        let builder = UpdateBuilder::new("question_translations")
            .set_opt("question_text", Some(json!("¿Cómo te llamas?")));
        assert_eq!(
            builder.sql("id"),
            "UPDATE \"question_translations\" SET \"question_text\" = $1 WHERE \"id\" = $2"
        );
    }
}
