use domain::search::SortDirection;
use rusqlite::types::Value;

/// `WHERE` clause assembled from filter criteria, with positional values
#[derive(Debug, Default)]
pub struct SqlFilter {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition; `values` bind its `?` placeholders in order
    pub fn push(&mut self, clause: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.values.extend(values);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

pub fn order_sql(column: &str, direction: SortDirection) -> String {
    let direction = match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}, rowid ASC")
}

pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where() {
        assert_eq!(SqlFilter::new().where_sql(), "");
    }

    #[test]
    fn test_clauses_are_joined() {
        let mut filter = SqlFilter::new();
        filter.push("account_id = ?", [Value::Text("a".into())]);
        filter.push("start_time >= ? AND start_time <= ?", [Value::Integer(1), Value::Integer(2)]);

        assert_eq!(
            filter.where_sql(),
            " WHERE account_id = ? AND start_time >= ? AND start_time <= ?"
        );
        assert_eq!(filter.values().len(), 3);
    }

    #[test]
    fn test_order_ends_with_rowid() {
        assert_eq!(order_sql("created_at", SortDirection::Desc), " ORDER BY created_at DESC, rowid ASC");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
