//! Grouped aggregate queries over the price table.
//!
//! A [`GroupQuery`] selects its group keys followed by its measures, groups
//! and orders by the keys, and binds every filter value through a `?`
//! placeholder. Only identifiers and fixed expressions are interpolated.
//!
//! # Example
//!
//! ```rust
//! use crypto_dashboard::GroupQuery;
//! let (sql, params) = GroupQuery::new("price_records")
//!     .key("year", "year")
//!     .key("day", "day_of_month")
//!     .average("(close + open) / 2", "avg_close_open")
//!     .filter_int("month", 3)
//!     .build();
//! assert_eq!(
//!     sql,
//!     "SELECT year, day AS day_of_month, AVG((close + open) / 2) AS avg_close_open\n\
//!      FROM price_records\n\
//!      WHERE month = CAST(? AS INTEGER)\n\
//!      GROUP BY year, day\n\
//!      ORDER BY year, day"
//! );
//! assert_eq!(params, vec!["3"]);
//! ```

/// A `GROUP BY` query whose rows come back ordered by their keys.
pub struct GroupQuery {
    table: String,
    keys: Vec<(String, String)>,
    measures: Vec<String>,
    filters: Vec<String>,
    params: Vec<String>,
    tie_break: Option<String>,
}

impl GroupQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            keys: Vec::new(),
            measures: Vec::new(),
            filters: Vec::new(),
            params: Vec::new(),
            tie_break: None,
        }
    }

    /// Group by `column`, reported as `alias`. Keys order the result in the
    /// order they are added.
    pub fn key(&mut self, column: &str, alias: &str) -> &mut Self {
        self.keys.push((column.to_string(), alias.to_string()));
        self
    }

    /// `AVG({expr}) AS {alias}`.
    pub fn average(&mut self, expr: &str, alias: &str) -> &mut Self {
        self.measures.push(format!("AVG({}) AS {}", expr, alias));
        self
    }

    /// Number of rows in each group, as an `INTEGER` column.
    pub fn row_count(&mut self, alias: &str) -> &mut Self {
        self.measures
            .push(format!("CAST(COUNT(*) AS INTEGER) AS {}", alias));
        self
    }

    /// Keep only rows where `column` equals `value`.
    ///
    /// Parameters are bound as text, so the placeholder is cast explicitly.
    pub fn filter_int(&mut self, column: &str, value: i64) -> &mut Self {
        self.filters
            .push(format!("{} = CAST(? AS INTEGER)", column));
        self.params.push(value.to_string());
        self
    }

    /// Aggregate expression appended after the keys in `ORDER BY`.
    pub fn tie_break(&mut self, expr: &str) -> &mut Self {
        self.tie_break = Some(expr.to_string());
        self
    }

    /// Build the SQL string and its parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let select: Vec<String> = self
            .keys
            .iter()
            .map(|(column, alias)| {
                if column == alias {
                    column.clone()
                } else {
                    format!("{} AS {}", column, alias)
                }
            })
            .chain(self.measures.iter().cloned())
            .collect();
        let columns: Vec<&str> = self.keys.iter().map(|(column, _)| column.as_str()).collect();

        let mut parts = vec![
            format!("SELECT {}", select.join(", ")),
            format!("FROM {}", self.table),
        ];
        if !self.filters.is_empty() {
            parts.push(format!("WHERE {}", self.filters.join(" AND ")));
        }
        if !columns.is_empty() {
            parts.push(format!("GROUP BY {}", columns.join(", ")));
            let mut order = columns.join(", ");
            if let Some(expr) = &self.tie_break {
                order.push_str(", ");
                order.push_str(expr);
            }
            parts.push(format!("ORDER BY {}", order));
        }

        (parts.join("\n"), self.params.clone())
    }
}
