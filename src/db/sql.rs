//! Raw SQL façade.
//!
//! Statements handed to these helpers are executed verbatim, so they must come
//! from a trusted operator (the `--execute` flag), never from menu input. The
//! typed `*Operations` structs go through the query builder instead.

use crate::db::{DbConnection, RepositoryError};
use crate::traits::write_table;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{Array, BigInt, Text};
use diesel::PgConnection;
use log::{debug, error};
use std::io::Write;

#[derive(QueryableByName, Debug)]
struct TextRow {
    #[diesel(sql_type = Array<Text>)]
    columns: Vec<String>,
    #[diesel(sql_type = Text)]
    record: String,
}

#[derive(QueryableByName, Debug)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName, Debug)]
struct SequenceValue {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

/// Rows of an arbitrary query, every value rendered as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    pub fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        write_table(
            out,
            &self.columns,
            self.rows.iter().map(|row| {
                row.iter()
                    .map(|v| v.clone().unwrap_or_else(|| "null".to_string()))
                    .collect()
            }),
        )
    }
}

fn trim_statement(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}

/// Whether the statement produces a result set (as opposed to a row count).
pub fn returns_rows(sql: &str) -> bool {
    let first = trim_statement(sql)
        .trim_start_matches('(')
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    matches!(
        first.as_str(),
        "select" | "with" | "values" | "table" | "show"
    )
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn quote_ident(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// The statement in a form that can be wrapped as a subquery. `SHOW` is not
/// allowed there, so it becomes the equivalent `current_setting` select.
fn row_source(sql: &str) -> String {
    let statement = trim_statement(sql);
    let mut words = statement.split_whitespace();
    if !words.next().is_some_and(|w| w.eq_ignore_ascii_case("show")) {
        return statement.to_string();
    }

    let setting = words
        .take_while(|w| !w.starts_with("--"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches('"')
        .to_ascii_lowercase();
    let setting = match setting.as_str() {
        "time zone" => "timezone",
        "transaction isolation level" => "transaction_isolation",
        "session authorization" => "session_authorization",
        other => other,
    };
    if setting == "all" {
        return "SELECT name, setting, short_desc AS description FROM pg_settings ORDER BY name"
            .to_string();
    }
    format!(
        "SELECT current_setting({}) AS {}",
        quote_literal(setting),
        quote_ident(setting)
    )
}

/// Splits the text form of a row, e.g. `(4.50,"a b",)`, into `width`
/// fields. An unquoted empty field is NULL; `""` is the empty string.
fn split_record(record: &str, width: usize) -> Result<Vec<Option<String>>, RepositoryError> {
    let malformed = || RepositoryError::ValidationError(format!("malformed row: {record}"));
    if width == 0 {
        return Ok(Vec::new());
    }
    let inner = record
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut fields = Vec::with_capacity(width);
    let mut chars = inner.chars().peekable();
    loop {
        let mut value = String::new();
        let mut quoted = false;
        let mut in_quotes = false;
        let mut more = false;
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    chars.next();
                    value.push('"');
                }
                '"' => {
                    in_quotes = !in_quotes;
                    quoted = true;
                }
                '\\' if in_quotes => {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                }
                ',' if !in_quotes => {
                    more = true;
                    break;
                }
                other => value.push(other),
            }
        }
        fields.push((quoted || !value.is_empty()).then_some(value));
        if !more {
            break;
        }
    }

    if fields.len() != width {
        return Err(malformed());
    }
    Ok(fields)
}

fn decode_rows(raw: Vec<TextRow>) -> Result<QueryRows, RepositoryError> {
    let mut result = QueryRows::default();
    for row in raw {
        let values = split_record(&row.record, row.columns.len())?;
        if result.columns.is_empty() {
            result.columns = row.columns;
        }
        result.rows.push(values);
    }
    Ok(result)
}

pub fn execute_update(conn: &mut PgConnection, sql: &str) -> QueryResult<usize> {
    diesel::sql_query(trim_statement(sql)).execute(conn)
}

pub fn execute_query_collect(
    conn: &mut PgConnection,
    sql: &str,
) -> Result<QueryRows, RepositoryError> {
    let wrapped = format!(
        "SELECT ARRAY(SELECT key FROM json_each(row_to_json(facade_row))) AS columns, \
         facade_row::text AS record FROM (\n{}\n) AS facade_row",
        row_source(sql)
    );
    let raw = diesel::sql_query(wrapped)
        .load::<TextRow>(conn)
        .map_err(RepositoryError::DatabaseError)?;
    decode_rows(raw)
}

pub fn execute_query_count(conn: &mut PgConnection, sql: &str) -> QueryResult<usize> {
    let wrapped = format!(
        "SELECT COUNT(*) AS count FROM (SELECT 1 FROM (\n{}\n) AS q LIMIT 1) AS c",
        row_source(sql)
    );
    let row = diesel::sql_query(wrapped).get_result::<CountRow>(conn)?;
    Ok(row.count as usize)
}

/// `currval` is session scoped: call it on the connection that advanced the
/// sequence.
pub fn current_sequence_value(conn: &mut PgConnection, sequence: &str) -> QueryResult<i64> {
    diesel::sql_query("SELECT currval($1::regclass) AS value")
        .bind::<Text, _>(sequence)
        .get_result::<SequenceValue>(conn)
        .map(|row| row.value)
}

#[derive(Clone)]
pub struct SqlOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl SqlOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn execute_update(&self, sql: &str) -> Result<usize, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("execute_update: failed to acquire DB connection: {}", e);
            e
        })?;
        debug!("execute_update: {}", sql);

        execute_update(conn.connection(), sql).map_err(|e| {
            error!("execute_update: statement failed: {}", e);
            RepositoryError::DatabaseError(e)
        })
    }

    /// Prints the header and tab separated rows to `out`, returning the row
    /// count. Nothing is printed for an empty result.
    pub fn execute_query_print(
        &self,
        sql: &str,
        out: &mut dyn Write,
    ) -> Result<usize, RepositoryError> {
        let rows = self.execute_query_collect(sql)?;
        if !rows.is_empty() {
            rows.write_to(out)?;
        }
        Ok(rows.len())
    }

    pub fn execute_query_collect(&self, sql: &str) -> Result<QueryRows, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("execute_query_collect: failed to acquire DB connection: {}", e);
            e
        })?;
        debug!("execute_query_collect: {}", sql);

        execute_query_collect(conn.connection(), sql).map_err(|e| {
            error!("execute_query_collect: query failed: {}", e);
            e
        })
    }

    pub fn execute_query_count(&self, sql: &str) -> Result<usize, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("execute_query_count: failed to acquire DB connection: {}", e);
            e
        })?;

        execute_query_count(conn.connection(), sql).map_err(|e| {
            error!("execute_query_count: query failed: {}", e);
            RepositoryError::DatabaseError(e)
        })
    }

    pub fn current_sequence_value(&self, sequence: &str) -> Result<i64, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "current_sequence_value: failed to acquire DB connection for '{}': {}",
                sequence, e
            );
            e
        })?;

        current_sequence_value(conn.connection(), sequence).map_err(|e| {
            error!(
                "current_sequence_value: currval('{}') failed: {}",
                sequence, e
            );
            RepositoryError::DatabaseError(e)
        })
    }
}
