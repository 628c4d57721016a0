use chrono::NaiveDateTime;
use std::io::{self, Write};

pub use table_row_derive::TableRow;

/// A value that can be shown in one column of the console output.
pub trait Cell {
    fn cell(&self) -> String;
}

impl Cell for String {
    fn cell(&self) -> String {
        self.clone()
    }
}

impl Cell for i32 {
    fn cell(&self) -> String {
        self.to_string()
    }
}

impl Cell for i64 {
    fn cell(&self) -> String {
        self.to_string()
    }
}

impl Cell for f64 {
    fn cell(&self) -> String {
        format!("{:.2}", self)
    }
}

impl Cell for bool {
    fn cell(&self) -> String {
        if *self { "t" } else { "f" }.to_string()
    }
}

impl Cell for NaiveDateTime {
    fn cell(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl<T: Cell> Cell for Option<T> {
    fn cell(&self) -> String {
        match self {
            Some(value) => value.cell(),
            None => "null".to_string(),
        }
    }
}

/// A row type with a fixed set of printable columns.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// Writes a header line followed by one line per row, every column
/// terminated by a tab.
pub fn write_table<S, I>(out: &mut dyn Write, headers: &[S], rows: I) -> io::Result<()>
where
    S: AsRef<str>,
    I: IntoIterator<Item = Vec<String>>,
{
    for header in headers {
        write!(out, "{}\t", header.as_ref())?;
    }
    writeln!(out)?;
    for row in rows {
        for value in row {
            write!(out, "{}\t", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Prints `rows` as a table and returns how many were printed. An empty slice
/// prints nothing, not even the header.
pub fn write_rows<T: TableRow>(out: &mut dyn Write, rows: &[T]) -> io::Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    write_table(out, &T::headers(), rows.iter().map(TableRow::cells))?;
    Ok(rows.len())
}
