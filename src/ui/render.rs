use crate::enums::common::OrderDetails;
use crate::traits::{write_rows, TableRow};
use std::io::{self, Write};

/// Prints rows as a tab separated table on stdout and returns the count.
pub fn print_rows<T: TableRow>(rows: &[T]) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = write_rows(&mut out, rows)?;
    out.flush()?;
    Ok(count)
}

pub fn print_row_count(count: usize) {
    println!("\ttotal row(s): {count}");
}

pub fn write_order_details(out: &mut dyn Write, details: &OrderDetails) -> io::Result<()> {
    write_rows(out, std::slice::from_ref(&details.order))?;
    if details.items.is_empty() {
        writeln!(out, "\tNo items in this order")?;
    } else {
        write_rows(out, &details.items)?;
    }
    Ok(())
}

pub fn print_order_details(details: &OrderDetails) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_order_details(&mut out, details)?;
    out.flush()
}
