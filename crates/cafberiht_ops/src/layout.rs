//! Read-only inspection of a container's layout.

use crate::mixin::{AdditionMixin, CoreInterface};
use crate::ops::CoreType;

use cafberiht::{Cafberiht, Element, Enumerator, EnumeratorError, InspectAll, Inspector};
use tracing::debug;

use std::io::{self, Write};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Enumerator(#[from] EnumeratorError),
    #[error("failed to write the layout")]
    Io(#[from] io::Error),
}

/// One element of a container, as seen by [`LayoutCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    pub position: usize,
    pub value: u64,
    pub name: &'static str,
    /// Whether [`AdditionMixin`] acts on this element.
    pub admitted: bool,
    pub kernel_iteration_count: u64,
}

/// Inspector that records one [`LayoutRow`] per element.
pub struct LayoutCollector;

impl<const E: u64> Inspector<CoreInterface<E>, Vec<LayoutRow>> for LayoutCollector {
    const ADMIT: bool = true;

    fn inspect(core: &CoreInterface<E>, rows: &mut Vec<LayoutRow>) {
        rows.push(LayoutRow {
            position: rows.len(),
            value: E,
            name: <CoreInterface<E> as Element>::ENUMERATOR.name(),
            admitted: AdditionMixin::admits(E),
            kernel_iteration_count: core.kernel_iteration_count,
        });
    }
}

/// Collects the rows of `container`, in layout order.
pub fn collect<C>(container: &C) -> Vec<LayoutRow>
where
    C: Cafberiht + InspectAll<LayoutCollector, Vec<LayoutRow>>,
{
    let mut rows = Vec::with_capacity(C::SIZE);
    container.inspect::<LayoutCollector, _>(&mut rows);
    debug!(rows = rows.len(), "collected layout");
    rows
}

/// Position of the operation named `name` in `C`, or `None` when `C` does
/// not hold it.
pub fn locate<C>(name: &str) -> Result<Option<usize>, LayoutError>
where
    C: Cafberiht<Enum = CoreType>,
{
    let operation: CoreType = name.parse()?;
    let position = C::position(operation);
    debug!(%operation, ?position, "located operation");
    Ok(position)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    /// Aligned columns between separator lines.
    Table,
    /// Comma-separated values with a header line.
    Csv,
}

pub fn render<W: Write>(
    rows: &[LayoutRow],
    format: LayoutFormat,
    writer: &mut W,
) -> Result<(), LayoutError> {
    match format {
        LayoutFormat::Table => render_table(rows, writer)?,
        LayoutFormat::Csv => render_csv(rows, writer)?,
    }
    Ok(())
}

fn render_table<W: Write>(rows: &[LayoutRow], writer: &mut W) -> io::Result<()> {
    let name_width = rows
        .iter()
        .map(|row| row.name.len())
        .max()
        .unwrap_or(0)
        .max("name".len());
    let line_separator = "-".repeat(name_width + 35);

    writeln!(writer, "{}", line_separator)?;
    writeln!(
        writer,
        "{:>8} {:>6}  {:<width$}  {:>5} {:>10}",
        "position",
        "value",
        "name",
        "mixin",
        "iterations",
        width = name_width
    )?;
    writeln!(writer, "{}", line_separator)?;
    for row in rows {
        writeln!(
            writer,
            "{:>8} {:>6}  {:<width$}  {:>5} {:>10}",
            row.position,
            row.value,
            row.name,
            if row.admitted { "yes" } else { "no" },
            row.kernel_iteration_count,
            width = name_width
        )?;
    }
    writeln!(writer, "{}", line_separator)
}

fn render_csv<W: Write>(rows: &[LayoutRow], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "position,value,name,admitted,kernel_iteration_count")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{}",
            row.position, row.value, row.name, row.admitted, row.kernel_iteration_count
        )?;
    }
    Ok(())
}
