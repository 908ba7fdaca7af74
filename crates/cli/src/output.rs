use anyhow::Result;
use docsearch_index::{DocEntry, IndexStats};
use serde::Serialize;
use std::io::Write;

pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One header line per entry, followed by its summary when there is one
pub fn write_entries(out: &mut impl Write, entries: &[&DocEntry]) -> Result<()> {
    for entry in entries {
        let title: &str = if entry.title.is_empty() {
            &entry.page
        } else {
            &entry.title
        };
        let location: &str = if entry.location.is_empty() {
            "(page root)"
        } else {
            &entry.location
        };
        writeln!(out, "{:<8}  {title}  {location}", entry.category.as_str())?;

        let summary = entry.summary();
        if !summary.is_empty() && summary != title {
            writeln!(out, "          {}", summary.replace('\n', " "))?;
        }
    }
    Ok(())
}

pub fn write_pages(out: &mut impl Write, pages: &[&str]) -> Result<()> {
    for page in pages {
        writeln!(out, "{page}")?;
    }
    Ok(())
}

pub fn write_stats(out: &mut impl Write, stats: &IndexStats) -> Result<()> {
    writeln!(out, "entries   {}", stats.entries)?;
    writeln!(out, "pages     {}", stats.pages)?;
    for (category, count) in &stats.categories {
        writeln!(out, "{:<8}  {count}", category.as_str())?;
    }
    Ok(())
}
