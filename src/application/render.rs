//! Fixed-width listing tables
//!
//! Column widths are minimums: long values push the rest of the row right
//! instead of being cut.

use crate::domain::{Droplet, Image};

const WIDE: usize = 60;
const NARROW: usize = 20;

struct Column {
    title: &'static str,
    width: usize,
}

const DROPLET_COLUMNS: [Column; 4] = [
    Column { title: "name", width: WIDE },
    Column { title: "status", width: NARROW },
    Column { title: "ip", width: NARROW },
    Column { title: "id", width: NARROW },
];

const IMAGE_COLUMNS: [Column; 5] = [
    Column { title: "id", width: NARROW },
    Column { title: "name", width: WIDE },
    Column { title: "size", width: NARROW },
    Column { title: "regions", width: NARROW },
    Column { title: "created at", width: NARROW },
];

/// Header plus one row per droplet: name, status, ip, id.
pub fn droplet_table(droplets: &[Droplet]) -> String {
    let rows = droplets.iter().map(|d| {
        vec![
            d.name.clone(),
            d.status.clone(),
            d.ip_address.clone().unwrap_or_default(),
            d.id.to_string(),
        ]
    });
    render(&DROPLET_COLUMNS, rows)
}

/// Header plus one row per image: id, name, size, regions, created at.
pub fn image_table(images: &[Image]) -> String {
    let rows = images.iter().map(|i| {
        vec![
            i.id.to_string(),
            i.name.clone(),
            i.size_gigabytes
                .map(|gb| format!("{gb:.2}GB"))
                .unwrap_or_default(),
            i.regions.join(","),
            i.created_at.clone(),
        ]
    });
    render(&IMAGE_COLUMNS, rows)
}

fn render(columns: &[Column], rows: impl Iterator<Item = Vec<String>>) -> String {
    let header: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
    std::iter::once(header)
        .chain(rows)
        .map(|cells| format_row(columns, &cells))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(columns: &[Column], cells: &[String]) -> String {
    let line = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| format!("{:<width$}", cell, width = column.width))
        .collect::<Vec<_>>()
        .join(" ");
    line.trim_end().to_string()
}
