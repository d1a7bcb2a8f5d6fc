use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use statannot_model::{AnnotationDescriptor, AnnotationMode};

/// Prints the resolved layer, its category axis and any warnings.
pub fn print_annotation_table(descriptor: &AnnotationDescriptor, table: &Table) {
    println!(
        "Mode: {} ({} annotation{})",
        descriptor.mode,
        descriptor.len(),
        if descriptor.len() == 1 { "" } else { "s" }
    );
    if descriptor.mode == AnnotationMode::Text && !descriptor.categories.is_empty() {
        println!("Categories: {}", descriptor.categories.join(", "));
    }
    println!("{table}");
    print_warnings(descriptor);
}

pub fn print_warnings(descriptor: &AnnotationDescriptor) {
    if descriptor.warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings:");
    for warning in &descriptor.warnings {
        println!("  - {warning}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
