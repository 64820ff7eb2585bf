use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::settlement::Settlement, quantity::rate::MegawattHourRate};

pub fn build_settlement_table(settlement: &Settlement) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Settlement price", "Value"]);
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(settlement.total).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Declined energy"),
        Cell::new(settlement.declined_energy)
            .set_alignment(CellAlignment::Right)
            .fg(price_color(settlement.declined_energy)),
    ]);
    table.add_row(vec![
        Cell::new("Holdback"),
        Cell::new(settlement.holdback)
            .set_alignment(CellAlignment::Right)
            .fg(price_color(settlement.holdback)),
    ]);
    table
}

const fn price_color(price: MegawattHourRate) -> Color {
    if price.0.0 < 0.0 { Color::Red } else { Color::Green }
}
