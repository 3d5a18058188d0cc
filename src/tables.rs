use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{catalog::PricePlanCatalog, comparison::Recommendation};

/// Ranked plans, the cheapest one highlighted, the account's current plan marked.
pub fn build_recommendation_table(
    recommendations: &[Recommendation],
    catalog: &PricePlanCatalog,
    current_plan_id: Option<&str>,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling()
        .set_header(vec![
            Cell::new("#"),
            Cell::new("Plan"),
            Cell::new("Supplier"),
            Cell::new("Rate").set_alignment(CellAlignment::Right),
            Cell::new("Cost").set_alignment(CellAlignment::Right),
            Cell::new("Current"),
        ]);
    for (rank, recommendation) in recommendations.iter().enumerate() {
        let plan = catalog.get(&recommendation.plan_name);
        let is_current = current_plan_id == Some(recommendation.plan_name.as_str());
        table.add_row(vec![
            Cell::new(rank + 1).add_attribute(Attribute::Dim),
            Cell::new(&recommendation.plan_name).add_attribute(if is_current {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }),
            plan.map_or_else(|| Cell::new("n/a"), |plan| Cell::new(&plan.supplier)),
            plan.map_or_else(|| Cell::new("n/a"), |plan| Cell::new(plan.unit_rate))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(recommendation.cost)
                .set_alignment(CellAlignment::Right)
                .fg(if rank == 0 { Color::Green } else { Color::Reset }),
            Cell::new(if is_current { "✓" } else { "" }),
        ]);
    }
    table
}
