use crate::table::PriceTable;
use heartwood_types::{
    BoardLayout, BoardSize, CartBreakdown, CartConfig, Cents, ExtrasLine, HandleStyle, WoodCell,
};
use serde::{Deserialize, Serialize};

/// Result of the pure board price computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPrice {
    pub base: Cents,
    pub variable: Cents,
    pub cell_count: u32,
    pub total: Cents,
}

/// Price a board from its strip contents.
///
/// `base` is a flat lookup by size; `variable` is the painted-cell count on
/// *active* strips times the per-cell rate. Strips 0 and 1 are always
/// active, strip 2 only when `strip3_enabled`. Extras are not included here;
/// they are flat fees summed separately by the caller.
pub fn board_price(
    size: BoardSize,
    strips: &[Vec<WoodCell>],
    strip3_enabled: bool,
    table: &PriceTable,
) -> BoardPrice {
    let active = BoardLayout::active_strips(strip3_enabled);
    let cell_count = strips
        .iter()
        .take(active.end)
        .flatten()
        .filter(|cell| cell.is_some())
        .count() as u32;

    let base = table.base_price(size);
    let variable = table.cell_rate.saturating_mul(u64::from(cell_count));
    BoardPrice {
        base,
        variable,
        cell_count,
        total: base.saturating_add(variable),
    }
}

/// Flat extras fees for a configuration, as labelled lines. Zero-fee
/// options (square edges, no handle) produce no line.
pub fn extras_fees(config: &CartConfig, table: &PriceTable) -> Vec<ExtrasLine> {
    let mut lines = Vec::new();
    if config.extras.groove_enabled {
        lines.push(ExtrasLine::new("Juice groove", table.groove_fee));
    }
    if config.brass_feet {
        lines.push(ExtrasLine::new("Brass feet", table.brass_feet_fee));
    }
    if config.strip3_enabled {
        lines.push(ExtrasLine::new("Third strip", table.strip3_fee));
    }
    match config.handle_style {
        HandleStyle::None => {}
        HandleStyle::Glide => lines.push(ExtrasLine::new("Glide handles", table.handle_glide_fee)),
        HandleStyle::Lift => lines.push(ExtrasLine::new("Lift handles", table.handle_lift_fee)),
    }
    lines
}

/// Authoritative breakdown for a frozen configuration: board price plus
/// extras. This is what checkout charges, regardless of what the client
/// declared.
pub fn price_config(config: &CartConfig, table: &PriceTable) -> CartBreakdown {
    let board = board_price(
        config.size,
        &config.board_data.strips,
        config.strip3_enabled,
        table,
    );
    let detail = extras_fees(config, table);
    let extras: Cents = detail.iter().map(|line| line.amount_cents).sum();
    CartBreakdown {
        base_cents: board.base,
        variable_cents: board.variable,
        extras_cents: extras,
        extras_detail: detail,
    }
}

/// Total of a breakdown's three buckets.
pub fn breakdown_total(breakdown: &CartBreakdown) -> Cents {
    breakdown
        .base_cents
        .saturating_add(breakdown.variable_cents)
        .saturating_add(breakdown.extras_cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartwood_types::BoardExtras;

    fn painted(size: BoardSize, cells: &[(usize, usize)]) -> Vec<Vec<WoodCell>> {
        let mut strips = vec![vec![None; size.columns()]; 3];
        for &(row, col) in cells {
            strips[row][col] = Some("walnut".to_string());
        }
        strips
    }

    #[test]
    fn test_scenario_small_ten_cells() {
        // base 150 display units + 10 cells at 1 unit = 160 units (16000 cents).
        let cells: Vec<(usize, usize)> = (0..10).map(|c| (0, c)).collect();
        let strips = painted(BoardSize::Small, &cells);
        let price = board_price(BoardSize::Small, &strips, false, &PriceTable::standard());
        assert_eq!(price.base, Cents::new(15000));
        assert_eq!(price.cell_count, 10);
        assert_eq!(price.variable, Cents::new(1000));
        assert_eq!(price.total, Cents::new(16000));
    }

    #[test]
    fn test_purity_and_total_law() {
        let strips = painted(BoardSize::Regular, &[(0, 0), (1, 3), (1, 4)]);
        let table = PriceTable::standard();
        let a = board_price(BoardSize::Regular, &strips, true, &table);
        let b = board_price(BoardSize::Regular, &strips, true, &table);
        assert_eq!(a, b);
        assert_eq!(a.total, a.base.saturating_add(a.variable));
    }

    #[test]
    fn test_inactive_third_strip_never_counts() {
        let size = BoardSize::Small;
        let empty = painted(size, &[]);
        let full_third: Vec<(usize, usize)> = (0..size.columns()).map(|c| (2, c)).collect();
        let filled = painted(size, &full_third);

        let table = PriceTable::standard();
        let a = board_price(size, &empty, false, &table);
        let b = board_price(size, &filled, false, &table);
        assert_eq!(a.cell_count, b.cell_count);
        assert_eq!(a.total, b.total);

        // Enabled, the same cells do count.
        let c = board_price(size, &filled, true, &table);
        assert_eq!(c.cell_count, size.columns() as u32);
    }

    #[test]
    fn test_extras_fees_labelled() {
        let config = CartConfig {
            strip3_enabled: true,
            extras: BoardExtras {
                groove_enabled: true,
                ..BoardExtras::default()
            },
            handle_style: HandleStyle::Lift,
            brass_feet: true,
            ..CartConfig::default()
        };
        let lines = extras_fees(&config, &PriceTable::standard());
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Juice groove", "Brass feet", "Third strip", "Lift handles"]
        );
        let total: Cents = lines.iter().map(|l| l.amount_cents).sum();
        assert_eq!(total, Cents::new(1500 + 2400 + 2000 + 1800));
    }

    #[test]
    fn test_price_config_sums_board_and_extras() {
        let mut config = CartConfig {
            size: BoardSize::Small,
            brass_feet: true,
            ..CartConfig::default()
        };
        config.board_data.strips[0][0] = Some("maple".to_string());

        let breakdown = price_config(&config, &PriceTable::standard());
        assert_eq!(breakdown.base_cents, Cents::new(15000));
        assert_eq!(breakdown.variable_cents, Cents::new(100));
        assert_eq!(breakdown.extras_cents, Cents::new(2400));
        assert_eq!(breakdown_total(&breakdown), Cents::new(17500));
    }
}
