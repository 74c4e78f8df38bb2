use heartwood_types::{
    BoardExtras, BoardLayout, BoardSize, CartBreakdown, CartConfig, CartItem, Cents, EdgeProfile,
    ExtrasLine, HandleStyle, RowOrder, WoodCell, STRIP_COUNT,
};
use serde_json::Value;

/// Resolve a value that may itself be a JSON-encoded string. Client storage
/// sometimes double-encodes nested objects; one level of unwrapping is
/// enough in practice.
fn unwrap_json_string(raw: &Value) -> Value {
    match raw {
        Value::String(s) => serde_json::from_str(s).unwrap_or(Value::Null),
        other => other.clone(),
    }
}

/// Non-negative integer cents from an untrusted value. Accepts integers,
/// floats (truncated) and numeric strings; everything else is zero.
fn coerce_cents(raw: &Value) -> Cents {
    match raw {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Cents::new(u)
            } else if let Some(f) = n.as_f64() {
                Cents::new(if f.is_finite() && f > 0.0 { f as u64 } else { 0 })
            } else {
                Cents::zero()
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| Cents::new(f as u64))
            .unwrap_or(Cents::zero()),
        _ => Cents::zero(),
    }
}

/// Quantity with a floor of 1.
fn coerce_quantity(raw: &Value) -> u32 {
    let n = match raw {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    n.unwrap_or(1).clamp(1, u64::from(u32::MAX)) as u32
}

fn coerce_string(raw: &Value) -> String {
    raw.as_str().unwrap_or_default().to_string()
}

fn coerce_bool(raw: &Value) -> bool {
    raw.as_bool().unwrap_or(false)
}

fn coerce_u32(raw: &Value) -> u32 {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .map(|u| u.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Parse untrusted cart-item JSON into validated lines.
///
/// Accepts anything; non-arrays yield an empty cart. Entries without a
/// non-empty string `id` are dropped. Money and quantity are clamped,
/// nested breakdown/config sanitized with the same default-on-malformed
/// policy.
pub fn coerce_items(raw: &Value) -> Vec<CartItem> {
    let raw = unwrap_json_string(raw);
    let Value::Array(entries) = raw else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id")?.as_str()?;
            if id.is_empty() {
                return None;
            }
            let breakdown = entry
                .get("breakdown")
                .filter(|v| !v.is_null())
                .map(sanitize_breakdown);
            let config = entry
                .get("config")
                .filter(|v| !v.is_null())
                .map(sanitize_cart_config);
            let image = entry
                .get("image")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            Some(CartItem {
                id: id.to_string(),
                name: coerce_string(entry.get("name").unwrap_or(&Value::Null)),
                unit_price: coerce_cents(entry.get("unitPrice").unwrap_or(&Value::Null)),
                quantity: coerce_quantity(entry.get("quantity").unwrap_or(&Value::Null)),
                breakdown,
                config,
                image,
            })
        })
        .collect()
}

/// Sanitize a price breakdown. All monetary outputs are non-negative
/// integers; malformed detail lines are skipped.
pub fn sanitize_breakdown(raw: &Value) -> CartBreakdown {
    let raw = unwrap_json_string(raw);
    let detail = raw
        .get("extrasDetail")
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(|line| {
                    let label = line.get("label")?.as_str()?;
                    Some(ExtrasLine::new(
                        label,
                        coerce_cents(line.get("amountCents").unwrap_or(&Value::Null)),
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    CartBreakdown {
        base_cents: coerce_cents(raw.get("baseCents").unwrap_or(&Value::Null)),
        variable_cents: coerce_cents(raw.get("variableCents").unwrap_or(&Value::Null)),
        extras_cents: coerce_cents(raw.get("extrasCents").unwrap_or(&Value::Null)),
        extras_detail: detail,
    }
}

/// Sanitize board extras. Unknown edge profiles fall back to square.
pub fn sanitize_board_extras(raw: &Value) -> BoardExtras {
    let raw = unwrap_json_string(raw);
    BoardExtras {
        edge_profile: raw
            .get("edgeProfile")
            .and_then(Value::as_str)
            .and_then(EdgeProfile::parse)
            .unwrap_or_default(),
        border_radius: coerce_u32(raw.get("borderRadius").unwrap_or(&Value::Null)),
        chamfer_size: coerce_u32(raw.get("chamferSize").unwrap_or(&Value::Null)),
        groove_enabled: coerce_bool(raw.get("grooveEnabled").unwrap_or(&Value::Null)),
    }
}

fn coerce_cell(raw: &Value) -> WoodCell {
    raw.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Sanitize a board layout against the dimensions implied by `size`.
///
/// Strips are normalized to exactly 3 rows of `columns(size)` cells; the
/// row order to exactly `rows(size)` entries with strip numbers clamped to
/// the active range. Anything unparseable becomes empty cells or the
/// alternating default order.
pub fn sanitize_board_layout(raw: &Value, size: BoardSize, strip3_enabled: bool) -> BoardLayout {
    let raw = unwrap_json_string(raw);
    let columns = size.columns();

    let mut strips: Vec<Vec<WoodCell>> = raw
        .get("strips")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .take(STRIP_COUNT)
                .map(|row| {
                    let mut cells: Vec<WoodCell> = row
                        .as_array()
                        .map(|cells| cells.iter().take(columns).map(coerce_cell).collect())
                        .unwrap_or_default();
                    cells.resize(columns, None);
                    cells
                })
                .collect()
        })
        .unwrap_or_default();
    strips.resize(STRIP_COUNT, vec![None; columns]);

    let order = raw
        .get("order")
        .and_then(Value::as_array)
        .map(|entries| {
            let mut order: Vec<RowOrder> = entries
                .iter()
                .take(size.rows())
                .map(|entry| {
                    let strip_no = entry
                        .get("stripNo")
                        .and_then(Value::as_u64)
                        .unwrap_or(1)
                        .min(u64::from(u8::MAX)) as u8;
                    RowOrder::new(
                        RowOrder::clamp_strip(strip_no, strip3_enabled),
                        coerce_bool(entry.get("reflected").unwrap_or(&Value::Null)),
                    )
                })
                .collect();
            let default = BoardLayout::default_order(size);
            order.extend_from_slice(&default[order.len()..]);
            order
        })
        .unwrap_or_else(|| BoardLayout::default_order(size));

    BoardLayout { strips, order }
}

/// Sanitize a full frozen cart configuration.
pub fn sanitize_cart_config(raw: &Value) -> CartConfig {
    let raw = unwrap_json_string(raw);
    let size = raw
        .get("size")
        .and_then(Value::as_str)
        .and_then(BoardSize::parse)
        .unwrap_or_default();
    let strip3_enabled = coerce_bool(raw.get("strip3Enabled").unwrap_or(&Value::Null));

    CartConfig {
        size,
        strip3_enabled,
        board_data: sanitize_board_layout(
            raw.get("boardData").unwrap_or(&Value::Null),
            size,
            strip3_enabled,
        ),
        extras: sanitize_board_extras(raw.get("extras").unwrap_or(&Value::Null)),
        edge_option: raw
            .get("edgeOption")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        handle_style: raw
            .get("handleStyle")
            .and_then(Value::as_str)
            .and_then(HandleStyle::parse)
            .unwrap_or_default(),
        brass_feet: coerce_bool(raw.get("brassFeet").unwrap_or(&Value::Null)),
    }
}
