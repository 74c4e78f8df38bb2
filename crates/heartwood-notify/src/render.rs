//! Message renderers over the reconstructed order summary.

use crate::transport::{EmailMessage, SmsMessage};
use heartwood_types::OrderSummary;
use std::fmt::Write;

fn item_lines(summary: &OrderSummary) -> String {
    let mut out = String::new();
    for item in &summary.items {
        let _ = writeln!(
            out,
            "  {} x{} — {} ({} each)",
            item.name, item.quantity, item.line_total_formatted, item.unit_price_formatted
        );
    }
    if out.is_empty() {
        out.push_str("  (no items recorded)\n");
    }
    out
}

fn address_block(label: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    format!("{label}:\n  {}\n", lines.join("\n  "))
}

/// Merchant-facing order email.
pub fn render_merchant_email(summary: &OrderSummary, to: &str) -> EmailMessage {
    let mut text = format!(
        "New order {} — {}\n\nItems:\n{}",
        summary.order_id,
        summary.amount_formatted,
        item_lines(summary)
    );
    if !summary.contact_name.is_empty() || !summary.contact_email.is_empty() {
        let _ = writeln!(
            text,
            "\nCustomer: {} {}",
            summary.contact_name, summary.contact_email
        );
    }
    text.push_str(&address_block("Ship to", &summary.shipping_address_lines));
    if !summary.shipping_method.is_empty() {
        let _ = writeln!(text, "Shipping method: {}", summary.shipping_method);
    }
    if !summary.promo_code.is_empty() {
        let _ = writeln!(text, "Promo code: {}", summary.promo_code);
    }
    if !summary.notes.is_empty() {
        let _ = writeln!(text, "Notes: {}", summary.notes);
    }

    EmailMessage {
        to: to.to_string(),
        subject: format!(
            "New order {} — {}",
            summary.order_id, summary.amount_formatted
        ),
        text,
        html: None,
    }
}

/// Merchant-facing SMS: one line, just enough to act on.
pub fn render_merchant_sms(summary: &OrderSummary, to: &str) -> SmsMessage {
    SmsMessage {
        to: to.to_string(),
        body: format!(
            "New order {} for {} ({} item{})",
            summary.order_id,
            summary.amount_formatted,
            summary.items.len(),
            if summary.items.len() == 1 { "" } else { "s" }
        ),
    }
}

/// Customer-facing confirmation email.
pub fn render_customer_email(summary: &OrderSummary, to: &str) -> EmailMessage {
    let greeting = if summary.contact_name.is_empty() {
        "Hi,".to_string()
    } else {
        format!("Hi {},", summary.contact_name)
    };
    let mut text = format!(
        "{greeting}\n\nThanks for your order! Here's what we have:\n\nItems:\n{}\nTotal: {}\n",
        item_lines(summary),
        summary.amount_formatted
    );
    text.push_str(&address_block("Shipping to", &summary.shipping_address_lines));
    text.push_str("\nWe'll be in touch when your board ships.\n");

    EmailMessage {
        to: to.to_string(),
        subject: format!("Your order {} is confirmed", summary.order_id),
        text,
        html: None,
    }
}
