//! Pure pricing computations: discount, tax, per-line and cart-wide totals
use super::entry::CatalogEntry;

/// Tax applied on top of the discounted price, in percent.
pub const TAX_RATE_PERCENT: f64 = 21.0;

/// Base price after the percentage discount, pre-tax. Clamped at zero so a
/// discount can never produce a negative price.
pub fn discounted_price(entry: &CatalogEntry) -> f64 {
    if entry.discount_percent > 0.0 {
        let discount = entry.base_price * entry.discount_percent / 100.0;
        (entry.base_price - discount).max(0.0)
    } else {
        entry.base_price
    }
}

/// Tax owed on a single unit at the discounted price
pub fn unit_tax(entry: &CatalogEntry) -> f64 {
    discounted_price(entry) * TAX_RATE_PERCENT / 100.0
}

/// Discounted price plus tax, per single unit
pub fn final_unit_price(entry: &CatalogEntry) -> f64 {
    discounted_price(entry) + unit_tax(entry)
}

/// Per-line aggregates for one cart line, always recomputed from the live
/// entry fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTotals {
    pub subtotal_final: f64,
    pub subtotal_tax: f64,
    pub subtotal_discount: f64,
}

pub fn line_totals(entry: &CatalogEntry, quantity: u32) -> LineTotals {
    let quantity = f64::from(quantity);
    let unit_discount = entry.base_price - discounted_price(entry);

    LineTotals {
        subtotal_final: final_unit_price(entry) * quantity,
        subtotal_tax: unit_tax(entry) * quantity,
        subtotal_discount: unit_discount * quantity,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartSummary {
    pub total: f64,
    pub item_count: u64,
}

/// Folds lines left to right in the order given so test expectations are
/// reproducible despite floating-point summation.
pub fn summarize<'a, I>(lines: I) -> CartSummary
where
    I: IntoIterator<Item = (&'a CatalogEntry, u32)>,
{
    let mut summary = CartSummary::default();
    for (entry, quantity) in lines {
        summary.total += line_totals(entry, quantity).subtotal_final;
        summary.item_count += u64::from(quantity);
    }
    summary
}
