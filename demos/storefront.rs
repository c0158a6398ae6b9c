use std::sync::Arc;
use storefront::{clock, entry::EntryDraft, pricing, service::StorefrontService, utils};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = sled::open("storefront-demo-db")?;

    if !db.is_empty() {
        db.clear()?;
    }

    let mut shop = StorefrontService::open(Arc::new(db))?;

    println!("Catalog:");
    for entry in shop.list_catalog() {
        println!(
            "  [{}] {} — {} incl. tax",
            entry.id,
            entry.name,
            utils::format_currency(pricing::final_unit_price(entry))
        );
    }

    let hub = shop.add_entry(
        EntryDraft::new()
            .set_name("USB-C Hub")
            .set_description("7-in-1 hub with HDMI output and card reader.")
            .set_base_price(18999.0)
            .set_discount_percent(15.0),
    )?;
    println!("Added entry [{}] {}", hub.id, hub.name);

    shop.add_to_cart(1)?;
    shop.add_to_cart(1)?;
    shop.add_to_cart(hub.id)?;

    let summary = shop.cart_summary();
    println!(
        "Cart: {} items, total {}",
        summary.item_count,
        utils::format_currency(summary.total)
    );

    let receipt = shop.checkout().await?;
    println!(
        "Payment confirmed: {} for {} items",
        utils::format_currency(receipt.total),
        receipt.item_count
    );

    match clock::fetch_zone_time("America/Argentina/Buenos_Aires") {
        Ok(now) => println!("Buenos Aires time: {}", clock::format_zone_time(&now)),
        Err(_) => println!("Could not fetch the Buenos Aires time"),
    }

    Ok(())
}
