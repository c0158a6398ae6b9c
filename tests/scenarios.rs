use std::sync::Arc;
use storefront::{
    checkout::CheckoutState,
    entry::EntryDraft,
    error::{CheckoutError, StorefrontError},
    pricing,
    service::StorefrontService,
};
use tempfile::tempdir; // Use for test db cleanup.

const EPS: f64 = 1e-6;

#[tokio::test(start_paused = true)]
async fn seed_browse_and_checkout() -> anyhow::Result<()> {
    // Sled uses file-based locking to prevent concurrent access, so each test
    // gets its own database. The db is created on temp for simplified cleanup.
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("seed_browse_and_checkout.db"))?;
    let db = Arc::new(db);

    let mut shop = StorefrontService::open(db)?;

    // a fresh db is seeded with the three example entries
    let ids: Vec<u64> = shop.list_catalog().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    shop.add_to_cart(1)?;
    shop.add_to_cart(1)?;
    shop.add_to_cart(3)?;

    let headphones = shop.entry(1).unwrap().clone();
    let mouse = shop.entry(3).unwrap().clone();
    let expected_total =
        pricing::final_unit_price(&headphones) * 2.0 + pricing::final_unit_price(&mouse);

    let summary = shop.cart_summary();
    assert_eq!(summary.item_count, 3);
    assert!((summary.total - expected_total).abs() < EPS);

    let receipt = shop.checkout().await?;

    assert_eq!(shop.checkout_state(), CheckoutState::Confirmed);
    assert_eq!(receipt.item_count, 3);
    assert!((receipt.total - expected_total).abs() < EPS);
    // the cart is cleared only after confirmation
    assert!(shop.list_cart_lines().is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_cart_checkout_is_rejected_upfront() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("empty_cart_checkout.db"))?;
    let mut shop = StorefrontService::open(Arc::new(db))?;

    let result = shop.checkout().await;

    assert!(matches!(
        result,
        Err(StorefrontError::Checkout(CheckoutError::EmptyCart))
    ));
    assert_eq!(shop.checkout_state(), CheckoutState::Idle);

    Ok(())
}

#[test]
fn price_edit_retroactively_changes_totals() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("price_edit.db"))?;
    let mut shop = StorefrontService::open(Arc::new(db))?;

    shop.add_to_cart(3)?;
    shop.set_quantity(3, 2)?;
    let before = shop.cart_summary();

    // halve the price of the entry already sitting in the cart
    shop.update_entry(
        3,
        EntryDraft::new()
            .set_name("7200 DPI Gaming Mouse")
            .set_description("Ergonomic mouse with 7 programmable buttons.")
            .set_base_price(12999.5)
            .set_discount_percent(0.0),
    )?;
    let after = shop.cart_summary();

    assert!((after.total - before.total / 2.0).abs() < EPS);
    assert_eq!(after.item_count, before.item_count);

    Ok(())
}

#[test]
fn deleting_an_entry_cascades_into_the_cart() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("delete_cascade.db"))?;
    let mut shop = StorefrontService::open(Arc::new(db))?;

    shop.add_to_cart(1)?;
    shop.add_to_cart(2)?;
    assert_eq!(shop.list_cart_lines().len(), 2);

    let removed = shop.remove_entry(2)?;
    assert_eq!(removed.id, 2);

    // exactly the referencing line is gone, in the same turn
    let lines = shop.list_cart_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].entry.id, 1);

    // removing an entry never in the cart leaves the cart untouched
    shop.remove_entry(3)?;
    assert_eq!(shop.list_cart_lines().len(), 1);

    Ok(())
}

#[test]
fn catalog_round_trips_across_reopen() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("catalog_round_trip.db"))?;
    let db = Arc::new(db);

    let first_entries = {
        let mut shop = StorefrontService::open(db.clone())?;
        shop.add_entry(
            EntryDraft::new()
                .set_name("USB-C Hub")
                .set_description("7-in-1 hub with HDMI output and card reader.")
                .set_base_price(18999.0)
                .set_discount_percent(15.0)
                .set_image_ref("https://example.com/hub.webp"),
        )?;
        shop.remove_entry(2)?;
        shop.list_catalog().to_vec()
    };

    // a second session over the same db sees the identical ordered sequence
    let shop = StorefrontService::open(db)?;
    assert_eq!(shop.list_catalog(), first_entries.as_slice());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn rejected_checkout_preserves_the_cart() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("rejected_checkout.db"))?;
    let mut shop = StorefrontService::open(Arc::new(db))?;

    // a giveaway entry prices the whole cart at zero
    let freebie = shop.add_entry(
        EntryDraft::new()
            .set_name("Sticker Pack")
            .set_description("Free with any visit.")
            .set_base_price(0.0)
            .set_discount_percent(0.0),
    )?;
    shop.clear_cart()?;
    shop.add_to_cart(freebie.id)?;

    let result = shop.checkout().await;
    assert!(matches!(
        result,
        Err(StorefrontError::Checkout(CheckoutError::Rejected(_)))
    ));
    assert_eq!(shop.checkout_state(), CheckoutState::Rejected);
    // the cart is untouched so the user may retry
    assert_eq!(shop.list_cart_lines().len(), 1);

    // pricing the entry fixes the retry
    shop.update_entry(
        freebie.id,
        EntryDraft::new()
            .set_name("Sticker Pack")
            .set_description("No longer free.")
            .set_base_price(499.0)
            .set_discount_percent(0.0),
    )?;

    let receipt = shop.checkout().await?;
    assert_eq!(shop.checkout_state(), CheckoutState::Confirmed);
    assert_eq!(receipt.item_count, 1);
    assert!(shop.list_cart_lines().is_empty());

    Ok(())
}

#[test]
fn reseed_restores_the_example_entries() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = sled::open(temp_dir.path().join("reseed.db"))?;
    let mut shop = StorefrontService::open(Arc::new(db))?;

    let extra = shop.add_entry(
        EntryDraft::new()
            .set_name("USB-C Hub")
            .set_description("7-in-1 hub with HDMI output and card reader.")
            .set_base_price(18999.0)
            .set_discount_percent(15.0),
    )?;
    shop.add_to_cart(extra.id)?;
    shop.remove_entry(1)?;

    shop.reseed()?;

    let ids: Vec<u64> = shop.list_catalog().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    // the cart line for the no-longer-existing extra entry is dropped
    assert!(shop.list_cart_lines().is_empty());

    Ok(())
}
