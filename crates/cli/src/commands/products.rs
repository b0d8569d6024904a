//! Catalog commands: list, show, update, delete, clear.
//!
//! All of these require an open session, mirroring the viewer's login gate.

use shopwindow_catalog::filters;
use shopwindow_core::{Product, ProductId, ProductPatch};

use super::{CliError, Context};

/// List the collection, optionally filtered by title substring and category.
pub async fn list(search: &str, category: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.require_session().await?;

    let products = ctx.client.get_collection().await?;
    let visible = filters::filter(&products, search, category);

    if visible.is_empty() {
        println!("no products match");
        return Ok(());
    }

    println!(
        "{} of {} products (categories: {})",
        visible.len(),
        products.len(),
        filters::categories(&products).join(", ")
    );
    for product in visible {
        print_row(product);
    }
    Ok(())
}

/// Show a single product in full.
pub async fn show(id: u64) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.require_session().await?;

    let product = ctx.client.get_by_id(ProductId::new(id)).await?;
    println!("{:>4}  {}", product.id.as_u64(), product.title);
    println!("      price:       {}", product.price);
    println!("      category:    {}", product.category);
    println!(
        "      rating:      {} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    println!("      image:       {}", product.image);
    println!("      {}", product.description);
    Ok(())
}

/// Apply a field-wise update to the local mirror.
pub async fn update(id: u64, patch: ProductPatch) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.require_session().await?;

    if patch.is_empty() {
        println!("nothing to update");
        return Ok(());
    }

    let updated = ctx.client.update(ProductId::new(id), patch).await?;
    println!("updated:");
    print_row(&updated);
    Ok(())
}

/// Delete a product from the local mirror.
pub async fn delete(id: u64) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.require_session().await?;

    ctx.client.delete(ProductId::new(id)).await?;
    println!("deleted {id}");
    Ok(())
}

/// Drop the mirror; the next `list` fetches from the remote API again.
pub async fn clear() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.require_session().await?;

    ctx.client.clear().await?;
    println!("mirror cleared");
    Ok(())
}

fn print_row(product: &Product) {
    println!(
        "{:>4}  {:<50}  {:>10}  [{}]",
        product.id.as_u64(),
        product.title,
        product.price,
        product.category
    );
}
