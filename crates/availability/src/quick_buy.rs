use crate::product::Product;

/// Whether the one-click purchase path must be suppressed.
///
/// True only for multi-variant products where some variant is out of stock and
/// the product carries at least one preorder-family tag; the buyer then has to
/// go through variant selection.
pub fn compute_quick_buy_disabled(product: &Product, tags: &[String]) -> bool {
    product.variants.len() > 1
        && product.variants.iter().any(|v| v.facts.out_of_stock())
        && !tags.is_empty()
}
