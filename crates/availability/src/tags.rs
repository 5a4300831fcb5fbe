//! Product tag aggregation.

use crate::status::StatusCategory;

/// Product tags for a set of variant categories.
///
/// One tag per preorder-family category held by at least one variant, in
/// category declaration order. `InStock` never produces a tag.
pub fn aggregate_tags<I>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = StatusCategory>,
{
    let mut present = [false; StatusCategory::ALL.len()];
    for category in categories {
        present[category as usize] = true;
    }

    StatusCategory::ALL
        .iter()
        .zip(present)
        .filter(|(_, held)| *held)
        .filter_map(|(category, _)| category.tag())
        .map(str::to_string)
        .collect()
}
