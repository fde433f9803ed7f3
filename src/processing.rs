use crate::types::{AttractionRecord, Category, CategoryBucket};
use tracing::debug;

/// Exact, case-sensitive match on the raw `Attraction Type`; anything else is `Others`.
pub fn classify(raw: &str) -> Category {
    match raw {
        "Historical Site" => Category::HistoricalSite,
        "Natural Wonder" => Category::NaturalWonder,
        "Amusement Park" => Category::AmusementPark,
        "Architectural Landmark" => Category::ArchitecturalLandmark,
        _ => Category::Others,
    }
}

/// Records partitioned into one bucket per category, in `Category::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedAttractions {
    pub buckets: [CategoryBucket; 5],
}

impl GroupedAttractions {
    pub fn bucket(&self, category: Category) -> &CategoryBucket {
        &self.buckets[category.index()]
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(CategoryBucket::count).sum()
    }

    pub fn counts(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.buckets.iter().map(|b| (b.category, b.count()))
    }
}

pub fn group_records(records: Vec<AttractionRecord>) -> GroupedAttractions {
    let mut buckets = Category::ALL.map(CategoryBucket::new);

    for record in records {
        let category = classify(&record.category);
        buckets[category.index()].records.push(record);
    }

    let grouped = GroupedAttractions { buckets };
    debug!("Grouped {} attractions into {} buckets", grouped.total(), grouped.buckets.len());
    grouped
}
