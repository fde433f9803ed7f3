use geo::Point;

/// Attraction categories, in the order their layers and statistics appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    HistoricalSite,
    NaturalWonder,
    AmusementPark,
    ArchitecturalLandmark,
    Others,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::HistoricalSite,
        Category::NaturalWonder,
        Category::AmusementPark,
        Category::ArchitecturalLandmark,
        Category::Others,
    ];

    /// Label as it appears in the `Attraction Type` column and on the page.
    pub fn label(self) -> &'static str {
        match self {
            Category::HistoricalSite => "Historical Site",
            Category::NaturalWonder => "Natural Wonder",
            Category::AmusementPark => "Amusement Park",
            Category::ArchitecturalLandmark => "Architectural Landmark",
            Category::Others => "Others",
        }
    }

    /// Marker icon color name.
    pub fn color(self) -> &'static str {
        match self {
            Category::HistoricalSite => "blue",
            Category::NaturalWonder => "green",
            Category::AmusementPark => "red",
            Category::ArchitecturalLandmark => "orange",
            Category::Others => "gray",
        }
    }

    /// Position within `Category::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttractionRecord {
    pub name: String,
    pub location: String,
    // x = longitude, y = latitude
    pub coordinates: Point<f64>,
    pub description: String,
    pub category: String,
}

impl AttractionRecord {
    pub fn latitude(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.x()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: Category,
    pub color: &'static str,
    pub records: Vec<AttractionRecord>,
}

impl CategoryBucket {
    pub fn new(category: Category) -> Self {
        CategoryBucket {
            category,
            color: category.color(),
            records: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_indexed_in_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_colors_are_distinct() {
        let mut colors: Vec<&str> = Category::ALL.iter().map(|c| c.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 5);
        assert_eq!(Category::Others.color(), "gray");
    }

    #[test]
    fn test_coordinates_accessors() {
        let record = AttractionRecord {
            name: "A".into(),
            location: "X".into(),
            coordinates: Point::new(101.5, 3.1),
            description: String::new(),
            category: String::new(),
        };
        assert_eq!(record.latitude(), 3.1);
        assert_eq!(record.longitude(), 101.5);
    }
}
