use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of products a transaction can be for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    A,
    B,
    C,
    D,
}

impl Product {
    pub const ALL: [Product; 4] = [Product::A, Product::B, Product::C, Product::D];

    /// The label used in charts and the spreadsheet.
    pub fn label(&self) -> &'static str {
        match self {
            Product::A => "Product A",
            Product::B => "Product B",
            Product::C => "Product C",
            Product::D => "Product D",
        }
    }
}

/// The fixed set of sales regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    pub fn label(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
