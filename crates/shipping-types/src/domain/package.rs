use serde::{Deserialize, Serialize};

/// Line-item dimensions as sent by the platform, in centimeters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
}

/// One cart line item from the platform's rates request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub grams: u32,
    #[serde(default)]
    pub free_shipping: bool,
}

/// A single unit package entry; weight in kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageItem {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub weight_kg: f64,
}

/// The aggregate box the carrier quotes against. Items are kept in insertion
/// order; the carrier box is sized by stacking heights and taking the widest
/// footprint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxPackage {
    items: Vec<PackageItem>,
}

impl BoxPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of cart items into a package, appending `quantity`
    /// identical unit entries per item. Quantity 0 contributes nothing.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Self {
        let mut package = Self::new();
        for item in items {
            package.add_item(item);
        }
        package
    }

    pub fn add_item(&mut self, item: &CartItem) {
        let weight_kg = f64::from(item.grams) / 1000.0;
        for _ in 0..item.quantity {
            self.items.push(PackageItem {
                height: item.dimensions.height,
                width: item.dimensions.width,
                depth: item.dimensions.depth,
                weight_kg,
            });
        }
    }

    pub fn items(&self) -> &[PackageItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight_kg(&self) -> f64 {
        self.items.iter().map(|i| i.weight_kg).sum()
    }

    pub fn total_volume_cm3(&self) -> f64 {
        self.items.iter().map(|i| i.height * i.width * i.depth).sum()
    }

    /// Stacked box height in centimeters.
    pub fn height(&self) -> f64 {
        self.items.iter().map(|i| i.height).sum()
    }

    /// Widest unit width in centimeters.
    pub fn width(&self) -> f64 {
        self.items.iter().map(|i| i.width).fold(0.0, f64::max)
    }

    /// Deepest unit depth in centimeters.
    pub fn depth(&self) -> f64 {
        self.items.iter().map(|i| i.depth).fold(0.0, f64::max)
    }
}
