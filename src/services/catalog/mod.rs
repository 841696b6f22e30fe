use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::models::{Category, ClothingItem, InvalidCategory};
use crate::services::categorizer::categorize;

mod samples;

pub(crate) use samples::sample_items;

/// Error types for wardrobe operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),

    #[error("Item with ID '{0}' not found")]
    ItemNotFound(String),
}

/// Where a newly added item ended up
#[derive(Debug, Clone, PartialEq)]
pub struct AddedItem {
    pub item_id: String,
    pub category: Category,
    /// Item count of the category after the add
    pub total_items: usize,
}

/// Outcome of removing an item
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedItem {
    pub item: ClothingItem,
    /// Item count of the category after the delete
    pub remaining_items: usize,
}

/// In-memory wardrobe, bucketed by category in insertion order
#[derive(Debug, Clone)]
pub struct Catalog {
    items: BTreeMap<Category, Vec<ClothingItem>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty wardrobe with every category present
    pub fn new() -> Self {
        Self {
            items: Category::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Creates a wardrobe pre-filled with the demo shirt, jeans and shoes
    pub fn with_samples() -> Self {
        let mut catalog = Self::new();
        for item in samples::sample_items() {
            catalog.bucket_mut(item.category).push(item);
        }
        catalog
    }

    /// Adds an item, classifying it from its name when no category is given
    pub fn add(
        &mut self,
        image: String,
        name: String,
        category: Option<&str>,
    ) -> Result<AddedItem, CatalogError> {
        let category = match category {
            Some(explicit) => explicit.parse::<Category>()?,
            None => categorize(&name),
        };

        let item = ClothingItem::new(name, image, category);
        let item_id = item.id.clone();

        let bucket = self.bucket_mut(category);
        bucket.push(item);

        Ok(AddedItem {
            item_id,
            category,
            total_items: bucket.len(),
        })
    }

    /// Full wardrobe contents, every category included
    pub fn list(&self) -> &BTreeMap<Category, Vec<ClothingItem>> {
        &self.items
    }

    /// Items of one category in display order
    pub fn items(&self, category: Category) -> &[ClothingItem] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of items across all categories
    pub fn total_items(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Renames an item in place
    ///
    /// The item is looked up only within `category`; an id that lives in a
    /// different category is reported as not found.
    pub fn update(
        &mut self,
        item_id: &str,
        new_name: String,
        category: &str,
    ) -> Result<Category, CatalogError> {
        let category = category.parse::<Category>()?;

        let item = self
            .bucket_mut(category)
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CatalogError::ItemNotFound(item_id.to_string()))?;
        item.name = new_name;

        Ok(category)
    }

    /// Removes an item, keeping the order of the remaining ones
    ///
    /// Lookup is scoped to `category` the same way as [`Catalog::update`].
    pub fn delete(&mut self, item_id: &str, category: &str) -> Result<DeletedItem, CatalogError> {
        let category = category.parse::<Category>()?;

        let bucket = self.bucket_mut(category);
        let position = bucket
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CatalogError::ItemNotFound(item_id.to_string()))?;
        let item = bucket.remove(position);

        Ok(DeletedItem {
            item,
            remaining_items: bucket.len(),
        })
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<ClothingItem> {
        self.items.entry(category).or_default()
    }
}

/// Shared handle to the wardrobe
///
/// One lock guards every operation. Callers must not hold the guard across
/// an AI call.
#[derive(Clone, Default)]
pub struct CatalogStore {
    inner: Arc<Mutex<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(catalog: &Catalog, category: Category) -> Vec<String> {
        catalog
            .items(category)
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    #[test]
    fn test_new_catalog_has_all_categories() {
        let catalog = Catalog::new();
        assert_eq!(catalog.list().len(), Category::ALL.len());
        assert_eq!(catalog.total_items(), 0);
    }

    #[test]
    fn test_with_samples() {
        let catalog = Catalog::with_samples();
        assert_eq!(catalog.items(Category::Shirts).len(), 1);
        assert_eq!(catalog.items(Category::Pants).len(), 1);
        assert_eq!(catalog.items(Category::Shoes).len(), 1);
        assert_eq!(catalog.total_items(), 3);
        assert!(catalog.items(Category::Shirts)[0].is_sample);
    }

    #[test]
    fn test_add_with_explicit_category() {
        let mut catalog = Catalog::new();
        let added = catalog
            .add("img".to_string(), "Mystery Item".to_string(), Some("watches"))
            .unwrap();

        assert_eq!(added.category, Category::Watches);
        assert_eq!(added.total_items, 1);
        assert_eq!(catalog.items(Category::Watches)[0].id, added.item_id);
    }

    #[test]
    fn test_add_categorizes_from_name() {
        let mut catalog = Catalog::new();
        let added = catalog
            .add("img".to_string(), "Blue Denim Jeans".to_string(), None)
            .unwrap();
        assert_eq!(added.category, Category::Pants);
    }

    #[test]
    fn test_add_invalid_category() {
        let mut catalog = Catalog::new();
        let result = catalog.add("img".to_string(), "Red Hat".to_string(), Some("hats"));
        assert_eq!(
            result,
            Err(CatalogError::InvalidCategory(InvalidCategory("hats".to_string())))
        );
        assert_eq!(catalog.total_items(), 0);
    }

    #[test]
    fn test_ids_unique_across_categories() {
        let mut catalog = Catalog::new();
        let mut ids = HashSet::new();
        for (i, category) in Category::ALL.iter().cycle().take(70).enumerate() {
            let added = catalog
                .add(String::new(), format!("item {}", i), Some(category.as_str()))
                .unwrap();
            assert!(ids.insert(added.item_id));
        }
        assert_eq!(catalog.total_items(), 70);
    }

    #[test]
    fn test_update_keeps_position_and_siblings() {
        let mut catalog = Catalog::new();
        let first = catalog.add(String::new(), "Shirt A".to_string(), None).unwrap();
        let second = catalog.add(String::new(), "Shirt B".to_string(), None).unwrap();
        let third = catalog.add(String::new(), "Shirt C".to_string(), None).unwrap();

        let category = catalog
            .update(&second.item_id, "Linen Shirt".to_string(), "shirts")
            .unwrap();
        assert_eq!(category, Category::Shirts);

        let shirts = catalog.items(Category::Shirts);
        assert_eq!(shirts[0].id, first.item_id);
        assert_eq!(shirts[1].id, second.item_id);
        assert_eq!(shirts[2].id, third.item_id);
        assert_eq!(names(&catalog, Category::Shirts), vec!["Shirt A", "Linen Shirt", "Shirt C"]);
    }

    #[test]
    fn test_update_only_touches_name() {
        let mut catalog = Catalog::new();
        let added = catalog.add("photo".to_string(), "Shirt".to_string(), None).unwrap();
        let before = catalog.items(Category::Shirts)[0].clone();

        catalog.update(&added.item_id, "Oxford Shirt".to_string(), "shirts").unwrap();

        let after = &catalog.items(Category::Shirts)[0];
        assert_eq!(after.name, "Oxford Shirt");
        assert_eq!(after.image, before.image);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.category, before.category);
    }

    #[test]
    fn test_update_missing_item() {
        let mut catalog = Catalog::new();
        let result = catalog.update("nope", "x".to_string(), "shirts");
        assert_eq!(result, Err(CatalogError::ItemNotFound("nope".to_string())));
    }

    #[test]
    fn test_update_invalid_category() {
        let mut catalog = Catalog::new();
        let result = catalog.update("nope", "x".to_string(), "dresses");
        assert!(matches!(result, Err(CatalogError::InvalidCategory(_))));
    }

    #[test]
    fn test_lookup_scoped_to_category() {
        let mut catalog = Catalog::new();
        let jeans = catalog.add(String::new(), "Jeans".to_string(), None).unwrap();

        let update = catalog.update(&jeans.item_id, "Chinos".to_string(), "shirts");
        assert_eq!(update, Err(CatalogError::ItemNotFound(jeans.item_id.clone())));

        let delete = catalog.delete(&jeans.item_id, "shoes");
        assert_eq!(delete, Err(CatalogError::ItemNotFound(jeans.item_id.clone())));

        assert_eq!(names(&catalog, Category::Pants), vec!["Jeans"]);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut catalog = Catalog::new();
        let a = catalog.add(String::new(), "Boots A".to_string(), None).unwrap();
        let b = catalog.add(String::new(), "Boots B".to_string(), None).unwrap();
        let c = catalog.add(String::new(), "Boots C".to_string(), None).unwrap();

        let deleted = catalog.delete(&b.item_id, "shoes").unwrap();
        assert_eq!(deleted.item.name, "Boots B");
        assert_eq!(deleted.remaining_items, 2);

        let remaining: Vec<&str> = catalog
            .items(Category::Shoes)
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(remaining, vec![a.item_id.as_str(), c.item_id.as_str()]);
    }

    #[test]
    fn test_delete_missing_item() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.delete("ghost", "socks"),
            Err(CatalogError::ItemNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_store_shares_state_between_clones() {
        let store = CatalogStore::new(Catalog::new());
        let handle = store.clone();

        handle
            .lock()
            .await
            .add(String::new(), "Leather belt".to_string(), None)
            .unwrap();

        assert_eq!(store.lock().await.items(Category::Accessories).len(), 1);
    }
}
