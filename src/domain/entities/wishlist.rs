//! Wishlist entities and their transition function.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product reference saved to a wishlist.
///
/// The store only looks at `id`; the remaining fields are display metadata
/// carried through persistence unchanged. Stored records are read loosely:
/// a display field of an unexpected type stays in `extra` under its own key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct WishlistItem {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<Value> for WishlistItem {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err("wishlist item must be an object".to_string());
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err("wishlist item needs a string or numeric id".to_string()),
        };

        let text = |v: &Value| v.as_str().map(ToString::to_string);
        Ok(Self {
            id,
            name: take_field(&mut fields, "name", text).unwrap_or_default(),
            price: take_field(&mut fields, "price", Value::as_f64),
            image: take_field(&mut fields, "image", text),
            brand: take_field(&mut fields, "brand", text),
            size: take_field(&mut fields, "size", text),
            condition: take_field(&mut fields, "condition", text),
            extra: fields,
        })
    }
}

/// Removes `key` from `fields` only when `convert` accepts its value.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let converted = fields.get(key).and_then(convert)?;
    fields.remove(key);
    Some(converted)
}

impl WishlistItem {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: None,
            image: None,
            brand: None,
            size: None,
            condition: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Attaches an extra metadata field that is persisted verbatim.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Option<f64> {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Mutations accepted by a wishlist.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistCommand {
    /// Append an item unless its id is already present.
    Add(WishlistItem),
    /// Drop every item with the given id.
    Remove(String),
    /// Drop everything.
    Clear,
}

/// Ordered, duplicate-free list of wishlist items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WishlistState {
    items: Vec<WishlistItem>,
}

#[derive(Deserialize)]
struct StoredWishlist {
    #[serde(default)]
    items: Vec<Value>,
}

impl WishlistState {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Applies a command and returns the resulting state.
    #[must_use]
    pub fn apply(mut self, command: WishlistCommand) -> Self {
        match command {
            WishlistCommand::Add(item) => {
                if !self.contains(item.id()) {
                    self.items.push(item);
                }
            }
            WishlistCommand::Remove(id) => {
                self.items.retain(|item| item.id() != id);
            }
            WishlistCommand::Clear => {
                self.items.clear();
            }
        }
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parses a persisted slot payload.
    ///
    /// Records without a usable id are skipped; the rest are kept. Duplicate
    /// ids are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    /// Returns error if the payload is not an object with an `items` array.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let stored: StoredWishlist = serde_json::from_str(payload)?;
        Ok(stored
            .items
            .into_iter()
            .filter_map(|value| WishlistItem::try_from(value).ok())
            .fold(Self::new(), |state, item| {
                state.apply(WishlistCommand::Add(item))
            }))
    }

    /// Serializes the state into a slot payload.
    ///
    /// # Errors
    /// Returns error if an extra metadata value cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str) -> WishlistItem {
        WishlistItem::new(id, format!("Item {id}"))
    }

    fn ids(state: &WishlistState) -> Vec<&str> {
        state.items().iter().map(WishlistItem::id).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let state = WishlistState::new()
            .apply(WishlistCommand::Add(item("a")))
            .apply(WishlistCommand::Add(item("b")))
            .apply(WishlistCommand::Add(item("c")));

        assert_eq!(ids(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let once = WishlistState::new().apply(WishlistCommand::Add(item("a")));
        let twice = once.clone().apply(WishlistCommand::Add(item("a")));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_add_keeps_original_entry() {
        let state = WishlistState::new()
            .apply(WishlistCommand::Add(WishlistItem::new("a", "first")))
            .apply(WishlistCommand::Add(WishlistItem::new("a", "second")));

        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].name(), "first");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let state = WishlistState::new().apply(WishlistCommand::Add(item("a")));
        let after = state.clone().apply(WishlistCommand::Remove("zzz".to_string()));

        assert_eq!(state, after);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let state = WishlistState::new()
            .apply(WishlistCommand::Add(item("a")))
            .apply(WishlistCommand::Add(item("b")))
            .apply(WishlistCommand::Add(item("c")))
            .apply(WishlistCommand::Remove("b".to_string()));

        assert_eq!(ids(&state), vec!["a", "c"]);
        assert!(!state.contains("b"));
    }

    #[test]
    fn test_clear_empties() {
        let state = WishlistState::new()
            .apply(WishlistCommand::Add(item("a")))
            .apply(WishlistCommand::Clear);

        assert!(state.is_empty());
        assert!(!state.contains("a"));
    }

    #[test]
    fn test_mixed_sequence_never_duplicates() {
        let commands = [
            WishlistCommand::Add(item("a")),
            WishlistCommand::Add(item("b")),
            WishlistCommand::Add(item("a")),
            WishlistCommand::Remove("a".to_string()),
            WishlistCommand::Add(item("a")),
            WishlistCommand::Add(item("b")),
            WishlistCommand::Clear,
            WishlistCommand::Add(item("c")),
            WishlistCommand::Add(item("c")),
            WishlistCommand::Add(item("d")),
        ];

        let mut state = WishlistState::new();
        for command in commands {
            state = state.apply(command);
            let mut seen = ids(&state);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), state.len());
        }

        assert_eq!(ids(&state), vec!["c", "d"]);
    }

    #[test]
    fn test_json_round_trip() {
        let state = WishlistState::new()
            .apply(WishlistCommand::Add(
                WishlistItem::new("p1", "Denim jacket")
                    .with_price(45.5)
                    .with_image("retag/products/p1")
                    .with_brand("Levi's")
                    .with_size("M")
                    .with_condition("like new")
                    .with_extra("seller", json!({ "id": "s9", "rating": 4.8 })),
            ))
            .apply(WishlistCommand::Add(item("p2")));

        let payload = state.to_json().unwrap();
        let restored = WishlistState::from_json(&payload).unwrap();

        assert_eq!(state, restored);
    }

    #[test]
    fn test_parses_browser_payload_with_unknown_fields() {
        let payload = r#"{"items":[{"id":"x1","name":"Tee","price":12,"category":"tops","images":["a","b"]}]}"#;

        let state = WishlistState::from_json(payload).unwrap();

        assert_eq!(state.len(), 1);
        let item = &state.items()[0];
        assert_eq!(item.price(), Some(12.0));
        assert_eq!(item.extra().get("category"), Some(&json!("tops")));
    }

    #[test]
    fn test_from_json_collapses_duplicates() {
        let payload = r#"{"items":[{"id":"a","name":"one"},{"id":"a","name":"two"}]}"#;

        let state = WishlistState::from_json(payload).unwrap();

        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].name(), "one");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(WishlistState::from_json("not json").is_err());
        assert!(WishlistState::from_json(r#"{"items":"nope"}"#).is_err());
    }

    #[test]
    fn test_mistyped_fields_do_not_drop_the_slot() {
        let payload = r#"{"items":[{"id":"a","name":"Tee","price":"12.00"},{"id":"b","name":"Jeans","price":30}]}"#;

        let state = WishlistState::from_json(payload).unwrap();

        assert_eq!(ids(&state), vec!["a", "b"]);
        let tee = &state.items()[0];
        assert_eq!(tee.price(), None);
        assert_eq!(tee.extra().get("price"), Some(&json!("12.00")));
        assert_eq!(state.items()[1].price(), Some(30.0));

        let restored = WishlistState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_numeric_ids_kept_and_idless_records_skipped() {
        let payload = r#"{"items":[{"id":7,"name":"Boots"},{"name":"no id"},"junk",{"id":"c","name":9}]}"#;

        let state = WishlistState::from_json(payload).unwrap();

        assert_eq!(ids(&state), vec!["7", "c"]);
        assert_eq!(state.items()[1].name(), "");
        assert_eq!(state.items()[1].extra().get("name"), Some(&json!(9)));
    }
}
