//! The widget record shared by ordering and placement.

use serde::{Deserialize, Serialize};

use crate::{geometry::GridPosition, identifier::WidgetId, order::OrderKey};

/// A widget as seen by the layout algorithms: an id, a sort key and an
/// optional grid rectangle.
///
/// A widget without a position has not been placed yet and is ignored by
/// collision checks until it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    id: WidgetId,
    order: OrderKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<GridPosition>,
}

impl Widget {
    /// Creates an unplaced widget
    pub fn new(id: WidgetId, order: OrderKey) -> Self {
        Self {
            id,
            order,
            position: None,
        }
    }

    /// Sets the position for this widget (builder style)
    pub fn with_position(mut self, position: GridPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn order(&self) -> OrderKey {
        self.order
    }

    pub fn position(&self) -> Option<GridPosition> {
        self.position
    }

    pub fn set_order(&mut self, order: OrderKey) {
        self.order = order;
    }

    pub fn set_position(&mut self, position: Option<GridPosition>) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_widget_is_unplaced() {
        let widget = Widget::new(WidgetId::new("clock"), OrderKey::new(0));
        assert_eq!(widget.position(), None);
    }

    #[test]
    fn test_serde_skips_missing_position() {
        let widget = Widget::new(WidgetId::new("radio"), OrderKey::new(1000));
        let json = serde_json::to_string(&widget).unwrap();
        assert_eq!(json, r#"{"id":"radio","order":1000}"#);

        let placed = widget.with_position(GridPosition::new(1, 2, 3, 4));
        let json = serde_json::to_string(&placed).unwrap();
        let back: Widget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, placed);
    }
}
