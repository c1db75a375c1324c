//! Form field value objects

use crate::validation::{FieldId, Service};
use std::collections::BTreeSet;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Multi-select over the fixed service list; `cursor` indexes `Service::ALL`
    Choices {
        selected: BTreeSet<Service>,
        cursor: usize,
    },
    Toggle(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(id: FieldId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new service checklist
    pub fn choices(id: FieldId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            value: FieldValue::Choices {
                selected: BTreeSet::new(),
                cursor: 0,
            },
        }
    }

    /// Create a new on/off field
    pub fn toggle(id: FieldId, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            value: FieldValue::Toggle(false),
        }
    }

    /// Get the text value (returns empty string for other kinds)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Selected services (empty for other kinds)
    pub fn selected_services(&self) -> BTreeSet<Service> {
        match &self.value {
            FieldValue::Choices { selected, .. } => selected.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Toggle(true))
    }

    /// Service under the checklist cursor
    pub fn cursor_service(&self) -> Option<Service> {
        match &self.value {
            FieldValue::Choices { cursor, .. } => Service::ALL.get(*cursor).copied(),
            _ => None,
        }
    }

    /// Push a character to the field value. Only text fields take characters.
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Flip the service under the cursor, or the toggle itself
    pub fn toggle_current(&mut self) {
        let current = self.cursor_service();
        match &mut self.value {
            FieldValue::Choices { selected, .. } => {
                if let Some(service) = current {
                    if !selected.remove(&service) {
                        selected.insert(service);
                    }
                }
            }
            FieldValue::Toggle(on) => *on = !*on,
            FieldValue::Text(_) => {}
        }
    }

    /// Mark `service` as selected (no-op for non-checklist fields)
    pub fn select(&mut self, service: Service) {
        if let FieldValue::Choices { selected, .. } = &mut self.value {
            selected.insert(service);
        }
    }

    pub fn cursor_up(&mut self) {
        if let FieldValue::Choices { cursor, .. } = &mut self.value {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn cursor_down(&mut self) {
        if let FieldValue::Choices { cursor, .. } = &mut self.value {
            *cursor = (*cursor + 1).min(Service::ALL.len() - 1);
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choices { selected, .. } => selected
                .iter()
                .map(Service::label)
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Toggle(on) => (if *on { "Yes" } else { "No" }).to_string(),
        }
    }
}
