//! Form state management for the intake form

use super::field::FormField;
use crate::validation::{FieldId, RawFormValues, Service};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Buttons in the action panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
    Quit,
}

impl FormAction {
    pub const ALL: [FormAction; 3] = [FormAction::Submit, FormAction::Reset, FormAction::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Reset => "Reset",
            Self::Quit => "Quit",
        }
    }
}

/// Index of the action panel in the tab order (after the seven fields)
pub const ACTIONS_ROW: usize = 7;

/// The project inquiry form
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub full_name: FormField,
    pub email: FormField,
    pub company_name: FormField,
    pub services: FormField,
    pub budget_usd: FormField,
    pub project_start_date: FormField,
    pub accept_terms: FormField,
    pub active_field_index: usize,
    /// Which button is selected when on the actions row (indexes `FormAction::ALL`)
    pub selected_button: usize,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self {
            full_name: FormField::text(FieldId::FullName),
            email: FormField::text(FieldId::Email),
            company_name: FormField::text(FieldId::CompanyName),
            services: FormField::choices(FieldId::Services),
            budget_usd: FormField::text(FieldId::BudgetUsd),
            project_start_date: FormField::text(FieldId::ProjectStartDate),
            accept_terms: FormField::toggle(
                FieldId::AcceptTerms,
                "I accept the terms of engagement",
            ),
            active_field_index: 0,
            selected_button: 0, // Default to "Submit"
        }
    }

    /// New form with `service` already ticked
    pub fn with_service(service: Option<Service>) -> Self {
        let mut form = Self::new();
        if let Some(service) = service {
            form.services.select(service);
        }
        form
    }

    /// Returns true if the actions row is currently active
    pub fn is_actions_row_active(&self) -> bool {
        self.active_field_index == ACTIONS_ROW
    }

    /// Field under focus, if focus is not on the actions row
    pub fn active_field_id(&self) -> Option<FieldId> {
        self.get_field(self.active_field_index).map(|f| f.id)
    }

    pub fn selected_action(&self) -> FormAction {
        FormAction::ALL[self.selected_button.min(FormAction::ALL.len() - 1)]
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormAction::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormAction::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        match id {
            FieldId::FullName => &self.full_name,
            FieldId::Email => &self.email,
            FieldId::CompanyName => &self.company_name,
            FieldId::Services => &self.services,
            FieldId::BudgetUsd => &self.budget_usd,
            FieldId::ProjectStartDate => &self.project_start_date,
            FieldId::AcceptTerms => &self.accept_terms,
        }
    }

    /// Focus `id`'s field
    pub fn focus(&mut self, id: FieldId) {
        if let Some(index) = FieldId::ALL.iter().position(|f| *f == id) {
            self.set_active_field(index);
        }
    }

    /// Snapshot the current input for validation
    pub fn to_raw(&self) -> RawFormValues {
        RawFormValues {
            full_name: self.full_name.as_text().to_string(),
            email: self.email.as_text().to_string(),
            company_name: self.company_name.as_text().to_string(),
            services: self.services.selected_services(),
            budget_usd: self.budget_usd.as_text().to_string(),
            project_start_date: self.project_start_date.as_text().to_string(),
            accept_terms: self.accept_terms.is_checked(),
        }
    }

    /// Clear every field and return focus to the top
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for IntakeForm {
    fn field_count(&self) -> usize {
        ACTIONS_ROW + 1 // seven fields, actions
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(ACTIONS_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.full_name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.company_name),
            3 => Some(&mut self.services),
            4 => Some(&mut self.budget_usd),
            5 => Some(&mut self.project_start_date),
            6 => Some(&mut self.accept_terms),
            // Actions row has no FormField
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        FieldId::ALL.get(index).map(|id| self.field(*id))
    }
}
