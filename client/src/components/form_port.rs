//! Output port from the table map to the reservation form.
//!
//! The map never looks elements up by itself; it is handed a [`FormPort`]
//! naming the page elements it may write and a callback to report selection
//! changes. Missing elements are skipped with a debug log so the map works on
//! pages that omit a panel.

#[cfg(test)]
#[path = "form_port_test.rs"]
mod form_port_test;

use std::rc::Rc;

use tablemap::panel::SelectionSummary;
use tablemap::table::TableId;

pub const TABLE_FIELD_ID: &str = "tableId";
pub const SELECTED_INFO_ID: &str = "selected-table-info";
pub const AVAILABILITY_ID: &str = "availability-message";
pub const SUBMIT_ID: &str = "submit-reservation";

/// Called with the selected table id, or `None` when the selection clears.
pub type SelectionCallback = Rc<dyn Fn(Option<TableId>)>;

/// Element ids and callback the map writes its results through.
#[derive(Clone)]
pub struct FormPort {
    pub table_field_id: String,
    pub selected_info_id: String,
    pub availability_id: String,
    pub submit_id: String,
    pub on_select: Option<SelectionCallback>,
}

impl Default for FormPort {
    fn default() -> Self {
        Self {
            table_field_id: TABLE_FIELD_ID.to_owned(),
            selected_info_id: SELECTED_INFO_ID.to_owned(),
            availability_id: AVAILABILITY_ID.to_owned(),
            submit_id: SUBMIT_ID.to_owned(),
            on_select: None,
        }
    }
}

/// What the form shows for one selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutputs {
    /// Hidden field value; empty when nothing is selected.
    pub field_value: String,
    /// Info panel markup; empty when nothing is selected.
    pub info_html: String,
    pub submit_enabled: bool,
}

impl SelectionOutputs {
    #[must_use]
    pub fn for_selection(selection: Option<&SelectionSummary>) -> Self {
        match selection {
            Some(summary) => Self {
                field_value: summary.field_value(),
                info_html: summary.info_html(),
                submit_enabled: true,
            },
            None => Self { field_value: String::new(), info_html: String::new(), submit_enabled: false },
        }
    }
}

impl FormPort {
    #[must_use]
    pub fn with_callback(callback: impl Fn(Option<TableId>) + 'static) -> Self {
        Self { on_select: Some(Rc::new(callback)), ..Self::default() }
    }

    /// Write a selection change into the form and report it.
    pub fn publish_selection(&self, selection: Option<&SelectionSummary>) {
        self.write_selection(&SelectionOutputs::for_selection(selection));
        if let Some(callback) = &self.on_select {
            callback(selection.map(|s| s.table_id));
        }
    }

    /// Replace the availability panel's markup; `None` empties it.
    pub fn publish_availability(&self, html: Option<&str>) {
        #[cfg(feature = "csr")]
        {
            if let Some(el) = self.element(&self.availability_id) {
                el.set_inner_html(html.unwrap_or_default());
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = html;
        }
    }

    fn write_selection(&self, outputs: &SelectionOutputs) {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;

            if let Some(field) = self
                .element(&self.table_field_id)
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                field.set_value(&outputs.field_value);
            }
            if let Some(info) = self.element(&self.selected_info_id) {
                info.set_inner_html(&outputs.info_html);
            }
            if let Some(submit) = self
                .element(&self.submit_id)
                .and_then(|el| el.dyn_into::<web_sys::HtmlButtonElement>().ok())
            {
                submit.set_disabled(!outputs.submit_enabled);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = outputs;
        }
    }

    #[cfg(feature = "csr")]
    fn element(&self, id: &str) -> Option<web_sys::Element> {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if el.is_none() {
            log::debug!("table map: form element #{id} not on page");
        }
        el
    }
}
