use gtk4::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use crate::forms::{Field, FieldError, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Submit,
    Cancel,
}

/// Modal dialog with one entry per form field.
///
/// Every keystroke goes through `on_input`, which returns the scrubbed text;
/// when it differs the entry is rewritten, which re-enters the handler with
/// text that no longer changes.
#[derive(Clone)]
pub struct EntryForm {
    dialog: gtk::Dialog,
    entries: Vec<(Field, gtk::Entry)>,
}

impl EntryForm {
    pub fn new<F>(
        parent: Option<&gtk::Window>,
        title: &str,
        submit_label: &str,
        form: &FormState,
        on_input: F,
    ) -> Self
    where
        F: Fn(Field, &str) -> String + 'static,
    {
        let dialog = gtk::Dialog::builder().title(title).modal(true).build();
        if let Some(parent) = parent {
            dialog.set_transient_for(Some(parent));
        }

        let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
        content.set_margin_top(12);
        content.set_margin_bottom(12);
        content.set_margin_start(12);
        content.set_margin_end(12);
        content.set_width_request(360);

        let on_input = Rc::new(on_input);
        let mut entries = Vec::new();
        for field in form.schema().fields() {
            let label = super::cell(field.label());
            label.add_css_class("caption-heading");
            content.append(&label);

            let entry = gtk::Entry::new();
            entry.set_hexpand(true);
            entry.set_placeholder_text(Some(placeholder(field)));
            // Seed before connecting so the initial value is not re-scrubbed.
            entry.set_text(form.value(field));

            let on_input = on_input.clone();
            entry.connect_changed(move |e| {
                let raw = e.text();
                let cleaned = on_input(field, raw.as_str());
                if cleaned != raw.as_str() {
                    e.set_text(&cleaned);
                    e.set_position(-1);
                }
                e.remove_css_class("error");
                e.set_tooltip_text(None);
            });
            content.append(&entry);
            entries.push((field, entry));
        }
        dialog.content_area().append(&content);

        let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
        let submit = dialog.add_button(submit_label, gtk::ResponseType::Ok);
        submit.add_css_class("suggested-action");
        dialog.set_default_response(gtk::ResponseType::Ok);

        Self { dialog, entries }
    }

    pub fn connect_choice<F: Fn(&EntryForm, Choice) + 'static>(&self, f: F) {
        let this = self.clone();
        self.dialog.connect_response(move |_, resp| {
            let choice = if resp == gtk::ResponseType::Ok {
                Choice::Submit
            } else {
                Choice::Cancel
            };
            f(&this, choice);
        });
    }

    /// Highlights the entries behind `errors`.
    pub fn show_errors(&self, errors: &[FieldError]) {
        for (field, entry) in &self.entries {
            match errors.iter().find(|e| e.field() == *field) {
                Some(err) => {
                    entry.add_css_class("error");
                    entry.set_tooltip_text(Some(&err.to_string()));
                }
                None => {
                    entry.remove_css_class("error");
                    entry.set_tooltip_text(None);
                }
            }
        }
    }

    pub fn window(&self) -> gtk::Window {
        self.dialog.clone().upcast()
    }

    pub fn present(&self) {
        self.dialog.present();
    }

    pub fn close(&self) {
        self.dialog.close();
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Full name",
        Field::Ndis => "9 digit NDIS number",
        Field::State => "e.g. NSW",
        Field::Status => "Active or Inactive",
        Field::Email => "Optional",
        Field::ServiceType => "Service type",
    }
}
