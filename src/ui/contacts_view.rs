use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::api::models::Contact;
use crate::controllers::contacts::{ContactList, SaveError};
use crate::controllers::display::{initials, status_class};
use crate::ui::entry_form::{Choice, EntryForm};
use crate::ui::{alert, cell, clear_list, window_of};

/// (label, filter value) pairs; an empty value disables the filter.
const STATUS_FILTERS: &[(&str, &str)] = &[
    ("All statuses", ""),
    ("Active", "Active"),
    ("Inactive", "Inactive"),
];
const ROLE_FILTERS: &[(&str, &str)] = &[
    ("All roles", ""),
    ("Participants", "Participant"),
    ("Leads", "lead"),
];

#[derive(Clone)]
pub struct ContactsView {
    inner: Rc<Inner>,
}

struct Inner {
    root: gtk::Box,
    list: gtk::ListBox,
    spinner: gtk::Spinner,
    message: gtk::Label,
    count: gtk::Label,
    search: gtk::SearchEntry,
    status_filter: gtk::DropDown,
    role_filter: gtk::DropDown,
    overlay: adw::ToastOverlay,
    client: ApiClient,
    controller: RefCell<ContactList>,
}

impl ContactsView {
    pub fn new(client: ApiClient, overlay: adw::ToastOverlay) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.set_margin_top(12);
        root.set_margin_bottom(12);
        root.set_margin_start(12);
        root.set_margin_end(12);

        // Toolbar
        let toolbar = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search name, email, NDIS or phone"));
        search.set_hexpand(true);
        let status_filter = dropdown(STATUS_FILTERS);
        let role_filter = dropdown(ROLE_FILTERS);
        let clear_btn = gtk::Button::with_label("Clear");
        let refresh_btn = gtk::Button::from_icon_name("view-refresh-symbolic");
        refresh_btn.set_tooltip_text(Some("Refresh"));
        let add_lead_btn = gtk::Button::with_label("Add Lead");
        let add_contact_btn = gtk::Button::with_label("Add Contact");
        add_contact_btn.add_css_class("suggested-action");
        toolbar.append(&search);
        toolbar.append(&status_filter);
        toolbar.append(&role_filter);
        toolbar.append(&clear_btn);
        toolbar.append(&refresh_btn);
        toolbar.append(&add_lead_btn);
        toolbar.append(&add_contact_btn);
        root.append(&toolbar);

        let status_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let spinner = gtk::Spinner::new();
        let count = cell("");
        count.add_css_class("dim-label");
        let message = cell("");
        message.add_css_class("error");
        message.set_wrap(true);
        status_row.append(&spinner);
        status_row.append(&count);
        status_row.append(&message);
        root.append(&status_row);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let list = gtk::ListBox::new();
        list.add_css_class("boxed-list");
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_placeholder(Some(&gtk::Label::new(Some("No contacts"))));
        scroller.set_child(Some(&list));
        root.append(&scroller);

        let view = Self {
            inner: Rc::new(Inner {
                root,
                list,
                spinner,
                message,
                count,
                search,
                status_filter,
                role_filter,
                overlay,
                client,
                controller: RefCell::new(ContactList::new()),
            }),
        };

        {
            let view = view.clone();
            view.inner.search.clone().connect_search_changed(move |entry| {
                view.inner
                    .controller
                    .borrow_mut()
                    .set_search_text(entry.text().as_str());
                view.render_list();
            });
        }
        {
            let view = view.clone();
            view.inner.status_filter.clone().connect_selected_notify(move |dd| {
                let value = filter_value(STATUS_FILTERS, dd.selected());
                view.inner.controller.borrow_mut().set_status_filter(value);
                view.render_list();
            });
        }
        {
            let view = view.clone();
            view.inner.role_filter.clone().connect_selected_notify(move |dd| {
                let value = filter_value(ROLE_FILTERS, dd.selected());
                view.inner.controller.borrow_mut().set_role_filter(value);
                view.render_list();
            });
        }
        {
            let view = view.clone();
            clear_btn.connect_clicked(move |_| view.clear_filters());
        }
        {
            let view = view.clone();
            refresh_btn.connect_clicked(move |_| view.reload());
        }
        {
            let view = view.clone();
            add_contact_btn.connect_clicked(move |_| view.open_form(false));
        }
        {
            let view = view.clone();
            add_lead_btn.connect_clicked(move |_| view.open_form(true));
        }

        view.reload();
        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.inner.root.clone().upcast()
    }

    fn toast(&self, message: &str) {
        self.inner.overlay.add_toast(adw::Toast::new(message));
    }

    pub fn reload(&self) {
        self.inner.controller.borrow_mut().refresh_contacts();
        self.render();

        let client = self.inner.client.clone();
        let view = self.clone();
        crate::utils::run_async_to_main(
            async move { client.participants().await },
            move |res| {
                view.inner.controller.borrow_mut().finish_load(res);
                view.render();
            },
        );
    }

    fn clear_filters(&self) {
        let filter = {
            let mut controller = self.inner.controller.borrow_mut();
            controller.clear_filters();
            controller.filter().clone()
        };
        // These fire their own handlers, which now only re-set empty filters.
        self.inner.search.set_text(&filter.search_text);
        self.inner
            .status_filter
            .set_selected(filter_index(STATUS_FILTERS, &filter.status));
        self.inner
            .role_filter
            .set_selected(filter_index(ROLE_FILTERS, &filter.role));
        self.render_list();
    }

    fn render(&self) {
        {
            let controller = self.inner.controller.borrow();
            let state = controller.state();
            self.inner.spinner.set_spinning(state.is_loading());
            self.inner.spinner.set_visible(state.is_loading());
            match state.error_message() {
                Some(msg) => {
                    self.inner.message.set_label(msg);
                    self.inner.message.set_visible(true);
                }
                None => self.inner.message.set_visible(false),
            }
        }
        self.render_list();
    }

    fn render_list(&self) {
        let controller = self.inner.controller.borrow();
        self.inner.count.set_label(&format!(
            "{} of {} contacts",
            controller.filtered().len(),
            controller.contacts().len()
        ));
        clear_list(&self.inner.list);
        for contact in controller.filtered() {
            self.inner.list.append(&contact_row(contact));
        }
    }

    fn open_form(&self, lead: bool) {
        let (form, title) = {
            let mut controller = self.inner.controller.borrow_mut();
            if controller.is_modal_open() {
                return;
            }
            if lead {
                controller.open_add_lead();
            } else {
                controller.open_add_contact();
            }
            let title = if controller.is_lead() { "Add Lead" } else { "Add Contact" };
            (controller.form().clone(), title)
        };

        let input_view = self.clone();
        let entry_form = EntryForm::new(
            window_of(&self.inner.root).as_ref(),
            title,
            "Save",
            &form,
            move |field, raw| {
                input_view
                    .inner
                    .controller
                    .borrow_mut()
                    .form_mut()
                    .input(field, raw)
            },
        );

        let view = self.clone();
        entry_form.connect_choice(move |dialog, choice| match choice {
            Choice::Submit => view.save_entry(dialog),
            Choice::Cancel => {
                view.inner.controller.borrow_mut().close_modal();
                dialog.close();
            }
        });
        entry_form.present();
    }

    fn save_entry(&self, dialog: &EntryForm) {
        let prepared = self.inner.controller.borrow().prepare_entry();
        let draft = match prepared {
            Ok(draft) => draft,
            Err(err) => {
                if let SaveError::Invalid(form_err) = &err {
                    dialog.show_errors(&form_err.fields);
                }
                alert(Some(&dialog.window()), &err.to_string());
                return;
            }
        };

        let client = self.inner.client.clone();
        let view = self.clone();
        let dialog = dialog.clone();
        crate::utils::run_async_to_main(
            async move { client.create_contact(&draft).await },
            move |res| {
                let outcome = view.inner.controller.borrow_mut().finish_save(res);
                match outcome {
                    Ok(()) => {
                        if !view.inner.controller.borrow().is_modal_open() {
                            dialog.close();
                        }
                        view.render();
                        view.toast("Contact saved");
                    }
                    Err(err) => alert(Some(&dialog.window()), &err.to_string()),
                }
            },
        );
    }
}

fn dropdown(options: &[(&str, &str)]) -> gtk::DropDown {
    let labels: Vec<&str> = options.iter().map(|(label, _)| *label).collect();
    gtk::DropDown::from_strings(&labels)
}

fn filter_value(options: &'static [(&'static str, &'static str)], selected: u32) -> &'static str {
    options
        .get(selected as usize)
        .map_or("", |(_, value)| *value)
}

fn filter_index(options: &[(&str, &str)], value: &str) -> u32 {
    options
        .iter()
        .position(|(_, v)| *v == value)
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(0)
}

fn contact_row(contact: &Contact) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    let hbox = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    hbox.set_margin_top(8);
    hbox.set_margin_bottom(8);
    hbox.set_margin_start(8);
    hbox.set_margin_end(8);

    let avatar = gtk::Label::new(Some(&initials(&contact.name)));
    avatar.add_css_class("avatar");
    hbox.append(&avatar);

    let details = gtk::Box::new(gtk::Orientation::Vertical, 2);
    details.set_hexpand(true);
    let name = cell(&contact.name);
    name.add_css_class("heading");
    details.append(&name);
    let mut subtitle = vec![contact.email.clone().unwrap_or_default()];
    if let Some(ndis) = &contact.ndis {
        subtitle.push(format!("NDIS {ndis}"));
    }
    if let Some(phone) = &contact.phone {
        subtitle.push(phone.clone());
    }
    subtitle.retain(|s| !s.is_empty());
    let sub = cell(&subtitle.join(" · "));
    sub.add_css_class("dim-label");
    details.append(&sub);
    hbox.append(&details);

    let status = gtk::Label::new(Some(contact.status_or_empty()));
    let class = status_class(contact.status_or_empty());
    if !class.is_empty() {
        status.add_css_class(class);
    }
    hbox.append(&status);

    hbox.append(&gtk::Label::new(contact.role.as_deref()));
    let last = gtk::Label::new(contact.last_contact.as_deref());
    last.add_css_class("dim-label");
    hbox.append(&last);

    row.set_child(Some(&hbox));
    row
}
