use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::api::models::Contact;
use crate::controllers::display::status_class;
use crate::controllers::participants::{CREATED_MESSAGE, ParticipantList};
use crate::ui::entry_form::{Choice, EntryForm};
use crate::ui::{alert, cell, clear_list, window_of};

#[derive(Clone)]
pub struct ParticipantsView {
    inner: Rc<Inner>,
}

struct Inner {
    root: gtk::Box,
    list: gtk::ListBox,
    spinner: gtk::Spinner,
    message: gtk::Label,
    page_label: gtk::Label,
    prev_btn: gtk::Button,
    next_btn: gtk::Button,
    client: ApiClient,
    controller: RefCell<ParticipantList>,
}

impl ParticipantsView {
    /// Builds the view and starts fetching straight away.
    pub fn new(client: ApiClient) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.set_margin_top(12);
        root.set_margin_bottom(12);
        root.set_margin_start(12);
        root.set_margin_end(12);

        let toolbar = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = cell("Participants");
        title.add_css_class("title-3");
        title.set_hexpand(true);
        let spinner = gtk::Spinner::new();
        let refresh_btn = gtk::Button::from_icon_name("view-refresh-symbolic");
        refresh_btn.set_tooltip_text(Some("Refresh"));
        let add_btn = gtk::Button::with_label("Add Participant");
        add_btn.add_css_class("suggested-action");
        toolbar.append(&title);
        toolbar.append(&spinner);
        toolbar.append(&refresh_btn);
        toolbar.append(&add_btn);
        root.append(&toolbar);

        let message = cell("");
        message.add_css_class("error");
        message.set_wrap(true);
        message.set_visible(false);
        root.append(&message);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let list = gtk::ListBox::new();
        list.add_css_class("boxed-list");
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_placeholder(Some(&gtk::Label::new(Some("No participants"))));
        scroller.set_child(Some(&list));
        root.append(&scroller);

        // Pager
        let pager = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        pager.set_halign(gtk::Align::Center);
        let prev_btn = gtk::Button::from_icon_name("go-previous-symbolic");
        let next_btn = gtk::Button::from_icon_name("go-next-symbolic");
        let page_label = gtk::Label::new(None);
        pager.append(&prev_btn);
        pager.append(&page_label);
        pager.append(&next_btn);
        root.append(&pager);

        let view = Self {
            inner: Rc::new(Inner {
                root,
                list,
                spinner,
                message,
                page_label,
                prev_btn,
                next_btn,
                client,
                controller: RefCell::new(ParticipantList::new()),
            }),
        };

        {
            let view = view.clone();
            view.inner.prev_btn.clone().connect_clicked(move |_| {
                view.inner.controller.borrow_mut().go_to_previous();
                view.render_page();
            });
        }
        {
            let view = view.clone();
            view.inner.next_btn.clone().connect_clicked(move |_| {
                view.inner.controller.borrow_mut().go_to_next();
                view.render_page();
            });
        }
        {
            let view = view.clone();
            refresh_btn.connect_clicked(move |_| view.reload());
        }
        {
            let view = view.clone();
            add_btn.connect_clicked(move |_| view.open_form());
        }

        view.reload();
        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.inner.root.clone().upcast()
    }

    pub fn reload(&self) {
        self.inner.controller.borrow_mut().begin_load();
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
        self.render_page();
    }

    fn render_page(&self) {
        let controller = self.inner.controller.borrow();
        let (page, total) = (controller.current_page(), controller.total_pages());
        self.inner.page_label.set_label(&format!(
            "Page {page} of {total} · {} participants",
            controller.all().len()
        ));
        self.inner.prev_btn.set_sensitive(page > 1);
        self.inner.next_btn.set_sensitive(page < total);
        clear_list(&self.inner.list);
        for participant in controller.page() {
            self.inner.list.append(&participant_row(participant));
        }
    }

    fn open_form(&self) {
        let form = {
            let mut controller = self.inner.controller.borrow_mut();
            if controller.is_modal_open() {
                return;
            }
            controller.open_modal();
            controller.form().clone()
        };

        let input_view = self.clone();
        let entry_form = EntryForm::new(
            window_of(&self.inner.root).as_ref(),
            "Add Participant",
            "Submit",
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
            Choice::Submit => view.submit(dialog),
            Choice::Cancel => {
                view.inner.controller.borrow_mut().close_modal();
                dialog.close();
            }
        });
        entry_form.present();
    }

    fn submit(&self, dialog: &EntryForm) {
        let prepared = self.inner.controller.borrow_mut().prepare_submission();
        let draft = match prepared {
            Ok(draft) => draft,
            Err(err) => {
                let visible = self.inner.controller.borrow().form().visible_errors();
                dialog.show_errors(&visible);
                alert(Some(&dialog.window()), &err.to_string());
                return;
            }
        };

        let client = self.inner.client.clone();
        let view = self.clone();
        let dialog = dialog.clone();
        crate::utils::run_async_to_main(
            async move { client.create_participant(&draft).await },
            move |res| {
                let outcome = view.inner.controller.borrow_mut().finish_submission(res);
                match outcome {
                    Ok(()) => alert(Some(&dialog.window()), CREATED_MESSAGE),
                    Err(err) => alert(Some(&dialog.window()), &err.to_string()),
                }
            },
        );
    }
}

fn participant_row(participant: &Contact) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    let grid = gtk::Grid::new();
    grid.set_column_spacing(16);
    grid.set_column_homogeneous(true);
    grid.set_margin_top(8);
    grid.set_margin_bottom(8);
    grid.set_margin_start(8);
    grid.set_margin_end(8);

    let name = cell(&participant.name);
    name.add_css_class("heading");
    grid.attach(&name, 0, 0, 1, 1);
    grid.attach(&cell(participant.ndis.as_deref().unwrap_or("")), 1, 0, 1, 1);
    grid.attach(&cell(&participant.state), 2, 0, 1, 1);

    let status = cell(participant.status_or_empty());
    let class = status_class(participant.status_or_empty());
    if !class.is_empty() {
        status.add_css_class(class);
    }
    grid.attach(&status, 3, 0, 1, 1);

    row.set_child(Some(&grid));
    row
}
