use gtk4::prelude::*;
use gtk4 as gtk;

use crate::routes::Route;

/// Navigation menu listing the routes.
pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl Sidebar {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(180);

        let title = gtk::Label::new(Some("Finlog"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        for route in Route::ALL {
            let row = gtk::ListBoxRow::new();
            let label = gtk::Label::new(Some(route.title()));
            label.set_margin_top(8);
            label.set_margin_bottom(8);
            label.set_margin_start(8);
            label.set_margin_end(8);
            label.set_halign(gtk::Align::Start);
            row.set_child(Some(&label));
            list.append(&row);
        }
        root.append(&list);

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn select(&self, route: Route) {
        let index = Route::ALL.iter().position(|r| *r == route).unwrap_or(0);
        if let Some(row) = self.list.row_at_index(index as i32) {
            self.list.select_row(Some(&row));
        }
    }

    pub fn connect_navigate<F: Fn(Route) + 'static>(&self, f: F) {
        self.list.connect_row_activated(move |_, row| {
            if let Some(route) = usize::try_from(row.index())
                .ok()
                .and_then(|i| Route::ALL.get(i).copied())
            {
                f(route);
            }
        });
    }
}
