pub mod contacts_view;
pub mod entry_form;
pub mod main_window;
pub mod participants_view;
pub mod sidebar;

use adw::prelude::*;
use gtk4 as gtk;

const CSS: &str = r#"
.status-green { color: @success_color; font-weight: bold; }
.status-red { color: @error_color; font-weight: bold; }
.status-yellow { color: @warning_color; font-weight: bold; }
.avatar { min-width: 32px; min-height: 32px; border-radius: 16px; background: alpha(@accent_bg_color, 0.2); font-weight: bold; }
entry.error { border-color: @error_color; }
"#;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);
    match gtk::gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!("no display, status colours disabled"),
    }
}

/// Blocking message box, the desktop stand-in for a browser alert.
pub fn alert(parent: Option<&gtk::Window>, message: &str) {
    let dialog = adw::MessageDialog::new(parent, None, Some(message));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.present();
}

/// Top level window of any widget, for parenting dialogs.
pub fn window_of(widget: &impl IsA<gtk::Widget>) -> Option<gtk::Window> {
    widget.root().and_downcast::<gtk::Window>()
}

pub fn clear_list(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

/// Small left aligned label used in list rows.
pub fn cell(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_halign(gtk::Align::Start);
    label.set_xalign(0.0);
    label
}
