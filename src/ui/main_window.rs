use adw::Application;
use adw::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::app::AppConfig;
use crate::routes::Route;
use crate::ui::contacts_view::ContactsView;
use crate::ui::participants_view::ParticipantsView;
use crate::ui::sidebar::Sidebar;

pub fn show_main_window(app: &Application, config: &AppConfig) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Finlog")
        .default_width(1080)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Rc::new(Sidebar::new());
    split.set_flap(Some(&sidebar.widget()));

    let stack = gtk::Stack::new();
    stack.set_transition_type(gtk::StackTransitionType::Crossfade);
    split.set_content(Some(&stack));
    overlay.set_child(Some(&split));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Finlog"));
    title.add_css_class("title");
    header.set_title_widget(Some(&title));

    let menu_btn = gtk::ToggleButton::builder()
        .icon_name("sidebar-show-symbolic")
        .tooltip_text("Menu")
        .active(true)
        .build();
    {
        let split = split.clone();
        menu_btn.connect_toggled(move |btn| split.set_reveal_flap(btn.is_active()));
    }
    header.pack_start(&menu_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    match ApiClient::new(&config.base_url) {
        Ok(client) => {
            let participants = ParticipantsView::new(client.clone());
            let contacts = ContactsView::new(client, overlay.clone());
            stack.add_titled(
                &participants.widget(),
                Some(Route::Participants.name()),
                Route::Participants.title(),
            );
            stack.add_titled(
                &contacts.widget(),
                Some(Route::Contacts.name()),
                Route::Contacts.title(),
            );

            let navigate = {
                let stack = stack.clone();
                let title = title.clone();
                move |route: Route| {
                    log::debug!("navigate to {}", route.path());
                    stack.set_visible_child_name(route.name());
                    title.set_label(&format!("Finlog · {}", route.title()));
                }
            };
            let start = Route::resolve_or_default(&config.start_route);
            navigate(start);
            sidebar.select(start);
            sidebar.connect_navigate(navigate);
        }
        Err(err) => {
            log::error!("cannot use backend {}: {err}", config.base_url);
            let page = adw::StatusPage::builder()
                .icon_name("network-error-symbolic")
                .title("Backend unavailable")
                .description(err.to_string())
                .build();
            stack.add_named(&page, Some("error"));
            overlay.add_toast(adw::Toast::new("Check base_url in finlog.toml"));
        }
    }

    window.present();
}
