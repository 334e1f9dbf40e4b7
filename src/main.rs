mod app;
mod app_state;
mod components;
mod configuration;
mod controller;
mod editor;
mod text_input;
mod theme;

use std::path::PathBuf;

use gpui::{
    Application, Bounds, KeyBinding, WindowBackgroundAppearance, WindowBounds, WindowOptions,
    prelude::*, px, size,
};

use crate::{
    app::{
        Activate, Apply, Cancel, EditorInitialization, FocusNext, FocusPrevious, Quit, Reload,
        ServerEditorWindow,
    },
    app_state::AppState,
    configuration::Configuration,
    controller::ServerController,
    text_input::{
        Backspace, Copy, Cut, Delete, End, Home, Left, Paste, Right, SelectAll, SelectLeft,
        SelectRight,
    },
    theme::{WINDOW_HEIGHT, WINDOW_WIDTH},
};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("shadowsocks_server_editor=info"),
    )
    .init();

    log::info!(
        "shadowsocks-server-editor v{} starting (RUST_LOG={})",
        env!("CARGO_PKG_VERSION"),
        std::env::var("RUST_LOG").unwrap_or_else(|_| "<default: info>".into()),
    );

    let configuration_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(Configuration::default_path);
    let saved_state = AppState::load();

    Application::new().run(move |context| {
        let bounds = Bounds::centered(None, size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)), context);

        bind_keys(context);

        let controller = context.new(|_| ServerController::load(configuration_path.clone()));
        log::info!(
            "[startup] configuration path: {}",
            controller.read(context).path().display()
        );

        let window = context.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: None,
                window_background: WindowBackgroundAppearance::Opaque,
                ..Default::default()
            },
            |_, context| {
                context.new(|context| {
                    ServerEditorWindow::new(
                        EditorInitialization {
                            controller: controller.clone(),
                            app_state: saved_state.clone(),
                        },
                        context,
                    )
                })
            },
        );

        match window {
            Ok(window) => {
                if let Err(error) = window.update(context, |view, window, context| {
                    let handle = view.address_focus_handle(context);
                    window.focus(&handle, context);
                    context.activate(true);
                }) {
                    log::error!("[startup] failed to initialize editor window: {error}");
                    context.quit();
                    return;
                }

                context.on_action(|_: &Quit, context| context.quit());
            }
            Err(error) => {
                log::error!("[startup] failed to open editor window: {error}");
                context.quit();
            }
        }
    });
}

fn bind_keys(context: &mut gpui::App) {
    context.bind_keys([
        KeyBinding::new("backspace", Backspace, Some("TextInput")),
        KeyBinding::new("delete", Delete, Some("TextInput")),
        KeyBinding::new("left", Left, Some("TextInput")),
        KeyBinding::new("right", Right, Some("TextInput")),
        KeyBinding::new("shift-left", SelectLeft, Some("TextInput")),
        KeyBinding::new("shift-right", SelectRight, Some("TextInput")),
        KeyBinding::new("home", Home, Some("TextInput")),
        KeyBinding::new("end", End, Some("TextInput")),
        KeyBinding::new("cmd-a", SelectAll, Some("TextInput")),
        KeyBinding::new("cmd-v", Paste, Some("TextInput")),
        KeyBinding::new("cmd-c", Copy, Some("TextInput")),
        KeyBinding::new("cmd-x", Cut, Some("TextInput")),
        KeyBinding::new("ctrl-a", SelectAll, Some("TextInput")),
        KeyBinding::new("ctrl-v", Paste, Some("TextInput")),
        KeyBinding::new("ctrl-c", Copy, Some("TextInput")),
        KeyBinding::new("ctrl-x", Cut, Some("TextInput")),
    ]);

    context.bind_keys([
        KeyBinding::new("tab", FocusNext, Some("ServerEditor")),
        KeyBinding::new("shift-tab", FocusPrevious, Some("ServerEditor")),
        KeyBinding::new("space", Activate, Some("ServerEditor")),
        KeyBinding::new("enter", Apply, Some("ServerEditor")),
        KeyBinding::new("escape", Cancel, Some("ServerEditor")),
        KeyBinding::new("cmd-r", Reload, Some("ServerEditor")),
        KeyBinding::new("ctrl-r", Reload, Some("ServerEditor")),
        KeyBinding::new("cmd-q", Quit, Some("ServerEditor")),
        KeyBinding::new("ctrl-q", Quit, Some("ServerEditor")),
    ]);
}
