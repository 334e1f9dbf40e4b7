use gpui::{
    App, Context, CursorStyle, Entity, FocusHandle, Focusable, MouseButton, Subscription, Window,
    actions, div, prelude::*, px, rgb,
};

use crate::{
    app_state::AppState,
    components::*,
    configuration::METHODS,
    controller::{ConfigurationChanged, ServerController},
    editor::{EditorError, FormField, MoveDirection, ServerListEditor, ServerStore},
    text_input::{TextChanged, TextInput},
    theme::*,
};

actions!(
    server_editor,
    [
        Save,
        Apply,
        Cancel,
        Reload,
        AddServer,
        DeleteServer,
        DuplicateServer,
        MoveUp,
        MoveDown,
        FocusNext,
        FocusPrevious,
        Activate,
        Quit
    ]
);

pub struct EditorInitialization {
    pub controller: Entity<ServerController>,
    pub app_state: AppState,
}

enum Status {
    Saved,
    Error(String),
}

struct FormInputs {
    address: Entity<TextInput>,
    port: Entity<TextInput>,
    password: Entity<TextInput>,
    plugin: Entity<TextInput>,
    plugin_options: Entity<TextInput>,
    plugin_arguments: Entity<TextInput>,
    remarks: Entity<TextInput>,
    timeout: Entity<TextInput>,
    local_port: Entity<TextInput>,
}

impl FormInputs {
    fn new(context: &mut App, mask_password: bool) -> Self {
        Self {
            address: TextInput::new(context, "server.example.com", false),
            port: TextInput::new(context, "8388", false),
            password: TextInput::new(context, "password", mask_password),
            plugin: TextInput::new(context, "obfs-local", false),
            plugin_options: TextInput::new(context, "obfs=http;obfs-host=example.com", false),
            plugin_arguments: TextInput::new(context, "--fast-open", false),
            remarks: TextInput::new(context, "", false),
            timeout: TextInput::new(context, "5", false),
            local_port: TextInput::new(context, "1080", false),
        }
    }

    fn bound(&self) -> [(FormField, &Entity<TextInput>); 9] {
        [
            (FormField::Address, &self.address),
            (FormField::Port, &self.port),
            (FormField::Password, &self.password),
            (FormField::Plugin, &self.plugin),
            (FormField::PluginOptions, &self.plugin_options),
            (FormField::PluginArguments, &self.plugin_arguments),
            (FormField::Remarks, &self.remarks),
            (FormField::Timeout, &self.timeout),
            (FormField::LocalPort, &self.local_port),
        ]
    }

    fn get(&self, field: FormField) -> Option<&Entity<TextInput>> {
        self.bound()
            .into_iter()
            .find_map(|(bound_field, input)| (bound_field == field).then_some(input))
    }
}

pub struct ServerEditorWindow {
    controller: Entity<ServerController>,
    editor: ServerListEditor,
    inputs: FormInputs,
    show_password: bool,
    need_plugin_argument: bool,
    method_menu_open: bool,
    status: Option<Status>,
    focus_handle: FocusHandle,
    server_focus_handles: Vec<FocusHandle>,
    add_focus_handle: FocusHandle,
    delete_focus_handle: FocusHandle,
    duplicate_focus_handle: FocusHandle,
    move_up_focus_handle: FocusHandle,
    move_down_focus_handle: FocusHandle,
    show_password_focus_handle: FocusHandle,
    method_focus_handle: FocusHandle,
    need_plugin_argument_focus_handle: FocusHandle,
    portable_mode_focus_handle: FocusHandle,
    ok_focus_handle: FocusHandle,
    cancel_focus_handle: FocusHandle,
    apply_focus_handle: FocusHandle,
    _subscriptions: Vec<Subscription>,
}

impl ServerEditorWindow {
    pub fn new(initialization: EditorInitialization, context: &mut Context<Self>) -> Self {
        let show_password = initialization.app_state.show_password;
        let inputs = FormInputs::new(context, !show_password);
        let controller = initialization.controller;
        let editor = ServerListEditor::new(controller.read(context).configuration_copy());

        let mut subscriptions = vec![context.subscribe(&controller, Self::on_configuration_changed)];
        for (field, input) in inputs.bound() {
            subscriptions.push(context.subscribe(
                input,
                move |this, input, _: &TextChanged, context| {
                    let text = input.read(context).text();
                    this.editor.set_field(field, text);
                    context.notify();
                },
            ));
        }

        let mut this = Self {
            controller,
            editor,
            inputs,
            show_password,
            need_plugin_argument: false,
            method_menu_open: false,
            status: None,
            focus_handle: context.focus_handle(),
            server_focus_handles: Vec::new(),
            add_focus_handle: context.focus_handle(),
            delete_focus_handle: context.focus_handle(),
            duplicate_focus_handle: context.focus_handle(),
            move_up_focus_handle: context.focus_handle(),
            move_down_focus_handle: context.focus_handle(),
            show_password_focus_handle: context.focus_handle(),
            method_focus_handle: context.focus_handle(),
            need_plugin_argument_focus_handle: context.focus_handle(),
            portable_mode_focus_handle: context.focus_handle(),
            ok_focus_handle: context.focus_handle(),
            cancel_focus_handle: context.focus_handle(),
            apply_focus_handle: context.focus_handle(),
            _subscriptions: subscriptions,
        };
        this.push_form(context);
        this
    }

    pub fn address_focus_handle(&self, context: &App) -> FocusHandle {
        self.inputs.address.read(context).focus_handle.clone()
    }

    fn on_configuration_changed(
        &mut self,
        controller: Entity<ServerController>,
        _: &ConfigurationChanged,
        context: &mut Context<Self>,
    ) {
        log::info!("[editor] configuration changed, reloading");
        let configuration = controller.read(context).configuration_copy();
        self.editor.load(configuration);
        self.method_menu_open = false;
        self.push_form(context);
        context.notify();
    }

    fn push_form(&mut self, context: &mut Context<Self>) {
        for (field, input) in self.inputs.bound() {
            let value = self.editor.field_value(field).to_string();
            input.update(context, |input, context| input.set_text(&value, context));
        }
        self.need_plugin_argument = !self.editor.form().plugin_arguments.is_empty();
        self.sync_server_focus_handles(context);
    }

    fn pull_form(&mut self, context: &mut Context<Self>) {
        for (field, input) in self.inputs.bound() {
            let text = input.read(context).text();
            self.editor.set_field(field, text);
        }
    }

    fn sync_server_focus_handles(&mut self, context: &mut Context<Self>) {
        let count = self.editor.servers().len();
        while self.server_focus_handles.len() < count {
            self.server_focus_handles.push(context.focus_handle());
        }
        self.server_focus_handles.truncate(count);
    }

    fn run(
        &mut self,
        window: &mut Window,
        context: &mut Context<Self>,
        operation: impl FnOnce(&mut ServerListEditor) -> Result<(), EditorError>,
    ) {
        self.pull_form(context);
        self.method_menu_open = false;
        match operation(&mut self.editor) {
            Ok(()) => {
                self.status = None;
                self.push_form(context);
            }
            Err(error) => self.report(error, window, context),
        }
        context.notify();
    }

    fn report(&mut self, error: EditorError, window: &mut Window, context: &mut Context<Self>) {
        log::info!("[editor] rejected: {error}");
        self.status = Some(Status::Error(error.to_string()));
        let handle = match error.field() {
            Some(FormField::Method) => Some(self.method_focus_handle.clone()),
            Some(FormField::PluginArguments) => {
                self.need_plugin_argument = true;
                Some(self.inputs.plugin_arguments.read(context).focus_handle.clone())
            }
            Some(field) => self
                .inputs
                .get(field)
                .map(|input| input.read(context).focus_handle.clone()),
            None => None,
        };
        if let Some(handle) = handle {
            window.focus(&handle, context);
        }
    }

    // Returns whether the window may close.
    fn commit(&mut self, window: &mut Window, context: &mut Context<Self>) -> bool {
        self.pull_form(context);
        self.method_menu_open = false;

        let editor = &mut self.editor;
        let result = self.controller.update(context, |controller, context| {
            editor.save(controller)?;
            context.emit(ConfigurationChanged);
            Ok::<_, EditorError>(controller.take_error())
        });

        let saved = match result {
            Ok(None) => {
                self.status = Some(Status::Saved);
                true
            }
            Ok(Some(write_error)) => {
                self.status = Some(Status::Error(write_error));
                false
            }
            Err(error) => {
                self.report(error, window, context);
                false
            }
        };
        context.notify();
        saved
    }

    fn select_server(&mut self, index: usize, window: &mut Window, context: &mut Context<Self>) {
        self.run(window, context, |editor| editor.select(index));
    }

    fn add_server(&mut self, _: &AddServer, window: &mut Window, context: &mut Context<Self>) {
        self.run(window, context, ServerListEditor::add);
        if self.status.is_none() {
            let handle = self.address_focus_handle(context);
            window.focus(&handle, context);
        }
    }

    fn delete_server(&mut self, _: &DeleteServer, window: &mut Window, context: &mut Context<Self>) {
        self.run(window, context, |editor| {
            editor.delete();
            Ok(())
        });
    }

    fn duplicate_server(
        &mut self,
        _: &DuplicateServer,
        window: &mut Window,
        context: &mut Context<Self>,
    ) {
        self.run(window, context, ServerListEditor::duplicate);
    }

    fn move_up(&mut self, _: &MoveUp, window: &mut Window, context: &mut Context<Self>) {
        self.run(window, context, |editor| editor.move_selected(MoveDirection::Up));
    }

    fn move_down(&mut self, _: &MoveDown, window: &mut Window, context: &mut Context<Self>) {
        self.run(window, context, |editor| editor.move_selected(MoveDirection::Down));
    }

    fn apply(&mut self, _: &Apply, window: &mut Window, context: &mut Context<Self>) {
        self.commit(window, context);
    }

    fn save(&mut self, _: &Save, window: &mut Window, context: &mut Context<Self>) {
        if self.commit(window, context) {
            log::info!("[editor] saved, closing");
            context.quit();
        }
    }

    fn cancel(&mut self, _: &Cancel, _window: &mut Window, context: &mut Context<Self>) {
        if self.method_menu_open {
            self.method_menu_open = false;
            context.notify();
            return;
        }
        log::info!("[editor] cancelled, unsaved edits discarded");
        context.quit();
    }

    fn reload(&mut self, _: &Reload, _window: &mut Window, context: &mut Context<Self>) {
        self.status = None;
        self.controller.update(context, |controller, context| {
            controller.reload();
            context.emit(ConfigurationChanged);
        });
    }

    fn quit(&mut self, _: &Quit, _window: &mut Window, context: &mut Context<Self>) {
        log::info!("[quit] shutting down");
        context.quit();
    }

    fn toggle_show_password(&mut self, context: &mut Context<Self>) {
        self.show_password = !self.show_password;
        let masked = !self.show_password;
        self.inputs
            .password
            .update(context, |input, context| input.set_masked(masked, context));
        AppState {
            show_password: self.show_password,
        }
        .save();
        context.notify();
    }

    fn toggle_need_plugin_argument(&mut self, context: &mut Context<Self>) {
        self.need_plugin_argument = !self.need_plugin_argument;
        context.notify();
    }

    fn toggle_portable_mode(&mut self, context: &mut Context<Self>) {
        let portable_mode = !self.editor.portable_mode();
        self.editor.set_portable_mode(portable_mode);
        context.notify();
    }

    fn toggle_method_menu(&mut self, context: &mut Context<Self>) {
        self.method_menu_open = !self.method_menu_open;
        context.notify();
    }

    fn choose_method(&mut self, method: &str, context: &mut Context<Self>) {
        self.editor.set_field(FormField::Method, method);
        self.method_menu_open = false;
        context.notify();
    }

    fn focusable_entries(&self, context: &App) -> Vec<FocusHandle> {
        let input_handle = |input: &Entity<TextInput>| input.read(context).focus_handle.clone();
        let mut entries = self.server_focus_handles.clone();
        entries.extend([
            self.add_focus_handle.clone(),
            self.delete_focus_handle.clone(),
            self.duplicate_focus_handle.clone(),
            self.move_up_focus_handle.clone(),
            self.move_down_focus_handle.clone(),
            input_handle(&self.inputs.address),
            input_handle(&self.inputs.port),
            input_handle(&self.inputs.password),
            self.show_password_focus_handle.clone(),
            self.method_focus_handle.clone(),
            input_handle(&self.inputs.plugin),
            input_handle(&self.inputs.plugin_options),
            self.need_plugin_argument_focus_handle.clone(),
        ]);
        if self.need_plugin_argument {
            entries.push(input_handle(&self.inputs.plugin_arguments));
        }
        entries.extend([
            input_handle(&self.inputs.remarks),
            input_handle(&self.inputs.timeout),
            input_handle(&self.inputs.local_port),
            self.portable_mode_focus_handle.clone(),
            self.ok_focus_handle.clone(),
            self.cancel_focus_handle.clone(),
            self.apply_focus_handle.clone(),
        ]);
        entries
    }

    fn focus_next(&mut self, _: &FocusNext, window: &mut Window, context: &mut Context<Self>) {
        let entries = self.focusable_entries(context);
        let next = entries
            .iter()
            .position(|handle| handle.is_focused(window))
            .map(|current| (current + 1) % entries.len())
            .unwrap_or(0);
        window.focus(&entries[next], context);
    }

    fn focus_previous(
        &mut self,
        _: &FocusPrevious,
        window: &mut Window,
        context: &mut Context<Self>,
    ) {
        let entries = self.focusable_entries(context);
        let previous = entries
            .iter()
            .position(|handle| handle.is_focused(window))
            .map(|current| current.checked_sub(1).unwrap_or(entries.len() - 1))
            .unwrap_or(0);
        window.focus(&entries[previous], context);
    }

    fn activate(&mut self, _: &Activate, window: &mut Window, context: &mut Context<Self>) {
        if let Some(index) = self
            .server_focus_handles
            .iter()
            .position(|handle| handle.is_focused(window))
        {
            self.select_server(index, window, context);
        } else if self.add_focus_handle.is_focused(window) {
            self.add_server(&AddServer, window, context);
        } else if self.delete_focus_handle.is_focused(window) {
            if self.editor.buttons().delete {
                self.delete_server(&DeleteServer, window, context);
            }
        } else if self.duplicate_focus_handle.is_focused(window) {
            self.duplicate_server(&DuplicateServer, window, context);
        } else if self.move_up_focus_handle.is_focused(window) {
            self.move_up(&MoveUp, window, context);
        } else if self.move_down_focus_handle.is_focused(window) {
            self.move_down(&MoveDown, window, context);
        } else if self.show_password_focus_handle.is_focused(window) {
            self.toggle_show_password(context);
        } else if self.method_focus_handle.is_focused(window) {
            self.toggle_method_menu(context);
        } else if self.need_plugin_argument_focus_handle.is_focused(window) {
            self.toggle_need_plugin_argument(context);
        } else if self.portable_mode_focus_handle.is_focused(window) {
            self.toggle_portable_mode(context);
        } else if self.ok_focus_handle.is_focused(window) {
            self.save(&Save, window, context);
        } else if self.cancel_focus_handle.is_focused(window) {
            self.cancel(&Cancel, window, context);
        } else if self.apply_focus_handle.is_focused(window) {
            if self.editor.buttons().apply {
                self.apply(&Apply, window, context);
            }
        } else {
            context.propagate();
        }
    }
}

impl Focusable for ServerEditorWindow {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for ServerEditorWindow {
    fn render(&mut self, _window: &mut Window, context: &mut Context<Self>) -> impl IntoElement {
        div()
            .key_context("ServerEditor")
            .track_focus(&self.focus_handle(context))
            .on_action(context.listener(Self::save))
            .on_action(context.listener(Self::apply))
            .on_action(context.listener(Self::cancel))
            .on_action(context.listener(Self::reload))
            .on_action(context.listener(Self::add_server))
            .on_action(context.listener(Self::delete_server))
            .on_action(context.listener(Self::duplicate_server))
            .on_action(context.listener(Self::move_up))
            .on_action(context.listener(Self::move_down))
            .on_action(context.listener(Self::focus_next))
            .on_action(context.listener(Self::focus_previous))
            .on_action(context.listener(Self::activate))
            .on_action(context.listener(Self::quit))
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(SURFACE))
            .child(self.render_titlebar(context))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .flex_1()
                    .overflow_hidden()
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .w(px(LIST_COLUMN_WIDTH))
                            .flex_shrink_0()
                            .border_r_1()
                            .border_color(rgb(BORDER))
                            .px(px(PADDING_COLUMN))
                            .pb(px(PADDING_COLUMN))
                            .pt(px(PADDING_COLUMN_TOP))
                            .gap(px(GAP_MEDIUM))
                            .child(self.render_server_list(context)),
                    )
                    .child(
                        div()
                            .id("server-fields")
                            .flex()
                            .flex_col()
                            .flex_1()
                            .overflow_y_scroll()
                            .px(px(PADDING_COLUMN))
                            .pb(px(PADDING_COLUMN))
                            .pt(px(PADDING_COLUMN_TOP))
                            .gap(px(GAP_SMALL))
                            .child(self.render_server_fields(context))
                            .child(self.render_global_settings(context)),
                    ),
            )
            .child(self.render_footer(context))
    }
}

impl ServerEditorWindow {
    fn render_titlebar(&self, context: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_row()
            .items_center()
            .w_full()
            .h(px(TITLEBAR_HEIGHT))
            .bg(rgb(TITLEBAR_BACKGROUND))
            .child(
                titlebar_title("Edit Servers")
                    .cursor(CursorStyle::default())
                    .on_mouse_down(
                        MouseButton::Left,
                        context.listener(|_, _, window, _| window.start_window_move()),
                    ),
            )
            .child(titlebar_close().on_mouse_up(
                MouseButton::Left,
                context.listener(|this, _, window, context| this.cancel(&Cancel, window, context)),
            ))
    }

    fn render_server_list(&self, context: &mut Context<Self>) -> impl IntoElement {
        let buttons = self.editor.buttons();
        let selected = self.editor.selected();

        let mut list = div()
            .id("server-list")
            .flex()
            .flex_col()
            .flex_1()
            .gap(px(GAP_EXTRA_SMALL))
            .overflow_y_scroll();
        for (index, name) in self.editor.labels().iter().enumerate() {
            list = list.child(
                server_item(name, selected == Some(index), &self.server_focus_handles[index])
                    .on_mouse_up(
                        MouseButton::Left,
                        context.listener(move |this, _, window, context| {
                            this.select_server(index, window, context);
                        }),
                    ),
            );
        }

        div()
            .flex()
            .flex_col()
            .flex_1()
            .gap(px(GAP_EXTRA_SMALL))
            .w_full()
            .child(label("Servers"))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .flex_1()
                    .gap(px(GAP_SMALL))
                    .w_full()
                    .child(list)
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .flex_shrink_0()
                            .w(px(LIST_BUTTON_WIDTH))
                            .gap(px(GAP_EXTRA_SMALL))
                            .child(button_ghost("Add", false, &self.add_focus_handle).on_mouse_up(
                                MouseButton::Left,
                                context.listener(|this, _, window, context| {
                                    this.add_server(&AddServer, window, context);
                                }),
                            ))
                            .child(
                                button_ghost("Delete", !buttons.delete, &self.delete_focus_handle)
                                    .when(buttons.delete, |element| {
                                        element.on_mouse_up(
                                            MouseButton::Left,
                                            context.listener(|this, _, window, context| {
                                                this.delete_server(&DeleteServer, window, context);
                                            }),
                                        )
                                    }),
                            )
                            .child(
                                button_ghost(
                                    "Duplicate",
                                    !buttons.duplicate,
                                    &self.duplicate_focus_handle,
                                )
                                .when(buttons.duplicate, |element| {
                                    element.on_mouse_up(
                                        MouseButton::Left,
                                        context.listener(|this, _, window, context| {
                                            this.duplicate_server(&DuplicateServer, window, context);
                                        }),
                                    )
                                }),
                            )
                            .child(
                                button_ghost("Move Up", !buttons.move_up, &self.move_up_focus_handle)
                                    .when(buttons.move_up, |element| {
                                        element.on_mouse_up(
                                            MouseButton::Left,
                                            context.listener(|this, _, window, context| {
                                                this.move_up(&MoveUp, window, context);
                                            }),
                                        )
                                    }),
                            )
                            .child(
                                button_ghost(
                                    "Move Down",
                                    !buttons.move_down,
                                    &self.move_down_focus_handle,
                                )
                                .when(buttons.move_down, |element| {
                                    element.on_mouse_up(
                                        MouseButton::Left,
                                        context.listener(|this, _, window, context| {
                                            this.move_down(&MoveDown, window, context);
                                        }),
                                    )
                                }),
                            ),
                    ),
            )
    }

    fn render_server_fields(&self, context: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap(px(GAP_SMALL))
            .w_full()
            .child(label("Server"))
            .child(field("Server Addr", &self.inputs.address))
            .child(field("Server Port", &self.inputs.port))
            .child(field("Password", &self.inputs.password))
            .child(toggle(
                "Show Password",
                self.show_password,
                &self.show_password_focus_handle,
                context.listener(|this, _, _, context| this.toggle_show_password(context)),
            ))
            .child(self.render_method_selector(context))
            .child(field("Plugin Program", &self.inputs.plugin))
            .child(field("Plugin Options", &self.inputs.plugin_options))
            .child(toggle(
                "Need Plugin Argument",
                self.need_plugin_argument,
                &self.need_plugin_argument_focus_handle,
                context.listener(|this, _, _, context| this.toggle_need_plugin_argument(context)),
            ))
            .when(self.need_plugin_argument, |element| {
                element.child(field("Plugin Arguments", &self.inputs.plugin_arguments))
            })
            .child(field("Remarks", &self.inputs.remarks))
            .child(field("Timeout(Sec)", &self.inputs.timeout))
    }

    fn render_method_selector(&self, context: &mut Context<Self>) -> impl IntoElement {
        let current = self.editor.form().method.clone();

        let mut selector = div()
            .flex()
            .flex_col()
            .gap(px(GAP_EXTRA_SMALL))
            .w_full()
            .child(label("Encryption"))
            .child(
                method_button(&current, self.method_menu_open, &self.method_focus_handle)
                    .on_mouse_up(
                        MouseButton::Left,
                        context.listener(|this, _, _, context| this.toggle_method_menu(context)),
                    ),
            );

        if self.method_menu_open {
            let mut menu = method_menu();
            for method in METHODS {
                menu = menu.child(method_option(method, *method == current).on_mouse_up(
                    MouseButton::Left,
                    context.listener(move |this, _, _, context| {
                        this.choose_method(method, context);
                    }),
                ));
            }
            selector = selector.child(menu);
        }
        selector
    }

    fn render_global_settings(&self, context: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap(px(GAP_SMALL))
            .w_full()
            .pt(px(GAP_MEDIUM))
            .child(field("Proxy Port", &self.inputs.local_port))
            .child(toggle(
                "Portable Mode",
                self.editor.portable_mode(),
                &self.portable_mode_focus_handle,
                context.listener(|this, _, _, context| this.toggle_portable_mode(context)),
            ))
            .child(hint("Restart required"))
    }

    fn render_footer(&self, context: &mut Context<Self>) -> impl IntoElement {
        let apply_enabled = self.editor.buttons().apply;
        let status = match &self.status {
            Some(Status::Saved) => Some(status_message("Saved".into(), false)),
            Some(Status::Error(message)) => Some(status_message(message.clone(), true)),
            None => None,
        };

        div()
            .flex()
            .flex_row()
            .items_center()
            .justify_between()
            .w_full()
            .px(px(PADDING_COLUMN))
            .py(px(GAP_MEDIUM))
            .border_t_1()
            .border_color(rgb(BORDER))
            .child(div().flex_1().children(status))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(px(GAP_SMALL))
                    .child(button_action("OK", false, &self.ok_focus_handle).on_mouse_up(
                        MouseButton::Left,
                        context.listener(|this, _, window, context| {
                            this.save(&Save, window, context);
                        }),
                    ))
                    .child(
                        button_action("Cancel", false, &self.cancel_focus_handle).on_mouse_up(
                            MouseButton::Left,
                            context.listener(|this, _, window, context| {
                                this.cancel(&Cancel, window, context);
                            }),
                        ),
                    )
                    .child(
                        button_action("Apply", !apply_enabled, &self.apply_focus_handle).when(
                            apply_enabled,
                            |element| {
                                element.on_mouse_up(
                                    MouseButton::Left,
                                    context.listener(|this, _, window, context| {
                                        this.apply(&Apply, window, context);
                                    }),
                                )
                            },
                        ),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use gpui::{TestAppContext, WindowHandle};

    use super::*;
    use crate::configuration::{CONFIGURATION_FILE_NAME, Configuration, Server};

    fn server(address: &str) -> Server {
        Server {
            server: address.into(),
            password: "secret".into(),
            ..Server::default()
        }
    }

    fn write_servers(path: &Path, addresses: &[&str]) {
        Configuration {
            configs: addresses.iter().map(|address| server(address)).collect(),
            ..Configuration::default()
        }
        .save(path)
        .unwrap();
    }

    fn open_editor(
        cx: &mut TestAppContext,
        path: PathBuf,
    ) -> (Entity<ServerController>, WindowHandle<ServerEditorWindow>) {
        let controller = cx.new(|_| ServerController::load(path));
        let window = cx.add_window({
            let controller = controller.clone();
            move |_, context| {
                ServerEditorWindow::new(
                    EditorInitialization {
                        controller,
                        app_state: AppState::default(),
                    },
                    context,
                )
            }
        });
        (controller, window)
    }

    fn type_into(input: &Entity<TextInput>, text: &str, context: &mut Context<ServerEditorWindow>) {
        input.update(context, |input, context| {
            input.set_text(text, context);
            context.emit(TextChanged);
        });
    }

    #[gpui::test]
    fn opening_fills_inputs_from_selected_server(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1", "2.2.2.2"]);

        let (_controller, window) = open_editor(cx, path);

        window
            .update(cx, |view, _, context| {
                assert_eq!(view.inputs.address.read(context).text(), "1.1.1.1");
                assert_eq!(view.inputs.port.read(context).text(), "8388");
                assert_eq!(view.inputs.local_port.read(context).text(), "1080");
                assert_eq!(view.server_focus_handles.len(), 2);
                assert!(!view.editor.is_dirty());
            })
            .unwrap();
    }

    #[gpui::test]
    fn typing_marks_editor_dirty(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1"]);
        let (_controller, window) = open_editor(cx, path);

        window
            .update(cx, |view, _, context| {
                let input = view.inputs.remarks.clone();
                type_into(&input, "office", context);
            })
            .unwrap();
        cx.run_until_parked();

        window
            .update(cx, |view, _, _| {
                assert_eq!(view.editor.form().remarks, "office");
                assert!(view.editor.buttons().apply);
            })
            .unwrap();
    }

    #[gpui::test]
    fn configuration_change_reloads_and_drops_pending_edits(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1"]);
        let (controller, window) = open_editor(cx, path.clone());

        window
            .update(cx, |view, _, context| {
                let input = view.inputs.address.clone();
                type_into(&input, "draft.example", context);
            })
            .unwrap();
        cx.run_until_parked();
        window
            .update(cx, |view, _, _| assert!(view.editor.is_dirty()))
            .unwrap();

        write_servers(&path, &["2.2.2.2", "3.3.3.3"]);
        controller.update(cx, |controller, context| {
            controller.reload();
            context.emit(ConfigurationChanged);
        });
        cx.run_until_parked();

        window
            .update(cx, |view, _, context| {
                assert_eq!(view.editor.labels(), ["2.2.2.2:8388", "3.3.3.3:8388"]);
                assert_eq!(view.inputs.address.read(context).text(), "2.2.2.2");
                assert_eq!(view.server_focus_handles.len(), 2);
                assert!(!view.editor.is_dirty());
            })
            .unwrap();
    }

    #[gpui::test]
    fn commit_writes_edits_and_reports_saved(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1"]);
        let (_controller, window) = open_editor(cx, path.clone());

        let saved = window
            .update(cx, |view, window, context| {
                view.inputs
                    .remarks
                    .update(context, |input, context| input.set_text("office", context));
                view.commit(window, context)
            })
            .unwrap();
        cx.run_until_parked();

        assert!(saved);
        window
            .update(cx, |view, _, _| {
                assert!(matches!(view.status, Some(Status::Saved)));
                assert_eq!(view.editor.labels(), ["office (1.1.1.1:8388)"]);
            })
            .unwrap();
        let written = Configuration::load(&path).unwrap();
        assert_eq!(written.configs[0].remarks, "office");
    }

    #[gpui::test]
    fn write_failure_is_shown_and_keeps_window_open(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1"]);
        let (_controller, window) = open_editor(cx, path.clone());

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let saved = window
            .update(cx, |view, window, context| view.commit(window, context))
            .unwrap();
        cx.run_until_parked();

        assert!(!saved);
        window
            .update(cx, |view, _, _| {
                assert!(matches!(view.status, Some(Status::Error(_))));
            })
            .unwrap();
    }

    #[gpui::test]
    fn invalid_edit_focuses_offending_field(cx: &mut TestAppContext) {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        write_servers(&path, &["1.1.1.1"]);
        let (_controller, window) = open_editor(cx, path.clone());

        let saved = window
            .update(cx, |view, window, context| {
                view.inputs
                    .port
                    .update(context, |input, context| input.set_text("eighty", context));
                let saved = view.commit(window, context);
                let port_focus = view.inputs.port.read(context).focus_handle.clone();
                assert!(port_focus.is_focused(window));
                saved
            })
            .unwrap();

        assert!(!saved);
        window
            .update(cx, |view, _, _| match &view.status {
                Some(Status::Error(message)) => assert_eq!(message, "Illegal port number format"),
                _ => panic!("expected a validation error"),
            })
            .unwrap();
        assert_eq!(Configuration::load(&path).unwrap().configs[0].server_port, 8388);
    }
}
