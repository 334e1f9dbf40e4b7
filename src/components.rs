use gpui::{
    App, Div, Entity, FocusHandle, MouseButton, MouseUpEvent, Stateful, Window, div, prelude::*,
    px, rgb,
};

use crate::{text_input::TextInput, theme::*};

pub fn label(text: &str) -> Div {
    div()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .child(text.to_string())
}

pub fn field(text: &str, input: &Entity<TextInput>) -> Div {
    div()
        .flex()
        .flex_col()
        .gap(px(GAP_EXTRA_SMALL))
        .w_full()
        .child(label(text))
        .child(input.clone())
}

pub fn server_item(name: &str, active: bool, focus_handle: &FocusHandle) -> Div {
    let (background, text_color, border) = if active {
        (BUTTON_PRIMARY, TEXT_WHITE, BORDER_FOCUS)
    } else {
        (INPUT_BACKGROUND, TEXT_PRIMARY, BORDER)
    };

    div()
        .track_focus(focus_handle)
        .flex()
        .flex_shrink_0()
        .items_center()
        .h(px(ELEMENT_HEIGHT))
        .w_full()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .rounded(px(RADIUS))
        .border_1()
        .border_color(rgb(border))
        .bg(rgb(background))
        .text_color(rgb(text_color))
        .text_size(px(TEXT_SIZE_SMALL))
        .cursor_pointer()
        .when(active, |element| {
            element.focus(|style| style.bg(rgb(BUTTON_HOVER)))
        })
        .when(!active, |element| {
            element
                .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
                .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        })
        .overflow_hidden()
        .child(name.to_string())
}

pub fn toggle(
    text: &str,
    value: bool,
    focus_handle: &FocusHandle,
    on_click: impl Fn(&MouseUpEvent, &mut Window, &mut App) + 'static,
) -> Div {
    let (background, border, dot_offset) = if value {
        (BUTTON_PRIMARY, BORDER_FOCUS, px(TOGGLE_DOT_ON_OFFSET))
    } else {
        (INPUT_BACKGROUND, BORDER, px(TOGGLE_DOT_OFF_OFFSET))
    };

    div()
        .flex()
        .flex_row()
        .items_center()
        .justify_between()
        .w_full()
        .child(label(text))
        .child(
            div()
                .track_focus(focus_handle)
                .flex()
                .flex_shrink_0()
                .items_center()
                .w(px(TOGGLE_WIDTH))
                .h(px(TOGGLE_HEIGHT))
                .rounded(px(TOGGLE_HEIGHT / 2.0))
                .bg(rgb(background))
                .border_1()
                .border_color(rgb(border))
                .cursor_pointer()
                .when(value, |element| {
                    element
                        .hover(|style| style.bg(rgb(BUTTON_HOVER)))
                        .focus(|style| style.bg(rgb(BUTTON_HOVER)))
                })
                .when(!value, |element| {
                    element
                        .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
                        .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
                })
                .on_mouse_up(MouseButton::Left, on_click)
                .child(
                    div()
                        .size(px(TOGGLE_DOT_SIZE))
                        .rounded(px(TOGGLE_DOT_SIZE / 2.0))
                        .bg(rgb(TEXT_WHITE))
                        .ml(dot_offset),
                ),
        )
}

pub fn method_button(method: &str, open: bool, focus_handle: &FocusHandle) -> Div {
    div()
        .track_focus(focus_handle)
        .flex()
        .flex_row()
        .items_center()
        .justify_between()
        .h(px(ELEMENT_HEIGHT))
        .w_full()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .bg(rgb(INPUT_BACKGROUND))
        .border_1()
        .border_color(rgb(if open { BORDER_FOCUS } else { BORDER }))
        .rounded(px(RADIUS))
        .cursor_pointer()
        .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
        .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        .text_size(px(TEXT_SIZE_MEDIUM))
        .text_color(rgb(TEXT_PRIMARY))
        .child(method.to_string())
        .child(
            div()
                .text_size(px(TEXT_SIZE_EXTRA_SMALL))
                .text_color(rgb(TEXT_DIM))
                .child(if open { "▲" } else { "▼" }),
        )
}

pub fn method_menu() -> Stateful<Div> {
    div()
        .id("method-menu")
        .flex()
        .flex_col()
        .w_full()
        .max_h(px(METHOD_MENU_HEIGHT))
        .overflow_y_scroll()
        .bg(rgb(MENU_BACKGROUND))
        .border_1()
        .border_color(rgb(BORDER))
        .rounded(px(RADIUS))
}

pub fn method_option(method: &str, active: bool) -> Div {
    div()
        .flex()
        .flex_shrink_0()
        .items_center()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .py(px(PADDING_INPUT_VERTICAL))
        .w_full()
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(if active { BORDER_FOCUS } else { TEXT_PRIMARY }))
        .cursor_pointer()
        .hover(|style| style.bg(rgb(INPUT_BACKGROUND)))
        .child(method.to_string())
}

pub fn button_action(text: &str, disabled: bool, focus_handle: &FocusHandle) -> Div {
    let (background, text_color) = if disabled {
        (BORDER, TEXT_DIM)
    } else {
        (BUTTON_PRIMARY, TEXT_WHITE)
    };

    div()
        .track_focus(focus_handle)
        .flex()
        .items_center()
        .justify_center()
        .h(px(ELEMENT_HEIGHT))
        .w(px(DIALOG_BUTTON_WIDTH))
        .bg(rgb(background))
        .rounded(px(RADIUS))
        .border_1()
        .border_color(gpui::transparent_black())
        .when(!disabled, |element| {
            element
                .cursor_pointer()
                .hover(|style| style.bg(rgb(BUTTON_HOVER)))
                .focus(|style| style.border_color(rgb(BORDER_FOCUS)).bg(rgb(BUTTON_HOVER)))
        })
        .text_color(rgb(text_color))
        .text_size(px(TEXT_SIZE_MEDIUM))
        .child(text.to_string())
}

pub fn button_ghost(text: &str, disabled: bool, focus_handle: &FocusHandle) -> Div {
    div()
        .track_focus(focus_handle)
        .flex()
        .flex_shrink_0()
        .items_center()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .h(px(ELEMENT_HEIGHT))
        .w_full()
        .bg(rgb(INPUT_BACKGROUND))
        .border_1()
        .border_color(rgb(BORDER))
        .rounded(px(RADIUS))
        .text_color(rgb(if disabled { TEXT_DIM } else { TEXT_PRIMARY }))
        .text_size(px(TEXT_SIZE_MEDIUM))
        .when(!disabled, |element| {
            element
                .cursor_pointer()
                .hover(|style| style.border_color(rgb(BORDER_FOCUS)))
                .focus(|style| style.border_color(rgb(BORDER_FOCUS)))
        })
        .child(text.to_string())
}

pub fn status_message(text: String, is_error: bool) -> Div {
    div()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(if is_error { COLOR_RED } else { COLOR_GREEN }))
        .child(text)
}

pub fn hint(text: &str) -> Div {
    div()
        .px(px(PADDING_INPUT_HORIZONTAL))
        .text_size(px(TEXT_SIZE_EXTRA_SMALL))
        .text_color(rgb(TEXT_DIM))
        .child(text.to_string())
}

pub fn titlebar_title(text: &str) -> Div {
    div()
        .flex()
        .flex_1()
        .h_full()
        .items_center()
        .pl(px(PADDING_COLUMN + PADDING_INPUT_HORIZONTAL))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .child(text.to_string())
}

pub fn titlebar_close() -> Stateful<Div> {
    div()
        .id("titlebar-close")
        .flex()
        .items_center()
        .px(px(PADDING_COLUMN + PADDING_INPUT_HORIZONTAL))
        .h(px(TITLEBAR_HEIGHT))
        .text_size(px(TEXT_SIZE_SMALL))
        .text_color(rgb(TEXT_DIM))
        .cursor_pointer()
        .hover(|style| {
            style
                .bg(rgb(BUTTON_DANGER_HOVER))
                .text_color(rgb(TEXT_WHITE))
        })
        .child("Close")
}
