use std::ops::Range;

use gpui::{
    App, Bounds, ClipboardItem, Context, CursorStyle, ElementId, ElementInputHandler, Entity,
    EntityInputHandler, EventEmitter, FocusHandle, Focusable, GlobalElementId, LayoutId,
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, PaintQuad, Pixels, Point,
    ShapedLine, SharedString, Style, TextAlign, TextRun, UTF16Selection, Window, actions, div,
    fill, point, prelude::*, px, relative, rgb, rgba,
};
use unicode_segmentation::*;

use crate::theme::*;

actions!(
    text_input,
    [
        Backspace,
        Delete,
        Left,
        Right,
        SelectLeft,
        SelectRight,
        SelectAll,
        Home,
        End,
        ShowCharacterPalette,
        Paste,
        Cut,
        Copy,
    ]
);

const MASK: char = '•';

pub struct TextChanged;

pub struct TextInput {
    pub focus_handle: FocusHandle,
    content: SharedString,
    placeholder: SharedString,
    selected_range: Range<usize>,
    selection_reversed: bool,
    marked_range: Option<Range<usize>>,
    last_layout: Option<ShapedLine>,
    last_bounds: Option<Bounds<Pixels>>,
    is_selecting: bool,
    masked: bool,
}

impl EventEmitter<TextChanged> for TextInput {}

impl TextInput {
    pub fn new(context: &mut App, placeholder: &str, masked: bool) -> Entity<Self> {
        let placeholder: SharedString = placeholder.to_string().into();
        context.new(|context| Self {
            focus_handle: context.focus_handle(),
            content: SharedString::default(),
            placeholder,
            selected_range: 0..0,
            selection_reversed: false,
            marked_range: None,
            last_layout: None,
            last_bounds: None,
            is_selecting: false,
            masked,
        })
    }

    pub fn text(&self) -> String {
        self.content.to_string()
    }

    // Does not emit TextChanged.
    pub fn set_text(&mut self, text: &str, context: &mut Context<Self>) {
        if self.content.as_ref() == text {
            return;
        }
        self.content = text.to_string().into();
        let length = self.content.len();
        self.selected_range = length..length;
        self.selection_reversed = false;
        self.marked_range = None;
        context.notify();
    }

    pub fn set_masked(&mut self, masked: bool, context: &mut Context<Self>) {
        self.masked = masked;
        context.notify();
    }

    fn left(&mut self, _: &Left, _: &mut Window, context: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()), context);
        } else {
            self.move_to(self.selected_range.start, context);
        }
    }

    fn right(&mut self, _: &Right, _: &mut Window, context: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.selected_range.end), context);
        } else {
            self.move_to(self.selected_range.end, context);
        }
    }

    fn select_left(&mut self, _: &SelectLeft, _: &mut Window, context: &mut Context<Self>) {
        self.select_to(self.previous_boundary(self.cursor_offset()), context);
    }

    fn select_right(&mut self, _: &SelectRight, _: &mut Window, context: &mut Context<Self>) {
        self.select_to(self.next_boundary(self.cursor_offset()), context);
    }

    fn select_all(&mut self, _: &SelectAll, _: &mut Window, context: &mut Context<Self>) {
        self.move_to(0, context);
        self.select_to(self.content.len(), context);
    }

    fn home(&mut self, _: &Home, _: &mut Window, context: &mut Context<Self>) {
        self.move_to(0, context);
    }

    fn end(&mut self, _: &End, _: &mut Window, context: &mut Context<Self>) {
        self.move_to(self.content.len(), context);
    }

    fn backspace(&mut self, _: &Backspace, window: &mut Window, context: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()), context);
        }
        self.replace_text_in_range(None, "", window, context);
    }

    fn delete(&mut self, _: &Delete, window: &mut Window, context: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()), context);
        }
        self.replace_text_in_range(None, "", window, context);
    }

    fn on_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        _window: &mut Window,
        context: &mut Context<Self>,
    ) {
        self.is_selecting = true;
        let offset = self.index_for_mouse_position(event.position);
        if event.modifiers.shift {
            self.select_to(offset, context);
        } else {
            self.move_to(offset, context);
        }
    }

    fn on_mouse_up(&mut self, _: &MouseUpEvent, _: &mut Window, _: &mut Context<Self>) {
        self.is_selecting = false;
    }

    fn on_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        _: &mut Window,
        context: &mut Context<Self>,
    ) {
        if self.is_selecting {
            self.select_to(self.index_for_mouse_position(event.position), context);
        }
    }

    fn show_character_palette(
        &mut self,
        _: &ShowCharacterPalette,
        window: &mut Window,
        _: &mut Context<Self>,
    ) {
        window.show_character_palette();
    }

    fn paste(&mut self, _: &Paste, window: &mut Window, context: &mut Context<Self>) {
        if let Some(text) = context.read_from_clipboard().and_then(|item| item.text()) {
            self.replace_text_in_range(None, &text, window, context);
        }
    }

    fn copy(&mut self, _: &Copy, _: &mut Window, context: &mut Context<Self>) {
        // Masked content never reaches the clipboard.
        if !self.selected_range.is_empty() && !self.masked {
            context.write_to_clipboard(ClipboardItem::new_string(
                self.content[self.selected_range.clone()].to_string(),
            ));
        }
    }

    fn cut(&mut self, _: &Cut, window: &mut Window, context: &mut Context<Self>) {
        if self.selected_range.is_empty() || self.masked {
            return;
        }
        context.write_to_clipboard(ClipboardItem::new_string(
            self.content[self.selected_range.clone()].to_string(),
        ));
        self.replace_text_in_range(None, "", window, context);
    }

    fn move_to(&mut self, offset: usize, context: &mut Context<Self>) {
        self.selected_range = offset..offset;
        context.notify();
    }

    fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    fn select_to(&mut self, offset: usize, context: &mut Context<Self>) {
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }
        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
        context.notify();
    }

    fn display_text(&self) -> SharedString {
        if self.masked {
            self.content.graphemes(true).map(|_| MASK).collect::<String>().into()
        } else {
            self.content.clone()
        }
    }

    fn content_to_display(&self, offset: usize) -> usize {
        if self.masked {
            self.content[..offset].graphemes(true).count() * MASK.len_utf8()
        } else {
            offset
        }
    }

    fn display_to_content(&self, display_offset: usize) -> usize {
        if !self.masked {
            return display_offset;
        }
        self.content
            .grapheme_indices(true)
            .nth(display_offset / MASK.len_utf8())
            .map(|(index, _)| index)
            .unwrap_or(self.content.len())
    }

    fn index_for_mouse_position(&self, position: Point<Pixels>) -> usize {
        let (Some(bounds), Some(line)) = (self.last_bounds.as_ref(), self.last_layout.as_ref())
        else {
            return 0;
        };
        if self.content.is_empty() || position.y < bounds.top() {
            return 0;
        }
        if position.y > bounds.bottom() {
            return self.content.len();
        }
        self.display_to_content(line.closest_index_for_x(position.x - bounds.left()))
    }

    fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;
        for character in self.content.chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += character.len_utf16();
            utf8_offset += character.len_utf8();
        }
        utf8_offset
    }

    fn offset_to_utf16(&self, offset: usize) -> usize {
        self.content[..offset]
            .chars()
            .map(char::len_utf16)
            .sum()
    }

    fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .rev()
            .find_map(|(index, _)| (index < offset).then_some(index))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .find_map(|(index, _)| (index > offset).then_some(index))
            .unwrap_or(self.content.len())
    }

    fn resolve_range(&self, range_utf16: Option<&Range<usize>>) -> Range<usize> {
        range_utf16
            .map(|range| self.range_from_utf16(range))
            .or(self.marked_range.clone())
            .unwrap_or(self.selected_range.clone())
    }
}

impl EntityInputHandler for TextInput {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _context: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        actual_range.replace(self.range_to_utf16(&range));
        Some(self.content[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _context: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range),
            reversed: self.selection_reversed,
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _context: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.marked_range
            .as_ref()
            .map(|range| self.range_to_utf16(range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _context: &mut Context<Self>) {
        self.marked_range = None;
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _: &mut Window,
        context: &mut Context<Self>,
    ) {
        let range = self.resolve_range(range_utf16.as_ref());
        let single_line: String = new_text
            .chars()
            .filter(|character| !matches!(character, '\n' | '\r'))
            .collect();

        self.content = format!(
            "{}{single_line}{}",
            &self.content[..range.start],
            &self.content[range.end..]
        )
        .into();
        let cursor = range.start + single_line.len();
        self.selected_range = cursor..cursor;
        self.marked_range = None;
        context.emit(TextChanged);
        context.notify();
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        context: &mut Context<Self>,
    ) {
        let range = self.resolve_range(range_utf16.as_ref());

        self.content = format!(
            "{}{new_text}{}",
            &self.content[..range.start],
            &self.content[range.end..]
        )
        .into();
        self.marked_range =
            (!new_text.is_empty()).then(|| range.start..range.start + new_text.len());
        self.selected_range = new_selected_range_utf16
            .as_ref()
            .map(|selected| self.range_from_utf16(selected))
            .map(|selected| selected.start + range.start..selected.end + range.start)
            .unwrap_or_else(|| range.start + new_text.len()..range.start + new_text.len());

        context.emit(TextChanged);
        context.notify();
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _context: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let last_layout = self.last_layout.as_ref()?;
        let range = self.range_from_utf16(&range_utf16);
        let start = self.content_to_display(range.start);
        let end = self.content_to_display(range.end);
        Some(Bounds::from_corners(
            point(bounds.left() + last_layout.x_for_index(start), bounds.top()),
            point(bounds.left() + last_layout.x_for_index(end), bounds.bottom()),
        ))
    }

    fn character_index_for_point(
        &mut self,
        position: Point<Pixels>,
        _window: &mut Window,
        _context: &mut Context<Self>,
    ) -> Option<usize> {
        let line_point = self.last_bounds?.localize(&position)?;
        let last_layout = self.last_layout.as_ref()?;
        let display_index = last_layout.index_for_x(position.x - line_point.x)?;
        Some(self.offset_to_utf16(self.display_to_content(display_index)))
    }
}

struct TextElement {
    input: Entity<TextInput>,
}

struct PrepaintState {
    line: Option<ShapedLine>,
    cursor: Option<PaintQuad>,
    selection: Option<PaintQuad>,
}

impl IntoElement for TextElement {
    type Element = Self;
    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for TextElement {
    type RequestLayoutState = ();
    type PrepaintState = PrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        window: &mut Window,
        context: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = window.line_height().into();
        (window.request_layout(style, [], context), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        context: &mut App,
    ) -> Self::PrepaintState {
        let input = self.input.read(context);
        let style = window.text_style();

        let (display_text, text_color) = if input.content.is_empty() {
            (input.placeholder.clone(), rgba(INPUT_PLACEHOLDER).into())
        } else {
            (input.display_text(), style.color)
        };

        let run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color: text_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let runs = match input.marked_range.as_ref() {
            Some(marked_range) if !input.masked && !input.content.is_empty() => [
                TextRun {
                    len: marked_range.start,
                    ..run.clone()
                },
                TextRun {
                    len: marked_range.end - marked_range.start,
                    underline: Some(gpui::UnderlineStyle {
                        color: Some(run.color),
                        thickness: px(1.0),
                        wavy: false,
                    }),
                    ..run.clone()
                },
                TextRun {
                    len: display_text.len() - marked_range.end,
                    ..run
                },
            ]
            .into_iter()
            .filter(|run| run.len > 0)
            .collect(),
            _ => vec![run],
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &runs, None);

        let selected_range = input.selected_range.clone();
        let (selection, cursor) = if selected_range.is_empty() {
            let cursor_x = line.x_for_index(input.content_to_display(input.cursor_offset()));
            (
                None,
                Some(fill(
                    Bounds::new(
                        point(bounds.left() + cursor_x, bounds.top()),
                        gpui::size(px(CURSOR_WIDTH), bounds.bottom() - bounds.top()),
                    ),
                    rgb(BORDER_FOCUS),
                )),
            )
        } else {
            let start = line.x_for_index(input.content_to_display(selected_range.start));
            let end = line.x_for_index(input.content_to_display(selected_range.end));
            (
                Some(fill(
                    Bounds::from_corners(
                        point(bounds.left() + start, bounds.top()),
                        point(bounds.left() + end, bounds.bottom()),
                    ),
                    rgba(SELECTION),
                )),
                None,
            )
        };

        PrepaintState {
            line: Some(line),
            cursor,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        context: &mut App,
    ) {
        let focus_handle = self.input.read(context).focus_handle.clone();
        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.input.clone()),
            context,
        );
        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection);
        }
        let Some(line) = prepaint.line.take() else {
            return;
        };
        if let Err(error) = line.paint(
            bounds.origin,
            window.line_height(),
            TextAlign::Left,
            None,
            window,
            context,
        ) {
            log::warn!("[text_input] failed to paint line: {error}");
        }
        if focus_handle.is_focused(window)
            && let Some(cursor) = prepaint.cursor.take()
        {
            window.paint_quad(cursor);
        }
        self.input.update(context, |input, _| {
            input.last_layout = Some(line);
            input.last_bounds = Some(bounds);
        });
    }
}

impl Render for TextInput {
    fn render(&mut self, window: &mut Window, context: &mut Context<Self>) -> impl IntoElement {
        let focused = self.focus_handle.is_focused(window);

        div()
            .flex()
            .key_context("TextInput")
            .track_focus(&self.focus_handle(context))
            .cursor(CursorStyle::IBeam)
            .on_action(context.listener(Self::backspace))
            .on_action(context.listener(Self::delete))
            .on_action(context.listener(Self::left))
            .on_action(context.listener(Self::right))
            .on_action(context.listener(Self::select_left))
            .on_action(context.listener(Self::select_right))
            .on_action(context.listener(Self::select_all))
            .on_action(context.listener(Self::home))
            .on_action(context.listener(Self::end))
            .on_action(context.listener(Self::show_character_palette))
            .on_action(context.listener(Self::paste))
            .on_action(context.listener(Self::cut))
            .on_action(context.listener(Self::copy))
            .on_mouse_down(MouseButton::Left, context.listener(Self::on_mouse_down))
            .on_mouse_up(MouseButton::Left, context.listener(Self::on_mouse_up))
            .on_mouse_up_out(MouseButton::Left, context.listener(Self::on_mouse_up))
            .on_mouse_move(context.listener(Self::on_mouse_move))
            .text_color(rgb(TEXT_PRIMARY))
            .text_size(px(TEXT_SIZE_MEDIUM))
            .line_height(px(LINE_HEIGHT_MEDIUM))
            .child(
                div()
                    .h(px(ELEMENT_HEIGHT))
                    .w_full()
                    .px(px(PADDING_INPUT_HORIZONTAL))
                    .py(px(PADDING_INPUT_VERTICAL))
                    .bg(rgb(INPUT_BACKGROUND))
                    .border_1()
                    .border_color(rgb(if focused { BORDER_FOCUS } else { BORDER }))
                    .rounded(px(RADIUS))
                    .child(TextElement {
                        input: context.entity().clone(),
                    }),
            )
    }
}

impl Focusable for TextInput {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
