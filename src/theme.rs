// Light utilitarian palette: outlined inputs on a flat surface, one orange
// accent for focus and selection, red for validation messages.

// Backgrounds
pub const SURFACE: u32 = 0xeeeeee;
pub const TITLEBAR_BACKGROUND: u32 = 0xfafafa;
pub const INPUT_BACKGROUND: u32 = 0xeeeeee;
pub const MENU_BACKGROUND: u32 = 0xfafafa;

// Borders
pub const BORDER: u32 = 0xccc9c7;
pub const BORDER_FOCUS: u32 = 0xef6f2e;

// Text
pub const TEXT_PRIMARY: u32 = 0x020202;
pub const TEXT_DIM: u32 = 0x5c5855;
pub const TEXT_WHITE: u32 = 0xffffff;
pub const INPUT_PLACEHOLDER: u32 = 0xa49d9a66;

// Accent
pub const BUTTON_PRIMARY: u32 = 0xef6f2e;
pub const BUTTON_HOVER: u32 = 0xd15010;
pub const BUTTON_DANGER_HOVER: u32 = 0xb8283e;

// Status
pub const COLOR_RED: u32 = 0xd93050;
pub const COLOR_GREEN: u32 = 0x2f8f4e;

pub const SELECTION: u32 = 0xef6f2e40;

// Typography
pub const TEXT_SIZE_MEDIUM: f32 = 13.0;
pub const TEXT_SIZE_SMALL: f32 = 12.0;
pub const TEXT_SIZE_EXTRA_SMALL: f32 = 10.0;
pub const LINE_HEIGHT_MEDIUM: f32 = 18.0;

// Element sizing
pub const ELEMENT_HEIGHT: f32 = 32.0;
pub const TITLEBAR_HEIGHT: f32 = 32.0;
pub const METHOD_MENU_HEIGHT: f32 = 220.0;
pub const RADIUS: f32 = 4.0;
pub const CURSOR_WIDTH: f32 = 2.0;

// Spacing
pub const GAP_EXTRA_SMALL: f32 = 4.0;
pub const GAP_SMALL: f32 = 8.0;
pub const GAP_MEDIUM: f32 = 12.0;

pub const PADDING_INPUT_HORIZONTAL: f32 = 10.0;
pub const PADDING_INPUT_VERTICAL: f32 = 6.0;
pub const PADDING_COLUMN: f32 = 20.0;
pub const PADDING_COLUMN_TOP: f32 = 8.0;

// Layout
pub const WINDOW_WIDTH: f32 = 760.0;
pub const WINDOW_HEIGHT: f32 = 620.0;
pub const LIST_COLUMN_WIDTH: f32 = 300.0;
pub const LIST_BUTTON_WIDTH: f32 = 96.0;
pub const DIALOG_BUTTON_WIDTH: f32 = 96.0;

// Toggle
pub const TOGGLE_WIDTH: f32 = 34.0;
pub const TOGGLE_HEIGHT: f32 = 18.0;
pub const TOGGLE_DOT_SIZE: f32 = 14.0;
pub const TOGGLE_DOT_ON_OFFSET: f32 = 18.0;
pub const TOGGLE_DOT_OFF_OFFSET: f32 = 2.0;
