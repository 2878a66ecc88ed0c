//! Centralized TUI theme built on ratatui's Tailwind CSS palette.

use ratatui::style::Color;
use ratatui::style::palette::tailwind;

/// Every color the TUI draws with.
pub struct Theme {
    // ── Base ──
    /// Primary foreground/text color.
    pub fg: Color,
    /// Muted foreground for minimal-emphasis elements.
    pub fg_muted: Color,
    /// Default border color for panels and widgets.
    pub border: Color,
    /// Border color for the focused input.
    pub border_active: Color,

    // ── Accent / Semantic ──
    /// Bright accent for high-emphasis elements.
    pub accent_bright: Color,
    /// Color for warnings and local notices.
    pub warning: Color,
    /// Color for the "uploaded" / "selected" badge.
    pub success: Color,

    // ── Chat roles ──
    /// Label color for user messages in chat.
    pub user_label: Color,
    /// Label color for bot responses in chat.
    pub bot_label: Color,
    /// Image URLs in bot responses.
    pub image_link: Color,
    /// Spinner shown while a reply is pending.
    pub spinner: Color,

    // ── Menu ──
    /// ASCII art logo color on the menu screen.
    pub logo: Color,
    /// Background of the highlighted menu row.
    pub menu_selected_bg: Color,
    /// Digit shortcut next to each menu entry.
    pub menu_key: Color,
    /// Background for input boxes.
    pub input_bg: Color,
}

impl Theme {
    /// The default dark theme using Tailwind palette.
    pub const fn default_dark() -> Self {
        Self {
            fg: tailwind::SLATE.c100,
            fg_muted: tailwind::SLATE.c500,
            border: tailwind::SLATE.c700,
            border_active: tailwind::VIOLET.c500,

            accent_bright: tailwind::VIOLET.c400,
            warning: tailwind::AMBER.c500,
            success: tailwind::EMERALD.c500,

            user_label: tailwind::CYAN.c400,
            bot_label: tailwind::VIOLET.c400,
            image_link: tailwind::SKY.c400,
            spinner: tailwind::AMBER.c400,

            logo: tailwind::VIOLET.c400,
            menu_selected_bg: tailwind::SLATE.c800,
            menu_key: tailwind::AMBER.c400,
            input_bg: tailwind::SLATE.c800,
        }
    }
}

/// Global theme instance.
pub const THEME: Theme = Theme::default_dark();
