use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Complete theme configuration for ratatui
#[derive(Clone)]
pub struct ThemeConfig {
    pub background: Color,
    pub tile: Style,
    pub tile_selected: Style,
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub text: Style,
    pub muted: Style,
    /// Active owned button and owned marker on tiles.
    pub owned: Style,
    /// Active wishlist button and wishlist marker on tiles.
    pub wishlist: Style,
    pub error: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dracula,
    Solarized,
    Gruvbox,
    EverforestLight,
}

impl Theme {
    pub fn config(self) -> ThemeConfig {
        match self {
            Theme::Dracula => dracula_theme(),
            Theme::Solarized => solarized_dark(),
            Theme::Gruvbox => gruvbox_theme(),
            Theme::EverforestLight => everforest_light_theme(),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dracula" => Ok(Theme::Dracula),
            "solarized" | "solarized_dark" => Ok(Theme::Solarized),
            "gruvbox" => Ok(Theme::Gruvbox),
            "everforest_light" | "everforest" => Ok(Theme::EverforestLight),
            other => Err(format!(
                "unknown theme '{other}' (expected dracula, solarized, gruvbox, everforest_light)"
            )),
        }
    }
}

/// Returns a ThemeConfig based on the Solarized Dark color palette.
pub fn solarized_dark() -> ThemeConfig {
    let base03 = Color::Rgb(0, 43, 54);
    let base02 = Color::Rgb(7, 54, 66);
    let base01 = Color::Rgb(88, 110, 117);
    let base0 = Color::Rgb(131, 148, 150);
    let base3 = Color::Rgb(253, 246, 227);
    let yellow = Color::Rgb(181, 137, 0);
    let red = Color::Rgb(220, 50, 47);
    let blue = Color::Rgb(38, 139, 210);
    let green = Color::Rgb(133, 153, 0);

    ThemeConfig {
        background: base03,
        tile: Style::default().fg(base0).bg(base02),
        tile_selected: Style::default()
            .fg(base3)
            .bg(blue)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(base01),
        border_selected: Style::default().fg(blue),
        title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
        text: Style::default().fg(base0).bg(base02),
        muted: Style::default().fg(base01).bg(base02),
        owned: Style::default().fg(base03).bg(green).add_modifier(Modifier::BOLD),
        wishlist: Style::default()
            .fg(base03)
            .bg(yellow)
            .add_modifier(Modifier::BOLD),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

/// Returns a ThemeConfig based on the Dracula color palette.
pub fn dracula_theme() -> ThemeConfig {
    let bg = Color::Rgb(40, 42, 54);
    let selection = Color::Rgb(68, 71, 90);
    let fg = Color::Rgb(248, 248, 242);
    let comment = Color::Rgb(98, 114, 164);
    let purple = Color::Rgb(189, 147, 249);
    let yellow = Color::Rgb(241, 250, 140);
    let green = Color::Rgb(80, 250, 123);
    let red = Color::Rgb(255, 85, 85);

    ThemeConfig {
        background: bg,
        tile: Style::default().fg(fg).bg(bg),
        tile_selected: Style::default()
            .fg(fg)
            .bg(selection)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(comment),
        border_selected: Style::default().fg(purple),
        title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg),
        muted: Style::default().fg(comment).bg(bg),
        owned: Style::default().fg(bg).bg(green).add_modifier(Modifier::BOLD),
        wishlist: Style::default().fg(bg).bg(yellow).add_modifier(Modifier::BOLD),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

/// Returns a ThemeConfig based on the Gruvbox Dark color palette.
pub fn gruvbox_theme() -> ThemeConfig {
    let bg0 = Color::Rgb(40, 40, 40);
    let fg1 = Color::Rgb(235, 219, 178);
    let gray = Color::Rgb(146, 131, 116);
    let green = Color::Rgb(152, 151, 26);
    let yellow = Color::Rgb(215, 153, 33);
    let orange = Color::Rgb(214, 93, 14);
    let red = Color::Rgb(204, 36, 29);

    ThemeConfig {
        background: bg0,
        tile: Style::default().fg(fg1).bg(bg0),
        tile_selected: Style::default()
            .fg(bg0)
            .bg(fg1)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(gray),
        border_selected: Style::default().fg(orange),
        title: Style::default().fg(orange).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg1).bg(bg0),
        muted: Style::default().fg(gray).bg(bg0),
        owned: Style::default().fg(bg0).bg(green).add_modifier(Modifier::BOLD),
        wishlist: Style::default().fg(bg0).bg(yellow).add_modifier(Modifier::BOLD),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

/// Returns a ThemeConfig based on the Everforest Light color palette.
pub fn everforest_light_theme() -> ThemeConfig {
    let bg = Color::Rgb(253, 246, 227);
    let bg_view = Color::Rgb(243, 234, 211);
    let fg = Color::Rgb(92, 106, 114);
    let gray = Color::Rgb(147, 159, 149);
    let yellow = Color::Rgb(223, 160, 0);
    let green = Color::Rgb(141, 161, 1);
    let red = Color::Rgb(248, 85, 82);

    ThemeConfig {
        background: bg,
        tile: Style::default().fg(fg).bg(bg_view),
        tile_selected: Style::default()
            .fg(bg)
            .bg(gray)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(gray),
        border_selected: Style::default().fg(yellow),
        title: Style::default().fg(yellow).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg_view),
        muted: Style::default().fg(gray).bg(bg_view),
        owned: Style::default().fg(bg).bg(green).add_modifier(Modifier::BOLD),
        wishlist: Style::default().fg(bg).bg(yellow).add_modifier(Modifier::BOLD),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Dracula".parse::<Theme>(), Ok(Theme::Dracula));
        assert_eq!("everforest".parse::<Theme>(), Ok(Theme::EverforestLight));
        assert!("neon".parse::<Theme>().is_err());
    }
}
