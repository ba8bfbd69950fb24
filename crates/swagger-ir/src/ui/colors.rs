use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Ansi256Color, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One color per role of the console output.
#[derive(Debug, Clone, Copy)]
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  info: Color,
  success: Color,
  error: Color,
  label: Color,
  value: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

const DARK: Palette = Palette {
  timestamp: rgb(118, 166, 166),
  primary: rgb(191, 126, 4),
  accent: rgb(166, 84, 55),
  info: rgb(118, 166, 166),
  success: rgb(118, 166, 166),
  error: rgb(217, 87, 64),
  label: rgb(217, 164, 4),
  value: rgb(242, 211, 56),
};

const LIGHT: Palette = Palette {
  timestamp: rgb(92, 62, 38),
  primary: rgb(70, 42, 25),
  accent: rgb(211, 99, 70),
  info: rgb(40, 111, 170),
  success: rgb(34, 142, 90),
  error: rgb(178, 34, 34),
  label: rgb(176, 103, 66),
  value: rgb(199, 146, 76),
};

const PLAIN: Palette = Palette {
  timestamp: Color::Reset,
  primary: Color::Reset,
  accent: Color::Reset,
  info: Color::Reset,
  success: Color::Reset,
  error: Color::Reset,
  label: Color::Reset,
  value: Color::Reset,
};

pub struct Colors {
  palette: Palette,
}

/// Converts palette colors for use in table cells.
pub trait IntoComfyColor {
  fn comfy(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn comfy(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
      _ => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    let palette = match (enabled, theme) {
      (false, _) => PLAIN,
      (true, Theme::Dark) => DARK,
      (true, Theme::Light) => LIGHT,
    };
    Self { palette }
  }

  pub const fn timestamp(&self) -> Color {
    self.palette.timestamp
  }

  pub const fn primary(&self) -> Color {
    self.palette.primary
  }

  pub const fn accent(&self) -> Color {
    self.palette.accent
  }

  pub const fn info(&self) -> Color {
    self.palette.info
  }

  pub const fn success(&self) -> Color {
    self.palette.success
  }

  pub const fn error(&self) -> Color {
    self.palette.error
  }

  pub const fn label(&self) -> Color {
    self.palette.label
  }

  pub const fn value(&self) -> Color {
    self.palette.value
  }

  /// Read-only methods are shown as info, `delete` as an error, anything
  /// else that writes as an accent.
  pub fn method(&self, method: &str) -> Color {
    match method {
      "get" | "head" | "options" => self.info(),
      "delete" => self.error(),
      _ => self.accent(),
    }
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::AnsiValue(value) => Some(ClapColor::Ansi256(Ansi256Color(value))),
      _ => None,
    }
  }

  /// Help styles; always the dark palette since clap renders before the
  /// theme flags are parsed.
  pub const fn clap_styles() -> Styles {
    let palette = DARK;

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(palette.label)))
      .usage(Style::new().bold().fg_color(Self::to_clap(palette.label)))
      .literal(Style::new().fg_color(Self::to_clap(palette.success)))
      .placeholder(Style::new().fg_color(Self::to_clap(palette.info)))
      .error(Style::new().bold().fg_color(Self::to_clap(palette.error)))
      .valid(Style::new().fg_color(Self::to_clap(palette.success)))
      .invalid(Style::new().bold().fg_color(Self::to_clap(palette.accent)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .and_then(|value| theme_from_colorfgbg(&value))
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background colors 7
/// and above are the light half of the 16-color table.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background >= 7 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_theme_from_colorfgbg() {
    let cases = [
      ("15;0", Some(Theme::Dark)),
      ("0;15", Some(Theme::Light)),
      ("0;default;7", Some(Theme::Light)),
      ("12;8", Some(Theme::Light)),
      ("default", None),
      ("", None),
    ];
    for (input, expected) in cases {
      assert_eq!(theme_from_colorfgbg(input), expected, "failed for input {input:?}");
    }
  }
}
