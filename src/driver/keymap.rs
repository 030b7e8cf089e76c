// Mouse button and key name parsing
//
// Shared by every backend so that request validation does not depend on
// which driver is active.

use std::fmt;

use super::DriverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Parse a wire-format button name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, DriverError> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "middle" => Ok(Self::Middle),
            _ => Err(DriverError::UnsupportedButton(name.to_string())),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        };
        f.write_str(name)
    }
}

/// A pressable key: either a named special key or one printable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Return,
    Tab,
    Escape,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
}

impl Key {
    /// Parse a wire-format key name.
    ///
    /// Named keys accept the common aliases (enter/return, esc/escape,
    /// del/delete) case-insensitively. Anything that is not a named key
    /// must be exactly one printable character.
    pub fn parse(name: &str) -> Result<Self, DriverError> {
        let key = match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Self::Return,
            "tab" => Self::Tab,
            "escape" | "esc" => Self::Escape,
            "space" => Self::Space,
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() && !c.is_control() => Self::Char(c),
                    _ => return Err(DriverError::UnsupportedKey(name.to_string())),
                }
            }
        };
        Ok(key)
    }
}
