use crate::camera::{CameraMove, CameraState};
use winit::keyboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    Move(CameraMove),
    Reset,
    Quit,
}

impl CameraKey {
    /// Applies the key to the camera. Returns `false` for keys the camera
    /// doesn't handle (quit).
    pub fn apply(self, camera: &mut CameraState) -> bool {
        match self {
            CameraKey::Move(movement) => camera.nudge(movement),
            CameraKey::Reset => camera.reset(),
            CameraKey::Quit => return false,
        }
        true
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

// Convert winit key to our camera key enum
pub fn winit_key_to_camera_key(key: &keyboard::Key) -> Option<CameraKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowLeft => CameraKey::Move(CameraMove::Left),
            ArrowRight => CameraKey::Move(CameraMove::Right),
            ArrowUp => CameraKey::Move(CameraMove::Up),
            ArrowDown => CameraKey::Move(CameraMove::Down),
            PageUp => CameraKey::Move(CameraMove::Closer),
            PageDown => CameraKey::Move(CameraMove::Farther),
            Home => CameraKey::Reset,
            Escape => CameraKey::Quit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "r" => CameraKey::Reset,
            "q" => CameraKey::Quit,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use winit::keyboard::{Key, NamedKey, SmolStr};

    /// Tests the arrow and page keys.
    #[test]
    fn test_named_keys() {
        let cases = [
            (NamedKey::ArrowLeft, CameraKey::Move(CameraMove::Left)),
            (NamedKey::ArrowRight, CameraKey::Move(CameraMove::Right)),
            (NamedKey::ArrowUp, CameraKey::Move(CameraMove::Up)),
            (NamedKey::ArrowDown, CameraKey::Move(CameraMove::Down)),
            (NamedKey::PageUp, CameraKey::Move(CameraMove::Closer)),
            (NamedKey::PageDown, CameraKey::Move(CameraMove::Farther)),
            (NamedKey::Home, CameraKey::Reset),
            (NamedKey::Escape, CameraKey::Quit),
        ];
        for (named, expected) in cases {
            assert_eq!(winit_key_to_camera_key(&Key::Named(named)), Some(expected));
        }
        assert_eq!(winit_key_to_camera_key(&Key::Named(NamedKey::Tab)), None);
    }

    /// Tests that character keys are matched case-insensitively.
    #[test]
    fn test_character_keys() {
        let key = |s: &str| Key::Character(SmolStr::new(s));
        assert_eq!(winit_key_to_camera_key(&key("Q")), Some(CameraKey::Quit));
        assert_eq!(winit_key_to_camera_key(&key("r")), Some(CameraKey::Reset));
        assert_eq!(winit_key_to_camera_key(&key("w")), None);
    }

    /// Tests that applying keys drives the camera.
    #[test]
    fn test_apply() {
        let mut camera = CameraState::new(1.0);
        assert!(CameraKey::Move(CameraMove::Right).apply(&mut camera));
        assert_eq!(camera.horizontal, 1.0);

        assert!(CameraKey::Reset.apply(&mut camera));
        assert_eq!(camera.horizontal, 0.0);

        assert!(!CameraKey::Quit.apply(&mut camera));
    }

    /// Tests that keys can be collected into a set, with repeats folded.
    #[test]
    fn test_keys_in_set() {
        let keys: HashSet<CameraKey> = [
            CameraKey::Move(CameraMove::Closer),
            CameraKey::Move(CameraMove::Closer),
            CameraKey::Move(CameraMove::Farther),
            CameraKey::Reset,
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&CameraKey::Move(CameraMove::Farther)));
    }
}
