//! Keyboard-driven menu tree.
//!
//! Each node is activated by a single key from its parent. `q` leaves the
//! current node; `q` at the root exits. The navigator only tracks where the
//! player is and reports what should happen; the terminal loop performs it.

/// Something a menu action does to the synth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Switch kick mode on.
    ActivateKick,
    /// Switch kick mode off.
    DeactivateKick,
}

/// A screen that takes over the keyboard until `q` is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Live keyboard playing with audio output running.
    PianoRoll,
}

/// What a menu node does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuKind {
    /// Opens a list of child nodes.
    Submenu(Vec<MenuItem>),
    /// Runs once and stays in the parent menu.
    Action(MenuAction),
    /// Hands every key to a screen until `q`.
    Interactive(Screen),
}

/// A node in the menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Key that activates this node from its parent.
    pub key: char,
    /// Label shown in the parent's option list.
    pub description: &'static str,
    /// Behavior on activation.
    pub kind: MenuKind,
}

impl MenuItem {
    fn children(&self) -> &[MenuItem] {
        match &self.kind {
            MenuKind::Submenu(children) => children,
            _ => &[],
        }
    }
}

/// The player's menu tree.
pub fn main_menu() -> MenuItem {
    MenuItem {
        key: 'l',
        description: "Main Menu",
        kind: MenuKind::Submenu(vec![
            MenuItem {
                key: '0',
                description: "Play Piano Roll",
                kind: MenuKind::Interactive(Screen::PianoRoll),
            },
            MenuItem {
                key: '9',
                description: "Activate Kick Mode",
                kind: MenuKind::Action(MenuAction::ActivateKick),
            },
            MenuItem {
                key: '8',
                description: "Deactivate Kick Mode",
                kind: MenuKind::Action(MenuAction::DeactivateKick),
            },
        ]),
    }
}

/// Outcome of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The current menu changed and should be redrawn.
    Redraw,
    /// Run an action; the menu stays where it is.
    Run(MenuAction),
    /// A screen was entered.
    Enter(Screen),
    /// A screen was left; the parent menu is current again.
    Leave(Screen),
    /// A key for the active screen.
    Forward(Screen, char),
    /// `q` at the root.
    Exit,
    /// The key means nothing here.
    Ignored,
}

/// Tracks the active node of a menu tree.
#[derive(Debug)]
pub struct Navigator {
    root: MenuItem,
    /// Child indices from the root to the current submenu.
    path: Vec<usize>,
    screen: Option<Screen>,
}

impl Navigator {
    /// Start at the root of `root`.
    pub fn new(root: MenuItem) -> Self {
        Self {
            root,
            path: Vec::new(),
            screen: None,
        }
    }

    /// The submenu whose options are shown.
    pub fn current(&self) -> &MenuItem {
        self.path
            .iter()
            .fold(&self.root, |node, &index| &node.children()[index])
    }

    /// The parent of the current submenu, if it is not the root.
    pub fn parent(&self) -> Option<&MenuItem> {
        let (_, ancestors) = self.path.split_last()?;
        Some(
            ancestors
                .iter()
                .fold(&self.root, |node, &index| &node.children()[index]),
        )
    }

    /// The screen that has the keyboard, if any.
    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    /// Handle one key press.
    pub fn press(&mut self, key: char) -> MenuEvent {
        if let Some(screen) = self.screen {
            if key == 'q' {
                self.screen = None;
                return MenuEvent::Leave(screen);
            }
            return MenuEvent::Forward(screen, key);
        }

        if key == 'q' {
            return if self.path.pop().is_some() {
                MenuEvent::Redraw
            } else {
                MenuEvent::Exit
            };
        }

        let Some(index) = self.current().children().iter().position(|c| c.key == key) else {
            return MenuEvent::Ignored;
        };
        let event = match &self.current().children()[index].kind {
            MenuKind::Submenu(_) => MenuEvent::Redraw,
            MenuKind::Action(action) => MenuEvent::Run(*action),
            MenuKind::Interactive(screen) => MenuEvent::Enter(*screen),
        };
        match event {
            MenuEvent::Redraw => self.path.push(index),
            MenuEvent::Enter(screen) => self.screen = Some(screen),
            _ => {}
        }
        event
    }

    /// Lines describing the current menu.
    pub fn render(&self) -> Vec<String> {
        let current = self.current();
        let mut lines = vec![
            format!("Current Menu: {}", current.description),
            "Options:".to_string(),
        ];
        for child in current.children() {
            lines.push(format!("{}: {}", child.key, child.description));
        }
        match self.parent() {
            Some(parent) => lines.push(format!("q: Go to {}", parent.description)),
            None => lines.push("q: Exit Program".to_string()),
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_menu() -> MenuItem {
        MenuItem {
            key: 'l',
            description: "Root",
            kind: MenuKind::Submenu(vec![MenuItem {
                key: '1',
                description: "Settings",
                kind: MenuKind::Submenu(vec![MenuItem {
                    key: '2',
                    description: "Kick On",
                    kind: MenuKind::Action(MenuAction::ActivateKick),
                }]),
            }]),
        }
    }

    #[test]
    fn test_root_options() {
        let nav = Navigator::new(main_menu());
        let lines = nav.render();
        assert_eq!(lines[0], "Current Menu: Main Menu");
        assert!(lines.contains(&"0: Play Piano Roll".to_string()));
        assert!(lines.contains(&"9: Activate Kick Mode".to_string()));
        assert!(lines.contains(&"8: Deactivate Kick Mode".to_string()));
        assert_eq!(lines.last().unwrap(), "q: Exit Program");
    }

    #[test]
    fn test_actions_keep_menu() {
        let mut nav = Navigator::new(main_menu());
        assert_eq!(nav.press('9'), MenuEvent::Run(MenuAction::ActivateKick));
        assert_eq!(nav.press('8'), MenuEvent::Run(MenuAction::DeactivateKick));
        assert_eq!(nav.current().description, "Main Menu");
    }

    #[test]
    fn test_piano_roll_takes_keyboard_until_q() {
        let mut nav = Navigator::new(main_menu());
        assert_eq!(nav.press('0'), MenuEvent::Enter(Screen::PianoRoll));
        assert_eq!(nav.screen(), Some(Screen::PianoRoll));
        // Menu keys go to the screen while it is active.
        assert_eq!(nav.press('9'), MenuEvent::Forward(Screen::PianoRoll, '9'));
        assert_eq!(nav.press('a'), MenuEvent::Forward(Screen::PianoRoll, 'a'));
        assert_eq!(nav.press('q'), MenuEvent::Leave(Screen::PianoRoll));
        assert_eq!(nav.screen(), None);
        assert_eq!(nav.press('q'), MenuEvent::Exit);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut nav = Navigator::new(main_menu());
        assert_eq!(nav.press('x'), MenuEvent::Ignored);
        assert_eq!(nav.press('l'), MenuEvent::Ignored);
    }

    #[test]
    fn test_nested_submenu_navigation() {
        let mut nav = Navigator::new(nested_menu());
        assert_eq!(nav.press('1'), MenuEvent::Redraw);
        assert_eq!(nav.current().description, "Settings");
        assert_eq!(nav.render().last().unwrap(), "q: Go to Root");
        assert_eq!(nav.press('2'), MenuEvent::Run(MenuAction::ActivateKick));
        assert_eq!(nav.press('q'), MenuEvent::Redraw);
        assert_eq!(nav.current().description, "Root");
        assert_eq!(nav.press('q'), MenuEvent::Exit);
    }
}
