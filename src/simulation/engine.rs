//! Window settings handed to the windowing collaborator
//!
//! Size and title of the drawable surface used when building and running a `Scenario`.
//! World units map 1:1 to pixels with the origin at the window centre.

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub width: u32, // pixels
    pub height: u32, // pixels
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Atom Simulation".to_string(),
        }
    }
}
