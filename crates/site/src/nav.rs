//! Responsive collapsible navigation menu.

use clinic_core::config::SiteConfig;

/// User or window events the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Burger button clicked.
    ToggleClick,
    /// A link inside the menu clicked.
    LinkClick,
    /// Click anywhere outside the navigation bar.
    OutsideClick,
    Escape,
    /// Viewport resized to the given width in CSS pixels.
    Resize(u32),
}

/// Menu state. On desktop widths the menu is always closed and its links
/// are always visible; only mobile widths collapse it.
#[derive(Debug, Clone)]
pub struct NavMenu {
    breakpoint: u32,
    viewport_width: u32,
    open: bool,
}

impl NavMenu {
    pub const DEFAULT_BREAKPOINT: u32 = 980;

    pub fn new(breakpoint: u32, viewport_width: u32) -> Self {
        Self {
            breakpoint,
            viewport_width,
            open: false,
        }
    }

    pub fn from_config(config: &SiteConfig, viewport_width: u32) -> Self {
        Self::new(config.nav_breakpoint_px, viewport_width)
    }

    /// Widths at or below the breakpoint are mobile.
    pub fn is_mobile(&self) -> bool {
        self.viewport_width <= self.breakpoint
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value of the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Whether the links container carries the `hidden` attribute.
    pub fn links_hidden(&self) -> bool {
        self.is_mobile() && !self.open
    }

    /// Apply an event. Returns true when the open state changed.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        let before = self.open;
        match event {
            NavEvent::ToggleClick => {
                if self.is_mobile() {
                    self.set_open(!self.open);
                }
            }
            NavEvent::LinkClick => self.set_open(false),
            NavEvent::OutsideClick => {
                if self.is_mobile() && self.open {
                    self.set_open(false);
                }
            }
            NavEvent::Escape => {
                if self.open {
                    self.set_open(false);
                }
            }
            NavEvent::Resize(width) => {
                self.viewport_width = width;
                self.set_open(self.open);
            }
        }
        before != self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open && self.is_mobile();
    }
}

impl Default for NavMenu {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BREAKPOINT, Self::DEFAULT_BREAKPOINT + 1)
    }
}
