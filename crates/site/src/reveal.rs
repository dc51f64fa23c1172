//! Scroll-triggered reveal animation scheduling.

/// Intersection ratio at which an element counts as visible.
pub const DEFAULT_THRESHOLD: f64 = 0.12;
/// Shrinks the viewport bottom so elements reveal slightly after entering.
pub const ROOT_MARGIN: &str = "0px 0px -8% 0px";

/// Capabilities and preferences of the rendering environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealEnvironment {
    pub prefers_reduced_motion: bool,
    pub observer_supported: bool,
}

/// How reveal elements should be handled on page load.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealPlan {
    /// Mark the document as reduced-motion and animate nothing.
    ReducedMotion,
    /// No reveal elements on the page.
    Nothing,
    /// No observer available: show every element now.
    RevealAll,
    Observe {
        threshold: f64,
        root_margin: &'static str,
    },
}

impl RevealPlan {
    pub fn choose(env: RevealEnvironment, element_count: usize, threshold: f64) -> Self {
        if env.prefers_reduced_motion {
            RevealPlan::ReducedMotion
        } else if element_count == 0 {
            RevealPlan::Nothing
        } else if !env.observer_supported {
            RevealPlan::RevealAll
        } else {
            RevealPlan::Observe {
                threshold,
                root_margin: ROOT_MARGIN,
            }
        }
    }
}

/// Tracks which observed elements have been revealed. Revealing is one-shot:
/// a revealed element is unobserved and never hidden again.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    visible: Vec<bool>,
}

impl RevealTracker {
    pub fn new(element_count: usize) -> Self {
        Self {
            visible: vec![false; element_count],
        }
    }

    /// Observer callback. Returns true when the element was revealed now.
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        match self.visible.get_mut(index) {
            Some(visible) if is_intersecting && !*visible => {
                *visible = true;
                true
            }
            _ => false,
        }
    }

    pub fn reveal_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Elements still waiting for their first intersection.
    pub fn observed_count(&self) -> usize {
        self.visible.iter().filter(|v| !**v).count()
    }
}
