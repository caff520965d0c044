//! Control factory: pressable/releasable controls built from two callbacks.
//!
//! A control knows its label and what to run on press and release, nothing
//! else. Whatever the callbacks act on (session handle, pitch) is captured by
//! the caller when the closures are built.

use std::fmt;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// One on-screen control. Immutable once created; clones share callbacks.
#[derive(Clone)]
pub struct Control {
    label: &'static str,
    on_press: Callback,
    on_release: Callback,
}

/// Build a control showing `label` that runs `on_press` on every press and
/// `on_release` on every release.
pub fn create_control(
    label: &'static str,
    on_press: impl Fn() + 'static,
    on_release: impl Fn() + 'static,
) -> Control {
    Control {
        label,
        on_press: Rc::new(on_press),
        on_release: Rc::new(on_release),
    }
}

impl Control {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn press(&self) {
        (self.on_press)();
    }

    /// Runs even if no press preceded it (pointer went down elsewhere).
    pub fn release(&self) {
        (self.on_release)();
    }
}

impl PartialEq for Control {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && Rc::ptr_eq(&self.on_press, &other.on_press)
            && Rc::ptr_eq(&self.on_release, &other.on_release)
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control").field("label", &self.label).finish()
    }
}
