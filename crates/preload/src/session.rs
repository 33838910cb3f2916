use std::cell::RefCell;
use std::rc::Rc;

use crate::overlay::OverlayController;

pub type SharedController<D> = Rc<RefCell<OverlayController<D>>>;

/// Page-session slot for the one overlay controller.
///
/// The caller owns the session and passes it wherever a controller is
/// needed; the first `get_or_create` builds the controller and every later
/// call hands back the same instance without touching the DOM again.
#[derive(Debug)]
pub struct PreloadSession<D> {
    controller: Option<SharedController<D>>,
}

impl<D> Default for PreloadSession<D> {
    fn default() -> Self {
        Self { controller: None }
    }
}

impl<D> PreloadSession<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(
        &mut self,
        build: impl FnOnce() -> OverlayController<D>,
    ) -> SharedController<D> {
        self.controller
            .get_or_insert_with(|| Rc::new(RefCell::new(build())))
            .clone()
    }

    pub fn current(&self) -> Option<SharedController<D>> {
        self.controller.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.controller.is_some()
    }
}
