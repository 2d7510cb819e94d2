/// Hover/focus popover behaviour supplied by a UI toolkit, when one is loaded.
pub trait TooltipCapability<E> {
    fn attach(&self, element: &E);
}
