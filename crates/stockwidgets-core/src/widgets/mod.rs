//! # Widgets
//!
//! | Widget | Module | Listens to | Emits |
//! |--------|--------|------------|-------|
//! | [`PriceWidget`] | [`price`] | `symbol-selected` | - |
//! | [`SearchWidget`] | [`search`] | - | `symbol-selected` |
//! | [`Tooltip`] | [`overlay`] | `keydown` (Escape) | - |
//! | [`SideDrawer`] | [`overlay`] | `keydown` (Escape) | - |
//! | [`Spinner`] | [`spinner`] | - | - |
//!
//! Each widget owns its state exclusively. The only thing shared between
//! widgets is the page [`EventBus`].

pub mod overlay;
pub mod price;
pub mod search;
pub mod spinner;

use crate::events::EventBus;

pub use overlay::{DrawerTab, DrawerView, SideDrawer, Tooltip, TooltipView};
pub use price::{
    LookupState, LookupTicket, PriceContent, PriceModel, PriceView, PriceWidget,
    PriceWidgetBuilder,
};
pub use search::{SearchContent, SearchState, SearchView, SearchWidget};
pub use spinner::Spinner;

/// Mount/dispose lifecycle shared by widgets that talk to the page.
///
/// `mount` registers page listeners (and may start work, such as the initial
/// price lookup); `dispose` unregisters them. Dropping a widget disposes it.
pub trait Component {
    fn mount(&mut self, bus: &EventBus);

    fn dispose(&mut self);

    fn is_mounted(&self) -> bool;
}
