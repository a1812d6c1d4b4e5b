//! Tooltip and side drawer: visibility toggles that also close on Escape.
//!
//! Both register one page-wide key listener when mounted and drop it when
//! disposed. Escape acts only while the overlay is open; a backdrop click
//! always closes.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::events::{EventBus, Key, PageEvent, Subscription};
use crate::widgets::Component;

fn close_on_escape<S, F>(bus: &EventBus, state: &Arc<Mutex<S>>, close_if_open: F) -> Subscription
where
    S: Send + 'static,
    F: Fn(&mut S) -> bool + Send + Sync + 'static,
{
    let weak: Weak<Mutex<S>> = Arc::downgrade(state);
    bus.subscribe(move |event| {
        if !matches!(event, PageEvent::KeyDown(Key::Escape)) {
            return;
        }
        if let Some(state) = weak.upgrade() {
            let mut state = state.lock().expect("overlay lock should not be poisoned");
            if close_if_open(&mut state) {
                tracing::trace!("overlay closed by escape");
            }
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipView {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
struct TooltipState {
    text: String,
    show: bool,
}

/// `?` icon that reveals a short help text.
pub struct Tooltip {
    state: Arc<Mutex<TooltipState>>,
    subscription: Option<Subscription>,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TooltipState {
                text: text.into(),
                show: false,
            })),
            subscription: None,
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().text = text.into();
    }

    pub fn is_shown(&self) -> bool {
        self.lock().show
    }

    /// Icon click.
    pub fn show(&self) {
        self.lock().show = true;
    }

    pub fn hide(&self) {
        self.lock().show = false;
    }

    pub fn click_backdrop(&self) {
        self.hide();
    }

    pub fn render(&self) -> TooltipView {
        let state = self.lock();
        TooltipView {
            text: state.text.clone(),
            visible: state.show,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TooltipState> {
        self.state.lock().expect("overlay lock should not be poisoned")
    }
}

impl Component for Tooltip {
    fn mount(&mut self, bus: &EventBus) {
        self.subscription = Some(close_on_escape(bus, &self.state, |state: &mut TooltipState| {
            let was_shown = state.show;
            state.show = false;
            was_shown
        }));
    }

    fn dispose(&mut self) {
        self.subscription = None;
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawerTab {
    #[default]
    Navigation,
    Contact,
}

pub const CONTACT_INFORMATION: &str = "Contact Information\n\
You can reach us via phone or email.\n\
Phone: 123456789\n\
E-mail: something@something.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub title: String,
    pub opened: bool,
    pub active_tab: DrawerTab,
    pub body: String,
}

#[derive(Debug, Default)]
struct DrawerState {
    title: String,
    opened: bool,
    tab: DrawerTab,
}

/// Slide-in side panel with navigation and contact tabs.
pub struct SideDrawer {
    state: Arc<Mutex<DrawerState>>,
    subscription: Option<Subscription>,
}

impl SideDrawer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DrawerState {
                title: title.into(),
                ..DrawerState::default()
            })),
            subscription: None,
        }
    }

    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.lock().title = title.into();
    }

    pub fn is_open(&self) -> bool {
        self.lock().opened
    }

    pub fn open(&self) {
        self.lock().opened = true;
    }

    pub fn close(&self) {
        self.lock().opened = false;
    }

    pub fn click_backdrop(&self) {
        self.close();
    }

    pub fn select_tab(&self, tab: DrawerTab) {
        self.lock().tab = tab;
    }

    /// Renders the drawer; `slot` is the navigation content supplied by the page.
    pub fn render(&self, slot: &str) -> DrawerView {
        let state = self.lock();
        DrawerView {
            title: state.title.clone(),
            opened: state.opened,
            active_tab: state.tab,
            body: match state.tab {
                DrawerTab::Navigation => slot.to_owned(),
                DrawerTab::Contact => String::from(CONTACT_INFORMATION),
            },
        }
    }

    fn lock(&self) -> MutexGuard<'_, DrawerState> {
        self.state.lock().expect("overlay lock should not be poisoned")
    }
}

impl Component for SideDrawer {
    fn mount(&mut self, bus: &EventBus) {
        self.subscription = Some(close_on_escape(bus, &self.state, |state: &mut DrawerState| {
            let was_open = state.opened;
            state.opened = false;
            was_open
        }));
    }

    fn dispose(&mut self) {
        self.subscription = None;
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }
}
