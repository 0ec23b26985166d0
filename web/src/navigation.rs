//! Browser side of hash navigation.
//!
//! The active route lives in a [`Navigator`] signal provided as context.
//! It starts on the home page (what the server rendered) and syncs with
//! `location.hash` once hydrated, then on every `hashchange`.

use leptos::ev;
use leptos::prelude::*;

use florescer_common::route::{Navigator, Page, Route};

#[derive(Clone, Copy)]
pub struct Navigation {
    state: RwSignal<Navigator>,
    route: Memo<Route>,
    /// Bumped whenever the viewer signs in or out.
    auth: RwSignal<u32>,
}

impl Navigation {
    /// Create the navigation context for the site and start listening for
    /// fragment changes.
    pub fn provide() -> Self {
        let state = RwSignal::new(Navigator::default());
        let route = Memo::new(move |_| state.with(|n| n.current().clone()));
        let nav = Navigation {
            state,
            route,
            auth: RwSignal::new(0),
        };

        Effect::new(move |_| {
            state.update(|n| n.sync(&current_hash()));
            let handle = window_event_listener(ev::hashchange, move |_| {
                state.update(|n| n.sync(&current_hash()));
            });
            on_cleanup(move || handle.remove());
        });

        provide_context(nav);
        nav
    }

    pub fn route(&self) -> Memo<Route> {
        self.route
    }

    pub fn page(&self) -> Page {
        self.route.with(|r| r.page)
    }

    /// Switch pages, rewriting the fragment when it does not show the
    /// target yet.
    pub fn go(&self, route: impl Into<Route>) {
        let route = route.into();
        let hash = current_hash();
        let mut write = None;
        self.state.update(|n| write = n.navigate(route, &hash));
        if let Some(fragment) = write {
            if let Err(e) = window().location().set_hash(&fragment) {
                leptos::logging::warn!("cannot set location hash: {e:?}");
            }
        }
    }

    /// Tracked read of the sign-in generation; resources keyed on it
    /// re-fetch after login and logout.
    pub fn auth_version(&self) -> u32 {
        self.auth.get()
    }

    pub fn auth_changed(&self) {
        self.auth.update(|v| *v += 1);
    }
}

pub fn use_navigation() -> Navigation {
    expect_context::<Navigation>()
}

fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}
