use std::rc::Rc;

use shared::{Effect, FlowController};
use yew::prelude::*;

use crate::authority::HttpAuthority;
use crate::config::portal_config;
use crate::runtime::{entry_identity, PortalRuntime, PortalView};
use crate::storage::LocalStorage;

/// Snapshot of the portal plus callbacks that drive it.
#[derive(Clone)]
pub struct PortalHandle {
    pub view: PortalView,
    runtime: Rc<PortalRuntime>,
}

impl PartialEq for PortalHandle {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view && Rc::ptr_eq(&self.runtime, &other.runtime)
    }
}

impl PortalHandle {
    fn dispatch<E, F>(&self, operation: F) -> Callback<E>
    where
        E: 'static,
        F: Fn(&mut FlowController<LocalStorage>) -> Vec<Effect> + 'static,
    {
        let runtime = self.runtime.clone();
        Callback::from(move |_: E| PortalRuntime::update(&runtime, &operation))
    }

    pub fn on_acknowledge(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.acknowledge_warning())
    }

    pub fn on_spin(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.spin(&mut rand::thread_rng()))
    }

    pub fn on_select(&self) -> Callback<String> {
        let runtime = self.runtime.clone();
        Callback::from(move |answer: String| {
            PortalRuntime::update(&runtime, |c| {
                c.select_answer(&answer);
                Vec::new()
            })
        })
    }

    pub fn on_submit(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.submit_answer())
    }

    pub fn on_retry(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.retry())
    }

    pub fn on_give_up(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.give_up())
    }

    pub fn on_reset(&self) -> Callback<MouseEvent> {
        self.dispatch(|c| c.reset())
    }
}

/// Owns the portal runtime for the lifetime of the calling component.
/// Starts the flow on mount and stops every poller on unmount.
#[hook]
pub fn use_portal() -> PortalHandle {
    let trigger = use_force_update();
    let runtime = use_memo((), |_| {
        PortalRuntime::new(entry_identity(), portal_config(), HttpAuthority::default())
    });

    {
        let runtime = runtime.clone();
        use_effect_with((), move |_| {
            runtime.set_listener(Callback::from(move |_| trigger.force_update()));
            PortalRuntime::update(&runtime, |c| c.start());
            move || PortalRuntime::update(&runtime, |c| c.shutdown())
        });
    }

    PortalHandle {
        view: runtime.view(),
        runtime,
    }
}
