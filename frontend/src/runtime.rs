use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use shared::api::PortalSettings;
use shared::payment::PaymentFlow;
use shared::poller::{PollTicket, PollerKind, PollerSlot};
use shared::quiz::QuizFlow;
use shared::wheel::WheelEngine;
use shared::{Call, DeviceIdentity, Effect, FlowController, PageState, PortalConfig};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, UrlSearchParams};
use yew::Callback;

use crate::authority::HttpAuthority;
use crate::storage::LocalStorage;

/// Everything a page needs to render, copied out of the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalView {
    pub page: PageState,
    pub device_label: String,
    pub wheel: WheelEngine,
    pub quiz: QuizFlow,
    pub payment: PaymentFlow,
    pub payment_link: Option<String>,
    pub settings: PortalSettings,
    pub spin_duration_ms: u32,
}

/// Reads the device identity from the portal URL's query string.
pub fn entry_identity() -> DeviceIdentity {
    let params = window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok());
    DeviceIdentity::resolve(|name| params.as_ref().and_then(|p| p.get(name)))
}

/// Carries out the controller's effects in the browser: timers, requests,
/// navigation and alerts.
pub struct PortalRuntime {
    controller: RefCell<FlowController<LocalStorage>>,
    authority: HttpAuthority,
    auth_timer: RefCell<PollerSlot<Interval>>,
    payment_timer: RefCell<PollerSlot<Interval>>,
    listener: RefCell<Option<Callback<()>>>,
}

impl PortalRuntime {
    pub fn new(identity: DeviceIdentity, config: PortalConfig, authority: HttpAuthority) -> Self {
        Self {
            controller: RefCell::new(FlowController::new(identity, config, LocalStorage)),
            authority,
            auth_timer: RefCell::new(PollerSlot::default()),
            payment_timer: RefCell::new(PollerSlot::default()),
            listener: RefCell::new(None),
        }
    }

    /// Called after every state change so the view can re-render.
    pub fn set_listener(&self, listener: Callback<()>) {
        *self.listener.borrow_mut() = Some(listener);
    }

    pub fn view(&self) -> PortalView {
        let controller = self.controller.borrow();
        PortalView {
            page: controller.page(),
            device_label: controller.identity().short_label().to_string(),
            wheel: controller.wheel().clone(),
            quiz: controller.quiz().clone(),
            payment: controller.payment().clone(),
            payment_link: controller
                .payment()
                .request()
                .map(|request| controller.config().payment_link(request.amount())),
            settings: controller.settings().clone(),
            spin_duration_ms: controller.config().spin_duration_ms,
        }
    }

    /// Runs one controller operation and executes whatever it asks for.
    pub fn update<F>(runtime: &Rc<Self>, operation: F)
    where
        F: FnOnce(&mut FlowController<LocalStorage>) -> Vec<Effect>,
    {
        let effects = operation(&mut runtime.controller.borrow_mut());
        Self::apply(runtime, effects);
        runtime.notify();
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener.emit(());
        }
    }

    fn timer(&self, kind: PollerKind) -> &RefCell<PollerSlot<Interval>> {
        match kind {
            PollerKind::Authorization => &self.auth_timer,
            PollerKind::Payment => &self.payment_timer,
        }
    }

    fn apply(runtime: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartPoller { ticket, period_ms } => {
                    let weak = Rc::downgrade(runtime);
                    let interval = Interval::new(period_ms, move || Self::tick(&weak, ticket));
                    runtime.timer(ticket.kind).borrow_mut().start(interval);
                }
                Effect::StopPoller(kind) => runtime.timer(kind).borrow_mut().stop(),
                Effect::Call(call) => Self::perform(runtime, call),
                Effect::Defer { after_ms, event } => {
                    let runtime = Rc::clone(runtime);
                    spawn_local(async move {
                        TimeoutFuture::new(after_ms).await;
                        Self::update(&runtime, |c| c.resume(event));
                    });
                }
                Effect::Navigate(url) => {
                    log::info!("Navigating to {}", url);
                    if let Some(window) = window() {
                        let _ = window.location().set_href(&url);
                    }
                }
                Effect::Alert(message) => {
                    if let Some(window) = window() {
                        let _ = window.alert_with_message(&message);
                    }
                }
                Effect::Reload => {
                    if let Some(window) = window() {
                        let _ = window.location().reload();
                    }
                }
            }
        }
    }

    fn tick(runtime: &Weak<Self>, ticket: PollTicket) {
        let Some(runtime) = runtime.upgrade() else {
            return;
        };
        let call = runtime.controller.borrow().poll(ticket);
        if let Some(call) = call {
            Self::perform(&runtime, call);
        }
    }

    fn perform(runtime: &Rc<Self>, call: Call) {
        let runtime = Rc::clone(runtime);
        spawn_local(async move {
            let device_id = runtime.controller.borrow().identity().device_id.clone();
            let reply = call.perform(&runtime.authority, &device_id).await;
            Self::update(&runtime, |c| c.handle(reply));
        });
    }
}
