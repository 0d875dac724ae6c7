use rand::Rng;

use crate::api::{AnswerResponse, Call, GiveUpResponse, PaymentStatus, PortalSettings, Reply};
use crate::config::PortalConfig;
use crate::constants::SUBMIT_FAILED_ALERT;
use crate::error::PortalResult;
use crate::fate::{FatePath, FateStore, KeyValueStore, PersistedFate};
use crate::identity::DeviceIdentity;
use crate::payment::{PaymentFlow, PaymentReason, PaymentRequest};
use crate::poller::{PollTicket, Poller, PollerKind};
use crate::quiz::{QuizFlow, QuizVerdict};
use crate::wheel::WheelEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    Warning,
    Wheel,
    Quiz,
    Payment,
    Success,
}

impl PageState {
    /// Transition table. `Success` is reachable from everywhere and leads nowhere.
    pub fn can_become(self, next: PageState) -> bool {
        use PageState::*;
        match (self, next) {
            (Success, _) => false,
            (_, Success) => true,
            (Warning, Wheel | Quiz | Payment) => true,
            (Wheel, Quiz | Payment) => true,
            (Quiz, Payment) => true,
            _ => false,
        }
    }

    fn for_path(path: FatePath) -> Self {
        match path {
            FatePath::Quiz => PageState::Quiz,
            FatePath::Payment => PageState::Payment,
        }
    }
}

/// Work scheduled for later; the controller re-checks its state when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    SettleSpin,
    EnterPage(PageState),
    Succeed,
    FetchQuestion,
    LeavePortal,
}

/// Side effects the hosting shell must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartPoller { ticket: PollTicket, period_ms: u32 },
    StopPoller(PollerKind),
    Call(Call),
    Defer { after_ms: u32, event: Deferred },
    Navigate(String),
    Alert(String),
    Reload,
}

pub struct FlowController<S: KeyValueStore> {
    identity: DeviceIdentity,
    config: PortalConfig,
    fate: FateStore<S>,
    page: PageState,
    wheel: WheelEngine,
    quiz: QuizFlow,
    payment: PaymentFlow,
    auth_poller: Poller,
    payment_poller: Poller,
    settings: PortalSettings,
    started: bool,
    departed: bool,
}

impl<S: KeyValueStore> FlowController<S> {
    pub fn new(identity: DeviceIdentity, config: PortalConfig, store: S) -> Self {
        Self {
            identity,
            config,
            fate: FateStore::new(store),
            page: PageState::Warning,
            wheel: WheelEngine::new(),
            quiz: QuizFlow::new(),
            payment: PaymentFlow::new(),
            auth_poller: Poller::new(PollerKind::Authorization),
            payment_poller: Poller::new(PollerKind::Payment),
            settings: PortalSettings::default(),
            started: false,
            departed: false,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn wheel(&self) -> &WheelEngine {
        &self.wheel
    }

    pub fn quiz(&self) -> &QuizFlow {
        &self.quiz
    }

    pub fn payment(&self) -> &PaymentFlow {
        &self.payment
    }

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    pub fn fate_store(&self) -> &FateStore<S> {
        &self.fate
    }

    pub fn is_polling(&self, kind: PollerKind) -> bool {
        self.poller(kind).is_active()
    }

    fn poller(&self, kind: PollerKind) -> &Poller {
        match kind {
            PollerKind::Authorization => &self.auth_poller,
            PollerKind::Payment => &self.payment_poller,
        }
    }

    fn poller_mut(&mut self, kind: PollerKind) -> &mut Poller {
        match kind {
            PollerKind::Authorization => &mut self.auth_poller,
            PollerKind::Payment => &mut self.payment_poller,
        }
    }

    /// Resumes any pending fate and starts watching for authorization.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        log::info!("Portal initialized for device {}", self.identity.device_id);

        let mut effects = vec![Effect::Call(Call::PortalSettings)];
        effects.extend(self.restart_poller(PollerKind::Authorization));

        let page = self.resume_page();
        if page != PageState::Warning {
            effects.extend(self.enter(page));
        }
        effects
    }

    fn resume_page(&mut self) -> PageState {
        let fate = match self.fate.load() {
            Ok(Some(fate)) => fate,
            Ok(None) => return PageState::Warning,
            Err(err) => {
                log::warn!("Could not read persisted fate: {}", err);
                return PageState::Warning;
            }
        };

        if !fate.is_consistent() {
            log::warn!("Discarding inconsistent persisted fate {:?}", fate);
            self.clear_fate();
            return PageState::Warning;
        }

        match (fate.path, fate.owed_amount) {
            (Some(FatePath::Payment), Some(amount)) => {
                match PaymentRequest::new(amount, PaymentReason::Resumed) {
                    Some(request) => {
                        self.payment.set_request(request);
                        PageState::Payment
                    }
                    None => PageState::Warning,
                }
            }
            (Some(FatePath::Quiz), _) => PageState::Quiz,
            _ => PageState::Warning,
        }
    }

    fn enter(&mut self, next: PageState) -> Vec<Effect> {
        if next == PageState::Success {
            return self.succeed();
        }
        if !self.page.can_become(next) {
            log::debug!("Ignoring transition {:?} -> {:?}", self.page, next);
            return Vec::new();
        }
        self.page = next;

        match next {
            PageState::Quiz if self.quiz.begin_fetch() => vec![Effect::Call(Call::FetchQuestion)],
            PageState::Payment => {
                self.payment.await_confirmation();
                self.restart_poller(PollerKind::Payment)
            }
            _ => Vec::new(),
        }
    }

    fn restart_poller(&mut self, kind: PollerKind) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.poller_mut(kind).stop() {
            effects.push(Effect::StopPoller(kind));
        }
        let period_ms = match kind {
            PollerKind::Authorization => self.config.auth_poll_interval_ms,
            PollerKind::Payment => self.config.payment_poll_interval_ms,
        };
        let ticket = self.poller_mut(kind).start();
        effects.push(Effect::StartPoller { ticket, period_ms });
        effects
    }

    fn stop_pollers(&mut self) -> Vec<Effect> {
        [PollerKind::Authorization, PollerKind::Payment]
            .into_iter()
            .filter(|kind| self.poller_mut(*kind).stop())
            .map(Effect::StopPoller)
            .collect()
    }

    /// Terminal sequence. Running it again once released does nothing.
    fn succeed(&mut self) -> Vec<Effect> {
        if self.page == PageState::Success {
            return Vec::new();
        }
        let mut effects = self.stop_pollers();
        self.clear_fate();
        self.page = PageState::Success;
        log::info!("Device {} released", self.identity.device_id);

        effects.push(Effect::Defer {
            after_ms: self.config.success_redirect_ms,
            event: Deferred::LeavePortal,
        });
        effects
    }

    fn persist(&self, fate: &PersistedFate) {
        match self.fate.save(fate) {
            Ok(()) => log::info!("Persisted fate {:?}", fate),
            Err(err) => log::error!("Failed to persist fate {:?}: {}", fate, err),
        }
    }

    fn clear_fate(&self) {
        if let Err(err) = self.fate.clear() {
            log::error!("Failed to clear persisted fate: {}", err);
        }
    }

    fn owe(&mut self, request: PaymentRequest) {
        self.persist(&request.fate());
        self.payment.set_request(request);
    }

    /// Leaves the warning page for the wheel.
    pub fn acknowledge_warning(&mut self) -> Vec<Effect> {
        if self.page != PageState::Warning {
            return Vec::new();
        }
        self.enter(PageState::Wheel)
    }

    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Vec<Effect> {
        self.start_spin_with(|wheel| wheel.start_random_spin(rng))
    }

    /// Spins with a known extra rotation.
    pub fn spin_by(&mut self, extra: u32) -> Vec<Effect> {
        self.start_spin_with(|wheel| wheel.start_spin(extra))
    }

    /// A spin in flight wins, and a settled wheel stays settled.
    fn start_spin_with<F>(&mut self, start: F) -> Vec<Effect>
    where
        F: FnOnce(&mut WheelEngine) -> Option<u64>,
    {
        if self.page != PageState::Wheel || self.wheel.outcome().is_some() {
            return Vec::new();
        }
        match start(&mut self.wheel) {
            Some(_) => vec![Effect::Defer {
                after_ms: self.config.spin_duration_ms,
                event: Deferred::SettleSpin,
            }],
            None => Vec::new(),
        }
    }

    pub fn resume(&mut self, event: Deferred) -> Vec<Effect> {
        match event {
            Deferred::SettleSpin => self.settle_spin(),
            Deferred::EnterPage(page) => self.enter(page),
            Deferred::Succeed => self.succeed(),
            Deferred::FetchQuestion => {
                if self.page == PageState::Quiz && self.quiz.begin_fetch() {
                    vec![Effect::Call(Call::FetchQuestion)]
                } else {
                    Vec::new()
                }
            }
            Deferred::LeavePortal => {
                if self.page != PageState::Success || self.departed {
                    return Vec::new();
                }
                self.departed = true;
                vec![Effect::Navigate(self.identity.original_destination.clone())]
            }
        }
    }

    fn settle_spin(&mut self) -> Vec<Effect> {
        if self.page != PageState::Wheel {
            return Vec::new();
        }
        let outcome = match self.wheel.complete_spin() {
            Some(outcome) => outcome,
            None => return Vec::new(),
        };
        log::info!("Wheel settled at {} degrees, sector {}", outcome.angle_degrees, outcome.sector);

        let path = outcome.path();
        match path {
            FatePath::Quiz => self.persist(&PersistedFate::quiz()),
            FatePath::Payment => {
                if let Some(request) =
                    PaymentRequest::new(self.config.wheel_payment_amount, PaymentReason::WheelSanction)
                {
                    self.owe(request);
                }
            }
        }

        vec![Effect::Defer {
            after_ms: self.config.spin_reveal_ms,
            event: Deferred::EnterPage(PageState::for_path(path)),
        }]
    }

    pub fn select_answer(&mut self, answer: &str) -> bool {
        self.page == PageState::Quiz && self.quiz.select(answer)
    }

    pub fn submit_answer(&mut self) -> Vec<Effect> {
        if self.page != PageState::Quiz {
            return Vec::new();
        }
        match self.quiz.begin_submit(&self.identity.device_id) {
            Some(request) => vec![Effect::Call(Call::SubmitAnswer(request))],
            None => Vec::new(),
        }
    }

    pub fn retry(&mut self) -> Vec<Effect> {
        if self.page == PageState::Quiz && self.quiz.retry() {
            vec![Effect::Call(Call::FetchQuestion)]
        } else {
            Vec::new()
        }
    }

    pub fn give_up(&mut self) -> Vec<Effect> {
        if self.page != PageState::Quiz {
            return Vec::new();
        }
        match self.quiz.begin_give_up(&self.identity.device_id) {
            Some(request) => vec![Effect::Call(Call::GiveUp(request))],
            None => Vec::new(),
        }
    }

    /// Turns an interval tick into a request, unless the poller has moved on.
    pub fn poll(&self, ticket: PollTicket) -> Option<Call> {
        if !self.poller(ticket.kind).accepts(ticket) {
            return None;
        }
        Some(match ticket.kind {
            PollerKind::Authorization => Call::AuthorizationStatus(ticket),
            PollerKind::Payment => Call::PaymentStatus(ticket),
        })
    }

    pub fn handle(&mut self, reply: Reply) -> Vec<Effect> {
        match reply {
            Reply::AuthorizationStatus(ticket, result) => {
                if !self.auth_poller.accepts(ticket) {
                    log::debug!("Dropping stale authorization reply");
                    return Vec::new();
                }
                match result {
                    Ok(status) if status.authorized => self.succeed(),
                    Ok(_) => Vec::new(),
                    Err(err) => {
                        log::debug!("Authorization check failed: {}", err);
                        Vec::new()
                    }
                }
            }
            Reply::PaymentStatus(ticket, result) => {
                if !self.payment_poller.accepts(ticket) {
                    log::debug!("Dropping stale payment reply");
                    return Vec::new();
                }
                match result {
                    Ok(status) if status.status == PaymentStatus::Paid => {
                        self.payment.confirm();
                        self.succeed()
                    }
                    Ok(_) => Vec::new(),
                    Err(err) => {
                        log::debug!("Payment check failed: {}", err);
                        Vec::new()
                    }
                }
            }
            Reply::Question(result) => {
                if self.page == PageState::Quiz {
                    self.quiz.load_question(result);
                }
                Vec::new()
            }
            Reply::Answer(result) => {
                if self.page != PageState::Quiz {
                    return Vec::new();
                }
                match result {
                    Ok(response) => self.grade(response),
                    Err(err) => {
                        log::error!("Answer submission failed: {}", err);
                        self.quiz.submit_failed();
                        vec![Effect::Alert(SUBMIT_FAILED_ALERT.to_string())]
                    }
                }
            }
            Reply::GiveUp(result) => self.settle_give_up(result),
            Reply::PortalSettings(result) => {
                match result {
                    Ok(settings) => self.settings = settings,
                    Err(err) => log::debug!("Portal settings unavailable: {}", err),
                }
                Vec::new()
            }
        }
    }

    fn grade(&mut self, response: AnswerResponse) -> Vec<Effect> {
        let verdict = match self.quiz.grade(response) {
            Some(verdict) => verdict,
            None => return Vec::new(),
        };
        let reveal = self.config.quiz_reveal_ms;

        match verdict {
            QuizVerdict::Retry => Vec::new(),
            QuizVerdict::Escalate => vec![Effect::Defer {
                after_ms: reveal,
                event: Deferred::FetchQuestion,
            }],
            QuizVerdict::UnlockedDirect => vec![Effect::Defer {
                after_ms: reveal,
                event: Deferred::Succeed,
            }],
            QuizVerdict::UnlockedPayPenalty(amount) => {
                if let Some(request) = PaymentRequest::new(amount, PaymentReason::PenaltyUnlock) {
                    self.owe(request);
                }
                vec![Effect::Defer {
                    after_ms: reveal,
                    event: Deferred::EnterPage(PageState::Payment),
                }]
            }
        }
    }

    fn settle_give_up(&mut self, result: PortalResult<GiveUpResponse>) -> Vec<Effect> {
        if self.page != PageState::Quiz {
            return Vec::new();
        }
        let fallback = self.quiz.penalty().fallback_amount(self.config.give_up_surcharge);
        let amount = match result {
            Ok(response) if response.amount > 0 => response.amount,
            Ok(_) => {
                log::warn!("Authority quoted nothing owed, using fallback amount {}", fallback);
                fallback
            }
            Err(err) => {
                log::error!("Give-up request failed ({}), using fallback amount {}", err, fallback);
                fallback
            }
        };

        let mut effects = Vec::new();
        if let Some(request) = PaymentRequest::new(amount, PaymentReason::GaveUp) {
            self.owe(request);
            effects.extend(self.enter(PageState::Payment));
        }
        effects.push(Effect::Navigate(self.config.payment_link(amount)));
        effects
    }

    /// Operator reset: forget the pending fate and reload from scratch.
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut effects = self.stop_pollers();
        self.clear_fate();
        log::info!("Portal state reset for device {}", self.identity.device_id);
        effects.push(Effect::Reload);
        effects
    }

    /// Releases both pollers when the hosting view goes away.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        self.stop_pollers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AnswerRequest, AnswerStatus, AuthStatusResponse, Authority, GiveUpRequest,
        PaymentStatusResponse, QuizQuestion,
    };
    use crate::constants::FATE_PATH_KEY;
    use crate::error::PortalError;
    use crate::fate::MemoryStore;
    use crate::quiz::QuizPhase;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    const DEVICE: &str = "aa:bb:cc:dd:ee:ff";
    const DESTINATION: &str = "http://example.org/start";

    #[derive(Default)]
    struct ScriptedAuthority {
        authorized: Cell<bool>,
        paid: Cell<bool>,
        questions: RefCell<VecDeque<PortalResult<QuizQuestion>>>,
        answers: RefCell<VecDeque<PortalResult<AnswerResponse>>>,
        give_up: RefCell<Option<PortalResult<GiveUpResponse>>>,
        question_fetches: Cell<u32>,
    }

    impl Authority for ScriptedAuthority {
        async fn authorization_status(&self, _device_id: &str) -> PortalResult<AuthStatusResponse> {
            Ok(AuthStatusResponse {
                authorized: self.authorized.get(),
                mac: None,
            })
        }

        async fn fetch_question(&self) -> PortalResult<QuizQuestion> {
            self.question_fetches.set(self.question_fetches.get() + 1);
            self.questions
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(question("next")))
        }

        async fn submit_answer(&self, _request: &AnswerRequest) -> PortalResult<AnswerResponse> {
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(PortalError::Network("no scripted answer".into())))
        }

        async fn give_up(&self, _request: &GiveUpRequest) -> PortalResult<GiveUpResponse> {
            self.give_up
                .borrow_mut()
                .take()
                .unwrap_or(Err(PortalError::Network("unreachable".into())))
        }

        async fn payment_status(&self, _device_id: &str) -> PortalResult<PaymentStatusResponse> {
            let status = if self.paid.get() {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            };
            Ok(PaymentStatusResponse { status, message: None })
        }

        async fn portal_settings(&self) -> PortalResult<PortalSettings> {
            Ok(PortalSettings {
                payment_url: None,
                quiz_rules: Some("Answer to unlock.".into()),
                maintenance_mode: false,
            })
        }
    }

    fn question(id: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            question: "What does NAC stand for?".into(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        }
    }

    fn answer(correct: bool, status: AnswerStatus, penalty: u32, wrong_count: Option<u32>) -> AnswerResponse {
        AnswerResponse {
            correct,
            status,
            penalty: Some(penalty),
            wrong_count,
            message: None,
        }
    }

    /// Plays the role of the browser shell: runs calls inline, records
    /// timers, navigation and alerts, and fires deferred events on demand.
    struct Harness {
        controller: FlowController<Rc<MemoryStore>>,
        store: Rc<MemoryStore>,
        authority: ScriptedAuthority,
        timers: HashMap<PollerKind, PollTicket>,
        deferred: VecDeque<Deferred>,
        navigations: Vec<String>,
        alerts: Vec<String>,
        reloads: u32,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_store(Rc::new(MemoryStore::new()))
        }

        fn with_store(store: Rc<MemoryStore>) -> Self {
            let identity = DeviceIdentity {
                device_id: DEVICE.into(),
                original_destination: DESTINATION.into(),
            };
            Self {
                controller: FlowController::new(identity, PortalConfig::default(), store.clone()),
                store,
                authority: ScriptedAuthority::default(),
                timers: HashMap::new(),
                deferred: VecDeque::new(),
                navigations: Vec::new(),
                alerts: Vec::new(),
                reloads: 0,
            }
        }

        fn started() -> Self {
            let mut harness = Self::new();
            let effects = harness.controller.start();
            harness.apply(effects);
            harness
        }

        fn apply(&mut self, effects: Vec<Effect>) {
            let mut queue: VecDeque<Effect> = effects.into();
            while let Some(effect) = queue.pop_front() {
                match effect {
                    Effect::StartPoller { ticket, .. } => {
                        self.timers.insert(ticket.kind, ticket);
                    }
                    Effect::StopPoller(kind) => {
                        self.timers.remove(&kind);
                    }
                    Effect::Call(call) => {
                        let reply = block_on(call.perform(&self.authority, DEVICE));
                        queue.extend(self.controller.handle(reply));
                    }
                    Effect::Defer { event, .. } => self.deferred.push_back(event),
                    Effect::Navigate(url) => self.navigations.push(url),
                    Effect::Alert(message) => self.alerts.push(message),
                    Effect::Reload => self.reloads += 1,
                }
            }
        }

        fn tick(&mut self, kind: PollerKind) {
            if let Some(ticket) = self.timers.get(&kind).copied() {
                if let Some(call) = self.controller.poll(ticket) {
                    self.apply(vec![Effect::Call(call)]);
                }
            }
        }

        fn fire_next(&mut self) -> Option<Deferred> {
            let event = self.deferred.pop_front()?;
            let effects = self.controller.resume(event);
            self.apply(effects);
            Some(event)
        }

        fn fire_all(&mut self) {
            while self.fire_next().is_some() {}
        }

        fn act(&mut self, f: impl FnOnce(&mut FlowController<Rc<MemoryStore>>) -> Vec<Effect>) {
            let effects = f(&mut self.controller);
            self.apply(effects);
        }

        fn persisted(&self) -> Option<PersistedFate> {
            self.controller.fate_store().load().unwrap()
        }

        /// Puts the harness on the quiz page with a loaded question.
        fn on_quiz() -> Self {
            let store = Rc::new(MemoryStore::new());
            FateStore::new(store.clone()).save(&PersistedFate::quiz()).unwrap();
            let mut harness = Self::with_store(store);
            harness.act(|c| c.start());
            assert_eq!(harness.controller.page(), PageState::Quiz);
            harness
        }

        fn submit(&mut self, response: PortalResult<AnswerResponse>) {
            self.authority.answers.borrow_mut().push_back(response);
            assert!(self.controller.select_answer("A"));
            self.act(|c| c.submit_answer());
        }
    }

    #[test]
    fn test_fresh_start_shows_warning_and_polls_authorization() {
        let harness = Harness::started();
        assert_eq!(harness.controller.page(), PageState::Warning);
        assert!(harness.timers.contains_key(&PollerKind::Authorization));
        assert!(!harness.timers.contains_key(&PollerKind::Payment));
        assert_eq!(
            harness.controller.settings().quiz_rules.as_deref(),
            Some("Answer to unlock.")
        );
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut harness = Harness::started();
        assert!(harness.controller.start().is_empty());
    }

    #[test]
    fn test_resume_payment_fate_after_reload() {
        let store = Rc::new(MemoryStore::new());
        FateStore::new(store.clone()).save(&PersistedFate::payment(250)).unwrap();
        let mut harness = Harness::with_store(store);
        harness.act(|c| c.start());

        assert_eq!(harness.controller.page(), PageState::Payment);
        let request = harness.controller.payment().request().unwrap();
        assert_eq!(request.amount(), 250);
        assert_eq!(request.reason(), PaymentReason::Resumed);
        assert!(harness.timers.contains_key(&PollerKind::Payment));
        assert!(harness.timers.contains_key(&PollerKind::Authorization));
    }

    #[test]
    fn test_resume_quiz_fate_fetches_question() {
        let harness = Harness::on_quiz();
        assert_eq!(harness.authority.question_fetches.get(), 1);
        assert_eq!(harness.controller.quiz().question().unwrap().id, "next");
    }

    #[test]
    fn test_inconsistent_fate_is_discarded() {
        let store = Rc::new(MemoryStore::new());
        FateStore::new(store.clone()).save_path(FatePath::Payment).unwrap();
        let mut harness = Harness::with_store(store);
        harness.act(|c| c.start());
        assert_eq!(harness.controller.page(), PageState::Warning);
        assert_eq!(harness.persisted(), None);
    }

    #[test]
    fn test_wheel_payment_outcome() {
        let mut harness = Harness::started();
        harness.act(|c| c.acknowledge_warning());
        assert_eq!(harness.controller.page(), PageState::Wheel);

        harness.act(|c| c.spin_by(10));
        harness.act(|c| c.spin_by(200));
        assert_eq!(harness.deferred, VecDeque::from(vec![Deferred::SettleSpin]));
        assert_eq!(harness.controller.wheel().rotation(), 1810);

        assert_eq!(harness.fire_next(), Some(Deferred::SettleSpin));
        assert_eq!(harness.persisted(), Some(PersistedFate::payment(100)));
        assert_eq!(harness.controller.page(), PageState::Wheel);

        assert_eq!(harness.fire_next(), Some(Deferred::EnterPage(PageState::Payment)));
        assert_eq!(harness.controller.page(), PageState::Payment);
        let request = harness.controller.payment().request().unwrap();
        assert_eq!(request.amount(), 100);
        assert_eq!(request.reason(), PaymentReason::WheelSanction);
        assert!(harness.timers.contains_key(&PollerKind::Payment));
    }

    #[test]
    fn test_wheel_quiz_outcome() {
        let mut harness = Harness::started();
        harness.act(|c| c.acknowledge_warning());
        harness.act(|c| c.spin_by(0));
        harness.fire_all();
        assert_eq!(harness.persisted(), Some(PersistedFate::quiz()));
        assert_eq!(harness.controller.page(), PageState::Quiz);
        assert_eq!(harness.authority.question_fetches.get(), 1);
    }

    #[test]
    fn test_settled_wheel_refuses_another_spin() {
        let mut harness = Harness::started();
        harness.act(|c| c.acknowledge_warning());
        harness.act(|c| c.spin_by(10));
        assert_eq!(harness.fire_next(), Some(Deferred::SettleSpin));

        assert!(harness.controller.spin_by(30).is_empty());
        assert!(harness.controller.spin(&mut rand::thread_rng()).is_empty());
        assert_eq!(harness.controller.wheel().rotation(), 1810);
        assert_eq!(
            harness.deferred,
            VecDeque::from(vec![Deferred::EnterPage(PageState::Payment)])
        );
    }

    #[test]
    fn test_random_spin_settles_on_the_wheel_page() {
        let mut harness = Harness::started();
        harness.act(|c| c.acknowledge_warning());
        harness.act(|c| c.spin(&mut rand::thread_rng()));
        let rotation = harness.controller.wheel().rotation();
        assert!((1800..2160).contains(&rotation));
        assert_eq!(harness.deferred, VecDeque::from(vec![Deferred::SettleSpin]));
    }

    #[test]
    fn test_spin_ignored_off_the_wheel_page() {
        let mut harness = Harness::started();
        assert!(harness.controller.spin_by(10).is_empty());
        assert_eq!(harness.controller.wheel().rotation(), 0);
    }

    #[test]
    fn test_authorization_releases_device_once() {
        let mut harness = Harness::on_quiz();
        let stale = harness.timers[&PollerKind::Authorization];

        harness.tick(PollerKind::Authorization);
        assert_eq!(harness.controller.page(), PageState::Quiz);

        harness.authority.authorized.set(true);
        harness.tick(PollerKind::Authorization);
        assert_eq!(harness.controller.page(), PageState::Success);
        assert_eq!(harness.persisted(), None);
        assert!(harness.timers.is_empty());
        assert!(!harness.controller.is_polling(PollerKind::Authorization));

        // a tick or reply from the torn-down poller does nothing
        assert_eq!(harness.controller.poll(stale), None);
        let late = Reply::AuthorizationStatus(
            stale,
            Ok(AuthStatusResponse { authorized: true, mac: None }),
        );
        assert!(harness.controller.handle(late).is_empty());

        harness.fire_all();
        assert_eq!(harness.navigations, vec![DESTINATION.to_string()]);
        assert!(harness.controller.resume(Deferred::LeavePortal).is_empty());
        assert!(harness.controller.resume(Deferred::Succeed).is_empty());
    }

    #[test]
    fn test_in_flight_replies_from_both_pollers_succeed_once() {
        let store = Rc::new(MemoryStore::new());
        FateStore::new(store.clone()).save(&PersistedFate::payment(100)).unwrap();
        let mut harness = Harness::with_store(store);
        harness.act(|c| c.start());

        let auth = harness.controller.poll(harness.timers[&PollerKind::Authorization]).unwrap();
        let payment = harness.controller.poll(harness.timers[&PollerKind::Payment]).unwrap();
        harness.authority.authorized.set(true);
        harness.authority.paid.set(true);

        let first = block_on(auth.perform(&harness.authority, DEVICE));
        let second = block_on(payment.perform(&harness.authority, DEVICE));
        let effects = harness.controller.handle(first);
        assert!(effects.contains(&Effect::StopPoller(PollerKind::Payment)));
        assert!(harness.controller.handle(second).is_empty());
        assert_eq!(harness.controller.page(), PageState::Success);
    }

    #[test]
    fn test_first_miss_waits_for_choice() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(false, AnswerStatus::Wrong, 20, Some(1))));

        assert_eq!(harness.controller.quiz().phase(), &QuizPhase::Retry);
        assert!(harness.deferred.is_empty());
        assert_eq!(harness.authority.question_fetches.get(), 1);

        harness.act(|c| c.retry());
        assert_eq!(harness.authority.question_fetches.get(), 2);
        assert_eq!(harness.controller.quiz().phase(), &QuizPhase::AwaitingAnswer);
    }

    #[test]
    fn test_repeated_miss_fetches_new_question_automatically() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(false, AnswerStatus::Wrong, 40, Some(2))));

        assert_eq!(harness.deferred, VecDeque::from(vec![Deferred::FetchQuestion]));
        assert!(harness.controller.give_up().is_empty());
        harness.fire_all();
        assert_eq!(harness.authority.question_fetches.get(), 2);
        assert_eq!(harness.controller.quiz().wrong_count(), 0);
    }

    #[test]
    fn test_solved_with_penalty_moves_to_payment() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(true, AnswerStatus::PayPenalty, 250, None)));

        assert_eq!(harness.persisted(), Some(PersistedFate::payment(250)));
        let request = harness.controller.payment().request().unwrap();
        assert_eq!(request.reason(), PaymentReason::PenaltyUnlock);
        assert_eq!(request.reason().message(), "Correct! But the accumulated penalty must be paid");
        assert!(harness.timers.contains_key(&PollerKind::Authorization));

        harness.fire_all();
        assert_eq!(harness.controller.page(), PageState::Payment);
        assert!(harness.timers.contains_key(&PollerKind::Payment));
        assert!(harness.timers.contains_key(&PollerKind::Authorization));
    }

    #[test]
    fn test_solved_cleanly_runs_terminal_sequence() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(true, AnswerStatus::Unlocked, 0, None)));
        assert_eq!(harness.controller.page(), PageState::Quiz);

        harness.fire_all();
        assert_eq!(harness.controller.page(), PageState::Success);
        assert_eq!(harness.persisted(), None);
        assert_eq!(harness.navigations, vec![DESTINATION.to_string()]);
    }

    #[test]
    fn test_failed_submission_alerts_and_allows_resubmit() {
        let mut harness = Harness::on_quiz();
        harness.submit(Err(PortalError::Network("offline".into())));
        assert_eq!(harness.alerts, vec![SUBMIT_FAILED_ALERT.to_string()]);
        assert_eq!(
            harness.controller.quiz().phase(),
            &QuizPhase::AwaitingAnswer
        );
        harness.authority.answers.borrow_mut().push_back(Ok(answer(false, AnswerStatus::Wrong, 20, Some(1))));
        harness.act(|c| c.submit_answer());
        assert_eq!(harness.controller.quiz().phase(), &QuizPhase::Retry);
    }

    #[test]
    fn test_give_up_failure_uses_fallback_amount() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(false, AnswerStatus::Wrong, 20, Some(1))));
        harness.act(|c| c.give_up());

        assert_eq!(harness.navigations, vec!["https://t.me/KDA_V2_bot?start=pay_120".to_string()]);
        assert_eq!(harness.persisted(), Some(PersistedFate::payment(120)));
        assert_eq!(harness.controller.payment().request().unwrap().reason(), PaymentReason::GaveUp);

        // if the payment channel never opens, the amount stays on screen
        assert_eq!(harness.controller.page(), PageState::Payment);
        assert_eq!(
            harness.controller.payment().phase(),
            crate::payment::PaymentPhase::AwaitingConfirmation
        );
        assert!(harness.timers.contains_key(&PollerKind::Payment));
    }

    #[test]
    fn test_give_up_uses_quoted_amount() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(false, AnswerStatus::Wrong, 20, Some(1))));
        *harness.authority.give_up.borrow_mut() = Some(Ok(GiveUpResponse {
            amount: 90,
            status: Some("pay_capital".into()),
        }));
        harness.act(|c| c.give_up());

        assert_eq!(harness.navigations, vec!["https://t.me/KDA_V2_bot?start=pay_90".to_string()]);
        assert_eq!(harness.persisted(), Some(PersistedFate::payment(90)));
    }

    #[test]
    fn test_paid_after_giving_up_releases_device() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(false, AnswerStatus::Wrong, 20, Some(1))));
        harness.act(|c| c.give_up());
        assert_eq!(harness.controller.page(), PageState::Payment);

        harness.tick(PollerKind::Payment);
        assert_eq!(harness.controller.page(), PageState::Payment);

        harness.authority.paid.set(true);
        harness.tick(PollerKind::Payment);
        assert_eq!(harness.controller.page(), PageState::Success);
        assert_eq!(harness.persisted(), None);
        assert!(harness.timers.is_empty());
    }

    #[test]
    fn test_deferred_page_change_after_release_is_ignored() {
        let mut harness = Harness::on_quiz();
        harness.submit(Ok(answer(true, AnswerStatus::PayPenalty, 60, None)));
        harness.authority.authorized.set(true);
        harness.tick(PollerKind::Authorization);
        assert_eq!(harness.controller.page(), PageState::Success);

        assert_eq!(harness.fire_next(), Some(Deferred::EnterPage(PageState::Payment)));
        assert_eq!(harness.controller.page(), PageState::Success);
        assert!(!harness.timers.contains_key(&PollerKind::Payment));
    }

    #[test]
    fn test_reset_clears_fate_and_reloads() {
        let mut harness = Harness::on_quiz();
        harness.act(|c| c.reset());
        assert_eq!(harness.reloads, 1);
        assert!(harness.timers.is_empty());
        assert_eq!(harness.persisted(), None);
        assert!(harness.store.get(FATE_PATH_KEY).unwrap().is_none());
    }

    #[test]
    fn test_transition_table() {
        use PageState::*;
        assert!(Warning.can_become(Wheel));
        assert!(Wheel.can_become(Payment));
        assert!(Quiz.can_become(Payment));
        assert!(Payment.can_become(Success));
        assert!(!Payment.can_become(Quiz));
        assert!(!Quiz.can_become(Wheel));
        assert!(!Success.can_become(Success));
        assert!(!Success.can_become(Warning));
    }
}
