use super::*;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use uuid::Uuid;

use crate::net::api::ApiFuture;
use crate::net::types::LoginResponse;
use crate::util::credentials::MemoryCredentials;

// =============================================================
// Fakes
// =============================================================

enum Scripted<T> {
    Now(Result<T, ApiError>),
    Wait(oneshot::Receiver<Result<T, ApiError>>),
}

/// Scripted [`AuthApi`]: each call pops the next scripted response, either
/// resolving immediately or waiting on a sender the test controls.
#[derive(Default)]
struct FakeAuthApi {
    login_script: Mutex<VecDeque<Scripted<LoginResponse>>>,
    me_script: Mutex<VecDeque<Scripted<User>>>,
    logout_script: Mutex<VecDeque<Scripted<()>>>,
    login_calls: AtomicUsize,
    me_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl FakeAuthApi {
    fn script_login(&self, result: Result<LoginResponse, ApiError>) {
        self.login_script.lock().expect("login script").push_back(Scripted::Now(result));
    }

    fn script_login_pending(&self) -> oneshot::Sender<Result<LoginResponse, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.login_script.lock().expect("login script").push_back(Scripted::Wait(rx));
        tx
    }

    fn script_me(&self, result: Result<User, ApiError>) {
        self.me_script.lock().expect("me script").push_back(Scripted::Now(result));
    }

    fn script_me_pending(&self) -> oneshot::Sender<Result<User, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.me_script.lock().expect("me script").push_back(Scripted::Wait(rx));
        tx
    }

    fn script_logout(&self, result: Result<(), ApiError>) {
        self.logout_script.lock().expect("logout script").push_back(Scripted::Now(result));
    }

    fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

fn scripted_future<T: 'static>(step: Scripted<T>) -> ApiFuture<T> {
    match step {
        Scripted::Now(result) => Box::pin(async move { result }),
        Scripted::Wait(rx) => Box::pin(async move { rx.await.expect("scripted response dropped") }),
    }
}

impl AuthApi for FakeAuthApi {
    fn login(&self, _email: &str, _password: &str) -> ApiFuture<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .login_script
            .lock()
            .expect("login script")
            .pop_front()
            .expect("unscripted login call");
        scripted_future(step)
    }

    fn me(&self, _token: &str) -> ApiFuture<User> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .me_script
            .lock()
            .expect("me script")
            .pop_front()
            .expect("unscripted me call");
        scripted_future(step)
    }

    fn logout(&self, _token: &str) -> ApiFuture<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .logout_script
            .lock()
            .expect("logout script")
            .pop_front()
            .expect("unscripted logout call");
        scripted_future(step)
    }
}

struct Harness {
    api: Arc<FakeAuthApi>,
    store: Arc<MemoryCredentials>,
    manager: Arc<SessionManager>,
}

fn harness_with(store: MemoryCredentials) -> Harness {
    let api = Arc::new(FakeAuthApi::default());
    let store = Arc::new(store);
    let manager = Arc::new(SessionManager::new(
        Arc::clone(&api) as Arc<dyn AuthApi>,
        Arc::clone(&store) as Arc<dyn CredentialStore>,
    ));
    Harness { api, store, manager }
}

fn harness() -> Harness {
    harness_with(MemoryCredentials::default())
}

fn named_user(name: &str) -> User {
    User {
        id: 1,
        uuid: Uuid::from_u128(10),
        name: name.to_owned(),
        email: "ana@example.com".to_owned(),
    }
}

fn sample_user() -> User {
    named_user("Ana Souza")
}

fn login_response(token: &str, user: User) -> LoginResponse {
    LoginResponse {
        token: token.to_owned(),
        user,
    }
}

// =============================================================
// Snapshot helpers
// =============================================================

#[test]
fn snapshot_default_is_resolving() {
    let snapshot = SessionSnapshot::default();
    assert_eq!(snapshot.status, SessionStatus::Uninitialized);
    assert!(snapshot.is_resolving());
    assert!(!snapshot.is_authenticated());
}

#[test]
fn snapshot_loading_is_resolving() {
    let snapshot = SessionSnapshot {
        status: SessionStatus::Loading,
        user: None,
    };
    assert!(snapshot.is_resolving());
}

#[test]
fn snapshot_authenticated_is_settled() {
    let snapshot = SessionSnapshot {
        status: SessionStatus::Authenticated,
        user: Some(sample_user()),
    };
    assert!(!snapshot.is_resolving());
    assert!(snapshot.is_authenticated());
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_without_stored_token_settles_unauthenticated() {
    let mut pool = LocalPool::new();
    let h = harness();

    pool.run_until(h.manager.initialize());

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Unauthenticated);
    assert_eq!(snapshot.user, None);
    assert_eq!(h.api.me_calls(), 0);
    assert_eq!(h.api.login_calls(), 0);
}

#[test]
fn initialize_resolves_stored_token_with_exactly_one_call() {
    let mut pool = LocalPool::new();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    h.api.script_me(Ok(sample_user()));

    pool.run_until(h.manager.initialize());

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Authenticated);
    assert_eq!(snapshot.user, Some(sample_user()));
    assert_eq!(h.api.me_calls(), 1);
    assert_eq!(h.store.token().as_deref(), Some("T1"));
    assert_eq!(h.store.user_snapshot(), Some(sample_user()));
}

#[test]
fn initialize_with_rejected_token_fails_closed() {
    let mut pool = LocalPool::new();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    h.api.script_me(Err(ApiError::Authentication));

    pool.run_until(h.manager.initialize());

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Unauthenticated);
    assert_eq!(snapshot.user, None);
    // Token cleared, one call made, no retry.
    assert_eq!(h.store.token(), None);
    assert_eq!(h.api.me_calls(), 1);
}

#[test]
fn initialize_treats_network_failure_like_rejection() {
    let mut pool = LocalPool::new();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    h.api.script_me(Err(ApiError::Network("connection refused".to_owned())));

    pool.run_until(h.manager.initialize());

    assert_eq!(h.manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(h.store.token(), None);
    assert_eq!(h.api.me_calls(), 1);
}

#[test]
fn initialize_runs_once() {
    let mut pool = LocalPool::new();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    h.api.script_me(Ok(sample_user()));

    pool.run_until(h.manager.initialize());
    pool.run_until(h.manager.initialize());

    assert_eq!(h.api.me_calls(), 1);
}

#[test]
fn initialize_ignores_malformed_cached_snapshot() {
    let mut pool = LocalPool::new();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    h.store.seed_snapshot_json("{definitely not json");
    h.api.script_me(Ok(sample_user()));

    pool.run_until(h.manager.initialize());

    assert_eq!(h.manager.snapshot().status, SessionStatus::Authenticated);
    assert_eq!(h.api.me_calls(), 1);
}

#[test]
fn initialize_shows_cached_user_provisionally_until_server_answers() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let h = harness_with(MemoryCredentials::seeded("T1"));
    let cached = named_user("Cached Name");
    h.store
        .seed_snapshot_json(&serde_json::to_string(&cached).expect("encode snapshot"));
    let respond = h.api.script_me_pending();

    {
        let manager = Arc::clone(&h.manager);
        spawner
            .spawn_local(async move { manager.initialize().await })
            .expect("spawn initialize");
    }
    pool.run_until_stalled();

    // Provisional: cached user rendered while the server decides.
    let pending = h.manager.snapshot();
    assert_eq!(pending.status, SessionStatus::Loading);
    assert_eq!(pending.user, Some(cached));

    respond.send(Ok(named_user("Fresh Name"))).expect("deliver me response");
    pool.run_until_stalled();

    // Superseded: the server response replaces the cached snapshot.
    let settled = h.manager.snapshot();
    assert_eq!(settled.status, SessionStatus::Authenticated);
    assert_eq!(settled.user, Some(named_user("Fresh Name")));
    assert_eq!(h.store.user_snapshot(), Some(named_user("Fresh Name")));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_persists_token_and_user_together() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T9", sample_user())));

    let result = pool.run_until(h.manager.login("ana@example.com", "good"));

    let snapshot = result.expect("login succeeds");
    assert_eq!(snapshot.status, SessionStatus::Authenticated);
    assert_eq!(snapshot.user, Some(sample_user()));
    assert_eq!(h.store.token().as_deref(), Some("T9"));
    assert_eq!(h.store.user_snapshot(), Some(sample_user()));
}

#[test]
fn login_rejection_leaves_prior_state_untouched() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("first login succeeds");

    h.api.script_login(Err(ApiError::Authentication));
    let result = pool.run_until(h.manager.login("ana@example.com", "typo"));

    assert_eq!(result, Err(ApiError::Authentication));
    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Authenticated);
    assert_eq!(snapshot.user, Some(sample_user()));
    assert_eq!(h.store.token().as_deref(), Some("T1"));
}

#[test]
fn login_network_failure_leaves_session_unauthenticated() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api
        .script_login(Err(ApiError::Network("connection refused".to_owned())));

    let result = pool.run_until(h.manager.login("ana@example.com", "good"));

    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(h.manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(h.store.token(), None);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_local_state_even_when_remote_call_fails() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");

    h.api
        .script_logout(Err(ApiError::Network("unreachable".to_owned())));
    pool.run_until(h.manager.logout());

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Unauthenticated);
    assert_eq!(snapshot.user, None);
    assert_eq!(h.store.token(), None);
    assert_eq!(h.store.user_snapshot(), None);
    assert_eq!(h.api.logout_calls(), 1);
}

#[test]
fn logout_without_token_skips_the_remote_call() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());

    pool.run_until(h.manager.logout());

    assert_eq!(h.manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(h.api.logout_calls(), 0);
}

#[test]
fn logout_wins_over_login_still_in_flight() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let h = harness();
    pool.run_until(h.manager.initialize());

    let respond = h.api.script_login_pending();
    let login_result: Rc<RefCell<Option<Result<SessionSnapshot, ApiError>>>> =
        Rc::new(RefCell::new(None));
    {
        let manager = Arc::clone(&h.manager);
        let login_result = Rc::clone(&login_result);
        spawner
            .spawn_local(async move {
                *login_result.borrow_mut() = Some(manager.login("ana@example.com", "good").await);
            })
            .expect("spawn login");
    }
    pool.run_until_stalled();
    assert_eq!(h.api.login_calls(), 1);

    // Logout lands while the login response is still on the wire.
    pool.run_until(h.manager.logout());
    respond
        .send(Ok(login_response("T1", sample_user())))
        .expect("deliver login response");
    pool.run_until_stalled();

    // Logout's intent wins: the late login response cannot resurrect the session.
    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Unauthenticated);
    assert_eq!(snapshot.user, None);
    assert_eq!(h.store.token(), None);
    let resolved = login_result.borrow_mut().take().expect("login completed");
    assert_eq!(
        resolved.expect("discarded login resolves ok").status,
        SessionStatus::Unauthenticated
    );
}

// =============================================================
// refresh
// =============================================================

#[test]
fn refresh_without_token_is_a_noop() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());

    let result = pool.run_until(h.manager.refresh());

    assert_eq!(
        result.expect("noop refresh resolves").status,
        SessionStatus::Unauthenticated
    );
    assert_eq!(h.api.me_calls(), 0);
}

#[test]
fn refresh_picks_up_profile_changes() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");

    h.api.script_me(Ok(named_user("Ana Renamed")));
    let result = pool.run_until(h.manager.refresh());

    assert_eq!(
        result.expect("refresh succeeds").user,
        Some(named_user("Ana Renamed"))
    );
    assert_eq!(h.store.user_snapshot(), Some(named_user("Ana Renamed")));
}

#[test]
fn refresh_failure_demotes_the_session() {
    let mut pool = LocalPool::new();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");

    h.api
        .script_me(Err(ApiError::Network("unreachable".to_owned())));
    let result = pool.run_until(h.manager.refresh());

    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(h.manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(h.store.token(), None);
}

#[test]
fn concurrent_refreshes_share_a_single_me_call() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let h = harness();
    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");

    let respond = h.api.script_me_pending();
    let results: Rc<RefCell<Vec<Result<SessionSnapshot, ApiError>>>> =
        Rc::new(RefCell::new(Vec::new()));
    for _ in 0..2 {
        let manager = Arc::clone(&h.manager);
        let results = Rc::clone(&results);
        spawner
            .spawn_local(async move {
                let result = manager.refresh().await;
                results.borrow_mut().push(result);
            })
            .expect("spawn refresh");
    }
    pool.run_until_stalled();
    assert_eq!(h.api.me_calls(), 1);

    respond
        .send(Ok(named_user("Shared Result")))
        .expect("deliver me response");
    pool.run_until_stalled();

    let results = results.borrow();
    assert_eq!(results.len(), 2);
    for result in results.iter() {
        assert_eq!(
            result.as_ref().expect("both callers succeed").user,
            Some(named_user("Shared Result"))
        );
    }
}

// =============================================================
// Cross-cutting invariants
// =============================================================

#[test]
fn settled_states_always_pair_token_with_user() {
    let mut pool = LocalPool::new();
    let h = harness();
    let paired = |h: &Harness| {
        assert_eq!(
            h.manager.token_for_test().is_some(),
            h.manager.snapshot().user.is_some()
        );
    };

    pool.run_until(h.manager.initialize());
    paired(&h);

    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");
    paired(&h);

    h.api.script_me(Ok(sample_user()));
    pool.run_until(h.manager.refresh()).expect("refresh succeeds");
    paired(&h);

    h.api.script_logout(Ok(()));
    pool.run_until(h.manager.logout());
    paired(&h);
}

#[test]
fn observer_is_notified_on_every_completed_transition() {
    let mut pool = LocalPool::new();
    let h = harness();
    let seen: Arc<Mutex<Vec<SessionStatus>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        h.manager.set_observer(move |snapshot| {
            seen.lock().expect("seen list").push(snapshot.status);
        });
    }

    pool.run_until(h.manager.initialize());
    h.api.script_login(Ok(login_response("T1", sample_user())));
    pool.run_until(h.manager.login("ana@example.com", "good"))
        .expect("login succeeds");
    h.api.script_logout(Ok(()));
    pool.run_until(h.manager.logout());

    assert_eq!(
        seen.lock().expect("seen list").as_slice(),
        &[
            SessionStatus::Unauthenticated,
            SessionStatus::Authenticated,
            SessionStatus::Unauthenticated,
        ]
    );
}
