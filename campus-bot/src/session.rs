//! Per-chat conversational state for the registration and login flows.
//!
//! The two flows are independent axes, each a concurrent map keyed by chat id. An axis holds an
//! entry only while its state is not [`FlowState::Idle`], so scratch data exists iff a flow is active.

use dashmap::DashMap;
use tracing::debug;

/// Which dialog axis a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Registration,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Idle,
    /// Reserved; `/register` goes straight to faculty selection.
    AwaitingRole,
    AwaitingFaculty,
    AwaitingGroup,
    AwaitingCode,
    AwaitingPassword,
    LoginAwaitingCode,
    LoginAwaitingPassword,
}

impl FlowState {
    /// Axis the state lives on; `None` for Idle.
    pub fn flow(&self) -> Option<Flow> {
        match self {
            FlowState::Idle => None,
            FlowState::AwaitingRole
            | FlowState::AwaitingFaculty
            | FlowState::AwaitingGroup
            | FlowState::AwaitingCode
            | FlowState::AwaitingPassword => Some(Flow::Registration),
            FlowState::LoginAwaitingCode | FlowState::LoginAwaitingPassword => Some(Flow::Login),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::AwaitingRole => "awaiting_role",
            FlowState::AwaitingFaculty => "awaiting_faculty",
            FlowState::AwaitingGroup => "awaiting_group",
            FlowState::AwaitingCode => "awaiting_code",
            FlowState::AwaitingPassword => "awaiting_password",
            FlowState::LoginAwaitingCode => "login_awaiting_code",
            FlowState::LoginAwaitingPassword => "login_awaiting_password",
        }
    }
}

/// Values collected while a flow is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scratch {
    pub faculty: Option<String>,
    pub group: Option<String>,
    /// Registration: the unclaimed record matched by code. Login: the account being logged into.
    pub matched_user_id: Option<i64>,
    pub login_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: FlowState,
    pub scratch: Scratch,
}

/// Registration and login state per chat. Each map entry is replaced whole, never mutated in place.
#[derive(Default)]
pub struct SessionStore {
    registration: DashMap<i64, Session>,
    login: DashMap<i64, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn axis(&self, flow: Flow) -> &DashMap<i64, Session> {
        match flow {
            Flow::Registration => &self.registration,
            Flow::Login => &self.login,
        }
    }

    /// Current state of the axis, `None` when idle.
    pub fn get_state(&self, flow: Flow, chat_id: i64) -> Option<FlowState> {
        self.axis(flow).get(&chat_id).map(|s| s.state)
    }

    /// Snapshot of state and scratch.
    pub fn get(&self, flow: Flow, chat_id: i64) -> Option<Session> {
        self.axis(flow).get(&chat_id).map(|s| s.clone())
    }

    /// Replaces the axis entry. `Idle` clears it and drops the scratch.
    pub fn set_state(&self, flow: Flow, chat_id: i64, state: FlowState, scratch: Scratch) {
        if state == FlowState::Idle {
            self.clear_state(flow, chat_id);
            return;
        }
        debug_assert_eq!(state.flow(), Some(flow), "state set on the wrong axis");
        debug!(chat_id = chat_id, flow = ?flow, state = state.as_str(), "Session state set");
        self.axis(flow).insert(chat_id, Session { state, scratch });
    }

    /// Returns true when there was something to clear.
    pub fn clear_state(&self, flow: Flow, chat_id: i64) -> bool {
        let removed = self.axis(flow).remove(&chat_id).is_some();
        if removed {
            debug!(chat_id = chat_id, flow = ?flow, "Session state cleared");
        }
        removed
    }

    /// Clears both axes. Returns true when either had state.
    pub fn clear_all(&self, chat_id: i64) -> bool {
        let login = self.clear_state(Flow::Login, chat_id);
        let registration = self.clear_state(Flow::Registration, chat_id);
        login || registration
    }

    /// True when neither axis has state for the chat.
    pub fn is_idle(&self, chat_id: i64) -> bool {
        !self.login.contains_key(&chat_id) && !self.registration.contains_key(&chat_id)
    }
}
