//! BR/EDR Secure Simple Pairing state machine
//!
//! One `PairingState` exists per baseband link. The connection layer feeds
//! it controller events, one call per event, on the single execution
//! context that owns the link; upper layers request pairing through
//! `initiate_pairing`. User interaction runs through an optional
//! `PairingDelegate` whose replies arrive at an arbitrary later time, so
//! the machine parks in a `Wait*` state while one is outstanding. Any
//! event that is illegal for the current state fails the negotiation.

use super::delegate::{ConfirmCallback, DisplayMethod, PairingDelegate, PasskeyResponseCallback};
use super::link::BrEdrLink;
use super::types::BdAddr;
use crate::error::{PairingError, PairingStatus};
use crate::hci::constants::*;
use crate::hci::{AuthRequirements, ConnectionHandle, IoCapability, LinkKey, LinkKeyType, StatusCode};
use crate::smp;
use crate::smp::{SecurityLevel, SecurityProperties};
use log::{debug, error, info, trace, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback signaled once with the final status of a pairing request
pub type StatusCallback = Box<dyn FnOnce(ConnectionHandle, PairingStatus)>;

/// Fixed top-level status sink, signaled on every terminal pairing event
pub type StatusListener = Box<dyn FnMut(ConnectionHandle, PairingStatus)>;

/// Reply to a User Confirmation Request event
pub type UserConfirmationCallback = Box<dyn FnOnce(bool)>;

/// Reply to a User Passkey Request event; `None` maps to a negative reply
pub type UserPasskeyCallback = Box<dyn FnOnce(Option<u32>)>;

/// Whether the caller of `initiate_pairing` must send the low-level
/// Authentication Request for the pairing it was handed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiatorAction {
    SendAuthenticationRequest,
    DoNotSendAuthenticationRequest,
}

/// User-interaction model selected for one pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingAction {
    /// No user interaction; confirm automatically
    Automatic,
    /// Numeric comparison with automatic confirmation, shown through the
    /// delegate which performs the confirmation on the user's behalf
    DisplayPasskey,
    /// Numeric comparison both sides must visibly confirm
    ComparePasskey,
    /// Prompt the user to enter the passkey shown on the peer
    RequestPasskey,
    /// Ask the user for a yes/no consent
    GetConsent,
}

/// States of the pairing machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No pairing in progress
    Idle,
    /// Pairing was locally initiated; awaiting the IO Capability Request
    InitiatorPairingStarted,
    /// Awaiting the peer's IO Capability Response
    InitiatorWaitIoCapResponse,
    /// Peer initiated; awaiting our own IO Capability Request
    ResponderWaitIoCapRequest,
    /// Awaiting a User Confirmation Request
    WaitUserConfirmationRequest,
    /// Awaiting a User Passkey Request
    WaitUserPasskeyRequest,
    /// Awaiting a User Passkey Notification
    WaitUserPasskeyNotification,
    /// Awaiting Simple Pairing Complete
    WaitPairingComplete,
    /// Awaiting the Link Key Notification
    WaitLinkKey,
    /// Awaiting Authentication Complete (initiator only)
    InitiatorWaitAuthComplete,
    /// Awaiting the Encryption Change for the new key
    WaitEncryption,
    /// Pairing failed; a new connection is needed before retrying
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Idle => "Idle",
            State::InitiatorPairingStarted => "InitiatorPairingStarted",
            State::InitiatorWaitIoCapResponse => "InitiatorWaitIoCapResponse",
            State::ResponderWaitIoCapRequest => "ResponderWaitIoCapRequest",
            State::WaitUserConfirmationRequest => "WaitUserConfirmationRequest",
            State::WaitUserPasskeyRequest => "WaitUserPasskeyRequest",
            State::WaitUserPasskeyNotification => "WaitUserPasskeyNotification",
            State::WaitPairingComplete => "WaitPairingComplete",
            State::WaitLinkKey => "WaitLinkKey",
            State::InitiatorWaitAuthComplete => "InitiatorWaitAuthComplete",
            State::WaitEncryption => "WaitEncryption",
            State::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}

/// One in-flight pairing negotiation
struct Pairing {
    /// Whether pairing was initiated locally
    initiator: bool,
    /// Local IO capability, gathered from the delegate
    local_iocap: Option<IoCapability>,
    /// Peer IO capability from its IO Capability Response
    peer_iocap: Option<IoCapability>,
    /// User-interaction model, derived once both capabilities are known
    action: PairingAction,
    /// Event code the controller is expected to deliver next
    expected_event: u8,
    /// Whether the capability exchange predicts an authenticated key
    authenticated: bool,
    /// Properties of the reported key, populated on link key arrival
    security_properties: Option<SecurityProperties>,
    /// Callbacks of callers coalesced onto this negotiation, in order
    initiator_callbacks: Vec<StatusCallback>,
    /// Liveness token; delegate replies become no-ops once it is dropped
    alive: Rc<()>,
}

impl Pairing {
    fn new_initiator(status_callback: StatusCallback) -> Self {
        let mut pairing = Self::new(true);
        pairing.initiator_callbacks.push(status_callback);
        pairing
    }

    fn new_responder(peer_iocap: IoCapability) -> Self {
        let mut pairing = Self::new(false);
        pairing.peer_iocap = Some(peer_iocap);
        pairing
    }

    fn new(initiator: bool) -> Self {
        Self {
            initiator,
            local_iocap: None,
            peer_iocap: None,
            action: PairingAction::Automatic,
            expected_event: 0,
            authenticated: false,
            security_properties: None,
            initiator_callbacks: Vec::new(),
            alive: Rc::new(()),
        }
    }

    fn weak_token(&self) -> Weak<()> {
        Rc::downgrade(&self.alive)
    }

    /// Derive the action, expected event and authentication expectation
    /// from the exchanged capabilities
    fn compute_pairing_data(&mut self, local_iocap: IoCapability, peer_iocap: IoCapability) {
        self.action = if self.initiator {
            initiator_pairing_action(local_iocap, peer_iocap)
        } else {
            responder_pairing_action(peer_iocap, local_iocap)
        };
        self.expected_event = expected_pairing_event(local_iocap, peer_iocap);
        debug_assert_ne!(state_for_pairing_event(self.expected_event), State::Failed);
        self.authenticated = is_pairing_authenticated(local_iocap, peer_iocap);
        debug!(
            "as {} with local {}/peer {} capabilities, expecting an {}authenticated {:?} pairing using event {:#04x}",
            if self.initiator { "initiator" } else { "responder" },
            local_iocap,
            peer_iocap,
            if self.authenticated { "" } else { "un" },
            self.action,
            self.expected_event
        );
    }
}

/// Per-link pairing state machine
pub struct PairingState {
    /// Address of the peer on the link
    peer_id: BdAddr,
    /// The link pairing operates on; owned by the connection layer
    link: Rc<RefCell<dyn BrEdrLink>>,
    /// UI-facing delegate; upgraded and checked at every use
    delegate: Option<Weak<dyn PairingDelegate>>,
    state: State,
    current_pairing: Option<Pairing>,
    status_callback: StatusListener,
}

impl PairingState {
    /// Create a pairing machine bound to one live link
    ///
    /// `status_callback` is the fixed top-level sink fired for every
    /// terminal pairing event on the link.
    pub fn new(
        peer_id: BdAddr,
        link: Rc<RefCell<dyn BrEdrLink>>,
        status_callback: StatusListener,
    ) -> Self {
        Self {
            peer_id,
            link,
            delegate: None,
            state: State::Idle,
            current_pairing: None,
            status_callback,
        }
    }

    /// Attach or detach the pairing delegate
    ///
    /// The delegate is held weakly; it may be dropped by its owner at any
    /// time, after which pairing fails with `NotReady` wherever one is
    /// required.
    pub fn set_pairing_delegate(&mut self, delegate: Option<&Rc<dyn PairingDelegate>>) {
        self.delegate = delegate.map(Rc::downgrade);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn peer_id(&self) -> BdAddr {
        self.peer_id
    }

    /// Whether the in-flight pairing, if any, was locally initiated
    pub fn initiator(&self) -> bool {
        self.current_pairing.as_ref().is_some_and(|p| p.initiator)
    }

    fn is_pairing(&self) -> bool {
        self.current_pairing.is_some()
    }

    /// Security properties of the key produced by the in-flight pairing,
    /// available once the Link Key Notification has arrived
    pub fn security_properties(&self) -> Option<SecurityProperties> {
        self.current_pairing
            .as_ref()
            .and_then(|p| p.security_properties)
    }

    fn handle(&self) -> ConnectionHandle {
        self.link.borrow().handle()
    }

    fn pairing_delegate(&self) -> Option<Rc<dyn PairingDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Request pairing on behalf of an upper-layer consumer
    ///
    /// The first caller on an idle link gets `SendAuthenticationRequest`
    /// and must issue the low-level Authentication Request; every later
    /// caller is coalesced onto the pairing already in flight and receives
    /// the same final status through its callback.
    pub fn initiate_pairing(&mut self, status_cb: StatusCallback) -> InitiatorAction {
        // Only the requesting caller is told about a missing delegate; any
        // pairing already in flight is left undisturbed.
        if self.pairing_delegate().is_none() {
            debug!(
                "no pairing delegate for link {:#06x} (id: {}); not pairing",
                self.handle(),
                self.peer_id
            );
            status_cb(self.handle(), Err(PairingError::NotReady));
            return InitiatorAction::DoNotSendAuthenticationRequest;
        }

        if self.state == State::Idle {
            debug_assert!(!self.is_pairing());
            self.current_pairing = Some(Pairing::new_initiator(status_cb));
            debug!(
                "initiating pairing on {:#06x} (id: {})",
                self.handle(),
                self.peer_id
            );
            self.state = State::InitiatorPairingStarted;
            return InitiatorAction::SendAuthenticationRequest;
        }

        // More than one consumer may want pairing at once (e.g. concurrent
        // outbound L2CAP channels); all but the first wait on the ongoing
        // procedure instead of sending their own Authentication Request.
        let handle = self.handle();
        if let Some(pairing) = self.current_pairing.as_mut() {
            debug!(
                "already pairing {:#06x} (id: {}); queueing callback for completion",
                handle, self.peer_id
            );
            pairing.initiator_callbacks.push(status_cb);
        } else {
            // A failed pairing sticks until the connection is replaced, so
            // new requests are canceled immediately.
            debug_assert_eq!(self.state, State::Failed);
            status_cb(handle, Err(PairingError::Canceled));
        }
        InitiatorAction::DoNotSendAuthenticationRequest
    }

    /// Handle an IO Capability Request event
    ///
    /// Returns the local capability the caller must put in the IO
    /// Capability Request Reply, or `None` if the request must be answered
    /// negatively.
    pub fn on_io_capability_request(&mut self) -> Option<IoCapability> {
        if self.state == State::InitiatorPairingStarted {
            debug_assert!(self.initiator());
            let Some(delegate) = self.pairing_delegate() else {
                self.fail_without_delegate(State::Idle);
                return None;
            };
            let local_iocap = smp::io_capability_for_hci(delegate.io_capability());
            if let Some(pairing) = self.current_pairing.as_mut() {
                pairing.local_iocap = Some(local_iocap);
            }
            self.state = State::InitiatorWaitIoCapResponse;
            Some(local_iocap)
        } else if self.state == State::ResponderWaitIoCapRequest {
            debug_assert!(self.is_pairing());
            debug_assert!(!self.initiator());
            let Some(delegate) = self.pairing_delegate() else {
                self.fail_without_delegate(State::Idle);
                return None;
            };
            let local_iocap = smp::io_capability_for_hci(delegate.io_capability());
            let next = if let Some(pairing) = self.current_pairing.as_mut() {
                pairing.local_iocap = Some(local_iocap);
                match pairing.peer_iocap {
                    Some(peer_iocap) => {
                        pairing.compute_pairing_data(local_iocap, peer_iocap);
                        Some(state_for_pairing_event(pairing.expected_event))
                    }
                    None => None,
                }
            } else {
                None
            };
            match next {
                Some(next) => self.state = next,
                None => {
                    self.fail_with_unexpected_event("on_io_capability_request");
                    return None;
                }
            }
            Some(local_iocap)
        } else {
            self.fail_with_unexpected_event("on_io_capability_request");
            None
        }
    }

    /// Handle an IO Capability Response event carrying the peer capability
    pub fn on_io_capability_response(&mut self, peer_iocap: IoCapability) {
        if self.state == State::Idle {
            debug_assert!(!self.is_pairing());
            // Gathering the local IO capability waits until the IO
            // Capability Request, where the pairing can be rejected if no
            // delegate is attached.
            self.current_pairing = Some(Pairing::new_responder(peer_iocap));
            self.state = State::ResponderWaitIoCapRequest;
        } else if self.state == State::InitiatorWaitIoCapResponse {
            debug_assert!(self.initiator());
            let next = if let Some(pairing) = self.current_pairing.as_mut() {
                pairing.peer_iocap = Some(peer_iocap);
                match pairing.local_iocap {
                    Some(local_iocap) => {
                        pairing.compute_pairing_data(local_iocap, peer_iocap);
                        Some(state_for_pairing_event(pairing.expected_event))
                    }
                    None => None,
                }
            } else {
                None
            };
            match next {
                Some(next) => self.state = next,
                None => self.fail_with_unexpected_event("on_io_capability_response"),
            }
        } else {
            self.fail_with_unexpected_event("on_io_capability_response");
        }
    }

    /// Handle a User Confirmation Request event
    ///
    /// `cb` answers the controller's request: true sends the User
    /// Confirmation Request Reply, false the negative reply.
    pub fn on_user_confirmation_request(&mut self, numeric_value: u32, cb: UserConfirmationCallback) {
        if self.state != State::WaitUserConfirmationRequest {
            self.fail_with_unexpected_event("on_user_confirmation_request");
            cb(false);
            return;
        }
        debug_assert!(self.is_pairing());

        let handle = self.handle();
        let peer_id = self.peer_id;
        let Some(delegate) = self.pairing_delegate() else {
            self.fail_without_delegate(State::Failed);
            cb(false);
            return;
        };
        let (action, token) = match self.current_pairing.as_ref() {
            Some(pairing) => (pairing.action, pairing.weak_token()),
            None => {
                self.fail_with_unexpected_event("on_user_confirmation_request");
                cb(false);
                return;
            }
        };
        self.state = State::WaitPairingComplete;

        match action {
            // DisplayPasskey means this side has a display and performs
            // numeric comparison with automatic confirmation, but the
            // confirmation itself is delegated.
            PairingAction::DisplayPasskey | PairingAction::ComparePasskey => {
                let confirm_cb: ConfirmCallback = Box::new(move |confirm| {
                    if token.upgrade().is_none() {
                        return;
                    }
                    debug!(
                        "{:#06x} (id: {}): {} user confirmation request",
                        handle,
                        peer_id,
                        if confirm { "confirming" } else { "canceling" }
                    );
                    cb(confirm);
                });
                delegate.display_passkey(peer_id, numeric_value, DisplayMethod::Comparison, confirm_cb);
            }
            PairingAction::GetConsent => {
                let confirm_cb: ConfirmCallback = Box::new(move |confirm| {
                    if token.upgrade().is_none() {
                        return;
                    }
                    debug!(
                        "{:#06x} (id: {}): {} user confirmation request",
                        handle,
                        peer_id,
                        if confirm { "confirming" } else { "canceling" }
                    );
                    cb(confirm);
                });
                delegate.confirm_pairing(peer_id, confirm_cb);
            }
            PairingAction::Automatic => {
                debug!(
                    "{:#06x} (id: {}): automatically confirming user confirmation request",
                    handle, peer_id
                );
                cb(true);
            }
            PairingAction::RequestPasskey => {
                // Passkey-entry pairings wait in WaitUserPasskeyRequest, so
                // this event is a controller protocol violation.
                self.fail_with_unexpected_event("on_user_confirmation_request");
                cb(false);
            }
        }
    }

    /// Handle a User Passkey Request event
    ///
    /// `cb` answers the controller's request: a value sends the User
    /// Passkey Request Reply, `None` the negative reply.
    pub fn on_user_passkey_request(&mut self, cb: UserPasskeyCallback) {
        if self.state != State::WaitUserPasskeyRequest {
            self.fail_with_unexpected_event("on_user_passkey_request");
            cb(None);
            return;
        }
        debug_assert!(self.is_pairing());

        let handle = self.handle();
        let peer_id = self.peer_id;
        let Some(delegate) = self.pairing_delegate() else {
            self.fail_without_delegate(State::Failed);
            cb(None);
            return;
        };
        let token = match self.current_pairing.as_ref() {
            Some(pairing) => {
                debug_assert_eq!(pairing.action, PairingAction::RequestPasskey);
                pairing.weak_token()
            }
            None => {
                self.fail_with_unexpected_event("on_user_passkey_request");
                cb(None);
                return;
            }
        };
        self.state = State::WaitPairingComplete;

        let passkey_cb: PasskeyResponseCallback = Box::new(move |passkey| {
            if token.upgrade().is_none() {
                return;
            }
            debug!(
                "{:#06x} (id: {}): replying {} to user passkey request",
                handle, peer_id, passkey
            );
            if passkey >= 0 {
                cb(Some(passkey as u32));
            } else {
                cb(None);
            }
        });
        delegate.request_passkey(peer_id, passkey_cb);
    }

    /// Handle a User Passkey Notification event carrying the passkey the
    /// peer is entering
    pub fn on_user_passkey_notification(&mut self, numeric_value: u32) {
        if self.state != State::WaitUserPasskeyNotification {
            self.fail_with_unexpected_event("on_user_passkey_notification");
            return;
        }
        debug_assert!(self.is_pairing());

        let handle = self.handle();
        let peer_id = self.peer_id;
        let Some(delegate) = self.pairing_delegate() else {
            self.fail_without_delegate(State::Failed);
            return;
        };
        let token = match self.current_pairing.as_ref() {
            Some(pairing) => pairing.weak_token(),
            None => {
                self.fail_with_unexpected_event("on_user_passkey_notification");
                return;
            }
        };
        self.state = State::WaitPairingComplete;

        // The side entering the passkey drives the outcome; the displaying
        // side has nothing to confirm or cancel.
        let confirm_cb: ConfirmCallback = Box::new(move |confirm| {
            if token.upgrade().is_none() {
                return;
            }
            debug!(
                "{:#06x} (id: {}): can't {} pairing from the passkey notification side",
                handle,
                peer_id,
                if confirm { "confirm" } else { "cancel" }
            );
        });
        delegate.display_passkey(peer_id, numeric_value, DisplayMethod::PeerEntry, confirm_cb);
    }

    /// Handle a Simple Pairing Complete event
    pub fn on_simple_pairing_complete(&mut self, status_code: StatusCode) {
        if self.state != State::WaitPairingComplete {
            self.fail_with_unexpected_event("on_simple_pairing_complete");
            return;
        }
        debug_assert!(self.is_pairing());

        if let Err(err) = status_code.to_result() {
            info!(
                "pairing failed on link {:#06x} (id: {}): {}",
                self.handle(),
                self.peer_id,
                err
            );
            if let Some(delegate) = self.pairing_delegate() {
                delegate.complete_pairing(self.peer_id, Err(PairingError::Failed));
            }
            self.state = State::Failed;
            self.signal_status(Err(err));
            return;
        }

        if let Some(delegate) = self.pairing_delegate() {
            delegate.complete_pairing(self.peer_id, Ok(()));
        }
        self.state = State::WaitLinkKey;
    }

    /// Handle a Link Key Notification event
    pub fn on_link_key_notification(&mut self, value: [u8; LINK_KEY_SIZE], key_type: LinkKeyType) {
        // Pairing and bonding with Debug Combination keys is a security
        // hazard; a controller left in pairing debug mode breaks its
        // contract, so the key is rejected no matter the state.
        if key_type == LinkKeyType::DebugCombination {
            error!(
                "pairing on link {:#06x} (id: {}) produced an insecure debug combination link key",
                self.handle(),
                self.peer_id
            );
            self.state = State::Failed;
            self.signal_status(Err(PairingError::InsufficientSecurity));
            return;
        }

        // Outside of pairing, only connection link key changes are allowed.
        if self.state == State::Idle && key_type == LinkKeyType::ChangedCombination {
            if self.link.borrow().link_key().is_none() {
                warn!(
                    "got changed combination key but link {:#06x} (id: {}) has no current key",
                    self.handle(),
                    self.peer_id
                );
                self.state = State::Failed;
                self.signal_status(Err(PairingError::InsufficientSecurity));
                return;
            }
            debug!(
                "changing link key on {:#06x} (id: {})",
                self.handle(),
                self.peer_id
            );
            self.link.borrow_mut().set_link_key(LinkKey::new(value, key_type));
            return;
        }
        if self.state != State::WaitLinkKey {
            self.fail_with_unexpected_event("on_link_key_notification");
            return;
        }

        // The association model and the resulting security properties are
        // computed by both the controller and the host; they must agree.
        debug_assert!(self.is_pairing());
        let sec_props = SecurityProperties::from_link_key_type(key_type);
        let expected_authenticated = match self.current_pairing.as_mut() {
            Some(pairing) => {
                pairing.security_properties = Some(sec_props);
                pairing.authenticated
            }
            None => {
                self.fail_with_unexpected_event("on_link_key_notification");
                return;
            }
        };

        // Keys from legacy pairing carry the lowest security level and are
        // always rejected.
        if sec_props.level() == SecurityLevel::None {
            warn!(
                "link key (type {}) for {:#06x} (id: {}) has insufficient security",
                key_type,
                self.handle(),
                self.peer_id
            );
            self.state = State::Failed;
            self.signal_status(Err(PairingError::InsufficientSecurity));
            return;
        }

        // An association procedure run for MITM protection must yield an
        // authenticated key, and a key may not claim an authentication the
        // procedure never performed.
        if sec_props.authenticated() != expected_authenticated {
            warn!(
                "expected {}authenticated link key for {:#06x} (id: {}), got type {}",
                if expected_authenticated { "" } else { "un" },
                self.handle(),
                self.peer_id,
                key_type
            );
            self.state = State::Failed;
            self.signal_status(Err(PairingError::InsufficientSecurity));
            return;
        }

        self.link.borrow_mut().set_link_key(LinkKey::new(value, key_type));
        if self.initiator() {
            self.state = State::InitiatorWaitAuthComplete;
        } else {
            self.enable_encryption();
        }
    }

    /// Handle an Authentication Complete event (initiator only)
    pub fn on_authentication_complete(&mut self, status_code: StatusCode) {
        if self.state != State::InitiatorPairingStarted
            && self.state != State::InitiatorWaitAuthComplete
        {
            self.fail_with_unexpected_event("on_authentication_complete");
            return;
        }
        debug_assert!(self.initiator());

        if let Err(err) = status_code.to_result() {
            info!(
                "authentication failed on link {:#06x} (id: {}): {}",
                self.handle(),
                self.peer_id,
                err
            );
            self.state = State::Failed;
            self.signal_status(Err(err));
            return;
        }

        self.enable_encryption();
    }

    /// Handle an Encryption Change event
    pub fn on_encryption_change(&mut self, status_code: StatusCode, enabled: bool) {
        if self.state != State::WaitEncryption {
            // The peer may toggle encryption at any time outside of
            // pairing (v5.0 Vol 2, Part F, Sec 4.4).
            info!(
                "{:#06x} (id: {}): ignoring encryption change ({}, enabled={}) in state {}",
                self.handle(),
                self.peer_id,
                status_code,
                enabled,
                self.state
            );
            return;
        }

        let mut status = status_code.to_result();
        if status.is_ok() && !enabled {
            // Encryption must never be disabled on a link using Secure
            // Connections (v5.0 Vol 2, Part E, Sec 7.1.16).
            warn!(
                "pairing failed due to encryption disable on link {:#06x} (id: {})",
                self.handle(),
                self.peer_id
            );
            status = Err(PairingError::Failed);
        }

        if status.is_ok() {
            // Ready for another pairing.
            self.state = State::Idle;
        } else {
            self.state = State::Failed;
        }
        self.signal_status(status);
    }

    /// Notify every waiting party of a terminal pairing status
    fn signal_status(&mut self, status: PairingStatus) {
        trace!(
            "signaling pairing listeners for {:#06x} (id: {}) with {:?}",
            self.handle(),
            self.peer_id,
            status
        );

        // Dropping the Pairing invalidates the token held by outstanding
        // delegate replies, turning them into no-ops.
        let callbacks = match self.current_pairing.take() {
            Some(pairing) => pairing.initiator_callbacks,
            None => Vec::new(),
        };

        // Listeners may react by tearing the whole link down, so capture
        // the handle before any of them runs.
        let handle = self.handle();
        (self.status_callback)(handle, status);
        for cb in callbacks {
            cb(handle, status);
        }
    }

    fn enable_encryption(&mut self) {
        let accepted = self.link.borrow_mut().start_encryption();
        if !accepted {
            error!(
                "{:#06x} (id: {}): failed to start encryption (state {})",
                self.handle(),
                self.peer_id,
                self.state
            );
            let handle = self.handle();
            (self.status_callback)(handle, Err(PairingError::Failed));
            self.state = State::Failed;
            return;
        }
        self.state = State::WaitEncryption;
    }

    fn fail_without_delegate(&mut self, next: State) {
        error!(
            "no pairing delegate for link {:#06x} (id: {}); not pairing",
            self.handle(),
            self.peer_id
        );
        self.state = next;
        self.signal_status(Err(PairingError::NotReady));
    }

    fn fail_with_unexpected_event(&mut self, handler: &str) {
        error!(
            "{:#06x} (id: {}): unexpected event {} while in state {}",
            self.handle(),
            self.peer_id,
            handler,
            self.state
        );
        self.state = State::Failed;
        self.signal_status(Err(PairingError::NotSupported));
    }
}

/// Select the initiator-side user-interaction model for a capability pair
pub fn initiator_pairing_action(
    initiator_cap: IoCapability,
    responder_cap: IoCapability,
) -> PairingAction {
    if initiator_cap == IoCapability::NoInputNoOutput {
        return PairingAction::Automatic;
    }
    if responder_cap == IoCapability::NoInputNoOutput {
        if initiator_cap == IoCapability::DisplayYesNo {
            return PairingAction::GetConsent;
        }
        return PairingAction::Automatic;
    }
    if initiator_cap == IoCapability::KeyboardOnly {
        return PairingAction::RequestPasskey;
    }
    if responder_cap == IoCapability::DisplayOnly {
        if initiator_cap == IoCapability::DisplayYesNo {
            return PairingAction::ComparePasskey;
        }
        return PairingAction::Automatic;
    }
    PairingAction::DisplayPasskey
}

/// Select the responder-side user-interaction model for a capability pair
pub fn responder_pairing_action(
    initiator_cap: IoCapability,
    responder_cap: IoCapability,
) -> PairingAction {
    if initiator_cap == IoCapability::NoInputNoOutput
        && responder_cap == IoCapability::KeyboardOnly
    {
        return PairingAction::GetConsent;
    }
    if initiator_cap == IoCapability::DisplayYesNo && responder_cap == IoCapability::DisplayYesNo {
        return PairingAction::ComparePasskey;
    }
    initiator_pairing_action(responder_cap, initiator_cap)
}

/// Event code of the user-interaction event the controller will deliver
/// for a capability pair
pub fn expected_pairing_event(local_cap: IoCapability, peer_cap: IoCapability) -> u8 {
    if local_cap == IoCapability::NoInputNoOutput || peer_cap == IoCapability::NoInputNoOutput {
        return EVT_USER_CONFIRMATION_REQUEST;
    }
    if local_cap == IoCapability::KeyboardOnly {
        return EVT_USER_PASSKEY_REQUEST;
    }
    if peer_cap == IoCapability::KeyboardOnly {
        return EVT_USER_PASSKEY_NOTIFICATION;
    }
    EVT_USER_CONFIRMATION_REQUEST
}

/// Whether a capability pair produces a MITM-authenticated key
pub fn is_pairing_authenticated(local_cap: IoCapability, peer_cap: IoCapability) -> bool {
    if local_cap == IoCapability::NoInputNoOutput || peer_cap == IoCapability::NoInputNoOutput {
        return false;
    }
    if local_cap == IoCapability::DisplayYesNo && peer_cap == IoCapability::DisplayYesNo {
        return true;
    }
    if local_cap == IoCapability::KeyboardOnly || peer_cap == IoCapability::KeyboardOnly {
        return true;
    }
    false
}

/// Authentication requirements the initiator reports for its capability
pub fn initiator_auth_requirements(local_cap: IoCapability) -> AuthRequirements {
    if local_cap == IoCapability::NoInputNoOutput {
        return AuthRequirements::GeneralBonding;
    }
    AuthRequirements::MitmGeneralBonding
}

/// Authentication requirements the responder reports for a capability pair
pub fn responder_auth_requirements(
    local_cap: IoCapability,
    peer_cap: IoCapability,
) -> AuthRequirements {
    if is_pairing_authenticated(local_cap, peer_cap) {
        return AuthRequirements::MitmGeneralBonding;
    }
    AuthRequirements::GeneralBonding
}

/// Wait state for a user-interaction event code; `Failed` for any event
/// that is not one of the three pairing events
pub fn state_for_pairing_event(event_code: u8) -> State {
    match event_code {
        EVT_USER_CONFIRMATION_REQUEST => State::WaitUserConfirmationRequest,
        EVT_USER_PASSKEY_REQUEST => State::WaitUserPasskeyRequest,
        EVT_USER_PASSKEY_NOTIFICATION => State::WaitUserPasskeyNotification,
        _ => State::Failed,
    }
}
