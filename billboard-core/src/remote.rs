//! Remote controller coordinating discovery, connection, and exchanges
//!
//! The remote is the single owner of everything stateful:
//! - Drives the connection state machine from button presses
//! - Holds the found peripheral while waiting for the user to connect
//! - Owns the session while connected
//! - Renders prompts, mirrored pages, and diagnostics
//!
//! Session exists iff the state is `Connected`; the peripheral handle is
//! held only in `Found` and is consumed by the connect attempt.

use alloc::format;

use billboard_display::{DisplayBackend, DisplayContent};
use billboard_hal::{Button, InputPin, PeripheralHandle, Radio, RadioError, Tone};
use billboard_protocol::Command;
use embassy_time::{with_timeout, Instant, Timer};

use crate::config::{ConfigError, RemoteConfig};
use crate::discovery;
use crate::input::{ButtonSampler, InputEvent};
use crate::interpreter;
use crate::session::Session;
use crate::state::{ConnectionState, Event};

/// Start-up prompt, also shown after a teardown
pub const SCAN_PROMPT: &str = "[A+B] to scan\nfor billboard";

/// Shown when a scan window closes without a match
pub const NOT_FOUND_PROMPT: &str = "No billboard found.\n[A+B] to rescan";

/// Shown when a connect fails after the radio link came up
pub const CONNECT_FAILED: &str = "Connection failed.\nTry rescan[A+B].";

/// Shown when the billboard drops the link
pub const LINK_LOST_PROMPT: &str = "Billboard lost.\n[A+B] to rescan";

/// Billboard remote
pub struct Remote<R: Radio, D: DisplayBackend, T: Tone> {
    radio: R,
    display: D,
    tone: T,
    config: RemoteConfig,
    /// Current connection state
    state: ConnectionState,
    /// Found billboard, waiting for a connect press
    peripheral: Option<PeripheralHandle>,
    /// Active session
    session: Option<Session<R::Link>>,
    sampler: ButtonSampler,
}

impl<R: Radio, D: DisplayBackend, T: Tone> Remote<R, D, T> {
    /// Create a remote and show the start-up prompt
    pub fn new(radio: R, display: D, tone: T, config: RemoteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = ButtonSampler::new(config.button_delay());
        let mut remote = Self {
            radio,
            display,
            tone,
            config,
            state: ConnectionState::Idle,
            peripheral: None,
            session: None,
            sampler,
        };
        remote.display.render(&DisplayContent::plain(SCAN_PROMPT));
        info!("remote ready, looking for {=str}", remote.config.peripheral_name.as_str());
        Ok(remote)
    }

    /// Get current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Active session, if connected
    pub fn session(&self) -> Option<&Session<R::Link>> {
        self.session.as_ref()
    }

    /// Found billboard, if waiting to connect
    pub fn peripheral(&self) -> Option<&PeripheralHandle> {
        self.peripheral.as_ref()
    }

    fn transition(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            debug!("{:?} --{:?}--> {:?}", self.state, event, next);
        }
        self.state = next;
    }

    /// React to an accepted button press
    pub async fn handle(&mut self, input: InputEvent) {
        match self.state {
            ConnectionState::Connected => {
                self.display.show_status(input.status_label());
                self.tone.start_tone(input.tone_hz());
                match input.command() {
                    Some(command) => self.navigate(command).await,
                    None => self.teardown(),
                }
            }
            ConnectionState::Idle if input == InputEvent::DualPress => self.request_scan().await,
            ConnectionState::Found if input == InputEvent::DualPress => {
                self.request_connect().await
            }
            _ => trace!("ignoring {:?} in {:?}", input, self.state),
        }
    }

    /// Scan for the billboard
    pub async fn request_scan(&mut self) {
        if self.state != ConnectionState::Idle {
            return;
        }
        self.transition(Event::ScanRequested);

        let found = discovery::scan(
            &mut self.radio,
            self.config.peripheral_name.as_str(),
            self.config.scan_timeout(),
        )
        .await;

        match found {
            Some(handle) => {
                self.display.render(&DisplayContent::Plain(format!(
                    "Found {} \n[A+B] to connect",
                    handle.name()
                )));
                self.peripheral = Some(handle);
                self.transition(Event::PeripheralFound);
            }
            None => {
                self.display.render(&DisplayContent::plain(NOT_FOUND_PROMPT));
                self.transition(Event::NothingFound);
            }
        }
    }

    /// Connect to the found billboard
    pub async fn request_connect(&mut self) {
        if self.state != ConnectionState::Found {
            return;
        }
        let Some(handle) = self.peripheral.take() else {
            return;
        };
        self.transition(Event::ConnectRequested);

        let name = handle.name_owned();
        info!("connecting to {=str}", name.as_str());

        match with_timeout(self.config.connect_timeout(), self.radio.connect(handle)).await {
            Ok(Ok(link)) => {
                self.session = Some(Session::new(link, self.config.exchange_timing()));
                self.transition(Event::ConnectSucceeded);
                self.display.render(&DisplayContent::blank());
                info!("connected");
            }
            Ok(Err(e)) => self.connect_failed(&name, e),
            Err(_) => self.connect_failed(&name, RadioError::Timeout),
        }
    }

    fn connect_failed(&mut self, name: &str, error: RadioError) {
        warn!("connect failed: {:?}", error);
        self.radio.disconnect_all();
        self.transition(Event::ConnectFailed);

        let content = if error.is_connect_failure() {
            DisplayContent::Plain(format!(
                "Unable to connect \nto {}.\nPlease rescan[A+B].",
                name
            ))
        } else {
            DisplayContent::plain(CONNECT_FAILED)
        };
        self.display.render(&content);
    }

    /// Send a page command and show the reply
    pub async fn navigate(&mut self, command: Command) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome = session.exchange(command).await;
        if let Err(e) = &outcome {
            if e.is_link_lost() {
                self.link_lost();
                return;
            }
        }
        self.display.render(&interpreter::interpret_exchange(&outcome));
    }

    /// Close the session and every connection on the radio
    pub fn teardown(&mut self) {
        if !self.state.is_connected() {
            return;
        }
        self.release();
        self.transition(Event::Teardown);
        self.display.render(&DisplayContent::plain(SCAN_PROMPT));
        info!("disconnected");
    }

    fn link_lost(&mut self) {
        warn!("billboard dropped the link");
        self.release();
        self.transition(Event::LinkLost);
        self.display.render(&DisplayContent::plain(LINK_LOST_PROMPT));
    }

    fn release(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.radio.disconnect_all();
    }

    /// Check the link is still up while connected
    pub fn poll_link(&mut self) {
        if self.state.is_connected() && !self.session.as_ref().is_some_and(Session::is_link_up) {
            self.link_lost();
        }
    }

    /// One control loop iteration with the current button levels
    pub async fn tick(&mut self, a_pressed: bool, b_pressed: bool) {
        self.poll_link();
        if let Some(input) = self.sampler.sample(a_pressed, b_pressed, Instant::now()) {
            self.handle(input).await;
        }
        self.tone.stop_tone();
    }

    /// Run the control loop forever
    pub async fn run<A: InputPin, B: InputPin>(&mut self, a: &Button<A>, b: &Button<B>) -> ! {
        loop {
            self.tick(a.is_pressed(), b.is_pressed()).await;
            Timer::after(self.config.poll_interval()).await;
        }
    }
}
