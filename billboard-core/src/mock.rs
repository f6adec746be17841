//! Host mocks for the hardware traits

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use billboard_hal::{
    Address, Advertisement, InputPin, Link, LinkError, PeripheralHandle, PeripheralName, Radio,
    RadioError, Tone,
};
use embassy_time::{Duration, Instant, Timer};

/// Advertisement with an address tagged by `id`
pub fn advert(name: Option<&str>, id: u8) -> Advertisement {
    Advertisement {
        address: Address([id, 0, 0, 0, 0, 0]),
        complete_name: name.map(|n| PeripheralName::try_from(n).unwrap()),
        rssi: -55,
    }
}

/// Scripted link: each write releases the next queued reply
pub struct MockLink {
    replies: VecDeque<Vec<(u64, Vec<u8>)>>,
    scheduled: Vec<(Instant, Vec<u8>)>,
    rx: VecDeque<u8>,
    written: Rc<RefCell<Vec<u8>>>,
    connected: Rc<Cell<bool>>,
    write_error: Option<LinkError>,
    read_error: Option<LinkError>,
    drop_on_write: bool,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            replies: VecDeque::new(),
            scheduled: Vec::new(),
            rx: VecDeque::new(),
            written: Rc::new(RefCell::new(Vec::new())),
            connected: Rc::new(Cell::new(true)),
            write_error: None,
            read_error: None,
            drop_on_write: false,
        }
    }

    /// Queue a reply for the next write, as (ms after the write, bytes) chunks
    pub fn reply(&mut self, chunks: &[(u64, &str)]) {
        self.replies.push_back(
            chunks
                .iter()
                .map(|(ms, text)| (*ms, text.as_bytes().to_vec()))
                .collect(),
        );
    }

    /// Bytes already buffered before any request
    pub fn preload_stale(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn fail_writes(&mut self, error: LinkError) {
        self.write_error = Some(error);
    }

    pub fn fail_reads(&mut self, error: LinkError) {
        self.read_error = Some(error);
    }

    /// The peripheral goes away as soon as it is written to
    pub fn drop_on_write(&mut self) {
        self.drop_on_write = true;
    }

    pub fn written(&self) -> Rc<RefCell<Vec<u8>>> {
        self.written.clone()
    }

    pub fn connected_flag(&self) -> Rc<Cell<bool>> {
        self.connected.clone()
    }

    fn deliver_due(&mut self) {
        let now = Instant::now();
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].0 <= now {
                let (_, bytes) = self.scheduled.remove(i);
                self.rx.extend(bytes);
            } else {
                i += 1;
            }
        }
    }
}

impl Link for MockLink {
    async fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        if !self.connected.get() {
            return Err(LinkError::Disconnected);
        }
        if let Some(e) = self.write_error {
            return Err(e);
        }
        self.written.borrow_mut().extend_from_slice(data);
        if self.drop_on_write {
            self.connected.set(false);
            return Ok(());
        }

        let now = Instant::now();
        if let Some(chunks) = self.replies.pop_front() {
            for (ms, bytes) in chunks {
                self.scheduled.push((now + Duration::from_millis(ms), bytes));
            }
        }
        Ok(())
    }

    fn available(&mut self) -> usize {
        self.deliver_due();
        self.rx.len()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        if let Some(e) = self.read_error {
            return Err(e);
        }
        self.deliver_due();
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn reset_input_buffer(&mut self) {
        self.deliver_due();
        self.rx.clear();
    }

    async fn wait_readable(&mut self) -> Result<(), LinkError> {
        loop {
            if !self.connected.get() {
                return Err(LinkError::Disconnected);
            }
            if self.available() > 0 {
                return Ok(());
            }
            Timer::after_millis(1).await;
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn disconnect(&mut self) {
        self.connected.set(false);
    }
}

/// Scripted radio
pub struct MockRadio {
    adverts: VecDeque<Result<Advertisement, RadioError>>,
    links: VecDeque<Result<MockLink, RadioError>>,
    handed_out: Vec<Rc<Cell<bool>>>,
    refuse_scan: bool,
    connect_hangs: bool,
    pub scans_started: usize,
    pub scans_stopped: usize,
    pub connect_attempts: Vec<PeripheralName>,
    pub disconnect_all_calls: usize,
}

impl MockRadio {
    pub fn new() -> Self {
        Self {
            adverts: VecDeque::new(),
            links: VecDeque::new(),
            handed_out: Vec::new(),
            refuse_scan: false,
            connect_hangs: false,
            scans_started: 0,
            scans_stopped: 0,
            connect_attempts: Vec::new(),
            disconnect_all_calls: 0,
        }
    }

    pub fn push_advert(&mut self, advertisement: Advertisement) {
        self.adverts.push_back(Ok(advertisement));
    }

    /// Next advertisement wait fails with `error`
    pub fn fail_scan_with(&mut self, error: RadioError) {
        self.adverts.push_back(Err(error));
    }

    pub fn refuse_scan(&mut self) {
        self.refuse_scan = true;
    }

    pub fn pending_adverts(&self) -> usize {
        self.adverts.len()
    }

    /// Next connect succeeds with `link`
    pub fn accept_with(&mut self, link: MockLink) {
        self.links.push_back(Ok(link));
    }

    /// Next connect fails with `error`
    pub fn reject_with(&mut self, error: RadioError) {
        self.links.push_back(Err(error));
    }

    /// Connect attempts never finish
    pub fn hang_connects(&mut self) {
        self.connect_hangs = true;
    }
}

impl Radio for MockRadio {
    type Link = MockLink;

    fn start_scan(&mut self) -> Result<(), RadioError> {
        if self.refuse_scan {
            return Err(RadioError::ScanFailed);
        }
        self.scans_started += 1;
        Ok(())
    }

    async fn next_advertisement(&mut self) -> Result<Advertisement, RadioError> {
        match self.adverts.pop_front() {
            Some(result) => result,
            None => core::future::pending().await,
        }
    }

    fn stop_scan(&mut self) {
        self.scans_stopped += 1;
    }

    async fn connect(&mut self, peripheral: PeripheralHandle) -> Result<MockLink, RadioError> {
        self.connect_attempts
            .push(PeripheralName::try_from(peripheral.name()).unwrap());
        if self.connect_hangs {
            core::future::pending::<()>().await;
        }
        let link = self.links.pop_front().unwrap_or(Err(RadioError::Timeout))?;
        self.handed_out.push(link.connected_flag());
        Ok(link)
    }

    fn disconnect_all(&mut self) {
        self.disconnect_all_calls += 1;
        for flag in &self.handed_out {
            flag.set(false);
        }
    }

    fn connection_count(&self) -> usize {
        self.handed_out.iter().filter(|flag| flag.get()).count()
    }
}

/// Buzzer that records what it played
#[derive(Default)]
pub struct MockTone {
    pub played: Vec<u16>,
    pub playing: Option<u16>,
    pub stops: usize,
}

impl Tone for MockTone {
    fn start_tone(&mut self, frequency_hz: u16) {
        self.played.push(frequency_hz);
        self.playing = Some(frequency_hz);
    }

    fn stop_tone(&mut self) {
        self.playing = None;
        self.stops += 1;
    }
}

/// Button pin with a shared level
#[derive(Clone)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
}

impl MockPin {
    /// Pin idling high (pull-up)
    pub fn pulled_up() -> Self {
        Self {
            high: Rc::new(Cell::new(true)),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}
