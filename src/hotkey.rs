use rdev::{listen, EventType, Key};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const DEFAULT_TOGGLE_HOTKEY: &str = "CmdOrCtrl+Shift+O";
pub const DEFAULT_GUIDE_UP_HOTKEY: &str = "CmdOrCtrl+Shift+Up";
pub const DEFAULT_GUIDE_DOWN_HOTKEY: &str = "CmdOrCtrl+Shift+Down";
pub const DEFAULT_SHOW_CONTROLS_HOTKEY: &str = "CmdOrCtrl+Shift+K";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS, the Windows / Super key elsewhere.
    pub win: bool,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.win {
            write!(f, "{}+", if cfg!(target_os = "macos") { "Cmd" } else { "Super" })?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{:?}", self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    ToggleOverlay,
    GuideUp,
    GuideDown,
    ShowControls,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotkeyBinding {
    pub hotkey: Hotkey,
    pub action: HotkeyAction,
}

/// Parse a hotkey string like "CmdOrCtrl+Shift+Up" for the running platform.
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    parse_hotkey_for(s, cfg!(target_os = "macos"))
}

/// `CmdOrCtrl` resolves to Cmd when `mac` is set, Ctrl otherwise.
pub fn parse_hotkey_for(s: &str, mac: bool) -> Option<Hotkey> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut win = false;
    let mut key: Option<Key> = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => ctrl = true,
            "SHIFT" => shift = true,
            "ALT" | "OPTION" => alt = true,
            "CMD" | "COMMAND" | "SUPER" | "WIN" | "META" => win = true,
            "CMDORCTRL" | "COMMANDORCONTROL" => {
                if mac {
                    win = true;
                } else {
                    ctrl = true;
                }
            }
            "" => {}
            _ => {
                // Only one non-modifier key per combination.
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(&upper)?);
            }
        }
    }

    key.map(|key| Hotkey {
        key,
        ctrl,
        shift,
        alt,
        win,
    })
}

const LETTER_KEYS: [Key; 26] = [
    Key::KeyA, Key::KeyB, Key::KeyC, Key::KeyD, Key::KeyE, Key::KeyF, Key::KeyG,
    Key::KeyH, Key::KeyI, Key::KeyJ, Key::KeyK, Key::KeyL, Key::KeyM, Key::KeyN,
    Key::KeyO, Key::KeyP, Key::KeyQ, Key::KeyR, Key::KeyS, Key::KeyT, Key::KeyU,
    Key::KeyV, Key::KeyW, Key::KeyX, Key::KeyY, Key::KeyZ,
];

const DIGIT_KEYS: [Key; 10] = [
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

fn parse_key(upper: &str) -> Option<Key> {
    match upper {
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "ENTER" | "RETURN" => Some(Key::Return),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "UP" | "UPARROW" => Some(Key::UpArrow),
        "DOWN" | "DOWNARROW" => Some(Key::DownArrow),
        "LEFT" | "LEFTARROW" => Some(Key::LeftArrow),
        "RIGHT" | "RIGHTARROW" => Some(Key::RightArrow),
        "-" | "MINUS" => Some(Key::Minus),
        "=" | "PLUS" | "EQUAL" => Some(Key::Equal),
        _ if upper.len() > 1 && upper.starts_with('F') => {
            let n = upper[1..].parse::<usize>().ok()?;
            FUNCTION_KEYS.get(n.checked_sub(1)?).copied()
        }
        _ => {
            let mut chars = upper.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if c.is_ascii_uppercase() {
                Some(LETTER_KEYS[(c as u8 - b'A') as usize])
            } else if c.is_ascii_digit() {
                Some(DIGIT_KEYS[(c as u8 - b'0') as usize])
            } else {
                None
            }
        }
    }
}

/// Modifier and latch bookkeeping for a stream of raw key events.
#[derive(Debug, Default)]
pub struct ComboTracker {
    ctrl: bool,
    shift: bool,
    alt: bool,
    win: bool,
    latched: Vec<bool>,
}

impl ComboTracker {
    /// Feed one raw event; returns the actions whose combination just went
    /// down. A held combination fires once until its key is released.
    pub fn process(&mut self, event: &EventType, bindings: &[HotkeyBinding]) -> Vec<HotkeyAction> {
        self.latched.resize(bindings.len(), false);
        let mut fired = Vec::new();
        match event {
            EventType::KeyPress(k) => {
                let k = *k;
                self.set_modifier(k, true);
                for (binding, latched) in bindings.iter().zip(self.latched.iter_mut()) {
                    let hk = &binding.hotkey;
                    let combo = k == hk.key
                        && (!hk.ctrl || self.ctrl)
                        && (!hk.shift || self.shift)
                        && (!hk.alt || self.alt)
                        && (!hk.win || self.win);
                    if combo && !*latched {
                        *latched = true;
                        fired.push(binding.action);
                    }
                }
            }
            EventType::KeyRelease(k) => {
                let k = *k;
                self.set_modifier(k, false);
                for (binding, latched) in bindings.iter().zip(self.latched.iter_mut()) {
                    if k == binding.hotkey.key {
                        *latched = false;
                    }
                }
            }
            _ => {}
        }
        fired
    }

    fn set_modifier(&mut self, k: Key, down: bool) {
        match k {
            Key::ControlLeft | Key::ControlRight => self.ctrl = down,
            Key::ShiftLeft | Key::ShiftRight => self.shift = down,
            Key::Alt | Key::AltGr => self.alt = down,
            Key::MetaLeft | Key::MetaRight => self.win = down,
            _ => {}
        }
    }
}

const LISTENER_RETRY_BASE: Duration = Duration::from_millis(500);
const LISTENER_RETRY_MAX: Duration = Duration::from_secs(30);

/// Wait before restarting the listener after `attempt` earlier failures.
/// Doubles from half a second up to thirty seconds.
pub fn listener_retry_delay(attempt: u32) -> Duration {
    (LISTENER_RETRY_BASE * 2u32.pow(attempt.min(6))).min(LISTENER_RETRY_MAX)
}

/// What the listener thread runs for every raw event.
pub struct ListenerState {
    tracker: ComboTracker,
    bindings: Arc<Mutex<Vec<HotkeyBinding>>>,
    tx: Sender<HotkeyAction>,
}

impl ListenerState {
    /// Returns the number of actions sent.
    pub fn on_event(&mut self, event: &EventType) -> usize {
        let bindings = match self.bindings.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return 0,
        };
        let fired = self.tracker.process(event, &bindings);
        let mut sent = 0;
        for action in fired {
            tracing::debug!(?action, "hotkey pressed");
            if self.tx.send(action).is_ok() {
                sent += 1;
            }
        }
        sent
    }
}

/// Global hotkeys. Actions arrive in press order through [`drain`].
///
/// [`drain`]: HotkeyDispatcher::drain
pub struct HotkeyDispatcher {
    bindings: Arc<Mutex<Vec<HotkeyBinding>>>,
    tx: Sender<HotkeyAction>,
    rx: Receiver<HotkeyAction>,
    released: Arc<AtomicBool>,
}

impl HotkeyDispatcher {
    pub fn new(bindings: Vec<HotkeyBinding>) -> Self {
        let (tx, rx) = channel();
        for binding in &bindings {
            tracing::info!(hotkey = %binding.hotkey, action = ?binding.action, "binding hotkey");
        }
        Self {
            bindings: Arc::new(Mutex::new(bindings)),
            tx,
            rx,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn bindings(&self) -> Vec<HotkeyBinding> {
        self.bindings.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn listener_state(&self) -> ListenerState {
        ListenerState {
            tracker: ComboTracker::default(),
            bindings: self.bindings.clone(),
            tx: self.tx.clone(),
        }
    }

    /// Spawn the global key listener. `wake` runs after each delivered action
    /// so the UI loop can pick it up.
    pub fn start_listener<W>(&self, wake: W)
    where
        W: Fn() + Send + Sync + 'static,
    {
        let wake = Arc::new(wake);
        let bindings = self.bindings.clone();
        let tx = self.tx.clone();
        let released = self.released.clone();
        let spawned = thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || {
                let mut attempt = 0u32;
                loop {
                    let mut state = ListenerState {
                        tracker: ComboTracker::default(),
                        bindings: bindings.clone(),
                        tx: tx.clone(),
                    };
                    let wake_listener = wake.clone();
                    let result = listen(move |event| {
                        if state.on_event(&event.event_type) > 0 {
                            wake_listener();
                        }
                    });

                    if released.load(Ordering::SeqCst) {
                        break;
                    }
                    let delay = listener_retry_delay(attempt);
                    // Warn on the first failure only.
                    match (&result, attempt) {
                        (Ok(()), 0) => tracing::warn!("hotkey listener exited unexpectedly, restarting"),
                        (Err(e), 0) => tracing::warn!("hotkey listener failed: {:?}, retrying", e),
                        _ => tracing::debug!(attempt, ?delay, "hotkey listener still unavailable"),
                    }
                    attempt = attempt.saturating_add(1);
                    thread::sleep(delay);
                }
            });
        if let Err(e) = spawned {
            tracing::error!("failed to spawn hotkey listener: {e}");
        }
    }

    pub fn drain(&self) -> Vec<HotkeyAction> {
        self.rx.try_iter().collect()
    }

    /// Unbind everything. Later key presses produce no actions.
    pub fn release_all(&self) {
        self.released.store(true, Ordering::SeqCst);
        if let Ok(mut bindings) = self.bindings.lock() {
            bindings.clear();
        }
        let dropped = self.rx.try_iter().count();
        tracing::info!(dropped, "released global hotkeys");
    }
}
