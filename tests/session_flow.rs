//! End-to-end session tests over a loopback socket.
//!
//! A real `TcpListener` plays the server. The client runs `session::run` on its own
//! thread with a `TestBackend` screen and keys fed through a channel. Assertions
//! observe only the wire traffic and the rendered frames.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use scrollchat::config::ResolvedConfig;
use scrollchat::model::{AppError, KeyEvent, TransportError};
use scrollchat::session::{self, Input, KeySource, Termination};
use scrollchat::view::{DisplaySurface, Screen, ScreenContent};
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(5);

// ===== Test Helpers =====

/// Key source fed from a channel by the test thread.
struct ChannelKeys {
    inputs: Receiver<Input>,
    poll_interval: Duration,
}

impl ChannelKeys {
    fn new(poll_interval: Duration) -> (Sender<Input>, Self) {
        let (tx, rx) = mpsc::channel();
        let keys = Self {
            inputs: rx,
            poll_interval,
        };
        (tx, keys)
    }
}

impl KeySource for ChannelKeys {
    fn next_input(&mut self) -> io::Result<Input> {
        match self.inputs.recv_timeout(self.poll_interval) {
            Ok(input) => Ok(input),
            Err(RecvTimeoutError::Timeout) => Ok(Input::Idle),
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(self.poll_interval);
                Ok(Input::Idle)
            }
        }
    }
}

/// Queue `text` followed by Enter. False once the source is gone.
fn type_line(keys: &Sender<Input>, text: &str) -> bool {
    text.chars()
        .map(|ch| Input::Key(KeyEvent::Printable(ch)))
        .chain(std::iter::once(Input::Key(KeyEvent::Enter)))
        .all(|input| keys.send(input).is_ok())
}

/// Convert a ratatui buffer to a string, one row per line, trailing blanks removed.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Screen that keeps a copy of every frame it draws.
struct RecordingScreen {
    screen: Screen<TestBackend>,
    frames: Arc<Mutex<Vec<String>>>,
}

impl DisplaySurface for RecordingScreen {
    fn render(&mut self, content: &ScreenContent<'_>) -> io::Result<()> {
        self.screen.render(content)?;
        let frame = buffer_to_string(self.screen.terminal().backend().buffer());
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}

struct Harness {
    keys: Sender<Input>,
    frames: Arc<Mutex<Vec<String>>>,
    client: JoinHandle<Result<Termination, AppError>>,
    listener: TcpListener,
}

impl Harness {
    fn start(history_capacity: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let frames = Arc::new(Mutex::new(Vec::new()));
        let display = RecordingScreen {
            screen: Screen::new(TestBackend::new(60, 10)).unwrap(),
            frames: Arc::clone(&frames),
        };
        let config = ResolvedConfig {
            history_capacity,
            key_poll_interval_ms: 10,
            ..ResolvedConfig::default()
        };
        let (keys, mut source) = ChannelKeys::new(config.key_poll_interval());
        let client = thread::spawn(move || session::run(&config, display, &mut source));

        Self {
            keys,
            frames,
            client,
            listener,
        }
    }

    /// Answer both prompts and return the server side, positioned after `/register`.
    fn connect_as(&self, name: &str) -> (TcpStream, BufReader<TcpStream>) {
        let addr = self.listener.local_addr().unwrap();
        assert!(type_line(&self.keys, &addr.to_string()));
        let (server, _) = self.listener.accept().unwrap();
        server.set_read_timeout(Some(WAIT)).unwrap();
        let mut reader = BufReader::new(server.try_clone().unwrap());

        assert!(type_line(&self.keys, name));
        assert_eq!(read_line(&mut reader), format!("/register {name}\n"));
        (server, reader)
    }

    fn press(&self, key: KeyEvent) {
        self.keys.send(Input::Key(key)).unwrap();
    }

    /// Block until the latest frame satisfies `check`.
    fn wait_for_frame(&self, what: &str, check: impl Fn(&[&str]) -> bool) {
        let deadline = Instant::now() + WAIT;
        loop {
            let last = self.frames.lock().unwrap().last().cloned().unwrap_or_default();
            let rows: Vec<&str> = last.lines().collect();
            if check(&rows) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for {what}; last frame:\n{last}");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn finish(self) -> Result<Termination, AppError> {
        self.client.join().unwrap()
    }
}

fn read_line(reader: &mut BufReader<TcpStream>) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    line
}

/// Rows of the message region (everything above the separator).
fn message_rows<'a>(rows: &[&'a str]) -> Vec<&'a str> {
    rows.iter()
        .take_while(|row| !row.starts_with('\u{2500}'))
        .copied()
        .filter(|row| !row.is_empty())
        .collect()
}

// ===== Tests =====

#[test]
fn register_chat_and_render_incoming_message() {
    let harness = Harness::start(25);
    let (mut server, mut reader) = harness.connect_as("Alice");

    assert!(type_line(&harness.keys, "hello"));
    assert_eq!(read_line(&mut reader), "hello\n");

    server.write_all(b"7 hi there\n").unwrap();
    harness.wait_for_frame("incoming message", |rows| {
        message_rows(rows).last() == Some(&"hi there")
    });

    assert!(type_line(&harness.keys, "/exit"));
    assert_eq!(read_line(&mut reader), "/exit\n");
    drop(server);

    assert_eq!(harness.finish().unwrap(), Termination::Exited);
}

#[test]
fn prompts_are_shown_before_chat() {
    let harness = Harness::start(25);
    harness.wait_for_frame("address prompt", |rows| {
        rows.first() == Some(&session::ADDRESS_PROMPT)
    });

    let (server, mut reader) = harness.connect_as("Bob");
    harness.wait_for_frame("prompts cleared", |rows| message_rows(rows).is_empty());

    harness.keys.send(Input::Interrupt).unwrap();
    assert_eq!(read_line(&mut reader), "/exit\n");
    drop(server);

    assert_eq!(harness.finish().unwrap(), Termination::Exited);
}

#[test]
fn arrow_up_requests_older_message_and_splices_it_in() {
    let harness = Harness::start(5);
    let (mut server, mut reader) = harness.connect_as("Carol");

    for index in 10..=14 {
        writeln!(server, "{index} msg {index}").unwrap();
    }
    harness.wait_for_frame("window 10..=14", |rows| {
        message_rows(rows) == ["msg 10", "msg 11", "msg 12", "msg 13", "msg 14"]
    });

    harness.press(KeyEvent::Up);
    assert_eq!(read_line(&mut reader), "/scroll_up 10\n");

    server.write_all(b"/scroll_up 9 earlier msg\n").unwrap();
    harness.wait_for_frame("window 9..=13", |rows| {
        message_rows(rows) == ["earlier msg", "msg 10", "msg 11", "msg 12", "msg 13"]
    });

    harness.press(KeyEvent::Down);
    assert_eq!(read_line(&mut reader), "/scroll_down 13\n");

    harness.keys.send(Input::Interrupt).unwrap();
    assert_eq!(read_line(&mut reader), "/exit\n");
    drop(server);

    assert_eq!(harness.finish().unwrap(), Termination::Exited);
}

#[test]
fn exit_sends_nothing_further() {
    let harness = Harness::start(25);
    let (server, mut reader) = harness.connect_as("Dave");

    assert!(type_line(&harness.keys, "/exit"));
    // Queued after /exit; must never reach the server.
    assert!(type_line(&harness.keys, "too late"));

    assert_eq!(read_line(&mut reader), "/exit\n");
    assert_eq!(harness.finish().unwrap(), Termination::Exited);
    assert_eq!(read_line(&mut reader), "", "client should have closed the socket");
    drop(server);
}

#[test]
fn server_hangup_ends_session_with_error() {
    let harness = Harness::start(25);
    let (server, reader) = harness.connect_as("Eve");

    drop(reader);
    server.shutdown(std::net::Shutdown::Both).unwrap();
    drop(server);

    let err = harness.finish().unwrap_err();
    assert!(
        matches!(err, AppError::Transport(TransportError::Closed)),
        "unexpected error: {err}"
    );
}

#[test]
fn interrupt_at_name_prompt_sends_nothing() {
    let harness = Harness::start(25);
    let addr = harness.listener.local_addr().unwrap();
    assert!(type_line(&harness.keys, &addr.to_string()));
    let (server, _) = harness.listener.accept().unwrap();
    server.set_read_timeout(Some(WAIT)).unwrap();

    harness.keys.send(Input::Interrupt).unwrap();
    assert_eq!(harness.finish().unwrap(), Termination::Interrupted);

    let mut reader = BufReader::new(server);
    assert_eq!(read_line(&mut reader), "");
}
