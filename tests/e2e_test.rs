use std::process::Command;
use std::time::Duration;

use expectrl::{Eof, Regex, Session};
use tempfile::TempDir;

// ─── Raw byte constants (what iTerm2/macOS actually sends) ──────────────

const CTRL_Q: &[u8] = b"\x11"; // Ctrl+Q
const CTRL_S: &[u8] = b"\x13"; // Ctrl+S
const CTRL_N: &[u8] = b"\x0e"; // Ctrl+N
const CTRL_H: &[u8] = b"\x08"; // Ctrl+H (Ctrl+Backspace on macOS)
const ENTER: &[u8] = b"\r"; // Enter/Return
const BACKSPACE: &[u8] = b"\x7f"; // Backspace (iTerm2 default = DEL)
const END: &[u8] = b"\x1b[F"; // End

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Spawns the editor over a temp storage directory holding `files`.
fn spawn_mdnotes(files: &[(&str, &str)]) -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    let bin = env!("CARGO_BIN_EXE_mdnotes");
    let mut cmd = Command::new(bin);
    cmd.arg("--storage").arg(dir.path());
    cmd.arg("--export-dir").arg(dir.path().join("exports"));
    cmd.env("TERM", "xterm-256color");
    cmd.env_remove("MDNOTES_LOG");

    let mut session = Session::spawn(cmd).expect("Failed to spawn mdnotes");
    session.set_expect_timeout(Some(Duration::from_secs(5)));
    (session, dir)
}

/// Small delay to let the TUI render.
fn short_delay() {
    std::thread::sleep(Duration::from_millis(200));
}

/// Send bytes and wait a moment for the TUI to process.
fn send_and_wait(session: &mut Session, bytes: &[u8]) {
    session.send(bytes).expect("Failed to send bytes");
    short_delay();
}

/// Opens the highlighted (first) note from the file list.
fn open_first(session: &mut Session) {
    short_delay();
    send_and_wait(session, ENTER);
}

/// Cleanly quit the mdnotes process.
fn quit(session: &mut Session) {
    send_and_wait(session, CTRL_Q);
    // Wait for EOF (process exit)
    let _ = session.expect(Eof);
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// A. App Lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn app_launches_shows_placeholder_and_ctrl_q_exits() {
    let (mut session, _dir) = spawn_mdnotes(&[("test.md", "hello")]);
    session
        .expect(Regex("Open File To Edit"))
        .expect("Should see the no-file header");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}

#[test]
fn app_lists_notes_and_shows_hints() {
    let (mut session, _dir) = spawn_mdnotes(&[("test.md", "hello")]);
    session
        .expect(Regex("test\\.md"))
        .expect("Should see the note in the file list");
    session
        .expect(Regex("F1"))
        .expect("Should show the key hints");
    quit(&mut session);
}

#[test]
fn app_creates_missing_storage_directory() {
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("notes");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdnotes"));
    cmd.arg("--storage").arg(&storage);
    cmd.env("TERM", "xterm-256color");
    let mut session = Session::spawn(cmd).expect("Failed to spawn mdnotes");
    session.set_expect_timeout(Some(Duration::from_secs(5)));
    session.expect(Regex("Files")).expect("Should render the sidebar");
    quit(&mut session);
    assert!(storage.is_dir());
}

// ═══════════════════════════════════════════════════════════════════════
// B. Editing and Saving
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn app_type_and_save_persists_to_disk() {
    let (mut session, dir) = spawn_mdnotes(&[("test.md", "initial")]);
    open_first(&mut session);
    send_and_wait(&mut session, END);
    session.send(b" ADDED").expect("send text");
    short_delay();
    send_and_wait(&mut session, CTRL_S);
    session
        .expect("Saved")
        .expect("Should see 'Saved' alert");
    quit(&mut session);
    assert_eq!(read(&dir, "test.md"), "initial ADDED");
}

#[test]
fn ctrl_q_saves_unsaved_changes() {
    let (mut session, dir) = spawn_mdnotes(&[("test.md", "abc")]);
    open_first(&mut session);
    send_and_wait(&mut session, END);
    session.send(b"d").expect("send text");
    short_delay();
    quit(&mut session);
    assert_eq!(read(&dir, "test.md"), "abcd");
}

#[test]
fn backspace_0x7f_deletes_one_character() {
    let (mut session, dir) = spawn_mdnotes(&[("test.md", "abcde")]);
    open_first(&mut session);
    send_and_wait(&mut session, END);
    send_and_wait(&mut session, BACKSPACE);
    send_and_wait(&mut session, CTRL_S);
    quit(&mut session);
    assert_eq!(read(&dir, "test.md"), "abcd");
}

#[test]
fn ctrl_h_deletes_word_backward() {
    let (mut session, dir) = spawn_mdnotes(&[("test.md", "hello world")]);
    open_first(&mut session);
    send_and_wait(&mut session, END);
    send_and_wait(&mut session, CTRL_H);
    send_and_wait(&mut session, CTRL_S);
    quit(&mut session);
    let content = read(&dir, "test.md");
    assert!(
        !content.contains("world"),
        "Ctrl+H should delete word backward, got: '{}'",
        content
    );
}

// ═══════════════════════════════════════════════════════════════════════
// C. Notes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ctrl_n_creates_note_and_opens_it() {
    let (mut session, dir) = spawn_mdnotes(&[]);
    short_delay();
    send_and_wait(&mut session, CTRL_N);
    session.send(b"ideas").expect("send name");
    short_delay();
    send_and_wait(&mut session, ENTER);
    session
        .expect("ideas.md Created")
        .expect("Should see the created alert");
    session.send(b"# Ideas").expect("send text");
    short_delay();
    send_and_wait(&mut session, CTRL_S);
    quit(&mut session);
    assert_eq!(read(&dir, "ideas.md"), "# Ideas");
}

#[test]
fn esc_does_not_quit_app() {
    let (mut session, _dir) = spawn_mdnotes(&[("test.md", "hello")]);
    short_delay();
    // Double Esc so crossterm parses it as a standalone Esc event
    session.send(b"\x1b\x1b").expect("send Esc");
    short_delay();
    assert!(
        session.is_alive().unwrap_or(false),
        "Esc should NOT quit the application"
    );
    quit(&mut session);
}
