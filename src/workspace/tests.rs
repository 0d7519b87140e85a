//! Unit tests for the workspace state machine: selection, editing, saving,
//! create/delete/rename, search, alerts, and the context menu.

use super::*;
use std::time::Duration;
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────

fn workspace_with(files: &[(&str, &str)], policy: SavePolicy) -> (Workspace, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("storage");
    std::fs::create_dir_all(&storage).unwrap();
    for (name, content) in files {
        std::fs::write(storage.join(name), content).unwrap();
    }
    let config = Config {
        storage_dir: storage,
        export_dir: dir.path().join("exports"),
        save_policy: policy,
        ..Config::default()
    };
    (Workspace::open(config).unwrap(), dir)
}

fn workspace(files: &[(&str, &str)]) -> (Workspace, TempDir) {
    workspace_with(files, SavePolicy::Manual)
}

fn disk(ws: &Workspace, name: &str) -> String {
    ws.store().read(name).unwrap()
}

fn alert_text(ws: &Workspace) -> &str {
    ws.alert().map(|a| a.message.as_str()).unwrap_or("")
}

// ─── Opening ─────────────────────────────────────────────────────

#[test]
fn open_creates_storage_and_lists_files() {
    let dir = TempDir::new().unwrap();
    let ws = Workspace::open(Config::with_storage(dir.path().join("fresh"))).unwrap();
    assert!(dir.path().join("fresh").is_dir());
    assert!(ws.files().is_empty());
    assert_eq!(ws.phase(), Phase::NoSelection);
}

// ─── Selection & editing ─────────────────────────────────────────

#[test]
fn select_loads_draft_and_enters_viewing() {
    let (mut ws, _dir) = workspace(&[("a.md", "# A")]);
    let before = ws.generation();
    ws.update(Msg::Select("a.md".into()));
    assert_eq!(ws.phase(), Phase::Viewing);
    assert_eq!(ws.selected(), Some("a.md"));
    assert_eq!(ws.draft().unwrap().text(), "# A");
    assert!(ws.draft().unwrap().rendered().html.contains("<h1>A</h1>"));
    assert_eq!(ws.generation(), before + 1);
}

#[test]
fn select_missing_file_raises_error_and_keeps_no_selection() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::Select("ghost.md".into()));
    assert_eq!(ws.phase(), Phase::NoSelection);
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert!(alert_text(&ws).contains("not found"));
}

#[test]
fn edit_marks_dirty_and_rerenders() {
    let (mut ws, _dir) = workspace(&[("a.md", "# A")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("# B".into()));
    assert_eq!(ws.phase(), Phase::Editing { dirty: true });
    assert!(ws.is_unsaved());
    assert!(ws.draft().unwrap().rendered().html.contains("<h1>B</h1>"));
    // Manual policy: nothing written yet
    assert_eq!(disk(&ws, "a.md"), "# A");
}

#[test]
fn edit_without_selection_is_ignored() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::Edit("text".into()));
    assert_eq!(ws.phase(), Phase::NoSelection);
}

#[test]
fn save_writes_exact_text_and_clears_dirty() {
    let (mut ws, _dir) = workspace(&[("a.md", "old")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("new text\n\n- item\n".into()));
    ws.update(Msg::Save);
    assert_eq!(disk(&ws, "a.md"), "new text\n\n- item\n");
    assert_eq!(ws.phase(), Phase::Editing { dirty: false });
    assert!(!ws.is_unsaved());
    assert_eq!(alert_text(&ws), "Saved");
}

#[test]
fn reload_after_save_returns_saved_text() {
    let (mut ws, _dir) = workspace(&[("a.md", "old"), ("b.md", "other")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("edited".into()));
    ws.update(Msg::Save);
    ws.update(Msg::Select("b.md".into()));
    ws.update(Msg::Select("a.md".into()));
    assert_eq!(ws.draft().unwrap().text(), "edited");
    assert_eq!(ws.phase(), Phase::Viewing);
}

#[test]
fn save_without_selection_is_noop() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::Save);
    assert!(ws.alert().is_none());
}

#[test]
fn switching_selection_saves_dirty_draft() {
    let (mut ws, _dir) = workspace(&[("a.md", "a"), ("b.md", "b")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("a2".into()));
    ws.update(Msg::Select("b.md".into()));
    assert_eq!(disk(&ws, "a.md"), "a2");
    assert_eq!(ws.selected(), Some("b.md"));
}

#[test]
fn reselecting_same_file_keeps_draft() {
    let (mut ws, _dir) = workspace(&[("a.md", "a")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("a2".into()));
    let generation = ws.generation();
    ws.update(Msg::Select("a.md".into()));
    assert_eq!(ws.draft().unwrap().text(), "a2");
    assert_eq!(ws.generation(), generation);
}

#[test]
fn autosave_persists_every_change_without_alert() {
    let (mut ws, _dir) = workspace_with(&[("a.md", "a")], SavePolicy::OnChange);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("ab".into()));
    assert_eq!(disk(&ws, "a.md"), "ab");
    assert_eq!(ws.phase(), Phase::Editing { dirty: false });
    assert!(ws.alert().is_none());
    ws.update(Msg::Edit("abc".into()));
    assert_eq!(disk(&ws, "a.md"), "abc");
}

#[test]
fn save_failure_keeps_draft_dirty() {
    let (mut ws, dir) = workspace(&[("a.md", "a")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("changed".into()));
    // Replace the note with a directory so the write fails
    let path = dir.path().join("storage").join("a.md");
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();
    ws.update(Msg::Save);
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert!(alert_text(&ws).starts_with("Save failed"));
    assert!(ws.is_unsaved());
}

#[test]
fn create_keeps_save_error_visible_when_switch_is_refused() {
    let (mut ws, dir) = workspace(&[("a.md", "a")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("changed".into()));
    let path = dir.path().join("storage").join("a.md");
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    ws.update(Msg::NewFileInput("b".into()));
    ws.update(Msg::Create);

    assert!(dir.path().join("storage").join("b.md").is_file());
    assert_eq!(ws.selected(), Some("a.md"));
    assert!(ws.is_unsaved());
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert_eq!(alert_text(&ws), "b.md Created, but a.md could not be saved");
}

// ─── Create / delete / rename ────────────────────────────────────

#[test]
fn create_appends_extension_refreshes_and_selects() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::NewFileInput("ideas".into()));
    ws.update(Msg::Create);
    assert_eq!(ws.files(), &["ideas.md".to_string()]);
    assert_eq!(ws.new_file_name(), "");
    assert_eq!(ws.selected(), Some("ideas.md"));
    assert_eq!(alert_text(&ws), "ideas.md Created");
}

#[test]
fn create_with_empty_name_is_rejected() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::NewFileInput("   ".into()));
    ws.update(Msg::Create);
    assert!(ws.files().is_empty());
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert_eq!(ws.new_file_name(), "   ");
}

#[test]
fn create_existing_name_does_not_truncate() {
    let (mut ws, _dir) = workspace(&[("ideas.md", "keep")]);
    ws.update(Msg::NewFileInput("ideas".into()));
    ws.update(Msg::Create);
    assert_eq!(disk(&ws, "ideas.md"), "keep");
    assert!(alert_text(&ws).contains("already exists"));
}

#[test]
fn delete_removes_from_listing() {
    let (mut ws, _dir) = workspace(&[("a.md", ""), ("b.md", "")]);
    ws.update(Msg::Delete("a.md".into()));
    assert_eq!(ws.files(), &["b.md".to_string()]);
    assert_eq!(alert_text(&ws), "Deleted a.md");
}

#[test]
fn deleting_selected_file_returns_to_no_selection() {
    let (mut ws, _dir) = workspace(&[("a.md", "x")]);
    ws.update(Msg::Select("a.md".into()));
    let generation = ws.generation();
    ws.update(Msg::Delete("a.md".into()));
    assert_eq!(ws.phase(), Phase::NoSelection);
    assert_eq!(ws.selected(), None);
    assert_eq!(ws.generation(), generation + 1);
}

#[test]
fn deleting_other_file_keeps_selection() {
    let (mut ws, _dir) = workspace(&[("a.md", "x"), ("b.md", "y")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Delete("b.md".into()));
    assert_eq!(ws.selected(), Some("a.md"));
}

#[test]
fn deleting_missing_file_reports_not_found() {
    let (mut ws, _dir) = workspace(&[]);
    ws.update(Msg::Delete("ghost.md".into()));
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert!(alert_text(&ws).contains("not found"));
}

#[test]
fn rename_follows_selection() {
    let (mut ws, _dir) = workspace(&[("a.md", "body")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::StartRename("a.md".into()));
    ws.update(Msg::Rename("b.md".into()));
    assert_eq!(ws.files(), &["b.md".to_string()]);
    assert_eq!(ws.selected(), Some("b.md"));
    assert_eq!(ws.draft().unwrap().name(), "b.md");
    assert!(ws.rename_target().is_none());
}

#[test]
fn rename_onto_existing_fails() {
    let (mut ws, _dir) = workspace(&[("a.md", "a"), ("b.md", "b")]);
    ws.update(Msg::StartRename("a.md".into()));
    ws.update(Msg::Rename("b.md".into()));
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    assert_eq!(disk(&ws, "b.md"), "b");
}

#[test]
fn rename_without_target_is_noop() {
    let (mut ws, _dir) = workspace(&[("a.md", "a")]);
    ws.update(Msg::Rename("b.md".into()));
    assert_eq!(ws.files(), &["a.md".to_string()]);
}

#[test]
fn refresh_picks_up_external_files() {
    let (mut ws, dir) = workspace(&[]);
    std::fs::write(dir.path().join("storage").join("outside.md"), "").unwrap();
    assert!(ws.files().is_empty());
    ws.update(Msg::Refresh);
    assert_eq!(ws.files(), &["outside.md".to_string()]);
}

// ─── Search ──────────────────────────────────────────────────────

#[test]
fn search_filters_case_insensitively() {
    let (mut ws, _dir) = workspace(&[("Notes.md", ""), ("Other.md", "")]);
    ws.update(Msg::Search("not".into()));
    assert_eq!(ws.visible_files(), vec!["Notes.md"]);
    ws.update(Msg::Search(String::new()));
    assert_eq!(ws.visible_files(), vec!["Notes.md", "Other.md"]);
}

// ─── Alerts ──────────────────────────────────────────────────────

#[test]
fn new_alert_replaces_old() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::Delete("ghost.md".into()));
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Error);
    ws.update(Msg::Delete("a.md".into()));
    assert_eq!(ws.alert().unwrap().kind, AlertKind::Success);
    assert_eq!(alert_text(&ws), "Deleted a.md");
}

#[test]
fn tick_clears_expired_alert() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::Delete("a.md".into()));
    ws.update(Msg::Tick(Instant::now() + Duration::from_secs(4)));
    assert!(ws.alert().is_none());
}

#[test]
fn tick_keeps_fresh_alert() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::Delete("a.md".into()));
    ws.update(Msg::Tick(Instant::now()));
    assert!(ws.alert().is_some());
}

// ─── Context menu ────────────────────────────────────────────────

#[test]
fn menu_delete_removes_file_and_closes() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::OpenMenu { file: "a.md".into(), x: 3, y: 4 });
    ws.update(Msg::MenuDown);
    ws.update(Msg::MenuDown);
    ws.update(Msg::MenuActivate);
    assert!(ws.menu().is_none());
    assert!(ws.files().is_empty());
}

#[test]
fn menu_export_writes_html() {
    let (mut ws, dir) = workspace(&[("a.md", "# A")]);
    ws.update(Msg::OpenMenu { file: "a.md".into(), x: 0, y: 0 });
    ws.update(Msg::MenuActivate);
    let exported = dir.path().join("exports").join("a.html");
    assert!(exported.is_file());
    assert!(alert_text(&ws).starts_with("Exported to"));
}

#[test]
fn export_of_clean_open_note_uses_its_rendered_html() {
    let (mut ws, dir) = workspace(&[("a.md", "# A")]);
    ws.update(Msg::Select("a.md".into()));
    let expected = ws.draft().unwrap().rendered().html.clone();
    ws.update(Msg::Export("a.md".into()));
    let page = std::fs::read_to_string(dir.path().join("exports").join("a.html")).unwrap();
    assert!(page.contains(&expected));
}

#[test]
fn export_of_dirty_note_uses_disk_content() {
    let (mut ws, dir) = workspace(&[("a.md", "# Disk")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Edit("# Unsaved".into()));
    ws.update(Msg::Export("a.md".into()));
    let page = std::fs::read_to_string(dir.path().join("exports").join("a.html")).unwrap();
    assert!(page.contains("<h1>Disk</h1>"));
    assert!(!page.contains("Unsaved"));
}

#[test]
fn menu_rename_sets_rename_target() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::OpenMenu { file: "a.md".into(), x: 0, y: 0 });
    ws.update(Msg::MenuChoose(MenuItem::Rename));
    assert_eq!(ws.rename_target(), Some("a.md"));
    assert!(ws.menu().is_none());
}

#[test]
fn close_menu_does_nothing_else() {
    let (mut ws, _dir) = workspace(&[("a.md", "")]);
    ws.update(Msg::OpenMenu { file: "a.md".into(), x: 0, y: 0 });
    ws.update(Msg::CloseMenu);
    assert!(ws.menu().is_none());
    assert_eq!(ws.files().len(), 1);
}

// ─── Scroll ──────────────────────────────────────────────────────

#[test]
fn scroll_is_shared_and_reset_on_select() {
    let (mut ws, _dir) = workspace(&[("a.md", ""), ("b.md", "")]);
    ws.update(Msg::Select("a.md".into()));
    ws.update(Msg::Scroll(12));
    assert_eq!(ws.scroll(), 12);
    ws.update(Msg::Select("b.md".into()));
    assert_eq!(ws.scroll(), 0);
}
