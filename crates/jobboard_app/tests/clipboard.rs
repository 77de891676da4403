use jobboard_app::clipboard::{Clipboard, CopyMethod, TerminalClipboard, SHARE_LINK_FILENAME};

#[test]
fn file_fallback_writes_the_link() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = TerminalClipboard::file_only(dir.path().join("store"));

    let method = clipboard.copy("https://jobs.local/?q=go").unwrap();

    let path = dir.path().join("store").join(SHARE_LINK_FILENAME);
    assert_eq!(method, CopyMethod::File(path.clone()));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "https://jobs.local/?q=go\n"
    );
}

#[test]
fn unwritable_fallback_reports_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "file").unwrap();
    let clipboard = TerminalClipboard::file_only(&blocker);

    assert!(clipboard.copy("https://jobs.local/").is_err());
}
