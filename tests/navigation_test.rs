use anyhow::Result;
use landrive::core::config::{resolve_base_url, DEV_LAN_BASE, DEV_PAGE_HOST};
use landrive::{
    Action, Config, EntryKind, Error, ExplorerSession, FileEntry, FolderPath, RemoteClient,
};

fn folder_entry(name: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        kind: EntryKind::Folder,
    }
}

fn file_entry(name: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        kind: EntryKind::File,
    }
}

fn session() -> ExplorerSession {
    ExplorerSession::new(RemoteClient::new(&Config::new("http://drive.test:8000")))
}

#[test]
fn test_base_url_follows_page_host() {
    assert_eq!(resolve_base_url(DEV_PAGE_HOST), DEV_LAN_BASE);
    // Anywhere else the client talks to the origin that served the page.
    assert_eq!(resolve_base_url("drive.example.com"), "");
    assert_eq!(resolve_base_url("localhost:8000"), "");
    assert_eq!(Config::for_page_host(DEV_PAGE_HOST).base_url, DEV_LAN_BASE);
}

#[test]
fn test_enter_then_back_returns_to_origin() -> Result<()> {
    let root = FolderPath::root();
    let docs = root.child("docs");
    assert_eq!(docs.as_str(), "docs");

    let nested = docs.child("2024");
    assert_eq!(nested.as_str(), "docs/2024");
    assert_eq!(nested.parent(), docs);
    assert_eq!(docs.parent(), root);

    let deep = FolderPath::parse("a/b/c")?;
    assert_eq!(deep.parent().as_str(), "a/b");
    assert_eq!(deep.depth(), 3);
    Ok(())
}

#[test]
fn test_go_back_at_root_is_idempotent() {
    let root = FolderPath::root();
    assert!(root.is_root());
    assert_eq!(root.parent(), root);
    assert_eq!(root.parent().parent(), root);
}

#[test]
fn test_parse_rejects_empty_segments() {
    assert!(FolderPath::parse("").is_ok());
    assert!(FolderPath::parse("docs/2024").is_ok());
    for bad in ["/docs", "docs/", "a//b", "/"] {
        assert!(
            matches!(FolderPath::parse(bad), Err(Error::InvalidPath(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_back_affordance_only_off_root() -> Result<()> {
    let mut session = session();
    assert!(!session.can_go_back());

    session.enter_folder(&folder_entry("docs"))?;
    assert!(session.can_go_back());
    assert_eq!(session.folder().as_str(), "docs");

    session.go_back();
    assert!(!session.can_go_back());
    Ok(())
}

#[test]
fn test_enter_requires_folder_kind() {
    let mut session = session();
    let err = session.enter_folder(&file_entry("a.txt")).unwrap_err();
    assert!(matches!(err, Error::NotAFolder(_)));
    assert!(session.folder().is_root());
}

#[test]
fn test_each_transition_issues_one_ticket_for_its_path() -> Result<()> {
    let mut session = session();
    let mount = session.refresh_current();
    assert!(mount.folder().is_root());

    let entered = session.enter_folder(&folder_entry("docs"))?;
    assert_eq!(entered.folder().as_str(), "docs");

    let nested = session.enter_folder(&folder_entry("2024"))?;
    assert_eq!(nested.folder().as_str(), "docs/2024");

    let back = session.go_back();
    assert_eq!(back.folder().as_str(), "docs");
    Ok(())
}

#[test]
fn test_stale_listing_response_is_discarded() -> Result<()> {
    let mut session = session();
    let stale = session.refresh_current();
    let current = session.enter_folder(&folder_entry("docs"))?;

    // The newer response lands first.
    let applied = session.apply_listing(&current, Ok(vec![file_entry("readme.md")]));
    assert!(applied);

    // The older one resolves late and must not overwrite it.
    let applied = session.apply_listing(&stale, Ok(vec![folder_entry("docs")]));
    assert!(!applied);
    assert_eq!(session.entries(), &[file_entry("readme.md")]);
    Ok(())
}

#[test]
fn test_failed_fetch_keeps_previous_view() {
    let mut session = session();
    let first = session.refresh_current();
    let before = vec![folder_entry("docs"), file_entry("a.txt"), file_entry("b.txt")];
    assert!(session.apply_listing(&first, Ok(before.clone())));

    let retry = session.refresh_current();
    let failed = session.apply_listing(
        &retry,
        Err(Error::Service {
            status: 500,
            url: "http://drive.test:8000/files?folder=".to_string(),
        }),
    );
    assert!(!failed);
    assert_eq!(session.entries(), before.as_slice(), "content and order survive");
}

#[test]
fn test_activation_dispatch_is_kind_driven() {
    assert_eq!(Action::for_entry(&folder_entry("docs")), Action::EnterFolder);
    assert_eq!(Action::for_entry(&file_entry("a.txt")), Action::Download);
}

#[test]
fn test_download_never_touches_the_path() -> Result<()> {
    let mut session = session();
    session.enter_folder(&folder_entry("docs"))?;

    let url = session.download_url(&file_entry("readme.md"))?;
    assert_eq!(
        url.as_str(),
        "http://drive.test:8000/download?folder=docs&filename=readme.md"
    );
    assert_eq!(session.folder().as_str(), "docs");

    // Folders have no retrieval URL.
    let err = session.download_url(&folder_entry("2024")).unwrap_err();
    assert!(matches!(err, Error::NotAFile(_)));
    Ok(())
}

#[test]
fn test_download_url_encodes_query_values() -> Result<()> {
    let session = session();
    let url = session.download_url(&file_entry("a&b.txt"))?;
    assert_eq!(
        url.as_str(),
        "http://drive.test:8000/download?folder=&filename=a%26b.txt"
    );
    Ok(())
}
