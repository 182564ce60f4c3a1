use anyhow::Result;
use clap::{Parser, Subcommand};
use landrive::core::config::DEV_LAN_BASE;
use landrive::core::telemetry::logging::init_logging;
use landrive::{
    Activated, Config, ExplorerSession, FolderPath, ProgressTracker, RemoteClient, TransferStatus,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landrive", about = "Browse a LAN network drive over HTTP")]
struct Cli {
    /// Base URL of the storage service.
    #[arg(long, env = "LANDRIVE_BASE_URL", default_value = DEV_LAN_BASE)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the listing of a folder (root when omitted).
    Ls { folder: Option<String> },
    /// Upload a local file into a folder on the drive.
    Upload {
        file: PathBuf,
        #[arg(long, default_value = "")]
        folder: String,
    },
    /// Open the retrieval URL for a file in the system browser.
    Download {
        name: String,
        #[arg(long, default_value = "")]
        folder: String,
        /// Print the URL instead of opening it.
        #[arg(long)]
        print_url: bool,
    },
    /// Interactive session starting at the root.
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let client = RemoteClient::new(&Config::new(&cli.base_url));

    match cli.command {
        Command::Ls { folder } => {
            let folder = FolderPath::parse(folder.as_deref().unwrap_or(""))?;
            let entries = client.fetch_listing(&folder).await?;
            for entry in &entries {
                println!("{} {}", if entry.is_folder() { "📁" } else { "📄" }, entry.name);
            }
        }
        Command::Upload { file, folder } => {
            let folder = FolderPath::parse(&folder)?;
            let name = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow::anyhow!("not a file path: {}", file.display()))?
                .to_string();
            let data = tokio::fs::read(&file).await?;
            let mut tracker = ProgressTracker::new();
            client
                .upload(&folder, &name, data, move |sent, total| {
                    if let TransferStatus::InProgress {
                        percent: Some(pct),
                    } = tracker.update(sent, Some(total))
                    {
                        print!("\rupload: {pct:>3}%");
                        let _ = io::stdout().flush();
                    }
                })
                .await?;
            println!("\ruploaded {name}");
        }
        Command::Download {
            name,
            folder,
            print_url,
        } => {
            let folder = FolderPath::parse(&folder)?;
            let url = client.download_url(&folder, &name)?;
            if print_url {
                println!("{url}");
            } else {
                open::that(url.as_str())?;
            }
        }
        Command::Browse => browse(client).await?,
    }
    Ok(())
}

async fn browse(client: RemoteClient) -> Result<()> {
    let mut session = ExplorerSession::new(client);
    let ticket = session.refresh_current();
    session.run_refresh(ticket).await;
    print_listing(&session);

    let stdin = io::stdin();
    loop {
        print!("{}> ", display_folder(&session));
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("ls"), _) => print_listing(&session),
            (Some("back"), _) => {
                let ticket = session.go_back();
                session.run_refresh(ticket).await;
                print_listing(&session);
            }
            (Some("open"), Some(name)) => match session.find_entry(name).cloned() {
                Some(entry) => match session.activate(&entry).await {
                    Ok(Activated::Entered) => print_listing(&session),
                    Ok(Activated::Download(url)) => {
                        open::that(url.as_str())?;
                        println!("opened {url}");
                    }
                    Err(err) => eprintln!("{err}"),
                },
                None => eprintln!("no such entry: {name}"),
            },
            (Some("url"), Some(name)) => match session.find_entry(name).cloned() {
                Some(entry) => match session.download_url(&entry) {
                    Ok(url) => println!("{url}"),
                    Err(err) => eprintln!("{err}"),
                },
                None => eprintln!("no such entry: {name}"),
            },
            (Some("up"), Some(path)) => {
                let path = PathBuf::from(path);
                let mut rx = session.subscribe_transfer();
                let printer = tokio::spawn(async move {
                    while rx.changed().await.is_ok() {
                        if let TransferStatus::InProgress {
                            percent: Some(pct),
                        } = *rx.borrow_and_update()
                        {
                            print!("\rupload: {pct:>3}%");
                            let _ = io::stdout().flush();
                        }
                    }
                });
                match session.upload_path(&path).await {
                    Ok(()) => {
                        println!("\ruploaded");
                        print_listing(&session);
                    }
                    Err(err) => eprintln!("\rupload failed: {err}"),
                }
                printer.abort();
            }
            (Some("q"), _) | (Some("quit"), _) => break,
            (None, _) => print_listing(&session),
            (Some(other), _) => {
                eprintln!("unknown command: {other} (ls, open NAME, back, up FILE, url NAME, quit)");
            }
        }
    }
    Ok(())
}

fn print_listing(session: &ExplorerSession) {
    println!("-- {} --", display_folder(session));
    if session.can_go_back() {
        println!("   [back]");
    }
    for entry in session.entries() {
        println!("{} {}", if entry.is_folder() { "📁" } else { "📄" }, entry.name);
    }
}

fn display_folder(session: &ExplorerSession) -> String {
    if session.folder().is_root() {
        "/".to_string()
    } else {
        format!("/{}", session.folder())
    }
}
