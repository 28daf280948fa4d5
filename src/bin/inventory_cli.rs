// src/bin/inventory_cli.rs

use anyhow::Context;
use inventory_tracker::client::command::HELP;
use inventory_tracker::client::{
    format_item, normalize_server_addr, ClientError, Command, InventoryClient, LocationShortcuts,
};
use inventory_tracker::domain::item::{Barcode, Item, ItemDraft};
use inventory_tracker::infra::config;
use std::io::Write;
use std::path::Path;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}

#[derive(Clone, Copy)]
enum DraftKind {
    New,
    Modify,
}

impl DraftKind {
    fn label(self) -> &'static str {
        match self {
            DraftKind::New => "new",
            DraftKind::Modify => "modify",
        }
    }
}

fn load_server_addr(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let addr = raw.trim();
    (!addr.is_empty()).then(|| normalize_server_addr(addr))
}

fn save_server_addr(path: &Path, addr: &str) {
    if let Err(e) = std::fs::write(path, format!("{addr}\n")) {
        eprintln!("Could not write {}: {e}", path.display());
    }
}

async fn ask_server_addr(prompt: &mut Prompt, path: &Path) -> anyhow::Result<Option<String>> {
    loop {
        let Some(raw) = prompt.ask("server addr> ").await? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            continue;
        }
        let addr = normalize_server_addr(&raw);
        save_server_addr(path, &addr);
        return Ok(Some(addr));
    }
}

/// Returns a client for a reachable server, re-prompting while the health probe fails.
async fn connect(
    prompt: &mut Prompt,
    path: &Path,
    mut addr: Option<String>,
) -> anyhow::Result<Option<InventoryClient>> {
    loop {
        let current = match addr.take() {
            Some(a) => a,
            None => match ask_server_addr(prompt, path).await? {
                Some(a) => a,
                None => return Ok(None),
            },
        };
        let client = InventoryClient::new(&current);
        match client.health().await {
            Ok(()) => {
                println!("Connected to {}", client.base_url());
                return Ok(Some(client));
            }
            Err(e) => {
                eprintln!("Server at {} is not reachable ({e}).", client.base_url());
            }
        }
    }
}

async fn read_draft(
    prompt: &mut Prompt,
    shortcuts: &LocationShortcuts,
    kind: DraftKind,
    barcode: Barcode,
) -> anyhow::Result<Option<ItemDraft>> {
    let label = kind.label();
    let Some(location) = prompt.ask(&format!("{label}>{barcode}>location> ")).await? else {
        return Ok(None);
    };
    let Some(name) = prompt.ask(&format!("{label}>{barcode}>name> ")).await? else {
        return Ok(None);
    };
    Ok(Some(ItemDraft::new(
        name.trim(),
        barcode,
        shortcuts.expand(&location),
    )))
}

/// Runs `op` for every barcode and returns how many calls succeeded.
async fn for_each_barcode<F, Fut>(barcodes: &[Barcode], mut op: F) -> usize
where
    F: FnMut(Barcode) -> Fut,
    Fut: std::future::Future<Output = Result<Item, ClientError>>,
{
    let mut done = 0;
    for &barcode in barcodes {
        match op(barcode).await {
            Ok(item) => {
                debug!(barcode, "request succeeded");
                println!("{}", format_item(&item));
                done += 1;
            }
            Err(e) => eprintln!("{barcode}: {e}"),
        }
    }
    done
}

async fn run_drafts(
    prompt: &mut Prompt,
    client: &InventoryClient,
    shortcuts: &LocationShortcuts,
    kind: DraftKind,
    barcodes: &[Barcode],
) -> anyhow::Result<usize> {
    let mut done = 0;
    for &barcode in barcodes {
        let Some(draft) = read_draft(prompt, shortcuts, kind, barcode).await? else {
            break;
        };
        let result = match kind {
            DraftKind::New => client.create(&draft).await,
            DraftKind::Modify => client.modify(&draft).await,
        };
        match result {
            Ok(item) => {
                println!("{}", format_item(&item));
                done += 1;
            }
            Err(e) => eprintln!("{barcode}: {e}"),
        }
    }
    Ok(done)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config_path = config::client_config_path();
    let config_path = Path::new(&config_path);
    let shortcuts = LocationShortcuts::parse(&config::location_shortcuts());
    let mut prompt = Prompt::new();

    let Some(mut client) = connect(&mut prompt, config_path, load_server_addr(config_path))
        .await
        .context("reading server address")?
    else {
        return Ok(());
    };

    if !shortcuts.is_empty() {
        println!("Location shortcuts:");
        for (key, location) in shortcuts.entries() {
            println!("  {key} = {location}");
        }
    }

    while let Some(line) = prompt.ask("> ").await? {
        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                println!("{HELP}");
                continue;
            }
        };

        match command {
            Command::New(barcodes) => {
                let n = run_drafts(&mut prompt, &client, &shortcuts, DraftKind::New, &barcodes).await?;
                println!("Created {n} items");
            }
            Command::Modify(barcodes) => {
                let n =
                    run_drafts(&mut prompt, &client, &shortcuts, DraftKind::Modify, &barcodes).await?;
                println!("Modified {n} items");
            }
            Command::Delete(barcodes) => {
                let n = for_each_barcode(&barcodes, |b| client.delete(b)).await;
                println!("Deleted {n} items");
            }
            Command::Log(barcodes) => {
                let n = for_each_barcode(&barcodes, |b| client.log(b)).await;
                println!("Logged {n} items");
            }
            Command::See(barcodes) => {
                for_each_barcode(&barcodes, |b| client.get(b)).await;
            }
            Command::All => match client.all().await {
                Ok(items) => {
                    for item in &items {
                        println!("{}", format_item(item));
                    }
                    println!("{} items", items.len());
                }
                Err(e) => eprintln!("{e}"),
            },
            Command::Server => match connect(&mut prompt, config_path, None).await? {
                Some(c) => client = c,
                None => break,
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
