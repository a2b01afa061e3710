use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use text_extractor_core::stores::sqlite::DEFAULT_DATABASE_PATH;
use text_extractor_core::{
    collect_uploads, render_listing, render_listing_json, render_outcome, Embedder, Ingestor,
    RecordStore, ResetPolicy, SentenceEmbedder, SentenceModel, SqliteRecordStore, UploadOutcome,
    UploadedFile,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "text-extractor", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database file holding the `texts` table
    #[arg(long, env = "TEXT_EXTRACTOR_DB", default_value = DEFAULT_DATABASE_PATH)]
    db_path: PathBuf,

    /// Keep records from earlier runs instead of recreating the table when ingesting
    #[arg(long, env = "TEXT_EXTRACTOR_KEEP_HISTORY", default_value_t = false)]
    keep_history: bool,

    /// Pre-trained sentence-embedding model
    #[arg(long, value_enum, default_value_t = ModelKind::AllMiniLmL6V2)]
    model: ModelKind,

    /// Directory for downloaded model weights
    #[arg(long, env = "TEXT_EXTRACTOR_MODEL_CACHE")]
    model_cache_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, embed and store each file, then list every stored record.
    Ingest {
        /// Files to upload; folders contribute their PDF and DOCX files recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Declared MIME type for every upload instead of guessing from the extension.
        #[arg(long)]
        mime: Option<String>,
    },
    /// List every stored record without touching the table.
    List {
        /// Print records as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelKind {
    AllMiniLmL6V2,
    ParaphraseMlMiniLmL12V2,
}

impl From<ModelKind> for SentenceModel {
    fn from(kind: ModelKind) -> Self {
        match kind {
            ModelKind::AllMiniLmL6V2 => SentenceModel::AllMiniLmL6V2,
            ModelKind::ParaphraseMlMiniLmL12V2 => SentenceModel::ParaphraseMultilingualMiniLmL12V2,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let policy = if cli.keep_history {
        ResetPolicy::Keep
    } else {
        ResetPolicy::Recreate
    };

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        db_path = %cli.db_path.display(),
        "text-extractor boot"
    );

    match &cli.command {
        Command::Ingest { paths, mime } => {
            let uploads = collect_uploads(paths, mime.as_deref())?;
            let embedder =
                SentenceEmbedder::try_new(cli.model.into(), cli.model_cache_dir.clone())?;
            ingest(&cli, policy, embedder, &uploads)
        }
        Command::List { json } => {
            let store = SqliteRecordStore::open_for_listing(&cli.db_path)?;
            let records = store.scan_all()?;

            let mut stdout = io::stdout().lock();
            if *json {
                render_listing_json(&mut stdout, &records)?;
            } else {
                render_listing(&mut stdout, &records)?;
            }
            stdout.flush()?;
            store.close()?;
            Ok(())
        }
    }
}

fn ingest<E: Embedder>(
    cli: &Cli,
    policy: ResetPolicy,
    embedder: E,
    uploads: &[UploadedFile],
) -> anyhow::Result<()> {
    let store = SqliteRecordStore::open(&cli.db_path, policy)?.with_dimensions(embedder.dimensions());
    let ingestor = Ingestor::new(embedder, store);
    let mut stdout = io::stdout().lock();

    let mut stored = 0usize;
    for upload in uploads {
        let outcome = ingestor.upload(upload)?;
        if matches!(outcome, UploadOutcome::Stored(_)) {
            stored += 1;
        }
        render_outcome(&mut stdout, &outcome)?;
        writeln!(stdout)?;
    }

    let records = ingestor.records()?;
    render_listing(&mut stdout, &records)?;
    stdout.flush()?;

    info!(
        uploads = uploads.len(),
        stored,
        records = records.len(),
        finished_at = %Utc::now().to_rfc3339(),
        "ingest complete"
    );

    ingestor.into_store().close()?;
    Ok(())
}
