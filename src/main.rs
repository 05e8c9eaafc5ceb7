use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pileshot::{
    FastaAccessor, PileupAssembler, PileupConfig, PileupSnapshot, RenderOptions,
    RowOrder, Snv, TviewSource,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pileshot", about = "Read pileup snapshots around a genomic position")]
struct Cli {
    /// Log debug detail (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Target as chrom:pos, chrom:pos:ref:alt or gene:chrom:pos:ref:alt.
    #[arg(short = 'v', long)]
    variant: String,
    /// Reference FASTA (indexed with .fai, created if missing).
    #[arg(short = 'r', long)]
    reference: PathBuf,
    /// Bases added on each side of the position.
    #[arg(short = 'e', long, default_value_t = 50, allow_negative_numbers = true)]
    extend: i64,
    /// Maximum read rows to keep (0 keeps all).
    #[arg(short = 'd', long, default_value_t = 100, allow_negative_numbers = true)]
    depth: i64,
    /// Keep insertion columns instead of flagging them on reads.
    #[arg(long = "ref-with-ins")]
    ref_with_ins: bool,
    /// Emit reads latest-first.
    #[arg(long)]
    reverse_reads: bool,
}

impl WindowArgs {
    fn config(&self) -> Result<PileupConfig> {
        let row_order = if self.reverse_reads {
            RowOrder::Reversed
        } else {
            RowOrder::AsEmitted
        };
        Ok(PileupConfig::from_signed(self.extend, Some(self.depth))?
            .with_insertion_columns(self.ref_with_ins)
            .with_row_order(row_order))
    }

    fn snv(&self) -> Result<Snv> {
        self.variant
            .parse()
            .with_context(|| format!("invalid variant '{}'", self.variant))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run samtools tview on a BAM file and draw the pileup as SVG.
    Render {
        /// Input BAM file.
        #[arg(short = 'i', long)]
        bam: PathBuf,
        /// Sample name shown in the title.
        #[arg(short = 's', long)]
        sample: String,
        /// Output image (SVG).
        #[arg(short = 'o', long)]
        out: PathBuf,
        /// Image resolution.
        #[arg(long, default_value_t = 200)]
        dpi: u32,
        /// Build the BAM index when it is missing.
        #[arg(long)]
        create_index: bool,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Reconstruct a saved tview text dump and print the aligned rows.
    Reconstruct {
        /// File holding `samtools tview -d T` output for the window.
        #[arg(short = 'b', long)]
        block: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            bam,
            sample,
            out,
            dpi,
            create_index,
            window,
        } => run_render(bam, sample, out, dpi, create_index, window)?,
        Commands::Reconstruct { block, window } => run_reconstruct(block, window)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_render(
    bam: PathBuf,
    sample: String,
    out: PathBuf,
    dpi: u32,
    create_index: bool,
    window: WindowArgs,
) -> Result<()> {
    let snv = window.snv()?;
    let config = window.config()?;

    let source = TviewSource::new(&bam).context("cannot run the alignment viewer")?;
    source
        .ensure_index(create_index)
        .with_context(|| format!("BAM index unavailable for {}", bam.display()))?;
    let accessor = FastaAccessor::open(&window.reference)
        .with_context(|| format!("failed to open reference {}", window.reference.display()))?;

    if out.extension().and_then(|ext| ext.to_str()) != Some("svg") {
        warn!(path = %out.display(), "output is written as SVG regardless of extension");
    }

    let options = RenderOptions::new(format!("{sample} {}", snv.name())).with_dpi(dpi);
    let snapshot = PileupSnapshot::new(source, accessor, config);
    let pileup = snapshot
        .render_to(&snv.chrom, snv.pos, &options, &out)
        .with_context(|| format!("failed to render {}", snv.name()))?;

    info!(
        variant = %snv,
        columns = pileup.width(),
        reads = pileup.depth(),
        out = %out.display(),
        "snapshot complete"
    );
    Ok(())
}

fn run_reconstruct(block_path: PathBuf, window: WindowArgs) -> Result<()> {
    let snv = window.snv()?;
    let config = window.config()?;
    let text = std::fs::read_to_string(&block_path)
        .with_context(|| format!("failed to read block from {}", block_path.display()))?;
    let accessor = FastaAccessor::open(&window.reference)
        .with_context(|| format!("failed to open reference {}", window.reference.display()))?;

    let assembler = PileupAssembler::new(config);
    let target = assembler.window(&snv.chrom, snv.pos)?;
    let block = pileshot::io::parse_viewer_output(&text, target.width());
    let pileup = assembler
        .assemble(&target, &block, &accessor)
        .with_context(|| format!("failed to reconstruct {}", block_path.display()))?;

    if let Some(title) = block.title() {
        println!("{}", title.trim_end());
    }
    print!("{}", pileup.to_text());
    Ok(())
}
