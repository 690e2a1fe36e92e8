use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (direst.toml)
    #[arg(short, long, conflicts_with = "url")]
    pub config: Option<String>,

    /// Provider prefix, e.g. http://localhost:5000/wind/ (falls back to $DIREST_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum number of codes per request
    #[arg(long)]
    pub max_batch_size: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the Wind gateway
    #[command(subcommand)]
    Wind(WindCommand),

    /// Query the iFinD gateway
    #[command(subcommand)]
    Ifind(IFinDCommand),
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Comma-separated codes (e.g. "600000.SH,600004.SH")
    #[arg(long)]
    pub codes: String,

    #[arg(long)]
    pub fields: String,

    #[arg(long, default_value = "")]
    pub options: String,
}

#[derive(Args)]
pub struct SeriesArgs {
    /// Comma-separated codes (e.g. "600000.SH,600004.SH")
    #[arg(long)]
    pub codes: String,

    #[arg(long)]
    pub fields: String,

    /// Start date (YYYY-MM-DD) or datetime (YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub begin: String,

    /// End date (YYYY-MM-DD) or datetime (YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub end: String,

    #[arg(long, default_value = "")]
    pub options: String,
}

#[derive(Subcommand)]
pub enum WindCommand {
    /// Constituent sets (wset)
    Wset {
        #[arg(long)]
        tablename: String,
        #[arg(long, default_value = "")]
        options: String,
    },
    /// Cross-sectional snapshot (wss)
    Wss(SnapshotArgs),
    /// Daily series (wsd)
    Wsd(SeriesArgs),
    /// Minute bars (wsi)
    Wsi(SeriesArgs),
    /// Intraday ticks (wst)
    Wst(SeriesArgs),
    /// Real-time quotes (wsq)
    Wsq(SnapshotArgs),
    /// Economic database series (edb)
    Edb {
        #[arg(long)]
        codes: String,
        #[arg(long)]
        begin: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        options: String,
    },
    /// Trading day at an offset (tdaysoffset)
    Tdaysoffset {
        #[arg(long, allow_hyphen_values = true)]
        offset: i64,
        #[arg(long)]
        begin: String,
        #[arg(long, default_value = "")]
        options: String,
    },
    /// Trading days in a range (tdays)
    Tdays {
        #[arg(long)]
        begin: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        options: String,
    },
}

#[derive(Args)]
pub struct RangedArgs {
    /// Comma-separated THS codes
    #[arg(long)]
    pub codes: String,

    /// Indicators separated by ';' (e.g. "close;open")
    #[arg(long)]
    pub indicators: String,

    #[arg(long, default_value = "")]
    pub params: String,

    #[arg(long)]
    pub begin: String,

    #[arg(long)]
    pub end: String,
}

#[derive(Subcommand)]
pub enum IFinDCommand {
    /// THS_DateSerial
    DateSerial {
        #[command(flatten)]
        args: RangedArgs,
        /// e.g. "Days:Tradedays,Fill:Previous,Interval:D"
        #[arg(long, default_value = "")]
        global_params: String,
    },
    /// THS_HighFrequenceSequence
    HighFrequence(RangedArgs),
    /// THS_RealtimeQuotes
    RealtimeQuotes {
        #[arg(long)]
        codes: String,
        #[arg(long)]
        indicators: String,
        #[arg(long, default_value = "")]
        params: String,
    },
    /// THS_HistoryQuotes
    HistoryQuotes(RangedArgs),
    /// THS_Snapshot
    Snapshot(RangedArgs),
    /// THS_BasicData
    BasicData {
        #[arg(long)]
        codes: String,
        #[arg(long)]
        indicators: String,
        #[arg(long, default_value = "")]
        params: String,
    },
    /// THS_DataPool
    DataPool {
        #[arg(long)]
        name: String,
        #[arg(long)]
        params: String,
        #[arg(long)]
        options: String,
    },
    /// THS_EDBQuery
    EdbQuery {
        #[arg(long)]
        indicators: String,
        #[arg(long)]
        begin: String,
        #[arg(long)]
        end: String,
    },
    /// THS_DateQuery
    DateQuery {
        /// Exchange short name, e.g. SSE
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        params: String,
        #[arg(long)]
        begin: String,
        #[arg(long)]
        end: String,
    },
}
